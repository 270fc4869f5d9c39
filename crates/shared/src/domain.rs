use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Named fields on the puff run-parameter and ashxp forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "volc")]
    Volc,
    #[serde(rename = "lat")]
    Lat,
    #[serde(rename = "lon")]
    Lon,
    #[serde(rename = "plumeMin")]
    PlumeMin,
    #[serde(rename = "area")]
    Area,
    #[serde(rename = "eruptDate")]
    EruptDate,
    #[serde(rename = "runHours")]
    RunHours,
    #[serde(rename = "eruptHours")]
    EruptHours,
    #[serde(rename = "saveHours")]
    SaveHours,
    #[serde(rename = "phiDist")]
    PhiDist,
    #[serde(rename = "ashLogMean")]
    AshLogMean,
    #[serde(rename = "ashLogSdev")]
    AshLogSdev,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "previous")]
    Previous,
}

impl FieldName {
    pub const ALL: [FieldName; 14] = [
        FieldName::Volc,
        FieldName::Lat,
        FieldName::Lon,
        FieldName::PlumeMin,
        FieldName::Area,
        FieldName::EruptDate,
        FieldName::RunHours,
        FieldName::EruptHours,
        FieldName::SaveHours,
        FieldName::PhiDist,
        FieldName::AshLogMean,
        FieldName::AshLogSdev,
        FieldName::Image,
        FieldName::Previous,
    ];

    /// The `name` attribute of the HTML control.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Volc => "volc",
            FieldName::Lat => "lat",
            FieldName::Lon => "lon",
            FieldName::PlumeMin => "plumeMin",
            FieldName::Area => "area",
            FieldName::EruptDate => "eruptDate",
            FieldName::RunHours => "runHours",
            FieldName::EruptHours => "eruptHours",
            FieldName::SaveHours => "saveHours",
            FieldName::PhiDist => "phiDist",
            FieldName::AshLogMean => "ashLogMean",
            FieldName::AshLogSdev => "ashLogSdev",
            FieldName::Image => "image",
            FieldName::Previous => "previous",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volcano {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Degrees north.
    pub lat: f64,
    /// Degrees east.
    pub lon: f64,
    pub plume_min: f64,
    pub area: f64,
}

/// Per-volcano lookup table backing the volcano selector, in option order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolcanoTable {
    #[serde(rename = "volcano", default)]
    volcanoes: Vec<Volcano>,
}

impl VolcanoTable {
    pub fn new(volcanoes: Vec<Volcano>) -> Self {
        Self { volcanoes }
    }

    /// Builds a table from the legacy positional encoding: four equal blocks
    /// of latitudes, longitudes, minimum plume heights and source areas.
    pub fn from_flat_values<I, S>(names: I, values: &[f64]) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if values.len() % 4 != 0 {
            return Err(FormError::RaggedVolcanoTable {
                values: values.len(),
            });
        }
        let count = values.len() / 4;
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != count {
            return Err(FormError::VolcanoNameCount {
                names: names.len(),
                records: count,
            });
        }

        let volcanoes = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Volcano {
                name,
                location: None,
                lat: values[i],
                lon: values[i + count],
                plume_min: values[i + 2 * count],
                area: values[i + 3 * count],
            })
            .collect();
        Ok(Self { volcanoes })
    }

    pub fn len(&self) -> usize {
        self.volcanoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volcanoes.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Volcano, FormError> {
        self.volcanoes
            .get(index)
            .ok_or(FormError::SelectionOutOfRange {
                index,
                len: self.volcanoes.len(),
            })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.volcanoes
            .iter()
            .position(|volcano| volcano.name.eq_ignore_ascii_case(name))
    }
}
