//! Navigation targets and popup requests the form controller hands to the host.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server scripts and static assets reached by navigation. Paths are relative
/// to the page that hosts the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub run_params_script: String,
    pub ashxp_options_script: String,
    pub map_options_script: String,
    pub placeholder_image: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            run_params_script: "runParams.pl".into(),
            ashxp_options_script: "ashxpOptions.pl".into(),
            map_options_script: "mapOptions.pl".into(),
            placeholder_image: "pix/puff_bg.gif".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    RunParams {
        previous: &'a str,
        session_id: &'a str,
    },
    AshxpOptions {
        previous: &'a str,
        session_id: &'a str,
    },
    MapOptions,
    Placeholder,
}

impl Endpoint<'_> {
    /// Query values are concatenated verbatim, without percent-encoding.
    pub fn target(&self, paths: &EndpointPaths) -> String {
        match self {
            Endpoint::RunParams {
                previous,
                session_id,
            } => session_query(&paths.run_params_script, previous, session_id),
            Endpoint::AshxpOptions {
                previous,
                session_id,
            } => session_query(&paths.ashxp_options_script, previous, session_id),
            Endpoint::MapOptions => paths.map_options_script.clone(),
            Endpoint::Placeholder => paths.placeholder_image.clone(),
        }
    }
}

fn session_query(script: &str, previous: &str, session_id: &str) -> String {
    format!("{script}?previous={previous}&sessionID={session_id}")
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowFeaturesError {
    #[error("window feature {key} expects yes/no, got {value:?}")]
    Flag { key: String, value: String },
    #[error("window feature {key} expects a pixel size, got {value:?}")]
    Size { key: String, value: String },
}

/// Popup configuration in the `window.open` feature-string dialect.
///
/// The default is the help popup: no toolbar, 500x200, scrollable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowFeatures {
    pub toolbar: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scrollbars: bool,
}

impl WindowFeatures {
    /// All features off, which is what an empty feature string means.
    pub fn bare() -> Self {
        Self {
            toolbar: false,
            width: None,
            height: None,
            scrollbars: false,
        }
    }
}

impl Default for WindowFeatures {
    fn default() -> Self {
        Self {
            toolbar: false,
            width: Some(500),
            height: Some(200),
            scrollbars: true,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for WindowFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toolbar={}", yes_no(self.toolbar))?;
        if let Some(width) = self.width {
            write!(f, ",width={width}")?;
        }
        if let Some(height) = self.height {
            write!(f, ",height={height}")?;
        }
        write!(f, ",scrollbars={}", yes_no(self.scrollbars))
    }
}

impl FromStr for WindowFeatures {
    type Err = WindowFeaturesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut features = WindowFeatures::bare();
        for item in s.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            let (key, value) = item.split_once('=').unwrap_or((item, "yes"));
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();
            match key.as_str() {
                "toolbar" => features.toolbar = parse_flag(&key, value)?,
                "scrollbars" => features.scrollbars = parse_flag(&key, value)?,
                "width" => features.width = Some(parse_size(&key, value)?),
                "height" => features.height = Some(parse_size(&key, value)?),
                _ => {}
            }
        }
        Ok(features)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, WindowFeaturesError> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "1" | "true" => Ok(true),
        "no" | "0" | "false" => Ok(false),
        _ => Err(WindowFeaturesError::Flag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_size(key: &str, value: &str) -> Result<u32, WindowFeaturesError> {
    value.parse::<u32>().map_err(|_| WindowFeaturesError::Size {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<WindowFeatures>,
}

impl WindowRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            features: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_features(mut self, features: WindowFeatures) -> Self {
        self.features = Some(features);
        self
    }

    /// The feature string passed as the third `window.open` argument.
    pub fn feature_string(&self) -> Option<String> {
        self.features.map(|features| features.to_string())
    }
}
