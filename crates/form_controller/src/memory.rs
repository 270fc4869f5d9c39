//! Recording host used by the CLI and tests in place of a browser.

use std::collections::BTreeMap;

use serde::Serialize;
use shared::{domain::FieldName, error::FormError, protocol::WindowRequest};
use tracing::debug;
use url::Url;

use crate::host::{FormHost, Frame, Window};

/// Controls present on the run parameters form.
pub const RUN_PARAMS_FIELDS: [FieldName; 11] = [
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
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InMemoryForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_index: Option<usize>,
    fields: BTreeMap<FieldName, String>,
}

impl InMemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form carrying the given controls, all empty.
    pub fn with_fields(fields: impl IntoIterator<Item = FieldName>) -> Self {
        Self {
            selected_index: None,
            fields: fields.into_iter().map(|field| (field, String::new())).collect(),
        }
    }

    pub fn run_params() -> Self {
        Self::with_fields(RUN_PARAMS_FIELDS)
    }

    pub fn with_value(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = Some(index);
        self
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

impl FormHost for InMemoryForm {
    fn value(&self, field: FieldName) -> Option<String> {
        self.fields.get(&field).cloned()
    }

    fn set_value(&mut self, field: FieldName, value: &str) -> Result<(), FormError> {
        let slot = self
            .fields
            .get_mut(&field)
            .ok_or(FormError::MissingField { field })?;
        value.clone_into(slot);
        Ok(())
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected_index = Some(index);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub target: String,
    /// Target resolved against the frame's document URL, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingFrame {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_url: Option<Url>,
    #[serde(skip)]
    forms: BTreeMap<String, BTreeMap<FieldName, String>>,
    navigations: Vec<Navigation>,
}

impl RecordingFrame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_document_url(mut self, url: &str) -> Result<Self, url::ParseError> {
        self.document_url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Seeds a control of a form in the frame's current document.
    pub fn with_form_value(
        mut self,
        form_name: impl Into<String>,
        field: FieldName,
        value: impl Into<String>,
    ) -> Self {
        self.forms
            .entry(form_name.into())
            .or_default()
            .insert(field, value.into());
        self
    }

    /// The most recent navigation target.
    pub fn location(&self) -> Option<&str> {
        self.navigations.last().map(|nav| nav.target.as_str())
    }

    pub fn navigations(&self) -> &[Navigation] {
        &self.navigations
    }

    pub fn take_navigations(&mut self) -> Vec<Navigation> {
        std::mem::take(&mut self.navigations)
    }
}

impl Frame for RecordingFrame {
    fn navigate(&mut self, target: &str) {
        let resolved = self
            .document_url
            .as_ref()
            .and_then(|base| base.join(target).ok());
        debug!(frame = %self.name, to = target, "frame navigation");
        if let Some(url) = &resolved {
            self.document_url = Some(url.clone());
        }
        // The old document and its forms are gone once the frame navigates.
        self.forms.clear();
        self.navigations.push(Navigation {
            target: target.to_string(),
            resolved: resolved.map(String::from),
        });
    }

    fn form_value(&self, form_name: &str, field: FieldName) -> Option<String> {
        self.forms.get(form_name)?.get(&field).cloned()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingWindow {
    opened: Vec<WindowRequest>,
    alerts: Vec<String>,
}

impl RecordingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> &[WindowRequest] {
        &self.opened
    }

    pub fn take_opened_windows(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.opened)
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

impl Window for RecordingWindow {
    fn open(&mut self, request: &WindowRequest) {
        debug!(url = %request.url, name = ?request.name, "window.open");
        self.opened.push(request.clone());
    }

    fn alert(&mut self, message: &str) {
        debug!(text = message, "alert");
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
