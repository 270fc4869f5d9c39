//! Capabilities the hosting page lends to the controller for one call.
//!
//! In a browser these are the form element, the sibling frames and the
//! top-level window. Tests and the CLI use the recording host in
//! [`crate::memory`].

use shared::{domain::FieldName, error::FormError, protocol::WindowRequest};

pub trait FormHost {
    /// Current value of a named control, or `None` when the form has no such
    /// control.
    fn value(&self, field: FieldName) -> Option<String>;

    fn set_value(&mut self, field: FieldName, value: &str) -> Result<(), FormError>;

    /// Index of the selected volcano option. `None` mirrors the DOM's `-1`.
    fn selected_index(&self) -> Option<usize>;

    fn set_selected_index(&mut self, index: usize);
}

pub trait Frame {
    /// Assigns the frame's location. The host performs the navigation.
    fn navigate(&mut self, target: &str);

    /// Reads a control from a form inside the frame's current document.
    fn form_value(&self, form_name: &str, field: FieldName) -> Option<String>;
}

pub trait Window {
    fn open(&mut self, request: &WindowRequest);

    /// Blocking, user-facing message box.
    fn alert(&mut self, message: &str);
}

pub(crate) fn required_value<F: FormHost + ?Sized>(
    form: &F,
    field: FieldName,
) -> Result<String, FormError> {
    form.value(field).ok_or(FormError::MissingField { field })
}
