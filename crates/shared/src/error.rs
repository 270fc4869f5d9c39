use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FieldName;

pub const BAD_ERUPTION_DATE_MESSAGE: &str =
    "Bad eruption date specification; use YYYY MM DD HH:MM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    OutOfRange,
    MissingField,
    VolcanoList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("no volcano is selected")]
    NoSelection,
    #[error("volcano selection {index} is out of range for {len} entries")]
    SelectionOutOfRange { index: usize, len: usize },
    #[error("volcano selector has no entries to mark as unknown")]
    NoUnknownEntry,
    #[error("Bad eruption date specification; use YYYY MM DD HH:MM")]
    BadEruptionDate { value: String },
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: FieldName, value: String },
    #[error("form field {field} is missing")]
    MissingField { field: FieldName },
    #[error("flat volcano table has {values} values, which is not a multiple of 4")]
    RaggedVolcanoTable { values: usize },
    #[error("volcano table has {names} names for {records} records")]
    VolcanoNameCount { names: usize, records: usize },
    #[error("volcano list line {line}: {reason}")]
    VolcanoList { line: usize, reason: String },
}

impl FormError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::NoSelection | FormError::SelectionOutOfRange { .. } => ErrorCode::OutOfRange,
            FormError::NoUnknownEntry => ErrorCode::OutOfRange,
            FormError::BadEruptionDate { .. } | FormError::InvalidNumber { .. } => {
                ErrorCode::Validation
            }
            FormError::MissingField { .. } => ErrorCode::MissingField,
            FormError::RaggedVolcanoTable { .. }
            | FormError::VolcanoNameCount { .. }
            | FormError::VolcanoList { .. } => ErrorCode::VolcanoList,
        }
    }
}

impl From<FormError> for ErrorReport {
    fn from(value: FormError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
