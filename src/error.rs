//! Error types for the trellis view
//!
//! Validation errors stay local to the command that produced them: they are
//! reported to the page and never cross the asynchronous result boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    /// Bad input from a dialog or a selection gesture.
    #[error("{0}")]
    UserInput(String),

    /// A required field is absent from a persisted view record.
    #[error("Missing field '{0}' in serialized view")]
    MissingField(&'static str),

    /// A field is present but cannot describe a valid view.
    #[error("Invalid field '{field}' in serialized view: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ViewError>;

impl ViewError {
    pub fn user_input(msg: impl Into<String>) -> Self {
        Self::UserInput(msg.into())
    }

    /// Message suitable for the page error banner.
    pub fn user_message(&self) -> String {
        match self {
            ViewError::UserInput(msg) => msg.clone(),
            ViewError::MissingField(field) => format!("Cannot restore view: {} is missing", field),
            ViewError::InvalidField { field, reason } => {
                format!("Cannot restore view: {} {}", field, reason)
            }
            ViewError::Json(e) => format!("Cannot read view: {}", e),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewError::UserInput(_) => "Invalid Input",
            ViewError::MissingField(_) | ViewError::InvalidField { .. } => "Reconstruction Error",
            ViewError::Json(_) => "JSON Error",
        }
    }

    pub fn is_user_input(&self) -> bool {
        matches!(self, ViewError::UserInput(_))
    }
}
