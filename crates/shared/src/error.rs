use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TieupLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A user-facing message produced by the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("tie-up location '{0}' is not supported")]
    UnsupportedTieupLocation(TieupLocation),
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
    #[error("Error reading file: {0}")]
    ReadError(String),
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("{action} is not available in {mode} mode")]
    ModeMismatch {
        action: &'static str,
        mode: &'static str,
    },
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<&DraftError> for Notice {
    fn from(value: &DraftError) -> Self {
        Self::new(Severity::Error, value.to_string())
    }
}
