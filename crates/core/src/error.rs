//! Error types for PlaceMap core

use thiserror::Error;

/// Main error type for PlaceMap core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("a search is already in progress")]
    SearchInProgress,
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for PlaceMap core operations
pub type Result<T> = std::result::Result<T, Error>;
