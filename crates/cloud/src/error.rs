//! Error types for the search and geocoding clients.

use thiserror::Error;

/// Why a single address could not be resolved.
///
/// The pipeline never surfaces these to the user; the affected place is kept
/// with null coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("geocoder not ready")]
    Unavailable,

    #[error("geocode failed: {status}")]
    Failed { status: String },

    #[error("geocode timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("geocode request failed: {0}")]
    Transport(String),
}

/// Errors produced by the PlaceMap network clients.
#[derive(Error, Debug)]
pub enum CloudError {
    /// Non-2xx response (the body, verbatim) or transport failure.
    #[error("{0}")]
    SearchRequestFailed(String),

    #[error("search timed out after {0:?}")]
    SearchTimeout(std::time::Duration),

    #[error("network error: {0}")]
    Network(String),
}

/// Result alias for cloud operations.
pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cycle_errors_render_their_cause() {
        let cases = [
            (CloudError::SearchRequestFailed("db down".into()), "db down"),
            (
                CloudError::SearchTimeout(Duration::from_secs(30)),
                "search timed out after 30s",
            ),
            (CloudError::Network("no route".into()), "network error: no route"),
        ];
        for (err, expected) in cases {
            // Every variant is one a search cycle can actually abort with.
            match &err {
                CloudError::SearchRequestFailed(_)
                | CloudError::SearchTimeout(_)
                | CloudError::Network(_) => {}
            }
            assert_eq!(err.to_string(), expected);
        }
    }
}
