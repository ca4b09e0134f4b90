//! Error types for the clawbridge domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Prompt assembly itself
//! is total and never fails; these errors belong to the callers around it
//! (request parsing, configuration).

use thiserror::Error;

/// The top-level error type for all clawbridge operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be used at all, e.g. no entry survived the
    /// boundary parse.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_displays_reason() {
        let err = Error::InvalidRequest("no valid messages".into());
        assert!(err.to_string().contains("no valid messages"));
    }

    #[test]
    fn serde_errors_convert() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
