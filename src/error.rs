//! Error types for repository lookup and card export

use thiserror::Error;

/// Result type alias for repocard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, fetching or exporting a card
#[derive(Error, Debug)]
pub enum Error {
    /// The repository reference string matched none of the accepted forms
    #[error("Invalid repository reference: {0}")]
    FormatError(String),

    /// A required input field was missing
    #[error("Missing input: {0}")]
    ValidationError(String),

    /// The provider answered with a failure status, or the request never got a response
    #[error("{0}")]
    LookupError(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// The card could not be turned into an image
    #[error("Export failed: {0}")]
    ExportError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error while writing an export
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The human-readable message carried by the error, without the category prefix.
    pub fn message(&self) -> String {
        match self {
            Error::FormatError(m)
            | Error::ValidationError(m)
            | Error::LookupError(m)
            | Error::ExportError(m)
            | Error::ConfigError(m) => m.clone(),
            Error::Timeout(ms) => format!("timed out after {}ms", ms),
            Error::Io(e) => e.to_string(),
        }
    }

    /// Errors caused by user input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::FormatError(_) | Error::ValidationError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_displays_provider_message_verbatim() {
        let e = Error::LookupError("Not Found".into());
        assert_eq!(e.to_string(), "Not Found");
        assert_eq!(e.message(), "Not Found");
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(Error::FormatError("x".into()).is_input_error());
        assert!(Error::ValidationError("x".into()).is_input_error());
        assert!(!Error::ExportError("x".into()).is_input_error());
    }
}
