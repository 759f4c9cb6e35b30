//! Error types for panelkit

use thiserror::Error;

/// Result type alias for panelkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the calculator, QR and news surfaces
#[derive(Error, Debug)]
pub enum Error {
    /// User input was rejected; the message is meant to be shown as-is
    #[error("{0}")]
    Validation(String),

    /// Transport failure talking to an upstream API
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream API answered but reported a failure
    #[error("API error: {0}")]
    Api(String),

    /// Invalid or missing configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure (saving sketches or QR images)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this is a recoverable input problem the caller should re-prompt for.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_displayed_verbatim() {
        let err = Error::Validation("Please enter valid numbers!".into());
        assert_eq!(err.to_string(), "Please enter valid numbers!");
        assert!(err.is_validation());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_validation());
    }
}
