//! Error types for the PTTLink bridge core

use thiserror::Error;

/// Result type alias for bridge core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the bridge core
#[derive(Debug, Error)]
pub enum Error {
    /// Payload could not be parsed or serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport direction was neither `send` nor `recv`
    #[error("Invalid transport direction: {0}")]
    InvalidDirection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDirection("both".to_string());
        assert_eq!(err.to_string(), "Invalid transport direction: both");
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::from(serde_err);
        assert!(matches!(err, Error::Serialization(_)));
    }
}
