//! Error types for environment configuration

use thiserror::Error;

/// Configuration specific errors
///
/// Loading itself never fails; these are only produced by the strict
/// helpers (key lookup by name, port parsing) that callers opt into.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Key is not one of the reserved configuration fields
    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },

    /// Value present but not usable for the field
    #[error("Invalid configuration value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::UnknownKey {
            key: "colour".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown configuration key: colour");

        let err = ConfigError::InvalidValue {
            field: "PORT".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid configuration value for PORT: \"abc\"");
    }
}
