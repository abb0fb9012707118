//! Error types for Heartfall

use thiserror::Error;

/// The main error type for Heartfall operations
#[derive(Debug, Error)]
pub enum HeartfallError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Heartfall operations
pub type Result<T> = std::result::Result<T, HeartfallError>;

impl From<toml::de::Error> for HeartfallError {
    fn from(err: toml::de::Error) -> Self {
        HeartfallError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for HeartfallError {
    fn from(err: toml::ser::Error) -> Self {
        HeartfallError::TomlSerError(err.to_string())
    }
}
