//! Error types for settings resolution

use thiserror::Error;

/// Settings error
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required argument to the resolver was absent
    #[error("invalid argument: {0} is required")]
    InvalidArgument(&'static str),

    /// I/O error while reading a file-backed source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
