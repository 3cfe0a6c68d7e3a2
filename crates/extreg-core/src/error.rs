//! Error types for extreg-core

use thiserror::Error;

/// Result type alias using extreg-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for extreg
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry file could not be read or parsed
    #[error("Failed to read/parse registry {path}: {message}")]
    RegistryRead { path: String, message: String },

    /// Registry parsed but lists no extensions
    #[error("Registry contains no extensions: {path}")]
    EmptyRegistry { path: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a registry read error
    pub fn registry_read(path: impl Into<String>, message: impl ToString) -> Self {
        Self::RegistryRead {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create an empty registry error
    pub fn empty_registry(path: impl Into<String>) -> Self {
        Self::EmptyRegistry { path: path.into() }
    }
}
