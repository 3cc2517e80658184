//! Error types for schema resolution

use thiserror::Error;

use crate::family::ValidatorFamily;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema resolution errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid validator: '{0}' is not a known validator family")]
    InvalidValidator(String),

    #[error("Unsupported validator: {family} cannot resolve schemas")]
    UnsupportedValidator { family: ValidatorFamily },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Missing schema option: {name}")]
    MissingOption { name: String },

    #[error("Invalid fixture {path}: {reason}")]
    InvalidFixture { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
