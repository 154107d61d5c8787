//! Error types for the prototype layout boundary
//!
//! The layout core is infallible once a prototype has been validated; these
//! errors only surface while decoding input or loading configuration.

use thiserror::Error;

/// Errors raised while accepting a prototype from outside the crate
#[derive(Debug, Clone, Error)]
pub enum PrototypeError {
    #[error("Failed to decode prototype: {0}")]
    Decode(String),

    #[error("Unknown parameter style code: {0}")]
    UnknownParameterStyle(u8),

    #[error("Section {section}: span {start}..{end} is outside the token stream ({len} tokens)")]
    SpanOutOfRange {
        section: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Section {section}: {message}")]
    MalformedSection { section: usize, message: String },

    #[error("Failed to encode layout: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading a [`LayoutConfig`](crate::config::LayoutConfig)
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid JSON configuration: {0}")]
    Json(String),

    #[error("Invalid YAML configuration: {0}")]
    Yaml(String),

    #[error("Invalid configuration object: {0}")]
    Object(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for PrototypeError {
    fn from(err: serde_json::Error) -> Self {
        PrototypeError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PrototypeError>;
