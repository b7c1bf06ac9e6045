//! Error types for parlance.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParlanceError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Wire protocol errors
    #[error("Malformed audio frame: {message}")]
    Frame { message: String },

    // External engine errors
    #[error("Transcription error: {message}")]
    Transcription { message: String },

    #[error("Generation error: {message}")]
    Generation { message: String },

    #[error("Synthesis error: {message}")]
    Synthesis { message: String },

    // Connection-level errors
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ParlanceError>;
