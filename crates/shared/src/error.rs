//! Error types for EMS

use thiserror::Error;

/// General EMS error type
#[derive(Debug, Error)]
pub enum EmsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EmsError>;
