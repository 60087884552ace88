//! Error types for HAL document encoding

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HalError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported payload: expected an object-shaped value, got {0}")]
    UnsupportedPayload(&'static str),

    #[error("Cycle detected: resource '{0}' embeds itself")]
    CycleDetected(String),
}
