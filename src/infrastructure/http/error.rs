use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream responded with {status}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected upstream payload: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::Status { status, .. } => AppError::upstream(
                "Upstream service returned an error",
                json!({ "status": status.as_u16() }),
            ),
            GatewayError::Transport(e) if e.is_timeout() => {
                AppError::upstream("Upstream service timed out", json!({}))
            }
            _ => AppError::upstream(
                "Upstream service unavailable",
                json!({ "reason": err.to_string() }),
            ),
        }
    }
}
