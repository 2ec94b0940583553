use crate::signaling::ApiEndpoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} answered {status}")]
    Status { endpoint: ApiEndpoint, status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
