use crate::signaling::{ApiEndpoint, ApiError};
use async_trait::async_trait;
use callroom_core::SignalingMessage;

/// Request side of the relay. Each call reports success or failure only.
#[async_trait]
pub trait SignalingApi: Send + Sync {
    async fn post(&self, endpoint: ApiEndpoint, message: &SignalingMessage)
    -> Result<(), ApiError>;
}
