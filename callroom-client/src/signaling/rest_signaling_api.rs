use crate::config::ApiConfig;
use crate::signaling::{ApiEndpoint, ApiError, SignalingApi};
use async_trait::async_trait;
use callroom_core::SignalingMessage;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// [`SignalingApi`] over HTTP: every endpoint is a JSON `POST`.
#[derive(Clone)]
pub struct RestSignalingApi {
    client: Client,
    config: ApiConfig,
}

impl RestSignalingApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl SignalingApi for RestSignalingApi {
    async fn post(
        &self,
        endpoint: ApiEndpoint,
        message: &SignalingMessage,
    ) -> Result<(), ApiError> {
        let url = self.config.url(endpoint);
        let body = serde_json::to_vec(message)?;
        debug!("POST {} ({})", url, endpoint);

        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
