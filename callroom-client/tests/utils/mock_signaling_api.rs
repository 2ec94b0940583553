use async_trait::async_trait;
use callroom_client::{ApiEndpoint, ApiError, SignalingApi};
use callroom_core::SignalingMessage;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore, mpsc};

#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub endpoint: ApiEndpoint,
    pub message: SignalingMessage,
}

/// Mock SignalingApi that captures every outbound request.
#[derive(Clone)]
pub struct MockSignalingApi {
    /// Channel to send captured requests.
    tx: mpsc::UnboundedSender<SentRequest>,
    /// All captured requests (for verification).
    sent: Arc<Mutex<Vec<SentRequest>>>,
    /// Endpoints that answer with a server error.
    failing: Arc<Mutex<HashSet<ApiEndpoint>>>,
    /// Requests wait here before answering; see [`MockSignalingApi::held`].
    gate: Arc<Semaphore>,
}

impl MockSignalingApi {
    /// Create a new MockSignalingApi and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SentRequest>) {
        Self::with_gate(Semaphore::MAX_PERMITS)
    }

    /// Requests are recorded immediately but do not complete until
    /// [`release`](MockSignalingApi::release) is called.
    pub fn held() -> (Self, mpsc::UnboundedReceiver<SentRequest>) {
        Self::with_gate(0)
    }

    fn with_gate(permits: usize) -> (Self, mpsc::UnboundedReceiver<SentRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let api = Self {
            tx,
            sent: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            gate: Arc::new(Semaphore::new(permits)),
        };
        (api, rx)
    }

    pub fn release(&self, requests: usize) {
        self.gate.add_permits(requests);
    }

    pub async fn fail(&self, endpoint: ApiEndpoint) {
        self.failing.lock().await.insert(endpoint);
    }

    pub async fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_to(&self, endpoint: ApiEndpoint) -> Vec<SignalingMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .map(|r| r.message.clone())
            .collect()
    }
}

#[async_trait]
impl SignalingApi for MockSignalingApi {
    async fn post(
        &self,
        endpoint: ApiEndpoint,
        message: &SignalingMessage,
    ) -> Result<(), ApiError> {
        tracing::debug!("[MockSignalingApi] {}", endpoint);

        let request = SentRequest {
            endpoint,
            message: message.clone(),
        };
        self.sent.lock().await.push(request.clone());
        let _ = self.tx.send(request);

        let _permit = self.gate.acquire().await.expect("gate closed");

        if self.failing.lock().await.contains(&endpoint) {
            return Err(ApiError::Status {
                endpoint,
                status: 503,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api_captures_requests() {
        let (api, mut rx) = MockSignalingApi::new();
        let msg = SignalingMessage::new("lobby", "alice");

        api.post(ApiEndpoint::RoomEnter, &msg).await.unwrap();

        let sent = rx.recv().await.unwrap();
        assert_eq!(sent.endpoint, ApiEndpoint::RoomEnter);
        assert_eq!(api.sent_to(ApiEndpoint::RoomEnter).await, vec![msg]);
    }

    #[tokio::test]
    async fn test_mock_api_scripted_failure() {
        let (api, _rx) = MockSignalingApi::new();
        api.fail(ApiEndpoint::CallRoom).await;

        let err = api
            .post(ApiEndpoint::CallRoom, &SignalingMessage::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 503, .. }));
    }
}
