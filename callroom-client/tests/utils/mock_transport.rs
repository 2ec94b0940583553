use anyhow::{Result, bail};
use async_trait::async_trait;
use callroom_client::{MediaTransport, SdpKind, TransportEvent};
use callroom_core::{ConnectivityKind, Generation, IceCandidate};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub const MOCK_OFFER: &str = "v=0\r\no=mock 1 1 IN IP4 127.0.0.1\r\ns=offer\r\n";
pub const MOCK_ANSWER: &str = "v=0\r\no=mock 2 2 IN IP4 127.0.0.1\r\ns=answer\r\n";

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Reset(Generation),
    StartLocalMedia,
    CreateOffer,
    CreateAnswer,
    SetLocal(SdpKind, String),
    SetRemote(SdpKind, String),
    AddIce(IceCandidate),
    Close,
}

/// Steps the mock can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    CreateOffer,
    CreateAnswer,
    SetRemote,
}

/// MediaTransport that records every call and lets tests inject callbacks.
#[derive(Clone)]
pub struct MockTransport {
    /// Channel to send captured calls.
    calls_tx: mpsc::UnboundedSender<TransportCall>,
    /// All captured calls (for verification).
    calls: Arc<Mutex<Vec<TransportCall>>>,
    failures: Arc<Mutex<Vec<FailPoint>>>,
    generation: Arc<Mutex<Generation>>,
    event_tx: mpsc::Sender<TransportEvent>,
}

impl MockTransport {
    pub fn new() -> (
        Self,
        mpsc::Receiver<TransportEvent>,
        mpsc::UnboundedReceiver<TransportCall>,
    ) {
        let (calls_tx, calls_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(64);
        let transport = Self {
            calls_tx,
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
            generation: Arc::new(Mutex::new(Generation::default())),
            event_tx,
        };
        (transport, event_rx, calls_rx)
    }

    pub async fn fail_at(&self, point: FailPoint) {
        self.failures.lock().await.push(point);
    }

    pub async fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().await.clone()
    }

    /// Reports a connectivity change for the connection built by the last reset.
    pub async fn emit_connectivity(&self, kind: ConnectivityKind) {
        let generation = *self.generation.lock().await;
        self.emit_connectivity_at(generation, kind).await;
    }

    pub async fn emit_connectivity_at(&self, generation: Generation, kind: ConnectivityKind) {
        self.event_tx
            .send(TransportEvent::ConnectivityChanged(generation, kind))
            .await
            .expect("transport worker is gone");
    }

    pub async fn emit_candidate(&self, ice: IceCandidate) {
        let generation = *self.generation.lock().await;
        self.event_tx
            .send(TransportEvent::CandidateGenerated(generation, ice))
            .await
            .expect("transport worker is gone");
    }

    async fn record(&self, call: TransportCall) {
        tracing::debug!("[MockTransport] {:?}", call);
        self.calls.lock().await.push(call.clone());
        let _ = self.calls_tx.send(call);
    }

    async fn should_fail(&self, point: FailPoint) -> bool {
        let mut failures = self.failures.lock().await;
        match failures.iter().position(|p| *p == point) {
            Some(i) => {
                failures.remove(i);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl MediaTransport for MockTransport {
    async fn reset(&mut self, generation: Generation) -> Result<()> {
        *self.generation.lock().await = generation;
        self.record(TransportCall::Reset(generation)).await;
        Ok(())
    }

    async fn start_local_media(&mut self) -> Result<()> {
        self.record(TransportCall::StartLocalMedia).await;
        Ok(())
    }

    async fn create_offer(&mut self) -> Result<String> {
        self.record(TransportCall::CreateOffer).await;
        if self.should_fail(FailPoint::CreateOffer).await {
            bail!("scripted create_offer failure");
        }
        Ok(MOCK_OFFER.to_owned())
    }

    async fn create_answer(&mut self) -> Result<String> {
        self.record(TransportCall::CreateAnswer).await;
        if self.should_fail(FailPoint::CreateAnswer).await {
            bail!("scripted create_answer failure");
        }
        Ok(MOCK_ANSWER.to_owned())
    }

    async fn set_local_description(&mut self, sdp: &str, kind: SdpKind) -> Result<()> {
        self.record(TransportCall::SetLocal(kind, sdp.to_owned()))
            .await;
        Ok(())
    }

    async fn set_remote_description(&mut self, sdp: &str, kind: SdpKind) -> Result<()> {
        self.record(TransportCall::SetRemote(kind, sdp.to_owned()))
            .await;
        if self.should_fail(FailPoint::SetRemote).await {
            bail!("scripted set_remote_description failure");
        }
        Ok(())
    }

    async fn add_ice_candidate(&mut self, ice: IceCandidate) -> Result<()> {
        self.record(TransportCall::AddIce(ice)).await;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.record(TransportCall::Close).await;
        Ok(())
    }
}
