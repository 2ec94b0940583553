use crate::config::ChannelConfig;
use crate::room::CallHandle;
use anyhow::{Context, Result};
use callroom_core::SessionId;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderName, HeaderValue, SEC_WEBSOCKET_PROTOCOL};
use tracing::{debug, info, warn};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

enum Ending {
    /// The relay closed the socket; reconnect.
    Closed,
    /// The call room is gone; stop for good.
    RoomGone,
}

/// Inbound half of the relay: a websocket whose text frames are signaling
/// messages for this room.
///
/// Reconnects with exponential backoff until the call room shuts down.
/// Whether the socket is currently up is published on [`connectivity`].
///
/// [`connectivity`]: SignalingChannel::connectivity
pub struct SignalingChannel {
    config: ChannelConfig,
    session_id: SessionId,
    connected_tx: watch::Sender<bool>,
}

impl SignalingChannel {
    pub fn new(config: ChannelConfig) -> Self {
        let (connected_tx, _) = watch::channel(false);
        Self {
            config,
            session_id: SessionId::new(),
            connected_tx,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn connectivity(&self) -> watch::Receiver<bool> {
        self.connected_tx.subscribe()
    }

    pub fn spawn(self, handle: CallHandle) -> JoinHandle<()> {
        tokio::spawn(self.run(handle))
    }

    pub async fn run(self, handle: CallHandle) {
        info!(session = %self.session_id, "Signaling channel started: {}", self.config.url);
        let mut attempts = 0u32;

        loop {
            let outcome = self.run_once(&handle).await;
            self.connected_tx.send_replace(false);

            match outcome {
                Ok(Ending::RoomGone) => break,
                Ok(Ending::Closed) => {
                    attempts = 0;
                    info!("Relay closed the signaling channel, reconnecting");
                    sleep(Duration::from_secs(1)).await;
                }
                Err(e) => {
                    attempts = attempts.saturating_add(1);
                    let delay = Duration::from_secs(2u64.saturating_pow(attempts)).min(MAX_BACKOFF);
                    warn!(
                        "Signaling channel down ({:#}), reconnecting in {:?} (attempt {})",
                        e, delay, attempts
                    );
                    sleep(delay).await;
                }
            }

            if handle.is_closed() {
                break;
            }
        }

        info!("Signaling channel finished");
    }

    async fn run_once(&self, handle: &CallHandle) -> Result<Ending> {
        let mut request = self
            .config
            .url
            .as_str()
            .into_client_request()
            .context("Invalid signaling channel url")?;

        let headers = request.headers_mut();
        headers.insert(
            HeaderName::from_bytes(self.config.session_header.as_bytes())?,
            HeaderValue::from_str(&self.session_id.to_string())?,
        );
        headers.insert(
            SEC_WEBSOCKET_PROTOCOL,
            HeaderValue::from_str(&self.config.protocol)?,
        );

        let (mut ws, _) = connect_async(request)
            .await
            .context("Failed to connect signaling channel")?;
        self.connected_tx.send_replace(true);
        info!("Signaling channel connected");

        while let Some(msg) = ws.next().await {
            let text = match msg? {
                Message::Text(t) => t.as_str().to_owned(),
                Message::Close(frame) => {
                    debug!("Close frame: {:?}", frame);
                    return Ok(Ending::Closed);
                }
                _ => continue,
            };

            if handle.deliver(text).await.is_err() {
                return Ok(Ending::RoomGone);
            }
        }

        Ok(Ending::Closed)
    }
}
