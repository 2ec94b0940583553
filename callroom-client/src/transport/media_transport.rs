use anyhow::Result;
use async_trait::async_trait;
use callroom_core::{Generation, IceCandidate};
use std::fmt;

/// Which half of the offer/answer exchange a description is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdpKind {
    Offer,
    Answer,
}

impl fmt::Display for SdpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpKind::Offer => f.write_str("offer"),
            SdpKind::Answer => f.write_str("answer"),
        }
    }
}

/// The peer-connection engine, driven by exactly one [`TransportWorker`].
///
/// Connectivity and local ICE callbacks are not returned from these calls;
/// implementations push them as [`TransportEvent`]s stamped with the
/// generation passed to the last [`reset`](MediaTransport::reset).
///
/// [`TransportWorker`]: crate::TransportWorker
/// [`TransportEvent`]: crate::TransportEvent
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Drops the current connection, if any, and builds a fresh one.
    async fn reset(&mut self, generation: Generation) -> Result<()>;

    /// Attaches local audio and video.
    async fn start_local_media(&mut self) -> Result<()>;

    async fn create_offer(&mut self) -> Result<String>;

    async fn create_answer(&mut self) -> Result<String>;

    async fn set_local_description(&mut self, sdp: &str, kind: SdpKind) -> Result<()>;

    async fn set_remote_description(&mut self, sdp: &str, kind: SdpKind) -> Result<()>;

    async fn add_ice_candidate(&mut self, ice: IceCandidate) -> Result<()>;

    async fn close(&mut self) -> Result<()>;
}
