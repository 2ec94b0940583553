use crate::transport::{MediaTransport, SdpKind, TransportConfig, TransportEvent};
use anyhow::{Context, Result};
use async_trait::async_trait;
use callroom_core::{ConnectivityKind, Generation, IceCandidate};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_connection_state::RTCIceConnectionState;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;

/// [`MediaTransport`] backed by a `webrtc` peer connection.
///
/// Each [`reset`](MediaTransport::reset) builds a new `RTCPeerConnection`
/// whose callbacks report into `event_tx` under that reset's generation.
pub struct WebRtcTransport {
    config: TransportConfig,
    event_tx: mpsc::Sender<TransportEvent>,
    peer_connection: Option<Arc<RTCPeerConnection>>,
}

impl WebRtcTransport {
    pub fn new(config: TransportConfig) -> (Self, mpsc::Receiver<TransportEvent>) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let transport = Self {
            config,
            event_tx,
            peer_connection: None,
        };
        (transport, event_rx)
    }

    fn connection(&self) -> Result<&Arc<RTCPeerConnection>> {
        self.peer_connection
            .as_ref()
            .context("peer connection has not been created")
    }

    async fn build(&self, generation: Generation) -> Result<Arc<RTCPeerConnection>> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if self.config.ice_servers.is_empty() {
            vec![]
        } else {
            vec![RTCIceServer {
                urls: self.config.ice_servers.clone(),
                ..Default::default()
            }]
        };
        let rtc_config = RTCConfiguration {
            ice_servers,
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = self.event_tx.clone();
        peer_connection.on_ice_connection_state_change(Box::new(
            move |s: RTCIceConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!(%generation, "ICE connection state changed: {:?}", s);
                    let Some(kind) = connectivity_kind(s) else {
                        return;
                    };
                    let _ = tx
                        .send(TransportEvent::ConnectivityChanged(generation, kind))
                        .await;
                })
            },
        ));

        let ice_tx = self.event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let init = match candidate.to_json() {
                    Ok(init) => init,
                    Err(e) => {
                        warn!("Failed to serialize local ICE candidate: {:?}", e);
                        return;
                    }
                };
                let _ = tx
                    .send(TransportEvent::CandidateGenerated(
                        generation,
                        from_candidate_init(init),
                    ))
                    .await;
            })
        }));

        Ok(peer_connection)
    }
}

#[async_trait]
impl MediaTransport for WebRtcTransport {
    async fn reset(&mut self, generation: Generation) -> Result<()> {
        if let Some(old) = self.peer_connection.take() {
            debug!("Closing previous peer connection");
            old.close().await?;
        }
        let peer_connection = self
            .build(generation)
            .await
            .context("Failed to create peer connection")?;
        self.peer_connection = Some(peer_connection);
        Ok(())
    }

    async fn start_local_media(&mut self) -> Result<()> {
        let pc = self.connection()?;
        pc.add_transceiver_from_kind(RTPCodecType::Audio, None)
            .await?;
        pc.add_transceiver_from_kind(RTPCodecType::Video, None)
            .await?;
        Ok(())
    }

    async fn create_offer(&mut self) -> Result<String> {
        let offer = self.connection()?.create_offer(None).await?;
        Ok(offer.sdp)
    }

    async fn create_answer(&mut self) -> Result<String> {
        let answer = self.connection()?.create_answer(None).await?;
        Ok(answer.sdp)
    }

    async fn set_local_description(&mut self, sdp: &str, kind: SdpKind) -> Result<()> {
        let desc = session_description(sdp, kind)?;
        self.connection()?.set_local_description(desc).await?;
        Ok(())
    }

    async fn set_remote_description(&mut self, sdp: &str, kind: SdpKind) -> Result<()> {
        let desc = session_description(sdp, kind)?;
        self.connection()?.set_remote_description(desc).await?;
        Ok(())
    }

    async fn add_ice_candidate(&mut self, ice: IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: ice.candidate,
            sdp_mid: Some(ice.sdp_mid),
            sdp_mline_index: u16::try_from(ice.sdp_m_line_index).ok(),
            ..Default::default()
        };
        self.connection()?.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(pc) = self.peer_connection.take() {
            pc.close().await?;
        }
        Ok(())
    }
}

fn session_description(sdp: &str, kind: SdpKind) -> Result<RTCSessionDescription> {
    let desc = match kind {
        SdpKind::Offer => RTCSessionDescription::offer(sdp.to_owned())?,
        SdpKind::Answer => RTCSessionDescription::answer(sdp.to_owned())?,
    };
    Ok(desc)
}

fn connectivity_kind(state: RTCIceConnectionState) -> Option<ConnectivityKind> {
    match state {
        RTCIceConnectionState::Checking => Some(ConnectivityKind::Checking),
        RTCIceConnectionState::Connected => Some(ConnectivityKind::Connected),
        RTCIceConnectionState::Completed => Some(ConnectivityKind::Completed),
        RTCIceConnectionState::Failed => Some(ConnectivityKind::Failed),
        RTCIceConnectionState::Disconnected => Some(ConnectivityKind::Disconnected),
        RTCIceConnectionState::Closed => Some(ConnectivityKind::Closed),
        _ => None,
    }
}

fn from_candidate_init(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_m_line_index: init.sdp_mline_index.map(i32::from).unwrap_or_default(),
        sdp_mid: init.sdp_mid.unwrap_or_default(),
    }
}
