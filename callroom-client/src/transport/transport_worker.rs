use crate::transport::{MediaTransport, SdpKind, TransportEvent};
use anyhow::Result;
use callroom_core::{CallEvent, CallIntent, Generation, Tagged};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// A transport intent together with the generation that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportCommand {
    pub generation: Generation,
    pub intent: CallIntent,
}

/// Sole owner of the media transport.
///
/// Commands run one at a time in arrival order. Their outcomes and the
/// transport's own callbacks go back to the dispatcher as [`Tagged`] events.
pub struct TransportWorker {
    transport: Box<dyn MediaTransport>,
    command_rx: mpsc::Receiver<TransportCommand>,
    event_rx: mpsc::Receiver<TransportEvent>,
    feedback_tx: mpsc::Sender<Tagged>,
}

impl TransportWorker {
    pub fn new(
        transport: Box<dyn MediaTransport>,
        command_rx: mpsc::Receiver<TransportCommand>,
        event_rx: mpsc::Receiver<TransportEvent>,
        feedback_tx: mpsc::Sender<Tagged>,
    ) -> Self {
        Self {
            transport,
            command_rx,
            event_rx,
            feedback_tx,
        }
    }

    pub async fn run(mut self) {
        info!("Transport worker started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down transport worker.");
                            break;
                        }
                    }
                }

                evt = self.event_rx.recv() => {
                    match evt {
                        Some(e) => self.feedback(e.into_tagged()).await,
                        None => {
                            warn!("Transport event channel closed unexpectedly");
                            break;
                        }
                    }
                }
            }
        }

        if let Err(e) = self.transport.close().await {
            warn!("Failed to close transport on shutdown: {:?}", e);
        }
        info!("Transport worker finished");
    }

    async fn handle_command(&mut self, cmd: TransportCommand) {
        let TransportCommand { generation, intent } = cmd;
        debug!(%generation, "Executing {:?}", intent);

        match intent {
            CallIntent::ResetTransport => {
                if let Err(e) = self.transport.reset(generation).await {
                    error!(%generation, "Failed to reset transport: {:?}", e);
                    self.negotiation_failed(generation, e).await;
                }
            }

            CallIntent::StartLocalMedia => {
                if let Err(e) = self.transport.start_local_media().await {
                    error!(%generation, "Failed to start local media: {:?}", e);
                }
            }

            CallIntent::CreateOffer => match self.offer().await {
                Ok(sdp) => {
                    self.feedback(Tagged::new(generation, CallEvent::LocalSdpOfferCreated(sdp)))
                        .await
                }
                Err(e) => self.negotiation_failed(generation, e).await,
            },

            CallIntent::ApplyRemoteAnswer(sdp) => {
                match self.transport.set_remote_description(&sdp, SdpKind::Answer).await {
                    Ok(()) => {
                        self.feedback(Tagged::new(generation, CallEvent::LocalSdpAnswerApplied))
                            .await
                    }
                    Err(e) => self.negotiation_failed(generation, e).await,
                }
            }

            CallIntent::ApplyRemoteOffer(sdp) => {
                if let Err(e) = self.answer(generation, &sdp).await {
                    self.negotiation_failed(generation, e).await;
                }
            }

            CallIntent::ApplyIceCandidate(ice) => {
                let Err(e) = self.transport.add_ice_candidate(ice).await else {
                    return;
                };
                warn!(%generation, "Failed to add ICE candidate: {:?}", e);
            }

            CallIntent::CloseTransport => {
                if let Err(e) = self.transport.close().await {
                    warn!(%generation, "Failed to close transport: {:?}", e);
                }
            }

            other => warn!("Transport worker cannot execute {:?}", other),
        }
    }

    async fn offer(&mut self) -> Result<String> {
        let sdp = self.transport.create_offer().await?;
        self.transport
            .set_local_description(&sdp, SdpKind::Offer)
            .await?;
        Ok(sdp)
    }

    /// Callee side: remote offer, then our answer. Each step is reported as
    /// soon as it completes so buffered ICE can flow early.
    async fn answer(&mut self, generation: Generation, offer: &str) -> Result<()> {
        self.transport
            .set_remote_description(offer, SdpKind::Offer)
            .await?;
        self.feedback(Tagged::new(generation, CallEvent::RemoteDescriptionApplied))
            .await;

        let sdp = self.transport.create_answer().await?;
        self.feedback(Tagged::new(
            generation,
            CallEvent::LocalSdpAnswerCreated(sdp.clone()),
        ))
        .await;

        self.transport
            .set_local_description(&sdp, SdpKind::Answer)
            .await?;
        self.feedback(Tagged::new(generation, CallEvent::LocalSdpAnswerApplied))
            .await;
        Ok(())
    }

    async fn negotiation_failed(&self, generation: Generation, e: anyhow::Error) {
        warn!(%generation, "Negotiation step failed: {:#}", e);
        self.feedback(Tagged::new(
            generation,
            CallEvent::NegotiationFailed(format!("{e:#}")),
        ))
        .await;
    }

    async fn feedback(&self, tagged: Tagged) {
        if self.feedback_tx.send(tagged).await.is_err() {
            debug!("Dispatcher is gone, dropping transport feedback");
        }
    }
}
