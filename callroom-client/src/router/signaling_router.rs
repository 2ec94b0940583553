use crate::router::InFlight;
use crate::signaling::{ApiEndpoint, SignalingApi};
use crate::transport::TransportCommand;
use callroom_core::{
    CallEvent, CallIntent, Generation, MessageError, RoomEvent, SignalKind, SignalingMessage,
    Tagged,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Bridges the outside world and the call session.
///
/// Inbound: relay text frames become [`CallEvent`]s. Outbound: intents become
/// relay requests or transport commands, and their outcomes come back as
/// tagged events on the feedback channel.
pub struct SignalingRouter {
    room: String,
    username: String,
    api: Arc<dyn SignalingApi>,
    transport_tx: mpsc::Sender<TransportCommand>,
    feedback_tx: mpsc::Sender<Tagged>,
    in_flight: InFlight,
}

impl SignalingRouter {
    pub fn new(
        room: impl Into<String>,
        username: impl Into<String>,
        api: Arc<dyn SignalingApi>,
        transport_tx: mpsc::Sender<TransportCommand>,
        feedback_tx: mpsc::Sender<Tagged>,
    ) -> Self {
        Self {
            room: room.into(),
            username: username.into(),
            api,
            transport_tx,
            feedback_tx,
            in_flight: InFlight::new(),
        }
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Decodes one relay frame. Malformed frames and our own echoed
    /// call-control messages yield `None`.
    pub fn route(&self, text: &str) -> Option<CallEvent> {
        match SignalingMessage::decode(text) {
            Ok(message) => self.route_message(message),
            Err(e) => {
                warn!("Dropping malformed signaling message: {}", e);
                None
            }
        }
    }

    pub fn route_message(&self, message: SignalingMessage) -> Option<CallEvent> {
        match self.decode_event(message) {
            Ok(event) => event,
            Err(e) => {
                warn!("Dropping signaling message: {}", e);
                None
            }
        }
    }

    fn decode_event(&self, message: SignalingMessage) -> Result<Option<CallEvent>, MessageError> {
        let room_event = message.room_event()?;

        let own = message.username.as_deref() == Some(self.username.as_str());
        if own && !room_event.is_membership() {
            debug!("Ignoring our own {:?} echoed by the relay", room_event);
            return Ok(None);
        }

        let event = match room_event {
            RoomEvent::Entered => {
                CallEvent::RemoteEntered(message.participants.unwrap_or_default())
            }
            RoomEvent::Leave => CallEvent::RemoteLeft(message.participants.unwrap_or_default()),
            RoomEvent::Calling => CallEvent::RemoteCalling(message.require_sdp_offer()?.to_owned()),
            RoomEvent::Rejected => CallEvent::RemoteRejected,
            RoomEvent::Accepted => {
                CallEvent::RemoteAccepted(message.require_sdp_answer()?.to_owned())
            }
            RoomEvent::Hangup => CallEvent::RemoteHangup,
            RoomEvent::IceCandidate => {
                CallEvent::RemoteIceCandidate(message.require_ice()?.clone())
            }
        };
        Ok(Some(event))
    }

    /// Carries out the intents of one transition, in order.
    pub async fn execute(&self, generation: Generation, intents: Vec<CallIntent>) {
        for intent in intents {
            match intent {
                CallIntent::ClearPending => self.in_flight.retain_generation(generation),

                intent if intent.is_transport_command() => {
                    let command = TransportCommand { generation, intent };
                    if self.transport_tx.send(command).await.is_err() {
                        error!(%generation, "Transport worker is gone, command dropped");
                    }
                }

                intent => match self.outbound(intent) {
                    Some((kind, message)) => self.send(generation, kind, message),
                    None => warn!(%generation, "Intent has no relay request"),
                },
            }
        }
    }

    /// Announces room membership. Awaited so `enter` lands before any call.
    pub async fn announce(&self, endpoint: ApiEndpoint) {
        let message = self.message(endpoint.room_event());
        match self.api.post(endpoint, &message).await {
            Ok(()) => info!("{} delivered for room {}", endpoint, self.room),
            Err(e) => warn!("{} failed for room {}: {}", endpoint, self.room, e),
        }
    }

    fn message(&self, event: RoomEvent) -> SignalingMessage {
        SignalingMessage::new(&self.room, &self.username).with_event(event)
    }

    fn outbound(&self, intent: CallIntent) -> Option<(SignalKind, SignalingMessage)> {
        let kind = intent.signal_kind()?;
        let message = self.message(ApiEndpoint::from(kind).room_event());
        let message = match intent {
            CallIntent::SendOffer(sdp) => message.with_sdp_offer(sdp),
            CallIntent::SendAnswer(sdp) => message.with_sdp_answer(sdp),
            CallIntent::SendIceCandidate(ice) => message.with_ice(ice),
            _ => message,
        };
        Some((kind, message))
    }

    fn send(&self, generation: Generation, kind: SignalKind, message: SignalingMessage) {
        if !self.in_flight.try_acquire(kind, generation) {
            warn!(%generation, "A {} request is already in flight, dropping duplicate", kind);
            return;
        }

        let api = self.api.clone();
        let in_flight = self.in_flight.clone();
        let feedback_tx = self.feedback_tx.clone();

        tokio::spawn(async move {
            let endpoint = ApiEndpoint::from(kind);
            let event = match api.post(endpoint, &message).await {
                Ok(()) => {
                    debug!(%generation, "{} delivered", endpoint);
                    CallEvent::SignalingDelivered(kind)
                }
                Err(e) => {
                    warn!(%generation, "{} failed: {}", endpoint, e);
                    CallEvent::SignalingFailed {
                        kind,
                        reason: e.to_string(),
                    }
                }
            };
            in_flight.release(kind, generation);
            let _ = feedback_tx.send(Tagged::new(generation, event)).await;
        });
    }
}
