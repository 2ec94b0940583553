use crate::model::{IceCandidate, Notification, RoomStatus};
use crate::session::{
    CallError, CallEvent, CallIntent, ConnectivityKind, Generation, IceBuffer, Rejection,
    SignalKind, Tagged, Transition,
};
use tracing::{debug, warn};

/// Observable state of one call screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSessionState {
    pub status: RoomStatus,
    /// Remote offer held between `RemoteCalling` and its application.
    pub pending_sdp_offer: Option<String>,
    /// Remote answer held between `RemoteAccepted` and its application.
    pub pending_sdp_answer: Option<String>,
    /// Most recent remote ICE candidate.
    pub pending_ice: Option<IceCandidate>,
    pub last_notification: Option<Notification>,
    pub participants: Vec<String>,
}

impl Default for CallSessionState {
    fn default() -> Self {
        Self {
            status: RoomStatus::Standby,
            pending_sdp_offer: None,
            pending_sdp_answer: None,
            pending_ice: None,
            last_notification: None,
            participants: Vec::new(),
        }
    }
}

/// The call state machine.
///
/// Pure transition logic: [`apply`](CallSession::apply) takes an event and
/// returns the statuses entered and the intents to execute. It never performs
/// I/O; whoever owns it executes the intents and feeds results back in.
#[derive(Debug, Default)]
pub struct CallSession {
    state: CallSessionState,
    generation: Generation,
    ice: IceBuffer,
}

impl CallSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RoomStatus {
        self.state.status
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> &CallSessionState {
        &self.state
    }

    /// Remote candidates waiting for the remote description.
    pub fn buffered_ice(&self) -> usize {
        self.ice.len()
    }

    /// Applies a completion, dropping it if it belongs to an older call.
    pub fn apply_tagged(&mut self, tagged: Tagged) -> Result<Transition, Rejection> {
        if tagged.generation != self.generation {
            debug!(
                current = %self.generation,
                received = %tagged.generation,
                "Discarding stale {}",
                tagged.event
            );
            return Err(Rejection::Stale {
                current: self.generation,
                received: tagged.generation,
            });
        }
        self.apply(tagged.event)
    }

    pub fn apply(&mut self, event: CallEvent) -> Result<Transition, Rejection> {
        use CallEvent as E;
        use RoomStatus as S;

        let status = self.state.status;
        let mut tx = Transition::begin(status, self.generation);

        match (status, event) {
            (_, E::LocalIceCandidateGenerated(ice)) => {
                tx.push(CallIntent::SendIceCandidate(ice));
            }

            (_, E::RemoteIceCandidate(ice)) => {
                self.state.pending_ice = Some(ice.clone());
                self.notify(&mut tx, Notification::IceUpdate);
                match self.ice.offer(ice) {
                    Some(ice) => tx.push(CallIntent::ApplyIceCandidate(ice)),
                    None => debug!(buffered = self.ice.len(), "Buffering remote ICE candidate"),
                }
            }

            (_, E::RemoteEntered(participants)) => {
                self.state.participants = participants;
                self.notify(&mut tx, Notification::Entered);
            }

            (_, E::RemoteLeft(participants)) => {
                self.state.participants = participants;
                self.notify(&mut tx, Notification::Leave);
            }

            (S::Standby | S::SdpReset | S::InitializationFailed, E::ViewEntered) => {
                self.enter(&mut tx, S::Standby);
                tx.push(CallIntent::ResetTransport);
                tx.push(CallIntent::StartLocalMedia);
            }

            // Caller side.
            (S::Standby, E::LocalStartCall) => {
                self.enter(&mut tx, S::UserCalling);
                tx.push(CallIntent::CreateOffer);
            }

            (S::UserCalling, E::LocalSdpOfferCreated(sdp)) => {
                tx.push(CallIntent::SendOffer(sdp));
            }

            (S::UserCalling, E::RemoteAccepted(answer)) => {
                self.state.pending_sdp_answer = Some(answer.clone());
                self.enter(&mut tx, S::ReceiveAccepted);
                tx.push(CallIntent::ApplyRemoteAnswer(answer));
            }

            (S::UserCalling, E::RemoteRejected) => {
                self.enter(&mut tx, S::ReceiveRejected);
                self.enter(&mut tx, S::SdpReset);
                tx.push(CallIntent::ClearPending);
            }

            (S::ReceiveAccepted, E::LocalSdpAnswerApplied) => {
                self.state.pending_sdp_answer = None;
                self.flush_ice(&mut tx);
                self.enter(&mut tx, S::Initializing);
            }

            // Callee side.
            (S::Standby, E::RemoteCalling(offer)) => {
                self.state.pending_sdp_offer = Some(offer);
                self.enter(&mut tx, S::IncomingCall);
            }

            (S::IncomingCall, E::LocalAcceptCall) => {
                let Some(offer) = self.state.pending_sdp_offer.clone() else {
                    return Err(self.not_applicable(&E::LocalAcceptCall));
                };
                self.enter(&mut tx, S::AcceptCall);
                tx.push(CallIntent::ApplyRemoteOffer(offer));
            }

            (S::IncomingCall, E::LocalRejectCall) => {
                self.enter(&mut tx, S::RejectCall);
                tx.push(CallIntent::SendReject);
            }

            (S::AcceptCall, E::RemoteDescriptionApplied) => {
                self.state.pending_sdp_offer = None;
                self.flush_ice(&mut tx);
            }

            (S::AcceptCall, E::LocalSdpAnswerCreated(sdp)) => {
                tx.push(CallIntent::SendAnswer(sdp));
            }

            (S::AcceptCall, E::LocalSdpAnswerApplied) => {
                self.state.pending_sdp_offer = None;
                self.flush_ice(&mut tx);
                self.enter(&mut tx, S::Initializing);
            }

            (S::RejectCall, E::SignalingDelivered(SignalKind::Reject)) => {
                self.enter(&mut tx, S::SdpReset);
                tx.push(CallIntent::ClearPending);
            }

            (
                S::RejectCall,
                E::SignalingFailed {
                    kind: SignalKind::Reject,
                    reason,
                },
            ) => {
                warn!("Reject was not delivered: {}", reason);
                tx.failure = Some(CallError::SignalingDelivery {
                    kind: SignalKind::Reject,
                    reason,
                });
                self.enter(&mut tx, S::SdpReset);
                tx.push(CallIntent::ClearPending);
            }

            // Connectivity.
            (
                S::Initializing | S::OngoingDisconnected,
                E::TransportConnectivityChanged(
                    ConnectivityKind::Connected | ConnectivityKind::Completed,
                ),
            ) => {
                self.enter(&mut tx, S::OngoingConnected);
            }

            (
                S::OngoingConnected,
                E::TransportConnectivityChanged(ConnectivityKind::Disconnected),
            ) => {
                self.enter(&mut tx, S::OngoingDisconnected);
            }

            (s, E::TransportConnectivityChanged(ConnectivityKind::Failed)) if s.is_ongoing() => {
                self.fail(&mut tx, CallError::Connectivity(ConnectivityKind::Failed));
            }

            (s, E::TransportConnectivityChanged(ConnectivityKind::Closed)) if s.is_ongoing() => {
                self.end(&mut tx, true);
            }

            (_, E::TransportConnectivityChanged(kind)) => {
                debug!(%status, "Connectivity {} leaves the call phase unchanged", kind);
            }

            // Teardown.
            (s, E::LocalEndCall) if s.is_ongoing() => {
                self.enter(&mut tx, S::Hangup);
                self.end(&mut tx, true);
            }

            (s, E::RemoteHangup) if s.is_ongoing() || s == S::IncomingCall => {
                self.end(&mut tx, false);
            }

            // Failures.
            (s, E::NegotiationFailed(reason)) if s.is_negotiating() => {
                self.fail(&mut tx, CallError::Negotiation(reason));
            }

            (
                s,
                E::SignalingFailed {
                    kind: kind @ (SignalKind::Offer | SignalKind::Answer),
                    reason,
                },
            ) if s.is_negotiating() => {
                self.fail(&mut tx, CallError::SignalingDelivery { kind, reason });
            }

            (_, E::SignalingFailed { kind, reason }) => {
                warn!(%status, "Delivering {} failed after negotiation: {}", kind, reason);
                tx.failure = Some(CallError::SignalingDelivery { kind, reason });
            }

            (_, E::SignalingDelivered(kind)) => {
                debug!(%status, "Relay acknowledged {}", kind);
            }

            (_, event) => return Err(self.not_applicable(&event)),
        }

        Ok(tx)
    }

    fn not_applicable(&self, event: &CallEvent) -> Rejection {
        debug!(status = %self.state.status, "Ignoring {}", event);
        Rejection::NotApplicable {
            status: self.state.status,
            event: event.name(),
        }
    }

    fn notify(&mut self, tx: &mut Transition, notification: Notification) {
        self.state.last_notification = Some(notification);
        tx.notification = Some(notification);
    }

    fn flush_ice(&mut self, tx: &mut Transition) {
        for ice in self.ice.latch() {
            tx.push(CallIntent::ApplyIceCandidate(ice));
        }
    }

    /// Moves to `next`. Every entry into `standby` starts a new transport
    /// incarnation, so it always bumps the generation; `sdpReset` and
    /// `initializationFailed` bump only when entered from another status.
    fn enter(&mut self, tx: &mut Transition, next: RoomStatus) {
        let previous = self.state.status;

        let bump = match next {
            RoomStatus::Standby => true,
            RoomStatus::SdpReset | RoomStatus::InitializationFailed => previous != next,
            _ => false,
        };
        if bump {
            self.clear_pending();
            self.generation = self.generation.next();
        }

        self.state.status = next;
        tx.visited.push(next);
        tx.generation = self.generation;
    }

    fn end(&mut self, tx: &mut Transition, notify_remote: bool) {
        self.enter(tx, RoomStatus::Ended);
        if notify_remote {
            tx.push(CallIntent::EndCallSignal);
        }
        tx.push(CallIntent::CloseTransport);
        self.enter(tx, RoomStatus::SdpReset);
        tx.push(CallIntent::ClearPending);
    }

    fn fail(&mut self, tx: &mut Transition, error: CallError) {
        warn!(status = %self.state.status, "Call failed: {}", error);
        self.enter(tx, RoomStatus::InitializationFailed);
        tx.push(CallIntent::ClearPending);
        tx.push(CallIntent::CloseTransport);
        tx.failure = Some(error);
    }

    fn clear_pending(&mut self) {
        self.state.pending_sdp_offer = None;
        self.state.pending_sdp_answer = None;
        self.state.pending_ice = None;
        self.ice.clear();
    }
}
