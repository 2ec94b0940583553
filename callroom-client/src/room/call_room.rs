use crate::config::ClientConfig;
use crate::room::{CallCommand, CallHandle, CallSnapshot};
use crate::router::SignalingRouter;
use crate::signaling::{ApiEndpoint, SignalingApi};
use crate::transport::{MediaTransport, TransportEvent, TransportWorker};
use callroom_core::{
    CallError, CallEvent, CallSession, ParticipantTracker, Rejection, RoomStatus, Tagged,
    Transition,
};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

/// The single owner of a call session.
///
/// UI commands, relay frames and transport/relay completions all funnel into
/// [`run`](CallRoom::run) and are applied one at a time.
pub struct CallRoom {
    config: ClientConfig,
    session: CallSession,
    participants: ParticipantTracker,
    router: SignalingRouter,
    worker: Option<TransportWorker>,
    command_rx: mpsc::Receiver<CallCommand>,
    feedback_rx: mpsc::Receiver<Tagged>,
    snapshot_tx: watch::Sender<CallSnapshot>,
    status_tx: broadcast::Sender<RoomStatus>,
    last_failure: Option<CallError>,
    entered: bool,
}

impl CallRoom {
    pub fn new(
        config: ClientConfig,
        transport: Box<dyn MediaTransport>,
        transport_events: mpsc::Receiver<TransportEvent>,
        api: Arc<dyn SignalingApi>,
    ) -> (Self, CallHandle) {
        let (command_tx, command_rx) = mpsc::channel(100);
        let (feedback_tx, feedback_rx) = mpsc::channel(256);
        let (transport_tx, transport_rx) = mpsc::channel(256);
        let (snapshot_tx, snapshot_rx) = watch::channel(CallSnapshot::default());
        let (status_tx, _) = broadcast::channel(64);

        let worker = TransportWorker::new(
            transport,
            transport_rx,
            transport_events,
            feedback_tx.clone(),
        );
        let router = SignalingRouter::new(
            config.room.clone(),
            config.username.clone(),
            api,
            transport_tx,
            feedback_tx,
        );

        let room = Self {
            config,
            session: CallSession::new(),
            participants: ParticipantTracker::new(),
            router,
            worker: Some(worker),
            command_rx,
            feedback_rx,
            snapshot_tx,
            status_tx: status_tx.clone(),
            last_failure: None,
            entered: false,
        };
        let handle = CallHandle::new(command_tx, snapshot_rx, status_tx);
        (room, handle)
    }

    /// Builds a room and runs it on the current runtime.
    pub fn spawn(
        config: ClientConfig,
        transport: Box<dyn MediaTransport>,
        transport_events: mpsc::Receiver<TransportEvent>,
        api: Arc<dyn SignalingApi>,
    ) -> CallHandle {
        let (room, handle) = Self::new(config, transport, transport_events, api);
        tokio::spawn(room.run());
        handle
    }

    pub async fn run(mut self) {
        info!(
            room = %self.config.room,
            username = %self.config.username,
            "Call room event loop started"
        );

        if let Some(worker) = self.worker.take() {
            tokio::spawn(worker.run());
        }

        self.enter_room().await;
        self.apply(CallEvent::ViewEntered).await;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(CallCommand::Shutdown) => {
                            info!("Shutdown requested");
                            break;
                        }
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down call room.");
                            break;
                        }
                    }
                }

                Some(tagged) = self.feedback_rx.recv() => {
                    let result = self.session.apply_tagged(tagged);
                    self.settle(result).await;
                }
            }
        }

        if self.entered {
            self.leave_room().await;
        }
        info!("Call room event loop finished");
    }

    async fn handle_command(&mut self, cmd: CallCommand) {
        match cmd {
            CallCommand::EnterView => self.apply(CallEvent::ViewEntered).await,
            CallCommand::StartCall => self.apply(CallEvent::LocalStartCall).await,
            CallCommand::AcceptCall => self.apply(CallEvent::LocalAcceptCall).await,
            CallCommand::RejectCall => self.apply(CallEvent::LocalRejectCall).await,
            CallCommand::EndCall => self.apply(CallEvent::LocalEndCall).await,
            CallCommand::EnterRoom => self.enter_room().await,
            CallCommand::LeaveRoom => self.leave_room().await,
            CallCommand::Inbound(text) => {
                let Some(event) = self.router.route(&text) else {
                    return;
                };
                self.track_membership(&event);
                self.apply(event).await;
            }
            CallCommand::Shutdown => {}
        }
    }

    async fn enter_room(&mut self) {
        self.router.announce(ApiEndpoint::RoomEnter).await;
        self.entered = true;
    }

    async fn leave_room(&mut self) {
        self.router.announce(ApiEndpoint::RoomLeave).await;
        self.entered = false;
    }

    fn track_membership(&mut self, event: &CallEvent) {
        let count = match event {
            CallEvent::RemoteEntered(_) => self.participants.on_entered(),
            CallEvent::RemoteLeft(_) => self.participants.on_left(),
            _ => return,
        };
        info!(count, "Room membership changed");
    }

    async fn apply(&mut self, event: CallEvent) {
        let result = self.session.apply(event);
        self.settle(result).await;
    }

    /// Executes a transition's intents and publishes the outcome. With
    /// `auto_rearm`, a call that ended or failed goes straight back to standby.
    async fn settle(&mut self, mut result: Result<Transition, Rejection>) {
        loop {
            let tx = match result {
                Ok(tx) => tx,
                Err(rejection) => {
                    debug!("{}", rejection);
                    return;
                }
            };

            let status = tx.status();
            let rearm = self.config.auto_rearm
                && tx.changed()
                && matches!(
                    status,
                    RoomStatus::SdpReset | RoomStatus::InitializationFailed
                );

            for visited in &tx.visited {
                info!(generation = %tx.generation, status = %visited, "Call status changed");
                if matches!(visited, RoomStatus::UserCalling | RoomStatus::IncomingCall) {
                    self.last_failure = None;
                }
                let _ = self.status_tx.send(*visited);
            }
            if let Some(failure) = tx.failure {
                warn!(generation = %tx.generation, %status, "Call failure: {}", failure);
                self.last_failure = Some(failure);
            }

            self.router.execute(tx.generation, tx.intents).await;
            self.publish();

            if !rearm {
                return;
            }
            result = self.session.apply(CallEvent::ViewEntered);
        }
    }

    fn publish(&self) {
        let state = self.session.state();
        self.snapshot_tx.send_replace(CallSnapshot {
            generation: self.session.generation(),
            status: self.session.status(),
            last_notification: state.last_notification,
            participants: state.participants.clone(),
            participant_count: self.participants.count(),
            last_failure: self.last_failure.clone(),
        });
    }
}
