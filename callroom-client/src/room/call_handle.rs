use crate::room::{CallCommand, CallSnapshot};
use callroom_core::RoomStatus;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

#[derive(Debug, Error)]
#[error("call room has shut down")]
pub struct RoomClosed;

/// Cheap, cloneable front door to a running [`CallRoom`](crate::CallRoom).
#[derive(Clone)]
pub struct CallHandle {
    command_tx: mpsc::Sender<CallCommand>,
    snapshot_rx: watch::Receiver<CallSnapshot>,
    status_tx: broadcast::Sender<RoomStatus>,
}

impl CallHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<CallCommand>,
        snapshot_rx: watch::Receiver<CallSnapshot>,
        status_tx: broadcast::Sender<RoomStatus>,
    ) -> Self {
        Self {
            command_tx,
            snapshot_rx,
            status_tx,
        }
    }

    pub async fn send(&self, command: CallCommand) -> Result<(), RoomClosed> {
        self.command_tx.send(command).await.map_err(|_| RoomClosed)
    }

    pub async fn enter_view(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::EnterView).await
    }

    pub async fn start_call(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::StartCall).await
    }

    pub async fn accept_call(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::AcceptCall).await
    }

    pub async fn reject_call(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::RejectCall).await
    }

    pub async fn end_call(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::EndCall).await
    }

    pub async fn enter_room(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::EnterRoom).await
    }

    pub async fn leave_room(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::LeaveRoom).await
    }

    /// Hands a relay text frame to the room.
    pub async fn deliver(&self, text: String) -> Result<(), RoomClosed> {
        self.send(CallCommand::Inbound(text)).await
    }

    pub async fn shutdown(&self) -> Result<(), RoomClosed> {
        self.send(CallCommand::Shutdown).await
    }

    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    pub fn snapshot(&self) -> CallSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<CallSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Every status the session enters, including transient ones the
    /// snapshot skips over.
    pub fn subscribe(&self) -> broadcast::Receiver<RoomStatus> {
        self.status_tx.subscribe()
    }

    /// Waits until a published snapshot satisfies `predicate`.
    pub async fn wait_for(
        &self,
        timeout: Duration,
        mut predicate: impl FnMut(&CallSnapshot) -> bool,
    ) -> Option<CallSnapshot> {
        let mut rx = self.snapshot_rx.clone();
        let waited = tokio::time::timeout(timeout, rx.wait_for(|s| predicate(s))).await;
        match waited {
            Ok(Ok(snapshot)) => Some(snapshot.clone()),
            _ => None,
        }
    }
}
