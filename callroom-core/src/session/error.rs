use crate::model::RoomStatus;
use crate::session::{ConnectivityKind, Generation, SignalKind};
use thiserror::Error;

/// Failures that drive the session out of a call. They are reported on the
/// [`Transition`](crate::Transition) that handled them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("SDP negotiation failed: {0}")]
    Negotiation(String),

    #[error("transport connectivity went {0}")]
    Connectivity(ConnectivityKind),

    #[error("delivering {kind} failed: {reason}")]
    SignalingDelivery { kind: SignalKind, reason: String },
}

/// Why an event left the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{event} does not apply in {status}")]
    NotApplicable {
        status: RoomStatus,
        event: &'static str,
    },

    #[error("stale completion from {received}, session is at {current}")]
    Stale {
        current: Generation,
        received: Generation,
    },
}
