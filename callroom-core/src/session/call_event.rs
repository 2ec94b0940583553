use crate::model::IceCandidate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ICE connection state as reported by the media transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectivityKind {
    Checking,
    Connected,
    Completed,
    Failed,
    Disconnected,
    Closed,
}

impl fmt::Display for ConnectivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Checking => "checking",
            Self::Connected => "connected",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Disconnected => "disconnected",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Outbound signaling request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Offer,
    Answer,
    Reject,
    End,
    Ice,
}

impl SignalKind {
    /// Kinds limited to one request in flight. ICE trickles freely.
    pub fn is_exclusive(self) -> bool {
        !matches!(self, Self::Ice)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::Reject => "reject",
            Self::End => "end",
            Self::Ice => "ice",
        };
        f.write_str(name)
    }
}

/// Everything that can happen to a call session.
///
/// Local user intent, remote signaling and transport callbacks all arrive
/// as one of these and are applied in order by a single owner.
#[derive(Debug, Clone, PartialEq)]
pub enum CallEvent {
    /// The call screen was (re-)entered.
    ViewEntered,

    LocalStartCall,
    LocalAcceptCall,
    LocalRejectCall,
    LocalEndCall,

    RemoteEntered(Vec<String>),
    RemoteLeft(Vec<String>),
    RemoteCalling(String),
    RemoteRejected,
    RemoteAccepted(String),
    RemoteHangup,
    RemoteIceCandidate(IceCandidate),

    LocalSdpOfferCreated(String),
    LocalSdpAnswerCreated(String),
    /// Caller: the remote answer is set. Callee: the local answer is set.
    LocalSdpAnswerApplied,
    /// Callee: the remote offer is set.
    RemoteDescriptionApplied,
    LocalIceCandidateGenerated(IceCandidate),
    TransportConnectivityChanged(ConnectivityKind),
    NegotiationFailed(String),

    SignalingDelivered(SignalKind),
    SignalingFailed { kind: SignalKind, reason: String },
}

impl CallEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewEntered => "ViewEntered",
            Self::LocalStartCall => "LocalStartCall",
            Self::LocalAcceptCall => "LocalAcceptCall",
            Self::LocalRejectCall => "LocalRejectCall",
            Self::LocalEndCall => "LocalEndCall",
            Self::RemoteEntered(_) => "RemoteEntered",
            Self::RemoteLeft(_) => "RemoteLeft",
            Self::RemoteCalling(_) => "RemoteCalling",
            Self::RemoteRejected => "RemoteRejected",
            Self::RemoteAccepted(_) => "RemoteAccepted",
            Self::RemoteHangup => "RemoteHangup",
            Self::RemoteIceCandidate(_) => "RemoteIceCandidate",
            Self::LocalSdpOfferCreated(_) => "LocalSdpOfferCreated",
            Self::LocalSdpAnswerCreated(_) => "LocalSdpAnswerCreated",
            Self::LocalSdpAnswerApplied => "LocalSdpAnswerApplied",
            Self::RemoteDescriptionApplied => "RemoteDescriptionApplied",
            Self::LocalIceCandidateGenerated(_) => "LocalIceCandidateGenerated",
            Self::TransportConnectivityChanged(_) => "TransportConnectivityChanged",
            Self::NegotiationFailed(_) => "NegotiationFailed",
            Self::SignalingDelivered(_) => "SignalingDelivered",
            Self::SignalingFailed { .. } => "SignalingFailed",
        }
    }
}

impl fmt::Display for CallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportConnectivityChanged(kind) => {
                write!(f, "TransportConnectivityChanged({})", kind)
            }
            Self::SignalingDelivered(kind) => write!(f, "SignalingDelivered({})", kind),
            Self::SignalingFailed { kind, reason } => {
                write!(f, "SignalingFailed({}, {})", kind, reason)
            }
            Self::NegotiationFailed(reason) => write!(f, "NegotiationFailed({})", reason),
            other => f.write_str(other.name()),
        }
    }
}
