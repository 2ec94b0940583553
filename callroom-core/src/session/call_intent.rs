use crate::model::IceCandidate;
use crate::session::SignalKind;

/// Work the session asks the outside world to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallIntent {
    CreateOffer,
    SendOffer(String),
    ApplyRemoteAnswer(String),
    ApplyRemoteOffer(String),
    SendAnswer(String),
    SendReject,
    EndCallSignal,
    SendIceCandidate(IceCandidate),
    ApplyIceCandidate(IceCandidate),
    ClearPending,
    ResetTransport,
    StartLocalMedia,
    CloseTransport,
}

impl CallIntent {
    /// The relay request this intent turns into, if any.
    pub fn signal_kind(&self) -> Option<SignalKind> {
        match self {
            Self::SendOffer(_) => Some(SignalKind::Offer),
            Self::SendAnswer(_) => Some(SignalKind::Answer),
            Self::SendReject => Some(SignalKind::Reject),
            Self::EndCallSignal => Some(SignalKind::End),
            Self::SendIceCandidate(_) => Some(SignalKind::Ice),
            _ => None,
        }
    }

    /// Intents executed against the peer connection, in order.
    pub fn is_transport_command(&self) -> bool {
        matches!(
            self,
            Self::CreateOffer
                | Self::ApplyRemoteAnswer(_)
                | Self::ApplyRemoteOffer(_)
                | Self::ApplyIceCandidate(_)
                | Self::ResetTransport
                | Self::StartLocalMedia
                | Self::CloseTransport
        )
    }
}
