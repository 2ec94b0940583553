use callroom_core::{RoomEvent, SignalKind};
use std::fmt;

/// Outbound REST calls to the signaling backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    RoomEnter,
    RoomLeave,
    CallRoom,
    AnswerCall,
    RejectCall,
    EndCall,
    IceCandidateUpdate,
}

impl ApiEndpoint {
    /// The `roomEvent` the backend relays for this call.
    pub fn room_event(self) -> RoomEvent {
        match self {
            ApiEndpoint::RoomEnter => RoomEvent::Entered,
            ApiEndpoint::RoomLeave => RoomEvent::Leave,
            ApiEndpoint::CallRoom => RoomEvent::Calling,
            ApiEndpoint::AnswerCall => RoomEvent::Accepted,
            ApiEndpoint::RejectCall => RoomEvent::Rejected,
            ApiEndpoint::EndCall => RoomEvent::Hangup,
            ApiEndpoint::IceCandidateUpdate => RoomEvent::IceCandidate,
        }
    }
}

impl From<SignalKind> for ApiEndpoint {
    fn from(kind: SignalKind) -> Self {
        match kind {
            SignalKind::Offer => ApiEndpoint::CallRoom,
            SignalKind::Answer => ApiEndpoint::AnswerCall,
            SignalKind::Reject => ApiEndpoint::RejectCall,
            SignalKind::End => ApiEndpoint::EndCall,
            SignalKind::Ice => ApiEndpoint::IceCandidateUpdate,
        }
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiEndpoint::RoomEnter => "roomEnter",
            ApiEndpoint::RoomLeave => "roomLeave",
            ApiEndpoint::CallRoom => "callRoom",
            ApiEndpoint::AnswerCall => "answerCall",
            ApiEndpoint::RejectCall => "rejectCall",
            ApiEndpoint::EndCall => "endCall",
            ApiEndpoint::IceCandidateUpdate => "iceCandidateUpdate",
        };
        f.write_str(name)
    }
}
