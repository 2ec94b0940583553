use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of the call room as seen by the local user.
///
/// `Entered`, `Leave` and `IceUpdate` are notifications. The session never
/// stores them as its call phase; they surface through [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomStatus {
    /// Local media is rendering, no call yet.
    Standby,
    /// The local user pressed call; our offer is being created or delivered.
    UserCalling,
    /// The remote party is calling us.
    IncomingCall,
    /// We declined the incoming call.
    RejectCall,
    /// The party we called declined.
    ReceiveRejected,
    /// We accepted the incoming call and are producing an answer.
    AcceptCall,
    /// The party we called accepted; their answer is being applied.
    ReceiveAccepted,
    /// Both descriptions are set, ICE is gathering/checking.
    Initializing,
    InitializationFailed,
    OngoingConnected,
    /// ICE lost connectivity mid-call; may recover.
    OngoingDisconnected,
    /// The local user hung up.
    Hangup,
    Ended,
    Entered,
    Leave,
    /// Negotiation state is being discarded before returning to standby.
    SdpReset,
    IceUpdate,
}

impl RoomStatus {
    pub fn is_notification(self) -> bool {
        matches!(self, Self::Entered | Self::Leave | Self::IceUpdate)
    }

    /// Statuses in which a call is underway and can be torn down.
    pub fn is_ongoing(self) -> bool {
        matches!(
            self,
            Self::UserCalling
                | Self::AcceptCall
                | Self::ReceiveAccepted
                | Self::Initializing
                | Self::OngoingConnected
                | Self::OngoingDisconnected
        )
    }

    /// Statuses in which SDP is still being produced, delivered or applied.
    pub fn is_negotiating(self) -> bool {
        matches!(
            self,
            Self::UserCalling | Self::AcceptCall | Self::ReceiveAccepted | Self::Initializing
        )
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Self::Standby | Self::SdpReset)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standby => "standby",
            Self::UserCalling => "userCalling",
            Self::IncomingCall => "incomingCall",
            Self::RejectCall => "rejectCall",
            Self::ReceiveRejected => "receiveRejected",
            Self::AcceptCall => "acceptCall",
            Self::ReceiveAccepted => "receiveAccepted",
            Self::Initializing => "initializing",
            Self::InitializationFailed => "initializationFailed",
            Self::OngoingConnected => "ongoingConnected",
            Self::OngoingDisconnected => "ongoingDisconnected",
            Self::Hangup => "hangup",
            Self::Ended => "ended",
            Self::Entered => "entered",
            Self::Leave => "leave",
            Self::SdpReset => "sdpReset",
            Self::IceUpdate => "iceUpdate",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership and ICE notices, kept apart from the call phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notification {
    Entered,
    Leave,
    IceUpdate,
}

impl From<Notification> for RoomStatus {
    fn from(value: Notification) -> Self {
        match value {
            Notification::Entered => RoomStatus::Entered,
            Notification::Leave => RoomStatus::Leave,
            Notification::IceUpdate => RoomStatus::IceUpdate,
        }
    }
}
