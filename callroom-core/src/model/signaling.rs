use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Room and call-control events broadcast by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomEvent {
    Entered,
    Leave,
    Calling,
    Rejected,
    Accepted,
    Hangup,
    IceCandidate,
}

impl RoomEvent {
    /// Membership events describe the room, everything else drives the call.
    pub fn is_membership(self) -> bool {
        matches!(self, Self::Entered | Self::Leave)
    }
}

/// A trickle-ICE candidate as it travels over the relay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(rename = "sdpMLineIndex")]
    pub sdp_m_line_index: i32,
    #[serde(rename = "sdpMid")]
    pub sdp_mid: String,
}

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed signaling json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("signaling message carries no roomEvent")]
    MissingEvent,

    #[error("{event:?} message is missing `{field}`")]
    MissingField {
        event: RoomEvent,
        field: &'static str,
    },
}

/// The JSON object exchanged with the relay, both as REST body and as
/// websocket broadcast. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    #[serde(rename = "roomEvent", default, skip_serializing_if = "Option::is_none")]
    pub event: Option<RoomEvent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_offer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_answer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice: Option<IceCandidate>,
}

impl SignalingMessage {
    /// Message addressed to `room` on behalf of `username`.
    pub fn new(room: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn with_event(mut self, event: RoomEvent) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_sdp_offer(mut self, sdp: impl Into<String>) -> Self {
        self.sdp_offer = Some(sdp.into());
        self
    }

    pub fn with_sdp_answer(mut self, sdp: impl Into<String>) -> Self {
        self.sdp_answer = Some(sdp.into());
        self
    }

    pub fn with_ice(mut self, ice: IceCandidate) -> Self {
        self.ice = Some(ice);
        self
    }

    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = Some(participants);
        self
    }

    pub fn decode(text: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The discriminant, or an error when the relay sent none.
    pub fn room_event(&self) -> Result<RoomEvent, MessageError> {
        self.event.ok_or(MessageError::MissingEvent)
    }

    pub fn require_sdp_offer(&self) -> Result<&str, MessageError> {
        self.sdp_offer
            .as_deref()
            .ok_or(MessageError::MissingField {
                event: RoomEvent::Calling,
                field: "sdpOffer",
            })
    }

    pub fn require_sdp_answer(&self) -> Result<&str, MessageError> {
        self.sdp_answer
            .as_deref()
            .ok_or(MessageError::MissingField {
                event: RoomEvent::Accepted,
                field: "sdpAnswer",
            })
    }

    pub fn require_ice(&self) -> Result<&IceCandidate, MessageError> {
        self.ice.as_ref().ok_or(MessageError::MissingField {
            event: RoomEvent::IceCandidate,
            field: "ice",
        })
    }
}
