use crate::signaling::ApiEndpoint;
use crate::transport::TransportConfig;
use serde::Deserialize;

/// REST paths of the signaling backend, relative to [`ApiConfig::base_url`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiPaths {
    pub room_enter: String,
    pub room_leave: String,
    pub call_room: String,
    pub answer_call: String,
    pub reject_call: String,
    pub end_call: String,
    pub ice_candidate_update: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            room_enter: "/room/enter".to_owned(),
            room_leave: "/room/leave".to_owned(),
            call_room: "/call".to_owned(),
            answer_call: "/call/answer".to_owned(),
            reject_call: "/call/reject".to_owned(),
            end_call: "/call/end".to_owned(),
            ice_candidate_update: "/call/ice".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub paths: ApiPaths,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            paths: ApiPaths::default(),
        }
    }

    pub fn path(&self, endpoint: ApiEndpoint) -> &str {
        let paths = &self.paths;
        match endpoint {
            ApiEndpoint::RoomEnter => &paths.room_enter,
            ApiEndpoint::RoomLeave => &paths.room_leave,
            ApiEndpoint::CallRoom => &paths.call_room,
            ApiEndpoint::AnswerCall => &paths.answer_call,
            ApiEndpoint::RejectCall => &paths.reject_call,
            ApiEndpoint::EndCall => &paths.end_call,
            ApiEndpoint::IceCandidateUpdate => &paths.ice_candidate_update,
        }
    }

    pub fn url(&self, endpoint: ApiEndpoint) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.path(endpoint)
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8088")
    }
}

/// Inbound websocket settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub url: String,
    /// Header carrying the per-connection session id.
    pub session_header: String,
    pub protocol: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:8088/".to_owned(),
            session_header: "session-id".to_owned(),
            protocol: "chat".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub room: String,
    pub username: String,
    pub api: ApiConfig,
    pub channel: ChannelConfig,
    pub transport: TransportConfig,
    /// Return to standby on our own after a call ends or fails.
    pub auto_rearm: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            room: "lobby".to_owned(),
            username: "guest".to_owned(),
            api: ApiConfig::default(),
            channel: ChannelConfig::default(),
            transport: TransportConfig::default(),
            auto_rearm: true,
        }
    }
}
