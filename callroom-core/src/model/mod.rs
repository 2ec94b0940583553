mod participants;
mod room_status;
mod session_id;
mod signaling;

pub use participants::ParticipantTracker;
pub use room_status::{Notification, RoomStatus};
pub use session_id::SessionId;
pub use signaling::{IceCandidate, MessageError, RoomEvent, SignalingMessage};
