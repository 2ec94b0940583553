use callroom_core::{CallError, Generation, Notification, RoomStatus};

/// What the UI needs to render the call screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSnapshot {
    pub generation: Generation,
    pub status: RoomStatus,
    pub last_notification: Option<Notification>,
    pub participants: Vec<String>,
    pub participant_count: u32,
    /// Most recent failure; cleared when the next call starts.
    pub last_failure: Option<CallError>,
}

impl Default for CallSnapshot {
    fn default() -> Self {
        Self {
            generation: Generation::default(),
            status: RoomStatus::Standby,
            last_notification: None,
            participants: Vec::new(),
            participant_count: 0,
            last_failure: None,
        }
    }
}
