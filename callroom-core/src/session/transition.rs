use crate::model::{Notification, RoomStatus};
use crate::session::{CallError, CallIntent, Generation};

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Generation the intents belong to (after any bump).
    pub generation: Generation,
    pub from: RoomStatus,
    /// Statuses entered, in order. Empty when the call phase did not move.
    pub visited: Vec<RoomStatus>,
    pub intents: Vec<CallIntent>,
    pub notification: Option<Notification>,
    pub failure: Option<CallError>,
}

impl Transition {
    pub(crate) fn begin(from: RoomStatus, generation: Generation) -> Self {
        Self {
            generation,
            from,
            visited: Vec::new(),
            intents: Vec::new(),
            notification: None,
            failure: None,
        }
    }

    /// Status after the transition.
    pub fn status(&self) -> RoomStatus {
        self.visited.last().copied().unwrap_or(self.from)
    }

    pub fn changed(&self) -> bool {
        !self.visited.is_empty()
    }

    pub(crate) fn push(&mut self, intent: CallIntent) {
        self.intents.push(intent);
    }
}
