/// Counts the people in the room from `entered`/`leave` broadcasts.
///
/// Lives for the whole process and never goes below zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantTracker {
    count: u32,
}

impl ParticipantTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_entered(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn on_left(&mut self) -> u32 {
        self.count = self.count.saturating_sub(1);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
