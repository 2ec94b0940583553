use crate::model::IceCandidate;
use std::collections::VecDeque;

/// Holds remote ICE candidates until the remote description is applied.
///
/// Candidates queue in arrival order while the latch is open. [`latch`]
/// hands them all back exactly once; afterwards [`offer`] passes new
/// candidates straight through.
///
/// [`latch`]: IceBuffer::latch
/// [`offer`]: IceBuffer::offer
#[derive(Debug, Default, Clone)]
pub struct IceBuffer {
    remote_description_applied: bool,
    queued: VecDeque<IceCandidate>,
}

impl IceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the candidate if it may be applied now, otherwise keeps it.
    pub fn offer(&mut self, ice: IceCandidate) -> Option<IceCandidate> {
        if self.remote_description_applied {
            return Some(ice);
        }
        self.queued.push_back(ice);
        None
    }

    /// Marks the remote description as applied and drains the queue (FIFO).
    /// A second call returns nothing.
    pub fn latch(&mut self) -> Vec<IceCandidate> {
        if self.remote_description_applied {
            return Vec::new();
        }
        self.remote_description_applied = true;
        self.queued.drain(..).collect()
    }

    pub fn is_latched(&self) -> bool {
        self.remote_description_applied
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn clear(&mut self) {
        self.remote_description_applied = false;
        self.queued.clear();
    }
}
