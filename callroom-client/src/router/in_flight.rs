use callroom_core::{Generation, SignalKind};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Outstanding relay requests, at most one per exclusive [`SignalKind`].
///
/// Shared between the router and the tasks that perform the requests;
/// a task releases its slot only if the slot still belongs to its generation.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    requests: Arc<DashMap<SignalKind, Generation>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `kind`. Non-exclusive kinds always succeed.
    pub fn try_acquire(&self, kind: SignalKind, generation: Generation) -> bool {
        if !kind.is_exclusive() {
            return true;
        }
        match self.requests.entry(kind) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(generation);
                true
            }
        }
    }

    pub fn release(&self, kind: SignalKind, generation: Generation) {
        self.requests.remove_if(&kind, |_, g| *g == generation);
    }

    /// Forgets every request issued before `generation`.
    pub fn retain_generation(&self, generation: Generation) {
        self.requests.retain(|_, g| *g == generation);
    }

    pub fn is_in_flight(&self, kind: SignalKind) -> bool {
        self.requests.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
