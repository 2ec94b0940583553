use crate::session::CallEvent;
use std::fmt;

/// Incarnation counter of a call. Completions carry the generation that
/// issued them so late results from a finished call can be told apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// An event produced on behalf of a specific generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub generation: Generation,
    pub event: CallEvent,
}

impl Tagged {
    pub fn new(generation: Generation, event: CallEvent) -> Self {
        Self { generation, event }
    }
}
