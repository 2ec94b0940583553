mod in_flight;
mod signaling_router;

pub use in_flight::*;
pub use signaling_router::*;
