mod call_event;
mod call_intent;
mod call_session;
mod error;
mod generation;
mod ice_buffer;
mod transition;

pub use call_event::{CallEvent, ConnectivityKind, SignalKind};
pub use call_intent::CallIntent;
pub use call_session::{CallSession, CallSessionState};
pub use error::{CallError, Rejection};
pub use generation::{Generation, Tagged};
pub use ice_buffer::IceBuffer;
pub use transition::Transition;
