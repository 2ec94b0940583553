mod call_command;
mod call_handle;
mod call_room;
mod call_snapshot;

pub use call_command::*;
pub use call_handle::*;
pub use call_room::*;
pub use call_snapshot::*;
