pub mod config;
pub mod room;
pub mod router;
pub mod signaling;
pub mod transport;

pub use config::*;
pub use room::*;
pub use router::*;
pub use signaling::*;
pub use transport::*;
