mod media_transport;
mod transport_config;
mod transport_event;
mod transport_worker;
mod webrtc_transport;

pub use media_transport::*;
pub use transport_config::*;
pub use transport_event::*;
pub use transport_worker::*;
pub use webrtc_transport::*;
