mod api_endpoint;
mod api_error;
mod rest_signaling_api;
mod signaling_api;
mod signaling_channel;

pub use api_endpoint::*;
pub use api_error::*;
pub use rest_signaling_api::*;
pub use signaling_api::*;
pub use signaling_channel::*;
