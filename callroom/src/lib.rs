pub use callroom_core::{CallSession, RoomStatus, SignalingMessage};

pub mod model {
    pub use callroom_core::model::*;
}

pub mod session {
    pub use callroom_core::session::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use callroom_client::*;
}
