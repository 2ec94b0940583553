use callroom_core::{CallEvent, ConnectivityKind, Generation, IceCandidate, Tagged};

/// Callbacks from a peer connection, stamped with the generation the
/// connection was built for.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    CandidateGenerated(Generation, IceCandidate),
    ConnectivityChanged(Generation, ConnectivityKind),
}

impl TransportEvent {
    pub fn into_tagged(self) -> Tagged {
        match self {
            TransportEvent::CandidateGenerated(generation, ice) => {
                Tagged::new(generation, CallEvent::LocalIceCandidateGenerated(ice))
            }
            TransportEvent::ConnectivityChanged(generation, kind) => {
                Tagged::new(generation, CallEvent::TransportConnectivityChanged(kind))
            }
        }
    }
}
