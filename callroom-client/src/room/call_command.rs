/// Inputs to the call room from the UI and from the inbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallCommand {
    /// The call screen was (re-)entered.
    EnterView,
    StartCall,
    AcceptCall,
    RejectCall,
    EndCall,

    EnterRoom,
    LeaveRoom,

    /// A raw text frame from the relay.
    Inbound(String),

    Shutdown,
}
