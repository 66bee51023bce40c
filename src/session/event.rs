//! Events that can occur in a conversation session

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The client environment finished initializing
    Ready,
    /// The user submitted input
    Submit { text: String },
    /// The relay endpoint returned a reply
    ReplyReceived { message: String },
    /// The relay call failed (network failure or non-success response)
    ReplyFailed { message: String },
}
