//! Link error types.
//!
//! [`LinkError`] is the central error type for operations that can fail
//! toward the caller: publishing trigger messages and tearing a manager
//! down. Frame-level decode failures never surface here — they are logged
//! and the frame is dropped, per the error-handling contract that nothing
//! in this crate is fatal to the hosting page.

use crate::ws::codec::EncodeError;

/// Errors surfaced to callers of the link API.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// WebSocket dial, handshake, or transport failure.
    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// An outgoing envelope could not be built.
    #[error("envelope encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// The background connection task ended abnormally (panicked or was
    /// aborted before shutdown completed).
    #[error("connection task ended abnormally: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
