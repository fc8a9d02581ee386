//! Connection lifecycle states.
//!
//! Exactly one [`ConnectionState`] is active at any time. The manager
//! publishes transitions through a `tokio::sync::watch` channel and mirrors
//! them to the host's status indicator.

use serde::Serialize;

/// Lifecycle state of the managed WebSocket connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    /// A dial attempt is in flight and no session has been established yet.
    Connecting,
    /// The transport is open; frames flow in both directions.
    Connected,
    /// The previous session ended and the next dial is scheduled.
    Reconnecting {
        /// Zero-based count of reconnect attempts already consumed.
        attempt: u32,
    },
    /// Terminal state: the retry budget is exhausted or the manager was shut
    /// down. No further dial attempts are made.
    Disconnected,
}

impl ConnectionState {
    /// Returns `true` if the transport is currently open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns `true` while a dial attempt is pending or scheduled.
    #[must_use]
    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting | Self::Reconnecting { .. })
    }

    /// Returns `true` once the manager has permanently given up.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Disconnected)
    }
}
