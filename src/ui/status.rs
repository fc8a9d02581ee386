//! Connection status indicator mapping.
//!
//! Each [`ConnectionState`] maps to a fixed `(label, color)` pair rendered
//! by the host's status element. The mapping is total: the indicator can
//! never be stale or absent for a live state.

use crate::domain::ConnectionState;

/// Label and color for the host's connection status element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    /// Short lowercase status word shown to the user.
    pub label: &'static str,
    /// CSS hex color for the label.
    pub color: &'static str,
}

impl From<&ConnectionState> for StatusIndicator {
    fn from(state: &ConnectionState) -> Self {
        match state {
            ConnectionState::Connecting => Self {
                label: "connecting",
                color: "#9E9E9E",
            },
            ConnectionState::Connected => Self {
                label: "connected",
                color: "#4CAF50",
            },
            ConnectionState::Reconnecting { .. } => Self {
                label: "reconnecting",
                color: "#FF9800",
            },
            ConnectionState::Disconnected => Self {
                label: "disconnected",
                color: "#F44336",
            },
        }
    }
}
