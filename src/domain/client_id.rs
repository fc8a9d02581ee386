//! Per-manager client identity.
//!
//! [`ClientId`] is an opaque identifier generated once when a connection
//! manager is constructed and stable for the manager's lifetime. It is
//! embedded in the WebSocket endpoint path and stamped on every outgoing
//! envelope so the dashboard server can address and deduplicate clients.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of the random hex suffix appended to the client-id prefix.
const SUFFIX_LEN: usize = 12;

/// Opaque identity for a single dashboard client.
///
/// Formatted as `inventory_<12 hex chars>`, the suffix drawn from a UUID v4.
/// Generated once per [`ConnectionManager`](crate::ws::ConnectionManager)
/// instance and never persisted across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new random `ClientId`.
    #[must_use]
    pub fn new() -> Self {
        let mut suffix = uuid::Uuid::new_v4().simple().to_string();
        suffix.truncate(SUFFIX_LEN);
        Self(format!("inventory_{suffix}"))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
