//! Domain layer: client identity and connection lifecycle.
//!
//! This module contains the client-side domain model: the per-manager
//! identity stamped on every outgoing envelope and the connection state
//! machine that drives the status indicator.

pub mod client_id;
pub mod state;

pub use client_id::ClientId;
pub use state::ConnectionState;
