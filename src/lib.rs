//! # inventory-link
//!
//! Resilient WebSocket client for real-time inventory dashboard updates.
//!
//! This crate keeps one duplex channel open between a dashboard page and
//! its server, reconnecting with bounded exponential backoff, and turns
//! typed server pushes into UI side effects behind a host-implemented
//! [`Frontend`](ui::Frontend) boundary. All rendering is delegated — this
//! library is a coordination layer.
//!
//! ## Architecture
//!
//! ```text
//! Dashboard server (WebSocket)
//!     │
//!     ├── ConnectionManager (ws/)
//!     │       dial / session / backoff state machine
//!     │
//!     ├── Codec + Dispatcher (ws/)
//!     │       envelope encode, frame decode, typed routing
//!     │
//!     ├── Frontend boundary (ui/)
//!     │       status, notifications, refresh, data updates
//!     │
//!     └── TriggerClient (trigger)
//!             publish-side injection for backend jobs
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod trigger;
pub mod ui;
pub mod ws;

pub use config::LinkConfig;
pub use domain::{ClientId, ConnectionState};
pub use error::LinkError;
pub use trigger::TriggerClient;
pub use ws::ConnectionManager;
