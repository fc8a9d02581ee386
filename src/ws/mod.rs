//! WebSocket layer: connection lifecycle, codec, routing, subscriptions.
//!
//! The connection manager dials `ws(s)://<host>:<port>/ws/<clientId>` and
//! keeps the session alive across disconnects; the codec and dispatcher
//! turn text frames into frontend side effects.

pub mod backoff;
pub mod codec;
pub mod connection;
pub mod dispatch;
pub mod messages;
pub mod subscription;

pub use connection::ConnectionManager;
pub use messages::{Category, ClientMessage, ServerMessage};
