//! Trigger publisher for operational scripts.
//!
//! Backend jobs (stock imports, order reconciliation, error-log sweeps)
//! push events at connected dashboards through the server's trigger
//! endpoint. [`TriggerClient`] opens a short-lived connection per call,
//! sends one timestamped frame, and closes — there is no session to keep
//! alive on the publishing side.

use chrono::{DateTime, Utc};
use futures_util::SinkExt;
use serde::Serialize;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::ws::messages::Category;

/// Frames a publisher can inject into the dashboard fan-out.
///
/// Mirrors the inbound [`ServerMessage`](crate::ws::ServerMessage) set; the
/// server relays each frame to the clients subscribed to `channel`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerMessage {
    /// Show a notification on subscribed dashboards.
    Notification {
        /// Notice content, plain text.
        message: String,
        /// Fan-out channel, `"all"` for every client.
        channel: String,
        /// Severity category.
        category: Category,
        /// Publish time.
        timestamp: DateTime<Utc>,
    },
    /// Ask subscribed dashboards to reload.
    Refresh {
        /// Fan-out channel, `"all"` for every client.
        channel: String,
        /// Reload without user confirmation.
        force: bool,
        /// Publish time.
        timestamp: DateTime<Utc>,
    },
    /// Push new data for a named render target.
    DataUpdate {
        /// Opaque payload for the target's render callback.
        data: serde_json::Value,
        /// Render target identifier.
        target: String,
        /// Fan-out channel, `"all"` for every client.
        channel: String,
        /// Publish time.
        timestamp: DateTime<Utc>,
    },
}

/// Publishes dashboard events through the server's trigger endpoint.
#[derive(Debug, Clone)]
pub struct TriggerClient {
    endpoint: String,
}

impl TriggerClient {
    /// Creates a publisher for an explicit trigger endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a publisher for the trigger endpoint derived from `config`.
    #[must_use]
    pub fn from_config(config: &LinkConfig) -> Self {
        Self::new(config.trigger_endpoint())
    }

    /// Publishes a notification.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] if the dial, serialization, or send fails.
    pub async fn send_notification(
        &self,
        message: impl Into<String>,
        channel: impl Into<String>,
        category: Category,
    ) -> Result<(), LinkError> {
        self.send(&TriggerMessage::Notification {
            message: message.into(),
            channel: channel.into(),
            category,
            timestamp: Utc::now(),
        })
        .await
    }

    /// Publishes a refresh signal.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] if the dial, serialization, or send fails.
    pub async fn trigger_refresh(
        &self,
        channel: impl Into<String>,
        force: bool,
    ) -> Result<(), LinkError> {
        self.send(&TriggerMessage::Refresh {
            channel: channel.into(),
            force,
            timestamp: Utc::now(),
        })
        .await
    }

    /// Publishes a data update for a render target.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError`] if the dial, serialization, or send fails.
    pub async fn send_data_update(
        &self,
        data: serde_json::Value,
        target: impl Into<String>,
        channel: impl Into<String>,
    ) -> Result<(), LinkError> {
        self.send(&TriggerMessage::DataUpdate {
            data,
            target: target.into(),
            channel: channel.into(),
            timestamp: Utc::now(),
        })
        .await
    }

    /// Connects, sends one frame, and closes the connection.
    async fn send(&self, message: &TriggerMessage) -> Result<(), LinkError> {
        let frame = serde_json::to_string(message)
            .map_err(crate::ws::codec::EncodeError::Serialize)
            .map_err(LinkError::Encode)?;

        let (mut socket, _response) = connect_async(self.endpoint.as_str()).await?;
        socket.send(Message::Text(frame.into())).await?;
        socket.close(None).await?;
        tracing::debug!(endpoint = %self.endpoint, "trigger frame published");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    async fn bind() -> (TcpListener, TriggerClient) {
        let listener = TcpListener::bind("127.0.0.1:0").await.ok();
        let Some(listener) = listener else {
            panic!("failed to bind test listener");
        };
        let port = listener.local_addr().map(|a| a.port()).unwrap_or_default();
        let client = TriggerClient::new(format!("ws://127.0.0.1:{port}/ws/trigger"));
        (listener, client)
    }

    async fn receive_one(listener: &TcpListener) -> Value {
        let accepted = tokio::time::timeout(Duration::from_secs(5), listener.accept()).await;
        let Ok(Ok((stream, _))) = accepted else {
            panic!("no publisher connected");
        };
        let Ok(mut ws) = accept_async(stream).await else {
            panic!("websocket handshake failed");
        };
        loop {
            let Some(Ok(frame)) = ws.next().await else {
                panic!("publisher closed without sending a frame");
            };
            if let Message::Text(text) = frame {
                let Ok(value) = serde_json::from_str(text.as_str()) else {
                    panic!("publisher sent invalid JSON");
                };
                return value;
            }
        }
    }

    #[tokio::test]
    async fn notification_frame_is_typed_and_timestamped() {
        let (listener, client) = bind().await;
        let (sent, received) = tokio::join!(
            client.send_notification("Stock low", "inventory", Category::Warning),
            receive_one(&listener),
        );
        assert!(sent.is_ok());
        assert_eq!(received["type"], "notification");
        assert_eq!(received["message"], "Stock low");
        assert_eq!(received["channel"], "inventory");
        assert_eq!(received["category"], "warning");

        let Some(ts) = received["timestamp"].as_str() else {
            panic!("timestamp missing");
        };
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn refresh_frame_carries_force_flag() {
        let (listener, client) = bind().await;
        let (sent, received) = tokio::join!(
            client.trigger_refresh("all", true),
            receive_one(&listener),
        );
        assert!(sent.is_ok());
        assert_eq!(received["type"], "refresh");
        assert_eq!(received["channel"], "all");
        assert_eq!(received["force"], true);
    }

    #[tokio::test]
    async fn data_update_frame_keeps_payload() {
        let (listener, client) = bind().await;
        let payload = serde_json::json!({"rows": [{"sku": "A1", "qty": 4}]});
        let (sent, received) = tokio::join!(
            client.send_data_update(payload.clone(), "inventory-table", "inventory"),
            receive_one(&listener),
        );
        assert!(sent.is_ok());
        assert_eq!(received["type"], "data_update");
        assert_eq!(received["target"], "inventory-table");
        assert_eq!(received["data"], payload);
    }

    #[tokio::test]
    async fn unreachable_server_surfaces_transport_error() {
        let (listener, client) = bind().await;
        drop(listener);
        let result = client.trigger_refresh("inventory", false).await;
        assert!(matches!(result, Err(LinkError::Transport(_))));
    }
}
