//! WebSocket message types: outbound commands and inbound server messages.

use serde::{Deserialize, Serialize};

/// Severity category of a dashboard notification.
///
/// Carried on the wire as a lowercase string; absent or unrecognized
/// categories fall back to [`Category::Info`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Informational notice.
    #[default]
    Info,
    /// Successful operation.
    Success,
    /// Something needs attention soon.
    Warning,
    /// Something failed.
    Error,
}

impl Category {
    /// Returns the fixed display color for this category.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Info => "#2196F3",
            Self::Success => "#4CAF50",
            Self::Warning => "#FF9800",
            Self::Error => "#F44336",
        }
    }
}

/// Commands the client sends to the dashboard server.
///
/// Both are sent fire-and-forget right after a session opens; no
/// acknowledgment is awaited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Announce which dashboard page this client renders.
    Register {
        /// Page name, e.g. `"inventory"`.
        page: String,
    },
    /// Subscribe to a broadcast channel.
    Subscribe {
        /// Channel name, e.g. `"inventory"`.
        channel: String,
    },
}

/// Messages the dashboard server pushes to the client.
///
/// Discriminated by the top-level `type` field. [`ServerMessage::Legacy`]
/// and [`ServerMessage::Unknown`] are never produced by serde directly;
/// [`decode`](super::codec::decode) classifies frames into them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Show a transient notification toast.
    Notification {
        /// Human-readable notice, treated as plain text.
        message: String,
        /// Severity category; defaults to info when absent.
        #[serde(default)]
        category: Category,
    },
    /// The data behind a channel changed; the page should reload.
    Refresh {
        /// Channel the refresh applies to, or the wildcard `"all"`.
        channel: String,
        /// When `true`, reload without asking the user.
        #[serde(default)]
        force: bool,
    },
    /// In-place update for a named render target.
    DataUpdate {
        /// Render target identifier, e.g. `"inventory-table"`.
        target: String,
        /// Opaque payload forwarded to the host's render callback.
        data: serde_json::Value,
    },
    /// Untyped frame in the older push format (no `type` field).
    #[serde(skip)]
    Legacy(LegacyMessage),
    /// Frame with a `type` this client does not recognize.
    #[serde(skip)]
    Unknown {
        /// The unrecognized discriminant, kept for diagnostics.
        msg_type: String,
    },
}

impl ServerMessage {
    /// Wire discriminants this client understands.
    pub const KNOWN_TYPES: [&'static str; 3] = ["notification", "refresh", "data_update"];

    /// Returns `true` if `msg_type` is a discriminant this client handles.
    #[must_use]
    pub fn is_known_type(msg_type: &str) -> bool {
        Self::KNOWN_TYPES.contains(&msg_type)
    }

    /// Returns the message type as a static string slice.
    #[must_use]
    pub const fn type_str(&self) -> &'static str {
        match self {
            Self::Notification { .. } => "notification",
            Self::Refresh { .. } => "refresh",
            Self::DataUpdate { .. } => "data_update",
            Self::Legacy(_) => "legacy",
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// Older push format predating typed messages: `{action?, url?, update?}`.
///
/// `action == "redirect"` navigates the page to `url`; a present `update`
/// is shown as an info notification. Both effects may occur in one frame.
/// The content is always treated as plain text, never markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LegacyMessage {
    /// Optional action verb; only `"redirect"` is meaningful.
    #[serde(default)]
    pub action: Option<String>,
    /// Redirect destination, paired with `action == "redirect"`.
    #[serde(default)]
    pub url: Option<String>,
    /// Notification content to render verbatim as text.
    #[serde(default)]
    pub update: Option<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn register_serializes_with_type_tag() {
        let msg = ClientMessage::Register {
            page: "inventory".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap_or_default();
        assert_eq!(json["type"], "register");
        assert_eq!(json["page"], "inventory");
    }

    #[test]
    fn subscribe_serializes_with_type_tag() {
        let msg = ClientMessage::Subscribe {
            channel: "inventory".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap_or_default();
        assert_eq!(json["type"], "subscribe");
        assert_eq!(json["channel"], "inventory");
    }

    #[test]
    fn notification_category_defaults_to_info() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"type":"notification","message":"Stock low"}"#)
                .ok()
                .unwrap_or_else(|| panic!("deserialization failed"));
        assert_eq!(
            msg,
            ServerMessage::Notification {
                message: "Stock low".to_string(),
                category: Category::Info,
            }
        );
    }

    #[test]
    fn refresh_force_defaults_to_false() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"type":"refresh","channel":"inventory"}"#)
                .ok()
                .unwrap_or_else(|| panic!("deserialization failed"));
        let ServerMessage::Refresh { channel, force } = msg else {
            panic!("expected refresh variant");
        };
        assert_eq!(channel, "inventory");
        assert!(!force);
    }

    #[test]
    fn data_update_carries_opaque_payload() {
        let msg: ServerMessage = serde_json::from_str(
            r#"{"type":"data_update","target":"inventory-table","data":{"rows":[1,2]}}"#,
        )
        .ok()
        .unwrap_or_else(|| panic!("deserialization failed"));
        let ServerMessage::DataUpdate { target, data } = msg else {
            panic!("expected data_update variant");
        };
        assert_eq!(target, "inventory-table");
        assert_eq!(data["rows"][0], 1);
    }

    #[test]
    fn category_colors_are_fixed() {
        assert_eq!(Category::Info.color(), "#2196F3");
        assert_eq!(Category::Success.color(), "#4CAF50");
        assert_eq!(Category::Warning.color(), "#FF9800");
        assert_eq!(Category::Error.color(), "#F44336");
    }

    #[test]
    fn known_types_recognized() {
        assert!(ServerMessage::is_known_type("notification"));
        assert!(ServerMessage::is_known_type("refresh"));
        assert!(ServerMessage::is_known_type("data_update"));
        assert!(!ServerMessage::is_known_type("telemetry"));
    }

    #[test]
    fn legacy_ignores_extra_fields() {
        let msg: LegacyMessage =
            serde_json::from_str(r#"{"update":"rows changed","extra":42}"#)
                .ok()
                .unwrap_or_else(|| panic!("deserialization failed"));
        assert_eq!(msg.update.as_deref(), Some("rows changed"));
        assert!(msg.action.is_none());
    }
}
