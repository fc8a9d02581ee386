//! Inbound message dispatcher.
//!
//! Routes every decoded [`ServerMessage`] to its side effect behind the
//! [`Frontend`] boundary. Routing is an exhaustive match: adding a message
//! kind without deciding its effect is a compile error.

use std::fmt;
use std::sync::Arc;

use super::messages::{Category, LegacyMessage, ServerMessage};
use super::subscription::ChannelFilter;
use crate::ui::{Frontend, NotificationCenter, NotificationTiming};

/// Routes decoded server messages into frontend side effects.
pub struct Dispatcher {
    filter: ChannelFilter,
    target: String,
    frontend: Arc<dyn Frontend>,
    notifications: NotificationCenter,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("filter", &self.filter)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher gating refreshes on `filter`, data updates on
    /// `target`, and rendering through `frontend`.
    #[must_use]
    pub fn new(
        filter: ChannelFilter,
        target: impl Into<String>,
        frontend: Arc<dyn Frontend>,
        timing: NotificationTiming,
    ) -> Self {
        let notifications = NotificationCenter::new(Arc::clone(&frontend), timing);
        Self {
            filter,
            target: target.into(),
            frontend,
            notifications,
        }
    }

    /// Dispatches one message to its side effect.
    pub fn dispatch(&self, message: ServerMessage) {
        match message {
            ServerMessage::Notification { message, category } => {
                self.notifications.show(message, category);
            }
            ServerMessage::Refresh { channel, force } => {
                if !self.filter.matches(&channel) {
                    tracing::debug!(%channel, "refresh for unsubscribed channel ignored");
                    return;
                }
                if force || self.frontend.confirm_refresh() {
                    self.frontend.reload();
                } else {
                    tracing::debug!(%channel, "refresh declined by user");
                }
            }
            ServerMessage::DataUpdate { target, data } => {
                if target == self.target {
                    self.frontend.apply_data_update(&target, &data);
                } else {
                    tracing::debug!(%target, "data update for unknown target ignored");
                }
            }
            ServerMessage::Legacy(legacy) => self.dispatch_legacy(legacy),
            ServerMessage::Unknown { msg_type } => {
                tracing::debug!(%msg_type, "unhandled message type");
            }
        }
    }

    /// Handles the older untyped frame shape. A redirect and an update may
    /// both be present and both take effect.
    fn dispatch_legacy(&self, legacy: LegacyMessage) {
        if legacy.action.as_deref() == Some("redirect")
            && let Some(url) = &legacy.url
        {
            self.frontend.navigate(url);
        }
        if let Some(update) = legacy.update {
            self.notifications.show(update, Category::Info);
        }
    }
}
