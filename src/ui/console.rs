//! Console frontend for the demo binary.
//!
//! Renders every UI side effect as a structured tracing event. Useful for
//! running the link against a live dashboard server without a browser, and
//! as a reference for what a real host must implement.

use super::{Frontend, Notification, NotificationId, StatusIndicator};

/// [`Frontend`] implementation that logs every effect.
#[derive(Debug, Clone, Default)]
pub struct ConsoleFrontend {
    /// Answer given when a non-forced refresh asks for confirmation.
    /// A console has nobody to prompt, so the decision is configured
    /// up front (`WS_AUTO_CONFIRM_REFRESH`).
    pub auto_confirm_refresh: bool,
}

impl ConsoleFrontend {
    /// Creates a console frontend with the given refresh policy.
    #[must_use]
    pub const fn new(auto_confirm_refresh: bool) -> Self {
        Self {
            auto_confirm_refresh,
        }
    }
}

impl Frontend for ConsoleFrontend {
    fn update_status(&self, status: &StatusIndicator) {
        tracing::info!(label = status.label, color = status.color, "connection status");
    }

    fn show_notification(&self, notification: &Notification) {
        tracing::info!(
            id = %notification.id,
            category = ?notification.category,
            message = %notification.message,
            "notification"
        );
    }

    fn begin_fade(&self, id: NotificationId) {
        tracing::debug!(%id, "notification fading");
    }

    fn remove_notification(&self, id: NotificationId) {
        tracing::debug!(%id, "notification removed");
    }

    fn confirm_refresh(&self) -> bool {
        tracing::info!(
            auto_confirm = self.auto_confirm_refresh,
            "refresh requested, answering with configured policy"
        );
        self.auto_confirm_refresh
    }

    fn reload(&self) {
        tracing::info!("page reload requested");
    }

    fn navigate(&self, url: &str) {
        tracing::info!(%url, "navigation requested");
    }

    fn apply_data_update(&self, target: &str, data: &serde_json::Value) {
        tracing::info!(%target, %data, "data update");
    }
}
