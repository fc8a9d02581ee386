//! Presentation boundary: everything the hosting application renders.
//!
//! The crate never touches a screen itself. All UI side effects — the
//! status indicator, notification toasts, page reloads, navigation, and
//! data-table updates — cross the [`Frontend`] trait, implemented by the
//! host. [`ConsoleFrontend`] is the implementation used by the demo binary;
//! tests use a recording double.

pub mod console;
pub mod notify;
pub mod status;

pub use console::ConsoleFrontend;
pub use notify::{Notification, NotificationCenter, NotificationId, NotificationTiming};
pub use status::StatusIndicator;

/// Side effects the hosting application performs on the crate's behalf.
///
/// Implementations must be cheap and non-blocking: every method is invoked
/// from the connection task, and a slow frontend stalls frame dispatch. A
/// host with no status element (or no notification area) simply ignores the
/// corresponding calls — the manager never fails because a hook is a no-op.
///
/// All strings handed to the frontend are untrusted plain text; rendering
/// them as markup is a host bug.
pub trait Frontend: Send + Sync {
    /// Updates the visible connection status element.
    fn update_status(&self, status: &StatusIndicator);

    /// Renders a notification toast. Expiry is driven by the
    /// [`NotificationCenter`], which follows up with [`Frontend::begin_fade`]
    /// and [`Frontend::remove_notification`].
    fn show_notification(&self, notification: &Notification);

    /// Starts the fade-out transition for a visible notification.
    fn begin_fade(&self, id: NotificationId);

    /// Removes a notification from the screen entirely.
    fn remove_notification(&self, id: NotificationId);

    /// Asks the user whether the page should reload. Only called for
    /// non-forced refresh signals; returning `false` suppresses the reload.
    fn confirm_refresh(&self) -> bool;

    /// Reloads the page.
    fn reload(&self);

    /// Navigates the page to `url`.
    fn navigate(&self, url: &str);

    /// Applies a data update to the named render target. The target has
    /// already been validated against the configured one.
    fn apply_data_update(&self, target: &str, data: &serde_json::Value);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording frontend shared by dispatcher, notification, and
    //! connection tests.

    use std::sync::Mutex;

    use super::{Frontend, Notification, NotificationId, StatusIndicator};
    use crate::ws::messages::Category;

    /// One observed frontend call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Effect {
        Status { label: &'static str },
        Notified { message: String, category: Category },
        FadeStarted(NotificationId),
        Removed(NotificationId),
        ConfirmAsked,
        Reloaded,
        Navigated(String),
        DataApplied { target: String, data: serde_json::Value },
    }

    /// [`Frontend`] double that records every call in order.
    #[derive(Debug, Default)]
    pub struct RecordingFrontend {
        effects: Mutex<Vec<Effect>>,
        confirm_answer: bool,
    }

    impl RecordingFrontend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Sets the answer given to `confirm_refresh`.
        pub fn confirming(answer: bool) -> Self {
            Self {
                effects: Mutex::new(Vec::new()),
                confirm_answer: answer,
            }
        }

        /// Snapshot of the recorded effects, in call order.
        pub fn effects(&self) -> Vec<Effect> {
            self.effects.lock().map(|e| e.clone()).unwrap_or_default()
        }

        fn record(&self, effect: Effect) {
            if let Ok(mut effects) = self.effects.lock() {
                effects.push(effect);
            }
        }
    }

    impl Frontend for RecordingFrontend {
        fn update_status(&self, status: &StatusIndicator) {
            self.record(Effect::Status {
                label: status.label,
            });
        }

        fn show_notification(&self, notification: &Notification) {
            self.record(Effect::Notified {
                message: notification.message.clone(),
                category: notification.category,
            });
        }

        fn begin_fade(&self, id: NotificationId) {
            self.record(Effect::FadeStarted(id));
        }

        fn remove_notification(&self, id: NotificationId) {
            self.record(Effect::Removed(id));
        }

        fn confirm_refresh(&self) -> bool {
            self.record(Effect::ConfirmAsked);
            self.confirm_answer
        }

        fn reload(&self) {
            self.record(Effect::Reloaded);
        }

        fn navigate(&self, url: &str) {
            self.record(Effect::Navigated(url.to_string()));
        }

        fn apply_data_update(&self, target: &str, data: &serde_json::Value) {
            self.record(Effect::DataApplied {
                target: target.to_string(),
                data: data.clone(),
            });
        }
    }
}
