//! Transient notification toasts with automatic expiry.
//!
//! The [`NotificationCenter`] owns all timing: a shown notification stays
//! visible for a configured window, then fades, then is removed. Every
//! notification gets its own timer task, so several can coexist and each
//! expires independently of the others.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::Frontend;
use crate::ws::messages::Category;

/// Monotonically increasing identifier for a rendered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A notification as handed to the frontend for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Identifier the expiry callbacks refer back to.
    pub id: NotificationId,
    /// Notice content, untrusted plain text.
    pub message: String,
    /// Severity category; decides the toast color.
    pub category: Category,
    /// When the notification was shown, for the host's timestamp line.
    pub shown_at: DateTime<Utc>,
}

/// Visible and fade durations for notification expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    /// How long a toast stays fully visible.
    pub visible: Duration,
    /// Length of the fade-out transition before removal.
    pub fade: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(5000),
            fade: Duration::from_millis(300),
        }
    }
}

/// Shows notifications and schedules their expiry.
///
/// Must be used from within a tokio runtime: each `show` spawns a timer
/// task driving the fade and removal callbacks.
pub struct NotificationCenter {
    frontend: Arc<dyn Frontend>,
    timing: NotificationTiming,
    next_id: AtomicU64,
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("timing", &self.timing)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl NotificationCenter {
    /// Creates a center rendering through `frontend` with the given timing.
    #[must_use]
    pub fn new(frontend: Arc<dyn Frontend>, timing: NotificationTiming) -> Self {
        Self {
            frontend,
            timing,
            next_id: AtomicU64::new(1),
        }
    }

    /// Renders a notification and schedules its fade and removal.
    ///
    /// Returns the id assigned to the toast. The caller does not wait for
    /// expiry; the timer task runs on its own.
    pub fn show(&self, message: String, category: Category) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification {
            id,
            message,
            category,
            shown_at: Utc::now(),
        };
        self.frontend.show_notification(&notification);

        let frontend = Arc::clone(&self.frontend);
        let timing = self.timing;
        tokio::spawn(async move {
            tokio::time::sleep(timing.visible).await;
            frontend.begin_fade(id);
            tokio::time::sleep(timing.fade).await;
            frontend.remove_notification(id);
        });

        id
    }
}
