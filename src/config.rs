//! Link configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults matching the dashboard
//! server's stock deployment.

use std::time::Duration;

use crate::domain::ClientId;
use crate::ui::NotificationTiming;
use crate::ws::backoff::RetryPolicy;

/// Top-level link configuration.
///
/// Loaded once at startup via [`LinkConfig::from_env`], or built directly
/// by hosts that manage their own settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Dashboard server host name or address.
    pub host: String,

    /// Dashboard server WebSocket port.
    pub port: u16,

    /// Use `wss://` instead of `ws://`. Secure iff the hosting page is
    /// served over a secure scheme.
    pub secure: bool,

    /// Page name announced in the registration message.
    pub page: String,

    /// Broadcast channel subscribed to after every (re)connect.
    pub channel: String,

    /// Render target that data updates must name to be applied.
    pub target: String,

    /// Delay before the first reconnect attempt, in milliseconds.
    /// Doubles with each further attempt.
    pub reconnect_base_delay_ms: u64,

    /// Reconnect attempts before the terminal disconnect.
    pub max_reconnect_attempts: u32,

    /// How long a notification toast stays fully visible, in milliseconds.
    pub notify_visible_ms: u64,

    /// Length of a toast's fade-out transition, in milliseconds.
    pub notify_fade_ms: u64,

    /// Console frontend only: answer given to non-forced refresh prompts.
    pub auto_confirm_refresh: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            secure: false,
            page: "inventory".to_string(),
            channel: "inventory".to_string(),
            target: "inventory-table".to_string(),
            reconnect_base_delay_ms: 1000,
            max_reconnect_attempts: 5,
            notify_visible_ms: 5000,
            notify_fade_ms: 300,
            auto_confirm_refresh: false,
        }
    }
}

impl LinkConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the defaults above when a variable is not set or does
    /// not parse. Calls `dotenvy::dotenv().ok()` to optionally load a
    /// `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            host: std::env::var("WS_HOST").unwrap_or(defaults.host),
            port: parse_env("WS_PORT", defaults.port),
            secure: parse_env_bool("WS_SECURE", defaults.secure),
            page: std::env::var("WS_PAGE").unwrap_or(defaults.page),
            channel: std::env::var("WS_CHANNEL").unwrap_or(defaults.channel),
            target: std::env::var("WS_TARGET").unwrap_or(defaults.target),
            reconnect_base_delay_ms: parse_env(
                "WS_RECONNECT_BASE_DELAY_MS",
                defaults.reconnect_base_delay_ms,
            ),
            max_reconnect_attempts: parse_env(
                "WS_MAX_RECONNECT_ATTEMPTS",
                defaults.max_reconnect_attempts,
            ),
            notify_visible_ms: parse_env("WS_NOTIFY_VISIBLE_MS", defaults.notify_visible_ms),
            notify_fade_ms: parse_env("WS_NOTIFY_FADE_MS", defaults.notify_fade_ms),
            auto_confirm_refresh: parse_env_bool(
                "WS_AUTO_CONFIRM_REFRESH",
                defaults.auto_confirm_refresh,
            ),
        }
    }

    /// Returns the WebSocket URL for a client session: the scheme follows
    /// [`LinkConfig::secure`] and the client identity is embedded in the
    /// path.
    #[must_use]
    pub fn endpoint(&self, client_id: &ClientId) -> String {
        format!(
            "{}://{}:{}/ws/{}",
            self.scheme(),
            self.host,
            self.port,
            client_id
        )
    }

    /// Returns the WebSocket URL publishers use to inject dashboard events.
    #[must_use]
    pub fn trigger_endpoint(&self) -> String {
        format!("{}://{}:{}/ws/trigger", self.scheme(), self.host, self.port)
    }

    /// Returns the reconnect backoff policy derived from this config.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_millis(self.reconnect_base_delay_ms),
            self.max_reconnect_attempts,
        )
    }

    /// Returns the notification expiry timing derived from this config.
    #[must_use]
    pub fn notification_timing(&self) -> NotificationTiming {
        NotificationTiming {
            visible: Duration::from_millis(self.notify_visible_ms),
            fade: Duration::from_millis(self.notify_fade_ms),
        }
    }

    fn scheme(&self) -> &'static str {
        if self.secure { "wss" } else { "ws" }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_deployment() {
        let config = LinkConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.channel, "inventory");
        assert_eq!(config.target, "inventory-table");
        assert_eq!(config.reconnect_base_delay_ms, 1000);
        assert_eq!(config.max_reconnect_attempts, 5);
        assert_eq!(config.notify_visible_ms, 5000);
        assert_eq!(config.notify_fade_ms, 300);
        assert!(!config.secure);
    }

    #[test]
    fn endpoint_embeds_client_id() {
        let config = LinkConfig::default();
        let id = ClientId::new();
        let url = config.endpoint(&id);
        assert_eq!(url, format!("ws://127.0.0.1:8000/ws/{id}"));
    }

    #[test]
    fn secure_config_uses_wss() {
        let config = LinkConfig {
            secure: true,
            host: "dash.example.com".to_string(),
            port: 443,
            ..LinkConfig::default()
        };
        let url = config.endpoint(&ClientId::new());
        assert!(url.starts_with("wss://dash.example.com:443/ws/"));
        assert_eq!(
            config.trigger_endpoint(),
            "wss://dash.example.com:443/ws/trigger"
        );
    }

    #[test]
    fn retry_policy_reflects_config() {
        let config = LinkConfig {
            reconnect_base_delay_ms: 250,
            max_reconnect_attempts: 3,
            ..LinkConfig::default()
        };
        let policy = config.retry_policy();
        assert_eq!(policy.base_delay, Duration::from_millis(250));
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(1000));
    }

    #[test]
    fn notification_timing_reflects_config() {
        let timing = LinkConfig::default().notification_timing();
        assert_eq!(timing.visible, Duration::from_millis(5000));
        assert_eq!(timing.fade, Duration::from_millis(300));
    }
}
