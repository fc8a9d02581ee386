//! Channel filter for refresh routing.
//!
//! Tracks which broadcast channels this client has subscribed to and
//! decides whether an inbound refresh applies. The dashboard server marks
//! site-wide broadcasts with the wildcard channel `"all"`, which matches
//! every client regardless of its subscriptions.

use std::collections::HashSet;

/// Wildcard channel name used by the server for site-wide broadcasts.
pub const WILDCARD_CHANNEL: &str = "all";

/// The set of channels a single client listens on.
#[derive(Debug, Default)]
pub struct ChannelFilter {
    /// Explicitly subscribed channel names.
    channels: HashSet<String>,
}

impl ChannelFilter {
    /// Creates an empty filter. Only wildcard broadcasts match it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter subscribed to the given channels.
    #[must_use]
    pub fn subscribed_to<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds a channel to the subscription set.
    pub fn subscribe(&mut self, channel: impl Into<String>) {
        self.channels.insert(channel.into());
    }

    /// Returns `true` if an inbound message on `channel` applies to this
    /// client: either the wildcard `"all"` or an explicitly subscribed
    /// channel.
    #[must_use]
    pub fn matches(&self, channel: &str) -> bool {
        channel == WILDCARD_CHANNEL || self.channels.contains(channel)
    }

    /// Returns the number of explicitly subscribed channels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.channels.len()
    }
}
