//! Composite health across channels.

use std::collections::BTreeMap;

use statuslight_types::ChannelId;
use tracing::{info, warn};

/// Fold per-channel freshness into one health flag.
///
/// Any stale channel makes the whole system unhealthy; there is no partial
/// credit. An empty input is healthy.
pub fn combine<I>(freshness: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    freshness.into_iter().all(|fresh| fresh)
}

/// Tracks the latest freshness of every observed channel.
///
/// Channels may be evaluated at different rates; the aggregator keeps the
/// most recent verdict of each and logs when the composite flips.
#[derive(Debug, Default)]
pub struct StatusAggregator {
    freshness: BTreeMap<ChannelId, bool>,
    last_reported: Option<bool>,
}

impl StatusAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest freshness verdict for a channel.
    pub fn observe(&mut self, channel: ChannelId, is_fresh: bool) {
        self.freshness.insert(channel, is_fresh);
    }

    /// The current composite health.
    pub fn composite(&self) -> bool {
        combine(self.freshness.values().copied())
    }

    /// Channels whose latest verdict was stale.
    pub fn stale_channels(&self) -> Vec<ChannelId> {
        self.freshness
            .iter()
            .filter(|(_, fresh)| !**fresh)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Compute the composite and log it if it changed since the last report.
    pub fn report(&mut self) -> bool {
        let healthy = self.composite();
        if self.last_reported != Some(healthy) {
            if healthy {
                info!("All channels fresh, system healthy");
            } else {
                let stale: Vec<&str> = self.stale_channels().iter().map(|c| c.name()).collect();
                warn!(stale = ?stale, "System unhealthy");
            }
            self.last_reported = Some(healthy);
        }
        healthy
    }
}
