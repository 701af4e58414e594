//! The LED orchestrator.

use std::time::Duration;

use statuslight_types::{ChannelId, LedPattern, Reading, Timestamp};

use crate::aggregate::StatusAggregator;
use crate::channel::SharedChannel;
use crate::mapper::{IndicatorMapper, Mapping};
use crate::table::ChannelTable;
use crate::watchdog::{Verdict, Watchdog};

/// Staleness timeouts for the LED channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedConfig {
    pub battery_timeout: Duration,
    pub arm_timeout: Duration,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            battery_timeout: Duration::from_secs(5),
            arm_timeout: Duration::from_secs(5),
        }
    }
}

/// Everything the LED outputs should show after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedFrame {
    pub battery: LedPattern,
    pub arm: LedPattern,
    pub healthy: bool,
}

impl LedFrame {
    /// All LEDs off, health withdrawn.
    pub const OFF: LedFrame = LedFrame {
        battery: LedPattern::OFF,
        arm: LedPattern::OFF,
        healthy: false,
    };
}

/// Evaluates the battery and arm channels and selects their patterns.
///
/// ```rust
/// use statuslight_core::{ChannelTable, LedConfig, LedNode};
/// use statuslight_types::{Color, LedPattern, Reading, Timestamp};
///
/// let table = ChannelTable::new(Timestamp::ZERO);
/// let mut leds = LedNode::new(&table, LedConfig::default());
///
/// table.record(Reading::Battery(1), Timestamp::from_secs(1));
/// table.record(Reading::Armed(false), Timestamp::from_secs(1));
///
/// let frame = leds.tick(Timestamp::from_secs(1));
/// assert_eq!(frame.battery, LedPattern::solid(Color::Green));
/// assert!(frame.healthy);
/// ```
#[derive(Debug)]
pub struct LedNode {
    battery: Slot,
    arm: Slot,
    aggregator: StatusAggregator,
}

#[derive(Debug)]
struct Slot {
    channel: SharedChannel<Reading>,
    watchdog: Watchdog,
    mapper: IndicatorMapper,
}

impl Slot {
    fn tick(&mut self, now: Timestamp) -> (Verdict, Mapping) {
        let (verdict, value) = self.channel.with(|channel| {
            let verdict = self.watchdog.evaluate(channel, now);
            (verdict, channel.value().copied())
        });
        let mapping = self.mapper.map(value.as_ref(), verdict.is_fresh);
        (verdict, mapping)
    }
}

impl LedNode {
    pub fn new(table: &ChannelTable, config: LedConfig) -> Self {
        Self {
            battery: Slot {
                channel: table.channel(ChannelId::Battery).clone(),
                watchdog: Watchdog::new(ChannelId::Battery, config.battery_timeout),
                mapper: IndicatorMapper::battery(),
            },
            arm: Slot {
                channel: table.channel(ChannelId::Arm).clone(),
                watchdog: Watchdog::new(ChannelId::Arm, config.arm_timeout),
                mapper: IndicatorMapper::arm(),
            },
            aggregator: StatusAggregator::new(),
        }
    }

    /// Feed in freshness of a channel evaluated elsewhere, so it counts
    /// towards the composite health.
    pub fn observe(&mut self, channel: ChannelId, is_fresh: bool) {
        self.aggregator.observe(channel, is_fresh);
    }

    /// Evaluate both channels at `now`.
    pub fn tick(&mut self, now: Timestamp) -> LedFrame {
        let (battery_verdict, battery) = self.battery.tick(now);
        let (arm_verdict, arm) = self.arm.tick(now);

        self.aggregator.observe(ChannelId::Battery, battery_verdict.is_fresh);
        self.aggregator.observe(ChannelId::Arm, arm_verdict.is_fresh);

        LedFrame {
            battery: battery.pattern,
            arm: arm.pattern,
            healthy: self.aggregator.report(),
        }
    }

    /// Channels whose latest verdict was stale.
    pub fn stale_channels(&self) -> Vec<ChannelId> {
        self.aggregator.stale_channels()
    }

    /// The frame to show when shutting down.
    pub fn shutdown(&self) -> LedFrame {
        LedFrame::OFF
    }
}
