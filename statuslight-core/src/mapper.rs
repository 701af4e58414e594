//! Mapping channel values to LED patterns.
//!
//! A mapper is built from a fixed classification function and two
//! fallback patterns: `undefined` (stale channel, nothing received yet, or
//! a fresh channel that explicitly reports no data) and `unhandled` (a
//! value outside the channel's domain). The reason for a fallback is
//! logged once when it begins, not on every tick. Staleness itself is
//! logged by the watchdog.

use statuslight_types::{BatteryStatus, ChannelId, Color, LedPattern, Reading};
use tracing::{debug, error, info, warn};

use crate::error::StatusError;

/// What a value means for the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A recognized value with its pattern.
    Known(LedPattern),
    /// Nothing has been received on the channel yet.
    NoData,
    /// Data is arriving but says it has nothing to report.
    Unavailable,
    /// A value outside the expected domain, with its raw form.
    Unrecognized(i64),
}

/// Why a fallback pattern was chosen.
///
/// Staleness has no notice here: the watchdog reports that edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The channel has not received anything since startup.
    NoData,
    /// The channel is fresh but reports no usable value.
    Unavailable,
    /// The channel delivered a value it should not have.
    Unrecognized(StatusError),
}

/// The pattern selected for one tick.
///
/// `notice` is set only on the tick where a new fallback reason starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub pattern: LedPattern,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cause {
    Value,
    Stale,
    NoData,
    Unavailable,
    Unrecognized(i64),
}

/// Maps a channel's value and freshness to an LED pattern.
#[derive(Debug, Clone)]
pub struct IndicatorMapper {
    channel: ChannelId,
    classify: fn(Option<&Reading>) -> Classification,
    undefined: LedPattern,
    unhandled: LedPattern,
    last_cause: Option<Cause>,
}

impl IndicatorMapper {
    pub fn new(
        channel: ChannelId,
        classify: fn(Option<&Reading>) -> Classification,
        undefined: LedPattern,
        unhandled: LedPattern,
    ) -> Self {
        Self {
            channel,
            classify,
            undefined,
            unhandled,
            last_cause: None,
        }
    }

    /// Mapper for the battery status LED.
    pub fn battery() -> Self {
        Self::new(
            ChannelId::Battery,
            classify_battery,
            LedPattern::slow(Color::White),
            LedPattern::fast(Color::Magenta),
        )
    }

    /// Mapper for the arm state LED.
    pub fn arm() -> Self {
        Self::new(
            ChannelId::Arm,
            classify_arm,
            LedPattern::slow(Color::White),
            LedPattern::fast(Color::Magenta),
        )
    }

    pub fn undefined(&self) -> LedPattern {
        self.undefined
    }

    pub fn unhandled(&self) -> LedPattern {
        self.unhandled
    }

    /// Select the pattern for `value`.
    ///
    /// A stale channel always shows `undefined`, whatever its last value.
    pub fn map(&mut self, value: Option<&Reading>, is_fresh: bool) -> Mapping {
        let (pattern, cause) = if !is_fresh {
            (self.undefined, Cause::Stale)
        } else {
            match (self.classify)(value) {
                Classification::Known(pattern) => (pattern, Cause::Value),
                Classification::NoData => (self.undefined, Cause::NoData),
                Classification::Unavailable => (self.undefined, Cause::Unavailable),
                Classification::Unrecognized(raw) => (self.unhandled, Cause::Unrecognized(raw)),
            }
        };

        let notice = if self.last_cause == Some(cause) {
            None
        } else {
            self.last_cause = Some(cause);
            self.notice_for(cause)
        };

        Mapping { pattern, notice }
    }

    fn notice_for(&self, cause: Cause) -> Option<Notice> {
        match cause {
            Cause::Value => None,
            Cause::Stale => {
                debug!(channel = %self.channel, "Showing undefined pattern for stale channel");
                None
            }
            Cause::NoData => {
                info!(channel = %self.channel, "No data received yet, showing undefined pattern");
                Some(Notice::NoData)
            }
            Cause::Unavailable => {
                warn!(channel = %self.channel, "Source reports value unavailable, showing undefined pattern");
                Some(Notice::Unavailable)
            }
            Cause::Unrecognized(raw) => {
                let err = StatusError::UnrecognizedValue {
                    channel: self.channel,
                    raw,
                };
                error!(channel = %self.channel, raw, error = %err, "Cannot classify value");
                Some(Notice::Unrecognized(err))
            }
        }
    }
}

/// Battery status lookup.
pub fn classify_battery(value: Option<&Reading>) -> Classification {
    let code = match value {
        Some(Reading::Battery(code)) => *code,
        Some(_) => return Classification::Unavailable,
        None => return Classification::NoData,
    };
    match BatteryStatus::try_from(code) {
        Ok(BatteryStatus::Unavailable) => Classification::Unavailable,
        Ok(BatteryStatus::Good) => Classification::Known(LedPattern::solid(Color::Green)),
        Ok(BatteryStatus::Charging) => Classification::Known(LedPattern::slow(Color::Green)),
        Ok(BatteryStatus::Low) => Classification::Known(LedPattern::slow(Color::Yellow)),
        Ok(BatteryStatus::Critical) => Classification::Known(LedPattern::fast(Color::Red)),
        Err(unknown) => Classification::Unrecognized(i64::from(unknown.0)),
    }
}

/// Arm state lookup.
pub fn classify_arm(value: Option<&Reading>) -> Classification {
    match value {
        Some(Reading::Armed(true)) => Classification::Known(LedPattern::solid(Color::Red)),
        Some(Reading::Armed(false)) => Classification::Known(LedPattern::solid(Color::Green)),
        Some(_) => Classification::Unavailable,
        None => Classification::NoData,
    }
}
