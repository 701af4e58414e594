//! Staleness detection with edge-triggered transitions.
//!
//! [`evaluate`] is the pure state machine; [`Watchdog`] binds it to a
//! channel identity and timeout and logs each transition exactly once.

use std::time::Duration;

use statuslight_types::{ChannelId, Timestamp};
use tracing::{info, warn};

use crate::channel::Channel;

/// Edge reported by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// The channel just exceeded its timeout.
    NewlyStale,
    /// A stale channel received an update.
    Recovered,
}

/// Result of evaluating a channel at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_fresh: bool,
    pub transition: Transition,
}

impl Verdict {
    const FRESH: Verdict = Verdict {
        is_fresh: true,
        transition: Transition::None,
    };
}

/// Evaluate `channel` against `timeout` at `now`.
///
/// A pending update always wins, even if `now` is already past the
/// timeout: an update recorded before this call arrived "this tick".
/// The channel becomes stale only once `now - last_update_time` is
/// strictly greater than `timeout`.
///
/// ```rust
/// use statuslight_core::{evaluate, Channel, Transition};
/// use statuslight_types::Timestamp;
/// use std::time::Duration;
///
/// let timeout = Duration::from_secs(5);
/// let mut channel = Channel::new(Timestamp::ZERO);
/// channel.record_update('A', Timestamp::ZERO);
///
/// let v = evaluate(&mut channel, Timestamp::from_millis(5100), timeout);
/// assert!(v.is_fresh);
///
/// let v = evaluate(&mut channel, Timestamp::from_millis(5100), timeout);
/// assert_eq!(v.transition, Transition::NewlyStale);
/// ```
pub fn evaluate<V>(channel: &mut Channel<V>, now: Timestamp, timeout: Duration) -> Verdict {
    if channel.take_pending_update() {
        if channel.is_timed_out() {
            channel.set_timed_out(false);
            return Verdict {
                is_fresh: true,
                transition: Transition::Recovered,
            };
        }
        return Verdict::FRESH;
    }

    if now.saturating_duration_since(channel.last_update_time()) > timeout {
        let transition = if channel.is_timed_out() {
            Transition::None
        } else {
            channel.set_timed_out(true);
            Transition::NewlyStale
        };
        return Verdict {
            is_fresh: false,
            transition,
        };
    }

    // Within the timeout but still latched: only an update may clear it.
    if channel.is_timed_out() {
        return Verdict {
            is_fresh: false,
            transition: Transition::None,
        };
    }

    Verdict::FRESH
}

/// A staleness watchdog for one channel.
#[derive(Debug, Clone)]
pub struct Watchdog {
    channel: ChannelId,
    timeout: Duration,
}

impl Watchdog {
    pub fn new(channel: ChannelId, timeout: Duration) -> Self {
        Self { channel, timeout }
    }

    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Evaluate the channel and log the transition, if any.
    pub fn evaluate<V>(&self, channel: &mut Channel<V>, now: Timestamp) -> Verdict {
        let verdict = evaluate(channel, now, self.timeout);
        match verdict.transition {
            Transition::NewlyStale => {
                let silent_for = now.saturating_duration_since(channel.last_update_time());
                warn!(
                    channel = %self.channel,
                    silent_ms = silent_for.as_millis() as u64,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "No update received within timeout, channel is stale"
                );
            }
            Transition::Recovered => {
                info!(channel = %self.channel, "Received update, channel recovered");
            }
            Transition::None => {}
        }
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn secs(s: f64) -> Timestamp {
        Timestamp::from_secs_f64(s)
    }

    #[test]
    fn test_scenario_fresh_stale_recovered() {
        let mut channel = Channel::new(Timestamp::ZERO);
        channel.record_update('A', secs(0.0));
        // The startup tick consumes the first update.
        assert_eq!(evaluate(&mut channel, secs(0.0), TIMEOUT), Verdict::FRESH);

        assert_eq!(
            evaluate(&mut channel, secs(4.9), TIMEOUT),
            Verdict {
                is_fresh: true,
                transition: Transition::None
            }
        );
        assert_eq!(
            evaluate(&mut channel, secs(5.1), TIMEOUT),
            Verdict {
                is_fresh: false,
                transition: Transition::NewlyStale
            }
        );

        channel.record_update('B', secs(6.0));
        assert_eq!(
            evaluate(&mut channel, secs(6.0), TIMEOUT),
            Verdict {
                is_fresh: true,
                transition: Transition::Recovered
            }
        );
        assert_eq!(channel.value(), Some(&'B'));
    }

    #[test]
    fn test_exactly_at_timeout_is_still_fresh() {
        let mut channel: Channel<u8> = Channel::new(Timestamp::ZERO);
        assert!(evaluate(&mut channel, secs(5.0), TIMEOUT).is_fresh);
        assert!(!evaluate(&mut channel, Timestamp::from_micros(5_000_001), TIMEOUT).is_fresh);
    }

    #[test]
    fn test_staleness_is_monotone_without_updates() {
        let mut channel: Channel<u8> = Channel::new(Timestamp::ZERO);
        assert_eq!(
            evaluate(&mut channel, secs(5.5), TIMEOUT).transition,
            Transition::NewlyStale
        );

        for step in 1..200 {
            let now = secs(5.5) + Duration::from_millis(step * 200);
            let verdict = evaluate(&mut channel, now, TIMEOUT);
            assert!(!verdict.is_fresh);
            assert!(channel.is_timed_out());
            assert_eq!(verdict.transition, Transition::None);
        }
    }

    #[test]
    fn test_newly_stale_fires_once_over_many_ticks() {
        let mut channel = Channel::new(Timestamp::ZERO);
        channel.record_update(1u8, Timestamp::ZERO);

        let fired = (0..100)
            .map(|i| evaluate(&mut channel, Timestamp::from_millis(i * 200), TIMEOUT))
            .filter(|v| v.transition == Transition::NewlyStale)
            .count();

        assert_eq!(fired, 1);
    }

    #[test]
    fn test_newly_stale_fires_at_first_tick_past_timeout() {
        let mut channel = Channel::new(Timestamp::ZERO);
        channel.record_update(1u8, Timestamp::ZERO);

        let first = (0..100)
            .map(|i| Timestamp::from_millis(i * 200))
            .find(|&now| evaluate(&mut channel, now, TIMEOUT).transition == Transition::NewlyStale);

        assert_eq!(first, Some(Timestamp::from_millis(5200)));
    }

    #[test]
    fn test_evaluation_is_idempotent_within_a_tick() {
        let mut channel: Channel<u8> = Channel::new(Timestamp::ZERO);
        let now = secs(7.0);

        assert_eq!(evaluate(&mut channel, now, TIMEOUT).transition, Transition::NewlyStale);
        assert_eq!(evaluate(&mut channel, now, TIMEOUT).transition, Transition::None);
    }

    #[test]
    fn test_recovery_fires_exactly_once() {
        let mut channel: Channel<u8> = Channel::new(Timestamp::ZERO);
        evaluate(&mut channel, secs(6.0), TIMEOUT);
        channel.record_update(3, secs(6.5));

        assert_eq!(evaluate(&mut channel, secs(6.6), TIMEOUT).transition, Transition::Recovered);
        assert_eq!(evaluate(&mut channel, secs(6.7), TIMEOUT).transition, Transition::None);
        assert!(!channel.is_timed_out());
    }

    #[test]
    fn test_pending_update_wins_over_late_evaluation() {
        let mut channel: Channel<u8> = Channel::new(Timestamp::ZERO);
        channel.record_update(1, secs(0.0));

        // Evaluated long after the update, but the update is still pending.
        let verdict = evaluate(&mut channel, secs(60.0), TIMEOUT);
        assert!(verdict.is_fresh);

        let verdict = evaluate(&mut channel, secs(60.0), TIMEOUT);
        assert_eq!(verdict.transition, Transition::NewlyStale);
    }

    #[test]
    fn test_stale_update_that_is_itself_old_recovers_then_goes_stale_again() {
        let mut channel: Channel<u8> = Channel::new(Timestamp::ZERO);
        evaluate(&mut channel, secs(6.0), TIMEOUT);
        channel.record_update(2, secs(6.0));

        assert_eq!(evaluate(&mut channel, secs(6.2), TIMEOUT).transition, Transition::Recovered);
        assert_eq!(evaluate(&mut channel, secs(11.2), TIMEOUT).transition, Transition::NewlyStale);
    }

    #[test]
    fn test_watchdog_reports_same_verdicts_as_evaluate() {
        let watchdog = Watchdog::new(ChannelId::Battery, TIMEOUT);
        let mut channel: Channel<u8> = Channel::new(Timestamp::ZERO);

        assert_eq!(watchdog.channel(), ChannelId::Battery);
        assert_eq!(watchdog.timeout(), TIMEOUT);
        assert_eq!(watchdog.evaluate(&mut channel, secs(5.1)).transition, Transition::NewlyStale);
        assert!(!watchdog.evaluate(&mut channel, secs(5.2)).is_fresh);
    }
}
