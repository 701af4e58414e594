//! Rate limiting for repeating alert actions.

use std::time::Duration;

use statuslight_types::Timestamp;

/// Whether a cell voltage is low enough to raise the alarm.
///
/// Non-finite readings never raise it.
pub fn is_low_voltage(volts: f32, threshold: f32) -> bool {
    volts.is_finite() && volts < threshold
}

/// Gates a boolean alert so its action repeats at most once per interval.
///
/// The alert condition is set by whoever evaluates the source data (for
/// example "lowest cell voltage below threshold"). If that source stops
/// updating, [`tick`](Self::tick) silences the alert instead of ringing on
/// stale data.
///
/// A lower-priority one-shot action may be queued with
/// [`request_secondary`](Self::request_secondary); it is dropped while the
/// alert is active.
///
/// ```rust
/// use statuslight_core::AlertDebouncer;
/// use statuslight_types::Timestamp;
/// use std::time::Duration;
///
/// let interval = Duration::from_secs(2);
/// let source_timeout = Duration::from_secs(2);
/// let mut alert = AlertDebouncer::new(Timestamp::ZERO);
///
/// alert.set_alert(true, Timestamp::ZERO);
/// assert!(alert.tick(Timestamp::ZERO, interval, source_timeout));
/// assert!(!alert.tick(Timestamp::from_millis(1000), interval, source_timeout));
/// ```
#[derive(Debug, Clone)]
pub struct AlertDebouncer {
    alert_active: bool,
    source_last_seen: Timestamp,
    last_action_time: Option<Timestamp>,
    secondary_pending: bool,
}

impl AlertDebouncer {
    /// Create an inactive debouncer whose source was last seen at `created_at`.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            alert_active: false,
            source_last_seen: created_at,
            last_action_time: None,
            secondary_pending: false,
        }
    }

    /// Update the alert condition from a source sample taken at `seen_at`.
    pub fn set_alert(&mut self, active: bool, seen_at: Timestamp) {
        self.alert_active = active;
        self.source_last_seen = seen_at;
        if active {
            self.secondary_pending = false;
        }
    }

    pub fn is_alert_active(&self) -> bool {
        self.alert_active
    }

    pub fn source_last_seen(&self) -> Timestamp {
        self.source_last_seen
    }

    /// Decide whether the alert action fires at `now`.
    pub fn tick(&mut self, now: Timestamp, min_interval: Duration, source_timeout: Duration) -> bool {
        if now.saturating_duration_since(self.source_last_seen) > source_timeout {
            self.alert_active = false;
            return false;
        }

        if !self.alert_active {
            return false;
        }

        let due = match self.last_action_time {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= min_interval,
        };
        if due {
            self.last_action_time = Some(now);
        }
        due
    }

    /// Ask for a one-shot secondary action.
    ///
    /// Ignored while the alert is active.
    pub fn request_secondary(&mut self) {
        if !self.alert_active {
            self.secondary_pending = true;
        }
    }

    /// Take a pending secondary request, if the alert is not active.
    pub fn take_secondary(&mut self) -> bool {
        if self.alert_active {
            self.secondary_pending = false;
            return false;
        }
        std::mem::take(&mut self.secondary_pending)
    }
}
