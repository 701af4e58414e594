//! Per-channel state.

use std::sync::Arc;

use parking_lot::Mutex;
use statuslight_types::Timestamp;

/// State of one monitored signal.
///
/// A channel starts with no value and a `last_update_time` equal to its
/// creation time, so it only counts as fresh until its first timeout
/// elapses. `timed_out` is latched by the [watchdog](crate::watchdog) and
/// can only be cleared by the evaluation that consumes a new update.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel<V> {
    value: Option<V>,
    last_update_time: Timestamp,
    has_pending_update: bool,
    timed_out: bool,
}

impl<V> Channel<V> {
    /// Create an empty channel at `created_at`.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            value: None,
            last_update_time: created_at,
            has_pending_update: false,
            timed_out: false,
        }
    }

    /// Store a new value received at `now`.
    pub fn record_update(&mut self, value: V, now: Timestamp) {
        self.value = Some(value);
        self.last_update_time = now;
        self.has_pending_update = true;
    }

    /// The latest value and whether the channel is currently timed out.
    pub fn peek(&self) -> (Option<&V>, bool) {
        (self.value.as_ref(), self.timed_out)
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn last_update_time(&self) -> Timestamp {
        self.last_update_time
    }

    pub fn has_pending_update(&self) -> bool {
        self.has_pending_update
    }

    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    /// Consume the pending-update flag, returning whether it was set.
    pub(crate) fn take_pending_update(&mut self) -> bool {
        std::mem::take(&mut self.has_pending_update)
    }

    pub(crate) fn set_timed_out(&mut self, timed_out: bool) {
        self.timed_out = timed_out;
    }
}

/// A [`Channel`] shared between update producers and the tick.
///
/// The whole channel sits behind one mutex, so an update and an
/// evaluation never interleave partially.
#[derive(Debug)]
pub struct SharedChannel<V> {
    inner: Arc<Mutex<Channel<V>>>,
}

impl<V> Clone for SharedChannel<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V> SharedChannel<V> {
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Channel::new(created_at))),
        }
    }

    /// Record an update under the channel lock.
    pub fn record_update(&self, value: V, now: Timestamp) {
        self.inner.lock().record_update(value, now);
    }

    /// Run `f` with exclusive access to the channel.
    ///
    /// Keep `f` short: producers block on the same lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut Channel<V>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Copy out the current channel state.
    pub fn snapshot(&self) -> Channel<V>
    where
        V: Clone,
    {
        self.inner.lock().clone()
    }
}
