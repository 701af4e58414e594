//! Event source abstraction for receiving update events.
//!
//! Sources deliver [`TimedEvent`]s from a transport (stdin, a TCP
//! connection, an in-process channel). Events are stamped when they arrive,
//! not when the control loop gets around to them.

mod channel;
mod stream;

pub use channel::ChannelSource;
pub use stream::StreamSource;

use std::fmt::Debug;

use statuslight_types::{Timestamp, UpdateEvent};

/// An update event together with its arrival time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub at: Timestamp,
    pub event: UpdateEvent,
}

impl TimedEvent {
    pub fn new(event: UpdateEvent, at: Timestamp) -> Self {
        Self { at, event }
    }
}

/// Trait for receiving update events from various transports.
///
/// # Example
///
/// ```
/// use statuslight::{ChannelSource, EventSource};
///
/// let (_tx, mut source) = ChannelSource::create("example");
/// assert!(source.poll().is_none());
/// ```
pub trait EventSource: Send + Debug {
    /// Take the next queued event without blocking.
    fn poll(&mut self) -> Option<TimedEvent>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// The last transport or parse error, if any.
    fn error(&self) -> Option<String>;

    /// Whether the producer side has gone away and nothing is left to poll.
    fn is_closed(&self) -> bool;
}
