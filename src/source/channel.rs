//! Channel-based event source.
//!
//! Receives already stamped events from an in-process producer, for
//! embedding the control loop next to another transport.

use tokio::sync::mpsc;

use super::{EventSource, TimedEvent};

/// An event source fed through an `mpsc` channel.
///
/// Producers stamp events themselves, with the same clock the control loop
/// ticks with.
///
/// # Example
///
/// ```
/// use statuslight::{ChannelSource, EventSource, TimedEvent};
/// use statuslight_types::{Timestamp, UpdateEvent};
///
/// let (tx, mut source) = ChannelSource::create("bridge");
/// tx.try_send(TimedEvent::new(UpdateEvent::Armed { armed: true }, Timestamp::ZERO))
///     .unwrap();
/// assert!(source.poll().is_some());
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::Receiver<TimedEvent>,
    description: String,
    closed: bool,
}

impl ChannelSource {
    /// Default queue depth for [`ChannelSource::create`].
    pub const CAPACITY: usize = 64;

    pub fn new(receiver: mpsc::Receiver<TimedEvent>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            closed: false,
        }
    }

    /// Create a sender and the source it feeds.
    pub fn create(source_description: &str) -> (mpsc::Sender<TimedEvent>, Self) {
        let (tx, rx) = mpsc::channel(Self::CAPACITY);
        (tx, Self::new(rx, source_description))
    }
}

impl EventSource for ChannelSource {
    fn poll(&mut self) -> Option<TimedEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        None
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuslight_types::{Timestamp, UpdateEvent};

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());

        let event = TimedEvent::new(UpdateEvent::Battery { code: 2 }, Timestamp::from_secs(1));
        tx.try_send(event).unwrap();
        assert_eq!(source.poll(), Some(event));
        assert!(source.poll().is_none());
        assert!(!source.is_closed());
    }

    #[test]
    fn test_channel_source_drains_before_closing() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.try_send(TimedEvent::new(UpdateEvent::Button { gpio: 4 }, Timestamp::ZERO))
            .unwrap();
        drop(tx);

        assert!(source.poll().is_some());
        assert!(source.poll().is_none());
        assert!(source.is_closed());
        assert_eq!(source.description(), "channel: test");
    }
}
