//! Stream-based event source.
//!
//! Receives update events as newline-delimited JSON from an async byte
//! stream, such as stdin or a TCP connection.

use std::sync::{Arc, Mutex, PoisonError};

use statuslight_core::Clock;
use statuslight_types::UpdateEvent;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{EventSource, TimedEvent};

/// An event source fed by a background task reading JSON lines.
///
/// Every line is one [`UpdateEvent`], e.g. `{"type":"battery","code":1}`.
/// Blank lines are skipped; lines that fail to parse are logged and
/// dropped without stopping the stream.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use std::sync::Arc;
/// use statuslight::StreamSource;
/// use statuslight_core::MonotonicClock;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"type\":\"armed\",\"armed\":true}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example", Arc::new(MonotonicClock::new()));
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<TimedEvent>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
    closed: bool,
}

impl StreamSource {
    /// Spawn a background task that reads from `reader`, stamping each
    /// event with `clock` as it is parsed.
    pub fn spawn<R>(reader: R, description: &str, clock: Arc<dyn Clock>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(64);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();
        let desc = description.to_string();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        debug!(source = %desc, "End of input");
                        break;
                    }
                    Ok(_) => {
                        let text = line.trim();
                        if text.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<UpdateEvent>(text) {
                            Ok(event) => {
                                set_error(&error_handle, None);
                                let timed = TimedEvent::new(event, clock.now());
                                if tx.send(timed).await.is_err() {
                                    // Receiver dropped
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!(source = %desc, error = %e, "Dropping malformed update");
                                set_error(&error_handle, Some(format!("Parse error: {}", e)));
                            }
                        }
                    }
                    Err(e) => {
                        warn!(source = %desc, error = %e, "Read failed");
                        set_error(&error_handle, Some(format!("Read error: {}", e)));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
            closed: false,
        }
    }
}

fn set_error(slot: &Mutex<Option<String>>, error: Option<String>) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = error;
}

impl EventSource for StreamSource {
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
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuslight_core::ManualClock;
    use statuslight_types::Timestamp;
    use std::io::Cursor;
    use std::time::Duration;

    fn clock_at(secs: u64) -> Arc<dyn Clock> {
        let clock = ManualClock::new();
        clock.set(Timestamp::from_secs(secs));
        Arc::new(clock)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_stream_source_parses_lines() {
        let data = concat!(
            r#"{"type":"battery","code":1}"#,
            "\n",
            r#"{"type":"button","gpio":17}"#,
            "\n"
        );
        let mut source = StreamSource::spawn(Cursor::new(data), "test", clock_at(3));
        settle().await;

        let first = source.poll().unwrap();
        assert_eq!(first.event, UpdateEvent::Battery { code: 1 });
        assert_eq!(first.at, Timestamp::from_secs(3));

        let second = source.poll().unwrap();
        assert_eq!(second.event, UpdateEvent::Button { gpio: 17 });
    }

    #[tokio::test]
    async fn test_stream_source_skips_bad_lines() {
        let data = concat!(
            "not valid json\n",
            "\n",
            r#"{"type":"cell_voltage","volts":3.7}"#,
            "\n",
            r#"{"type":"gps","fix":true}"#,
            "\n"
        );
        let mut source = StreamSource::spawn(Cursor::new(data), "test", clock_at(0));
        settle().await;

        let event = source.poll().unwrap();
        assert_eq!(event.event, UpdateEvent::CellVoltage { volts: 3.7 });
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().starts_with("Parse error"));
    }

    #[tokio::test]
    async fn test_stream_source_closes_at_eof() {
        let mut source = StreamSource::spawn(Cursor::new(""), "test", clock_at(0));
        settle().await;

        assert!(!source.is_closed());
        assert!(source.poll().is_none());
        assert!(source.is_closed());
    }

    #[tokio::test]
    async fn test_stream_source_description() {
        let source = StreamSource::spawn(Cursor::new(""), "127.0.0.1:9000", clock_at(0));
        assert_eq!(source.description(), "stream: 127.0.0.1:9000");
    }
}
