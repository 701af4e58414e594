//! The control loop: routes events into channels and ticks the nodes.

use std::future::Future;
use std::sync::Arc;

use statuslight_core::{
    ButtonAction, ButtonDebouncer, BuzzerNode, ChannelTable, Clock, DriverError, LedFrame,
    LedNode, LedTarget,
};
use statuslight_types::{ChannelId, Timestamp, Tone, UpdateEvent};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::drivers::Outputs;
use crate::source::{EventSource, TimedEvent};

/// Why [`App::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The shutdown future completed (Ctrl-C in the binary).
    Shutdown,
    /// The event source reached end of input.
    SourceClosed,
}

/// Main application state.
///
/// Owns the channel table, both nodes, the button debouncer and the
/// outputs. All evaluation happens on the task that calls [`App::run`].
pub struct App<O: Outputs> {
    table: ChannelTable,
    leds: LedNode,
    buzzer: BuzzerNode,
    buttons: ButtonDebouncer,
    source: Box<dyn EventSource>,
    outputs: O,
    clock: Arc<dyn Clock>,
    config: AppConfig,
}

impl<O: Outputs> App<O> {
    /// Create the app. Every channel and guard window starts at the
    /// clock's current time.
    pub fn new(
        config: &AppConfig,
        source: Box<dyn EventSource>,
        outputs: O,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let started_at = clock.now();
        let table = ChannelTable::new(started_at);
        Self {
            leds: LedNode::new(&table, config.led),
            buzzer: BuzzerNode::new(&table, config.buzzer, started_at),
            buttons: ButtonDebouncer::new(config.gpios.clone(), config.guard_time, started_at),
            table,
            source,
            outputs,
            clock,
            config: config.clone(),
        }
    }

    /// Handle every event queued at the source. Returns how many were handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.source.poll() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Route one event: readings go into their channel, button edges
    /// through the debouncer.
    pub fn handle_event(&mut self, timed: TimedEvent) {
        if let Some(reading) = timed.event.reading() {
            debug!(channel = %reading.channel(), "Update received");
            self.table.record(reading, timed.at);
            return;
        }

        if let UpdateEvent::Button { gpio } = timed.event {
            self.button_pressed(gpio, timed.at);
        }
    }

    fn button_pressed(&mut self, gpio: u8, at: Timestamp) {
        let index = match self.buttons.press(gpio, at) {
            Ok(Some(index)) => index,
            Ok(None) => {
                debug!(gpio, "Button edge inside guard time");
                return;
            }
            Err(e) => {
                warn!(gpio, error = %e, "Ignoring button");
                return;
            }
        };

        self.buzzer.button_pressed();
        let action = ButtonAction::from_index(index);
        match action.arming_request() {
            Some(arm) => {
                if arm {
                    info!(gpio, "Trying to arm the vehicle");
                } else {
                    info!(gpio, "Trying to disarm the vehicle");
                }
                report("arming", self.outputs.request_arming(arm));
            }
            None => info!(gpio, button = index, "Unhandled button pressed"),
        }
    }

    /// Evaluate the LED channels at `now` and push the frame to the outputs.
    pub fn tick_leds(&mut self, now: Timestamp) -> LedFrame {
        self.leds
            .observe(ChannelId::CellVoltage, self.buzzer.source_fresh());
        let frame = self.leds.tick(now);
        self.show(frame);
        frame
    }

    /// Evaluate the buzzer at `now` and play the resulting tone, if any.
    pub fn tick_buzzer(&mut self, now: Timestamp) -> Option<Tone> {
        let tone = self.buzzer.tick(now);
        if let Some(tone) = tone {
            report("buzzer", self.outputs.play(tone));
        }
        tone
    }

    /// Drive every output to its quiescent state.
    pub fn shutdown(&mut self) {
        self.show(self.leds.shutdown());
    }

    fn show(&mut self, frame: LedFrame) {
        report(
            "battery led",
            self.outputs.show(LedTarget::Battery, frame.battery),
        );
        report("arm led", self.outputs.show(LedTarget::Arm, frame.arm));
        report("health", self.outputs.set_healthy(frame.healthy));
    }

    /// Tick both nodes at their configured rates until `shutdown`
    /// completes or the source closes, then go quiescent.
    ///
    /// Queued events are drained before every tick.
    pub async fn run<F>(&mut self, shutdown: F) -> StopReason
    where
        F: Future<Output = ()>,
    {
        let mut led_ticks = time::interval(self.config.led_period);
        led_ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut buzzer_ticks = time::interval(self.config.buzzer_period);
        buzzer_ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            source = self.source.description(),
            led_period_ms = self.config.led_period.as_millis() as u64,
            buzzer_period_ms = self.config.buzzer_period.as_millis() as u64,
            "Control loop started"
        );

        tokio::pin!(shutdown);
        let reason = loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break StopReason::Shutdown,
                _ = led_ticks.tick() => {
                    if self.drain_or_closed() {
                        break StopReason::SourceClosed;
                    }
                    let now = self.clock.now();
                    self.tick_leds(now);
                }
                _ = buzzer_ticks.tick() => {
                    if self.drain_or_closed() {
                        break StopReason::SourceClosed;
                    }
                    let now = self.clock.now();
                    self.tick_buzzer(now);
                }
            }
        };

        match reason {
            StopReason::Shutdown => info!("Shutting down"),
            StopReason::SourceClosed => match self.source.error() {
                Some(error) => info!(%error, "Update source closed"),
                None => info!("Update source closed"),
            },
        }
        self.shutdown();
        reason
    }

    fn drain_or_closed(&mut self) -> bool {
        self.drain();
        self.source.is_closed()
    }
}

fn report(output: &str, result: Result<(), DriverError>) {
    if let Err(e) = result {
        warn!(output, error = %e, "Driver failed");
    }
}
