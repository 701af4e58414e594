//! The buzzer orchestrator.

use std::time::Duration;

use statuslight_types::{ChannelId, Reading, Timestamp, Tone};
use tracing::{debug, info, warn};

use crate::alert::{is_low_voltage, AlertDebouncer};
use crate::channel::SharedChannel;
use crate::table::ChannelTable;
use crate::watchdog::Watchdog;

/// Alert timing and threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuzzerConfig {
    /// Minimum spacing between two alarm beeps.
    pub min_interval: Duration,
    /// How long the cell voltage may go without updates before the alarm
    /// silences itself.
    pub source_timeout: Duration,
    /// Cell voltage below which the alarm is raised.
    pub low_cell_voltage: f32,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(2),
            source_timeout: Duration::from_secs(2),
            low_cell_voltage: 3.5,
        }
    }
}

/// Drives the buzzer from the cell voltage channel and button presses.
///
/// The low voltage alarm always takes priority; a button acknowledgement
/// is only played while the alarm is quiet.
#[derive(Debug)]
pub struct BuzzerNode {
    cell_voltage: SharedChannel<Reading>,
    watchdog: Watchdog,
    alert: AlertDebouncer,
    config: BuzzerConfig,
    source_fresh: bool,
}

impl BuzzerNode {
    pub fn new(table: &ChannelTable, config: BuzzerConfig, started_at: Timestamp) -> Self {
        Self {
            cell_voltage: table.channel(ChannelId::CellVoltage).clone(),
            watchdog: Watchdog::new(ChannelId::CellVoltage, config.source_timeout),
            alert: AlertDebouncer::new(started_at),
            config,
            source_fresh: true,
        }
    }

    /// Queue a short acknowledgement beep for a button press.
    pub fn button_pressed(&mut self) {
        if self.alert.is_alert_active() {
            debug!("Low voltage alarm active, dropping button acknowledgement");
        }
        self.alert.request_secondary();
    }

    /// Whether the cell voltage source was fresh at the last tick.
    pub fn source_fresh(&self) -> bool {
        self.source_fresh
    }

    pub fn is_alert_active(&self) -> bool {
        self.alert.is_alert_active()
    }

    /// Evaluate at `now` and return the tone to play, if any.
    pub fn tick(&mut self, now: Timestamp) -> Option<Tone> {
        let (verdict, sample) = self.cell_voltage.with(|channel| {
            let had_update = channel.has_pending_update();
            let verdict = self.watchdog.evaluate(channel, now);
            let sample = match (had_update, channel.value()) {
                (true, Some(Reading::CellVoltage(volts))) => {
                    Some((*volts, channel.last_update_time()))
                }
                _ => None,
            };
            (verdict, sample)
        });
        self.source_fresh = verdict.is_fresh;

        if let Some((volts, seen_at)) = sample {
            if !volts.is_finite() {
                warn!(volts = %volts, "Ignoring non-finite cell voltage");
            }
            let low = is_low_voltage(volts, self.config.low_cell_voltage);
            if low != self.alert.is_alert_active() {
                if low {
                    warn!(
                        volts = %volts,
                        threshold = %self.config.low_cell_voltage,
                        "Cell voltage below threshold"
                    );
                } else {
                    info!(volts = %volts, "Cell voltage back above threshold");
                }
            }
            self.alert.set_alert(low, seen_at);
        }

        let was_active = self.alert.is_alert_active();
        let fire = self
            .alert
            .tick(now, self.config.min_interval, self.config.source_timeout);
        if was_active && !self.alert.is_alert_active() {
            warn!("Cell voltage source stale, silencing low voltage alarm");
        }

        if fire {
            Some(Tone::LowVoltage)
        } else if self.alert.take_secondary() {
            Some(Tone::ButtonAck)
        } else {
            None
        }
    }
}
