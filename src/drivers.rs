//! Output drivers for the host binary.
//!
//! The host has no LED, buzzer or arming hardware of its own, so
//! [`LogDrivers`] reports every commanded change through `tracing`.

use std::collections::BTreeMap;

use statuslight_core::{
    ArmingClient, BuzzerDriver, DriverError, HealthIndicator, LedDriver, LedTarget,
};
use statuslight_types::{LedPattern, Tone};
use tracing::info;

/// Everything the control loop drives.
pub trait Outputs: LedDriver + HealthIndicator + BuzzerDriver + ArmingClient {}

impl<T> Outputs for T where T: LedDriver + HealthIndicator + BuzzerDriver + ArmingClient {}

/// Drivers that log commanded state, only when it changes.
#[derive(Debug, Default)]
pub struct LogDrivers {
    leds: BTreeMap<LedTarget, LedPattern>,
    healthy: Option<bool>,
}

impl LogDrivers {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pattern last shown on `target`.
    pub fn pattern(&self, target: LedTarget) -> Option<LedPattern> {
        self.leds.get(&target).copied()
    }

    pub fn healthy(&self) -> Option<bool> {
        self.healthy
    }
}

impl LedDriver for LogDrivers {
    fn show(&mut self, target: LedTarget, pattern: LedPattern) -> Result<(), DriverError> {
        if self.leds.insert(target, pattern) != Some(pattern) {
            info!(
                led = target.name(),
                color = ?pattern.color,
                blink = ?pattern.blink,
                "LED pattern changed"
            );
        }
        Ok(())
    }
}

impl HealthIndicator for LogDrivers {
    fn set_healthy(&mut self, healthy: bool) -> Result<(), DriverError> {
        if self.healthy.replace(healthy) != Some(healthy) {
            info!(healthy, "Health output changed");
        }
        Ok(())
    }
}

impl BuzzerDriver for LogDrivers {
    fn play(&mut self, tone: Tone) -> Result<(), DriverError> {
        info!(tone = ?tone, "Beep");
        Ok(())
    }
}

impl ArmingClient for LogDrivers {
    fn request_arming(&mut self, arm: bool) -> Result<(), DriverError> {
        info!(arm, "Arming request");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuslight_types::Color;

    #[test]
    fn test_remembers_commanded_state() {
        let mut drivers = LogDrivers::new();
        assert_eq!(drivers.pattern(LedTarget::Battery), None);
        assert_eq!(drivers.healthy(), None);

        drivers
            .show(LedTarget::Battery, LedPattern::slow(Color::Yellow))
            .unwrap();
        drivers.show(LedTarget::Arm, LedPattern::OFF).unwrap();
        drivers.set_healthy(true).unwrap();

        assert_eq!(
            drivers.pattern(LedTarget::Battery),
            Some(LedPattern::slow(Color::Yellow))
        );
        assert_eq!(drivers.pattern(LedTarget::Arm), Some(LedPattern::OFF));
        assert_eq!(drivers.healthy(), Some(true));
    }

    #[test]
    fn test_tones_and_arming_never_fail() {
        let mut drivers = LogDrivers::new();
        assert!(drivers.play(Tone::LowVoltage).is_ok());
        assert!(drivers.request_arming(false).is_ok());
    }
}
