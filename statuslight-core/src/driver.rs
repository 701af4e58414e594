//! Output driver interfaces.
//!
//! The core never touches hardware. Whatever drives the LEDs, the buzzer,
//! the health output and the arming service implements these traits.
//!
//! # Implementations
//! - **Host binary:** `LogDrivers` in the `statuslight` crate logs every change
//! - **Testing:** in-memory recorders

use statuslight_types::{LedPattern, Tone};

use crate::error::DriverError;

/// Which LED a pattern is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LedTarget {
    Battery,
    Arm,
}

impl LedTarget {
    pub const fn name(&self) -> &'static str {
        match self {
            LedTarget::Battery => "battery",
            LedTarget::Arm => "arm",
        }
    }
}

/// Shows patterns on the status LEDs.
pub trait LedDriver: Send {
    fn show(&mut self, target: LedTarget, pattern: LedPattern) -> Result<(), DriverError>;
}

/// Gates the overall "ok / not ok" output.
pub trait HealthIndicator: Send {
    fn set_healthy(&mut self, healthy: bool) -> Result<(), DriverError>;
}

/// Plays canned buzzer tones.
pub trait BuzzerDriver: Send {
    fn play(&mut self, tone: Tone) -> Result<(), DriverError>;
}

/// Asks the vehicle to arm or disarm.
pub trait ArmingClient: Send {
    fn request_arming(&mut self, arm: bool) -> Result<(), DriverError>;
}
