//! Error types.

use statuslight_types::ChannelId;
use thiserror::Error;

/// Non-fatal anomalies detected while evaluating inputs.
///
/// None of these stop the tick loop; they are reported and the affected
/// channel or event falls back to a defined behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// A channel delivered a value outside its expected domain.
    #[error("unrecognized value {raw} on channel {channel}")]
    UnrecognizedValue { channel: ChannelId, raw: i64 },

    /// A button edge arrived on a GPIO that is not configured as a button.
    #[error("button at GPIO {gpio} pressed, but it is not in the list of known GPIOs")]
    UnknownButton { gpio: u8 },
}

/// Errors reported by output drivers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Writing to the output failed.
    #[error("write to output failed")]
    WriteFailed,

    /// The collaborator behind the driver is not reachable.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}
