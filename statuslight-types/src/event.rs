//! Monitored channels and the update events that feed them.

use core::fmt;

/// Identity of a monitored channel.
///
/// Every [`Reading`] belongs to exactly one channel, which is how update
/// events are routed without a handler per message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChannelId {
    Battery,
    Arm,
    CellVoltage,
}

impl ChannelId {
    /// Short name used in log fields.
    pub const fn name(&self) -> &'static str {
        match self {
            ChannelId::Battery => "battery",
            ChannelId::Arm => "arm",
            ChannelId::CellVoltage => "cell_voltage",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The payload of a channel update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Raw battery status code, see [`BatteryStatus`](crate::BatteryStatus).
    Battery(u8),
    /// Whether the vehicle reports itself armed.
    Armed(bool),
    /// Latest (lowest) cell voltage in volts.
    CellVoltage(f32),
}

impl Reading {
    /// The channel this reading updates.
    pub const fn channel(&self) -> ChannelId {
        match self {
            Reading::Battery(_) => ChannelId::Battery,
            Reading::Armed(_) => ChannelId::Arm,
            Reading::CellVoltage(_) => ChannelId::CellVoltage,
        }
    }
}

/// An event delivered by the transport.
///
/// With the `serde` feature this is internally tagged JSON:
///
/// ```text
/// {"type":"battery","code":1}
/// {"type":"armed","armed":true}
/// {"type":"cell_voltage","volts":3.9}
/// {"type":"button","gpio":17}
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum UpdateEvent {
    Battery { code: u8 },
    Armed { armed: bool },
    CellVoltage { volts: f32 },
    /// A falling edge on a button input.
    Button { gpio: u8 },
}

impl UpdateEvent {
    /// The channel reading carried by this event, if it updates a channel.
    ///
    /// Button presses are discrete events and carry no reading.
    pub const fn reading(&self) -> Option<Reading> {
        match *self {
            UpdateEvent::Battery { code } => Some(Reading::Battery(code)),
            UpdateEvent::Armed { armed } => Some(Reading::Armed(armed)),
            UpdateEvent::CellVoltage { volts } => Some(Reading::CellVoltage(volts)),
            UpdateEvent::Button { .. } => None,
        }
    }
}

impl From<Reading> for UpdateEvent {
    fn from(reading: Reading) -> Self {
        match reading {
            Reading::Battery(code) => UpdateEvent::Battery { code },
            Reading::Armed(armed) => UpdateEvent::Armed { armed },
            Reading::CellVoltage(volts) => UpdateEvent::CellVoltage { volts },
        }
    }
}
