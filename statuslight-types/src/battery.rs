//! Battery status codes.

use core::fmt;

/// Battery status as reported by the power monitor.
///
/// On the wire this is a single byte. Codes outside the known range are
/// not an error at this layer; they are kept as raw bytes in
/// [`Reading::Battery`](crate::Reading::Battery) and classified later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum BatteryStatus {
    /// The monitor is running but has no valid estimate.
    Unavailable = 0,
    Good = 1,
    Low = 2,
    Critical = 3,
    Charging = 4,
}

impl BatteryStatus {
    /// The wire code for this status.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// A battery code that does not name any [`BatteryStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownBatteryCode(pub u8);

impl fmt::Display for UnknownBatteryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown battery status code {}", self.0)
    }
}

impl TryFrom<u8> for BatteryStatus {
    type Error = UnknownBatteryCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BatteryStatus::Unavailable),
            1 => Ok(BatteryStatus::Good),
            2 => Ok(BatteryStatus::Low),
            3 => Ok(BatteryStatus::Critical),
            4 => Ok(BatteryStatus::Charging),
            other => Err(UnknownBatteryCode(other)),
        }
    }
}
