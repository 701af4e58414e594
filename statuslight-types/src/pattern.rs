//! Output patterns for the LEDs and the buzzer.

/// LED colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Color {
    Off,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    White,
}

/// How an LED is modulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Blink {
    Solid,
    Slow,
    Fast,
}

/// A discrete LED output pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedPattern {
    pub color: Color,
    pub blink: Blink,
}

impl LedPattern {
    /// The quiescent pattern.
    pub const OFF: LedPattern = LedPattern {
        color: Color::Off,
        blink: Blink::Solid,
    };

    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            blink: Blink::Solid,
        }
    }

    pub const fn slow(color: Color) -> Self {
        Self {
            color,
            blink: Blink::Slow,
        }
    }

    pub const fn fast(color: Color) -> Self {
        Self {
            color,
            blink: Blink::Fast,
        }
    }

    /// Whether this pattern lights the LED at all.
    pub const fn is_off(&self) -> bool {
        matches!(self.color, Color::Off)
    }
}

impl Default for LedPattern {
    fn default() -> Self {
        Self::OFF
    }
}

/// A canned buzzer tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tone {
    /// Repeating low cell voltage alarm.
    LowVoltage,
    /// Short acknowledgement of a button press.
    ButtonAck,
}
