//! Button presses: guard time, index lookup and action mapping.

use std::collections::BTreeMap;
use std::time::Duration;

use statuslight_types::Timestamp;

use crate::error::StatusError;

/// Position of a button in the configured GPIO list.
pub type ButtonIndex = usize;

/// Filters repeated edges on button inputs and resolves their index.
///
/// Each configured GPIO has its own guard window: an edge arriving less
/// than `guard_time` after the last accepted edge on the same GPIO is
/// dropped.
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    gpios: Vec<u8>,
    guard_time: Duration,
    last_press: BTreeMap<u8, Timestamp>,
}

impl ButtonDebouncer {
    /// Create a debouncer for `gpios`, with every guard window starting at
    /// `started_at`.
    pub fn new(gpios: Vec<u8>, guard_time: Duration, started_at: Timestamp) -> Self {
        let last_press = gpios.iter().map(|gpio| (*gpio, started_at)).collect();
        Self {
            gpios,
            guard_time,
            last_press,
        }
    }

    /// Handle a falling edge on `gpio` at `now`.
    ///
    /// Returns `Ok(Some(index))` for an accepted press, `Ok(None)` for an
    /// edge inside the guard window, and an error for a GPIO that is not
    /// configured. An unknown GPIO never produces a button index.
    pub fn press(&mut self, gpio: u8, now: Timestamp) -> Result<Option<ButtonIndex>, StatusError> {
        let index = self
            .gpios
            .iter()
            .position(|known| *known == gpio)
            .ok_or(StatusError::UnknownButton { gpio })?;

        let last = self.last_press.entry(gpio).or_insert(Timestamp::ZERO);
        if now.saturating_duration_since(*last) < self.guard_time {
            return Ok(None);
        }
        *last = now;
        Ok(Some(index))
    }
}

/// What a button press asks the vehicle to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Arm,
    Disarm,
    Unhandled(ButtonIndex),
}

impl ButtonAction {
    pub const ARM_BUTTON: ButtonIndex = 0;
    pub const DISARM_BUTTON: ButtonIndex = 1;

    pub fn from_index(index: ButtonIndex) -> Self {
        match index {
            Self::ARM_BUTTON => ButtonAction::Arm,
            Self::DISARM_BUTTON => ButtonAction::Disarm,
            other => ButtonAction::Unhandled(other),
        }
    }

    /// The arming request this action makes, if any.
    pub fn arming_request(&self) -> Option<bool> {
        match self {
            ButtonAction::Arm => Some(true),
            ButtonAction::Disarm => Some(false),
            ButtonAction::Unhandled(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARD: Duration = Duration::from_secs(1);

    fn debouncer() -> ButtonDebouncer {
        ButtonDebouncer::new(vec![17, 27, 22], GUARD, Timestamp::ZERO)
    }

    #[test]
    fn test_press_resolves_index() {
        let mut buttons = debouncer();
        assert_eq!(buttons.press(27, Timestamp::from_secs(2)), Ok(Some(1)));
        assert_eq!(buttons.press(22, Timestamp::from_secs(2)), Ok(Some(2)));
    }

    #[test]
    fn test_guard_window_starts_at_startup() {
        let mut buttons = debouncer();
        assert_eq!(buttons.press(17, Timestamp::from_millis(500)), Ok(None));
        assert_eq!(buttons.press(17, Timestamp::from_millis(1000)), Ok(Some(0)));
    }

    #[test]
    fn test_repeated_edges_within_guard_are_dropped() {
        let mut buttons = debouncer();
        assert_eq!(buttons.press(17, Timestamp::from_secs(5)), Ok(Some(0)));
        assert_eq!(buttons.press(17, Timestamp::from_millis(5300)), Ok(None));
        assert_eq!(buttons.press(17, Timestamp::from_millis(5999)), Ok(None));
        assert_eq!(buttons.press(17, Timestamp::from_secs(6)), Ok(Some(0)));
    }

    #[test]
    fn test_guard_windows_are_per_gpio() {
        let mut buttons = debouncer();
        assert_eq!(buttons.press(17, Timestamp::from_secs(5)), Ok(Some(0)));
        assert_eq!(buttons.press(27, Timestamp::from_millis(5100)), Ok(Some(1)));
    }

    #[test]
    fn test_unknown_gpio_is_an_error_without_index() {
        let mut buttons = debouncer();
        assert_eq!(
            buttons.press(4, Timestamp::from_secs(5)),
            Err(StatusError::UnknownButton { gpio: 4 })
        );
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(ButtonAction::from_index(0), ButtonAction::Arm);
        assert_eq!(ButtonAction::from_index(1), ButtonAction::Disarm);
        assert_eq!(ButtonAction::from_index(2), ButtonAction::Unhandled(2));

        assert_eq!(ButtonAction::Arm.arming_request(), Some(true));
        assert_eq!(ButtonAction::Disarm.arming_request(), Some(false));
        assert_eq!(ButtonAction::Unhandled(5).arming_request(), None);
    }
}
