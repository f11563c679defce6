//! Button press → mode event mapping.

use crate::mode::{Event, Mode};

/// Physical buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
}

/// A debounced press, classified by hold time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPress {
    pub button: Button,
    pub long: bool,
}

impl ButtonPress {
    pub const fn short(button: Button) -> Self {
        Self {
            button,
            long: false,
        }
    }

    pub const fn long(button: Button) -> Self {
        Self { button, long: true }
    }
}

/// Translate a press into the event it means in `mode`.
///
/// Short presses edit (setpoint or reset cursor). Holding UP cycles
/// modes, holding DOWN asks for a reset. On the reset screen the holds
/// become confirm (UP) and cancel (DOWN).
pub fn map_press(press: ButtonPress, mode: Mode) -> Event {
    match (press.button, press.long, mode) {
        (Button::Up, false, _) => Event::Increment,
        (Button::Down, false, _) => Event::Decrement,
        (Button::Up, true, Mode::Reset) => Event::Confirm,
        (Button::Down, true, Mode::Reset) => Event::Cancel,
        (Button::Up, true, _) => Event::Cycle,
        (Button::Down, true, _) => Event::ResetRequest,
    }
}
