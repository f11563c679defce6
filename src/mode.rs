//! Operating-mode state machine.
//!
//! A `Cycle` event walks RUNNING → SET_ON → SET_OFF → [SET_MAX →] RUNNING.
//! `ResetRequest` jumps to RESET from anywhere; RESET is left through
//! `Confirm` (factory reset when YES is highlighted) or `Cancel`.
//!
//! The machine is pure: it updates its own state and the settings being
//! edited, and reports what must be redrawn and which collaborator
//! command (if any) the transition produced.

use crate::config::SETPOINT_STEP;
use crate::state::{ResetSelection, Setpoint, Settings};

/// Operating modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Running,
    SetOn,
    SetOff,
    SetMax,
    Reset,
}

impl Mode {
    /// The setpoint edited in this mode, if any.
    pub const fn setpoint(self) -> Option<Setpoint> {
        match self {
            Mode::SetOn => Some(Setpoint::On),
            Mode::SetOff => Some(Setpoint::Off),
            Mode::SetMax => Some(Setpoint::Max),
            Mode::Running | Mode::Reset => None,
        }
    }

    pub const fn is_setup(self) -> bool {
        self.setpoint().is_some()
    }
}

/// Mode-transition events (after debouncing and long-press detection).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Advance to the next mode in the cycle.
    Cycle,
    /// Jump to the reset screen.
    ResetRequest,
    /// Accept the current screen.
    Confirm,
    /// Leave the current screen without side effects.
    Cancel,
    /// Raise the edited setpoint / move the reset cursor down.
    Increment,
    /// Lower the edited setpoint / move the reset cursor up.
    Decrement,
}

/// Work the collaborators must do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Setpoints were edited; persist them.
    SaveSettings,
    /// Erase persisted settings and sensor bindings.
    FactoryReset,
}

/// How much of the screen a transition invalidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Redraw {
    /// Nothing changed on screen.
    None,
    /// Entered a mode: clear and redraw the destination screen.
    Full,
    /// Only the setpoint being edited changed.
    SetupField,
    /// Only the reset cursor moved.
    ResetCursor,
}

/// Result of handling one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub redraw: Redraw,
    pub command: Option<Command>,
}

impl Transition {
    const fn redraw(redraw: Redraw) -> Self {
        Self {
            redraw,
            command: None,
        }
    }

    const NONE: Self = Self::redraw(Redraw::None);
}

/// Holds the current mode and the reset-screen selection.
#[derive(Clone, Debug)]
pub struct ModeMachine {
    mode: Mode,
    reset: ResetSelection,
    /// A setpoint was edited since the setup screens were entered.
    edited: bool,
}

impl ModeMachine {
    /// Boot state: RUNNING.
    pub const fn new() -> Self {
        Self {
            mode: Mode::Running,
            reset: ResetSelection::new(),
            edited: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn reset_selection(&self) -> ResetSelection {
        self.reset
    }

    /// Apply `event`. Setpoint edits are written straight into `settings`.
    pub fn handle(&mut self, event: Event, settings: &mut Settings) -> Transition {
        match (self.mode, event) {
            (_, Event::ResetRequest) => self.enter(Mode::Reset),

            (Mode::Reset, Event::Confirm) if self.reset.is_yes() => {
                info!("factory reset confirmed");
                *settings = Settings::factory_for(settings.t_max.is_some());
                self.edited = false;
                let mut t = self.enter(Mode::Running);
                t.command = Some(Command::FactoryReset);
                t
            }
            (Mode::Reset, Event::Confirm | Event::Cancel | Event::Cycle) => {
                self.enter(Mode::Running)
            }
            (Mode::Reset, Event::Increment) => self.move_cursor(self.reset.next()),
            (Mode::Reset, Event::Decrement) => self.move_cursor(self.reset.prev()),

            (Mode::Running, Event::Cycle) => self.enter(Mode::SetOn),
            (Mode::Running, _) => Transition::NONE,

            (mode, Event::Cycle) => self.enter(next_setup_mode(mode, settings)),
            (_, Event::Confirm | Event::Cancel) => self.enter(Mode::Running),
            (mode, Event::Increment) => self.edit(mode, settings, SETPOINT_STEP),
            (mode, Event::Decrement) => self.edit(mode, settings, -SETPOINT_STEP),
        }
    }

    fn enter(&mut self, next: Mode) -> Transition {
        let prev = self.mode;
        info!("mode {} -> {}", prev, next);
        self.mode = next;

        if next == Mode::Reset {
            self.reset = ResetSelection::new();
        }

        let mut t = Transition::redraw(Redraw::Full);
        if prev.is_setup() && !next.is_setup() && self.edited {
            self.edited = false;
            t.command = Some(Command::SaveSettings);
        }
        t
    }

    fn move_cursor(&mut self, next: ResetSelection) -> Transition {
        if next == self.reset {
            return Transition::NONE;
        }
        self.reset = next;
        Transition::redraw(Redraw::ResetCursor)
    }

    fn edit(&mut self, mode: Mode, settings: &mut Settings, delta: f32) -> Transition {
        match mode.setpoint() {
            Some(sp) if settings.adjust(sp, delta) => {
                self.edited = true;
                Transition::redraw(Redraw::SetupField)
            }
            _ => Transition::NONE,
        }
    }
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Next stop of the setup cycle; SET_MAX is skipped on two-threshold
/// configurations.
fn next_setup_mode(mode: Mode, settings: &Settings) -> Mode {
    match mode {
        Mode::SetOn => Mode::SetOff,
        Mode::SetOff if settings.t_max.is_some() => Mode::SetMax,
        _ => Mode::Running,
    }
}
