//! User interface subsystem - OLED screens driven by button events.
//!
//! [`Hmi`] owns the display and all state the screens read. The control
//! loop feeds it events and readings and calls [`Hmi::tick`] once per
//! iteration; it decides between full redraws (screen entry) and partial
//! refreshes (value fields only).
//!
//! ## Components
//!
//! - **Display**: character-cell text over `embedded-graphics`
//! - **Screens**: Running, Setup, Sensors, Reset
//! - **Heartbeat**: spinner proving the loop is alive
//! - **Input logic**: button press → [`Event`] mapping

pub mod display;
pub mod heartbeat;
pub mod input_logic;
pub mod screen;

#[cfg(test)]
mod tests;

use crate::error::Result;
use crate::mode::{Command, Event, Mode, ModeMachine, Redraw};
use crate::state::{Readings, ResetSelection, Settings};
use display::TextDisplay;
use heartbeat::Spinner;
use screen::{Screen, View};

/// Display front-end of the thermostat.
pub struct Hmi<D> {
    display: D,
    machine: ModeMachine,
    settings: Settings,
    readings: Readings,
    heartbeat: Spinner,
    shown: Screen,
}

fn view<'a>(machine: &ModeMachine, settings: &'a Settings, readings: &'a Readings) -> View<'a> {
    View {
        mode: machine.mode(),
        settings,
        readings,
        reset: machine.reset_selection(),
    }
}

impl<D: TextDisplay> Hmi<D> {
    /// Boot in RUNNING with no valid readings yet. Nothing is drawn
    /// until [`Hmi::begin`].
    pub fn new(display: D, settings: Settings) -> Self {
        let machine = ModeMachine::new();
        let shown = Screen::select(machine.mode(), &settings);
        Self {
            display,
            machine,
            settings,
            readings: Readings::unknown(),
            heartbeat: Spinner::default(),
            shown,
        }
    }

    /// First full draw after the display has been initialised.
    pub fn begin(&mut self) -> Result<()> {
        info!("hmi: starting on {}", self.shown);
        self.redraw()
    }

    /// Clear and redraw the screen for the current mode.
    pub fn redraw(&mut self) -> Result<()> {
        self.shown = Screen::select(self.machine.mode(), &self.settings);
        let v = view(&self.machine, &self.settings, &self.readings);
        self.shown.draw_back(&mut self.display, &v)
    }

    /// Apply a button event and redraw what it invalidated.
    ///
    /// The returned command must be carried out by the persistence
    /// collaborator.
    pub fn handle(&mut self, event: Event) -> Result<Option<Command>> {
        let t = self.machine.handle(event, &mut self.settings);
        let v = view(&self.machine, &self.settings, &self.readings);
        match t.redraw {
            Redraw::None => {}
            Redraw::Full => {
                self.shown = Screen::select(v.mode, v.settings);
                self.shown.draw_back(&mut self.display, &v)?;
            }
            Redraw::SetupField => screen::draw_setup_vars(&mut self.display, &v, false)?,
            Redraw::ResetCursor => screen::draw_reset_vars(&mut self.display, &v)?,
        }
        if let Some(cmd) = t.command {
            info!("hmi: command {}", cmd);
        }
        Ok(t.command)
    }

    /// Store new readings. A pump state change on the running screen is
    /// written into the frame at once; temperatures wait for the next
    /// tick. Either way the frame is pushed by [`Hmi::tick`].
    pub fn update_readings(&mut self, readings: Readings) -> Result<()> {
        let pump_changed = readings.pump_running != self.readings.pump_running;
        self.readings = readings;
        if pump_changed && self.shown == Screen::Running {
            screen::pump_field(&mut self.display, &self.readings)?;
        }
        Ok(())
    }

    /// Replace the settings (loaded from storage or a new sensor
    /// binding). The screen follows on the next tick.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// One refresh: redraw the screen if its selection changed, otherwise
    /// refresh its dynamic fields; then advance the heartbeat and push
    /// the frame once.
    pub fn tick(&mut self) -> Result<()> {
        let wanted = Screen::select(self.machine.mode(), &self.settings);
        let v = view(&self.machine, &self.settings, &self.readings);
        if wanted != self.shown {
            debug!("hmi: screen {} -> {}", self.shown, wanted);
            self.shown = wanted;
            wanted.paint_back(&mut self.display, &v)?;
        } else {
            self.shown.refresh(&mut self.display, &v)?;
        }
        self.heartbeat.draw(&mut self.display)?;
        self.display.display()
    }

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    pub fn screen(&self) -> Screen {
        self.shown
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn reset_selection(&self) -> ResetSelection {
        self.machine.reset_selection()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
