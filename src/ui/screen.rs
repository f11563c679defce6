//! Screen layouts.
//!
//! Each screen has a *back* (clear + static labels, drawn once on entry)
//! and *vars* (dynamic fields only). Every public entry point ends with a
//! single `display()` so one call costs one frame push.
//!
//! All layouts use the large font: 10 columns x 4 rows of 12x16 cells.

use core::fmt::Write;
use heapless::String;

use crate::address::{hex_string, is_zero_address, DeviceAddress};
use crate::config::{
    FAULT_TEXT, FONT_HEIGHT, FONT_SIZE, FONT_SIZE_SUP, FONT_WIDTH, RESET_ROWS, TEXT_COLS,
    VALUE_COL,
};
use crate::error::{Error, Result};
use crate::format::{format_temp, Precision};
use crate::mode::Mode;
use crate::state::{is_valid_temp, Readings, ResetSelection, Settings};
use crate::ui::display::TextDisplay;

/// Screens the HMI can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Temperatures, differential and pump state.
    Running,
    /// Threshold editing.
    Setup,
    /// Sensor readings and bound identities.
    Sensors,
    /// Factory-reset confirmation.
    Reset,
}

/// Borrowed snapshot of everything a screen reads.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub mode: Mode,
    pub settings: &'a Settings,
    pub readings: &'a Readings,
    pub reset: ResetSelection,
}

impl Screen {
    /// Screen for `mode`. RUNNING falls back to sensor diagnostics until
    /// both sensors are bound and setup is complete.
    pub fn select(mode: Mode, settings: &Settings) -> Self {
        match mode {
            Mode::Running if settings.setup && settings.all_sensors_defined() => Screen::Running,
            Mode::Running => Screen::Sensors,
            Mode::SetOn | Mode::SetOff | Mode::SetMax => Screen::Setup,
            Mode::Reset => Screen::Reset,
        }
    }

    /// Clear and draw the whole screen.
    pub fn draw_back<D: TextDisplay>(self, display: &mut D, view: &View<'_>) -> Result<()> {
        self.paint_back(display, view)?;
        display.display()
    }

    /// [`Screen::draw_back`] without the frame push.
    pub(crate) fn paint_back<D: TextDisplay>(
        self,
        display: &mut D,
        view: &View<'_>,
    ) -> Result<()> {
        match self {
            Screen::Running => run_back(display, view),
            Screen::Setup => setup_back(display, view),
            Screen::Sensors => sensors_back(display, view),
            Screen::Reset => reset_back(display, view),
        }
    }

    /// Per-tick refresh. Setup and reset fields only change on button
    /// events, so they are left alone here. Does not push the frame.
    pub fn refresh<D: TextDisplay>(self, display: &mut D, view: &View<'_>) -> Result<()> {
        match self {
            Screen::Running => run_fields(display, view),
            Screen::Sensors => sensors_fields(display, view),
            Screen::Setup | Screen::Reset => Ok(()),
        }
    }
}

// Helpers

fn at<D: TextDisplay>(display: &mut D, col: i32, row: i32) {
    display.set_cursor(col * FONT_WIDTH, row * FONT_HEIGHT);
}

/// Cursor at half-column precision, for centred labels.
fn at_half<D: TextDisplay>(display: &mut D, half_cols: i32, row: i32) {
    display.set_cursor(half_cols * FONT_WIDTH / 2, row * FONT_HEIGHT);
}

/// Draw a temperature at cell (`col`, `row`).
///
/// Layout from `col`: two integer cells, the fraction, then the sign in
/// cell `col + 4`. With two decimals the fraction is drawn in the small
/// font over cells `col + 2 ..= col + 3`.
///
/// A one-decimal value wider than a text row fails with
/// [`Error::BufferOverflow`] before anything is drawn.
pub fn print_temp<D: TextDisplay>(
    display: &mut D,
    col: i32,
    row: i32,
    temp: f32,
    precision: Precision,
) -> Result<()> {
    let text = format_temp(temp, precision);

    match precision {
        Precision::Two => {
            // Wipe both large cells first: the small fraction only
            // covers their top half.
            at(display, col + 2, row);
            display.print("  ")?;

            let mut frac: String<4> = String::new();
            write!(frac, ".{}", text.decimals)?;
            at(display, col + 2, row);
            display.set_text_scale(FONT_SIZE_SUP);
            display.print(&frac)?;
            display.set_text_scale(FONT_SIZE);

            at(display, col, row);
            display.print(&text.integer)?;
        }
        Precision::One => {
            let mut line: String<TEXT_COLS> = String::new();
            write!(line, "{}.{}", text.integer, text.decimals)?;
            at(display, col, row);
            display.print(&line)?;
        }
    }

    at(display, col + 4, row);
    display.print(text.sign)
}

/// Like [`print_temp`], but draws the fault literal for invalid readings.
fn print_reading<D: TextDisplay>(
    display: &mut D,
    col: i32,
    row: i32,
    temp: f32,
    precision: Precision,
) -> Result<()> {
    if is_valid_temp(temp) {
        print_temp(display, col, row, temp, precision)
    } else {
        print_fault(display, col, row)
    }
}

fn print_fault<D: TextDisplay>(display: &mut D, col: i32, row: i32) -> Result<()> {
    at(display, col, row);
    display.print(FAULT_TEXT)?;
    // Sign cell.
    display.print(" ")
}

// Running screen:
//   1234567890
// 1 tLow:-99.99
// 2  tHi:-99.99
// 3   dT:-99.99
// 4  Run: OFF

pub fn draw_run_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_run_back");

    run_back(display, view)?;
    display.display()
}

fn run_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    display.clear()?;
    display.set_text_scale(FONT_SIZE);
    display.print_at(0, 0, "tLow:")?;
    at(display, 1, 1);
    display.print("tHi:")?;
    at(display, 2, 2);
    display.print("dT:")?;
    at(display, 1, 3);
    display.print("Run:")?;

    run_fields(display, view)
}

/// Refresh all three temperatures and the pump state.
pub fn draw_run_vars<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_run_vars");

    run_fields(display, view)?;
    display.display()
}

/// Refresh only the pump state.
pub fn draw_run_state<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    pump_field(display, view.readings)?;
    display.display()
}

/// Write the pump state into the frame without pushing it.
pub(crate) fn pump_field<D: TextDisplay>(display: &mut D, readings: &Readings) -> Result<()> {
    at(display, VALUE_COL, 3);
    display.print(if readings.pump_running { "ON " } else { "off " })
}

fn run_fields<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    let r = view.readings;
    print_reading(display, VALUE_COL, 0, r.temp_low, Precision::Two)?;
    print_reading(display, VALUE_COL, 1, r.temp_high, Precision::Two)?;
    if r.dt_valid() {
        print_temp(display, VALUE_COL, 2, r.dt(), Precision::Two)?;
    } else {
        print_fault(display, VALUE_COL, 2)?;
    }
    pump_field(display, r)
}

// Setup screen:
//   1234567890
// 1 tOn > 6.0
// 2 tOff: 3.0
// 3 tMax:80.0
// 4

pub fn draw_setup_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_setup_back");

    setup_back(display, view)?;
    display.display()
}

fn setup_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    display.clear()?;
    display.set_text_scale(FONT_SIZE);
    for (row, sp) in view.settings.setpoints().iter().enumerate() {
        at(display, 0, row as i32);
        display.print(sp.label())?;
    }

    setup_markers(display, view)?;
    setup_fields(display, view, true)
}

/// Redraw the per-row selection markers (`>` edited, `:` otherwise)
/// without touching the values. The controller redraws the whole setup
/// screen on mode changes; this is for control loops that only need the
/// markers moved.
pub fn draw_setup_mode<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_setup_mode");

    setup_markers(display, view)?;
    display.display()
}

/// Redraw setpoint values. With `all == false` only the row being edited
/// is written.
pub fn draw_setup_vars<D: TextDisplay>(display: &mut D, view: &View<'_>, all: bool) -> Result<()> {
    debug!("draw_setup_vars all={}", all);

    setup_fields(display, view, all)?;
    display.display()
}

fn setup_markers<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    let editing = view.mode.setpoint();
    for (row, sp) in view.settings.setpoints().iter().enumerate() {
        at(display, 4, row as i32);
        display.print(if editing == Some(*sp) { ">" } else { ":" })?;
    }
    Ok(())
}

fn setup_fields<D: TextDisplay>(display: &mut D, view: &View<'_>, all: bool) -> Result<()> {
    let editing = view.mode.setpoint();
    for (row, sp) in view.settings.setpoints().iter().enumerate() {
        if !all && editing != Some(*sp) {
            continue;
        }
        if let Some(value) = view.settings.setpoint(*sp) {
            print_temp(display, VALUE_COL, row as i32, value, Precision::One)?;
        }
    }
    Ok(())
}

// Sensors screen (rows 2 and 4 in the small font):
//   1234567890
// 1 tLow:-99.9
// 2 28FF4C02911604B3
// 3  tHi:err!
// 4 Connect tHi

pub fn draw_sensors_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_sensors_back");

    sensors_back(display, view)?;
    display.display()
}

fn sensors_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    display.clear()?;
    display.set_text_scale(FONT_SIZE);
    display.print_at(0, 0, "tLow:")?;
    at(display, 1, 2);
    display.print("tHi:")?;

    sensors_fields(display, view)
}

pub fn draw_sensors_vars<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_sensors_vars");

    sensors_fields(display, view)?;
    display.display()
}

fn sensors_fields<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    let (r, s) = (view.readings, view.settings);
    print_reading(display, VALUE_COL, 0, r.temp_low, Precision::One)?;
    address_line(display, 1, &s.sensor_low, "Connect tLow")?;
    print_reading(display, VALUE_COL, 2, r.temp_high, Precision::One)?;
    address_line(display, 3, &s.sensor_high, "Connect tHi")
}

/// Sensor identity in hex, or `prompt` while the slot is unbound.
/// Padded to the full 16 characters so a shorter line erases a longer one.
fn address_line<D: TextDisplay>(
    display: &mut D,
    row: i32,
    address: &DeviceAddress,
    prompt: &str,
) -> Result<()> {
    let mut line: String<16> = String::new();
    if is_zero_address(address) {
        write!(line, "{:<16}", prompt)?;
    } else {
        line.push_str(&hex_string(address)).map_err(|_| Error::BufferOverflow)?;
    }

    at(display, 0, row);
    display.set_text_scale(FONT_SIZE_SUP);
    let res = display.print(&line);
    display.set_text_scale(FONT_SIZE);
    res
}

// Reset screen:
//   1234567890
// 1 !!RESET!!
// 2   < NO >
// 3     NO
// 4    YES

/// Row labels and their starting half-column.
const RESET_LABELS: [(&str, i32); RESET_ROWS as usize] = [("NO", 8), ("NO", 8), ("YES", 7)];

pub fn draw_reset_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_reset_back");

    reset_back(display, view)?;
    display.display()
}

fn reset_back<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    display.clear()?;
    display.set_text_scale(FONT_SIZE);
    at_half(display, 1, 0);
    display.print("!!RESET!!")?;
    for (i, (label, half_col)) in RESET_LABELS.iter().enumerate() {
        at_half(display, *half_col, i as i32 + 1);
        display.print(label)?;
    }

    reset_markers(display, view.reset)
}

/// Move the `< >` markers to the selected row.
pub fn draw_reset_vars<D: TextDisplay>(display: &mut D, view: &View<'_>) -> Result<()> {
    debug!("draw_reset_vars");

    reset_markers(display, view.reset)?;
    display.display()
}

fn reset_markers<D: TextDisplay>(display: &mut D, selection: ResetSelection) -> Result<()> {
    for row in 0..RESET_ROWS {
        let selected = selection.row() == row;
        let y = row as i32 + 1;
        at_half(display, 5, y);
        display.print(if selected { "<" } else { " " })?;
        at_half(display, 13, y);
        display.print(if selected { ">" } else { " " })?;
    }
    Ok(())
}
