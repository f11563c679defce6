//! Unit tests for screen rendering and the HMI controller.
//!
//! These run on the host against a recording `TextDisplay` (every bus
//! call is logged) and an in-memory `DrawTarget` frame.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::display::{CellDisplay, TextDisplay};
use super::screen::{self, Screen, View};
use super::Hmi;
use crate::config::{FONT_HEIGHT, FONT_SIZE, FONT_WIDTH, HEARTBEAT_X};
use crate::error::{Error, Result};
use crate::format::Precision;
use crate::mode::{Command, Event, Mode};
use crate::state::{Readings, ResetSelection, Settings};

// ═══════════════════════════════════════════════════════════════════════════
// Test doubles
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Clear,
    Print { x: i32, y: i32, scale: u8, text: String },
    Flush,
}

/// Records every call; prints are stored with the cursor and scale in
/// effect at the time.
struct Recorder {
    ops: Vec<Op>,
    cursor: (i32, i32),
    scale: u8,
    fail: bool,
}

impl Recorder {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            cursor: (0, 0),
            scale: FONT_SIZE,
            fail: false,
        }
    }

    fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }

    fn clears(ops: &[Op]) -> usize {
        ops.iter().filter(|op| **op == Op::Clear).count()
    }

    fn flushes(ops: &[Op]) -> usize {
        ops.iter().filter(|op| **op == Op::Flush).count()
    }

    /// Text printed at a pixel position, if any (last write wins).
    fn text_at(ops: &[Op], x: i32, y: i32) -> Option<(u8, String)> {
        ops.iter().rev().find_map(|op| match op {
            Op::Print {
                x: px,
                y: py,
                scale,
                text,
            } if *px == x && *py == y => Some((*scale, text.clone())),
            _ => None,
        })
    }

    fn printed(ops: &[Op], needle: &str) -> bool {
        ops.iter()
            .any(|op| matches!(op, Op::Print { text, .. } if text.contains(needle)))
    }
}

impl TextDisplay for Recorder {
    fn clear(&mut self) -> Result<()> {
        if self.fail {
            return Err(Error::Display);
        }
        self.ops.push(Op::Clear);
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn set_text_scale(&mut self, scale: u8) {
        self.scale = scale;
    }

    fn print(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Display);
        }
        let (x, y) = self.cursor;
        self.ops.push(Op::Print {
            x,
            y,
            scale: self.scale,
            text: text.to_string(),
        });
        self.cursor.0 += 6 * self.scale as i32 * text.chars().count() as i32;
        Ok(())
    }

    fn display(&mut self) -> Result<()> {
        self.ops.push(Op::Flush);
        Ok(())
    }
}

/// 128x64 monochrome frame.
struct Frame {
    px: [[bool; 128]; 64],
}

impl Frame {
    fn new() -> Self {
        Self {
            px: [[false; 128]; 64],
        }
    }

    fn lit_in(&self, x0: usize, y0: usize, w: usize, h: usize) -> usize {
        self.px[y0..y0 + h]
            .iter()
            .map(|row| row[x0..x0 + w].iter().filter(|&&p| p).count())
            .sum()
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if (0..128).contains(&p.x) && (0..64).contains(&p.y) {
                self.px[p.y as usize][p.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

fn bound_settings() -> Settings {
    let mut s = Settings::factory();
    s.setup = true;
    s.sensor_low = [0x28, 0xFF, 0x4C, 0x02, 0x91, 0x16, 0x04, 0xB3];
    s.sensor_high = [0x28, 0x0A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x7E];
    s
}

fn readings(low: f32, high: f32, pump: bool) -> Readings {
    Readings {
        temp_low: low,
        temp_high: high,
        pump_running: pump,
    }
}

fn cell(col: i32, row: i32) -> (i32, i32) {
    (col * FONT_WIDTH, row * FONT_HEIGHT)
}

// ═══════════════════════════════════════════════════════════════════════════
// Temperature field
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn print_temp_two_places_uses_small_fraction() {
    let mut d = Recorder::new();
    screen::print_temp(&mut d, 5, 0, 12.34, Precision::Two).unwrap();
    let ops = d.take();

    let (x, y) = cell(5, 0);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "12".into())));
    let (x, y) = cell(7, 0);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((1, ".34".into())));
    let (x, y) = cell(9, 0);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, " ".into())));
    assert_eq!(d.scale, FONT_SIZE);
}

#[test]
fn print_temp_one_place_is_single_large_run() {
    let mut d = Recorder::new();
    screen::print_temp(&mut d, 5, 1, -0.05, Precision::One).unwrap();
    let ops = d.take();

    let (x, y) = cell(5, 1);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, " 0.1".into())));
    let (x, y) = cell(9, 1);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "-".into())));
}

// ═══════════════════════════════════════════════════════════════════════════
// Running screen
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn print_temp_wider_than_row_overflows() {
    let mut d = Recorder::new();
    let res = screen::print_temp(&mut d, 0, 0, 123_456_789.0, Precision::One);
    assert_eq!(res, Err(Error::BufferOverflow));
    assert!(d.ops.is_empty());
}

#[test]
fn run_back_clears_once_and_flushes_once() {
    let mut d = Recorder::new();
    let settings = bound_settings();
    let r = readings(20.0, 27.5, true);
    let view = View {
        mode: Mode::Running,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_run_back(&mut d, &view).unwrap();
    let ops = d.take();

    assert_eq!(ops.first(), Some(&Op::Clear));
    assert_eq!(Recorder::clears(&ops), 1);
    assert_eq!(Recorder::flushes(&ops), 1);
    assert_eq!(ops.last(), Some(&Op::Flush));
    assert_eq!(Recorder::text_at(&ops, 0, 0), Some((2, "tLow:".into())));
    let (x, y) = cell(5, 2);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, " 7".into())));
    let (x, y) = cell(5, 3);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "ON ".into())));
}

#[test]
fn run_vars_never_clear() {
    let mut d = Recorder::new();
    let settings = bound_settings();
    let r = readings(20.0, 27.5, false);
    let view = View {
        mode: Mode::Running,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_run_vars(&mut d, &view).unwrap();
    let ops = d.take();

    assert_eq!(Recorder::clears(&ops), 0);
    assert!(Recorder::printed(&ops, "off"));
    assert!(!Recorder::printed(&ops, "tLow"));
}

#[test]
fn invalid_reading_shows_fault_and_dt_follows() {
    let mut d = Recorder::new();
    let settings = bound_settings();
    let r = readings(-127.0, 45.25, false);
    let view = View {
        mode: Mode::Running,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_run_vars(&mut d, &view).unwrap();
    let ops = d.take();

    let (x, y) = cell(5, 0);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "err!".into())));
    let (x, y) = cell(5, 1);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "45".into())));
    let (x, y) = cell(5, 2);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "err!".into())));
}

#[test]
fn run_state_touches_only_pump_field() {
    let mut d = Recorder::new();
    let settings = bound_settings();
    let r = readings(20.0, 27.5, true);
    let view = View {
        mode: Mode::Running,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_run_state(&mut d, &view).unwrap();
    let ops = d.take();

    let (x, y) = cell(5, 3);
    assert_eq!(
        ops,
        vec![
            Op::Print {
                x,
                y,
                scale: 2,
                text: "ON ".into()
            },
            Op::Flush
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Setup screen
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn setup_back_marks_edited_row() {
    let mut d = Recorder::new();
    let settings = Settings::factory();
    let r = Readings::unknown();
    let view = View {
        mode: Mode::SetOff,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_setup_back(&mut d, &view).unwrap();
    let ops = d.take();

    assert_eq!(Recorder::text_at(&ops, 0, 0), Some((2, "tOn ".into())));
    assert_eq!(Recorder::text_at(&ops, 0, 2 * FONT_HEIGHT), Some((2, "tMax".into())));
    assert_eq!(Recorder::text_at(&ops, 4 * FONT_WIDTH, 0), Some((2, ":".into())));
    assert_eq!(
        Recorder::text_at(&ops, 4 * FONT_WIDTH, FONT_HEIGHT),
        Some((2, ">".into()))
    );
    let (x, y) = cell(5, 2);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "80.0".into())));
    assert_eq!(Recorder::flushes(&ops), 1);
}

#[test]
fn setup_back_two_thresholds_has_no_max_row() {
    let mut d = Recorder::new();
    let mut settings = Settings::factory();
    settings.t_max = None;
    let r = Readings::unknown();
    let view = View {
        mode: Mode::SetOn,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_setup_back(&mut d, &view).unwrap();
    assert!(!Recorder::printed(&d.take(), "tMax"));
}

#[test]
fn setup_vars_partial_writes_only_edited_field() {
    let mut d = Recorder::new();
    let settings = Settings::factory();
    let r = Readings::unknown();
    let view = View {
        mode: Mode::SetOff,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_setup_vars(&mut d, &view, false).unwrap();
    let ops = d.take();

    let rows: Vec<i32> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Print { y, .. } => Some(*y / FONT_HEIGHT),
            _ => None,
        })
        .collect();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|&row| row == 1));

    screen::draw_setup_vars(&mut d, &view, true).unwrap();
    let ops = d.take();
    let (x, y) = cell(5, 0);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, " 6.0".into())));
}

#[test]
fn setup_mode_only_moves_markers() {
    let mut d = Recorder::new();
    let settings = Settings::factory();
    let r = Readings::unknown();
    let view = View {
        mode: Mode::SetMax,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_setup_mode(&mut d, &view).unwrap();
    let ops = d.take();

    let texts: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            Op::Print { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, [":", ":", ">"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Sensors screen
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn sensors_show_prompts_for_unbound_slots() {
    let mut d = Recorder::new();
    let mut settings = Settings::factory();
    settings.sensor_low = [0x0A, 0xFF, 0x01, 0, 0, 0, 0, 0x10];
    let r = readings(21.04, 250.0, false);
    let view = View {
        mode: Mode::Running,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_sensors_back(&mut d, &view).unwrap();
    let ops = d.take();

    assert_eq!(
        Recorder::text_at(&ops, 0, FONT_HEIGHT),
        Some((1, "0AFF010000000010".into()))
    );
    assert_eq!(
        Recorder::text_at(&ops, 0, 3 * FONT_HEIGHT),
        Some((1, "Connect tHi     ".into()))
    );
    let (x, y) = cell(5, 0);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "21.0".into())));
    let (x, y) = cell(5, 2);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "err!".into())));
    assert_eq!(d.scale, FONT_SIZE);
}

#[test]
fn sensors_vars_low_prompt() {
    let mut d = Recorder::new();
    let settings = Settings::factory();
    let r = Readings::unknown();
    let view = View {
        mode: Mode::Running,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new(),
    };
    screen::draw_sensors_vars(&mut d, &view).unwrap();
    let ops = d.take();
    assert!(Recorder::printed(&ops, "Connect tLow"));
    assert_eq!(Recorder::clears(&ops), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Reset screen
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn reset_markers_follow_selection() {
    let mut d = Recorder::new();
    let settings = Settings::factory();
    let r = Readings::unknown();
    let view = View {
        mode: Mode::Reset,
        settings: &settings,
        readings: &r,
        reset: ResetSelection::new().next().next(),
    };
    screen::draw_reset_back(&mut d, &view).unwrap();
    let ops = d.take();

    assert!(Recorder::printed(&ops, "!!RESET!!"));
    assert_eq!(
        Recorder::text_at(&ops, 7 * FONT_WIDTH / 2, 3 * FONT_HEIGHT),
        Some((2, "YES".into()))
    );
    let left = 5 * FONT_WIDTH / 2;
    assert_eq!(Recorder::text_at(&ops, left, FONT_HEIGHT), Some((2, " ".into())));
    assert_eq!(
        Recorder::text_at(&ops, left, 3 * FONT_HEIGHT),
        Some((2, "<".into()))
    );
    assert_eq!(
        Recorder::text_at(&ops, 13 * FONT_WIDTH / 2, 3 * FONT_HEIGHT),
        Some((2, ">".into()))
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Screen selection
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn running_needs_bound_sensors() {
    let mut s = Settings::factory();
    assert_eq!(Screen::select(Mode::Running, &s), Screen::Sensors);
    s = bound_settings();
    assert_eq!(Screen::select(Mode::Running, &s), Screen::Running);
    s.setup = false;
    assert_eq!(Screen::select(Mode::Running, &s), Screen::Sensors);
    assert_eq!(Screen::select(Mode::SetMax, &s), Screen::Setup);
    assert_eq!(Screen::select(Mode::Reset, &s), Screen::Reset);
}

// ═══════════════════════════════════════════════════════════════════════════
// HMI controller
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn hmi_cycle_redraws_and_edit_is_partial() {
    let mut hmi = Hmi::new(Recorder::new(), bound_settings());
    hmi.begin().unwrap();
    assert_eq!(hmi.screen(), Screen::Running);
    hmi.display_mut().take();

    assert_eq!(hmi.handle(Event::Cycle).unwrap(), None);
    assert_eq!(hmi.screen(), Screen::Setup);
    let ops = hmi.display_mut().take();
    assert_eq!(Recorder::clears(&ops), 1);

    assert_eq!(hmi.handle(Event::Increment).unwrap(), None);
    let ops = hmi.display_mut().take();
    assert_eq!(Recorder::clears(&ops), 0);
    let (x, y) = cell(5, 0);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, " 6.5".into())));

    assert_eq!(
        hmi.handle(Event::Confirm).unwrap(),
        Some(Command::SaveSettings)
    );
    assert_eq!(hmi.mode(), Mode::Running);
    assert_eq!(hmi.settings().dt_on, 6.5);
}

#[test]
fn hmi_tick_refreshes_and_beats() {
    let mut hmi = Hmi::new(Recorder::new(), bound_settings());
    hmi.begin().unwrap();
    hmi.update_readings(readings(20.0, 30.0, false)).unwrap();
    hmi.display_mut().take();

    hmi.tick().unwrap();
    let ops = hmi.display_mut().take();
    assert_eq!(Recorder::clears(&ops), 0);
    assert_eq!(Recorder::flushes(&ops), 1);
    assert_eq!(Recorder::text_at(&ops, HEARTBEAT_X, 0), Some((1, "-".into())));
    let (x, y) = cell(5, 2);
    assert_eq!(Recorder::text_at(&ops, x, y), Some((2, "10".into())));

    hmi.tick().unwrap();
    let ops = hmi.display_mut().take();
    assert_eq!(Recorder::text_at(&ops, HEARTBEAT_X, 0), Some((1, "\\".into())));
    assert_eq!(hmi.display().scale, FONT_SIZE);
}

#[test]
fn hmi_pump_change_draws_state_immediately() {
    let mut hmi = Hmi::new(Recorder::new(), bound_settings());
    hmi.begin().unwrap();
    hmi.display_mut().take();

    hmi.update_readings(readings(20.0, 30.0, true)).unwrap();
    let ops = hmi.display_mut().take();
    assert!(Recorder::printed(&ops, "ON"));
    assert!(!Recorder::printed(&ops, "30"));
    assert_eq!(Recorder::flushes(&ops), 0);

    // The tick pushes the frame once.
    hmi.tick().unwrap();
    assert_eq!(Recorder::flushes(&hmi.display_mut().take()), 1);

    // Same pump state: nothing drawn until the tick.
    hmi.update_readings(readings(21.0, 30.0, true)).unwrap();
    assert!(hmi.display_mut().take().is_empty());
}

#[test]
fn hmi_switches_screen_when_sensors_get_bound() {
    let mut hmi = Hmi::new(Recorder::new(), Settings::factory());
    hmi.begin().unwrap();
    assert_eq!(hmi.screen(), Screen::Sensors);
    hmi.display_mut().take();

    hmi.set_settings(bound_settings());
    hmi.tick().unwrap();
    assert_eq!(hmi.screen(), Screen::Running);
    let ops = hmi.display_mut().take();
    assert_eq!(Recorder::clears(&ops), 1);
    assert_eq!(Recorder::flushes(&ops), 1);
    assert!(Recorder::printed(&ops, "Run:"));
}

#[test]
fn hmi_factory_reset_returns_to_sensors() {
    let mut hmi = Hmi::new(Recorder::new(), bound_settings());
    hmi.begin().unwrap();

    hmi.handle(Event::ResetRequest).unwrap();
    assert_eq!(hmi.screen(), Screen::Reset);
    hmi.handle(Event::Increment).unwrap();
    hmi.handle(Event::Increment).unwrap();
    assert!(hmi.reset_selection().is_yes());

    assert_eq!(
        hmi.handle(Event::Confirm).unwrap(),
        Some(Command::FactoryReset)
    );
    assert_eq!(hmi.mode(), Mode::Running);
    assert_eq!(hmi.screen(), Screen::Sensors);
    assert!(!hmi.settings().setup);
}

#[test]
fn hmi_propagates_bus_errors() {
    let mut hmi = Hmi::new(Recorder::new(), bound_settings());
    hmi.display_mut().fail = true;
    assert_eq!(hmi.begin(), Err(Error::Display));
}

// ═══════════════════════════════════════════════════════════════════════════
// Cell display
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn cell_display_draws_within_cells() {
    let mut d = CellDisplay::new(Frame::new());
    d.print_at(0, 0, "8").unwrap();
    assert!(d.target().lit_in(0, 0, 12, 16) > 0);
    assert_eq!(d.target().lit_in(12, 0, 116, 64), 0);
    assert_eq!(d.cursor(), Point::new(12, 0));

    d.set_text_scale(1);
    d.print_at(0, 16, "8").unwrap();
    assert!(d.target().lit_in(0, 16, 6, 8) > 0);
    assert_eq!(d.cursor(), Point::new(6, 16));
}

#[test]
fn cell_display_space_erases_previous_glyph() {
    let mut d = CellDisplay::new(Frame::new());
    d.print_at(24, 16, "-").unwrap();
    assert!(d.target().lit_in(24, 16, 12, 16) > 0);
    d.print_at(24, 16, " ").unwrap();
    assert_eq!(d.target().lit_in(24, 16, 12, 16), 0);
}

#[test]
fn cell_display_clear_blanks_panel() {
    let mut d = CellDisplay::new(Frame::new());
    d.print_at(0, 0, "tLow:12").unwrap();
    assert!(d.target().lit_in(0, 0, 128, 64) > 0);
    d.clear().unwrap();
    assert_eq!(d.target().lit_in(0, 0, 128, 64), 0);
    assert_eq!(d.cursor(), Point::zero());
}
