//! Application-wide constants and compile-time configuration.
//!
//! Display geometry, validity bounds, setpoint limits, and button/loop
//! timing live here so they can be tuned in one place.

// Display

/// SSD1306 I²C address.
pub const OLED_ADDR: u8 = 0x3C;

/// Panel size in pixels.
pub const PANEL_WIDTH: u32 = 128;
pub const PANEL_HEIGHT: u32 = 64;

/// Base glyph cell (text scale 1) in pixels.
pub const GLYPH_WIDTH: i32 = 6;
pub const GLYPH_HEIGHT: i32 = 8;

/// Text scale used for labels and the high-order digits.
pub const FONT_SIZE: u8 = 2;

/// Text scale used for fractional digits and sensor addresses.
pub const FONT_SIZE_SUP: u8 = 1;

/// Cell size at `FONT_SIZE`. In this scale the panel holds
/// 4 rows of 10 characters; scale 1 gives 8 rows of 21.
pub const FONT_WIDTH: i32 = GLYPH_WIDTH * FONT_SIZE as i32;
pub const FONT_HEIGHT: i32 = GLYPH_HEIGHT * FONT_SIZE as i32;

/// Large cells per text row.
pub const TEXT_COLS: usize = (PANEL_WIDTH as i32 / FONT_WIDTH) as usize;

/// Column (large cells) where every value field starts.
pub const VALUE_COL: i32 = 5;

// Readings

/// Readings at or below this are sensor-fault sentinels.
pub const TEMP_MIN_VALID: f32 = -100.0;

/// Readings at or above this are sensor-fault sentinels.
pub const TEMP_MAX_VALID: f32 = 200.0;

/// Literal drawn in place of an invalid reading.
pub const FAULT_TEXT: &str = "err!";

// Heartbeat

/// Animation frames cycled once per refresh tick.
pub const HEARTBEAT_GLYPHS: [&str; 4] = ["-", "\\", "|", "/"];

/// Heartbeat position (pixels, small scale): top-right corner, right of
/// the 10-column large grid.
pub const HEARTBEAT_X: i32 = PANEL_WIDTH as i32 - GLYPH_WIDTH;
pub const HEARTBEAT_Y: i32 = 0;

// Reset screen

/// Rows offered on the reset screen: NO, NO, YES.
pub const RESET_ROWS: u8 = 3;

/// Index of the YES row.
pub const RESET_YES_ROW: u8 = 2;

// Setpoints

/// Increment applied by one button press while editing (°C).
pub const SETPOINT_STEP: f32 = 0.5;

/// Editable range for every setpoint (°C). Two integer digits on screen.
pub const SETPOINT_MIN: f32 = 0.0;
pub const SETPOINT_MAX: f32 = 99.5;

/// Factory defaults.
pub const DEFAULT_DT_ON: f32 = 6.0;
pub const DEFAULT_DT_OFF: f32 = 3.0;
pub const DEFAULT_T_MAX: f32 = 80.0;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Logical names only; the concrete `embassy_nrf::peripherals::*` are
// picked in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   Pump relay     → P0.13

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Hold time after which a press counts as long (ms).
pub const BUTTON_LONG_PRESS_MS: u64 = 800;

/// Control-loop refresh period (ms).
pub const TICK_PERIOD_MS: u64 = 500;
