//! SSD1306 OLED panel behind the `TextDisplay` interface.

use difftherm::config::OLED_ADDR;
use difftherm::error::{Error, Result};
use difftherm::ui::display::{CellDisplay, TextDisplay};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Panel<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Buffered panel; `display()` pushes the frame over I²C.
pub struct Oled<I2C> {
    cells: CellDisplay<Panel<I2C>>,
}

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Result<Oled<I2C>>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, OLED_ADDR);
    let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    panel.init().map_err(|_| Error::DisplayInit)?;
    panel.clear_buffer();
    panel.flush().map_err(|_| Error::DisplayInit)?;

    Ok(Oled {
        cells: CellDisplay::new(panel),
    })
}

impl<I2C> TextDisplay for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) -> Result<()> {
        self.cells.clear()
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cells.set_cursor(x, y);
    }

    fn set_text_scale(&mut self, scale: u8) {
        self.cells.set_text_scale(scale);
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.cells.print(text)
    }

    fn display(&mut self) -> Result<()> {
        self.cells.target_mut().flush().map_err(|_| Error::Display)
    }
}
