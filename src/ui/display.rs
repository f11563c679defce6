//! Character-cell text display on top of `embedded-graphics`.
//!
//! Screens talk to the panel the way the legacy GFX driver did: move a
//! pixel cursor, pick a text scale, print. [`CellDisplay`] maps that onto
//! any monochrome `DrawTarget` using a fixed `6*scale x 8*scale` cell
//! pitch, so text drawn at scale 2 lands on a 10x4 grid and text at
//! scale 1 on a 21x8 grid.

use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::config::{FONT_SIZE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::error::{Error, Result};

/// Operations the HMI needs from the display bus.
///
/// Calls are blocking and must not be interleaved from several
/// contexts; the owner of the implementor serialises all writes.
pub trait TextDisplay {
    /// Blank the whole panel and home the cursor.
    fn clear(&mut self) -> Result<()>;

    /// Place the cursor at a pixel position (top-left of the next cell).
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Select the text scale for subsequent prints.
    fn set_text_scale(&mut self, scale: u8);

    /// Draw `text` at the cursor, advancing it one cell per character.
    fn print(&mut self, text: &str) -> Result<()>;

    /// Push the drawn frame to the panel.
    fn display(&mut self) -> Result<()>;

    fn print_at(&mut self, x: i32, y: i32, text: &str) -> Result<()> {
        self.set_cursor(x, y);
        self.print(text)
    }
}

/// Fixed-pitch text renderer over a monochrome draw target.
pub struct CellDisplay<D> {
    target: D,
    cursor: Point,
    scale: u8,
}

impl<D> CellDisplay<D> {
    pub fn new(target: D) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            scale: FONT_SIZE,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    fn cell_size(&self) -> Size {
        let s = self.scale as u32;
        Size::new(GLYPH_WIDTH as u32 * s, GLYPH_HEIGHT as u32 * s)
    }
}

/// Closest built-in font that fits inside one cell at `scale`.
fn font_for(scale: u8) -> &'static MonoFont<'static> {
    if scale <= 1 {
        &FONT_5X8
    } else {
        &FONT_9X15
    }
}

fn text_style(scale: u8) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font_for(scale))
        .text_color(BinaryColor::On)
        .background_color(BinaryColor::Off)
        .build()
}

impl<D> TextDisplay for CellDisplay<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn clear(&mut self) -> Result<()> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| Error::Display)?;
        self.cursor = Point::zero();
        Ok(())
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn set_text_scale(&mut self, scale: u8) {
        self.scale = scale.max(1);
    }

    fn print(&mut self, text: &str) -> Result<()> {
        let cell = self.cell_size();
        let style = text_style(self.scale);
        let blank = PrimitiveStyle::with_fill(BinaryColor::Off);
        let mut buf = [0u8; 4];

        for ch in text.chars() {
            // Blank the whole cell so a narrower glyph fully replaces
            // whatever was drawn there before.
            Rectangle::new(self.cursor, cell)
                .into_styled(blank)
                .draw(&mut self.target)
                .map_err(|_| Error::Display)?;

            if ch != ' ' {
                Text::with_baseline(ch.encode_utf8(&mut buf), self.cursor, style, Baseline::Top)
                    .draw(&mut self.target)
                    .map_err(|_| Error::Display)?;
            }

            self.cursor.x += cell.width as i32;
        }
        Ok(())
    }

    fn display(&mut self) -> Result<()> {
        // Draw targets without a frame buffer render immediately.
        Ok(())
    }
}
