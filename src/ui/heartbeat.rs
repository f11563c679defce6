//! Liveness spinner drawn in the top-right corner on every tick.

use crate::config::{FONT_SIZE, FONT_SIZE_SUP, HEARTBEAT_GLYPHS, HEARTBEAT_X, HEARTBEAT_Y};
use crate::error::Result;
use crate::ui::display::TextDisplay;

/// Cyclic animation over `N` glyphs (at least two).
#[derive(Clone, Debug)]
pub struct Heartbeat<const N: usize> {
    glyphs: [&'static str; N],
    frame: usize,
}

/// The spinner used by the HMI.
pub type Spinner = Heartbeat<{ HEARTBEAT_GLYPHS.len() }>;

impl<const N: usize> Heartbeat<N> {
    const AT_LEAST_TWO: () = assert!(N >= 2, "heartbeat needs at least two glyphs");

    pub const fn new(glyphs: [&'static str; N]) -> Self {
        let () = Self::AT_LEAST_TWO;
        Self { glyphs, frame: 0 }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Return the current glyph and step to the next frame.
    pub fn advance(&mut self) -> &'static str {
        let glyph = self.glyphs[self.frame];
        self.frame = (self.frame + 1) % N;
        glyph
    }

    /// Draw the next frame in the small font, then restore the large
    /// scale so later prints are unaffected.
    pub fn draw<D: TextDisplay>(&mut self, display: &mut D) -> Result<()> {
        let glyph = self.advance();
        display.set_text_scale(FONT_SIZE_SUP);
        let res = display.print_at(HEARTBEAT_X, HEARTBEAT_Y, glyph);
        display.set_text_scale(FONT_SIZE);
        res
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(HEARTBEAT_GLYPHS)
    }
}
