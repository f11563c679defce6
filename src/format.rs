//! Fixed-width temperature formatting.
//!
//! Splits a signed temperature into the three pieces the screens draw
//! separately: a one-character sign, a space-padded integer part and a
//! zero-padded fractional part.
//!
//! Rounding is half-up on the magnitude: the value is scaled, `0.5` is
//! added and the result truncated, so `-0.05` at one decimal place
//! renders as `-0.1`.

use core::fmt::Write;
use heapless::String;

/// Number of decimal places drawn for a temperature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Precision {
    /// One decimal place, all digits in the large font.
    One,
    /// Two decimal places, fractional digits in the small font.
    Two,
}

impl Precision {
    /// Map a decimal-places count; anything above one means two.
    pub const fn from_dps(dps: u8) -> Self {
        if dps > 1 {
            Precision::Two
        } else {
            Precision::One
        }
    }

    pub const fn multiplier(self) -> i32 {
        match self {
            Precision::One => 10,
            Precision::Two => 100,
        }
    }

    /// Smallest representable step (0.1 or 0.01).
    pub fn step(self) -> f32 {
        1.0 / self.multiplier() as f32
    }
}

/// Text pieces of a formatted temperature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TempText {
    /// `"-"` for negative values, `" "` otherwise (erases a stale sign).
    pub sign: &'static str,
    /// Integer part, right-aligned in two characters. Wider values are
    /// kept whole and overflow the field.
    pub integer: String<12>,
    /// Fractional digits, zero-padded to the precision.
    pub decimals: String<2>,
}

/// Convert `temp` into sign, integer and decimal strings.
///
/// Total for any input; values outside the valid reading range still
/// format, they just overflow the two-character integer field.
pub fn format_temp(temp: f32, precision: Precision) -> TempText {
    let negative = temp < 0.0;
    let magnitude = if negative { -temp } else { temp };

    let mult = precision.multiplier();
    let total = (magnitude * mult as f32 + 0.5) as i32;
    let integer = total / mult;
    let decimals = total - integer * mult;

    let mut int_text = String::new();
    let _ = write!(int_text, "{:2}", integer);

    let mut dec_text = String::new();
    let _ = match precision {
        Precision::One => write!(dec_text, "{:01}", decimals),
        Precision::Two => write!(dec_text, "{:02}", decimals),
    };

    TempText {
        sign: if negative { "-" } else { " " },
        integer: int_text,
        decimals: dec_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_places_splits_digits() {
        let t = format_temp(12.34, Precision::Two);
        assert_eq!(t.sign, " ");
        assert_eq!(t.integer.as_str(), "12");
        assert_eq!(t.decimals.as_str(), "34");
    }

    #[test]
    fn negative_rounds_half_up_on_magnitude() {
        let t = format_temp(-0.05, Precision::One);
        assert_eq!(t.sign, "-");
        assert_eq!(t.integer.as_str(), " 0");
        assert_eq!(t.decimals.as_str(), "1");
    }

    #[test]
    fn zero_has_no_sign() {
        assert_eq!(format_temp(0.0, Precision::One).sign, " ");
        assert_eq!(format_temp(-0.0, Precision::One).sign, " ");
        assert_eq!(format_temp(0.0, Precision::Two).decimals.as_str(), "00");
    }

    #[test]
    fn rounding_carries_into_integer() {
        let t = format_temp(9.96, Precision::One);
        assert_eq!(t.integer.as_str(), "10");
        assert_eq!(t.decimals.as_str(), "0");

        let t = format_temp(23.999, Precision::Two);
        assert_eq!(t.integer.as_str(), "24");
        assert_eq!(t.decimals.as_str(), "00");
    }

    #[test]
    fn small_decimals_are_zero_padded() {
        let t = format_temp(5.07, Precision::Two);
        assert_eq!(t.integer.as_str(), " 5");
        assert_eq!(t.decimals.as_str(), "07");
    }

    #[test]
    fn three_digit_integer_overflows_field() {
        let t = format_temp(123.4, Precision::One);
        assert_eq!(t.integer.as_str(), "123");
        assert_eq!(t.decimals.as_str(), "4");
    }

    #[test]
    fn dps_selector() {
        assert_eq!(Precision::from_dps(0), Precision::One);
        assert_eq!(Precision::from_dps(1), Precision::One);
        assert_eq!(Precision::from_dps(2), Precision::Two);
        assert_eq!(Precision::from_dps(5), Precision::Two);
    }
}
