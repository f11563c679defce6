//! One-wire sensor identities.

use core::fmt::Write;
use heapless::String;

/// Length of a one-wire ROM code.
pub const ADDRESS_LEN: usize = 8;

/// Unique identifier of a one-wire temperature sensor.
pub type DeviceAddress = [u8; ADDRESS_LEN];

/// An all-zero identity marks a sensor slot that has not been bound.
pub fn is_zero_address(address: &[u8]) -> bool {
    address.iter().all(|&b| b == 0)
}

/// Render bytes as uppercase, zero-padded hex with no separators.
///
/// At most [`ADDRESS_LEN`] bytes are rendered (16 characters).
pub fn hex_string(address: &[u8]) -> String<{ 2 * ADDRESS_LEN }> {
    let mut out = String::new();
    for b in address.iter().take(ADDRESS_LEN) {
        let _ = write!(out, "{:02X}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_detection() {
        assert!(is_zero_address(&[0; ADDRESS_LEN]));
        for i in 0..ADDRESS_LEN {
            let mut addr = [0u8; ADDRESS_LEN];
            addr[i] = 0x01;
            assert!(!is_zero_address(&addr));
        }
    }

    #[test]
    fn hex_is_uppercase_and_padded() {
        assert_eq!(hex_string(&[0x0A, 0xFF, 0x01]).as_str(), "0AFF01");
    }

    #[test]
    fn full_rom_code_is_sixteen_chars() {
        let rom = [0x28, 0xFF, 0x4C, 0x02, 0x91, 0x16, 0x04, 0xB3];
        let hex = hex_string(&rom);
        assert_eq!(hex.len(), 16);
        assert_eq!(hex.as_str(), "28FF4C02911604B3");
    }
}
