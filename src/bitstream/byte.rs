//! Byte: an 8 bit container with both integer and per-bit access.
//!
//! Only the integer value is stored, so the bit view can never drift from it.
//! Positions follow the writer's convention: position 7 is the most significant
//! bit and position 0 the least significant. `bits()` returns the bits in
//! stream order, index 0 being the most significant.

use std::fmt::{Display, Formatter};

use super::bit::Bit;
use crate::error::{CodecError, Result};

pub const NUMBER_OF_BITS: usize = 8;
pub const MIN_POSITION: usize = 0;
pub const MAX_POSITION: usize = NUMBER_OF_BITS - 1;
pub const MIN_VALUE: i32 = 0;
pub const MAX_VALUE: i32 = 255;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Byte {
    value: u8,
}

impl Byte {
    /// Create a Byte, rejecting values outside 0-255.
    pub fn new(value: i32) -> Result<Byte> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(CodecError::InvalidArgument(format!(
                "value must be between {} and {}: {}",
                MIN_VALUE, MAX_VALUE, value
            )));
        }
        Ok(Byte { value: value as u8 })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Bits in stream order (index 0 = most significant).
    pub fn bits(&self) -> [Bit; NUMBER_OF_BITS] {
        let mut bits = [Bit::Zero; NUMBER_OF_BITS];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = Bit::from((self.value >> (MAX_POSITION - i)) & 1 == 1);
        }
        bits
    }

    /// Bit at `position` (7 = most significant).
    pub fn get(&self, position: usize) -> Result<Bit> {
        check_position(position)?;
        Ok(Bit::from((self.value >> position) & 1 == 1))
    }

    /// Set the bit at `position` (7 = most significant).
    pub fn set(&mut self, position: usize, bit: Bit) -> Result<()> {
        check_position(position)?;
        match bit {
            Bit::Zero => self.value &= !(1 << position),
            Bit::One => self.value |= 1 << position,
        }
        Ok(())
    }

    pub fn increase(&mut self, n: i32) -> Result<&mut Self> {
        self.shift_value(self.value as i32 + n)
    }

    pub fn decrease(&mut self, n: i32) -> Result<&mut Self> {
        self.shift_value(self.value as i32 - n)
    }

    fn shift_value(&mut self, next: i32) -> Result<&mut Self> {
        if next > MAX_VALUE {
            return Err(CodecError::InvalidArgument(format!(
                "value cannot go above max value {}: {}",
                MAX_VALUE, next
            )));
        }
        if next < MIN_VALUE {
            return Err(CodecError::InvalidArgument(format!(
                "value cannot go below min value {}: {}",
                MIN_VALUE, next
            )));
        }
        self.value = next as u8;
        Ok(self)
    }
}

fn check_position(position: usize) -> Result<()> {
    if position > MAX_POSITION {
        return Err(CodecError::InvalidArgument(format!(
            "index must be between {} and {}: {}",
            MIN_POSITION, MAX_POSITION, position
        )));
    }
    Ok(())
}

impl From<u8> for Byte {
    fn from(value: u8) -> Self {
        Byte { value }
    }
}

impl Display for Byte {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Byte{{value={}, bits={:08b}}}", self.value, self.value)
    }
}

/// Expand a byte slice into its bits, most significant bit of each byte first.
pub fn to_bits(bytes: &[u8]) -> Vec<Bit> {
    bytes
        .iter()
        .flat_map(|&b| Byte::from(b).bits())
        .collect()
}

/// Render a byte slice as a string of '0' and '1'.
pub fn to_binary_string(bytes: &[u8]) -> String {
    to_bits(bytes).iter().map(|b| b.as_char()).collect()
}

/// Number of fill bits needed to round `length` bits up to a whole byte.
pub fn missing_bits(length: usize) -> usize {
    (NUMBER_OF_BITS - (length % NUMBER_OF_BITS)) % NUMBER_OF_BITS
}

#[cfg(test)]
mod test {
    use super::*;

    fn assemble(bits: &[Bit]) -> u8 {
        bits.iter().fold(0, |acc, b| acc << 1 | b.value())
    }

    #[test]
    fn new_range_test() {
        assert!(Byte::new(0).is_ok());
        assert!(Byte::new(255).is_ok());
        assert!(matches!(Byte::new(256), Err(CodecError::InvalidArgument(_))));
        assert!(matches!(Byte::new(-1), Err(CodecError::InvalidArgument(_))));
    }

    #[test]
    fn bits_msb_first_test() {
        let byte = Byte::from(0b1000_0010);
        let bits = byte.bits();
        assert_eq!(bits[0], Bit::One);
        assert_eq!(bits[6], Bit::One);
        assert_eq!(bits[7], Bit::Zero);
        assert_eq!(byte.get(7).unwrap(), Bit::One);
        assert_eq!(byte.get(1).unwrap(), Bit::One);
        assert_eq!(byte.get(0).unwrap(), Bit::Zero);
        assert!(byte.get(8).is_err());
    }

    #[test]
    fn set_keeps_value_consistent_test() {
        let mut byte = Byte::default();
        byte.set(7, Bit::One).unwrap();
        assert_eq!(byte.value(), 128);
        byte.set(0, Bit::One).unwrap();
        assert_eq!(byte.value(), 129);
        byte.set(7, Bit::Zero).unwrap();
        assert_eq!(byte.value(), 1);
        assert_eq!(assemble(&byte.bits()), byte.value());
        assert!(byte.set(8, Bit::One).is_err());
    }

    #[test]
    fn increase_decrease_test() {
        let mut byte = Byte::new(250).unwrap();
        byte.increase(5).unwrap();
        assert_eq!(byte.value(), 255);
        assert!(byte.increase(1).is_err());
        byte.decrease(255).unwrap();
        assert_eq!(byte.value(), 0);
        assert!(byte.decrease(1).is_err());
        byte.increase(3).unwrap().decrease(1).unwrap();
        assert_eq!(byte.value(), 2);
        assert_eq!(assemble(&byte.bits()), 2);
    }

    #[test]
    fn out_of_range_message_names_crossed_bound_test() {
        let mut byte = Byte::new(2).unwrap();
        let below = byte.increase(-3).unwrap_err().to_string();
        assert!(below.contains("below min value 0"), "{}", below);
        let above = byte.decrease(-254).unwrap_err().to_string();
        assert!(above.contains("above max value 255"), "{}", above);
        assert_eq!(byte.value(), 2);
    }

    #[test]
    fn every_value_assembles_test() {
        for v in 0..=255u8 {
            assert_eq!(assemble(&Byte::from(v).bits()), v);
        }
    }

    #[test]
    fn helpers_test() {
        assert_eq!(to_binary_string(&[0b1010_0000, 0xff]), "1010000011111111");
        assert_eq!(to_bits(&[1]).len(), 8);
        assert_eq!(missing_bits(0), 0);
        assert_eq!(missing_bits(1), 7);
        assert_eq!(missing_bits(8), 0);
        assert_eq!(missing_bits(13), 3);
    }
}
