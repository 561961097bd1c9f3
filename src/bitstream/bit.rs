use std::fmt::{Display, Formatter};

use crate::error::{CodecError, Result};

/// A single binary digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Convert an integer to a Bit. Anything other than 0 or 1 is rejected.
    pub fn from_int(value: i32) -> Result<Bit> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(CodecError::InvalidArgument(format!(
                "bit must be 0 or 1: {}",
                other
            ))),
        }
    }

    /// Returns 0 or 1.
    pub fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    pub fn flip(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }

    /// The character used for this bit in code strings.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(set: bool) -> Self {
        if set {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl Display for Bit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod test {
    use super::Bit;
    use crate::error::CodecError;

    #[test]
    fn from_int_test() {
        assert_eq!(Bit::from_int(0).unwrap(), Bit::Zero);
        assert_eq!(Bit::from_int(1).unwrap(), Bit::One);
        assert!(matches!(Bit::from_int(2), Err(CodecError::InvalidArgument(_))));
        assert!(matches!(Bit::from_int(-1), Err(CodecError::InvalidArgument(_))));
    }

    #[test]
    fn flip_test() {
        assert_eq!(Bit::Zero.flip(), Bit::One);
        assert_eq!(Bit::One.flip().flip(), Bit::One);
    }

    #[test]
    fn display_test() {
        assert_eq!(format!("{}{}", Bit::One, Bit::Zero), "10");
        assert_eq!(Bit::from(true).as_char(), '1');
    }
}
