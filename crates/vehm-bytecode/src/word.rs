//! The 16-bit machine word.
//!
//! A `Word` is only its two bytes. Unsigned, signed and half-float are views
//! picked per operation: `ADD`, `ADDS` and `ADDF` read the same bits
//! differently, and nothing records which view produced a value.

use std::cmp::Ordering;
use std::fmt;

use half::f16;

/// Interpretation applied to a word's bits by an arithmetic operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericView {
    Unsigned,
    Signed,
    /// IEEE754 binary16.
    Half,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Word(u16);

impl Word {
    pub const ZERO: Self = Self(0);

    pub const fn from_u16(value: u16) -> Self {
        Self(value)
    }

    pub const fn from_i16(value: i16) -> Self {
        Self(value as u16)
    }

    pub fn from_f16(value: f16) -> Self {
        Self(value.to_bits())
    }

    /// Nearest half-float to `value`.
    pub fn from_f32(value: f32) -> Self {
        Self::from_f16(f16::from_f32(value))
    }

    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub const fn as_u16(self) -> u16 {
        self.0
    }

    pub const fn as_i16(self) -> i16 {
        self.0 as i16
    }

    pub fn as_f16(self) -> f16 {
        f16::from_bits(self.0)
    }

    /// Apply `op` to `self` and `rhs` under `view`.
    ///
    /// Integer arithmetic wraps. Returns `None` for integer division by zero;
    /// half-float division by zero yields an infinity or NaN.
    pub fn arith(self, op: ArithOp, rhs: Word, view: NumericView) -> Option<Word> {
        let result = match view {
            NumericView::Unsigned => {
                let (a, b) = (self.as_u16(), rhs.as_u16());
                Self::from_u16(match op {
                    ArithOp::Add => a.wrapping_add(b),
                    ArithOp::Sub => a.wrapping_sub(b),
                    ArithOp::Mul => a.wrapping_mul(b),
                    ArithOp::Div => a.checked_div(b)?,
                })
            }
            NumericView::Signed => {
                let (a, b) = (self.as_i16(), rhs.as_i16());
                Self::from_i16(match op {
                    ArithOp::Add => a.wrapping_add(b),
                    ArithOp::Sub => a.wrapping_sub(b),
                    ArithOp::Mul => a.wrapping_mul(b),
                    ArithOp::Div if b == 0 => return None,
                    ArithOp::Div => a.wrapping_div(b),
                })
            }
            NumericView::Half => {
                let (a, b) = (self.as_f16(), rhs.as_f16());
                Self::from_f16(match op {
                    ArithOp::Add => a + b,
                    ArithOp::Sub => a - b,
                    ArithOp::Mul => a * b,
                    ArithOp::Div => a / b,
                })
            }
        };
        Some(result)
    }

    pub const fn or(self, rhs: Word) -> Word {
        Self(self.0 | rhs.0)
    }

    pub const fn xor(self, rhs: Word) -> Word {
        Self(self.0 ^ rhs.0)
    }

    pub const fn and(self, rhs: Word) -> Word {
        Self(self.0 & rhs.0)
    }

    pub const fn not(self) -> Word {
        Self(!self.0)
    }

    /// Unsigned three-way comparison.
    pub fn compare(self, rhs: Word) -> Ordering {
        self.0.cmp(&rhs.0)
    }
}

impl From<u16> for Word {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Word> for u16 {
    fn from(word: Word) -> Self {
        word.0
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(0x{:04X})", self.0)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}
