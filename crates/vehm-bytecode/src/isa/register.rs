//! Register file layout and the flags word.

use std::fmt;

/// Number of registers in the register file.
pub const REGISTER_COUNT: usize = 12;

/// A register id as encoded in instruction operands.
///
/// Indices 0..=7 are general purpose, followed by the program counter,
/// stack pointer, stack base and flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Register {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
    Pc = 8,
    Sp = 9,
    Sb = 10,
    Flags = 11,
}

impl Register {
    pub const ALL: [Register; REGISTER_COUNT] = [
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::Pc,
        Self::Sp,
        Self::Sb,
        Self::Flags,
    ];

    /// Function return value.
    pub const RETURN_VALUE: Register = Self::R1;
    /// Holds the caller's stack base during a call.
    pub const SB_BACKUP: Register = Self::R6;
    /// Holds the caller's stack pointer during a call.
    pub const SP_BACKUP: Register = Self::R7;
    /// Holds the address following the `CALL` instruction.
    pub const RETURN_ADDRESS: Register = Self::R8;

    pub fn from_u8(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Assembly spelling, e.g. `$REG1` or `$RSP`.
    pub fn name(self) -> &'static str {
        match self {
            Self::R1 => "$REG1",
            Self::R2 => "$REG2",
            Self::R3 => "$REG3",
            Self::R4 => "$REG4",
            Self::R5 => "$REG5",
            Self::R6 => "$REG6",
            Self::R7 => "$REG7",
            Self::R8 => "$REG8",
            Self::Pc => "$RPC",
            Self::Sp => "$RSP",
            Self::Sb => "$RBP",
            Self::Flags => "$RFL",
        }
    }

    /// Parse an assembly register name. Case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|reg| reg.name().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of the flags register.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u16);

impl Flags {
    pub const EQUAL: u16 = 0b0001;
    pub const LESS_THAN: u16 = 0b0010;
    pub const GREATER_THAN: u16 = 0b0100;
    pub const INTERRUPT: u16 = 0b1000;

    const COMPARISON: u16 = Self::EQUAL | Self::LESS_THAN | Self::GREATER_THAN;

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Record a comparison outcome. Exactly one comparison bit ends up set;
    /// bits outside the comparison set are preserved.
    pub fn with_ordering(self, ordering: std::cmp::Ordering) -> Self {
        use std::cmp::Ordering::*;

        let bit = match ordering {
            Less => Self::LESS_THAN,
            Equal => Self::EQUAL,
            Greater => Self::GREATER_THAN,
        };
        Self((self.0 & !Self::COMPARISON) | bit)
    }

    pub fn equal(self) -> bool {
        self.0 & Self::EQUAL != 0
    }

    pub fn less_than(self) -> bool {
        self.0 & Self::LESS_THAN != 0
    }

    pub fn greater_than(self) -> bool {
        self.0 & Self::GREATER_THAN != 0
    }

    pub fn interrupt(self) -> bool {
        self.0 & Self::INTERRUPT != 0
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = Vec::new();
        if self.equal() {
            set.push("EQ");
        }
        if self.less_than() {
            set.push("LT");
        }
        if self.greater_than() {
            set.push("GT");
        }
        if self.interrupt() {
            set.push("INT");
        }
        write!(f, "Flags({})", set.join("|"))
    }
}
