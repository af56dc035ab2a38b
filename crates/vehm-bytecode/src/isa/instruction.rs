//! Instruction codec.
//!
//! Encoded layouts (all 16-bit values little-endian):
//! - `NONE`: `[op]`
//! - `IMM`: `[op, lo, hi]`
//! - `REG`: `[op, reg]`
//! - `REG_IMM`: `[op, reg, lo, hi]`
//! - `REG_REG`: `[op, dst, src]`
//! - `REG_MEM`: `[op, reg, lo, hi]`
//! - `MEM_REG`: `[op, lo, hi, reg]`

use std::fmt;

use super::opcode::{Opcode, Shape};
use super::register::Register;

/// Errors raised while decoding an instruction from raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("illegal opcode 0x{0:02X}")]
    IllegalOpcode(u8),

    #[error("invalid register id {0}")]
    InvalidRegister(u8),

    #[error("truncated {opcode:?} instruction: need {needed} bytes, {available} available")]
    Truncated {
        opcode: Opcode,
        needed: usize,
        available: usize,
    },

    #[error("no bytes to decode")]
    Empty,
}

/// Decoded operands, one variant per [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operands {
    None,
    Imm(u16),
    Reg(Register),
    RegImm(Register, u16),
    RegReg(Register, Register),
    RegMem(Register, u16),
    MemReg(u16, Register),
}

impl Operands {
    pub fn shape(&self) -> Shape {
        match self {
            Self::None => Shape::None,
            Self::Imm(_) => Shape::Imm,
            Self::Reg(_) => Shape::Reg,
            Self::RegImm(..) => Shape::RegImm,
            Self::RegReg(..) => Shape::RegReg,
            Self::RegMem(..) => Shape::RegMem,
            Self::MemReg(..) => Shape::MemReg,
        }
    }
}

/// A single decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    operands: Operands,
}

impl Instruction {
    /// Pair an opcode with its operands.
    ///
    /// # Panics
    /// If the operands do not have the opcode's shape.
    pub fn new(opcode: Opcode, operands: Operands) -> Self {
        assert_eq!(
            opcode.shape(),
            operands.shape(),
            "operands do not match {}",
            opcode.name()
        );
        Self { opcode, operands }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn operands(&self) -> Operands {
        self.operands
    }

    pub fn size(&self) -> usize {
        self.opcode.size()
    }

    /// Code address targeted by a jump or `CALL`.
    pub fn target(&self) -> Option<u16> {
        match self.operands {
            Operands::Imm(addr) if self.opcode.takes_label() => Some(addr),
            _ => None,
        }
    }

    /// Replace the code address of a jump or `CALL`.
    pub fn with_target(self, addr: u16) -> Self {
        match self.operands {
            Operands::Imm(_) if self.opcode.takes_label() => Self {
                operands: Operands::Imm(addr),
                ..self
            },
            _ => self,
        }
    }

    /// Decode the instruction at the start of `bytes`. Trailing bytes are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let &byte = bytes.first().ok_or(DecodeError::Empty)?;
        let opcode = Opcode::from_u8(byte).ok_or(DecodeError::IllegalOpcode(byte))?;

        let needed = opcode.size();
        if bytes.len() < needed {
            return Err(DecodeError::Truncated {
                opcode,
                needed,
                available: bytes.len(),
            });
        }

        let reg = |i: usize| {
            let id = bytes[i];
            Register::from_u8(id).ok_or(DecodeError::InvalidRegister(id))
        };
        let word = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);

        let operands = match opcode.shape() {
            Shape::None => Operands::None,
            Shape::Imm => Operands::Imm(word(1)),
            Shape::Reg => Operands::Reg(reg(1)?),
            Shape::RegImm => Operands::RegImm(reg(1)?, word(2)),
            Shape::RegReg => Operands::RegReg(reg(1)?, reg(2)?),
            Shape::RegMem => Operands::RegMem(reg(1)?, word(2)),
            Shape::MemReg => Operands::MemReg(word(1), reg(3)?),
        };

        Ok(Self { opcode, operands })
    }

    /// Append the encoded instruction to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode as u8);
        match self.operands {
            Operands::None => {}
            Operands::Imm(imm) => out.extend_from_slice(&imm.to_le_bytes()),
            Operands::Reg(reg) => out.push(reg as u8),
            Operands::RegImm(reg, value) | Operands::RegMem(reg, value) => {
                out.push(reg as u8);
                out.extend_from_slice(&value.to_le_bytes());
            }
            Operands::RegReg(dst, src) => {
                out.push(dst as u8);
                out.push(src as u8);
            }
            Operands::MemReg(addr, reg) => {
                out.extend_from_slice(&addr.to_le_bytes());
                out.push(reg as u8);
            }
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.encode_into(&mut out);
        out
    }
}

/// Canonical assembly text, e.g. `MOV $REG1 0x00FF` or `CMP $0x0010 $REG2`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        match self.operands {
            Operands::None => Ok(()),
            Operands::Imm(imm) => write!(f, " 0x{imm:04X}"),
            Operands::Reg(reg) => write!(f, " {reg}"),
            Operands::RegImm(reg, imm) => write!(f, " {reg} 0x{imm:04X}"),
            Operands::RegReg(dst, src) => write!(f, " {dst} {src}"),
            Operands::RegMem(reg, addr) => write!(f, " {reg} $0x{addr:04X}"),
            Operands::MemReg(addr, reg) => write!(f, " $0x{addr:04X} {reg}"),
        }
    }
}
