//! Instruction set: opcode table, register file layout and instruction codec.

mod instruction;
mod opcode;
mod register;

#[cfg(test)]
mod instruction_tests;
#[cfg(test)]
mod opcode_tests;

pub use instruction::{DecodeError, Instruction, Operands};
pub use opcode::{Opcode, Shape};
pub use register::{Flags, REGISTER_COUNT, Register};
