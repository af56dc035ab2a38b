//! Instruction set and program image format for the Vehm VM.
//!
//! This crate contains:
//! - The opcode table shared by the assembler, the VM and the disassembler
//! - `Word`, the 16-bit cell with unsigned, signed and half-float views
//! - Program header codec and image loading
//! - The disassembler

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod colors;
pub mod disasm;
pub mod image;
pub mod isa;
mod word;

#[cfg(test)]
mod word_tests;

pub use colors::Colors;
pub use disasm::{DisasmError, DisasmOptions, disassemble};
pub use image::{HEADER_SIZE, Header, Image, ImageError, MAGIC, MAX_PAYLOAD_SIZE, VERSION};
pub use isa::{DecodeError, Flags, Instruction, Opcode, Operands, REGISTER_COUNT, Register, Shape};
pub use word::{ArithOp, NumericView, Word};

// Half-float type used by `Word::as_f16`.
pub use half::f16;
