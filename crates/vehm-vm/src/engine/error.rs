//! Errors that can occur while loading or executing a program.

use vehm_bytecode::ImageError;

/// Fatal execution errors. Execution cannot continue after one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("illegal opcode 0x{byte:02X} at 0x{pc:04X}")]
    IllegalOpcode { pc: u16, byte: u8 },

    #[error("program counter 0x{pc:04X} is outside the executable region")]
    OutOfBoundsExecution { pc: u16 },

    #[error("invalid register id {id} at 0x{pc:04X}")]
    InvalidRegister { pc: u16, id: u8 },

    #[error("instruction at 0x{pc:04X} runs past the end of the program segment")]
    TruncatedInstruction { pc: u16 },

    #[error("memory access at 0x{addr:04X} is out of bounds")]
    MemoryOutOfBounds { addr: usize },

    #[error("stack overflow (stack pointer 0x{sp:04X})")]
    StackOverflow { sp: u16 },

    #[error("stack underflow (stack pointer 0x{sp:04X})")]
    StackUnderflow { sp: u16 },

    #[error("integer division by zero at 0x{pc:04X}")]
    DivisionByZero { pc: u16 },
}

/// Errors raised while building a VM from an image.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(
        "memory of {memory} bytes cannot hold a {program}-byte program and a {stack}-byte stack"
    )]
    MemoryTooSmall {
        memory: usize,
        program: usize,
        stack: usize,
    },

    #[error("memory size {0} exceeds the 16-bit address space")]
    MemoryTooLarge(usize),
}
