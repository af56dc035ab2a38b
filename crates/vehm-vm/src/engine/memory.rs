//! Segmented, bounds-checked VM memory.
//!
//! One byte buffer split into contiguous segments:
//!
//! ```text
//! 0                 program_size      + stack_size          memory_size
//! | static | code   | stack (grows up)  | heap                |
//! ```
//!
//! The stack pointer and stack base are offsets into the stack segment.
//! Memory operands (`$0xHHHH`) are absolute addresses.

use std::ops::Range;

use vehm_bytecode::{Image, Word};

use super::config::{MAX_MEMORY_SIZE, VmConfig};
use super::error::{LoadError, RuntimeError};

/// Segment boundaries, fixed for the VM's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Size of the static data at the start of the program segment.
    pub static_size: usize,
    pub program_offset: usize,
    pub program_size: usize,
    pub stack_offset: usize,
    pub stack_size: usize,
    pub heap_offset: usize,
    pub heap_size: usize,
    pub memory_size: usize,
}

impl MemoryLayout {
    pub fn new(image: &Image, config: &VmConfig) -> Result<Self, LoadError> {
        let memory_size = config.memory_size;
        if memory_size > MAX_MEMORY_SIZE {
            return Err(LoadError::MemoryTooLarge(memory_size));
        }

        let program_size = image.payload().len();
        let stack_size = config.stack_size;
        let heap_offset = program_size + stack_size;
        if heap_offset > memory_size {
            return Err(LoadError::MemoryTooSmall {
                memory: memory_size,
                program: program_size,
                stack: stack_size,
            });
        }

        Ok(Self {
            static_size: image.code_offset(),
            program_offset: 0,
            program_size,
            stack_offset: program_size,
            stack_size,
            heap_offset,
            heap_size: memory_size - heap_offset,
            memory_size,
        })
    }

    pub fn program(&self) -> Range<usize> {
        self.program_offset..self.program_offset + self.program_size
    }

    pub fn stack(&self) -> Range<usize> {
        self.stack_offset..self.stack_offset + self.stack_size
    }

    pub fn heap(&self) -> Range<usize> {
        self.heap_offset..self.heap_offset + self.heap_size
    }

    /// Addresses the program counter may point at.
    pub fn executable(&self, restrict: bool) -> Range<usize> {
        let program = self.program();
        let start = if restrict {
            program.start + self.static_size
        } else {
            program.start
        };
        start..program.end
    }

    /// True if `[addr, addr + len)` touches the program segment.
    pub fn overlaps_program(&self, addr: usize, len: usize) -> bool {
        let program = self.program();
        addr < program.end && program.start < addr + len
    }
}

/// Owned memory buffer with little-endian word access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Zeroed memory with the image payload copied to address 0.
    pub fn load(image: &Image, layout: &MemoryLayout) -> Self {
        let mut bytes = vec![0; layout.memory_size];
        let payload = image.payload();
        bytes[layout.program_offset..layout.program_offset + payload.len()]
            .copy_from_slice(payload);
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn slice(&self, range: Range<usize>) -> Result<&[u8], RuntimeError> {
        let addr = range.start;
        self.bytes
            .get(range)
            .ok_or(RuntimeError::MemoryOutOfBounds { addr })
    }

    pub fn read8(&self, addr: usize) -> Result<u8, RuntimeError> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(RuntimeError::MemoryOutOfBounds { addr })
    }

    pub fn read16(&self, addr: usize) -> Result<Word, RuntimeError> {
        let bytes = self.slice(addr..addr + 2)?;
        Ok(Word::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn write8(&mut self, addr: usize, value: u8) -> Result<(), RuntimeError> {
        let slot = self
            .bytes
            .get_mut(addr)
            .ok_or(RuntimeError::MemoryOutOfBounds { addr })?;
        *slot = value;
        Ok(())
    }

    pub fn write16(&mut self, addr: usize, value: Word) -> Result<(), RuntimeError> {
        let slot = self
            .bytes
            .get_mut(addr..addr + 2)
            .ok_or(RuntimeError::MemoryOutOfBounds { addr })?;
        slot.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}
