//! Execution engine for Vehm program images.
//!
//! The VM owns a flat byte memory split into program, stack and heap
//! segments, twelve 16-bit registers and an execution state. It executes
//! one instruction per step and reports every fatal fault as a
//! `RuntimeError`.

mod config;
mod error;
mod memory;
mod snapshot;
mod trace;
mod vm;

#[cfg(test)]
mod trace_tests;

pub use config::{DEFAULT_STACK_SIZE, MAX_MEMORY_SIZE, VmConfig};
pub use error::{LoadError, RuntimeError};
pub use memory::{Memory, MemoryLayout};
pub use snapshot::Snapshot;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use vm::{State, VM, VMBuilder};
