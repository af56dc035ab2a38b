//! Runtime VM for executing assembled Vehm programs.
//!
//! This crate provides the virtual machine that loads a program image into
//! segmented memory and executes it step by step, with optional tracing.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    LoadError, MemoryLayout, NoopTracer, PrintTracer, RuntimeError, Snapshot, State, Tracer, VM,
    VMBuilder, Verbosity, VmConfig,
};
