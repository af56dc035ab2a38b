//! Vehm assembler: source text to a linked program image.
//!
//! Pipeline:
//! - `source` - comment stripping and blank-line removal
//! - `static_data` - `.STATIC` string declarations
//! - `section` - label lines split the program into sections
//! - `compile` - per-line bytecode with pending relocations
//! - `link` - section layout and relocation patching
//! - `assembly` - the facade tying it together

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod assembly;
pub mod compile;
pub mod error;
pub mod lexer;
pub mod link;
pub mod section;
pub mod source;
pub mod static_data;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod static_data_tests;

pub use assembly::{Assembly, assemble};
pub use compile::{CompilationResult, CompiledSection, Relocation};
pub use error::{AsmError, LinkError, SyntaxError, SyntaxErrorKind};
pub use link::LinkedProgram;
pub use section::START_SECTION;
pub use static_data::{StaticData, StaticItem};
