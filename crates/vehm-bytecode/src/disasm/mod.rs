//! Disassembler: program image back to assembly text.
//!
//! The output reassembles to the same code bytes. Jump and call targets
//! become `_LABEL_n` sections, the static segment becomes a `.STATIC` block
//! with `$Sxxxx` identifiers named after each item's offset.

mod listing;
mod render;


use crate::Colors;
use crate::image::Image;
use crate::isa::DecodeError;

use listing::Listing;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisasmError {
    #[error("cannot decode instruction at 0x{offset:04X}: {source}")]
    Decode {
        offset: usize,
        #[source]
        source: DecodeError,
    },
}

/// Output settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisasmOptions {
    /// Omit the `_START:` line and leave the leading block unindented.
    pub implicit_start: bool,
    /// Append each instruction's address as a trailing comment.
    pub addresses: bool,
    pub colors: Colors,
}

impl DisasmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn implicit_start(mut self, value: bool) -> Self {
        self.implicit_start = value;
        self
    }

    pub fn addresses(mut self, value: bool) -> Self {
        self.addresses = value;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }
}

/// Disassemble a whole image.
///
/// Fails on the first byte sequence that is not a valid instruction; no
/// partial listing is produced.
pub fn disassemble(image: &Image, options: &DisasmOptions) -> Result<String, DisasmError> {
    let listing = Listing::decode(image)?;
    Ok(render::render(&listing, options))
}
