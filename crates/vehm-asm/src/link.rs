//! Two-pass section linker.
//!
//! Pass one assigns each section a base address, starting right after the
//! static segment. Pass two concatenates section bytes and patches every
//! relocation with its target section's base address.
//!
//! Labels only name section starts; there is no symbol table inside a section.

use indexmap::IndexMap;
use vehm_bytecode::{HEADER_SIZE, Header, MAX_PAYLOAD_SIZE};

use crate::compile::CompiledSection;
use crate::error::LinkError;
use crate::static_data::StaticData;

/// Output of the linker: everything needed to write an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkedProgram {
    header: Header,
    static_bytes: Vec<u8>,
    code: Vec<u8>,
    section_offsets: IndexMap<String, u16>,
}

impl LinkedProgram {
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn static_bytes(&self) -> &[u8] {
        &self.static_bytes
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Absolute base address of every section, in link order.
    pub fn section_offsets(&self) -> &IndexMap<String, u16> {
        &self.section_offsets
    }

    pub fn section_offset(&self, name: &str) -> Option<u16> {
        self.section_offsets
            .get(&name.to_ascii_uppercase())
            .copied()
    }

    /// Header, static segment, code.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes =
            Vec::with_capacity(HEADER_SIZE + self.static_bytes.len() + self.code.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.static_bytes);
        bytes.extend_from_slice(&self.code);
        bytes
    }
}

pub fn link(
    static_data: &StaticData,
    sections: &IndexMap<String, CompiledSection>,
) -> Result<LinkedProgram, LinkError> {
    let static_bytes = static_data.to_bytes();
    let static_size = u16::try_from(static_bytes.len())
        .map_err(|_| LinkError::StaticSegmentTooLarge(static_bytes.len()))?;

    let code_size: usize = sections.values().map(CompiledSection::len).sum();
    let total = static_bytes.len() + code_size;
    if total > MAX_PAYLOAD_SIZE {
        return Err(LinkError::ProgramTooLarge(total));
    }

    // Pass 1: base addresses. Every base fits in u16 since `total` does.
    let mut section_offsets = IndexMap::with_capacity(sections.len());
    let mut base = static_bytes.len();
    for (name, section) in sections {
        section_offsets.insert(name.clone(), base as u16);
        base += section.len();
    }

    // Pass 2: concatenate and patch.
    let mut code = Vec::with_capacity(code_size);
    for section in sections.values() {
        for result in &section.results {
            let start = code.len();
            code.extend_from_slice(&result.bytecode);

            let Some(reloc) = &result.relocation else {
                continue;
            };
            let target = section_offsets
                .get(&reloc.label)
                .ok_or_else(|| LinkError::UndefinedLabel(reloc.label.clone()))?;
            let at = start + reloc.offset;
            code[at..at + 2].copy_from_slice(&target.to_le_bytes());
        }
    }

    Ok(LinkedProgram {
        header: Header::new(static_size),
        static_bytes,
        code,
        section_offsets,
    })
}
