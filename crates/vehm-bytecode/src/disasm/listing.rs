//! Linear decode of an image into instructions, static items and labels.

use std::collections::{BTreeMap, BTreeSet};

use crate::image::Image;
use crate::isa::Instruction;

use super::DisasmError;

/// Static segment as recovered from the image.
pub(super) enum StaticListing<'a> {
    Empty,
    /// Length-prefixed ASCII items with their offsets.
    Items(Vec<(u16, &'a str)>),
    /// Bytes with no `.STATIC` literal form: not a sequence of
    /// length-prefixed ASCII items, or an item containing `"`.
    Opaque(usize),
}

pub(super) struct Listing<'a> {
    pub statics: StaticListing<'a>,
    pub instructions: Vec<(u16, Instruction)>,
    /// Jump and call targets, keyed by absolute address.
    pub labels: BTreeMap<u16, String>,
    /// Address one past the last instruction.
    pub end: u16,
}

impl<'a> Listing<'a> {
    pub fn decode(image: &'a Image) -> Result<Self, DisasmError> {
        let payload = image.payload();

        let mut instructions = Vec::new();
        let mut pc = image.code_offset();
        while pc < payload.len() {
            let instr = Instruction::decode(&payload[pc..])
                .map_err(|source| DisasmError::Decode { offset: pc, source })?;
            instructions.push((pc as u16, instr));
            pc += instr.size();
        }

        let end = payload.len() as u16;
        let labels = discover_labels(&instructions, end);

        Ok(Self {
            statics: decode_static(image.static_segment()),
            instructions,
            labels,
            end,
        })
    }

    pub fn label(&self, addr: u16) -> Option<&str> {
        self.labels.get(&addr).map(String::as_str)
    }
}

/// Name each distinct target `_LABEL_n` in order of first reference.
///
/// Only targets on an instruction boundary (or the end of the code) can
/// become labels; anything else stays a raw address.
fn discover_labels(instructions: &[(u16, Instruction)], end: u16) -> BTreeMap<u16, String> {
    let boundaries: BTreeSet<u16> = instructions
        .iter()
        .map(|(addr, _)| *addr)
        .chain(std::iter::once(end))
        .collect();

    let mut labels = BTreeMap::new();
    for (_, instr) in instructions {
        let Some(target) = instr.target() else {
            continue;
        };
        if labels.contains_key(&target) || !boundaries.contains(&target) {
            continue;
        }
        let name = format!("_LABEL_{}", labels.len());
        labels.insert(target, name);
    }
    labels
}

fn decode_static(segment: &[u8]) -> StaticListing<'_> {
    if segment.is_empty() {
        return StaticListing::Empty;
    }

    let mut items = Vec::new();
    let mut pos = 0;
    while pos < segment.len() {
        let len = segment[pos] as usize;
        let Some(text) = segment.get(pos + 1..pos + 1 + len) else {
            return StaticListing::Opaque(segment.len());
        };
        // Literals have no escapes, so a quote cannot be written back.
        if !text
            .iter()
            .all(|&b| b.is_ascii() && !b.is_ascii_control() && b != b'"')
        {
            return StaticListing::Opaque(segment.len());
        }
        // ASCII checked above
        let Ok(text) = std::str::from_utf8(text) else {
            return StaticListing::Opaque(segment.len());
        };
        items.push((pos as u16, text));
        pos += 1 + len;
    }
    StaticListing::Items(items)
}
