//! Static data segment.
//!
//! Each item is a string literal stored as a one-byte length followed by its
//! ASCII bytes. Items are laid out in identifier order.

use std::collections::BTreeMap;

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::source::SourceLine;

/// Marker line opening a block of static declarations.
pub const STATIC_MARKER: &str = ".STATIC";

const MAX_ITEM_LEN: usize = u8::MAX as usize;

/// A laid-out static item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticItem<'a> {
    pub identifier: &'a str,
    /// Literal bytes, without the length prefix.
    pub bytes: &'a [u8],
    /// Offset of the length prefix within the static segment.
    pub offset: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticData {
    items: BTreeMap<String, Vec<u8>>,
}

impl StaticData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item. Returns `false` if the identifier is taken.
    pub fn insert(&mut self, identifier: String, bytes: Vec<u8>) -> bool {
        if self.items.contains_key(&identifier) {
            return false;
        }
        self.items.insert(identifier, bytes);
        true
    }

    /// Parse a `$identifier: "text"` line and add it.
    pub fn declare(&mut self, line: &SourceLine) -> Result<(), SyntaxError> {
        let (identifier, bytes) = parse_declaration(&line.text).map_err(|kind| SyntaxError::new(line, kind))?;
        if !self.insert(identifier.clone(), bytes) {
            return Err(SyntaxError::new(line, SyntaxErrorKind::DuplicateStatic(identifier)));
        }
        Ok(())
    }

    /// Items in layout order with their offsets.
    pub fn items(&self) -> Vec<StaticItem<'_>> {
        let mut offset = 0;
        self.items
            .iter()
            .map(|(identifier, bytes)| {
                let item = StaticItem {
                    identifier,
                    bytes,
                    offset,
                };
                offset += 1 + bytes.len();
                item
            })
            .collect()
    }

    pub fn offset_of(&self, identifier: &str) -> Option<usize> {
        self.items()
            .into_iter()
            .find(|item| item.identifier.eq_ignore_ascii_case(identifier))
            .map(|item| item.offset)
    }

    /// Size of the encoded segment in bytes.
    pub fn encoded_len(&self) -> usize {
        self.items.values().map(|bytes| 1 + bytes.len()).sum()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for bytes in self.items.values() {
            // Lengths are capped at 255 when declared.
            out.push(bytes.len() as u8);
            out.extend_from_slice(bytes);
        }
        out
    }
}

/// Split `$identifier: "text"` into an uppercased identifier and the literal bytes.
fn parse_declaration(text: &str) -> Result<(String, Vec<u8>), SyntaxErrorKind> {
    let rest = text.strip_prefix('$').ok_or(SyntaxErrorKind::MalformedStatic)?;
    let (identifier, value) = rest.split_once(':').ok_or(SyntaxErrorKind::MalformedStatic)?;

    let identifier = identifier.trim();
    if !is_identifier(identifier) {
        return Err(SyntaxErrorKind::MalformedStatic);
    }

    let value = value.trim();
    let literal = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| SyntaxErrorKind::UnsupportedStaticData(value.to_string()))?;

    if !literal.is_ascii() {
        return Err(SyntaxErrorKind::NonAsciiStatic);
    }
    if literal.len() > MAX_ITEM_LEN {
        return Err(SyntaxErrorKind::StaticTooLong(literal.len()));
    }

    Ok((identifier.to_ascii_uppercase(), literal.as_bytes().to_vec()))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
