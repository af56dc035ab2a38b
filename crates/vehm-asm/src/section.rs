//! Partitioning of instruction lines into labeled sections.

use indexmap::IndexMap;

use crate::error::LinkError;
use crate::lexer::{TokenKind, lex};
use crate::source::SourceLine;

/// Name of the implicit section holding lines before the first label.
pub const START_SECTION: &str = "_START";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub lines: Vec<SourceLine>,
}

impl Section {
    fn new(name: String) -> Self {
        Self {
            name,
            lines: Vec::new(),
        }
    }
}

/// Section name declared by a label line (`loop:` or `.loop:`), uppercased.
pub fn label_name(text: &str) -> Option<String> {
    let upper = text.to_ascii_uppercase();
    match lex(&upper).as_slice() {
        [token] if token.kind == TokenKind::Label => {
            let name = token.text(&upper).trim_start_matches('.').trim_end_matches(':');
            Some(name.to_string())
        }
        _ => None,
    }
}

/// Group lines into sections in declaration order, `_START` first.
///
/// A section may be empty, e.g. a label on the last line.
pub fn partition(lines: Vec<SourceLine>) -> Result<IndexMap<String, Section>, LinkError> {
    let mut sections: IndexMap<String, Section> = IndexMap::new();
    let mut current: Option<String> = None;

    for line in lines {
        if let Some(name) = label_name(&line.text) {
            if sections.contains_key(&name) {
                return Err(LinkError::DuplicateSection(name));
            }
            sections.insert(name.clone(), Section::new(name.clone()));
            current = Some(name);
            continue;
        }

        let name = current.get_or_insert_with(|| START_SECTION.to_string());
        sections
            .entry(name.clone())
            .or_insert_with(|| Section::new(name.clone()))
            .lines
            .push(line);
    }

    // An explicit `_START:` declared after other labels still links first.
    let Some(start) = sections.shift_remove(START_SECTION) else {
        return Ok(sections);
    };
    let mut ordered = IndexMap::with_capacity(sections.len() + 1);
    ordered.insert(START_SECTION.to_string(), start);
    ordered.extend(sections);
    Ok(ordered)
}
