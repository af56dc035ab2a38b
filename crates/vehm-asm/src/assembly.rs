//! Assembly facade: source text through to a linked program.

use indexmap::IndexMap;

use crate::compile::{CompiledSection, compile_section};
use crate::error::{AsmError, LinkError, SyntaxError};
use crate::link::{LinkedProgram, link};
use crate::section::partition;
use crate::source::{SourceLine, normalize};
use crate::static_data::{STATIC_MARKER, StaticData};

/// A parsed and compiled, not yet linked, program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assembly {
    static_data: StaticData,
    sections: IndexMap<String, CompiledSection>,
}

impl Assembly {
    /// Normalize, collect static data, partition into sections and compile.
    pub fn parse(source: &str) -> Result<Self, AsmError> {
        let (static_data, code) = split_static(normalize(source))?;
        let sections = partition(code)?;

        let sections = sections
            .values()
            .map(|section| compile_section(section).map(|c| (c.name.clone(), c)))
            .collect::<Result<IndexMap<_, _>, _>>()?;

        Ok(Self {
            static_data,
            sections,
        })
    }

    pub fn static_data(&self) -> &StaticData {
        &self.static_data
    }

    /// Compiled sections in link order.
    pub fn sections(&self) -> &IndexMap<String, CompiledSection> {
        &self.sections
    }

    pub fn link(&self) -> Result<LinkedProgram, LinkError> {
        link(&self.static_data, &self.sections)
    }
}

/// Assemble source text into image bytes.
pub fn assemble(source: &str) -> Result<Vec<u8>, AsmError> {
    Ok(Assembly::parse(source)?.link()?.to_bytes())
}

/// Pull `.STATIC` blocks out of the line stream.
///
/// A block is the marker line followed by consecutive `$`-prefixed lines.
fn split_static(lines: Vec<SourceLine>) -> Result<(StaticData, Vec<SourceLine>), SyntaxError> {
    let mut data = StaticData::new();
    let mut code = Vec::with_capacity(lines.len());
    let mut in_block = false;

    for line in lines {
        if line.text.eq_ignore_ascii_case(STATIC_MARKER) {
            in_block = true;
            continue;
        }
        if in_block && line.text.starts_with('$') {
            data.declare(&line)?;
            continue;
        }
        in_block = false;
        code.push(line);
    }

    Ok((data, code))
}
