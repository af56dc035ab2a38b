//! Assembler errors.
//!
//! Syntax errors are raised while compiling a single line and always name it.
//! Link errors concern the program as a whole.

use crate::source::SourceLine;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AsmError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Link(#[from] LinkError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error on line {line}: {kind} (in `{text}`)")]
pub struct SyntaxError {
    /// One-based line number in the original source.
    pub line: usize,
    pub text: String,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub fn new(line: &SourceLine, kind: SyntaxErrorKind) -> Self {
        Self {
            line: line.number,
            text: line.text.clone(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("unrecognized token `{0}`")]
    UnrecognizedToken(String),

    #[error("expected a mnemonic, found `{0}`")]
    ExpectedMnemonic(String),

    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),

    #[error("unknown register `{0}`")]
    UnknownRegister(String),

    #[error("label `{0}` cannot be used as an operand")]
    UnexpectedLabel(String),

    #[error("invalid operands for {mnemonic}: `{operands}`")]
    InvalidOperands { mnemonic: String, operands: String },

    #[error("destination {0} is also the right operand of a non-commutative operation")]
    AliasedOperand(String),

    #[error("malformed static declaration, expected `$identifier: \"text\"`")]
    MalformedStatic,

    #[error("unsupported static data `{0}`, only string literals are supported")]
    UnsupportedStaticData(String),

    #[error("static identifier `{0}` is already declared")]
    DuplicateStatic(String),

    #[error("static string is {0} bytes long, the limit is 255")]
    StaticTooLong(usize),

    #[error("static string contains non-ASCII characters")]
    NonAsciiStatic,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("duplicate section `{0}`")]
    DuplicateSection(String),

    #[error("undefined label `{0}`")]
    UndefinedLabel(String),

    #[error("static segment of {0} bytes exceeds the 16-bit address space")]
    StaticSegmentTooLarge(usize),

    #[error("program of {0} bytes exceeds the 16-bit address space")]
    ProgramTooLarge(usize),
}
