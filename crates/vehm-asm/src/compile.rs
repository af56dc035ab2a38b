//! Per-line instruction compilation.
//!
//! Each instruction line compiles to fixed bytecode. Jumps and calls that
//! name a label get a zero placeholder plus a [`Relocation`] that the linker
//! patches with the label's section offset.

use vehm_bytecode::{Instruction, Opcode, Operands, Register, Shape};

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind, lex, parse_hex};
use crate::section::Section;
use crate::source::SourceLine;

/// A pending 2-byte little-endian patch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relocation {
    pub label: String,
    /// Byte offset of the placeholder inside its [`CompilationResult`].
    pub offset: usize,
}

/// Bytecode for one instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationResult {
    pub bytecode: Vec<u8>,
    pub relocation: Option<Relocation>,
}

impl CompilationResult {
    fn new(instr: Instruction) -> Self {
        Self {
            bytecode: instr.to_bytes(),
            relocation: None,
        }
    }

    fn relocated(instr: Instruction, label: String) -> Self {
        Self {
            bytecode: instr.to_bytes(),
            // IMM layout: the address follows the opcode byte.
            relocation: Some(Relocation { label, offset: 1 }),
        }
    }

    pub fn len(&self) -> usize {
        self.bytecode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytecode.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledSection {
    pub name: String,
    pub results: Vec<CompilationResult>,
}

impl CompiledSection {
    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.results.iter().map(CompilationResult::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A classified operand token.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Operand {
    Imm(u16),
    Reg(Register),
    Mem(u16),
    Label(String),
}

pub fn compile_section(section: &Section) -> Result<CompiledSection, SyntaxError> {
    let mut results = Vec::with_capacity(section.lines.len());
    for line in &section.lines {
        results.extend(compile_line(line)?);
    }
    Ok(CompiledSection {
        name: section.name.clone(),
        results,
    })
}

/// Compile one instruction line.
///
/// Usually yields one result. Three-register arithmetic (`ADD d a b`) may
/// expand to a `MOV` followed by the operation.
pub fn compile_line(line: &SourceLine) -> Result<Vec<CompilationResult>, SyntaxError> {
    compile_text(&line.text.to_ascii_uppercase()).map_err(|kind| SyntaxError::new(line, kind))
}

fn compile_text(text: &str) -> Result<Vec<CompilationResult>, SyntaxErrorKind> {
    let tokens = lex(text);
    if let Some(garbage) = tokens.iter().find(|t| t.kind == TokenKind::Garbage) {
        return Err(SyntaxErrorKind::UnrecognizedToken(garbage.text(text).to_string()));
    }

    let Some((first, rest)) = tokens.split_first() else {
        return Err(SyntaxErrorKind::ExpectedMnemonic(String::new()));
    };
    if first.kind != TokenKind::Ident {
        return Err(SyntaxErrorKind::ExpectedMnemonic(first.text(text).to_string()));
    }
    let mnemonic = first.text(text);
    if !Opcode::is_mnemonic(mnemonic) {
        return Err(SyntaxErrorKind::UnknownMnemonic(mnemonic.to_string()));
    }

    let operands = rest
        .iter()
        .map(|token| classify(token, text))
        .collect::<Result<Vec<_>, _>>()?;

    let invalid = || SyntaxErrorKind::InvalidOperands {
        mnemonic: mnemonic.to_string(),
        operands: rest
            .iter()
            .map(|t| t.text(text))
            .collect::<Vec<_>>()
            .join(", "),
    };

    let (operands, label) = match operands.as_slice() {
        [] => (Operands::None, None),
        [Operand::Imm(value)] => (Operands::Imm(*value), None),
        [Operand::Label(label)] => (Operands::Imm(0), Some(label.clone())),
        [Operand::Reg(reg)] => (Operands::Reg(*reg), None),
        [Operand::Reg(reg), Operand::Imm(value)] => (Operands::RegImm(*reg, *value), None),
        [Operand::Reg(dst), Operand::Reg(src)] => (Operands::RegReg(*dst, *src), None),
        [Operand::Reg(reg), Operand::Mem(addr)] => (Operands::RegMem(*reg, *addr), None),
        [Operand::Mem(addr), Operand::Reg(reg)] => (Operands::MemReg(*addr, *reg), None),
        [Operand::Reg(dst), Operand::Reg(lhs), Operand::Reg(rhs)] => {
            let opcode = Opcode::lookup(mnemonic, Shape::RegReg)
                .filter(|op| op.is_binary_op())
                .ok_or_else(invalid)?;
            return expand_three_operand(opcode, *dst, *lhs, *rhs);
        }
        _ => return Err(invalid()),
    };

    let opcode = Opcode::lookup(mnemonic, operands.shape()).ok_or_else(invalid)?;
    let instr = Instruction::new(opcode, operands);

    match label {
        Some(label) if opcode.takes_label() => Ok(vec![CompilationResult::relocated(instr, label)]),
        Some(_) => Err(invalid()),
        None => Ok(vec![CompilationResult::new(instr)]),
    }
}

fn classify(token: &Token, line: &str) -> Result<Operand, SyntaxErrorKind> {
    let text = token.text(line);
    let bad = || SyntaxErrorKind::UnrecognizedToken(text.to_string());

    match token.kind {
        TokenKind::Immediate => parse_hex(text).map(Operand::Imm).ok_or_else(bad),
        TokenKind::Memory => parse_hex(text).map(Operand::Mem).ok_or_else(bad),
        TokenKind::Register => Register::parse(text)
            .map(Operand::Reg)
            .ok_or_else(|| SyntaxErrorKind::UnknownRegister(text.to_string())),
        TokenKind::Ident => Ok(Operand::Label(text.to_string())),
        TokenKind::Label => Err(SyntaxErrorKind::UnexpectedLabel(text.to_string())),
        TokenKind::Separator | TokenKind::Garbage => Err(bad()),
    }
}

/// `OP d a b` computes `d = a OP b` with the two-operand `OP d x` (`d = d OP x`).
fn expand_three_operand(
    opcode: Opcode,
    dst: Register,
    lhs: Register,
    rhs: Register,
) -> Result<Vec<CompilationResult>, SyntaxErrorKind> {
    let apply = |operand| {
        CompilationResult::new(Instruction::new(opcode, Operands::RegReg(dst, operand)))
    };

    if dst == lhs {
        return Ok(vec![apply(rhs)]);
    }
    if dst == rhs {
        if opcode.is_commutative() {
            return Ok(vec![apply(lhs)]);
        }
        return Err(SyntaxErrorKind::AliasedOperand(dst.name().to_string()));
    }

    let mov = Instruction::new(Opcode::MovRegReg, Operands::RegReg(dst, lhs));
    Ok(vec![CompilationResult::new(mov), apply(rhs)])
}
