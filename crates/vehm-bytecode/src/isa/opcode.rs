//! Opcode table shared by the assembler, the VM and the disassembler.
//!
//! Byte layout: the top three bits select the operand [`Shape`], the low five
//! bits index an operation within that shape. `opcode = (shape << 5) | index`.

use crate::word::{ArithOp, NumericView};

/// Operand layout of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Shape {
    /// No operands.
    None = 0,
    /// One 16-bit immediate or address.
    Imm = 1,
    /// One register id.
    Reg = 2,
    /// Register id, then a 16-bit immediate.
    RegImm = 3,
    /// Two register ids.
    RegReg = 4,
    /// Register id, then a 16-bit memory address.
    RegMem = 5,
    /// 16-bit memory address, then a register id.
    MemReg = 6,
}

impl Shape {
    /// Shape class encoded in the top three bits of an opcode byte.
    pub const fn from_opcode_byte(byte: u8) -> Option<Self> {
        match byte >> 5 {
            0 => Some(Self::None),
            1 => Some(Self::Imm),
            2 => Some(Self::Reg),
            3 => Some(Self::RegImm),
            4 => Some(Self::RegReg),
            5 => Some(Self::RegMem),
            6 => Some(Self::MemReg),
            _ => None,
        }
    }

    /// Total instruction size in bytes, opcode included.
    pub const fn size(self) -> usize {
        match self {
            Self::None => 1,
            Self::Imm => 3,
            Self::Reg => 2,
            Self::RegImm => 4,
            Self::RegReg => 3,
            Self::RegMem | Self::MemReg => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Imm => "IMM",
            Self::Reg => "REG",
            Self::RegImm => "REG_IMM",
            Self::RegReg => "REG_REG",
            Self::RegMem => "REG_MEM",
            Self::MemReg => "MEM_REG",
        }
    }
}

/// Every operation of the instruction set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    // Shape::None
    Noop = 0x00,
    Halt = 0x01,
    Ret = 0x02,
    Dup = 0x03,
    Cmp = 0x04,

    // Shape::Imm
    Jump = 0x20,
    JumpEq = 0x21,
    JumpNeq = 0x22,
    JumpGt = 0x23,
    JumpLt = 0x24,
    JumpGeq = 0x25,
    JumpLeq = 0x26,
    Call = 0x27,
    PushImm = 0x28,

    // Shape::Reg
    Push = 0x40,
    Pop = 0x41,
    Not = 0x42,

    // Shape::RegImm
    MovRegImm = 0x60,

    // Shape::RegReg
    MovRegReg = 0x80,
    CmpRegReg = 0x81,
    Add = 0x82,
    Sub = 0x83,
    Mul = 0x84,
    Div = 0x85,
    AddS = 0x86,
    SubS = 0x87,
    MulS = 0x88,
    DivS = 0x89,
    AddF = 0x8A,
    SubF = 0x8B,
    MulF = 0x8C,
    DivF = 0x8D,
    Or = 0x8E,
    Xor = 0x8F,
    And = 0x90,

    // Shape::RegMem
    MovRegMem = 0xA0,
    CmpRegMem = 0xA1,

    // Shape::MemReg
    MovMemReg = 0xC0,
    CmpMemReg = 0xC1,
}

impl Opcode {
    pub const ALL: [Opcode; 39] = [
        Self::Noop,
        Self::Halt,
        Self::Ret,
        Self::Dup,
        Self::Cmp,
        Self::Jump,
        Self::JumpEq,
        Self::JumpNeq,
        Self::JumpGt,
        Self::JumpLt,
        Self::JumpGeq,
        Self::JumpLeq,
        Self::Call,
        Self::PushImm,
        Self::Push,
        Self::Pop,
        Self::Not,
        Self::MovRegImm,
        Self::MovRegReg,
        Self::CmpRegReg,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::AddS,
        Self::SubS,
        Self::MulS,
        Self::DivS,
        Self::AddF,
        Self::SubF,
        Self::MulF,
        Self::DivF,
        Self::Or,
        Self::Xor,
        Self::And,
        Self::MovRegMem,
        Self::CmpRegMem,
        Self::MovMemReg,
        Self::CmpMemReg,
    ];

    pub fn from_u8(byte: u8) -> Option<Self> {
        let op = match byte {
            0x00 => Self::Noop,
            0x01 => Self::Halt,
            0x02 => Self::Ret,
            0x03 => Self::Dup,
            0x04 => Self::Cmp,
            0x20 => Self::Jump,
            0x21 => Self::JumpEq,
            0x22 => Self::JumpNeq,
            0x23 => Self::JumpGt,
            0x24 => Self::JumpLt,
            0x25 => Self::JumpGeq,
            0x26 => Self::JumpLeq,
            0x27 => Self::Call,
            0x28 => Self::PushImm,
            0x40 => Self::Push,
            0x41 => Self::Pop,
            0x42 => Self::Not,
            0x60 => Self::MovRegImm,
            0x80 => Self::MovRegReg,
            0x81 => Self::CmpRegReg,
            0x82 => Self::Add,
            0x83 => Self::Sub,
            0x84 => Self::Mul,
            0x85 => Self::Div,
            0x86 => Self::AddS,
            0x87 => Self::SubS,
            0x88 => Self::MulS,
            0x89 => Self::DivS,
            0x8A => Self::AddF,
            0x8B => Self::SubF,
            0x8C => Self::MulF,
            0x8D => Self::DivF,
            0x8E => Self::Or,
            0x8F => Self::Xor,
            0x90 => Self::And,
            0xA0 => Self::MovRegMem,
            0xA1 => Self::CmpRegMem,
            0xC0 => Self::MovMemReg,
            0xC1 => Self::CmpMemReg,
            _ => return None,
        };
        Some(op)
    }

    pub const fn shape(self) -> Shape {
        match (self as u8) >> 5 {
            0 => Shape::None,
            1 => Shape::Imm,
            2 => Shape::Reg,
            3 => Shape::RegImm,
            4 => Shape::RegReg,
            5 => Shape::RegMem,
            _ => Shape::MemReg,
        }
    }

    /// Instruction size in bytes, opcode included.
    pub const fn size(self) -> usize {
        self.shape().size()
    }

    /// Unique operation name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Noop => "NOOP",
            Self::Halt => "HALT",
            Self::Ret => "RET",
            Self::Dup => "DUP",
            Self::Cmp => "CMP",
            Self::Jump => "JUMP",
            Self::JumpEq => "JUMP_EQ",
            Self::JumpNeq => "JUMP_NEQ",
            Self::JumpGt => "JUMP_GT",
            Self::JumpLt => "JUMP_LT",
            Self::JumpGeq => "JUMP_GEQ",
            Self::JumpLeq => "JUMP_LEQ",
            Self::Call => "CALL",
            Self::PushImm => "PUSH_IMM",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Not => "NOT",
            Self::MovRegImm => "MOV_REG_IMM",
            Self::MovRegReg => "MOV_REG_REG",
            Self::CmpRegReg => "CMP_REG_REG",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::AddS => "ADDS",
            Self::SubS => "SUBS",
            Self::MulS => "MULS",
            Self::DivS => "DIVS",
            Self::AddF => "ADDF",
            Self::SubF => "SUBF",
            Self::MulF => "MULF",
            Self::DivF => "DIVF",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::MovRegMem => "MOV_REG_MEM",
            Self::CmpRegMem => "CMP_REG_MEM",
            Self::MovMemReg => "MOV_MEM_REG",
            Self::CmpMemReg => "CMP_MEM_REG",
        }
    }

    /// Spelling used in assembly source. Several opcodes share a mnemonic and
    /// are told apart by their operand shape.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::PushImm => "PUSH",
            Self::MovRegImm | Self::MovRegReg | Self::MovRegMem | Self::MovMemReg => "MOV",
            Self::CmpRegReg | Self::CmpRegMem | Self::CmpMemReg => "CMP",
            other => other.name(),
        }
    }

    /// Resolve an assembly mnemonic and operand shape to an opcode.
    pub fn lookup(mnemonic: &str, shape: Shape) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.shape() == shape && op.mnemonic().eq_ignore_ascii_case(mnemonic))
    }

    /// True when some opcode is spelled `mnemonic`, regardless of shape.
    pub fn is_mnemonic(mnemonic: &str) -> bool {
        Self::ALL
            .iter()
            .any(|op| op.mnemonic().eq_ignore_ascii_case(mnemonic))
    }

    /// Control-flow opcodes set the program counter themselves.
    pub fn is_control_flow(self) -> bool {
        self.takes_label() || self == Self::Ret
    }

    /// Opcodes whose immediate is a code address (the jump family and `CALL`).
    pub fn takes_label(self) -> bool {
        matches!(
            self,
            Self::Jump
                | Self::JumpEq
                | Self::JumpNeq
                | Self::JumpGt
                | Self::JumpLt
                | Self::JumpGeq
                | Self::JumpLeq
                | Self::Call
        )
    }

    /// Arithmetic semantics of a `REG_REG` arithmetic opcode.
    pub fn arith(self) -> Option<(ArithOp, NumericView)> {
        use ArithOp::*;
        use NumericView::*;

        let pair = match self {
            Self::Add => (Add, Unsigned),
            Self::Sub => (Sub, Unsigned),
            Self::Mul => (Mul, Unsigned),
            Self::Div => (Div, Unsigned),
            Self::AddS => (Add, Signed),
            Self::SubS => (Sub, Signed),
            Self::MulS => (Mul, Signed),
            Self::DivS => (Div, Signed),
            Self::AddF => (Add, Half),
            Self::SubF => (Sub, Half),
            Self::MulF => (Mul, Half),
            Self::DivF => (Div, Half),
            _ => return None,
        };
        Some(pair)
    }

    /// Binary operations that write their result into the first register.
    pub fn is_binary_op(self) -> bool {
        self.arith().is_some() || matches!(self, Self::Or | Self::Xor | Self::And)
    }

    /// Binary operations where swapping the operands does not change the result.
    pub fn is_commutative(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Mul
                | Self::AddS
                | Self::MulS
                | Self::AddF
                | Self::MulF
                | Self::Or
                | Self::Xor
                | Self::And
        )
    }
}
