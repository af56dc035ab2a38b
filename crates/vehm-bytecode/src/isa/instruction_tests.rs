use super::{DecodeError, Instruction, Opcode, Operands, Register};

fn sample() -> Vec<Instruction> {
    vec![
        Instruction::new(Opcode::Halt, Operands::None),
        Instruction::new(Opcode::JumpNeq, Operands::Imm(0x1234)),
        Instruction::new(Opcode::Pop, Operands::Reg(Register::R3)),
        Instruction::new(Opcode::MovRegImm, Operands::RegImm(Register::R1, 0x00FF)),
        Instruction::new(Opcode::Add, Operands::RegReg(Register::R2, Register::Sp)),
        Instruction::new(Opcode::MovRegMem, Operands::RegMem(Register::R8, 0xABCD)),
        Instruction::new(Opcode::CmpMemReg, Operands::MemReg(0x0010, Register::Sb)),
    ]
}

#[test]
fn encode_layouts() {
    let bytes: Vec<Vec<u8>> = sample().iter().map(Instruction::to_bytes).collect();

    assert_eq!(bytes[0], [0x01]);
    assert_eq!(bytes[1], [0x22, 0x34, 0x12]);
    assert_eq!(bytes[2], [0x41, 0x02]);
    assert_eq!(bytes[3], [0x60, 0x00, 0xFF, 0x00]);
    assert_eq!(bytes[4], [0x82, 0x01, 0x09]);
    assert_eq!(bytes[5], [0xA0, 0x07, 0xCD, 0xAB]);
    assert_eq!(bytes[6], [0xC1, 0x10, 0x00, 0x0A]);
}

#[test]
fn decode_reverses_encode() {
    for instr in sample() {
        let bytes = instr.to_bytes();
        assert_eq!(bytes.len(), instr.size());
        assert_eq!(Instruction::decode(&bytes), Ok(instr));
    }
}

#[test]
fn decode_ignores_trailing_bytes() {
    let instr = Instruction::decode(&[0x40, 0x00, 0xFF, 0xFF]).unwrap();
    assert_eq!(instr.operands(), Operands::Reg(Register::R1));
}

#[test]
fn decode_errors() {
    assert_eq!(Instruction::decode(&[]), Err(DecodeError::Empty));
    assert_eq!(
        Instruction::decode(&[0xEE]),
        Err(DecodeError::IllegalOpcode(0xEE))
    );
    assert_eq!(
        Instruction::decode(&[0x60, 0x00, 0xFF]),
        Err(DecodeError::Truncated {
            opcode: Opcode::MovRegImm,
            needed: 4,
            available: 3,
        })
    );
    assert_eq!(
        Instruction::decode(&[0x80, 0x00, 0x0C]),
        Err(DecodeError::InvalidRegister(0x0C))
    );
}

#[test]
fn jump_target() {
    let jump = Instruction::new(Opcode::Call, Operands::Imm(0x0020));
    assert_eq!(jump.target(), Some(0x0020));
    assert_eq!(jump.with_target(0x0040).target(), Some(0x0040));

    let push = Instruction::new(Opcode::PushImm, Operands::Imm(0x0020));
    assert_eq!(push.target(), None);
    assert_eq!(push.with_target(0x0040), push);
}

#[test]
#[should_panic(expected = "operands do not match MOV_REG_IMM")]
fn new_rejects_mismatched_shape() {
    Instruction::new(Opcode::MovRegImm, Operands::Imm(1));
}

#[test]
fn display_is_assembly_text() {
    let text = sample()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(text, @r"
    HALT
    JUMP_NEQ 0x1234
    POP $REG3
    MOV $REG1 0x00FF
    ADD $REG2 $RSP
    MOV $REG8 $0xABCD
    CMP $0x0010 $RBP
    ");
}

#[test]
fn register_names() {
    assert_eq!(Register::parse("$reg1"), Some(Register::R1));
    assert_eq!(Register::parse("$RBP"), Some(Register::Sb));
    assert_eq!(Register::parse("$RFL"), Some(Register::Flags));
    assert_eq!(Register::parse("$REG0"), None);
    assert_eq!(Register::parse("$REG9"), None);
    assert_eq!(Register::from_u8(8), Some(Register::Pc));
    assert_eq!(Register::from_u8(12), None);
}

#[test]
fn flags_hold_one_comparison_outcome() {
    use std::cmp::Ordering;

    use super::Flags;

    let flags = Flags::from_bits(Flags::INTERRUPT | Flags::EQUAL);
    let flags = flags.with_ordering(Ordering::Less);
    assert!(flags.less_than());
    assert!(!flags.equal());
    assert!(!flags.greater_than());
    assert!(flags.interrupt());

    let flags = flags.with_ordering(Ordering::Greater);
    assert_eq!(flags.bits(), Flags::INTERRUPT | Flags::GREATER_THAN);
    assert_eq!(format!("{flags:?}"), "Flags(GT|INT)");
}
