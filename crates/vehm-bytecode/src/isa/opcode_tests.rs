use std::collections::HashSet;

use super::{Opcode, Shape};

#[test]
fn opcode_byte_roundtrip() {
    for op in Opcode::ALL {
        assert_eq!(Opcode::from_u8(op as u8), Some(op), "{}", op.name());
    }
}

#[test]
fn shape_comes_from_high_bits() {
    for op in Opcode::ALL {
        assert_eq!(Shape::from_opcode_byte(op as u8), Some(op.shape()));
        assert_eq!(op.size(), op.shape().size());
    }
}

#[test]
fn shape_sizes() {
    assert_eq!(Shape::None.size(), 1);
    assert_eq!(Shape::Imm.size(), 3);
    assert_eq!(Shape::Reg.size(), 2);
    assert_eq!(Shape::RegImm.size(), 4);
    assert_eq!(Shape::RegReg.size(), 3);
    assert_eq!(Shape::RegMem.size(), 4);
    assert_eq!(Shape::MemReg.size(), 4);
}

#[test]
fn unknown_bytes_are_rejected() {
    for byte in [0x05, 0x1F, 0x29, 0x43, 0x61, 0x91, 0xA2, 0xC2, 0xE0, 0xFF] {
        assert_eq!(Opcode::from_u8(byte), None, "0x{byte:02X}");
    }
    assert_eq!(Shape::from_opcode_byte(0xE0), None);
}

#[test]
fn names_are_unique() {
    let names: HashSet<_> = Opcode::ALL.iter().map(|op| op.name()).collect();
    assert_eq!(names.len(), Opcode::ALL.len());
}

#[test]
fn mnemonic_and_shape_select_a_single_opcode() {
    for op in Opcode::ALL {
        assert_eq!(Opcode::lookup(op.mnemonic(), op.shape()), Some(op));
    }
}

#[test]
fn lookup_shared_mnemonics() {
    assert_eq!(Opcode::lookup("mov", Shape::RegImm), Some(Opcode::MovRegImm));
    assert_eq!(Opcode::lookup("MOV", Shape::RegReg), Some(Opcode::MovRegReg));
    assert_eq!(Opcode::lookup("MOV", Shape::RegMem), Some(Opcode::MovRegMem));
    assert_eq!(Opcode::lookup("MOV", Shape::MemReg), Some(Opcode::MovMemReg));
    assert_eq!(Opcode::lookup("CMP", Shape::None), Some(Opcode::Cmp));
    assert_eq!(Opcode::lookup("PUSH", Shape::Imm), Some(Opcode::PushImm));
    assert_eq!(Opcode::lookup("PUSH", Shape::Reg), Some(Opcode::Push));
    assert_eq!(Opcode::lookup("MOV", Shape::Imm), None);
    assert_eq!(Opcode::lookup("FROB", Shape::None), None);
}

#[test]
fn control_flow_set() {
    let control: Vec<_> = Opcode::ALL
        .into_iter()
        .filter(|op| op.is_control_flow())
        .map(|op| op.name())
        .collect();

    assert_eq!(
        control,
        [
            "RET", "JUMP", "JUMP_EQ", "JUMP_NEQ", "JUMP_GT", "JUMP_LT", "JUMP_GEQ", "JUMP_LEQ",
            "CALL"
        ]
    );
    assert!(!Opcode::Ret.takes_label());
    assert!(!Opcode::PushImm.takes_label());
}

#[test]
fn binary_ops_are_reg_reg() {
    for op in Opcode::ALL.into_iter().filter(|op| op.is_binary_op()) {
        assert_eq!(op.shape(), Shape::RegReg, "{}", op.name());
    }
    assert!(Opcode::Or.is_binary_op());
    assert!(Opcode::Or.arith().is_none());
    assert!(!Opcode::Sub.is_commutative());
    assert!(Opcode::MulF.is_commutative());
}
