use std::cmp::Ordering;

use half::f16;

use super::word::{ArithOp, NumericView, Word};

fn unsigned(a: u16, op: ArithOp, b: u16) -> Option<u16> {
    Word::from_u16(a)
        .arith(op, Word::from_u16(b), NumericView::Unsigned)
        .map(Word::as_u16)
}

fn signed(a: i16, op: ArithOp, b: i16) -> Option<i16> {
    Word::from_i16(a)
        .arith(op, Word::from_i16(b), NumericView::Signed)
        .map(Word::as_i16)
}

fn half(a: f32, op: ArithOp, b: f32) -> f32 {
    Word::from_f32(a)
        .arith(op, Word::from_f32(b), NumericView::Half)
        .map(|w| w.as_f16().to_f32())
        .unwrap()
}

#[test]
fn views_share_bits() {
    let word = Word::from_i16(-1);
    assert_eq!(word.as_u16(), 0xFFFF);
    assert_eq!(word.to_le_bytes(), [0xFF, 0xFF]);

    let one = Word::from_f16(f16::ONE);
    assert_eq!(one.as_u16(), 0x3C00);
    assert_eq!(Word::from_le_bytes([0x00, 0x3C]), one);
}

#[test]
fn unsigned_arithmetic_wraps() {
    assert_eq!(unsigned(0x00EF, ArithOp::Add, 0xBE00), Some(0xBEEF));
    assert_eq!(unsigned(0xFFFF, ArithOp::Add, 2), Some(1));
    assert_eq!(unsigned(0, ArithOp::Sub, 1), Some(0xFFFF));
    assert_eq!(unsigned(0x8000, ArithOp::Mul, 2), Some(0));
    assert_eq!(unsigned(0x48D0, ArithOp::Div, 4), Some(0x1234));
    assert_eq!(unsigned(7, ArithOp::Div, 0), None);
}

#[test]
fn signed_arithmetic() {
    assert_eq!(signed(-5, ArithOp::Add, 3), Some(-2));
    assert_eq!(signed(-7, ArithOp::Div, 2), Some(-3));
    assert_eq!(signed(i16::MAX, ArithOp::Add, 1), Some(i16::MIN));
    assert_eq!(signed(i16::MIN, ArithOp::Div, -1), Some(i16::MIN));
    assert_eq!(signed(1, ArithOp::Div, 0), None);
}

#[test]
fn half_arithmetic() {
    assert_eq!(half(1.5, ArithOp::Add, 2.25), 3.75);
    assert_eq!(half(1.0, ArithOp::Sub, 4.0), -3.0);
    assert_eq!(half(0.5, ArithOp::Mul, -8.0), -4.0);
    assert_eq!(half(1.0, ArithOp::Div, 0.0), f32::INFINITY);
    assert_eq!(half(65504.0, ArithOp::Add, 65504.0), f32::INFINITY);
    assert!(half(0.0, ArithOp::Div, 0.0).is_nan());
}

#[test]
fn same_bits_different_results() {
    let a = Word::from_u16(0xC000);
    let b = Word::from_u16(0x4000);

    let u = a.arith(ArithOp::Add, b, NumericView::Unsigned).unwrap();
    let f = a.arith(ArithOp::Add, b, NumericView::Half).unwrap();

    assert_eq!(u.as_u16(), 0x0000);
    // -2.0 + 2.0
    assert_eq!(f.as_f16().to_f32(), 0.0);
}

#[test]
fn bitwise() {
    let a = Word::from_u16(0b1100);
    let b = Word::from_u16(0b1010);
    assert_eq!(a.or(b).as_u16(), 0b1110);
    assert_eq!(a.xor(b).as_u16(), 0b0110);
    assert_eq!(a.and(b).as_u16(), 0b1000);
    assert_eq!(a.not().as_u16(), 0xFFF3);
}

#[test]
fn compare_is_unsigned() {
    assert_eq!(Word::from_i16(-1).compare(Word::from_u16(1)), Ordering::Greater);
    assert_eq!(Word::from_u16(3).compare(Word::from_u16(3)), Ordering::Equal);
    assert_eq!(Word::from_u16(2).compare(Word::from_u16(3)), Ordering::Less);
}

#[test]
fn formatting() {
    assert_eq!(Word::from_u16(0xBEEF).to_string(), "0xBEEF");
    assert_eq!(format!("{:?}", Word::from_u16(0x12)), "Word(0x0012)");
}
