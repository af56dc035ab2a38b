use crate::lexer::{TokenKind, lex, parse_hex};

fn tokens(line: &str) -> Vec<(TokenKind, &str)> {
    lex(line)
        .into_iter()
        .map(|t| (t.kind, t.text(line)))
        .collect()
}

#[test]
fn instruction_tokens() {
    use TokenKind::*;

    assert_eq!(
        tokens("MOV $REG1, 0X00FF"),
        [(Ident, "MOV"), (Register, "$REG1"), (Immediate, "0X00FF")]
    );
    assert_eq!(
        tokens("CMP\t$0X0010,$RBP"),
        [(Ident, "CMP"), (Memory, "$0X0010"), (Register, "$RBP")]
    );
    assert_eq!(
        tokens("JUMP_EQ _LABEL_0"),
        [(Ident, "JUMP_EQ"), (Ident, "_LABEL_0")]
    );
}

#[test]
fn label_tokens() {
    assert_eq!(tokens("LOOP:"), [(TokenKind::Label, "LOOP:")]);
    assert_eq!(tokens(".LOOP:"), [(TokenKind::Label, ".LOOP:")]);
}

#[test]
fn garbage_is_coalesced() {
    assert_eq!(
        tokens("MOV #@ $REG1"),
        [
            (TokenKind::Ident, "MOV"),
            (TokenKind::Garbage, "#@"),
            (TokenKind::Register, "$REG1"),
        ]
    );
    assert_eq!(
        tokens("PUSH 0X12345"),
        [
            (TokenKind::Ident, "PUSH"),
            (TokenKind::Immediate, "0X1234"),
            (TokenKind::Garbage, "5"),
        ]
    );
}

#[test]
fn hex_values() {
    assert_eq!(parse_hex("0X00FF"), Some(0x00FF));
    assert_eq!(parse_hex("0xF"), Some(0xF));
    assert_eq!(parse_hex("$0XABCD"), Some(0xABCD));
    assert_eq!(parse_hex("12"), None);
}
