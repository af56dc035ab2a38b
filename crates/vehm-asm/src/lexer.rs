//! Line lexer.
//!
//! Runs on an uppercased instruction line. Tokens are span-based; text is
//! sliced from the line when needed. Consecutive unrecognized characters are
//! coalesced into one `Garbage` token.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `NAME:` or `.NAME:`
    #[regex(r"\.?[A-Z_][A-Z0-9_]*:")]
    Label,

    /// `0xHHHH`
    #[regex(r"0X[0-9A-F]{1,4}")]
    Immediate,

    /// `$0xHHHH`
    #[regex(r"\$0X[0-9A-F]{1,4}")]
    Memory,

    /// `$REG1`, `$RSP`, ... Validated against the register table by the compiler.
    #[regex(r"\$[A-Z][A-Z0-9]*")]
    Register,

    /// Mnemonic or label reference.
    #[regex(r"[A-Z_][A-Z0-9_]*")]
    Ident,

    /// Operands are separated by whitespace and/or commas.
    #[regex(r"[ \t,]+")]
    Separator,

    Garbage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.clone()]
    }
}

/// Tokenize one line, dropping separators.
pub fn lex(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(line);
    let mut error_start: Option<usize> = None;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..span.start,
                    });
                }
                if kind != TokenKind::Separator {
                    tokens.push(Token { kind, span });
                }
            }
            Err(()) => {
                error_start.get_or_insert(span.start);
            }
        }
    }

    if let Some(start) = error_start {
        tokens.push(Token {
            kind: TokenKind::Garbage,
            span: start..line.len(),
        });
    }

    tokens
}

/// Value of an `0xHHHH` literal, with or without the leading `$`.
pub fn parse_hex(text: &str) -> Option<u16> {
    let digits = text.trim_start_matches('$');
    let digits = digits
        .strip_prefix("0X")
        .or_else(|| digits.strip_prefix("0x"))?;
    u16::from_str_radix(digits, 16).ok()
}
