use crate::error::SyntaxErrorKind;
use crate::source::SourceLine;
use crate::static_data::{StaticData, StaticItem};

fn declare(data: &mut StaticData, text: &str) -> Result<(), SyntaxErrorKind> {
    data.declare(&SourceLine::new(1, text)).map_err(|e| e.kind)
}

#[test]
fn items_are_laid_out_by_identifier() {
    let mut data = StaticData::new();
    declare(&mut data, r#"$world: "World""#).unwrap();
    declare(&mut data, r#"$HELLO: "Hi""#).unwrap();

    assert_eq!(
        data.items(),
        [
            StaticItem {
                identifier: "HELLO",
                bytes: b"Hi",
                offset: 0,
            },
            StaticItem {
                identifier: "WORLD",
                bytes: b"World",
                offset: 3,
            },
        ]
    );
    assert_eq!(data.offset_of("world"), Some(3));
    assert_eq!(data.encoded_len(), 9);
    assert_eq!(data.to_bytes(), b"\x02Hi\x05World");
}

#[test]
fn literal_keeps_inner_quotes_and_case() {
    let mut data = StaticData::new();
    declare(&mut data, r#"$Q : "say "hi" now""#).unwrap();
    assert_eq!(data.items()[0].bytes, br#"say "hi" now"#);
}

#[test]
fn empty_literal() {
    let mut data = StaticData::new();
    declare(&mut data, r#"$E: """#).unwrap();
    assert_eq!(data.to_bytes(), [0]);
}

#[test]
fn duplicate_identifier() {
    let mut data = StaticData::new();
    declare(&mut data, r#"$A: "x""#).unwrap();
    assert_eq!(
        declare(&mut data, r#"$a: "y""#),
        Err(SyntaxErrorKind::DuplicateStatic("A".into()))
    );
}

#[test]
fn only_strings_are_supported() {
    let mut data = StaticData::new();
    assert_eq!(
        declare(&mut data, "$N: 0x1234"),
        Err(SyntaxErrorKind::UnsupportedStaticData("0x1234".into()))
    );
}

#[test]
fn malformed_declarations() {
    let mut data = StaticData::new();
    for text in [r#"$A "x""#, r#"$: "x""#, r#"$1A: "x""#, r#"A: "x""#] {
        assert_eq!(
            declare(&mut data, text),
            Err(SyntaxErrorKind::MalformedStatic),
            "{text}"
        );
    }
}

#[test]
fn literal_limits() {
    let mut data = StaticData::new();

    let long = format!("$L: \"{}\"", "x".repeat(256));
    assert_eq!(declare(&mut data, &long), Err(SyntaxErrorKind::StaticTooLong(256)));

    let max = format!("$M: \"{}\"", "x".repeat(255));
    assert_eq!(declare(&mut data, &max), Ok(()));

    assert_eq!(
        declare(&mut data, "$U: \"caf\u{e9}\""),
        Err(SyntaxErrorKind::NonAsciiStatic)
    );
}

#[test]
fn error_names_the_line() {
    let mut data = StaticData::new();
    let err = data
        .declare(&SourceLine::new(7, "$X: 12"))
        .unwrap_err();
    assert_eq!(err.line, 7);
    assert_eq!(
        err.to_string(),
        "syntax error on line 7: unsupported static data `12`, only string literals are supported (in `$X: 12`)"
    );
}
