//! Source normalization: comments, whitespace and blank lines.

/// A non-blank source line with comments removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    /// One-based line number in the original source.
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Split into lines, strip `//` comments, trim, drop blank lines.
pub fn normalize(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = strip_comment(raw).trim();
            (!text.is_empty()).then(|| SourceLine::new(i + 1, text))
        })
        .collect()
}

/// `//` inside a string literal does not start a comment.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
    }
    line
}
