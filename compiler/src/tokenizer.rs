use regex::Regex;
use lazy_static::lazy_static;

lazy_static! {
    pub static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    pub static ref TYPE_TOKEN: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\[\])?$").unwrap();
    pub static ref STRUCT_ID:  Regex = Regex::new(r"^(?:0x([0-9A-Fa-f]+)|([0-9]+))$").unwrap();
}

pub const MSG_KEYWORD: &str = "msg";
pub const ARRAY_SUFFIX: &str = "[]";

/// One physical line of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line text including its terminator.
    pub raw:    &'a str,
}

impl<'a> SourceLine<'a> {
    /// Line text without the terminator, as shown in diagnostics.
    pub fn content(&self) -> String {
        self.raw.trim_end_matches(['\n', '\r']).to_string()
    }
}

/// Splits the input into lines, keeping each terminator so that verbatim
/// text can be reproduced byte for byte.
pub fn split_lines(text: &str) -> impl Iterator<Item = SourceLine<'_>> {
    text.split_inclusive('\n')
        .enumerate()
        .map(|(i, raw)| SourceLine { number: i + 1, raw })
}

/// Separates a member line into its declaration part and the comment that
/// follows the first `;`. The comment excludes the `;` and the terminator.
pub fn split_comment(raw: &str) -> (&str, Option<&str>) {
    match raw.find(';') {
        Some(idx) => (
            &raw[..idx],
            Some(raw[idx + 1..].trim_end_matches(['\n', '\r'])),
        ),
        None => (raw, None),
    }
}

pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Parses a decimal or `0x` hexadecimal message id.
///
/// `None` means the token is not a number at all; `Some(None)` means it is a
/// number too large to be represented.
pub fn parse_struct_id(token: &str) -> Option<Option<u64>> {
    let caps = STRUCT_ID.captures(token)?;
    let parsed = match (caps.get(1), caps.get(2)) {
        (Some(hex), _) => u64::from_str_radix(hex.as_str(), 16).ok(),
        (None, Some(dec)) => dec.as_str().parse::<u64>().ok(),
        (None, None) => return None,
    };
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_terminators() {
        let lines: Vec<SourceLine> = split_lines("a\n\nb").collect();
        assert_eq!(
            lines,
            vec![
                SourceLine { number: 1, raw: "a\n" },
                SourceLine { number: 2, raw: "\n" },
                SourceLine { number: 3, raw: "b" },
            ]
        );
        assert_eq!(lines[0].content(), "a");
    }

    #[test]
    fn test_split_comment() {
        assert_eq!(
            split_comment("    int x ; // counter\n"),
            ("    int x ", Some(" // counter"))
        );
        assert_eq!(split_comment("    int x\n"), ("    int x\n", None));
        assert_eq!(split_comment("int x;a;b"), ("int x", Some("a;b")));
    }

    #[test]
    fn test_parse_struct_id() {
        assert_eq!(parse_struct_id("12"), Some(Some(12)));
        assert_eq!(parse_struct_id("0xff"), Some(Some(255)));
        assert_eq!(parse_struct_id("0x1A"), Some(Some(26)));
        assert_eq!(parse_struct_id("99999999999999999999999"), Some(None));
        assert_eq!(parse_struct_id("twelve"), None);
        assert_eq!(parse_struct_id("-1"), None);
        assert_eq!(parse_struct_id("0x"), None);
    }

    #[test]
    fn test_token_patterns() {
        assert!(IDENTIFIER.is_match("point_2d"));
        assert!(!IDENTIFIER.is_match("2d"));
        assert!(TYPE_TOKEN.is_match("float[]"));
        assert!(!TYPE_TOKEN.is_match("float[4]"));
    }
}
