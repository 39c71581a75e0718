const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Whether `name` can stand as a Go identifier (and is not a keyword).
pub fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric()) && !GO_KEYWORDS.contains(&name)
}

/// Quote `value` as a Go interpreted string literal, escaping the way
/// `strconv.Quote` does for the characters that need it.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_go_identifier("User"));
        assert!(is_go_identifier("_private2"));
        assert!(is_go_identifier("Ünïcode"));
        assert!(!is_go_identifier(""));
        assert!(!is_go_identifier("2fast"));
        assert!(!is_go_identifier("has-dash"));
        assert!(!is_go_identifier("pkg.Type"));
        assert!(!is_go_identifier("func"));
        assert!(!is_go_identifier("type"));
    }

    #[test]
    fn quote_plain_path() {
        assert_eq!(quote_string("models/user.go"), "\"models/user.go\"");
    }

    #[test]
    fn quote_escapes_backslashes_and_quotes() {
        assert_eq!(
            quote_string(r#"C:\src\"odd".go"#),
            r#""C:\\src\\\"odd\".go""#
        );
    }

    #[test]
    fn quote_escapes_control_characters() {
        assert_eq!(quote_string("a\nb\tc"), "\"a\\nb\\tc\"");
        assert_eq!(quote_string("\u{1}"), "\"\\x01\"");
        assert_eq!(quote_string("\u{85}"), "\"\\u0085\"");
    }

    #[test]
    fn quote_keeps_printable_unicode() {
        assert_eq!(quote_string("données"), "\"données\"");
    }
}
