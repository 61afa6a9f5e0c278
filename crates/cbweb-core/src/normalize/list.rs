//! Recovery of string-encoded lists.
//!
//! The CMS sometimes stores a list as one quoted string whose entries are
//! separated by a literal `\r\n` (backslash-r backslash-n) or a real line
//! break, and sometimes wraps that string in a one-element array. Clean arrays
//! pass through untouched.

use serde_json::Value;

/// Parses a list field into trimmed, non-empty entries.
pub fn parse_list(raw: &Value) -> Vec<String> {
    match raw {
        Value::String(s) => parse_list_str(s),
        Value::Array(items) => match items.first() {
            None => Vec::new(),
            Some(Value::String(first)) if has_corruption_markers(first) => parse_list_str(first),
            Some(_) => items.iter().map(element_to_string).collect(),
        },
        _ => Vec::new(),
    }
}

/// True if `s` looks like an encoded list rather than a single clean entry.
pub fn has_corruption_markers(s: &str) -> bool {
    s.contains("\r\n") || s.contains("\\r\\n") || s.starts_with('"')
}

/// Splits a delimiter-encoded string into entries.
pub fn parse_list_str(raw: &str) -> Vec<String> {
    let unwrapped = strip_wrapping_quotes(raw.trim());
    let unescaped = unwrapped.replace("\\\"", "\"");
    let joined = unescaped.replace("\\r\\n", "\n").replace("\r\n", "\n");

    joined
        .split('\n')
        .map(|piece| piece.trim().trim_matches('"').trim())
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_wrapping_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

fn element_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quoted_escaped_crlf_string() {
        assert_eq!(
            parse_list(&json!("\"img1.png\\r\\nimg2.png\"")),
            vec!["img1.png", "img2.png"]
        );
    }

    #[test]
    fn real_line_breaks() {
        assert_eq!(
            parse_list(&json!("Heart rate\r\n SpO2 \nBlood pressure\r\n\r\n")),
            vec!["Heart rate", "SpO2", "Blood pressure"]
        );
    }

    #[test]
    fn clean_array_passes_through() {
        let clean = json!(["/a.png", " spaced ", "/c.png"]);
        assert_eq!(parse_list(&clean), vec!["/a.png", " spaced ", "/c.png"]);
    }

    #[test]
    fn corrupted_first_element_replaces_array() {
        let raw = json!(["\"a.png\\r\\nb.png\"", "ignored.png"]);
        assert_eq!(parse_list(&raw), vec!["a.png", "b.png"]);

        let raw = json!(["\"only.png\"", "ignored.png"]);
        assert_eq!(parse_list(&raw), vec!["only.png"]);
    }

    #[test]
    fn escaped_inner_quotes_do_not_survive() {
        let raw = json!("\"\\\"a.png\\\"\\r\\n\\\"b.png\\\"\"");
        let parsed = parse_list(&raw);
        assert_eq!(parsed, vec!["a.png", "b.png"]);
        for entry in parsed {
            assert!(!entry.contains('"'));
            assert!(!entry.contains("\\r\\n"));
        }
    }

    #[test]
    fn other_shapes_are_empty() {
        assert!(parse_list(&Value::Null).is_empty());
        assert!(parse_list(&json!(7)).is_empty());
        assert!(parse_list(&json!({"a": 1})).is_empty());
        assert!(parse_list(&json!([])).is_empty());
        assert!(parse_list(&json!("")).is_empty());
        assert!(parse_list(&json!("\"\"")).is_empty());
    }

    #[test]
    fn markers() {
        assert!(has_corruption_markers("a\r\nb"));
        assert!(has_corruption_markers("a\\r\\nb"));
        assert!(has_corruption_markers("\"a"));
        assert!(!has_corruption_markers("/images/a.png"));
    }
}
