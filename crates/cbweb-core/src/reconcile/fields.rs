//! Defensive reads over open content sections.

use serde_json::Value;

use super::{is_present, ContentSection};
use crate::normalize::{parse_list, UrlNormalizer};

/// Returns `key` followed by its camelCase or snake_case counterpart, if different.
pub fn key_variants(key: &str) -> Vec<String> {
    let alt = if key.contains('_') {
        to_camel(key)
    } else if key.chars().any(|c| c.is_ascii_uppercase()) {
        snake_case(key)
    } else {
        key.to_string()
    };
    if alt == key {
        vec![key.to_string()]
    } else {
        vec![key.to_string(), alt]
    }
}

fn to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// snake_case form of a field name; already snake_case names are unchanged.
pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// Read-only view over a section that never fails on missing or mistyped fields.
///
/// Every lookup takes a list of alternate keys in priority order; each key is
/// tried as written and then in its other naming convention.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    section: Option<&'a ContentSection>,
}

impl<'a> FieldReader<'a> {
    pub fn new(section: &'a ContentSection) -> Self {
        Self {
            section: Some(section),
        }
    }

    /// Reader over a JSON value; non-objects read as empty.
    pub fn from_value(value: Option<&'a Value>) -> Self {
        Self {
            section: value.and_then(Value::as_object),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.section.map_or(true, |s| s.is_empty())
    }

    /// First present value among `keys` and their naming variants.
    pub fn get(&self, keys: &[&str]) -> Option<&'a Value> {
        let section = self.section?;
        keys.iter()
            .flat_map(|key| key_variants(key))
            .find_map(|key| section.get(&key).filter(|v| is_present(v)))
    }

    pub fn opt_text(&self, keys: &[&str]) -> Option<String> {
        match self.get(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Text field with a literal default when none of `keys` is present.
    pub fn text(&self, keys: &[&str], default: &str) -> String {
        self.opt_text(keys).unwrap_or_else(|| default.to_string())
    }

    /// Asset URL field, normalized. Empty results read as absent.
    pub fn asset(&self, keys: &[&str], urls: &UrlNormalizer) -> Option<String> {
        let url = urls.normalize(self.get(keys)?);
        (!url.is_empty()).then_some(url)
    }

    pub fn list(&self, keys: &[&str]) -> Vec<String> {
        self.get(keys).map(parse_list).unwrap_or_default()
    }

    /// Embedded collection with at least one element.
    pub fn collection(&self, keys: &[&str]) -> Option<&'a Vec<Value>> {
        self.get(keys)
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
    }

    pub fn i64(&self, keys: &[&str]) -> Option<i64> {
        match self.get(keys)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn flag(&self, keys: &[&str]) -> bool {
        matches!(self.get(keys), Some(Value::Bool(true)))
    }

    /// Nested section reader; missing or non-object sections read as empty.
    pub fn section(&self, keys: &[&str]) -> FieldReader<'a> {
        FieldReader::from_value(self.get(keys).filter(|v| v.is_object()))
    }

}
