//! Asset URL cleanup.

use std::ops::Range;

use serde_json::Value;

use crate::config::HostRewrite;

/// HTML entities the CMS uses for quote characters.
const ENTITY_QUOTES: [&str; 6] = ["&quot;", "&#34;", "&#x22;", "&#X22;", "&apos;", "&#39;"];

/// Cleans asset URLs returned by the content API.
///
/// Never fails: anything it cannot make sense of becomes an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlNormalizer {
    rewrite: Option<HostRewrite>,
}

impl Default for UrlNormalizer {
    fn default() -> Self {
        Self {
            rewrite: Some(HostRewrite::default()),
        }
    }
}

impl UrlNormalizer {
    pub fn new(rewrite: Option<HostRewrite>) -> Self {
        Self { rewrite }
    }

    /// Normalizes a JSON value: strings are cleaned, arrays use their first
    /// element, everything else (null, numbers, objects) yields `""`.
    pub fn normalize(&self, raw: &Value) -> String {
        match raw {
            Value::String(s) => self.normalize_str(s),
            Value::Array(items) => items
                .first()
                .map(|first| self.normalize(first))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Normalizes a single URL string.
    ///
    /// - drops garbage before an embedded `http` (e.g. `x"http://h/p` → `http://h/p`)
    /// - removes entity-encoded, escaped and literal quotes, then trims
    /// - collapses repeated scheme prefixes (`http://https://h` → `https://h`)
    /// - applies the configured development host rewrite
    pub fn normalize_str(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let start = match raw.find("http") {
            Some(i) if i > 0 => i,
            _ => 0,
        };
        let mut s = raw[start..].to_string();

        for entity in ENTITY_QUOTES {
            if s.contains(entity) {
                s = s.replace(entity, "");
            }
        }
        s = s.replace("\\\"", "").replace("\\'", "");
        s.retain(|c| c != '"' && c != '\'');

        let s = collapse_scheme(s.trim());
        match &self.rewrite {
            Some(rewrite) => rewrite_host(&s, rewrite),
            None => s,
        }
    }
}

/// Normalizes with the default development host rewrite.
pub fn normalize_asset_url(raw: &Value) -> String {
    UrlNormalizer::default().normalize(raw)
}

fn collapse_scheme(s: &str) -> String {
    let mut rest = s;
    while let Some(idx) = rest.find("://") {
        let after = &rest[idx + 3..];
        if after.starts_with("http://") || after.starts_with("https://") {
            rest = after;
        } else {
            break;
        }
    }
    rest.to_string()
}

/// Replaces the host of `s` when it matches `rewrite.from`. Everything else in
/// the input is kept byte for byte.
fn rewrite_host(s: &str, rewrite: &HostRewrite) -> String {
    let Ok(parsed) = url::Url::parse(s) else {
        return s.to_string();
    };
    if parsed.host_str() != Some(rewrite.from.as_str()) {
        return s.to_string();
    }
    match host_span(s) {
        Some(span) if s[span.clone()].eq_ignore_ascii_case(&rewrite.from) => {
            let mut out = String::with_capacity(s.len() + rewrite.to.len());
            out.push_str(&s[..span.start]);
            out.push_str(&rewrite.to);
            out.push_str(&s[span.end..]);
            out
        }
        _ => {
            tracing::debug!("host rewrite skipped for {}: host not found verbatim", s);
            s.to_string()
        }
    }
}

/// Byte range of the host in `scheme://[userinfo@]host[:port][/...]`.
fn host_span(s: &str) -> Option<Range<usize>> {
    let authority_start = s.find("://")? + 3;
    let rest = &s[authority_start..];
    let authority_len = rest
        .find(|c: char| matches!(c, '/' | '?' | '#' | '\\'))
        .unwrap_or(rest.len());
    let authority = &rest[..authority_len];
    let host_start = authority.rfind('@').map_or(0, |i| i + 1);
    let host = &authority[host_start..];
    let host_len = if host.starts_with('[') {
        host.find(']').map_or(host.len(), |i| i + 1)
    } else {
        host.find(':').unwrap_or(host.len())
    };
    let start = authority_start + host_start;
    Some(start..start + host_len)
}
