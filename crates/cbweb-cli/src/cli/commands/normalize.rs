//! `cbweb normalize-url` and `cbweb parse-list`.

use anyhow::Result;
use cbweb_core::api::{ContentClient, Transport};
use cbweb_core::normalize::{parse_gallery, parse_list, UrlNormalizer};
use serde_json::Value;

/// Reads CLI input as JSON when it parses, else as a plain string.
pub(crate) fn raw_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn run_normalize_url(urls: &UrlNormalizer, raw: &str) {
    println!("{}", urls.normalize(&raw_value(raw)));
}

pub fn run_parse_list<T: Transport>(
    client: &ContentClient<T>,
    raw: &str,
    gallery: bool,
) -> Result<()> {
    let value = raw_value(raw);
    let items = if gallery {
        parse_gallery(&value, client.gallery(), client.urls())
    } else {
        parse_list(&value)
    };
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
