//! Asset URL normalization for open (untyped) sections.

use serde_json::Value;

use super::fields::snake_case;
use super::ContentSection;
use crate::normalize::{parse_list, UrlNormalizer};

const ASSET_SUFFIXES: [&str; 11] = [
    "image", "icon", "logo", "img", "_map", "map_url", "image_url", "logo_url", "icon_url",
    "video_url", "thumbnail",
];

const GALLERY_SUFFIXES: [&str; 2] = ["images", "gallery"];

/// True for field names that carry a single asset URL (`image`, `profileImage`, `world_map`, `map`, ...).
pub fn is_asset_key(key: &str) -> bool {
    let key = snake_case(key);
    key == "map" || ASSET_SUFFIXES.iter().any(|suffix| key.ends_with(suffix))
}

fn is_gallery_key(key: &str) -> bool {
    let key = snake_case(key);
    GALLERY_SUFFIXES.iter().any(|suffix| key.ends_with(suffix))
}

/// Recursively cleans every asset-bearing field of `section` in place.
///
/// Single-asset fields become one normalized URL string; gallery fields
/// become a list of normalized URLs (no layout padding).
pub fn normalize_assets(section: &mut ContentSection, urls: &UrlNormalizer) {
    for (key, value) in section.iter_mut() {
        if is_gallery_key(key) && (value.is_string() || value.is_array()) {
            let images = parse_list(value)
                .iter()
                .map(|entry| urls.normalize_str(entry))
                .filter(|url| !url.is_empty())
                .map(Value::String)
                .collect();
            *value = Value::Array(images);
            continue;
        }
        if is_asset_key(key) && is_single_asset(value) {
            *value = Value::String(urls.normalize(value));
            continue;
        }
        match value {
            Value::Object(nested) => normalize_assets(nested, urls),
            Value::Array(items) => {
                for item in items.iter_mut() {
                    if let Value::Object(nested) = item {
                        normalize_assets(nested, urls);
                    }
                }
            }
            _ => {}
        }
    }
}

fn is_single_asset(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}
