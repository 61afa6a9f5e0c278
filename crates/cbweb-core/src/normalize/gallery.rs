//! Image galleries: list recovery plus URL cleanup, dedup and optional padding.

use std::collections::HashSet;

use serde_json::Value;

use super::list::parse_list;
use super::url::UrlNormalizer;
use crate::config::SiteConfig;

/// Layout options for gallery lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryOptions {
    /// Non-empty galleries shorter than this are padded by cycling their entries.
    pub pad_len: Option<usize>,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self { pad_len: Some(4) }
    }
}

impl GalleryOptions {
    pub fn from_config(cfg: &SiteConfig) -> Self {
        Self {
            pad_len: cfg.gallery_pad_len,
        }
    }
}

/// Parses a gallery field into unique, normalized image URLs, padded per `opts`.
pub fn parse_gallery(raw: &Value, opts: &GalleryOptions, urls: &UrlNormalizer) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images: Vec<String> = parse_list(raw)
        .iter()
        .map(|entry| urls.normalize_str(entry))
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert(url.clone()))
        .collect();

    if let Some(target) = opts.pad_len {
        pad_cycling(&mut images, target);
    }
    images
}

/// Repeats existing entries in order until `items` has `target` entries.
/// Empty input stays empty.
pub fn pad_cycling(items: &mut Vec<String>, target: usize) {
    let original = items.len();
    if original == 0 {
        return;
    }
    let mut i = 0;
    while items.len() < target {
        let next = items[i % original].clone();
        items.push(next);
        i += 1;
    }
}
