//! Session-scoped content cache.
//!
//! Keyed by page key (plus fixed keys such as [`NEWS_PAGE_KEY`]). There is no
//! expiry and no size bound: one cache lives for one application session and
//! is injected into the content client rather than held globally.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

/// Cache key for the news listing payload.
pub const NEWS_PAGE_KEY: &str = "news_page";

#[derive(Debug, Default)]
pub struct ContentCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    pub fn put(&self, key: &str, content: Value) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), content);
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(key)
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_before_put_is_absent() {
        let cache = ContentCache::new();
        assert!(cache.get("about").is_none());
        assert!(!cache.contains("about"));
        assert!(cache.is_empty());
    }

    #[test]
    fn put_then_get_returns_structurally_equal_value() {
        let cache = ContentCache::new();
        let about = json!({"pageKey": "about", "content": {"header": {"main_title": "X"}}});
        cache.put("about", about.clone());
        cache.put(NEWS_PAGE_KEY, json!({"newsArticles": []}));
        assert_eq!(cache.get("about"), Some(about));
        assert_eq!(cache.get(NEWS_PAGE_KEY), Some(json!({"newsArticles": []})));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn last_write_wins() {
        let cache = ContentCache::new();
        cache.put("home", json!(1));
        cache.put("home", json!(2));
        assert_eq!(cache.get("home"), Some(json!(2)));
    }

    #[test]
    fn clear_removes_everything() {
        let cache = ContentCache::new();
        cache.put("home", json!({}));
        cache.put("contact", json!({}));
        cache.clear();
        assert!(cache.get("home").is_none());
        assert!(cache.is_empty());
    }
}
