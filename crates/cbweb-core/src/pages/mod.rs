//! Page view-model mappers.
//!
//! Every page follows the same pattern: on mount it issues its content
//! requests, each request resolves its own [`Slice`] of the view model, and a
//! failed request puts that slice's hardcoded fallback in place instead of
//! failing the page. A slice moves `Loading → Ready` or `Loading → Failed`
//! exactly once per mount.
//!
//! If the page is unmounted while a request is in flight, the late result is
//! discarded and the slice stays `Loading`.

pub mod about;
pub mod contact;
pub mod device;
pub mod home;
pub mod navigation;
pub mod news;
pub mod product_details;

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::normalize::UrlNormalizer;
use crate::reconcile::{is_present, normalize_assets, snake_case, ContentSection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceState {
    #[default]
    Loading,
    Ready,
    /// The request failed and fallback content was applied.
    Failed,
}

/// One independently loaded part of a page view model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice<T> {
    pub state: SliceState,
    pub value: T,
}

impl<T: Default> Default for Slice<T> {
    fn default() -> Self {
        Self::loading(T::default())
    }
}

impl<T> Slice<T> {
    /// A slice in `Loading` showing `initial` until its request resolves.
    pub fn loading(initial: T) -> Self {
        Self {
            state: SliceState::Loading,
            value: initial,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == SliceState::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.state == SliceState::Failed
    }

    /// Applies a request outcome, or `fallback()` if it failed.
    ///
    /// Returns false (and changes nothing) when the page was unmounted or the
    /// slice has already resolved.
    pub fn resolve<E: Display>(
        &mut self,
        mount: &MountToken,
        label: &str,
        outcome: Result<T, E>,
        fallback: impl FnOnce() -> T,
    ) -> bool {
        if !mount.is_mounted() {
            tracing::debug!("discarding {} result: page unmounted", label);
            return false;
        }
        if !self.is_loading() {
            tracing::debug!("ignoring repeated {} result", label);
            return false;
        }
        match outcome {
            Ok(value) => {
                self.value = value;
                self.state = SliceState::Ready;
            }
            Err(e) => {
                tracing::warn!("error loading {}: {}; using fallback content", label, e);
                self.value = fallback();
                self.state = SliceState::Failed;
            }
        }
        true
    }
}

/// Liveness of one page mount. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct MountToken {
    unmounted: Arc<AtomicBool>,
}

impl MountToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the page as torn down; later slice results are discarded.
    pub fn unmount(&self) {
        self.unmounted.store(true, Ordering::Relaxed);
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted.load(Ordering::Relaxed)
    }
}

/// A content section whose shape is either the known one (`Typed`) or
/// something else the API sent (`Legacy`, kept verbatim after asset cleanup).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section<T> {
    Typed(T),
    Legacy(Value),
}

impl<T: Default> Default for Section<T> {
    fn default() -> Self {
        Section::Typed(T::default())
    }
}

impl<T: DeserializeOwned + Default> Section<T> {
    /// Interprets a raw section. Missing/null sections are an empty typed
    /// section; objects are asset-normalized and then typed if they fit.
    ///
    /// `T` declares its fields in snake_case. camelCase keys in the payload
    /// fill a field only when the snake_case key is absent.
    pub fn from_value(value: Option<&Value>, urls: &UrlNormalizer) -> Self {
        match value {
            None | Some(Value::Null) => Section::Typed(T::default()),
            Some(Value::Object(map)) => {
                let mut map = map.clone();
                normalize_assets(&mut map, urls);
                let canonical = Value::Object(snake_case_keys(&map));
                let raw = Value::Object(map);
                match serde_json::from_value::<T>(canonical) {
                    Ok(typed) => Section::Typed(typed),
                    Err(e) => {
                        tracing::debug!("section kept in legacy shape: {}", e);
                        Section::Legacy(raw)
                    }
                }
            }
            Some(other) => Section::Legacy(other.clone()),
        }
    }
}

/// Folds every key onto its snake_case form. When both spellings are sent,
/// the snake_case one wins unless it is absent (null, `false` or `""`).
fn snake_case_keys(map: &ContentSection) -> ContentSection {
    let mut out = ContentSection::new();
    for (key, value) in map {
        let snake = snake_case(key);
        let documented = snake == *key;
        let replace = match out.get(&snake) {
            None => true,
            Some(existing) if documented => is_present(value) || !is_present(existing),
            Some(existing) => !is_present(existing) && is_present(value),
        };
        if replace {
            out.insert(snake, value.clone());
        }
    }
    out
}

impl<T> Section<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Section::Typed(t) => Some(t),
            Section::Legacy(_) => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Section::Legacy(_))
    }
}
