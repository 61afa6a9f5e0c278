//! Field-level normalizers for content API values.
//!
//! Everything here is infallible: malformed input degrades to an empty
//! string or list instead of an error.

mod gallery;
mod list;
mod url;

pub use gallery::{pad_cycling, parse_gallery, GalleryOptions};
pub use list::{has_corruption_markers, parse_list, parse_list_str};
pub use url::{normalize_asset_url, UrlNormalizer};
