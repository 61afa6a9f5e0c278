//! Response shape reconciliation.
//!
//! The content API wraps page payloads in different envelopes depending on
//! the endpoint (`{data: ..}`, `{content: ..}` or the bare body) and names the
//! same field in both snake_case and camelCase. This module picks the payload
//! and gives page mappers a defensive reader over it.

mod assets;
mod fields;

use serde_json::{Map, Value};

pub use assets::{is_asset_key, normalize_assets};
pub use fields::{key_variants, snake_case, FieldReader};

/// An open mapping from field name to value; no fixed schema.
pub type ContentSection = Map<String, Value>;

/// True if `v` counts as a supplied value: not null, not `false`, not `""`.
pub fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Selects the payload of a response: `data`, else `content`, else the body itself.
pub fn select_payload(response: &Value) -> &Value {
    for key in ["data", "content"] {
        if let Some(v) = response.get(key) {
            if is_present(v) {
                return v;
            }
        }
    }
    response
}

/// Reconciles a response into one content object. Non-object payloads yield an empty map.
pub fn reconcile(response: &Value) -> ContentSection {
    select_payload(response)
        .as_object()
        .cloned()
        .unwrap_or_default()
}
