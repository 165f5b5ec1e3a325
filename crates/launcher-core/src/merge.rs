//! Deep merge for JSON-shaped documents
//!
//! Single merge routine shared by the config inheritance chain and the
//! brand store's merge-save path. Objects merge recursively; arrays and
//! scalars in the overlay replace the base value wholesale.

use serde_json::Value;

/// Merge `overlay` into `base`, returning the combined document.
///
/// Keys present only in the base survive. Keys present in the overlay win,
/// except where both sides hold objects, which merge key by key.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}
