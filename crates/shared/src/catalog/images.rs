//! Product image canonicalization and display-path resolution.
//!
//! Stored images may be a JSON array, a JSON-encoded string of an array, or an
//! array of objects carrying a `path`. Everything above the repository sees only
//! the canonical `Vec<String>`.

use crate::model::Category;
use serde_json::Value;

pub const DEFAULT_PRODUCT_IMAGE: &str = "/images/default-product.jpg";

/// Normalizes a stored image value into a flat list of non-empty paths.
pub fn canonical_images(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(image_entry).collect(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items.iter().filter_map(image_entry).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn image_entry(item: &Value) -> Option<String> {
    let path = match item {
        Value::String(s) => s.trim_matches('"'),
        Value::Object(map) => map.get("path")?.as_str()?,
        _ => return None,
    };

    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// Default image for a category, matched case-insensitively.
pub fn category_fallback(category: &str) -> Option<&'static str> {
    category.parse::<Category>().ok().map(|c| c.default_image())
}

/// First canonical path, else the category default, else the generic placeholder.
pub fn display_image(images: &[String], category: Option<&str>) -> String {
    if let Some(first) = images.iter().find(|p| !p.is_empty()) {
        return first.clone();
    }

    category
        .and_then(category_fallback)
        .unwrap_or(DEFAULT_PRODUCT_IMAGE)
        .to_string()
}

pub fn resolve_image_path(value: &Value, category: Option<&str>) -> String {
    display_image(&canonical_images(value), category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_array_yields_first_path() {
        let value = json!(["/images/a.jpg", "/images/b.jpg"]);
        assert_eq!(resolve_image_path(&value, Some("Rings")), "/images/a.jpg");
    }

    #[test]
    fn json_encoded_string_is_parsed() {
        let value = json!(r#"["/images/a.jpg"]"#);
        assert_eq!(resolve_image_path(&value, None), "/images/a.jpg");
    }

    #[test]
    fn object_entries_use_path_field() {
        let value = json!([{ "path": "/images/x.jpg", "alt": "x" }, { "alt": "missing" }]);
        assert_eq!(canonical_images(&value), vec!["/images/x.jpg".to_string()]);
    }

    #[test]
    fn wrapping_quotes_are_stripped() {
        let value = json!(["\"/images/q.jpg\""]);
        assert_eq!(canonical_images(&value), vec!["/images/q.jpg".to_string()]);
    }

    #[test]
    fn empty_images_fall_back_to_category() {
        assert_eq!(resolve_image_path(&json!([]), Some("Rings")), "/images/ring.jpg");
        assert_eq!(
            resolve_image_path(&json!([]), Some("NECKLACES")),
            "/images/necklace.jpg"
        );
    }

    #[test]
    fn unparseable_value_with_unknown_category_uses_default() {
        assert_eq!(
            resolve_image_path(&json!("not json"), Some("Anklets")),
            DEFAULT_PRODUCT_IMAGE
        );
        assert_eq!(resolve_image_path(&Value::Null, None), DEFAULT_PRODUCT_IMAGE);
    }

    #[test]
    fn empty_strings_are_skipped() {
        let value = json!(["", "/images/second.jpg"]);
        assert_eq!(resolve_image_path(&value, None), "/images/second.jpg");
    }
}
