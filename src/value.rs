//! Style values and style maps.
//!
//! A [`StyleMap`] is an insertion-ordered map from camelCase property names
//! (or nested selector / media query keys) to [`StyleValue`]s. Maps are usually
//! deserialized from JSON, but can be built directly in Rust:
//!
//! ```rust
//! use stylesheets::{StyleMap, StyleValue};
//!
//! let mut button = StyleMap::new();
//! button.insert("color".into(), "red".into());
//! button.insert("padding".into(), StyleValue::from(vec![4, 8]));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered map of style keys to values.
pub type StyleMap = IndexMap<String, StyleValue>;

/// A single style value.
///
/// Arrays and nested maps are never mixed at the same key: a value is exactly
/// one of these variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// A number; unit suffixes are inferred from the property.
    Number(f64),
    /// Text passed through unchanged.
    Text(String),
    /// A list joined with spaces (or commas for list-like properties).
    List(Vec<StyleValue>),
    /// A nested selector, media query, or shorthand sub-object.
    Map(StyleMap),
}

impl StyleValue {
    /// Returns the nested map, if this value is one.
    pub fn as_map(&self) -> Option<&StyleMap> {
        match self {
            StyleValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            StyleValue::Number(_) => "number",
            StyleValue::Text(_) => "string",
            StyleValue::List(_) => "array",
            StyleValue::Map(_) => "object",
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl<T: Into<StyleValue>> From<Vec<T>> for StyleValue {
    fn from(values: Vec<T>) -> Self {
        StyleValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<StyleMap> for StyleValue {
    fn from(map: StyleMap) -> Self {
        StyleValue::Map(map)
    }
}

/// Deserializes a style map from a JSON value, keeping key order.
pub fn style_map_from_json(value: serde_json::Value) -> crate::Result<StyleMap> {
    Ok(serde_json::from_value(value)?)
}
