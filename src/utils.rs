//! Shape normalization for decoded manifest values.
//!
//! The same logical field can arrive as a plain string, a one-element
//! array (every XML child element is an array) or an attribute-bearing
//! object with its text under [`TEXT_KEY`]. These helpers reduce all of
//! those to plain strings before any tree-building logic looks at them.

use std::slice;

use serde_json::Value;

use crate::decoder::{ATTRIBUTES_KEY, TEXT_KEY};

/// Iterate over the values stored under `key`.
///
/// Arrays yield their items, any other present value yields itself once and
/// a missing key yields nothing.
pub fn children<'a>(node: &'a Value, key: &str) -> slice::Iter<'a, Value> {
    match node.get(key) {
        Some(Value::Array(items)) => items.iter(),
        Some(value) => slice::from_ref(value).iter(),
        None => Default::default(),
    }
}

/// Reduce a value to its textual content.
///
/// Strings are returned as-is, arrays contribute their first element,
/// objects contribute their text key, numbers and booleans are rendered.
pub fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(text_value),
        Value::Object(map) => map.get(TEXT_KEY).and_then(text_value),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
    }
}

/// Text of the first value stored under `key`.
pub fn first_text(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(text_value)
}

/// Look up an XML attribute on a decoded element.
pub fn attribute<'a>(node: &'a Value, name: &str) -> Option<&'a str> {
    node.get(ATTRIBUTES_KEY)?.get(name)?.as_str()
}

/// Interpret a flag attribute such as `developmentDependency`.
///
/// Any non-empty value other than `false` counts as set.
pub fn is_truthy(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => !v.is_empty() && !v.eq_ignore_ascii_case("false"),
        None => false,
    }
}
