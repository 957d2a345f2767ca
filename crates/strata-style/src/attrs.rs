//! Attribute trees: `breakpoint → state → property → value`.
//!
//! The engine never owns attribute data. [`ElementAttrs`] holds the raw JSON
//! handed over by the caller, and [`AttributeTree`] is a borrowed view of one
//! feature namespace inside it.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::StyleError;
use strata_common::warning::warn_once;

/// A `(breakpoint, state)` position in an attribute tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate<'c> {
    /// Breakpoint name, e.g. `desktop`.
    pub breakpoint: &'c str,
    /// State name, e.g. `hover`.
    pub state: &'c str,
}

impl<'c> Coordinate<'c> {
    /// Build a coordinate.
    #[must_use]
    pub const fn new(breakpoint: &'c str, state: &'c str) -> Self {
        Self { breakpoint, state }
    }
}

/// All attribute namespaces of one element, as supplied by the caller.
///
/// ```json
/// { "background": { "desktop": { "value": { "color": "#fff" } } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ElementAttrs(Map<String, Value>);

impl ElementAttrs {
    /// Parse element attributes from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidJson`] if the text is not JSON. A JSON
    /// document that is not an object yields empty attributes and a warning.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Wrap an already-parsed JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            other => {
                warn_once(
                    "Attributes",
                    &format!("element attributes must be an object, got {}", kind(&other)),
                );
                Self::default()
            }
        }
    }

    /// The tree stored under a (possibly dotted) namespace, e.g. `dividers.top`.
    ///
    /// Returns `None` when the namespace is absent. A namespace that exists but
    /// is not an object yields an empty tree, so the feature compiles to nothing.
    #[must_use]
    pub fn tree(&self, namespace: &str) -> Option<AttributeTree<'_>> {
        let mut parts = namespace.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(AttributeTree::new(current))
    }

    /// Namespaces present on this element.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A read-only view of one feature's attribute tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeTree<'a> {
    root: Option<&'a Map<String, Value>>,
}

impl<'a> AttributeTree<'a> {
    /// View `value` as an attribute tree. Non-object input yields an empty tree.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self { root: Some(map) },
            Value::Null => Self::default(),
            other => {
                warn_once(
                    "Attributes",
                    &format!("attribute tree must be an object, got {}", kind(other)),
                );
                Self::default()
            }
        }
    }

    /// `true` when no breakpoint is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none_or(Map::is_empty)
    }

    /// The whole value stored at a coordinate, e.g. `tree.desktop.value`.
    #[must_use]
    pub fn at(&self, coord: Coordinate<'_>) -> Option<&'a Value> {
        let value = self.root?.get(coord.breakpoint)?.as_object()?.get(coord.state)?;
        (!value.is_null()).then_some(value)
    }

    /// The raw value at `path` below a coordinate, with no inheritance.
    ///
    /// An empty path returns the coordinate's whole value. `null` counts as unset.
    #[must_use]
    pub fn get(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<&'a Value> {
        let value = lookup(self.at(coord)?, path)?;
        (!value.is_null()).then_some(value)
    }
}

/// Follow `path` through nested objects.
#[must_use]
pub fn lookup<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_namespace() {
        let attrs = ElementAttrs::from_value(json!({
            "dividers": { "top": { "desktop": { "value": { "style": "wave" } } } }
        }));
        let tree = attrs.tree("dividers.top").unwrap();
        assert_eq!(
            tree.get(Coordinate::new("desktop", "value"), &["style"]),
            Some(&json!("wave"))
        );
        assert!(attrs.tree("dividers.bottom").is_none());
    }

    #[test]
    fn test_non_object_tree_is_empty() {
        let attrs = ElementAttrs::from_value(json!({ "font": "bold" }));
        let tree = attrs.tree("font").unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.at(Coordinate::new("desktop", "value")), None);
    }

    #[test]
    fn test_null_is_unset() {
        let value = json!({ "desktop": { "value": { "color": null } } });
        let tree = AttributeTree::new(&value);
        assert_eq!(tree.get(Coordinate::new("desktop", "value"), &["color"]), None);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ElementAttrs::from_json("{not json"),
            Err(StyleError::InvalidJson(_))
        ));
    }
}
