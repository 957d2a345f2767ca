//! Companion class names computed alongside the CSS.

use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

/// An ordered, duplicate-free set of class names.
///
/// Displays as the space-joined list the markup layer puts in `class="…"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassNames(IndexSet<String>);

impl ClassNames {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class name. Blank names are ignored.
    pub fn add(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.trim().is_empty() {
            let _ = self.0.insert(name);
        }
    }

    /// Add every name of `other`, keeping first-seen order.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// `true` when `name` is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// `true` when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_unique_names() {
        let mut names = ClassNames::new();
        names.add("section_has_divider");
        names.add("et_pb_top_divider");
        names.add("section_has_divider");
        names.add(" ");

        assert_eq!(names.len(), 2);
        assert_eq!(names.to_string(), "section_has_divider et_pb_top_divider");
    }
}
