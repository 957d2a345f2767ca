//! CSS property/value pairs produced by the declaration compilers.

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::important::Important;

/// One `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// CSS property name.
    pub property: String,
    /// CSS value, without `!important`.
    pub value: String,
}

/// An ordered list of declarations for one selector.
///
/// Properties keep their insertion order. Pushing a property twice keeps both;
/// the later one wins in the browser, as it would in hand-written CSS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations(Vec<Declaration>);

impl Declarations {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `property: value`.
    pub fn push(&mut self, property: &str, value: impl Into<String>) {
        self.0.push(Declaration {
            property: property.to_string(),
            value: value.into(),
        });
    }

    /// Append every declaration of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// `true` when nothing was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The last value pushed for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    /// `true` when `property` was pushed.
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.0.iter()
    }

    /// Serialize as `prop: value;` pairs separated by spaces.
    #[must_use]
    pub fn to_css(&self, important: &Important) -> String {
        let mut css = String::new();
        for decl in &self.0 {
            if !css.is_empty() {
                css.push(' ');
            }
            let marker = if important.applies_to(&decl.property) {
                " !important"
            } else {
                ""
            };
            let _ = write!(css, "{}: {}{marker};", decl.property, decl.value);
        }
        css
    }
}

/// Which element a block of declarations styles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The element the request's selector names.
    Element,
    /// A child element, addressed by appending this combinator text to each
    /// selector part, e.g. `> .et_pb_background_mask`.
    Child(String),
}

impl Target {
    /// A child target.
    #[must_use]
    pub fn child(suffix: &str) -> Self {
        Self::Child(suffix.to_string())
    }
}

/// Declarations grouped by target, in first-seen target order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet(IndexMap<Target, Declarations>);

impl DeclarationSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only element declarations.
    #[must_use]
    pub fn element(declarations: Declarations) -> Self {
        let mut set = Self::new();
        set.extend(&Target::Element, declarations);
        set
    }

    /// Mutable declarations for `target`, created on first use.
    pub fn target(&mut self, target: Target) -> &mut Declarations {
        self.0.entry(target).or_default()
    }

    /// Append declarations to `target`. Empty lists are ignored.
    pub fn extend(&mut self, target: &Target, declarations: Declarations) {
        if !declarations.is_empty() {
            self.target(target.clone()).extend(declarations);
        }
    }

    /// Append every target of `other`.
    pub fn merge(&mut self, other: Self) {
        for (target, declarations) in other.0 {
            self.extend(&target, declarations);
        }
    }

    /// Declarations for `target`, if any.
    #[must_use]
    pub fn get(&self, target: &Target) -> Option<&Declarations> {
        self.0.get(target)
    }

    /// Element declarations, if any.
    #[must_use]
    pub fn element_declarations(&self) -> Option<&Declarations> {
        self.get(&Target::Element)
    }

    /// `true` when no target has declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Declarations::is_empty)
    }

    /// Iterate targets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Target, &Declarations)> {
        self.0.iter()
    }
}
