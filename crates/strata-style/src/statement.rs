//! Statement grouping and serialization.
//!
//! Every compiler emits `{atRules, selector, declaration}` triples. The
//! [`StatementGroup`] keys them by `(atRules, selector)`: a second statement
//! with the same key is appended to the first one's declaration instead of
//! producing another selector block. Nothing is dropped; if a property
//! appears twice, the later one wins in the browser as usual.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::Serialize;
use strum_macros::{Display, EnumString};

/// A single CSS emission unit prior to text serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssStatement {
    /// Wrapping at-rule, e.g. `@media only screen and (max-width: 980px)`; empty for none.
    pub at_rules: String,
    /// Selector; empty for free-form CSS that carries its own selectors.
    pub selector: String,
    /// Declaration text, or raw CSS for the free-form bucket.
    pub declaration: String,
}

impl CssStatement {
    /// Build a statement.
    #[must_use]
    pub fn new(at_rules: &str, selector: &str, declaration: &str) -> Self {
        Self {
            at_rules: at_rules.to_string(),
            selector: selector.to_string(),
            declaration: declaration.to_string(),
        }
    }
}

/// Output shape requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// A list of [`CssStatement`]s.
    Statements,
    /// A single CSS string.
    #[default]
    Text,
}

/// Serialized statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleOutput {
    /// Structured statements, in group order.
    Statements(Vec<CssStatement>),
    /// CSS text, optionally wrapped in a `<style>` element.
    Text(String),
}

/// Accumulates statements for one compilation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementGroup {
    entries: IndexMap<(String, String), String>,
}

impl StatementGroup {
    /// An empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement, merging into an existing one with the same key.
    ///
    /// Empty declarations are ignored.
    pub fn add(&mut self, statement: CssStatement) {
        if statement.declaration.trim().is_empty() {
            return;
        }
        let CssStatement {
            at_rules,
            selector,
            declaration,
        } = statement;

        #[cfg(feature = "style-trace")]
        eprintln!("[STATEMENT] at_rules={at_rules:?} selector={selector:?} declaration={declaration:?}");

        let _ = self
            .entries
            .entry((at_rules, selector))
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(&declaration);
            })
            .or_insert(declaration);
    }

    /// Add raw CSS under the empty-selector bucket of `at_rules`.
    pub fn add_raw(&mut self, at_rules: &str, css: &str) {
        self.add(CssStatement::new(at_rules, "", css));
    }

    /// Append every statement of `other`, merging keys.
    pub fn merge(&mut self, other: Self) {
        for statement in other.into_statements() {
            self.add(statement);
        }
    }

    /// Number of distinct `(atRules, selector)` keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The merged declaration for a key.
    #[must_use]
    pub fn declaration(&self, at_rules: &str, selector: &str) -> Option<&str> {
        self.entries
            .get(&(at_rules.to_string(), selector.to_string()))
            .map(String::as_str)
    }

    /// Statements in first-seen key order.
    #[must_use]
    pub fn statements(&self) -> Vec<CssStatement> {
        self.entries
            .iter()
            .map(|((at_rules, selector), declaration)| CssStatement::new(at_rules, selector, declaration))
            .collect()
    }

    /// Consume the group into statements.
    #[must_use]
    pub fn into_statements(self) -> Vec<CssStatement> {
        self.entries
            .into_iter()
            .map(|((at_rules, selector), declaration)| CssStatement {
                at_rules,
                selector,
                declaration,
            })
            .collect()
    }

    /// Serialize in the requested shape.
    #[must_use]
    pub fn serialize(&self, format: OutputFormat, as_style: bool) -> StyleOutput {
        match format {
            OutputFormat::Statements => StyleOutput::Statements(self.statements()),
            OutputFormat::Text => {
                let css = self.to_css();
                if as_style && !css.is_empty() {
                    StyleOutput::Text(format!("<style>{css}</style>"))
                } else {
                    StyleOutput::Text(css)
                }
            }
        }
    }

    /// CSS text. Statements sharing an at-rule are wrapped in one block,
    /// blocks appearing in the order their at-rule was first seen.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut blocks: IndexMap<&str, String> = IndexMap::new();
        for ((at_rules, selector), declaration) in &self.entries {
            let block = blocks.entry(at_rules.as_str()).or_default();
            if selector.is_empty() {
                block.push_str(declaration);
            } else {
                let _ = write!(block, "{selector}{{{declaration}}}");
            }
        }

        let mut css = String::new();
        for (at_rules, block) in blocks {
            if at_rules.is_empty() {
                css.push_str(&block);
            } else {
                let _ = write!(css, "{at_rules}{{{block}}}");
            }
        }
        css
    }
}
