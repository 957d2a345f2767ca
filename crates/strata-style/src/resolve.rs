//! Value resolution over the breakpoint/state cascade.
//!
//! # Cascade order
//!
//! For a coordinate `(B, S)` the search visits
//!
//! ```text
//! (B, S) → (B, value) → (parent(B), S) → (parent(B), value) → …
//! ```
//!
//! up to the base breakpoint. When `S` is the base state the duplicate steps
//! collapse, leaving a plain walk up the breakpoint chain.
//!
//! # Absent versus terminal
//!
//! `null` and missing keys are always absent. An empty string is absent too,
//! unless the caller lists it as terminal: background image URLs use `""` to
//! clear an inherited image, while most other features treat it as "keep
//! inheriting". Terminal values stop the search and are returned verbatim.

use std::borrow::Cow;

use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

use crate::attrs::{AttributeTree, Coordinate};
use crate::config::EngineConfig;

/// How [`Resolver::resolve`] treats coordinates without an explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ResolveMode {
    /// Only the value explicitly set at the coordinate.
    Exact,
    /// The first usable value along the cascade chain.
    InheritClosest,
    /// The whole sub-object at the first coordinate that defines anything
    /// under the path, so co-varying sub-properties come from one step.
    InheritAll,
    /// Deep merge of every object along the chain, nearer coordinates winning.
    /// Each sub-property cascades on its own.
    InheritMerged,
}

/// Values that stop inheritance even though they look empty or disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Terminals<'t>(&'t [&'t str]);

impl<'t> Terminals<'t> {
    /// No terminal values; empty strings keep inheriting.
    pub const NONE: Terminals<'static> = Terminals(&[]);
    /// An empty string clears the inherited value (image URLs).
    pub const EMPTY: Terminals<'static> = Terminals(&[""]);
    /// `none` switches an inherited style off (dividers, text shadows).
    pub const NONE_KEYWORD: Terminals<'static> = Terminals(&["none"]);
    /// `off` switches an inherited toggle off (gradients, parallax, patterns).
    pub const OFF: Terminals<'static> = Terminals(&["off"]);

    /// A caller-supplied terminal list.
    #[must_use]
    pub const fn new(values: &'t [&'t str]) -> Self {
        Self(values)
    }

    /// `true` when `value` is one of the terminal strings.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| self.0.contains(&s))
    }
}

/// Resolves values in one attribute tree.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    tree: AttributeTree<'a>,
    config: &'a EngineConfig,
}

impl<'a> Resolver<'a> {
    /// Resolve against `tree` using the axes in `config`.
    #[must_use]
    pub const fn new(tree: AttributeTree<'a>, config: &'a EngineConfig) -> Self {
        Self { tree, config }
    }

    /// The tree being resolved.
    #[must_use]
    pub const fn tree(&self) -> AttributeTree<'a> {
        self.tree
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// The cascade chain for a coordinate, starting with the coordinate itself.
    ///
    /// An unknown breakpoint yields an empty chain.
    #[must_use]
    pub fn chain(&self, coord: Coordinate<'_>) -> Vec<Coordinate<'a>> {
        let base = self.config.base_state.as_str();
        let state = self
            .config
            .state(coord.state)
            .map_or(base, |s| s.name.as_str());
        let Some(index) = self.config.breakpoint_index(coord.breakpoint) else {
            return Vec::new();
        };

        let mut chain = Vec::with_capacity((index + 1) * 2);
        for bp in self.config.breakpoints[..=index].iter().rev() {
            chain.push(Coordinate::new(&bp.name, state));
            if state != base {
                chain.push(Coordinate::new(&bp.name, base));
            }
        }
        chain
    }

    /// The coordinate a value at `coord` falls back to, if any.
    #[must_use]
    pub fn fallback(&self, coord: Coordinate<'_>) -> Option<Coordinate<'a>> {
        self.chain(coord).get(1).copied()
    }

    /// `true` for the first breakpoint in its base state.
    #[must_use]
    pub fn is_root(&self, coord: Coordinate<'_>) -> bool {
        coord.breakpoint == self.config.base_breakpoint() && coord.state == self.config.base_state
    }

    /// Generic entry point mirroring the four modes.
    ///
    /// Returns `default` when nothing resolves. Only [`ResolveMode::InheritMerged`]
    /// needs to allocate.
    #[must_use]
    pub fn resolve(
        &self,
        coord: Coordinate<'_>,
        path: &[&str],
        mode: ResolveMode,
        terminals: Terminals<'_>,
        default: Option<&'a Value>,
    ) -> Option<Cow<'a, Value>> {
        let found = match mode {
            ResolveMode::Exact => self.exact(coord, path).map(Cow::Borrowed),
            ResolveMode::InheritClosest => self.closest(coord, path, terminals).map(Cow::Borrowed),
            ResolveMode::InheritAll => self.inherit_all(coord, path).map(Cow::Borrowed),
            ResolveMode::InheritMerged => self.merged(coord, path).map(Cow::Owned),
        };
        found.or_else(|| default.map(Cow::Borrowed))
    }

    /// The raw value explicitly set at the coordinate.
    #[must_use]
    pub fn exact(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<&'a Value> {
        self.tree.get(coord, path)
    }

    /// The first usable value along the cascade chain.
    ///
    /// Terminal values are returned as soon as they are met.
    #[must_use]
    pub fn closest(
        &self,
        coord: Coordinate<'_>,
        path: &[&str],
        terminals: Terminals<'_>,
    ) -> Option<&'a Value> {
        self.chain(coord)
            .into_iter()
            .filter_map(|c| self.tree.get(c, path))
            .find(|v| terminals.contains(v) || is_defined(v))
    }

    /// The whole sub-object at the first coordinate that defines anything under `path`.
    #[must_use]
    pub fn inherit_all(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<&'a Value> {
        self.chain(coord)
            .into_iter()
            .filter_map(|c| self.tree.get(c, path))
            .find(|v| is_defined(v))
    }

    /// Deep merge of every defined object along the chain, nearest winning.
    ///
    /// Scalars are not merged: the nearest defined scalar wins outright.
    #[must_use]
    pub fn merged(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<Value> {
        self.merge_chain(&self.chain(coord), path)
    }

    /// [`Resolver::merged`] without the coordinate's own values: what the
    /// coordinate would see if it set nothing.
    #[must_use]
    pub fn merged_inherited(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<Value> {
        self.chain(coord)
            .split_first()
            .and_then(|(_, rest)| self.merge_chain(rest, path))
    }

    fn merge_chain(&self, chain: &[Coordinate<'a>], path: &[&str]) -> Option<Value> {
        let mut merged: Option<Value> = None;
        for value in chain
            .iter()
            .rev()
            .filter_map(|c| self.tree.get(*c, path))
            .filter(|v| is_defined(v))
        {
            merged = Some(match (merged, value) {
                (Some(Value::Object(mut base)), Value::Object(over)) => {
                    merge_into(&mut base, over);
                    Value::Object(base)
                }
                (_, value) => prune(value),
            });
        }
        merged
    }

    /// The nearest explicit raw value strictly above `coord` in the chain.
    #[must_use]
    pub fn inherited_raw(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<&'a Value> {
        self.chain(coord)
            .into_iter()
            .skip(1)
            .find_map(|c| self.tree.get(c, path))
    }

    /// `true` when the coordinate needs a declaration for `path`.
    ///
    /// This is the duplicate-suppression test. In the base state a value is
    /// needed where it is set and differs from the nearest explicit ancestor.
    /// In other states the cascaded value is compared with
    /// [`Resolver::applied_raw`], so an unset coordinate may need one too.
    #[must_use]
    pub fn changed(&self, coord: Coordinate<'_>, path: &[&str]) -> bool {
        if self.is_base_state(coord) {
            return self
                .exact(coord, path)
                .is_some_and(|raw| self.inherited_raw(coord, path) != Some(raw));
        }
        self.cascaded_raw(coord, path)
            .is_some_and(|raw| self.applied_raw(coord, path) != Some(raw))
    }

    /// The first raw value along the cascade chain, including `coord` itself.
    #[must_use]
    pub fn cascaded_raw(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<&'a Value> {
        self.chain(coord)
            .into_iter()
            .find_map(|c| self.tree.get(c, path))
    }

    /// The raw value the emitted stylesheet applies at a non-base `coord`
    /// when the coordinate adds no declaration of its own.
    ///
    /// State selectors are more specific than the bare element selector, so
    /// a state rule from any wider breakpoint beats this breakpoint's base
    /// rule. Walks the wider breakpoints widest first, tracking the state
    /// rule in force, and falls back to the base state at `coord`.
    #[must_use]
    pub fn applied_raw(&self, coord: Coordinate<'_>, path: &[&str]) -> Option<&'a Value> {
        let index = self.config.breakpoint_index(coord.breakpoint)?;
        let base = self.config.base_state.as_str();

        let mut state_rule = None;
        for bp in &self.config.breakpoints[..index] {
            let applied = state_rule.or_else(|| self.cascaded_raw(Coordinate::new(&bp.name, base), path));
            let resolved = self.cascaded_raw(Coordinate::new(&bp.name, coord.state), path);
            if resolved.is_some() && resolved != applied {
                state_rule = resolved;
            }
        }
        state_rule.or_else(|| self.cascaded_raw(Coordinate::new(coord.breakpoint, base), path))
    }

    /// `true` when an unset non-base coordinate still has to be compiled.
    ///
    /// That happens when the coordinate's breakpoint sets base values and a
    /// wider breakpoint sets the same state: the wider state rule would
    /// otherwise override the narrower base values.
    #[must_use]
    pub fn overridden_by_wider_state(&self, coord: Coordinate<'_>) -> bool {
        if self.is_base_state(coord) || self.tree.at(coord).is_some() {
            return false;
        }
        let Some(index) = self.config.breakpoint_index(coord.breakpoint) else {
            return false;
        };
        let base = Coordinate::new(coord.breakpoint, &self.config.base_state);
        self.tree.at(base).is_some()
            && self.config.breakpoints[..index]
                .iter()
                .any(|bp| self.tree.at(Coordinate::new(&bp.name, coord.state)).is_some())
    }

    fn is_base_state(&self, coord: Coordinate<'_>) -> bool {
        self.config
            .state(coord.state)
            .is_none_or(|s| s.name == self.config.base_state)
    }

    /// [`Resolver::changed`] for any of several sibling paths below `prefix`.
    #[must_use]
    pub fn any_changed(&self, coord: Coordinate<'_>, prefix: &[&str], keys: &[&str]) -> bool {
        keys.iter().any(|key| {
            let mut path = prefix.to_vec();
            path.push(key);
            self.changed(coord, &path)
        })
    }
}

/// `null`, empty strings, and empty objects carry no value.
fn is_defined(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Object(map) => map.values().any(is_defined),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) => true,
    }
}

fn merge_into(base: &mut Map<String, Value>, over: &Map<String, Value>) {
    for (key, value) in over {
        if !is_defined(value) {
            continue;
        }
        if let (Some(Value::Object(existing)), Value::Object(child)) = (base.get_mut(key), value) {
            merge_into(existing, child);
            continue;
        }
        let _ = base.insert(key.clone(), prune(value));
    }
}

/// Copy of `value` with undefined object members removed.
fn prune(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| is_defined(v))
                .map(|(k, v)| (k.clone(), prune(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
