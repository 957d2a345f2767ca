//! Selector construction for breakpoints, states, and child targets.

use serde::Deserialize;

use crate::attrs::Coordinate;
use crate::config::{EngineConfig, SELECTOR_TOKEN};
use crate::declarations::Target;
use crate::error::StyleError;

/// Token in free-form CSS replaced by the element selector.
pub const FREE_FORM_TOKEN: &str = "selector";

/// A selector for one specific coordinate, replacing the computed one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorOverride {
    /// Breakpoint the override applies to.
    pub breakpoint: String,
    /// State the override applies to.
    pub state: String,
    /// Selector used verbatim at that coordinate.
    pub selector: String,
}

/// The element selector plus per-coordinate overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Selectors {
    /// Selector for the base state; other states derive from it.
    pub base: String,
    /// Coordinates whose selector is given explicitly.
    #[serde(default)]
    pub overrides: Vec<SelectorOverride>,
}

impl Selectors {
    /// Selectors derived from `base` alone.
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            overrides: Vec::new(),
        }
    }

    /// Add an override for one coordinate.
    #[must_use]
    pub fn with_override(mut self, breakpoint: &str, state: &str, selector: &str) -> Self {
        self.overrides.push(SelectorOverride {
            breakpoint: breakpoint.to_string(),
            state: state.to_string(),
            selector: selector.to_string(),
        });
        self
    }

    /// Check the selector and that overrides name known coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::EmptySelector`] for a blank base selector, or an
    /// unknown breakpoint/state error for a bad override.
    pub fn validate(&self, config: &EngineConfig) -> Result<(), StyleError> {
        if self.base.trim().is_empty() {
            return Err(StyleError::EmptySelector);
        }
        for o in &self.overrides {
            if config.breakpoint(&o.breakpoint).is_none() {
                return Err(StyleError::UnknownBreakpoint(o.breakpoint.clone()));
            }
            if config.state(&o.state).is_none() {
                return Err(StyleError::UnknownState(o.state.clone()));
            }
        }
        Ok(())
    }

    /// The element selector at a coordinate.
    #[must_use]
    pub fn for_coordinate(&self, config: &EngineConfig, coord: Coordinate<'_>) -> String {
        if let Some(o) = self
            .overrides
            .iter()
            .find(|o| o.breakpoint == coord.breakpoint && o.state == coord.state)
        {
            return o.selector.clone();
        }
        let template = config
            .state(coord.state)
            .map_or(SELECTOR_TOKEN, |s| s.template.as_str());
        apply_template(&self.base, template)
    }

    /// The selector for a target at a coordinate.
    #[must_use]
    pub fn for_target(&self, config: &EngineConfig, coord: Coordinate<'_>, target: &Target) -> String {
        let selector = self.for_coordinate(config, coord);
        match target {
            Target::Element => selector,
            Target::Child(suffix) => join_child(&selector, suffix),
        }
    }
}

/// Apply a state template to every comma-separated part of `selector`.
#[must_use]
pub fn apply_template(selector: &str, template: &str) -> String {
    split_parts(selector)
        .map(|part| template.replace(SELECTOR_TOKEN, part))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append a child combinator to every comma-separated part of `selector`.
#[must_use]
pub fn join_child(selector: &str, suffix: &str) -> String {
    split_parts(selector)
        .map(|part| format!("{part} {suffix}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn split_parts(selector: &str) -> impl Iterator<Item = &str> {
    selector.split(',').map(str::trim).filter(|p| !p.is_empty())
}
