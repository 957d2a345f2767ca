//! Engine configuration: the breakpoint and state axes of the cascade.
//!
//! Breakpoints are ordered widest to narrowest. Each breakpoint's parent is
//! the one declared before it, so the first breakpoint is the base of every
//! cascade chain. States are ordered with the base state first.

use serde::Deserialize;

use crate::error::StyleError;

/// Name of the unconditional state.
pub const BASE_STATE: &str = "value";

/// Placeholder replaced by the element selector in state templates.
pub const SELECTOR_TOKEN: &str = "{selector}";

/// A responsive viewport tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BreakpointConfig {
    /// Attribute-tree key, e.g. `tablet`.
    pub name: String,
    /// At-rule wrapping this breakpoint's statements. `None` for the base breakpoint.
    #[serde(default)]
    pub media: Option<String>,
}

impl BreakpointConfig {
    /// A breakpoint whose statements are emitted without an at-rule.
    #[must_use]
    pub fn unconditional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            media: None,
        }
    }

    /// A breakpoint whose statements are wrapped in `media`.
    #[must_use]
    pub fn with_media(name: &str, media: &str) -> Self {
        Self {
            name: name.to_string(),
            media: Some(media.to_string()),
        }
    }
}

/// An interaction state and how it rewrites the element selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateConfig {
    /// Attribute-tree key, e.g. `hover`.
    pub name: String,
    /// Template applied to every comma-separated selector part.
    /// `{selector}` is replaced with the part.
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    SELECTOR_TOKEN.to_string()
}

impl StateConfig {
    /// A state with the given selector template.
    #[must_use]
    pub fn new(name: &str, template: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
        }
    }
}

/// The breakpoint and state axes every attribute tree is laid out on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Breakpoints, widest first.
    pub breakpoints: Vec<BreakpointConfig>,
    /// States, in emission order.
    pub states: Vec<StateConfig>,
    /// The unconditional state every other state falls back to.
    #[serde(default = "default_base_state")]
    pub base_state: String,
}

fn default_base_state() -> String {
    BASE_STATE.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakpoints: vec![
                BreakpointConfig::unconditional("desktop"),
                BreakpointConfig::with_media("tablet", "@media only screen and (max-width: 980px)"),
                BreakpointConfig::with_media("phone", "@media only screen and (max-width: 767px)"),
            ],
            states: vec![
                StateConfig::new(BASE_STATE, SELECTOR_TOKEN),
                StateConfig::new("hover", "{selector}:hover"),
                StateConfig::new("sticky", "{selector}.et_pb_sticky"),
            ],
            base_state: BASE_STATE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidJson`] for malformed JSON and the
    /// validation errors of [`EngineConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the axes are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no breakpoints, a breakpoint name
    /// repeats, or the base state is not declared.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.breakpoints.is_empty() {
            return Err(StyleError::EmptyBreakpoints);
        }
        for (i, bp) in self.breakpoints.iter().enumerate() {
            if self.breakpoints[..i].iter().any(|b| b.name == bp.name) {
                return Err(StyleError::DuplicateBreakpoint(bp.name.clone()));
            }
        }
        if self.state(&self.base_state).is_none() {
            return Err(StyleError::MissingBaseState(self.base_state.clone()));
        }
        Ok(())
    }

    /// The base (widest) breakpoint name.
    #[must_use]
    pub fn base_breakpoint(&self) -> &str {
        self.breakpoints.first().map_or("", |b| b.name.as_str())
    }

    /// Position of a breakpoint in the widest-first order.
    #[must_use]
    pub fn breakpoint_index(&self, name: &str) -> Option<usize> {
        self.breakpoints.iter().position(|b| b.name == name)
    }

    /// Look up a breakpoint by name.
    #[must_use]
    pub fn breakpoint(&self, name: &str) -> Option<&BreakpointConfig> {
        self.breakpoints.iter().find(|b| b.name == name)
    }

    /// Look up a state by name.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<&StateConfig> {
        self.states.iter().find(|s| s.name == name)
    }

    /// At-rule text for a breakpoint; empty for unconditional breakpoints.
    #[must_use]
    pub fn at_rules(&self, breakpoint: &str) -> &str {
        self.breakpoint(breakpoint)
            .and_then(|b| b.media.as_deref())
            .unwrap_or("")
    }

    /// Breakpoints narrower than `breakpoint`, nearest first.
    pub fn narrower_than<'a>(&'a self, breakpoint: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        let start = self.breakpoint_index(breakpoint).map_or(self.breakpoints.len(), |i| i + 1);
        self.breakpoints[start..].iter().map(|b| b.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axes() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_breakpoint(), "desktop");
        assert_eq!(config.at_rules("desktop"), "");
        assert_eq!(
            config.at_rules("phone"),
            "@media only screen and (max-width: 767px)"
        );
        assert_eq!(config.narrower_than("tablet").collect::<Vec<_>>(), vec!["phone"]);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "breakpoints": [{"name": "desktop"}, {"name": "desktop"}],
            "states": [{"name": "value"}]
        }"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(StyleError::DuplicateBreakpoint(name)) if name == "desktop"
        ));

        let json = r#"{"breakpoints": [], "states": [{"name": "value"}]}"#;
        assert!(matches!(EngineConfig::from_json(json), Err(StyleError::EmptyBreakpoints)));

        let json = r#"{"breakpoints": [{"name": "wide"}], "states": [{"name": "hover"}]}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(StyleError::MissingBaseState(_))
        ));
    }

    #[test]
    fn test_from_json_custom_breakpoints() {
        let json = r#"{
            "breakpoints": [
                {"name": "widescreen"},
                {"name": "desktop", "media": "@media (max-width: 1350px)"},
                {"name": "tablet", "media": "@media (max-width: 980px)"},
                {"name": "phone", "media": "@media (max-width: 767px)"}
            ],
            "states": [{"name": "value"}, {"name": "hover", "template": "{selector}:hover"}]
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.breakpoints.len(), 4);
        assert_eq!(config.base_breakpoint(), "widescreen");
        assert_eq!(config.state("value").unwrap().template, SELECTOR_TOKEN);
        assert_eq!(config.base_state, BASE_STATE);
    }
}
