//! The compilation entry point.
//!
//! One [`StyleEngine::compile`] call is one pass over one element:
//!
//! 1. validate the request against the configured axes;
//! 2. for every feature namespace present, walk breakpoints widest first and
//!    states in configuration order, compile each coordinate that sets a value,
//!    and add the declarations to a [`StatementGroup`];
//! 3. collect class names and parallax containers from the same trees;
//! 4. append custom CSS.
//!
//! Coordinates without an explicit value are skipped: whatever they would
//! inherit was already emitted at the ancestor and reaches them through the
//! browser's own cascade. The exception is a state whose wider-breakpoint
//! rule outranks this breakpoint's base rule; see
//! [`Resolver::overridden_by_wider_state`].

use serde_json::Value;
use strata_common::warning::clear_warnings;
use strum::IntoEnumIterator;

use crate::attrs::{Coordinate, ElementAttrs};
use crate::cache::CompileCache;
use crate::classnames::ClassNames;
use crate::compile::{Compiler, DeclarationCompiler, DeclarationContext, Feature};
use crate::config::EngineConfig;
use crate::custom_css::{self, custom_css_statements};
use crate::error::StyleError;
use crate::important::Important;
use crate::parallax::{ParallaxBuilder, ParallaxContainer};
use crate::resolve::{Resolver, Terminals};
use crate::selector::Selectors;
use crate::statement::{CssStatement, OutputFormat, StatementGroup, StyleOutput};
use crate::values::NULL;

/// What to compile and how to shape the output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct StyleRequest {
    /// Element selector and per-coordinate overrides.
    pub selectors: Selectors,
    /// `!important` policy.
    pub important: Important,
    /// Interaction states to compile. `None` compiles every configured state;
    /// the base state is always compiled.
    pub enabled_states: Option<Vec<String>>,
    /// Background layers are managed by presets.
    pub has_layer_presets: bool,
    /// Compiling for the designer preview.
    pub is_preview: bool,
    /// Hover transforms skip the element's transition.
    pub instant_hover_transform: bool,
    /// Output shape for [`CompiledStyle::render`].
    pub output: OutputFormat,
    /// Wrap text output in a `<style>` element.
    pub as_style: bool,
}

impl StyleRequest {
    /// A request with default options for `selector`.
    #[must_use]
    pub fn new(selector: &str) -> Self {
        Self {
            selectors: Selectors::new(selector),
            important: Important::default(),
            enabled_states: None,
            has_layer_presets: false,
            is_preview: false,
            instant_hover_transform: false,
            output: OutputFormat::default(),
            as_style: false,
        }
    }
}

/// Everything one pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledStyle {
    /// Grouped CSS statements.
    pub statements: StatementGroup,
    /// Class names for the element.
    pub classnames: ClassNames,
    /// Parallax containers for the markup layer.
    pub parallax: Vec<ParallaxContainer>,
}

impl CompiledStyle {
    /// Serialize the statements the way `request` asks for.
    #[must_use]
    pub fn render(&self, request: &StyleRequest) -> StyleOutput {
        self.statements.serialize(request.output, request.as_style)
    }
}

/// Compiles element attributes into CSS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleEngine {
    config: EngineConfig,
}

impl StyleEngine {
    /// An engine over validated axes.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, StyleError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile with a fresh cache.
    ///
    /// Each call starts a new round of deduplicated warnings.
    ///
    /// # Errors
    ///
    /// Returns an error when the request names a selector, breakpoint, or
    /// state the configuration cannot serve. Attribute problems never fail.
    pub fn compile(&self, attrs: &ElementAttrs, request: &StyleRequest) -> Result<CompiledStyle, StyleError> {
        clear_warnings();
        let mut cache = CompileCache::new();
        self.compile_with_cache(attrs, request, &mut cache)
    }

    /// Compile, reusing `cache` for gradients and SVG data URIs.
    ///
    /// Unlike [`StyleEngine::compile`] this leaves the warning set alone, so a
    /// batch sharing one cache reports each problem once.
    ///
    /// # Errors
    ///
    /// See [`StyleEngine::compile`].
    pub fn compile_with_cache(
        &self,
        attrs: &ElementAttrs,
        request: &StyleRequest,
        cache: &mut CompileCache,
    ) -> Result<CompiledStyle, StyleError> {
        request.selectors.validate(&self.config)?;
        let states = self.states(request)?;

        let mut compiled = CompiledStyle::default();
        for feature in Feature::iter() {
            let Some(tree) = attrs.tree(feature.namespace()) else {
                continue;
            };
            let compiler = Compiler::for_feature(feature, request.instant_hover_transform);
            let resolver = Resolver::new(tree, &self.config);

            for bp in &self.config.breakpoints {
                for &state in &states {
                    let coord = Coordinate::new(&bp.name, state);
                    if tree.at(coord).is_none() && !resolver.overridden_by_wider_state(coord) {
                        continue;
                    }
                    self.compile_coordinate(&compiler, resolver, coord, request, cache, &mut compiled.statements);
                }
            }

            compiler.classnames(&resolver, &states, &mut compiled.classnames);

            if feature == Feature::Background {
                let built = ParallaxBuilder::new(resolver, request.is_preview, cache).build(&states);
                compiled.classnames.extend(built.element_classnames);
                compiled.parallax = built.containers;
            }
        }

        if let Some(tree) = attrs.tree(custom_css::NAMESPACE) {
            let resolver = Resolver::new(tree, &self.config);
            compiled
                .statements
                .merge(custom_css_statements(&resolver, &request.selectors, &states));
        }

        #[cfg(feature = "style-trace")]
        eprintln!(
            "[ENGINE] {} statement groups, classnames={:?}, {} parallax containers",
            compiled.statements.len(),
            compiled.classnames.to_string(),
            compiled.parallax.len()
        );

        Ok(compiled)
    }

    fn compile_coordinate(
        &self,
        compiler: &Compiler,
        resolver: Resolver<'_>,
        coord: Coordinate<'_>,
        request: &StyleRequest,
        cache: &mut CompileCache,
        statements: &mut StatementGroup,
    ) {
        let resolved = resolver.resolve(coord, &[], compiler.resolve_mode(), Terminals::NONE, None);
        let value: &Value = resolved.as_deref().unwrap_or(&NULL);

        let mut ctx = DeclarationContext {
            coord,
            resolver,
            important: &request.important,
            has_layer_presets: request.has_layer_presets,
            is_preview: request.is_preview,
            cache,
        };
        let set = compiler.compile(value, &mut ctx);

        let at_rules = self.config.at_rules(coord.breakpoint);
        for (target, declarations) in set.iter() {
            let selector = request.selectors.for_target(&self.config, coord, target);
            statements.add(CssStatement::new(
                at_rules,
                &selector,
                &declarations.to_css(&request.important),
            ));
        }
    }

    /// Enabled states in configuration order, base state first.
    fn states<'a>(&'a self, request: &StyleRequest) -> Result<Vec<&'a str>, StyleError> {
        let Some(enabled) = &request.enabled_states else {
            return Ok(self.config.states.iter().map(|s| s.name.as_str()).collect());
        };
        if let Some(unknown) = enabled.iter().find(|name| self.config.state(name).is_none()) {
            return Err(StyleError::UnknownState(unknown.clone()));
        }
        Ok(self
            .config
            .states
            .iter()
            .map(|s| s.name.as_str())
            .filter(|name| *name == self.config.base_state || enabled.iter().any(|e| e.as_str() == *name))
            .collect())
    }
}
