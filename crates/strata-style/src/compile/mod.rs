//! Declaration compilers: one per style feature.
//!
//! A compiler receives the value resolved for one `(breakpoint, state)`
//! coordinate and turns it into CSS declarations. Compilers are pure except
//! for the per-request [`CompileCache`] they may consult, and they decide
//! for themselves which properties need re-emitting: a property whose raw
//! value did not change from the nearest explicit ancestor is left to the
//! browser's own cascade.
//!
//! [`Compiler`] selects an implementation per [`Feature`].

mod background;
mod divider;
mod font;
mod gradient;
mod mask;
mod pattern;
mod shape;
mod sizing;
mod text;
mod transform;

pub use background::BackgroundCompiler;
pub use divider::{DividerCompiler, DividerSide};
pub use font::FontCompiler;
pub use gradient::render_gradient;
pub use mask::{MASK_TARGET, MaskCompiler};
pub use pattern::{PATTERN_TARGET, PatternCompiler};
pub use sizing::{OverflowCompiler, SizingCompiler, overflow_required};
pub use text::TextCompiler;
pub use transform::{HOVER_STATE, TransformCompiler, transform_functions};

use serde_json::Value;
use strum_macros::{Display, EnumIter};

use crate::attrs::Coordinate;
use crate::cache::CompileCache;
use crate::classnames::ClassNames;
use crate::declarations::DeclarationSet;
use crate::important::Important;
use crate::resolve::{ResolveMode, Resolver, Terminals};
use crate::values::non_empty_text;

/// A style feature with its own attribute namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum Feature {
    /// Color, image, gradient, pattern, and mask layers.
    Background,
    /// Widths, heights, and alignment.
    Sizing,
    /// `overflow: hidden` for rounded corners.
    Overflow,
    /// Typeface and text decoration.
    Font,
    /// Alignment, background layout, and text shadow.
    Text,
    /// 2D/3D transform functions and origin.
    Transform,
    /// The divider at the top of a section.
    DividerTop,
    /// The divider at the bottom of a section.
    DividerBottom,
}

impl Feature {
    /// Attribute namespace the feature reads, possibly dotted.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Sizing => "sizing",
            Self::Overflow => "border",
            Self::Font => "font",
            Self::Text => "text",
            Self::Transform => "transform",
            Self::DividerTop => "dividers.top",
            Self::DividerBottom => "dividers.bottom",
        }
    }
}

/// Everything a compiler may consult besides the resolved value.
#[derive(Debug)]
pub struct DeclarationContext<'r, 'c> {
    /// Coordinate being compiled.
    pub coord: Coordinate<'r>,
    /// Resolver over the feature's attribute tree.
    pub resolver: Resolver<'r>,
    /// `!important` policy, applied when declarations are serialized.
    pub important: &'r Important,
    /// Background layers are managed by presets, so `background-repeat`
    /// is only emitted when set explicitly.
    pub has_layer_presets: bool,
    /// Compiling for the designer preview rather than the live page.
    pub is_preview: bool,
    /// Per-request memoization.
    pub cache: &'c mut CompileCache,
}

impl<'r> DeclarationContext<'r, '_> {
    /// `true` at the base breakpoint's base state.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.resolver.is_root(self.coord)
    }

    /// See [`Resolver::changed`].
    #[must_use]
    pub fn changed(&self, path: &[&str]) -> bool {
        self.resolver.changed(self.coord, path)
    }

    /// See [`Resolver::any_changed`].
    #[must_use]
    pub fn any_changed(&self, prefix: &[&str], keys: &[&str]) -> bool {
        self.resolver.any_changed(self.coord, prefix, keys)
    }

    /// See [`Resolver::closest`].
    #[must_use]
    pub fn closest(&self, path: &[&str], terminals: Terminals<'_>) -> Option<&'r Value> {
        self.resolver.closest(self.coord, path, terminals)
    }

    /// The closest value as non-empty text.
    #[must_use]
    pub fn closest_text(&self, path: &[&str]) -> Option<String> {
        non_empty_text(self.closest(path, Terminals::NONE)).map(|s| s.into_owned())
    }
}

/// One feature's declaration rules.
pub trait DeclarationCompiler {
    /// The feature whose namespace this compiler reads.
    fn feature(&self) -> Feature;

    /// How the engine resolves the coordinate value handed to [`Self::compile`].
    fn resolve_mode(&self) -> ResolveMode {
        ResolveMode::InheritMerged
    }

    /// Declarations for the coordinate in `ctx`.
    ///
    /// `value` is the resolved value at the coordinate. Missing or malformed
    /// sub-values skip their property; they never fail the feature.
    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet;

    /// Class names derived from the whole tree. Most features have none.
    fn classnames(&self, _resolver: &Resolver<'_>, _states: &[&str], _names: &mut ClassNames) {}
}

/// A declaration compiler selected by feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    /// Background color and layer stack.
    Background(BackgroundCompiler),
    /// Transform functions.
    Transform(TransformCompiler),
    /// Section divider.
    Divider(DividerCompiler),
    /// Dimensions and alignment.
    Sizing(SizingCompiler),
    /// Rounded-corner clipping.
    Overflow(OverflowCompiler),
    /// Typeface.
    Font(FontCompiler),
    /// Text alignment and shadow.
    Text(TextCompiler),
}

impl Compiler {
    /// The compiler the engine runs for a top-level feature.
    #[must_use]
    pub const fn for_feature(feature: Feature, instant_hover_transform: bool) -> Self {
        match feature {
            Feature::Background => Self::Background(BackgroundCompiler),
            Feature::Sizing => Self::Sizing(SizingCompiler),
            Feature::Overflow => Self::Overflow(OverflowCompiler),
            Feature::Font => Self::Font(FontCompiler),
            Feature::Text => Self::Text(TextCompiler),
            Feature::Transform => Self::Transform(TransformCompiler {
                instant_hover: instant_hover_transform,
            }),
            Feature::DividerTop => Self::Divider(DividerCompiler {
                side: DividerSide::Top,
            }),
            Feature::DividerBottom => Self::Divider(DividerCompiler {
                side: DividerSide::Bottom,
            }),
        }
    }

    fn inner(&self) -> &dyn DeclarationCompiler {
        match self {
            Self::Background(c) => c,
            Self::Transform(c) => c,
            Self::Divider(c) => c,
            Self::Sizing(c) => c,
            Self::Overflow(c) => c,
            Self::Font(c) => c,
            Self::Text(c) => c,
        }
    }
}

impl DeclarationCompiler for Compiler {
    fn feature(&self) -> Feature {
        self.inner().feature()
    }

    fn resolve_mode(&self) -> ResolveMode {
        self.inner().resolve_mode()
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        self.inner().compile(value, ctx)
    }

    fn classnames(&self, resolver: &Resolver<'_>, states: &[&str], names: &mut ClassNames) {
        self.inner().classnames(resolver, states, names);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for compiler unit tests.

    use std::borrow::Cow;

    use serde_json::Value;

    use super::{DeclarationCompiler, DeclarationContext};
    use crate::attrs::{AttributeTree, Coordinate};
    use crate::cache::CompileCache;
    use crate::config::EngineConfig;
    use crate::declarations::DeclarationSet;
    use crate::important::Important;
    use crate::resolve::{Resolver, Terminals};

    /// Compile `tree` at `(breakpoint, state)` the way the engine does.
    pub fn compile_at(
        compiler: &dyn DeclarationCompiler,
        tree: &Value,
        breakpoint: &str,
        state: &str,
    ) -> DeclarationSet {
        compile_with(compiler, tree, breakpoint, state, false, false)
    }

    /// [`compile_at`] with the preview and layer-preset switches.
    pub fn compile_with(
        compiler: &dyn DeclarationCompiler,
        tree: &Value,
        breakpoint: &str,
        state: &str,
        is_preview: bool,
        has_layer_presets: bool,
    ) -> DeclarationSet {
        let config = EngineConfig::default();
        let important = Important::default();
        let mut cache = CompileCache::new();
        let resolver = Resolver::new(AttributeTree::new(tree), &config);
        let coord = Coordinate::new(breakpoint, state);
        let value = resolver
            .resolve(coord, &[], compiler.resolve_mode(), Terminals::NONE, None)
            .map(Cow::into_owned)
            .unwrap_or(Value::Null);
        let mut ctx = DeclarationContext {
            coord,
            resolver,
            important: &important,
            has_layer_presets,
            is_preview,
            cache: &mut cache,
        };
        compiler.compile(&value, &mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_every_feature_has_a_compiler() {
        for feature in Feature::iter() {
            let compiler = Compiler::for_feature(feature, false);
            assert_eq!(compiler.feature(), feature);
        }
        assert_eq!(Feature::DividerTop.to_string(), "dividerTop");
        assert_eq!(Feature::Overflow.namespace(), "border");
    }
}
