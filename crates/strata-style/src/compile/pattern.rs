//! Repeating pattern overlay.

use serde_json::Value;

use super::shape::ShapeLayer;
use super::{DeclarationCompiler, DeclarationContext, Feature};
use crate::declarations::DeclarationSet;
use crate::svg::ShapeKind;

/// Child element the pattern renders into.
pub const PATTERN_TARGET: &str = "> .et_pb_background_pattern";

const PATTERN: ShapeLayer = ShapeLayer {
    key: "pattern",
    target: PATTERN_TARGET,
    kind: ShapeKind::Pattern,
    component: "Pattern",
    default_size: "initial",
    position_key: "repeatOrigin",
    default_position: "top left",
    repeats: true,
};

/// Compiles the `pattern` sub-object of a background tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternCompiler;

impl DeclarationCompiler for PatternCompiler {
    fn feature(&self) -> Feature {
        Feature::Background
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        PATTERN.compile(value, ctx)
    }
}
