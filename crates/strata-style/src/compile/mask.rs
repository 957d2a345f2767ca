//! Mask overlay.

use serde_json::Value;

use super::shape::ShapeLayer;
use super::{DeclarationCompiler, DeclarationContext, Feature};
use crate::declarations::DeclarationSet;
use crate::svg::ShapeKind;

/// Child element the mask renders into.
pub const MASK_TARGET: &str = "> .et_pb_background_mask";

const MASK: ShapeLayer = ShapeLayer {
    key: "mask",
    target: MASK_TARGET,
    kind: ShapeKind::Mask,
    component: "Mask",
    default_size: "stretch",
    position_key: "position",
    default_position: "center",
    repeats: false,
};

/// Compiles the `mask` sub-object of a background tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskCompiler;

impl DeclarationCompiler for MaskCompiler {
    fn feature(&self) -> Feature {
        Feature::Background
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        MASK.compile(value, ctx)
    }
}
