//! Background color, layer stack, image placement, pattern, and mask.

use serde_json::Value;

use super::{DeclarationCompiler, DeclarationContext, Feature, MaskCompiler, PatternCompiler};
use crate::declarations::{DeclarationSet, Declarations};
use crate::layers::{ColorDecision, LayerKind, compose};
use crate::values::{NULL, keyword, non_empty_text};

const DEFAULT_REPEAT: &str = "no-repeat";

/// Compiles a whole background tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackgroundCompiler;

impl DeclarationCompiler for BackgroundCompiler {
    fn feature(&self) -> Feature {
        Feature::Background
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let stack = compose(value, ctx);
        let mut decls = Declarations::new();

        match &stack.color {
            ColorDecision::Inherit => {}
            ColorDecision::Initial => decls.push("background-color", "initial"),
            ColorDecision::Explicit(color) => decls.push("background-color", color.as_str()),
        }
        if let Some(image) = stack.background_image(ctx.is_root()) {
            decls.push("background-image", image);
        }

        if stack.has(LayerKind::Image) {
            let image = value.get("image").unwrap_or(&NULL);
            image_placement(image, stack.changed, ctx, &mut decls);
        }

        let mut set = DeclarationSet::element(decls);
        set.merge(PatternCompiler.compile(value.get("pattern").unwrap_or(&NULL), ctx));
        set.merge(MaskCompiler.compile(value.get("mask").unwrap_or(&NULL), ctx));
        set
    }
}

/// Size, position, repeat, and blend of the image layer.
///
/// Each sub-property is emitted only where its own raw value changed, except
/// `background-repeat` without layer presets: it is written whenever the
/// image layer is, since the legacy default differs from the browser's.
fn image_placement(
    image: &Value,
    layer_emitted: bool,
    ctx: &DeclarationContext<'_, '_>,
    decls: &mut Declarations,
) {
    const IMAGE: &[&str] = &["image"];

    if ctx.any_changed(IMAGE, &["size", "width", "height"]) {
        if let Some(size) = image_size(image) {
            decls.push("background-size", size);
        }
    }
    if ctx.any_changed(IMAGE, &["position", "horizontalOffset", "verticalOffset"]) {
        if let Some(position) = image_position(image) {
            decls.push("background-position", position);
        }
    }

    let repeat_changed = ctx.changed(&["image", "repeat"]);
    let emit_repeat = if ctx.has_layer_presets {
        repeat_changed
    } else {
        layer_emitted || repeat_changed
    };
    if emit_repeat {
        let repeat = non_empty_text(image.get("repeat"))
            .map_or_else(|| DEFAULT_REPEAT.to_string(), |r| keyword(&r));
        decls.push("background-repeat", repeat);
    }

    if ctx.changed(&["image", "blend"]) {
        if let Some(blend) = non_empty_text(image.get("blend")) {
            decls.push("background-blend-mode", blend.as_ref());
        }
    }
}

fn image_size(image: &Value) -> Option<String> {
    let size = non_empty_text(image.get("size"))?;
    if size == "custom" {
        let width = non_empty_text(image.get("width"));
        let height = non_empty_text(image.get("height"));
        return Some(format!(
            "{} {}",
            width.as_deref().unwrap_or("auto"),
            height.as_deref().unwrap_or("auto")
        ));
    }
    Some(keyword(&size))
}

fn image_position(image: &Value) -> Option<String> {
    let position = non_empty_text(image.get("position"))?;
    if position == "custom" {
        let x = non_empty_text(image.get("horizontalOffset"));
        let y = non_empty_text(image.get("verticalOffset"));
        return Some(format!(
            "{} {}",
            x.as_deref().unwrap_or("0"),
            y.as_deref().unwrap_or("0")
        ));
    }
    Some(keyword(&position))
}
