//! Typeface, text decoration, and spacing.

use serde_json::Value;

use super::{DeclarationCompiler, DeclarationContext, Feature};
use crate::declarations::{DeclarationSet, Declarations};
use crate::values::string_list;

const SIMPLE: &[(&str, &str)] = &[
    ("weight", "font-weight"),
    ("color", "color"),
    ("size", "font-size"),
    ("letterSpacing", "letter-spacing"),
    ("lineHeight", "line-height"),
    ("lineColor", "text-decoration-color"),
    ("lineStyle", "text-decoration-style"),
];

/// Compiles a font tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontCompiler;

impl DeclarationCompiler for FontCompiler {
    fn feature(&self) -> Feature {
        Feature::Font
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let mut decls = Declarations::new();

        if ctx.changed(&["family"]) {
            if let Some(family) = ctx.closest_text(&["family"]) {
                decls.push("font-family", family_css(&family));
            }
        }
        for &(key, property) in SIMPLE {
            if ctx.changed(&[key]) {
                if let Some(text) = ctx.closest_text(&[key]) {
                    decls.push(property, text);
                }
            }
        }
        if ctx.changed(&["style"]) {
            style_flags(&string_list(value.get("style")), ctx.is_root(), &mut decls);
        }

        DeclarationSet::element(decls)
    }
}

/// Quote family names containing spaces; leave stacks and quoted names alone.
fn family_css(family: &str) -> String {
    let family = family.trim();
    if family.contains(',') || family.starts_with(['\'', '"']) || !family.contains(' ') {
        family.to_string()
    } else {
        format!("'{family}'")
    }
}

/// Map style flags onto their properties.
///
/// Below the root, properties whose flag is absent are reset so a flag
/// removed at a breakpoint actually goes away there.
fn style_flags(flags: &[&str], is_root: bool, decls: &mut Declarations) {
    let has = |flag: &str| flags.contains(&flag);
    let mut emit = |property: &str, value: Option<String>, reset: &str| match value {
        Some(value) => decls.push(property, value),
        None if !is_root => decls.push(property, reset),
        None => {}
    };

    emit("font-style", has("italic").then(|| "italic".to_string()), "normal");

    let transform = if has("uppercase") {
        Some("uppercase".to_string())
    } else {
        has("capitalize").then(|| "capitalize".to_string())
    };
    emit("text-transform", transform, "none");

    let lines: Vec<&str> = [("underline", "underline"), ("strikethrough", "line-through")]
        .into_iter()
        .filter(|&(flag, _)| has(flag))
        .map(|(_, line)| line)
        .collect();
    emit(
        "text-decoration-line",
        (!lines.is_empty()).then(|| lines.join(" ")),
        "none",
    );

    emit("font-variant", has("smallcaps").then(|| "small-caps".to_string()), "normal");
}
