//! Dimensions, alignment, and rounded-corner clipping.

use serde_json::Value;

use super::{DeclarationCompiler, DeclarationContext, Feature};
use crate::declarations::{DeclarationSet, Declarations};
use crate::values::is_nonzero_length;

const DIMENSIONS: &[(&str, &str)] = &[
    ("width", "width"),
    ("maxWidth", "max-width"),
    ("minHeight", "min-height"),
    ("height", "height"),
    ("maxHeight", "max-height"),
];

const CORNERS: &[&str] = &["topLeft", "topRight", "bottomRight", "bottomLeft"];

/// Compiles a sizing tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizingCompiler;

impl DeclarationCompiler for SizingCompiler {
    fn feature(&self) -> Feature {
        Feature::Sizing
    }

    fn compile(&self, _value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let mut decls = Declarations::new();
        for &(key, property) in DIMENSIONS {
            if ctx.changed(&[key]) {
                if let Some(length) = ctx.closest_text(&[key]) {
                    decls.push(property, length);
                }
            }
        }

        if ctx.changed(&["alignment"]) {
            let (left, right) = match ctx.closest_text(&["alignment"]).as_deref() {
                Some("center") => ("auto", "auto"),
                Some("right") => ("auto", "0"),
                _ => ("0", "auto"),
            };
            decls.push("margin-left", left);
            decls.push("margin-right", right);
        }
        DeclarationSet::element(decls)
    }
}

/// Clips elements with rounded corners.
///
/// Reads the `border` tree, whose `radius` object holds one length per corner.
/// Emits `overflow: hidden` where the decision turns on and
/// `overflow: visible` where square corners turn it back off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverflowCompiler;

impl DeclarationCompiler for OverflowCompiler {
    fn feature(&self) -> Feature {
        Feature::Overflow
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let mut decls = Declarations::new();
        let inherited = ctx
            .resolver
            .merged_inherited(ctx.coord, &[])
            .is_some_and(|v| overflow_required(&v));
        match (overflow_required(value), inherited) {
            (true, false) => decls.push("overflow", "hidden"),
            (false, true) => decls.push("overflow", "visible"),
            _ => {}
        }
        DeclarationSet::element(decls)
    }
}

/// `true` when any corner radius is non-zero.
///
/// Unparsable radii count as zero; variable references count as non-zero,
/// since their value is only known in the browser.
#[must_use]
pub fn overflow_required(border: &Value) -> bool {
    let Some(radius) = border.get("radius") else {
        return false;
    };
    CORNERS.iter().any(|corner| is_nonzero_length(radius.get(*corner)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::compile::testing::compile_at;

    fn corners(value: &str) -> Value {
        json!({ "radius": { "topLeft": value, "topRight": value, "bottomRight": value, "bottomLeft": value } })
    }

    #[test]
    fn test_zero_radius_needs_no_overflow() {
        assert!(!overflow_required(&corners("0px")));
        assert!(!overflow_required(&json!({})));
        assert!(overflow_required(&json!({ "radius": { "bottomLeft": "5px" } })));
        assert!(overflow_required(&json!({ "radius": { "topLeft": "var(--r)" } })));
    }

    #[test]
    fn test_emitted_where_decision_flips() {
        let tree = json!({
            "desktop": { "value": corners("0px") },
            "tablet": { "value": { "radius": { "topLeft": "5px" } } },
            "phone": { "value": { "radius": { "topRight": "8px" } } }
        });
        let desktop = compile_at(&OverflowCompiler, &tree, "desktop", "value");
        assert!(desktop.is_empty());

        let tablet = compile_at(&OverflowCompiler, &tree, "tablet", "value");
        assert_eq!(
            tablet.element_declarations().and_then(|d| d.get("overflow")),
            Some("hidden")
        );

        let phone = compile_at(&OverflowCompiler, &tree, "phone", "value");
        assert!(phone.is_empty());
    }

    #[test]
    fn test_square_corners_below_rounded_ancestor() {
        let tree = json!({
            "desktop": { "value": corners("10px") },
            "tablet": { "value": { "radius": { "topLeft": "0px" } } },
            "phone": { "value": corners("0px") }
        });
        let tablet = compile_at(&OverflowCompiler, &tree, "tablet", "value");
        assert!(tablet.is_empty());

        let phone = compile_at(&OverflowCompiler, &tree, "phone", "value");
        assert_eq!(
            phone.element_declarations().and_then(|d| d.get("overflow")),
            Some("visible")
        );
    }

    #[test]
    fn test_sizing_and_alignment() {
        let tree = json!({
            "desktop": { "value": { "width": "50%", "maxWidth": "", "alignment": "center" } },
            "tablet": { "value": { "width": "50%", "height": "200px" } }
        });
        let desktop = compile_at(&SizingCompiler, &tree, "desktop", "value");
        let decls = desktop.element_declarations().unwrap();
        assert_eq!(decls.get("width"), Some("50%"));
        assert!(!decls.contains("max-width"));
        assert_eq!(decls.get("margin-left"), Some("auto"));
        assert_eq!(decls.get("margin-right"), Some("auto"));

        let tablet = compile_at(&SizingCompiler, &tree, "tablet", "value");
        let decls = tablet.element_declarations().unwrap();
        assert!(!decls.contains("width"));
        assert_eq!(decls.get("height"), Some("200px"));
    }
}
