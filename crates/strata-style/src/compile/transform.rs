//! Transform functions and origin.
//!
//! Functions are applied in a fixed order, `scale → translate → rotate →
//! skew`, and identity components are left out. Scales accept percentages
//! (`"120%"` is `1.2`).

use serde_json::Value;

use super::{DeclarationCompiler, DeclarationContext, Feature};
use crate::declarations::{DeclarationSet, Declarations};
use crate::values::{format_number, is_global_token, non_empty_text, parse_number, scale_factor};

/// The hover state, where an instant transform suppresses transitions.
pub const HOVER_STATE: &str = "hover";

const FUNCTION_KEYS: &[&str] = &["scale", "translate", "rotate", "skew"];

/// Compiles a transform tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformCompiler {
    /// Hover transforms apply without the element's transition.
    pub instant_hover: bool,
}

impl DeclarationCompiler for TransformCompiler {
    fn feature(&self) -> Feature {
        Feature::Transform
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let mut decls = Declarations::new();

        if ctx.any_changed(&[], FUNCTION_KEYS) {
            let functions = transform_functions(value);
            decls.push(
                "transform",
                if functions.is_empty() {
                    "none".to_string()
                } else {
                    functions.join(" ")
                },
            );
            if self.instant_hover && ctx.coord.state == HOVER_STATE {
                decls.push("transition", "none");
            }
        }

        if ctx.changed(&["origin"]) {
            let origin = value.get("origin");
            let axis = |key: &str| {
                non_empty_text(origin.and_then(|o| o.get(key)))
                    .map_or_else(|| "50%".to_string(), |v| v.into_owned())
            };
            decls.push("transform-origin", format!("{} {}", axis("x"), axis("y")));
        }

        DeclarationSet::element(decls)
    }
}

/// The non-identity transform functions of a merged transform value.
#[must_use]
pub fn transform_functions(value: &Value) -> Vec<String> {
    let mut functions = Vec::new();
    let component = |group: &str, axis: &str| {
        non_empty_text(value.get(group).and_then(|g| g.get(axis))).map(|s| s.trim().to_string())
    };

    for axis in ["x", "y"] {
        if let Some(raw) = component("scale", axis) {
            match scale_factor(&raw) {
                Some(factor) if (factor - 1.0).abs() > f64::EPSILON => {
                    functions.push(format!("scale{}({})", axis.to_uppercase(), format_number(factor)));
                }
                Some(_) => {}
                None if is_global_token(&raw) => {
                    functions.push(format!("scale{}({raw})", axis.to_uppercase()));
                }
                None => {}
            }
        }
    }
    for (group, axes) in [("translate", &["x", "y"][..]), ("rotate", &["x", "y", "z"][..]), ("skew", &["x", "y"][..])] {
        for &axis in axes {
            if let Some(raw) = component(group, axis) {
                if !is_identity(&raw) {
                    functions.push(format!("{group}{}({raw})", axis.to_uppercase()));
                }
            }
        }
    }
    functions
}

/// Zero translations, rotations, and skews do nothing.
fn is_identity(raw: &str) -> bool {
    !is_global_token(raw) && parse_number(raw).is_none_or(|n| n.abs() < f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::compile::testing::compile_at;

    #[test]
    fn test_function_order_and_identity() {
        let value = json!({
            "skew": { "x": "10deg" },
            "rotate": { "z": "45deg", "x": "0deg" },
            "translate": { "x": "5px", "y": "0px" },
            "scale": { "x": "120%", "y": "100%" }
        });
        assert_eq!(
            transform_functions(&value),
            vec!["scaleX(1.2)", "translateX(5px)", "rotateZ(45deg)", "skewX(10deg)"]
        );
    }

    #[test]
    fn test_origin_defaults() {
        let tree = json!({ "desktop": { "value": { "origin": { "x": "0%" } } } });
        let set = compile_at(&TransformCompiler::default(), &tree, "desktop", "value");
        let decls = set.element_declarations().unwrap();
        assert_eq!(decls.get("transform-origin"), Some("0% 50%"));
        assert!(!decls.contains("transform"));
    }

    #[test]
    fn test_instant_hover() {
        let tree = json!({
            "desktop": {
                "value": { "scale": { "x": "100%" } },
                "hover": { "scale": { "x": "110%", "y": "110%" } }
            }
        });
        let compiler = TransformCompiler { instant_hover: true };

        let hover = compile_at(&compiler, &tree, "desktop", "hover");
        let decls = hover.element_declarations().unwrap();
        assert_eq!(decls.get("transform"), Some("scaleX(1.1) scaleY(1.1)"));
        assert_eq!(decls.get("transition"), Some("none"));

        let base = compile_at(&compiler, &tree, "desktop", "value");
        let decls = base.element_declarations().unwrap();
        assert_eq!(decls.get("transform"), Some("none"));
        assert!(!decls.contains("transition"));
    }
}
