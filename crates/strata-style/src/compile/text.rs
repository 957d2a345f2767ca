//! Text alignment, background layout, and text shadow.

use serde_json::Value;

use super::{DeclarationCompiler, DeclarationContext, Feature};
use crate::attrs::Coordinate;
use crate::classnames::ClassNames;
use crate::declarations::{DeclarationSet, Declarations};
use crate::resolve::{Resolver, Terminals};
use crate::values::non_empty_text;

const SHADOW_KEYS: &[&str] = &["style", "horizontal", "vertical", "blur", "color"];
const NO_SHADOW: &str = "none";

/// Compiles a text tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCompiler;

impl DeclarationCompiler for TextCompiler {
    fn feature(&self) -> Feature {
        Feature::Text
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let mut decls = Declarations::new();

        if ctx.changed(&["orientation"]) {
            if let Some(orientation) = ctx.closest_text(&["orientation"]) {
                let align = if orientation == "justified" {
                    "justify".to_string()
                } else {
                    orientation
                };
                decls.push("text-align", align);
            }
        }

        if ctx.any_changed(&["textShadow"], SHADOW_KEYS) {
            let style = non_empty_text(ctx.closest(&["textShadow", "style"], Terminals::NONE_KEYWORD));
            match style {
                Some(style) if style != NO_SHADOW => {
                    decls.push("text-shadow", shadow_css(value.get("textShadow")));
                }
                _ if !ctx.is_root() => decls.push("text-shadow", NO_SHADOW),
                _ => {}
            }
        }

        DeclarationSet::element(decls)
    }

    /// `et_pb_text_align_<o>` and `et_pb_bg_layout_<c>`, suffixed with the
    /// breakpoint name below the base breakpoint.
    fn classnames(&self, resolver: &Resolver<'_>, _states: &[&str], names: &mut ClassNames) {
        let config = resolver.config();
        let base = config.base_breakpoint();
        for bp in &config.breakpoints {
            let coord = Coordinate::new(&bp.name, &config.base_state);
            let suffix = |sep: &str| {
                if bp.name == base {
                    String::new()
                } else {
                    format!("{sep}{}", bp.name)
                }
            };
            if let Some(orientation) = non_empty_text(resolver.exact(coord, &["orientation"])) {
                names.add(format!("et_pb_text_align_{orientation}{}", suffix("-")));
            }
            if let Some(layout) = non_empty_text(resolver.exact(coord, &["color"])) {
                names.add(format!("et_pb_bg_layout_{layout}{}", suffix("_")));
            }
        }
    }
}

fn shadow_css(shadow: Option<&Value>) -> String {
    let part = |key: &str, default: &str| {
        non_empty_text(shadow.and_then(|s| s.get(key)))
            .map_or_else(|| default.to_string(), |v| v.into_owned())
    };
    format!(
        "{} {} {} {}",
        part("horizontal", "0em"),
        part("vertical", "0.1em"),
        part("blur", "0.1em"),
        part("color", "rgba(0,0,0,0.4)")
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::attrs::AttributeTree;
    use crate::compile::testing::compile_at;
    use crate::config::EngineConfig;

    #[test]
    fn test_shadow_defaults_and_terminal_none() {
        let tree = json!({
            "desktop": { "value": { "textShadow": { "style": "preset1", "color": "#333" } } },
            "tablet": { "value": { "textShadow": { "style": "none" } } }
        });
        let desktop = compile_at(&TextCompiler, &tree, "desktop", "value");
        assert_eq!(
            desktop.element_declarations().unwrap().get("text-shadow"),
            Some("0em 0.1em 0.1em #333")
        );

        let tablet = compile_at(&TextCompiler, &tree, "tablet", "value");
        assert_eq!(tablet.element_declarations().unwrap().get("text-shadow"), Some("none"));
    }

    #[test]
    fn test_alignment() {
        let tree = json!({ "desktop": { "value": { "orientation": "justified" } } });
        let set = compile_at(&TextCompiler, &tree, "desktop", "value");
        assert_eq!(set.element_declarations().unwrap().get("text-align"), Some("justify"));
    }

    #[test]
    fn test_classnames_per_breakpoint() {
        let config = EngineConfig::default();
        let tree = json!({
            "desktop": { "value": { "orientation": "center", "color": "dark" } },
            "tablet": { "value": { "orientation": "left" } },
            "phone": { "value": { "color": "light" } }
        });
        let mut names = ClassNames::new();
        TextCompiler.classnames(&Resolver::new(AttributeTree::new(&tree), &config), &["value"], &mut names);
        assert_eq!(
            names.to_string(),
            "et_pb_text_align_center et_pb_bg_layout_dark et_pb_text_align_left-tablet et_pb_bg_layout_light_phone"
        );
    }
}
