//! Section dividers.
//!
//! A divider is an SVG shape painted into `.et_pb_<side>_inside_divider`.
//! `style: "none"` at a breakpoint switches an inherited divider off there;
//! it is terminal and never resolves back to the ancestor's shape.

use serde_json::Value;
use strata_common::warning::warn_once;

use super::{DeclarationCompiler, DeclarationContext, Feature};
use crate::attrs::Coordinate;
use crate::classnames::ClassNames;
use crate::declarations::{DeclarationSet, Declarations, Target};
use crate::resolve::{Resolver, Terminals};
use crate::svg::{AspectRatio, DEFAULT_FILL, ShapeKind, SvgKey, SvgVariant};
use crate::values::{format_number, non_empty_text, parse_number, string_list};

const NO_DIVIDER: &str = "none";
const DEFAULT_HEIGHT: &str = "100px";
const ARRANGEMENT_ABOVE: &str = "above";

/// Which edge of the section a divider sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DividerSide {
    /// Top edge.
    Top,
    /// Bottom edge; the shape is flipped to hang upward.
    Bottom,
}

impl DividerSide {
    /// Lowercase name used in class names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Child combinator addressing the divider element.
    #[must_use]
    pub fn target(self) -> Target {
        Target::Child(format!("> .et_pb_{}_inside_divider", self.name()))
    }
}

/// Compiles one divider tree (`dividers.top` or `dividers.bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DividerCompiler {
    /// Edge this compiler handles.
    pub side: DividerSide,
}

impl DividerCompiler {
    /// `true` when a divider shows at `coord`.
    #[must_use]
    pub fn has_divider(resolver: &Resolver<'_>, coord: Coordinate<'_>) -> bool {
        non_empty_text(resolver.closest(coord, &["style"], Terminals::NONE_KEYWORD))
            .is_some_and(|style| style != NO_DIVIDER)
    }
}

impl DeclarationCompiler for DividerCompiler {
    fn feature(&self) -> Feature {
        match self.side {
            DividerSide::Top => Feature::DividerTop,
            DividerSide::Bottom => Feature::DividerBottom,
        }
    }

    fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let target = self.side.target();
        let mut decls = Declarations::new();

        if !Self::has_divider(&ctx.resolver, ctx.coord) {
            if ctx.changed(&["style"]) && !ctx.is_root() {
                decls.push("background-image", "none");
            }
            let mut set = DeclarationSet::new();
            set.extend(&target, decls);
            return set;
        }

        let fresh = ctx.changed(&["style"]);
        let changed = |keys: &[&str]| fresh || ctx.any_changed(&[], keys);
        let image_changed = changed(&["color"]);
        let size_changed = changed(&["repeat", "height"]);
        let height_changed = changed(&["height"]);
        let arrangement_changed = changed(&["arrangement"]);
        let flip_changed = changed(&["flip"]);

        let height = non_empty_text(value.get("height"));
        let height = height.as_deref().unwrap_or(DEFAULT_HEIGHT);

        if image_changed {
            if let Some(url) = self.svg_url(value, ctx) {
                decls.push("background-image", format!("url(\"{url}\")"));
            }
        }
        if size_changed {
            let repeat = value
                .get("repeat")
                .and_then(|r| match r {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => parse_number(s),
                    _ => None,
                })
                .filter(|r| *r > 0.0)
                .unwrap_or(1.0);
            decls.push(
                "background-size",
                format!("{}% {height}", format_number(100.0 / repeat)),
            );
        }
        if height_changed {
            decls.push("height", height);
        }
        if arrangement_changed {
            let above = non_empty_text(value.get("arrangement")).is_some_and(|a| a == ARRANGEMENT_ABOVE);
            decls.push("z-index", if above { "10" } else { "1" });
        }
        if flip_changed {
            if let Some(transform) = self.transform(value, fresh) {
                decls.push("transform", transform);
            }
        }

        let mut set = DeclarationSet::new();
        set.extend(&target, decls);
        set
    }

    fn classnames(&self, resolver: &Resolver<'_>, states: &[&str], names: &mut ClassNames) {
        let config = resolver.config();
        let shown = config.breakpoints.iter().any(|bp| {
            states
                .iter()
                .any(|state| Self::has_divider(resolver, Coordinate::new(&bp.name, state)))
        });
        if shown {
            names.add("section_has_divider");
            names.add(format!("et_pb_{}_divider", self.side.name()));
        }
    }
}

impl DividerCompiler {
    fn svg_url(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> Option<String> {
        let style = non_empty_text(value.get("style"))?;
        let color = non_empty_text(value.get("color"));
        let key = SvgKey {
            kind: ShapeKind::Divider,
            style: style.to_string(),
            color: color.as_deref().unwrap_or(DEFAULT_FILL).to_string(),
            variant: SvgVariant::default(),
            aspect: AspectRatio::default(),
        };
        let url = ctx.cache.svg_url(key);
        if url.is_none() {
            warn_once("Divider", &format!("unknown {} divider style '{style}'", self.side.name()));
        }
        url
    }

    /// The bottom divider is always turned upside down before any flips.
    fn transform(&self, value: &Value, fresh: bool) -> Option<String> {
        let flips = string_list(value.get("flip"));
        let mut parts = Vec::new();
        if self.side == DividerSide::Bottom {
            parts.push("rotateX(180deg)");
        }
        if flips.contains(&"horizontal") {
            parts.push("rotateY(180deg)");
        }
        if flips.contains(&"vertical") {
            parts.push("rotateX(180deg)");
        }
        if parts.is_empty() {
            return (!fresh).then(|| "none".to_string());
        }
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::attrs::AttributeTree;
    use crate::compile::testing::compile_at;
    use crate::config::EngineConfig;

    const TOP: DividerCompiler = DividerCompiler {
        side: DividerSide::Top,
    };

    #[test]
    fn test_none_is_terminal() {
        let config = EngineConfig::default();
        let tree = json!({
            "desktop": { "value": { "style": "solid" } },
            "tablet": { "value": { "style": "none" } }
        });
        let resolver = Resolver::new(AttributeTree::new(&tree), &config);
        assert!(DividerCompiler::has_divider(&resolver, Coordinate::new("desktop", "value")));
        assert!(!DividerCompiler::has_divider(&resolver, Coordinate::new("tablet", "value")));
        assert!(!DividerCompiler::has_divider(&resolver, Coordinate::new("phone", "hover")));
    }

    #[test]
    fn test_layout_declarations() {
        let tree = json!({ "desktop": { "value": {
            "style": "wave", "color": "#fff", "height": "60px", "repeat": 4, "arrangement": "above"
        } } });
        let set = compile_at(&TOP, &tree, "desktop", "value");
        let decls = set.get(&DividerSide::Top.target()).unwrap();

        assert!(decls.get("background-image").unwrap().starts_with("url(\"data:image/svg+xml;base64,"));
        assert_eq!(decls.get("background-size"), Some("25% 60px"));
        assert_eq!(decls.get("height"), Some("60px"));
        assert_eq!(decls.get("z-index"), Some("10"));
        assert!(!decls.contains("transform"));
    }

    #[test]
    fn test_bottom_divider_is_rotated() {
        let bottom = DividerCompiler {
            side: DividerSide::Bottom,
        };
        let tree = json!({ "desktop": { "value": { "style": "slant", "flip": ["horizontal"] } } });
        let set = compile_at(&bottom, &tree, "desktop", "value");
        let decls = set.get(&DividerSide::Bottom.target()).unwrap();
        assert_eq!(decls.get("transform"), Some("rotateX(180deg) rotateY(180deg)"));
        assert_eq!(decls.get("background-size"), Some("100% 100px"));
        assert_eq!(decls.get("z-index"), Some("1"));
    }

    #[test]
    fn test_turning_off_clears_image() {
        let tree = json!({
            "desktop": { "value": { "style": "wave" } },
            "tablet": { "value": { "style": "none" } }
        });
        let set = compile_at(&TOP, &tree, "tablet", "value");
        let decls = set.get(&DividerSide::Top.target()).unwrap();
        assert_eq!(decls.get("background-image"), Some("none"));
    }

    #[test]
    fn test_classnames_only_when_shown() {
        let config = EngineConfig::default();
        let states = ["value", "hover"];

        let off = json!({ "desktop": { "value": { "style": "none" } } });
        let mut names = ClassNames::new();
        TOP.classnames(&Resolver::new(AttributeTree::new(&off), &config), &states, &mut names);
        assert!(names.is_empty());

        let hover_only = json!({ "desktop": { "hover": { "style": "curve" } } });
        TOP.classnames(&Resolver::new(AttributeTree::new(&hover_only), &config), &states, &mut names);
        assert_eq!(names.to_string(), "section_has_divider et_pb_top_divider");
    }
}
