//! Shared rules for the SVG overlay children (patterns and masks).
//!
//! Both render into a dedicated child element covering the background, so
//! their declarations target that child rather than the element itself.
//! An overlay that becomes active at a coordinate writes all of its
//! properties; afterwards each property group is re-emitted only when one
//! of its own sub-values changes.

use serde_json::Value;
use strata_common::warning::warn_once;

use super::DeclarationContext;
use crate::declarations::{DeclarationSet, Declarations, Target};
use crate::resolve::Terminals;
use crate::svg::{AspectRatio, DEFAULT_FILL, ShapeKind, SvgKey, SvgVariant};
use crate::values::{is_on, keyword, non_empty_text, string_list};

const STRETCH: &str = "stretch";
const CUSTOM: &str = "custom";
const NORMAL_BLEND: &str = "normal";

/// Per-overlay constants.
pub(super) struct ShapeLayer {
    /// Key of the overlay inside the background object.
    pub key: &'static str,
    /// Child combinator addressing the overlay element.
    pub target: &'static str,
    /// Shape library.
    pub kind: ShapeKind,
    /// Name used in warnings.
    pub component: &'static str,
    /// `size` when unset.
    pub default_size: &'static str,
    /// Attribute holding the position keyword.
    pub position_key: &'static str,
    /// Position when unset.
    pub default_position: &'static str,
    /// Patterns tile; masks never repeat.
    pub repeats: bool,
}

struct Changes {
    fresh: bool,
    image: bool,
    transform: bool,
    size: bool,
    position: bool,
    repeat: bool,
    blend: bool,
}

impl ShapeLayer {
    /// Declarations for the overlay at the coordinate in `ctx`.
    ///
    /// `value` is the merged overlay object.
    pub fn compile(&self, value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> DeclarationSet {
        let target = Target::child(self.target);
        let enabled = [self.key, "enabled"];
        let mut decls = Declarations::new();

        if !is_on(ctx.closest(&enabled, Terminals::OFF)) {
            if ctx.changed(&enabled) && !ctx.is_root() {
                decls.push("background-image", "initial");
            }
            let mut set = DeclarationSet::new();
            set.extend(&target, decls);
            return set;
        }

        let changes = self.changes(ctx);
        let flags = string_list(value.get("transform"));
        let size = non_empty_text(value.get("size"))
            .map_or_else(|| self.default_size.to_string(), |s| s.into_owned());

        if changes.image {
            if let Some(url) = self.svg_url(value, &flags, ctx) {
                decls.push("background-image", format!("url(\"{url}\")"));
            }
        }

        if changes.transform {
            let horizontal = flags.contains(&"flipHorizontal");
            let vertical = flags.contains(&"flipVertical");
            match (horizontal, vertical) {
                (true, true) => decls.push("transform", "scale(-1, -1)"),
                (true, false) => decls.push("transform", "scale(-1, 1)"),
                (false, true) => decls.push("transform", "scale(1, -1)"),
                (false, false) if !changes.fresh => decls.push("transform", "none"),
                (false, false) => {}
            }
        }

        if changes.size {
            decls.push("background-size", size_css(&size, value));
        }

        if size != STRETCH && changes.position {
            let position = non_empty_text(value.get(self.position_key))
                .map_or_else(|| self.default_position.to_string(), |p| p.into_owned());
            decls.push("background-position", position_css(&position, value));
        }

        if self.repeats && changes.repeat {
            let repeat = non_empty_text(value.get("repeat"));
            decls.push("background-repeat", repeat.as_deref().unwrap_or("repeat"));
        }

        if changes.blend {
            let blend = non_empty_text(value.get("blend"));
            let blend = blend.as_deref().unwrap_or(NORMAL_BLEND);
            if !(changes.fresh && blend == NORMAL_BLEND) {
                decls.push("mix-blend-mode", blend);
            }
        }

        let mut set = DeclarationSet::new();
        set.extend(&target, decls);
        set
    }

    fn changes(&self, ctx: &DeclarationContext<'_, '_>) -> Changes {
        let prefix = [self.key];
        let fresh = ctx.changed(&[self.key, "enabled"]);
        let changed = |keys: &[&str]| fresh || ctx.any_changed(&prefix, keys);
        Changes {
            fresh,
            image: changed(&["style", "color", "transform", "aspectRatio"]),
            transform: changed(&["transform"]),
            size: changed(&["size", "width", "height"]),
            position: changed(&[self.position_key, "horizontalOffset", "verticalOffset", "size"]),
            repeat: changed(&["repeat"]),
            blend: changed(&["blend"]),
        }
    }

    fn svg_url(
        &self,
        value: &Value,
        flags: &[&str],
        ctx: &mut DeclarationContext<'_, '_>,
    ) -> Option<String> {
        let style = non_empty_text(value.get("style"))?;
        let color = non_empty_text(value.get("color"));
        let aspect = non_empty_text(value.get("aspectRatio"))
            .and_then(|a| a.parse::<AspectRatio>().ok())
            .unwrap_or_default();
        let key = SvgKey {
            kind: self.kind,
            style: style.to_string(),
            color: color.as_deref().unwrap_or(DEFAULT_FILL).to_string(),
            variant: SvgVariant {
                invert: flags.contains(&"invert"),
                rotate: flags.contains(&"rotate"),
            },
            aspect,
        };
        let url = ctx.cache.svg_url(key);
        if url.is_none() {
            warn_once(self.component, &format!("unknown {} style '{style}'", self.key));
        }
        url
    }
}

fn size_css(size: &str, value: &Value) -> String {
    match size {
        STRETCH => "100% 100%".to_string(),
        CUSTOM => {
            let width = non_empty_text(value.get("width"));
            let height = non_empty_text(value.get("height"));
            format!(
                "{} {}",
                width.as_deref().unwrap_or("auto"),
                height.as_deref().unwrap_or("auto")
            )
        }
        other => keyword(other),
    }
}

fn position_css(position: &str, value: &Value) -> String {
    if position == CUSTOM {
        let x = non_empty_text(value.get("horizontalOffset"));
        let y = non_empty_text(value.get("verticalOffset"));
        return format!("{} {}", x.as_deref().unwrap_or("0"), y.as_deref().unwrap_or("0"));
    }
    keyword(position)
}
