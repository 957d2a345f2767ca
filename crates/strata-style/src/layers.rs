//! Background layer composition.
//!
//! `background-image` is a single property holding every layer, so a change
//! to any one layer means re-emitting the whole stack. The compositor works
//! out which layers are active at a coordinate, in which order they paint,
//! whether the stack needs re-emitting at all, and what happens to
//! `background-color`.
//!
//! Parallax images are not part of the stack: they render in their own
//! container (see [`crate::parallax`]), and a gradient that overlays a
//! parallax image moves into that container as well.

use serde_json::Value;

use crate::attrs::Coordinate;
use crate::compile::DeclarationContext;
use crate::resolve::{Resolver, Terminals};
use crate::values::{NULL, is_global_token, is_on, non_empty_text};

/// Path of the image URL in a background tree.
pub const IMAGE_URL: &[&str] = &["image", "url"];
/// Path of the parallax toggle in a background tree.
pub const PARALLAX_ENABLED: &[&str] = &["image", "parallax", "enabled"];
/// Path of the parallax method in a background tree.
pub const PARALLAX_METHOD: &[&str] = &["image", "parallax", "method"];
/// Path of the gradient toggle in a background tree.
pub const GRADIENT_ENABLED: &[&str] = &["gradient", "enabled"];

const GRADIENT_KEYS: &[&str] = &[
    "enabled",
    "type",
    "direction",
    "directionRadial",
    "stops",
    "repeat",
    "length",
    "overlaysImage",
];

const NORMAL_BLEND: &str = "normal";

/// What a layer paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// `url(...)` or a variable reference.
    Image,
    /// A gradient function.
    Gradient,
}

/// One `background-image` layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// What the layer paints.
    pub kind: LayerKind,
    /// Layer expression.
    pub css: String,
}

impl Layer {
    /// An image layer. Variable references pass through unwrapped.
    #[must_use]
    pub fn image(url: &str) -> Self {
        let css = if is_global_token(url) {
            url.trim().to_string()
        } else {
            format!("url({})", url.trim())
        };
        Self {
            kind: LayerKind::Image,
            css,
        }
    }

    /// A gradient layer.
    #[must_use]
    pub const fn gradient(css: String) -> Self {
        Self {
            kind: LayerKind::Gradient,
            css,
        }
    }
}

/// What to do with `background-color` at a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDecision {
    /// Emit nothing; the inherited declaration stands.
    Inherit,
    /// `background-color: initial`, so a blend mode shows the layers
    /// through instead of mixing them with a color.
    Initial,
    /// Emit this color.
    Explicit(String),
}

/// The composed stack at one coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStack {
    /// Active layers, first painting on top.
    pub layers: Vec<Layer>,
    /// Color decision.
    pub color: ColorDecision,
    /// `true` when a layer was set here with a different raw value than the
    /// nearest ancestor, so `background-image` must be written again.
    pub changed: bool,
}

impl LayerStack {
    /// `true` when a layer of `kind` is active.
    #[must_use]
    pub fn has(&self, kind: LayerKind) -> bool {
        self.layers.iter().any(|l| l.kind == kind)
    }

    /// The `background-image` value to emit, if any.
    ///
    /// An empty stack that changed clears the inherited layers with
    /// `initial`, except at the root where there is nothing to clear.
    #[must_use]
    pub fn background_image(&self, is_root: bool) -> Option<String> {
        if !self.changed {
            return None;
        }
        if self.layers.is_empty() {
            return (!is_root).then(|| "initial".to_string());
        }
        Some(
            self.layers
                .iter()
                .map(|l| l.css.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Compose the layer stack for the coordinate in `ctx`.
///
/// `value` is the merged background object at that coordinate.
pub fn compose(value: &Value, ctx: &mut DeclarationContext<'_, '_>) -> LayerStack {
    let coord = ctx.coord;
    let resolver = ctx.resolver;

    let parallax = parallax_enabled(&resolver, coord);
    let image = if parallax {
        None
    } else {
        image_url(&resolver, coord).map(|url| Layer::image(&url))
    };

    let gradient_value = value.get("gradient").unwrap_or(&NULL);
    let overlays = is_on(gradient_value.get("overlaysImage"));
    let gradient = if parallax && overlays && !ctx.is_preview {
        None
    } else {
        gradient_css(gradient_value, ctx).map(Layer::gradient)
    };

    let has_stops = gradient_value
        .get("stops")
        .and_then(Value::as_array)
        .is_some_and(|stops| !stops.is_empty());

    let mut layers: Vec<Layer> = image.into_iter().chain(gradient).collect();
    if has_stops && overlays {
        layers.reverse();
    }

    let changed = resolver.changed(coord, IMAGE_URL)
        || resolver.changed(coord, PARALLAX_ENABLED)
        || resolver.any_changed(coord, &["gradient"], GRADIENT_KEYS);

    let blend = ctx.closest_text(&["image", "blend"]);
    let blended = layers.len() >= 2 && blend.as_deref().is_some_and(|b| b != NORMAL_BLEND);
    let color = if blended {
        if changed || ctx.changed(&["color"]) || ctx.changed(&["image", "blend"]) {
            ColorDecision::Initial
        } else {
            ColorDecision::Inherit
        }
    } else if ctx.changed(&["color"]) {
        ctx.closest_text(&["color"])
            .map_or(ColorDecision::Inherit, ColorDecision::Explicit)
    } else {
        ColorDecision::Inherit
    };

    #[cfg(feature = "style-trace")]
    eprintln!(
        "[LAYERS] {}/{} layers={:?} changed={changed} color={color:?}",
        coord.breakpoint,
        coord.state,
        layers.iter().map(|l| l.kind).collect::<Vec<_>>()
    );

    LayerStack {
        layers,
        color,
        changed,
    }
}

/// The image URL in effect at `coord`. An explicit `""` clears an inherited URL.
#[must_use]
pub fn image_url(resolver: &Resolver<'_>, coord: Coordinate<'_>) -> Option<String> {
    non_empty_text(resolver.closest(coord, IMAGE_URL, Terminals::EMPTY)).map(|s| s.into_owned())
}

/// `true` when parallax is on at `coord`. An explicit `off` stops inheritance.
#[must_use]
pub fn parallax_enabled(resolver: &Resolver<'_>, coord: Coordinate<'_>) -> bool {
    is_on(resolver.closest(coord, PARALLAX_ENABLED, Terminals::OFF))
}

/// The gradient layer at the coordinate in `ctx`, if the gradient is on.
///
/// `gradient` is the merged gradient object.
pub fn gradient_css(gradient: &Value, ctx: &mut DeclarationContext<'_, '_>) -> Option<String> {
    let coord = ctx.coord;
    if !is_on(ctx.resolver.closest(coord, GRADIENT_ENABLED, Terminals::OFF)) {
        return None;
    }
    ctx.cache.gradient(gradient)
}
