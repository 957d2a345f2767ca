//! Built-in SVG shapes for patterns, masks, and section dividers.
//!
//! Shapes are emitted inline as `data:` URLs, so each one is a small SVG
//! document with the user's color substituted into the fill. Masks and
//! patterns additionally come in inverted (shape cut out of a filled
//! rectangle) and rotated (quarter turn, swapped dimensions) variants.

use std::fmt::Write as _;

use strum_macros::{Display, EnumString};

use crate::values::format_number;

/// Default fill when no color is configured.
pub const DEFAULT_FILL: &str = "#000000";

/// How a shape is transformed inside its SVG document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SvgVariant {
    /// Draw the complement of the shape.
    pub invert: bool,
    /// Rotate the shape a quarter turn clockwise.
    pub rotate: bool,
}

/// Mask canvas proportions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AspectRatio {
    /// 4:3
    #[default]
    Landscape,
    /// 3:4
    Portrait,
    /// 1:1
    Square,
}

impl AspectRatio {
    const fn dimensions(self) -> (f64, f64) {
        match self {
            Self::Landscape => (1920.0, 1440.0),
            Self::Portrait => (1440.0, 1920.0),
            Self::Square => (1920.0, 1920.0),
        }
    }
}

/// Which shape library an SVG comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Repeating background pattern tile.
    Pattern,
    /// Background mask.
    Mask,
    /// Section divider.
    Divider,
}

/// Identity of one generated SVG.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SvgKey {
    /// Shape library.
    pub kind: ShapeKind,
    /// Shape name, e.g. `polka-dots`.
    pub style: String,
    /// Fill color.
    pub color: String,
    /// Invert/rotate flags.
    pub variant: SvgVariant,
    /// Canvas proportions; only meaningful for masks.
    pub aspect: AspectRatio,
}

/// SVG markup for a shape key.
#[must_use]
pub fn markup(key: &SvgKey) -> Option<String> {
    match key.kind {
        ShapeKind::Pattern => pattern(&key.style, &key.color, key.variant),
        ShapeKind::Mask => mask(&key.style, &key.color, key.variant, key.aspect),
        ShapeKind::Divider => divider(&key.style, &key.color),
    }
}

/// Repeating pattern tile.
#[must_use]
pub fn pattern(style: &str, color: &str, variant: SvgVariant) -> Option<String> {
    let path = match style {
        "diagonal-stripes" => "M0 20L20 0H15L0 15ZM20 20V15L15 20Z",
        "polka-dots" => "M6 10a4 4 0 1 0 8 0a4 4 0 1 0 -8 0Z",
        "checkerboard" => "M0 0H10V10H0ZM10 10H20V20H10Z",
        "grid" => "M0 0H20V1H0ZM0 0H1V20H0Z",
        _ => return None,
    };
    Some(document(20.0, 20.0, path, color, variant, false))
}

/// Mask shape sized for `aspect`.
#[must_use]
pub fn mask(style: &str, color: &str, variant: SvgVariant, aspect: AspectRatio) -> Option<String> {
    let (w, h) = aspect.dimensions();
    let n = format_number;
    let path = match style {
        "arch" => format!(
            "M0 {h}V{y}Q{cx} {top} {w} {y}V{h}Z",
            h = n(h),
            y = n(h * 0.45),
            cx = n(w / 2.0),
            top = n(-h * 0.15),
            w = n(w),
        ),
        "blob" => format!(
            "M{x0} {cy}C{x0} {y1} {x1} {y0} {cx} {y0}C{x2} {y0} {x3} {y1} {x3} {cy}C{x3} {y2} {x2} {y3} {cx} {y3}C{x1} {y3} {x0} {y2} {x0} {cy}Z",
            x0 = n(w * 0.1),
            x1 = n(w * 0.25),
            x2 = n(w * 0.8),
            x3 = n(w * 0.92),
            cx = n(w * 0.55),
            cy = n(h * 0.5),
            y0 = n(h * 0.08),
            y1 = n(h * 0.2),
            y2 = n(h * 0.85),
            y3 = n(h * 0.95),
        ),
        "corner-lake" => format!(
            "M{w} {h}H{x}Q{qx} {qy} {w} {y}Z",
            w = n(w),
            h = n(h),
            x = n(w * 0.35),
            qx = n(w * 0.75),
            qy = n(h * 0.75),
            y = n(h * 0.3),
        ),
        "ellipse" => format!(
            "M0 {cy}a{rx} {ry} 0 1 0 {d} 0a{rx} {ry} 0 1 0 -{d} 0Z",
            cy = n(h / 2.0),
            rx = n(w / 2.0),
            ry = n(h / 2.0),
            d = n(w),
        ),
        _ => return None,
    };
    Some(document(w, h, &path, color, variant, true))
}

/// Section divider shape, drawn hanging from the top edge.
#[must_use]
pub fn divider(style: &str, color: &str) -> Option<String> {
    let path = match style {
        "wave" => "M0 0H1280V70Q960 140 640 70T0 70Z",
        "slant" => "M0 0H1280L0 140Z",
        "arrow" => "M0 0H1280V100H680L640 140L600 100H0Z",
        "curve" => "M0 0H1280V20Q640 280 0 20Z",
        _ => return None,
    };
    Some(document(1280.0, 140.0, path, color, SvgVariant::default(), true))
}

fn document(w: f64, h: f64, path: &str, color: &str, variant: SvgVariant, stretch: bool) -> String {
    let fill = sanitize_color(color);
    let (outer_w, outer_h) = if variant.rotate { (h, w) } else { (w, h) };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{ow}" height="{oh}" viewBox="0 0 {ow} {oh}""#,
        ow = format_number(outer_w),
        oh = format_number(outer_h),
    );
    if stretch {
        svg.push_str(r#" preserveAspectRatio="none""#);
    }
    svg.push('>');

    if variant.rotate {
        let _ = write!(svg, r#"<g transform="translate({} 0) rotate(90)">"#, format_number(h));
    }
    if variant.invert {
        let _ = write!(
            svg,
            r#"<path fill="{fill}" fill-rule="evenodd" d="M0 0H{w}V{h}H0Z{path}"/>"#,
            w = format_number(w),
            h = format_number(h),
        );
    } else {
        let _ = write!(svg, r#"<path fill="{fill}" d="{path}"/>"#);
    }
    if variant.rotate {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

fn sanitize_color(color: &str) -> String {
    let clean: String = color
        .chars()
        .filter(|c| !matches!(c, '"' | '<' | '>' | '&'))
        .collect();
    if clean.trim().is_empty() {
        DEFAULT_FILL.to_string()
    } else {
        clean.trim().to_string()
    }
}
