//! Gradient layers.
//!
//! ```json
//! {
//!   "enabled": "on",
//!   "type": "linear",
//!   "direction": "180deg",
//!   "stops": [{ "color": "#000", "position": "0" }, { "color": "#fff", "position": "100" }]
//! }
//! ```
//!
//! compiles to `linear-gradient(180deg,#000 0%,#fff 100%)`.

use serde_json::Value;
use strata_common::warning::warn_once;

use crate::values::{format_number, is_on, keyword, non_empty_text, parse_number};

const DEFAULT_DIRECTION: &str = "180deg";
const DEFAULT_RADIAL_DIRECTION: &str = "center";

/// The CSS gradient function for a gradient value, ignoring `enabled`.
///
/// Returns `None` with fewer than two usable stops.
#[must_use]
pub fn render_gradient(value: &Value) -> Option<String> {
    let stops = stops(value)?;

    let kind = non_empty_text(value.get("type"));
    let kind = kind.as_deref().unwrap_or("linear");
    let direction = non_empty_text(value.get("direction"))
        .map_or_else(|| DEFAULT_DIRECTION.to_string(), |d| keyword(&d));
    let radial = non_empty_text(value.get("directionRadial"))
        .map_or_else(|| DEFAULT_RADIAL_DIRECTION.to_string(), |d| keyword(&d));
    let prefix = if is_on(value.get("repeat")) { "repeating-" } else { "" };

    let css = match kind {
        "conic" => format!("{prefix}conic-gradient(from {direction} at {radial},{stops})"),
        "circular" => format!("{prefix}radial-gradient(circle at {radial},{stops})"),
        "elliptical" => format!("{prefix}radial-gradient(ellipse at {radial},{stops})"),
        other => {
            if other != "linear" {
                warn_once("Gradient", &format!("unknown gradient type '{other}', using linear"));
            }
            format!("{prefix}linear-gradient({direction},{stops})")
        }
    };
    Some(css)
}

/// `color position` pairs joined by commas.
///
/// Positions are percentages of the gradient line. When the gradient repeats,
/// they are scaled to the repeat `length` instead.
fn stops(value: &Value) -> Option<String> {
    let items = value.get("stops")?.as_array()?;
    let length = if is_on(value.get("repeat")) {
        non_empty_text(value.get("length")).and_then(|raw| {
            let number = parse_number(&raw)?;
            let unit = raw.trim().trim_start_matches(|c: char| {
                c.is_ascii_digit() || matches!(c, '.' | '-' | '+')
            });
            Some((number, if unit.is_empty() { "%" } else { unit }.to_string()))
        })
    } else {
        None
    };

    let rendered: Vec<String> = items
        .iter()
        .filter_map(|stop| {
            let color = non_empty_text(stop.get("color"))?;
            let position = non_empty_text(stop.get("position"));
            Some(match position {
                Some(raw) => format!("{color} {}", position_css(&raw, length.as_ref())),
                None => color.into_owned(),
            })
        })
        .collect();

    if rendered.len() < 2 {
        return None;
    }
    Some(rendered.join(","))
}

fn position_css(raw: &str, length: Option<&(f64, String)>) -> String {
    let raw = raw.trim();
    let bare = raw.parse::<f64>().ok().or_else(|| raw.strip_suffix('%')?.parse().ok());
    match (bare, length) {
        (Some(percent), Some((length, unit))) => {
            format!("{}{unit}", format_number(percent * length / 100.0))
        }
        (Some(percent), None) => format!("{}%", format_number(percent)),
        (None, _) => raw.to_string(),
    }
}
