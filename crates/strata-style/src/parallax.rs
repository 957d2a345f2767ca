//! Parallax containers.
//!
//! A parallax image is painted by its own container element rather than by
//! `background-image`, one container per `(breakpoint, state)` that turns
//! parallax on. Every container carries the "exist" class of every *other*
//! container, so the stylesheet can hide the base container wherever a more
//! specific one takes over. That makes the class list of an early container
//! depend on containers found later, so the build runs in two passes:
//!
//! 1. walk breakpoints widest first and states base first, collecting a
//!    [`PendingContainer`] descriptor for each coordinate that renders and
//!    accumulating the shared exist-class set;
//! 2. finish every descriptor against the complete set.
//!
//! Narrower breakpoints that switch parallax off explicitly get a
//! `et-pb-parallax-hidden-<breakpoint>` class instead of a container.

use serde::Serialize;

use crate::attrs::Coordinate;
use crate::cache::CompileCache;
use crate::classnames::ClassNames;
use crate::layers::{GRADIENT_ENABLED, IMAGE_URL, PARALLAX_ENABLED, PARALLAX_METHOD, image_url, parallax_enabled};
use crate::resolve::{Resolver, Terminals};
use crate::values::{OFF, as_text, is_on};

/// Class on the element when it has at least one parallax container.
pub const ELEMENT_CLASS: &str = "et_pb_section_parallax";

const BASE_CLASS: &str = "et_parallax_bg";
const CSS_METHOD_CLASS: &str = "et_pb_parallax_css";
const HIDDEN_PREFIX: &str = "et-pb-parallax-hidden-";

/// A finished parallax container for the markup layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallaxContainer {
    /// Breakpoint the container belongs to.
    pub breakpoint: String,
    /// State the container belongs to.
    pub state: String,
    /// Image painted by the container; `None` when the URL was cleared here.
    pub image_url: Option<String>,
    /// Scroll effect done in CSS (`background-attachment: fixed`) rather than script.
    pub css_method: bool,
    /// Gradient painted over the image inside the container.
    pub gradient: Option<String>,
    /// Classes for the container element.
    pub classnames: ClassNames,
}

/// Result of a parallax build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallaxBuild {
    /// Containers in breakpoint/state order.
    pub containers: Vec<ParallaxContainer>,
    /// Classes for the element itself.
    pub element_classnames: ClassNames,
}

/// A container found in the first pass, before the shared classes are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingContainer {
    /// Breakpoint.
    pub breakpoint: String,
    /// State.
    pub state: String,
    /// Image URL.
    pub image_url: Option<String>,
    /// CSS method.
    pub css_method: bool,
    /// Overlay gradient.
    pub gradient: Option<String>,
    /// Classes naming this container's own coordinate.
    pub own_classes: Vec<String>,
    /// Class announcing this container to the others; the root container has none.
    pub exist_class: Option<String>,
    /// Suppression classes for narrower breakpoints that switch parallax off.
    pub hidden_classes: Vec<String>,
}

/// Builds parallax containers for one background tree.
#[derive(Debug)]
pub struct ParallaxBuilder<'r, 'c> {
    resolver: Resolver<'r>,
    is_preview: bool,
    cache: &'c mut CompileCache,
}

impl<'r, 'c> ParallaxBuilder<'r, 'c> {
    /// A builder over a background tree.
    #[must_use]
    pub const fn new(resolver: Resolver<'r>, is_preview: bool, cache: &'c mut CompileCache) -> Self {
        Self {
            resolver,
            is_preview,
            cache,
        }
    }

    /// Run both passes. `states` are the enabled states, base state included.
    pub fn build(&mut self, states: &[&str]) -> ParallaxBuild {
        let (pending, exist) = self.collect(states);
        finish(pending, &exist)
    }

    /// First pass: descriptors plus the accumulated exist-class set.
    pub fn collect(&mut self, states: &[&str]) -> (Vec<PendingContainer>, ClassNames) {
        let config = self.resolver.config();
        let base_state = config.base_state.as_str();

        let mut ordered: Vec<&str> = Vec::with_capacity(states.len());
        if states.contains(&base_state) {
            ordered.push(base_state);
        }
        ordered.extend(states.iter().copied().filter(|s| *s != base_state));

        let mut pending = Vec::new();
        let mut exist = ClassNames::new();
        for bp in &config.breakpoints {
            for &state in &ordered {
                let coord = Coordinate::new(bp.name.as_str(), state);
                if !self.is_candidate(coord) || !self.should_render(coord) {
                    continue;
                }
                let entry = self.pending(coord);
                if let Some(class) = &entry.exist_class {
                    exist.add(class.clone());
                }
                #[cfg(feature = "style-trace")]
                eprintln!("[PARALLAX] pending {}/{} url={:?}", bp.name, state, entry.image_url);
                pending.push(entry);
            }
        }
        (pending, exist)
    }

    /// Only the root and coordinates that set something parallax-related
    /// get a container of their own; the rest reuse an ancestor's.
    fn is_candidate(&self, coord: Coordinate<'_>) -> bool {
        self.resolver.is_root(coord)
            || [IMAGE_URL, PARALLAX_ENABLED, PARALLAX_METHOD]
                .iter()
                .any(|path| self.resolver.exact(coord, path).is_some())
    }

    /// Parallax is on here (set or inherited, not switched off) and there is
    /// an image, or the image was cleared here on purpose.
    fn should_render(&self, coord: Coordinate<'_>) -> bool {
        if !parallax_enabled(&self.resolver, coord) {
            return false;
        }
        let cleared = self
            .resolver
            .exact(coord, IMAGE_URL)
            .and_then(|v| v.as_str())
            .is_some_and(str::is_empty);
        cleared || image_url(&self.resolver, coord).is_some()
    }

    fn pending(&mut self, coord: Coordinate<'_>) -> PendingContainer {
        let config = self.resolver.config();
        let is_base_bp = coord.breakpoint == config.base_breakpoint();
        let is_base_state = coord.state == config.base_state;

        let mut own_classes = vec![BASE_CLASS.to_string()];
        let mut suffix = String::new();
        if !is_base_bp {
            suffix.push('_');
            suffix.push_str(coord.breakpoint);
            own_classes.push(format!("{BASE_CLASS}{suffix}"));
        }
        if !is_base_state {
            suffix.push_str("__");
            suffix.push_str(coord.state);
            own_classes.push(format!("{BASE_CLASS}__{}", coord.state));
        }
        let exist_class = (!self.resolver.is_root(coord)).then(|| format!("{BASE_CLASS}{suffix}_exist"));

        let method = self.resolver.closest(coord, PARALLAX_METHOD, Terminals::NONE);
        let css_method = method.and_then(as_text).is_some_and(|m| m == OFF);

        PendingContainer {
            breakpoint: coord.breakpoint.to_string(),
            state: coord.state.to_string(),
            image_url: image_url(&self.resolver, coord),
            css_method,
            gradient: self.overlay_gradient(coord),
            own_classes,
            exist_class,
            hidden_classes: self.hidden_classes(coord),
        }
    }

    /// The gradient moves into the container when it overlays the image,
    /// except in the preview, which paints it on the element.
    fn overlay_gradient(&mut self, coord: Coordinate<'_>) -> Option<String> {
        if self.is_preview || !is_on(self.resolver.closest(coord, GRADIENT_ENABLED, Terminals::OFF)) {
            return None;
        }
        let gradient = self.resolver.merged(coord, &["gradient"])?;
        if !is_on(gradient.get("overlaysImage")) {
            return None;
        }
        self.cache.gradient(&gradient)
    }

    fn hidden_classes(&self, coord: Coordinate<'_>) -> Vec<String> {
        let config = self.resolver.config();
        config
            .narrower_than(coord.breakpoint)
            .filter(|narrower| {
                let own = self
                    .resolver
                    .exact(Coordinate::new(narrower, coord.state), PARALLAX_ENABLED);
                let base = self
                    .resolver
                    .exact(Coordinate::new(narrower, &config.base_state), PARALLAX_ENABLED);
                own.or(base).and_then(as_text).is_some_and(|v| v == OFF)
            })
            .map(|narrower| format!("{HIDDEN_PREFIX}{narrower}"))
            .collect()
    }
}

/// Second pass: attach the shared exist classes to every descriptor.
#[must_use]
pub fn finish(pending: Vec<PendingContainer>, exist: &ClassNames) -> ParallaxBuild {
    let mut element_classnames = ClassNames::new();
    if !pending.is_empty() {
        element_classnames.add(ELEMENT_CLASS);
    }

    let containers = pending
        .into_iter()
        .map(|entry| {
            let mut classnames = ClassNames::new();
            for class in entry.own_classes {
                classnames.add(class);
            }
            if entry.css_method {
                classnames.add(CSS_METHOD_CLASS);
            }
            for class in exist.iter() {
                if entry.exist_class.as_deref() != Some(class) {
                    classnames.add(class);
                }
            }
            for class in entry.hidden_classes {
                classnames.add(class);
            }
            ParallaxContainer {
                breakpoint: entry.breakpoint,
                state: entry.state,
                image_url: entry.image_url,
                css_method: entry.css_method,
                gradient: entry.gradient,
                classnames,
            }
        })
        .collect();

    ParallaxBuild {
        containers,
        element_classnames,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::attrs::AttributeTree;
    use crate::config::EngineConfig;

    fn build(tree: &serde_json::Value, states: &[&str], is_preview: bool) -> ParallaxBuild {
        let config = EngineConfig::default();
        let mut cache = CompileCache::new();
        let resolver = Resolver::new(AttributeTree::new(tree), &config);
        ParallaxBuilder::new(resolver, is_preview, &mut cache).build(states)
    }

    #[test]
    fn test_narrower_off_hides_instead_of_rendering() {
        let tree = json!({
            "desktop": { "value": { "image": { "url": "a.jpg", "parallax": { "enabled": "on" } } } },
            "tablet": { "value": { "image": { "parallax": { "enabled": "off" } } } }
        });
        let built = build(&tree, &["value"], false);

        assert_eq!(built.containers.len(), 1);
        let desktop = &built.containers[0];
        assert_eq!(desktop.breakpoint, "desktop");
        assert_eq!(desktop.image_url.as_deref(), Some("a.jpg"));
        assert!(desktop.classnames.contains("et-pb-parallax-hidden-tablet"));
        assert!(!desktop.classnames.contains("et-pb-parallax-hidden-phone"));
        assert!(built.element_classnames.contains(ELEMENT_CLASS));
    }

    #[test]
    fn test_exist_classes_are_shared() {
        let tree = json!({
            "desktop": {
                "value": { "image": { "url": "a.jpg", "parallax": { "enabled": "on" } } },
                "hover": { "image": { "url": "b.jpg" } }
            },
            "phone": { "value": { "image": { "url": "c.jpg", "parallax": { "method": "off" } } } }
        });
        let built = build(&tree, &["value", "hover"], false);
        let names: Vec<_> = built
            .containers
            .iter()
            .map(|c| (c.breakpoint.as_str(), c.state.as_str()))
            .collect();
        assert_eq!(names, vec![("desktop", "value"), ("desktop", "hover"), ("phone", "value")]);

        let root = &built.containers[0];
        assert_eq!(
            root.classnames.to_string(),
            "et_parallax_bg et_parallax_bg__hover_exist et_parallax_bg_phone_exist"
        );

        let hover = &built.containers[1];
        assert!(hover.classnames.contains("et_parallax_bg__hover"));
        assert!(!hover.classnames.contains("et_parallax_bg__hover_exist"));
        assert!(hover.classnames.contains("et_parallax_bg_phone_exist"));

        let phone = &built.containers[2];
        assert!(phone.css_method);
        assert!(phone.classnames.contains(CSS_METHOD_CLASS));
        assert!(phone.classnames.contains("et_parallax_bg__hover_exist"));
    }

    #[test]
    fn test_disabled_state_and_missing_image() {
        let tree = json!({
            "desktop": {
                "value": { "image": { "parallax": { "enabled": "on" } } },
                "hover": { "image": { "url": "b.jpg" } }
            }
        });
        assert!(build(&tree, &["value"], false).containers.is_empty());
        assert_eq!(build(&tree, &["value", "hover"], false).containers.len(), 1);
    }

    #[test]
    fn test_overlay_gradient_moves_into_container() {
        let tree = json!({ "desktop": { "value": {
            "image": { "url": "a.jpg", "parallax": { "enabled": "on" } },
            "gradient": {
                "enabled": "on",
                "overlaysImage": "on",
                "stops": [{ "color": "#000", "position": "0" }, { "color": "#fff", "position": "100" }]
            }
        } } });
        let live = build(&tree, &["value"], false);
        assert_eq!(
            live.containers[0].gradient.as_deref(),
            Some("linear-gradient(180deg,#000 0%,#fff 100%)")
        );
        let preview = build(&tree, &["value"], true);
        assert_eq!(preview.containers[0].gradient, None);
    }
}
