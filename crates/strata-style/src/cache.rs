//! Per-request memoization of generated CSS fragments.
//!
//! Gradient strings are needed both by the background compiler and by the
//! parallax builder, and SVG data URIs are expensive to encode. Entries are
//! keyed by their inputs, so a [`CompileCache`] may be shared by several
//! requests.

use std::collections::HashMap;

use serde_json::Value;
use strata_common::data_url::DataUrl;

use crate::compile::render_gradient;
use crate::svg::{SvgKey, markup};

/// Memoized gradient functions and shape URIs.
#[derive(Debug, Default)]
pub struct CompileCache {
    gradients: HashMap<String, Option<String>>,
    svg_urls: HashMap<SvgKey, Option<String>>,
    hits: usize,
}

impl CompileCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The CSS function for a merged gradient object, rendered on first use.
    pub fn gradient(&mut self, gradient: &Value) -> Option<String> {
        let key = gradient.to_string();
        if let Some(found) = self.gradients.get(&key) {
            self.hits += 1;
            return found.clone();
        }
        let built = render_gradient(gradient);
        let _ = self.gradients.insert(key, built.clone());
        built
    }

    /// The `data:` URI for a built-in shape, encoded on first use.
    ///
    /// `None` when the shape name is unknown.
    pub fn svg_url(&mut self, key: SvgKey) -> Option<String> {
        if let Some(found) = self.svg_urls.get(&key) {
            self.hits += 1;
            return found.clone();
        }
        let built = markup(&key).map(|svg| DataUrl::encode_svg(&svg));
        let _ = self.svg_urls.insert(key, built.clone());
        built
    }

    /// Number of lookups answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.gradients.clear();
        self.svg_urls.clear();
        self.hits = 0;
    }
}
