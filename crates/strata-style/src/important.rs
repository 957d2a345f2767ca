//! The `!important` policy of a style request.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Key in a per-property map that sets the default for unlisted properties.
pub const ANY_PROPERTY: &str = "*";

/// Whether emitted declarations carry `!important`.
///
/// ```json
/// true
/// { "*": true, "transition": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Important {
    /// Applies to every property.
    Flag(bool),
    /// Per-property switches; `*` is the default for unlisted properties.
    PerProperty(BTreeMap<String, bool>),
}

impl Default for Important {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Important {
    /// Every property marked important except the listed exemptions.
    #[must_use]
    pub fn all_except(exempt: &[&str]) -> Self {
        let mut map = BTreeMap::new();
        let _ = map.insert(ANY_PROPERTY.to_string(), true);
        for property in exempt {
            let _ = map.insert((*property).to_string(), false);
        }
        Self::PerProperty(map)
    }

    /// `true` when `property` should carry the marker.
    #[must_use]
    pub fn applies_to(&self, property: &str) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::PerProperty(map) => map
                .get(property)
                .or_else(|| map.get(ANY_PROPERTY))
                .copied()
                .unwrap_or(false),
        }
    }
}
