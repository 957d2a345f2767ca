//! Hand-written CSS attached to an element.
//!
//! The `css` namespace holds four optional fields per coordinate:
//!
//! | field         | emitted as                                  |
//! |---------------|---------------------------------------------|
//! | `mainElement` | declarations on the element selector        |
//! | `before`      | declarations on `selector:before`           |
//! | `after`       | declarations on `selector:after`            |
//! | `freeForm`    | raw rules; the word `selector` is replaced  |
//!
//! Only values set exactly at a coordinate are emitted. The browser's own
//! cascade already carries them to narrower breakpoints.

use crate::attrs::Coordinate;
use crate::config::EngineConfig;
use crate::resolve::Resolver;
use crate::selector::{FREE_FORM_TOKEN, Selectors, apply_template};
use crate::statement::{CssStatement, StatementGroup};
use crate::values::non_empty_text;

/// Attribute namespace of custom CSS.
pub const NAMESPACE: &str = "css";

const FIELDS: &[(&str, &str)] = &[
    ("mainElement", "{selector}"),
    ("before", "{selector}:before"),
    ("after", "{selector}:after"),
];

/// Statements for every custom CSS field in the tree.
#[must_use]
pub fn custom_css_statements(resolver: &Resolver<'_>, selectors: &Selectors, states: &[&str]) -> StatementGroup {
    let config = resolver.config();
    let mut group = StatementGroup::new();
    for bp in &config.breakpoints {
        for &state in states {
            let coord = Coordinate::new(&bp.name, state);
            if resolver.tree().at(coord).is_none() {
                continue;
            }
            compile_coordinate(resolver, config, selectors, coord, &mut group);
        }
    }
    group
}

fn compile_coordinate(
    resolver: &Resolver<'_>,
    config: &EngineConfig,
    selectors: &Selectors,
    coord: Coordinate<'_>,
    group: &mut StatementGroup,
) {
    let at_rules = config.at_rules(coord.breakpoint);
    let selector = selectors.for_coordinate(config, coord);

    for &(field, template) in FIELDS {
        if let Some(css) = non_empty_text(resolver.exact(coord, &[field])) {
            group.add(CssStatement::new(
                at_rules,
                &apply_template(&selector, template),
                &strip_newlines(&css),
            ));
        }
    }

    if let Some(css) = non_empty_text(resolver.exact(coord, &["freeForm"])) {
        group.add_raw(at_rules, &free_form(&css, &selector));
    }
}

/// Substitute the element selector and drop literal newlines.
#[must_use]
pub fn free_form(css: &str, selector: &str) -> String {
    strip_newlines(&css.replace(FREE_FORM_TOKEN, selector))
}

fn strip_newlines(css: &str) -> String {
    css.trim().replace(['\r', '\n'], "")
}
