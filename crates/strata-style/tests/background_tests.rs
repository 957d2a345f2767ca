//! Integration tests for background compilation and layer composition.

use serde_json::{Value, json};
use strata_style::{CompileCache, CompiledStyle, ElementAttrs, EngineConfig, StyleEngine, StyleRequest};

const TABLET: &str = "@media only screen and (max-width: 980px)";
const PHONE: &str = "@media only screen and (max-width: 767px)";
const GRADIENT: &str = "linear-gradient(180deg,#000 0%,#fff 100%)";

fn compile(background: Value, request: &StyleRequest) -> CompiledStyle {
    let engine = StyleEngine::new(EngineConfig::default()).unwrap();
    let attrs = ElementAttrs::from_value(json!({ "background": background }));
    engine.compile(&attrs, request).unwrap()
}

fn gradient(overlays: &str) -> Value {
    json!({
        "enabled": "on",
        "type": "linear",
        "direction": "180deg",
        "overlaysImage": overlays,
        "stops": [{ "color": "#000", "position": "0" }, { "color": "#fff", "position": "100" }]
    })
}

#[test]
fn test_inherited_url_not_emitted_again() {
    let compiled = compile(
        json!({
            "desktop": { "value": { "image": { "url": "a.jpg" } } },
            "tablet": { "value": { "color": "#fff" } }
        }),
        &StyleRequest::new(".s"),
    );

    assert_eq!(
        compiled.statements.declaration("", ".s"),
        Some("background-image: url(a.jpg); background-repeat: no-repeat;")
    );
    assert_eq!(
        compiled.statements.declaration(TABLET, ".s"),
        Some("background-color: #fff;")
    );
}

#[test]
fn test_gradient_over_inherited_image() {
    let compiled = compile(
        json!({
            "desktop": { "value": { "image": { "url": "a.jpg" } } },
            "tablet": { "value": { "gradient": gradient("off") } }
        }),
        &StyleRequest::new(".s"),
    );

    let tablet = compiled.statements.declaration(TABLET, ".s").unwrap();
    assert!(tablet.starts_with(&format!("background-image: url(a.jpg), {GRADIENT};")));
}

#[test]
fn test_overlaying_gradient_paints_on_top() {
    let compiled = compile(
        json!({
            "desktop": { "value": { "image": { "url": "a.jpg" }, "gradient": gradient("on") } }
        }),
        &StyleRequest::new(".s"),
    );

    let desktop = compiled.statements.declaration("", ".s").unwrap();
    assert!(desktop.starts_with(&format!("background-image: {GRADIENT}, url(a.jpg);")));
}

#[test]
fn test_cleared_layers_reset_to_initial() {
    let compiled = compile(
        json!({
            "desktop": { "value": { "image": { "url": "a.jpg" }, "gradient": gradient("off") } },
            "phone": { "value": { "image": { "url": "" }, "gradient": { "enabled": "off" } } }
        }),
        &StyleRequest::new(".s"),
    );

    assert_eq!(
        compiled.statements.declaration(PHONE, ".s"),
        Some("background-image: initial;")
    );
}

#[test]
fn test_blend_mode_resets_color() {
    let compiled = compile(
        json!({
            "desktop": { "value": {
                "color": "#f00",
                "image": { "url": "a.jpg", "blend": "multiply" },
                "gradient": gradient("off")
            } }
        }),
        &StyleRequest::new(".s"),
    );

    let desktop = compiled.statements.declaration("", ".s").unwrap();
    assert!(desktop.starts_with("background-color: initial;"));
    assert!(desktop.contains("background-blend-mode: multiply;"));
    assert!(!desktop.contains("#f00"));
}

#[test]
fn test_repeat_policy_follows_layer_presets() {
    let background = json!({
        "desktop": { "value": { "image": { "url": "a.jpg" } } }
    });

    let legacy = compile(background.clone(), &StyleRequest::new(".s"));
    assert!(
        legacy
            .statements
            .declaration("", ".s")
            .unwrap()
            .contains("background-repeat: no-repeat;")
    );

    let request = StyleRequest {
        has_layer_presets: true,
        ..StyleRequest::new(".s")
    };
    let presets = compile(background, &request);
    assert_eq!(
        presets.statements.declaration("", ".s"),
        Some("background-image: url(a.jpg);")
    );
}

#[test]
fn test_image_placement() {
    let compiled = compile(
        json!({
            "desktop": { "value": { "image": {
                "url": "a.jpg",
                "size": "custom",
                "width": "50%",
                "position": "top_left",
                "repeat": "repeat-x"
            } } }
        }),
        &StyleRequest::new(".s"),
    );

    assert_eq!(
        compiled.statements.declaration("", ".s"),
        Some(
            "background-image: url(a.jpg); background-size: 50% auto; \
             background-position: top left; background-repeat: repeat-x;"
        )
    );
}

#[test]
fn test_pattern_and_mask_target_children() {
    let compiled = compile(
        json!({
            "desktop": { "value": {
                "pattern": { "enabled": "on", "style": "polka-dots", "color": "#123456" },
                "mask": { "enabled": "on", "style": "arch" }
            } },
            "tablet": { "value": { "pattern": { "enabled": "off" } } }
        }),
        &StyleRequest::new(".s"),
    );

    let pattern = compiled
        .statements
        .declaration("", ".s > .et_pb_background_pattern")
        .unwrap();
    assert!(pattern.starts_with("background-image: url(\"data:image/svg+xml;base64,"));

    let mask = compiled
        .statements
        .declaration("", ".s > .et_pb_background_mask")
        .unwrap();
    assert!(mask.contains("background-size: 100% 100%;"));
    assert!(!mask.contains("background-position"));

    assert_eq!(
        compiled
            .statements
            .declaration(TABLET, ".s > .et_pb_background_pattern"),
        Some("background-image: initial;")
    );
}

#[test]
fn test_shared_cache_across_elements() {
    let engine = StyleEngine::new(EngineConfig::default()).unwrap();
    let mut cache = CompileCache::new();
    let element = |color: &str| {
        ElementAttrs::from_value(json!({ "background": { "desktop": { "value": { "gradient": {
            "enabled": "on",
            "stops": [{ "color": color, "position": "0" }, { "color": "#fff", "position": "100" }]
        } } } } }))
    };

    let first = engine
        .compile_with_cache(&element("#000"), &StyleRequest::new(".a"), &mut cache)
        .unwrap();
    let second = engine
        .compile_with_cache(&element("#f00"), &StyleRequest::new(".b"), &mut cache)
        .unwrap();

    assert_eq!(
        first.statements.declaration("", ".a"),
        Some("background-image: linear-gradient(180deg,#000 0%,#fff 100%);")
    );
    assert_eq!(
        second.statements.declaration("", ".b"),
        Some("background-image: linear-gradient(180deg,#f00 0%,#fff 100%);")
    );
}
