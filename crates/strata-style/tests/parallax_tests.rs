//! Integration tests for parallax containers.

use serde_json::json;
use strata_style::{ElementAttrs, EngineConfig, StyleEngine, StyleRequest};

const TABLET: &str = "@media only screen and (max-width: 980px)";

#[test]
fn test_parallax_hidden_at_narrower_breakpoint() {
    let engine = StyleEngine::new(EngineConfig::default()).unwrap();
    let attrs = ElementAttrs::from_value(json!({
        "background": {
            "desktop": { "value": { "image": { "url": "hero.jpg", "parallax": { "enabled": "on" } } } },
            "tablet": { "value": { "image": { "parallax": { "enabled": "off" } } } }
        }
    }));
    let compiled = engine.compile(&attrs, &StyleRequest::new(".s")).unwrap();

    assert_eq!(compiled.parallax.len(), 1);
    let container = &compiled.parallax[0];
    assert_eq!(container.breakpoint, "desktop");
    assert_eq!(container.image_url.as_deref(), Some("hero.jpg"));
    assert!(!container.css_method);
    assert_eq!(
        container.classnames.to_string(),
        "et_parallax_bg et-pb-parallax-hidden-tablet"
    );
    assert!(compiled.classnames.contains("et_pb_section_parallax"));

    // The image is painted by the container at desktop and by the element
    // itself once parallax is switched off.
    assert_eq!(compiled.statements.declaration("", ".s"), None);
    assert_eq!(
        compiled.statements.declaration(TABLET, ".s"),
        Some("background-image: url(hero.jpg); background-repeat: no-repeat;")
    );
}

#[test]
fn test_cleared_url_still_renders_container() {
    let engine = StyleEngine::new(EngineConfig::default()).unwrap();
    let attrs = ElementAttrs::from_value(json!({
        "background": {
            "desktop": { "value": { "image": { "url": "hero.jpg", "parallax": { "enabled": "on" } } } },
            "phone": { "value": { "image": { "url": "" } } }
        }
    }));
    let compiled = engine.compile(&attrs, &StyleRequest::new(".s")).unwrap();

    assert_eq!(compiled.parallax.len(), 2);
    let phone = &compiled.parallax[1];
    assert_eq!(phone.breakpoint, "phone");
    assert_eq!(phone.image_url, None);
    assert!(compiled.parallax[0].classnames.contains("et_parallax_bg_phone_exist"));
}

#[test]
fn test_states_outside_request_are_skipped() {
    let engine = StyleEngine::new(EngineConfig::default()).unwrap();
    let attrs = ElementAttrs::from_value(json!({
        "background": {
            "desktop": {
                "value": { "image": { "url": "a.jpg", "parallax": { "enabled": "on", "method": "off" } } },
                "sticky": { "image": { "url": "b.jpg" } }
            }
        }
    }));

    let request = StyleRequest {
        enabled_states: Some(vec!["hover".to_string()]),
        ..StyleRequest::new(".s")
    };
    let compiled = engine.compile(&attrs, &request).unwrap();
    assert_eq!(compiled.parallax.len(), 1);
    assert!(compiled.parallax[0].css_method);
    assert_eq!(
        compiled.parallax[0].classnames.to_string(),
        "et_parallax_bg et_pb_parallax_css"
    );

    let compiled = engine.compile(&attrs, &StyleRequest::new(".s")).unwrap();
    assert_eq!(compiled.parallax.len(), 2);
    assert_eq!(compiled.parallax[1].state, "sticky");
    assert_eq!(compiled.parallax[1].image_url.as_deref(), Some("b.jpg"));
}

#[test]
fn test_container_serializes_camel_case() {
    let engine = StyleEngine::new(EngineConfig::default()).unwrap();
    let attrs = ElementAttrs::from_value(json!({
        "background": {
            "desktop": { "value": { "image": { "url": "a.jpg", "parallax": { "enabled": "on" } } } }
        }
    }));
    let compiled = engine.compile(&attrs, &StyleRequest::new(".s")).unwrap();
    let value = serde_json::to_value(&compiled.parallax[0]).unwrap();

    assert_eq!(value["imageUrl"], json!("a.jpg"));
    assert_eq!(value["cssMethod"], json!(false));
    assert_eq!(value["classnames"], json!(["et_parallax_bg"]));
}
