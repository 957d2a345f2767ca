//! Warnings are deduplicated per request, not per process.

use serde_json::json;
use strata_common::warning::warning_count;
use strata_style::{ElementAttrs, EngineConfig, StyleEngine, StyleRequest};

#[test]
fn test_each_request_reports_its_own_warnings() {
    let engine = StyleEngine::new(EngineConfig::default()).unwrap();
    let spiral = ElementAttrs::from_value(json!({
        "background": { "desktop": { "value": { "gradient": {
            "enabled": "on",
            "type": "spiral",
            "stops": [{ "color": "#000" }, { "color": "#fff" }]
        } } } }
    }));

    let compiled = engine.compile(&spiral, &StyleRequest::new(".s")).unwrap();
    assert_eq!(
        compiled.statements.declaration("", ".s"),
        Some("background-image: linear-gradient(180deg,#000,#fff);")
    );
    assert_eq!(warning_count(), 1);

    let _ = engine.compile(&spiral, &StyleRequest::new(".s")).unwrap();
    assert_eq!(warning_count(), 1);

    let _ = engine
        .compile(&ElementAttrs::default(), &StyleRequest::new(".s"))
        .unwrap();
    assert_eq!(warning_count(), 0);
}
