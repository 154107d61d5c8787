//! WASM build test
//!
//! Checks that the JS-facing entry points accept prototypes as JS objects.

#![cfg(target_arch = "wasm32")]

use prototype_grid::api::helpers::config_from_js;
use prototype_grid::api::{build_prototype_html, compute_prototype_layout, validate_prototype};
use prototype_grid::{ConfigError, LayoutConfig};
use prototype_grid::models::{ParameterStyle, Prototype, PrototypeAssembler, TokenRole};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn make_prototype() -> Prototype {
    let mut asm = PrototypeAssembler::new().with_id("1");
    asm.begin_parameters(ParameterStyle::C)
        .push("int Sum(", TokenRole::Null)
        .begin_parameter()
        .push("int", TokenRole::Type)
        .push(" ", TokenRole::Null)
        .push("a", TokenRole::Name)
        .end_parameters()
        .push(")", TokenRole::Null);
    asm.finish()
}

fn to_js(prototype: &Prototype) -> JsValue {
    serde_wasm_bindgen::to_value(prototype).unwrap()
}

#[wasm_bindgen_test]
fn test_build_html_with_default_config() {
    let html = build_prototype_html(to_js(&make_prototype()), JsValue::UNDEFINED).unwrap();
    assert!(html.starts_with("<div id=\"NDPrototype1\" class=\"NDPrototype WideForm\">"));
}

#[wasm_bindgen_test]
fn test_compute_layout() {
    let layout = compute_prototype_layout(to_js(&make_prototype()), JsValue::NULL);
    assert!(layout.is_ok());
}

#[wasm_bindgen_test]
fn test_validate_rejects_bad_span() {
    let mut prototype = make_prototype();
    prototype.sections.push(prototype_grid::models::Section::Plain {
        span: prototype_grid::models::TokenSpan::new(0, 99),
    });
    assert!(validate_prototype(to_js(&prototype)).is_err());
    assert!(validate_prototype(to_js(&make_prototype())).is_ok());
}

#[wasm_bindgen_test]
fn test_config_object_errors_are_typed() {
    assert_eq!(config_from_js(JsValue::NULL).unwrap(), LayoutConfig::default());

    let err = config_from_js(JsValue::from_str("wide")).unwrap_err();
    assert!(matches!(err, ConfigError::Object(_)), "{:?}", err);

    let thrown = build_prototype_html(to_js(&make_prototype()), JsValue::from_str("wide")).unwrap_err();
    assert!(thrown.as_string().unwrap().starts_with("Configuration error: Invalid configuration object"));
}
