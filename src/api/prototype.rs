//! Prototype layout API
//!
//! Entry points for page scripts: lay out a prototype and get either the
//! finished markup or the abstract layout to build DOM from.

use wasm_bindgen::prelude::*;

use super::helpers::{config_from_js, prototype_from_js, to_js, to_js_error};
use crate::error::Result;
use crate::layout::{PrototypeLayout, PrototypeLayoutBuilder};
use crate::models::Prototype;
use crate::renderers::render_html;
use crate::wasm_log;

fn lay_out(prototype: JsValue, config: JsValue) -> Result<(Prototype, PrototypeLayoutBuilder, PrototypeLayout)> {
    let prototype = prototype_from_js(prototype)?;
    let mut builder = PrototypeLayoutBuilder::new(config_from_js(config)?);
    let layout = builder.build(&prototype);
    Ok((prototype, builder, layout))
}

/// Lay out a prototype and render it as HTML
///
/// # Parameters
/// * `prototype` - Annotated prototype (`{ id?, tokens, sections }`)
/// * `config` - Optional layout configuration; defaults when omitted
#[wasm_bindgen(js_name = buildPrototypeHtml)]
pub fn build_prototype_html(prototype: JsValue, config: JsValue) -> std::result::Result<String, JsValue> {
    let (prototype, builder, layout) = lay_out(prototype, config).map_err(to_js_error)?;
    wasm_log!(
        "buildPrototypeHtml: {} tokens, {} groups",
        prototype.tokens.len(),
        layout.groups.len()
    );
    Ok(render_html(&prototype, &layout, builder.config()))
}

/// Lay out a prototype and return the layout object
#[wasm_bindgen(js_name = computePrototypeLayout)]
pub fn compute_prototype_layout(prototype: JsValue, config: JsValue) -> std::result::Result<JsValue, JsValue> {
    let (_, _, layout) = lay_out(prototype, config).map_err(to_js_error)?;
    wasm_log!("computePrototypeLayout: {} groups", layout.groups.len());
    to_js(&layout).map_err(to_js_error)
}

/// Check a prototype's structure without laying it out
#[wasm_bindgen(js_name = validatePrototype)]
pub fn validate_prototype(prototype: JsValue) -> std::result::Result<(), JsValue> {
    prototype_from_js(prototype).map(|_| ()).map_err(to_js_error)
}
