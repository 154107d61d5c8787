//! Plumbing between JS values and the layout crate
//!
//! Entry points decode their arguments into crate types, work with the crate's
//! own [`PrototypeError`], and convert to a `JsValue` only on the way out.
//! Boundary failures are echoed to the browser console with a `[WASM]` prefix
//! so they show up even when the caller swallows the rejection.

use std::fmt::Display;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::LayoutConfig;
use crate::error::{ConfigError, PrototypeError};
use crate::models::Prototype;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// Console channel for boundary messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Console {
    Log,
    Warn,
    Error,
}

pub fn console_write(channel: Console, msg: &str) {
    let line = format!("[WASM] {}", msg);
    match channel {
        Console::Log => console_log(&line),
        Console::Warn => console_warn(&line),
        Console::Error => console_error(&line),
    }
}

/// Trace an API call on the browser console
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_write($crate::api::helpers::Console::Log, &format!($($arg)*))
    };
}

/// Report input the API turned away
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_write($crate::api::helpers::Console::Warn, &format!($($arg)*))
    };
}

/// Decode and validate a prototype object
pub fn prototype_from_js(value: JsValue) -> Result<Prototype, PrototypeError> {
    let prototype: Prototype =
        serde_wasm_bindgen::from_value(value).map_err(|e| PrototypeError::Decode(e.to_string()))?;
    if let Err(e) = prototype.validate() {
        crate::wasm_warn!("Rejected prototype: {}", e);
        return Err(e);
    }
    Ok(prototype)
}

/// Decode an optional configuration object; `undefined` or `null` means defaults
pub fn config_from_js(value: JsValue) -> Result<LayoutConfig, ConfigError> {
    if value.is_undefined() || value.is_null() {
        return Ok(LayoutConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Object(e.to_string()))
}

/// Encode a layout result for the caller
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, PrototypeError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| PrototypeError::Encode(e.to_string()))
}

/// Turn a boundary error into the JS exception value, logging it first
pub fn to_js_error(err: impl Display) -> JsValue {
    let msg = err.to_string();
    console_write(Console::Error, &msg);
    JsValue::from_str(&msg)
}
