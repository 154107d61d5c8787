//! Prototype Grid WASM Module
//!
//! Lays out annotated function and property prototypes as CSS grids for
//! documentation pages. Parameters are cut into columns (type, name, default
//! value, ...) that line up across every parameter, with a wide form for
//! desktop widths and a narrow reflow form.

pub mod api;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod renderers;

// Re-export commonly used types
pub use config::LayoutConfig;
pub use error::{ConfigError, PrototypeError, Result};
pub use layout::{PrototypeLayout, PrototypeLayoutBuilder};
pub use models::{ParameterStyle, Prototype, PrototypeAssembler};
pub use renderers::{render_html, render_prototype, render_prototype_json};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        wasm_warn!("Logger already initialized: {}", e);
    }

    log::info!("Prototype grid WASM module initialized");
}
