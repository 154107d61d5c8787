//! Renderers for laid-out prototypes
//!
//! Currently HTML only; the abstract [`PrototypeLayout`](crate::layout::PrototypeLayout)
//! is the extension point for other outputs.

pub mod html;

pub use html::{render_html, HtmlRenderer};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::PrototypeLayoutBuilder;
use crate::models::Prototype;

/// Lay out and render a prototype in one call
pub fn render_prototype(prototype: &Prototype, config: &LayoutConfig) -> String {
    let mut builder = PrototypeLayoutBuilder::new(config.clone());
    let layout = builder.build(prototype);
    render_html(prototype, &layout, config)
}

/// Parse, validate, lay out and render a prototype given as JSON
pub fn render_prototype_json(source: &str, config: &LayoutConfig) -> Result<String> {
    let prototype = Prototype::from_json_str(source)?;
    Ok(render_prototype(&prototype, config))
}
