//! Prototype Grid WASM API
//!
//! JavaScript-facing functions. Everything here is a thin adapter over the
//! native library: decode the JS value, run the builder, encode the result.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, (de)serialization and error conversion
//! - `prototype`: layout and rendering entry points

pub mod helpers;
pub mod prototype;

pub use prototype::{build_prototype_html, compute_prototype_layout, validate_prototype};
