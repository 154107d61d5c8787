//! Prototype input model
//!
//! Annotated tokens, sections, parameter styles, and the assembler that
//! builds them.

pub mod assembler;
pub mod prototype;
pub mod tokens;

pub use assembler::PrototypeAssembler;
pub use prototype::{ParameterSection, ParameterStyle, Prototype, Section};
pub use tokens::{Highlight, Token, TokenClass, TokenRole, TokenSpan, TokenStream};
