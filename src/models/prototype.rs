//! Prototype sections
//!
//! A prototype is one token stream cut into sections. Plain sections are
//! rendered as text; parameter sections carry the span before the parameter
//! list, one span per parameter, and the span after it.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use super::tokens::{TokenSpan, TokenStream};
use crate::error::{PrototypeError, Result};

/// Grammar family of a parameter list
#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, Deserialize)]
#[serde(try_from = "u8")]
pub enum ParameterStyle {
    /// `type name = value`
    C = 0,

    /// `name: type = value`
    Pascal = 1,

    /// `direction type signed [dim] name [dim] = value`
    SystemVerilog = 2,
}

impl ParameterStyle {
    /// CSS class naming the style on the parameter section
    pub fn css_class(self) -> &'static str {
        match self {
            ParameterStyle::C => "CStyle",
            ParameterStyle::Pascal => "PascalStyle",
            ParameterStyle::SystemVerilog => "SystemVerilogStyle",
        }
    }
}

impl TryFrom<u8> for ParameterStyle {
    type Error = PrototypeError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ParameterStyle::C),
            1 => Ok(ParameterStyle::Pascal),
            2 => Ok(ParameterStyle::SystemVerilog),
            other => Err(PrototypeError::UnknownParameterStyle(other)),
        }
    }
}

/// A section holding a parameter list
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ParameterSection {
    pub style: ParameterStyle,

    /// Text before the first parameter, usually ending in `(`
    #[serde(default)]
    pub before: Option<TokenSpan>,

    /// One span per parameter, separators included
    pub parameters: Vec<TokenSpan>,

    /// Text after the last parameter, usually starting with `)`
    #[serde(default)]
    pub after: Option<TokenSpan>,
}

impl ParameterSection {
    /// Token span covering the whole section
    pub fn extent(&self) -> TokenSpan {
        let spans = self
            .before
            .iter()
            .chain(self.parameters.iter())
            .chain(self.after.iter());
        let mut extent: Option<TokenSpan> = None;
        for span in spans {
            extent = Some(match extent {
                None => *span,
                Some(e) => TokenSpan::new(e.start.min(span.start), e.end.max(span.end)),
            });
        }
        extent.unwrap_or_default()
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

/// One section of a prototype
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Plain { span: TokenSpan },
    Parameters(ParameterSection),
}

impl Section {
    pub fn extent(&self) -> TokenSpan {
        match self {
            Section::Plain { span } => *span,
            Section::Parameters(section) => section.extent(),
        }
    }

    pub fn as_parameters(&self) -> Option<&ParameterSection> {
        match self {
            Section::Parameters(section) => Some(section),
            Section::Plain { .. } => None,
        }
    }
}

/// An annotated prototype ready for layout
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Prototype {
    /// Suffix of the outer element id
    #[serde(default)]
    pub id: Option<String>,

    pub tokens: TokenStream,

    pub sections: Vec<Section>,
}

impl Prototype {
    /// Parse a prototype from its JSON form and validate it
    pub fn from_json_str(source: &str) -> Result<Self> {
        let prototype: Prototype = serde_json::from_str(source)?;
        prototype.validate()?;
        Ok(prototype)
    }

    /// Check that every span lies inside the token stream and that each
    /// parameter section's spans are ordered
    pub fn validate(&self) -> Result<()> {
        let len = self.tokens.len();
        for (index, section) in self.sections.iter().enumerate() {
            let check = |span: &TokenSpan| -> Result<()> {
                if span.start > span.end || span.end > len {
                    return Err(PrototypeError::SpanOutOfRange {
                        section: index,
                        start: span.start,
                        end: span.end,
                        len,
                    });
                }
                Ok(())
            };

            match section {
                Section::Plain { span } => check(span)?,
                Section::Parameters(params) => {
                    let mut cursor = 0;
                    let spans = params
                        .before
                        .iter()
                        .chain(params.parameters.iter())
                        .chain(params.after.iter());
                    for span in spans {
                        check(span)?;
                        if span.start < cursor {
                            return Err(PrototypeError::MalformedSection {
                                section: index,
                                message: format!(
                                    "span {}..{} overlaps the span before it",
                                    span.start, span.end
                                ),
                            });
                        }
                        cursor = span.end;
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of parameter sections with at least one parameter
    pub fn parameter_section_count(&self) -> usize {
        self.sections
            .iter()
            .filter_map(Section::as_parameters)
            .filter(|s| s.parameter_count() > 0)
            .count()
    }
}
