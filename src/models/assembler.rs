//! Prototype assembler
//!
//! Builds an annotated [`Prototype`] piece by piece, recording section and
//! parameter boundaries as tokens are pushed. Language parsers and tests use
//! it instead of computing token indexes by hand.
//!
//! ```
//! use prototype_grid::models::{ParameterStyle, PrototypeAssembler, TokenRole};
//!
//! let mut asm = PrototypeAssembler::new();
//! asm.begin_parameters(ParameterStyle::C)
//!     .push("void Run(", TokenRole::Null)
//!     .begin_parameter()
//!     .push("int", TokenRole::Type)
//!     .push(" ", TokenRole::Null)
//!     .push("count", TokenRole::Name)
//!     .end_parameters()
//!     .push(")", TokenRole::Null);
//! let prototype = asm.finish();
//! assert_eq!(prototype.sections.len(), 1);
//! ```

use super::prototype::{ParameterSection, ParameterStyle, Prototype, Section};
use super::tokens::{split_text, Highlight, Token, TokenRole, TokenSpan, TokenStream};

#[derive(Debug)]
enum OpenSection {
    Plain {
        start: usize,
    },
    Parameters {
        style: ParameterStyle,
        start: usize,
        before_end: Option<usize>,
        parameters: Vec<TokenSpan>,
        parameter_start: Option<usize>,
        after_start: Option<usize>,
    },
}

/// Incremental builder for annotated prototypes
#[derive(Debug, Default)]
pub struct PrototypeAssembler {
    id: Option<String>,
    tokens: Vec<Token>,
    sections: Vec<Section>,
    open: Option<OpenSection>,
}

impl PrototypeAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Push literal text split into tokens, all with the same role
    pub fn push(&mut self, text: &str, role: TokenRole) -> &mut Self {
        self.push_highlighted(text, role, Highlight::Null)
    }

    /// Push literal text split into tokens, all with the same role and highlight
    ///
    /// Whitespace pieces never carry the highlight so highlighted runs stay
    /// tight around their words.
    pub fn push_highlighted(&mut self, text: &str, role: TokenRole, highlight: Highlight) -> &mut Self {
        for piece in split_text(text) {
            let token = Token::new(piece, role, highlight);
            let highlight = if token.is_whitespace() { Highlight::Null } else { highlight };
            let role = if token.is_whitespace() && role != TokenRole::Null {
                // Role-tagged whitespace would be treated as content.
                TokenRole::Null
            } else {
                role
            };
            self.tokens.push(Token { highlight, role, ..token });
        }
        self
    }

    /// Push one token exactly as given
    pub fn push_token(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Start a plain section, closing any open one
    pub fn begin_plain(&mut self) -> &mut Self {
        self.end_section();
        self.open = Some(OpenSection::Plain {
            start: self.tokens.len(),
        });
        self
    }

    /// Start a parameter section, closing any open one
    pub fn begin_parameters(&mut self, style: ParameterStyle) -> &mut Self {
        self.end_section();
        self.open = Some(OpenSection::Parameters {
            style,
            start: self.tokens.len(),
            before_end: None,
            parameters: Vec::new(),
            parameter_start: None,
            after_start: None,
        });
        self
    }

    /// Start the next parameter of the open parameter section
    pub fn begin_parameter(&mut self) -> &mut Self {
        let here = self.tokens.len();
        match &mut self.open {
            Some(OpenSection::Parameters {
                before_end,
                parameters,
                parameter_start,
                after_start,
                ..
            }) => {
                assert!(after_start.is_none(), "parameter started after the parameter list ended");
                if before_end.is_none() {
                    *before_end = Some(here);
                }
                if let Some(start) = parameter_start.take() {
                    parameters.push(TokenSpan::new(start, here));
                }
                *parameter_start = Some(here);
            }
            _ => panic!("begin_parameter called outside a parameter section"),
        }
        self
    }

    /// Close the parameter list; tokens pushed afterwards form the post span
    pub fn end_parameters(&mut self) -> &mut Self {
        let here = self.tokens.len();
        match &mut self.open {
            Some(OpenSection::Parameters {
                before_end,
                parameters,
                parameter_start,
                after_start,
                ..
            }) => {
                if before_end.is_none() {
                    *before_end = Some(here);
                }
                if let Some(start) = parameter_start.take() {
                    parameters.push(TokenSpan::new(start, here));
                }
                *after_start = Some(here);
            }
            _ => panic!("end_parameters called outside a parameter section"),
        }
        self
    }

    /// Close the open section, if any
    pub fn end_section(&mut self) -> &mut Self {
        let here = self.tokens.len();
        match self.open.take() {
            None => {}
            Some(OpenSection::Plain { start }) => {
                self.sections.push(Section::Plain {
                    span: TokenSpan::new(start, here),
                });
            }
            Some(OpenSection::Parameters {
                style,
                start,
                before_end,
                mut parameters,
                parameter_start,
                after_start,
            }) => {
                if let Some(p) = parameter_start {
                    parameters.push(TokenSpan::new(p, here));
                }
                let before_end = before_end.unwrap_or(here);
                let before = (before_end > start).then(|| TokenSpan::new(start, before_end));
                let after = after_start
                    .filter(|&a| here > a)
                    .map(|a| TokenSpan::new(a, here));
                self.sections.push(Section::Parameters(ParameterSection {
                    style,
                    before,
                    parameters,
                    after,
                }));
            }
        }
        self
    }

    pub fn finish(mut self) -> Prototype {
        self.end_section();
        Prototype {
            id: self.id,
            tokens: TokenStream::new(self.tokens),
            sections: self.sections,
        }
    }
}
