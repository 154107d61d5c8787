//! Annotated tokens
//!
//! The upstream language parser splits a signature into tokens and tags each
//! one with a semantic role and a syntax highlight. The layout engine never
//! re-tokenizes; it only walks these tokens and measures them in characters.

use serde::{Deserialize, Serialize};

/// Semantic role assigned to a token by the language parser
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenRole {
    /// Not classified (whitespace, punctuation the parser left alone)
    #[default]
    Null,
    TypeModifier,
    TypeQualifier,
    ParamModifier,
    OpeningTypeModifier,
    ClosingTypeModifier,
    OpeningParamModifier,
    ClosingParamModifier,
    Type,
    Name,
    /// A parameter name that is also a keyword of the language
    KeywordName,
    NameTypeSeparator,
    ParamSeparator,
    PropertyValueSeparator,
    PropertyValue,
    DefaultValueSeparator,
    DefaultValue,
    StartOfTuple,
    EndOfTuple,
    /// SystemVerilog `parameter`/`localparam` style keywords
    ParamKeyword,
    /// SystemVerilog port direction (`input`, `output`, `inout`, `ref`)
    InOut,
    /// SystemVerilog `signed`/`unsigned`
    Signed,
}

impl TokenRole {
    pub fn is_opening_modifier(self) -> bool {
        matches!(self, TokenRole::OpeningTypeModifier | TokenRole::OpeningParamModifier)
    }

    pub fn is_closing_modifier(self) -> bool {
        matches!(self, TokenRole::ClosingTypeModifier | TokenRole::ClosingParamModifier)
    }
}

/// Syntax highlighting class assigned to a token
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    Null,
    Keyword,
    Number,
    String,
    Comment,
    PreprocessingDirective,
    Metadata,
}

impl Highlight {
    /// CSS class used for a highlighted run, `None` for plain text
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Highlight::Null => None,
            Highlight::Keyword => Some("SHKeyword"),
            Highlight::Number => Some("SHNumber"),
            Highlight::String => Some("SHString"),
            Highlight::Comment => Some("SHComment"),
            Highlight::PreprocessingDirective => Some("SHPreprocessingDirective"),
            Highlight::Metadata => Some("SHMetadata"),
        }
    }
}

/// Lexical class of a token, derived from its text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
    Text,
    Whitespace,
    LineBreak,
    Symbol,
}

/// One annotated token
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,

    #[serde(default)]
    pub role: TokenRole,

    #[serde(default)]
    pub highlight: Highlight,
}

impl Token {
    pub fn new(text: impl Into<String>, role: TokenRole, highlight: Highlight) -> Self {
        Self {
            text: text.into(),
            role,
            highlight,
        }
    }

    pub fn class(&self) -> TokenClass {
        if self.text == "\n" || self.text == "\r\n" {
            TokenClass::LineBreak
        } else if !self.text.is_empty() && self.text.chars().all(char::is_whitespace) {
            TokenClass::Whitespace
        } else if !self.text.is_empty()
            && self.text.chars().all(|c| c.is_alphanumeric() || c == '_')
        {
            TokenClass::Text
        } else {
            TokenClass::Symbol
        }
    }

    /// Plain whitespace, as opposed to a line break
    pub fn is_whitespace(&self) -> bool {
        self.class() == TokenClass::Whitespace
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }
}

/// Half-open range of token indexes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "token span {}..{} is reversed", start, end);
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Tokens of one prototype plus the character offset of every boundary
///
/// `offsets[i]` is the character offset where token `i` starts and
/// `offsets[len]` is the total length, so cells can be stored as character
/// offsets and mapped back to token indexes.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "Vec<Token>", into = "Vec<Token>")]
pub struct TokenStream {
    tokens: Vec<Token>,
    offsets: Vec<usize>,
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        let mut offsets = Vec::with_capacity(tokens.len() + 1);
        let mut offset = 0;
        offsets.push(offset);
        for token in &tokens {
            offset += token.char_len();
            offsets.push(offset);
        }
        Self { tokens, offsets }
    }
}

impl From<TokenStream> for Vec<Token> {
    fn from(stream: TokenStream) -> Self {
        stream.tokens
    }
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        tokens.into()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Character offset of the boundary before token `index`
    pub fn offset(&self, index: usize) -> usize {
        self.offsets[index]
    }

    /// Token index whose start boundary sits at `offset`
    ///
    /// Offsets handed out by [`offset`](Self::offset) always land on a
    /// boundary; anything else is a caller bug.
    pub fn index_at_offset(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            // Zero-length tokens share a boundary; prefer the first one.
            Ok(mut index) => {
                while index > 0 && self.offsets[index - 1] == offset {
                    index -= 1;
                }
                index
            }
            Err(_) => panic!("character offset {} is not a token boundary", offset),
        }
    }

    /// Character length of a token span
    pub fn span_char_len(&self, span: TokenSpan) -> usize {
        self.offsets[span.end] - self.offsets[span.start]
    }

    /// Concatenated text of a token span
    pub fn text_of(&self, span: TokenSpan) -> String {
        self.tokens[span.start..span.end]
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }

    /// First character at or after `index` within `end`
    pub fn first_char_from(&self, index: usize, end: usize) -> Option<char> {
        self.tokens[index..end].iter().find_map(Token::first_char)
    }

    /// Whether the text starting at token `index` begins with `prefix`,
    /// possibly across several tokens
    pub fn text_starts_with(&self, index: usize, end: usize, prefix: &str) -> bool {
        let mut rest = prefix;
        for token in &self.tokens[index..end] {
            if rest.is_empty() {
                break;
            }
            if token.text.len() >= rest.len() {
                return token.text.starts_with(rest);
            }
            match rest.strip_prefix(token.text.as_str()) {
                Some(remaining) => rest = remaining,
                None => return false,
            }
        }
        rest.is_empty()
    }

    /// Move `index` back over whitespace tokens, never below `floor`
    pub fn back_past_whitespace(&self, mut index: usize, floor: usize) -> usize {
        while index > floor && self.tokens[index - 1].is_whitespace() {
            index -= 1;
        }
        index
    }

    /// Move `index` forward over whitespace tokens, never past `limit`
    pub fn forward_past_whitespace(&self, mut index: usize, limit: usize) -> usize {
        while index < limit && self.tokens[index].is_whitespace() {
            index += 1;
        }
        index
    }
}

/// Split literal text into tokens the way a simple lexer would: runs of word
/// characters, runs of blanks, line breaks, and single symbol characters.
pub fn split_text(text: &str) -> Vec<String> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let is_blank = |c: char| c.is_whitespace() && c != '\n' && c != '\r';

    let mut pieces = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let mut piece = String::from(c);
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                piece.push('\n');
                chars.next();
            }
        } else if is_blank(c) {
            while let Some(&next) = chars.peek() {
                if !is_blank(next) {
                    break;
                }
                piece.push(next);
                chars.next();
            }
        } else if is_word(c) {
            while let Some(&next) = chars.peek() {
                if !is_word(next) {
                    break;
                }
                piece.push(next);
                chars.next();
            }
        }
        pieces.push(piece);
    }
    pieces
}
