//! Cell extraction
//!
//! Walks the tokens of one parameter and hands out consecutive runs to the
//! schema's columns, in schema order. Each column accepts a set of token
//! roles; unclassified tokens are accepted everywhere so stray punctuation
//! stays with the column it follows. Bracketed modifier blocks and tuples
//! are skipped whole so their contents never leak into later columns.

use super::cells::Cell;
use crate::models::{TokenClass, TokenRole, TokenSpan, TokenStream};

use TokenRole as R;

/// Which nested constructs a column swallows whole
#[derive(Clone, Copy, Debug)]
struct Nested {
    type_blocks: bool,
    param_blocks: bool,
    tuples: bool,
}

impl Nested {
    const NONE: Nested = Nested { type_blocks: false, param_blocks: false, tuples: false };
    const BLOCKS: Nested = Nested { type_blocks: true, param_blocks: true, tuples: false };
    const BLOCKS_AND_TUPLES: Nested = Nested { type_blocks: true, param_blocks: true, tuples: true };
    const TYPE_BLOCKS: Nested = Nested { type_blocks: true, param_blocks: false, tuples: false };
    const PARAM_BLOCKS: Nested = Nested { type_blocks: false, param_blocks: true, tuples: false };

    fn opens_block(self, role: TokenRole) -> bool {
        (self.type_blocks && role == R::OpeningTypeModifier)
            || (self.param_blocks && role == R::OpeningParamModifier)
    }
}

/// Cursor over one parameter's tokens
struct Walker<'a> {
    tokens: &'a TokenStream,
    pos: usize,
    end: usize,
}

impl<'a> Walker<'a> {
    fn new(tokens: &'a TokenStream, parameter: TokenSpan) -> Self {
        let mut walker = Self {
            tokens,
            pos: parameter.start,
            end: parameter.end,
        };
        while walker.pos < walker.end {
            let token = &walker.tokens.tokens()[walker.pos];
            if token.role == R::Null && token.is_whitespace() {
                walker.pos += 1;
            } else {
                break;
            }
        }
        walker
    }

    fn role(&self) -> Option<TokenRole> {
        (self.pos < self.end).then(|| self.tokens.tokens()[self.pos].role)
    }

    /// Skip an opening modifier and everything up to its matching close
    fn skip_modifier_block(&mut self) {
        let mut depth = 0usize;
        while let Some(role) = self.role() {
            self.pos += 1;
            if role.is_opening_modifier() {
                depth += 1;
            } else if role.is_closing_modifier() {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
        }
    }

    /// Skip a tuple start and everything up to its matching end
    fn skip_tuple(&mut self) {
        let mut depth = 0usize;
        while let Some(role) = self.role() {
            self.pos += 1;
            match role {
                R::StartOfTuple => depth += 1,
                R::EndOfTuple => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    /// Consume tokens while their roles are accepted, then close the cell
    fn take(&mut self, accepts: impl Fn(TokenRole) -> bool, nested: Nested) -> Cell {
        let start = self.pos;
        while let Some(role) = self.role() {
            if nested.opens_block(role) {
                self.skip_modifier_block();
            } else if nested.tuples && role == R::StartOfTuple {
                self.skip_tuple();
            } else if accepts(role) {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.close(start, self.pos)
    }

    /// Everything left in the parameter
    fn rest(&mut self) -> Cell {
        let start = self.pos;
        self.pos = self.end;
        self.close(start, self.end)
    }

    /// Build a cell from a token range, folding trailing whitespace into the
    /// trailing space flag
    fn close(&self, start: usize, end: usize) -> Cell {
        let trimmed = self.tokens.back_past_whitespace(end, start);
        Cell {
            start: self.tokens.offset(start),
            end: self.tokens.offset(trimmed),
            leading_space: false,
            trailing_space: trimmed > start && trimmed < end,
        }
    }
}

/// Writes cells in column order and checks the row ends up full
struct RowWriter<'r> {
    row: &'r mut [Cell],
    filled: usize,
}

impl<'r> RowWriter<'r> {
    fn new(row: &'r mut [Cell]) -> Self {
        Self { row, filled: 0 }
    }

    fn push(&mut self, cell: Cell) {
        self.row[self.filled] = cell;
        self.filled += 1;
    }

    fn filled_mut(&mut self) -> &mut [Cell] {
        &mut self.row[..self.filled]
    }

    fn finish(self) {
        debug_assert_eq!(self.filled, self.row.len(), "parameter row left partially filled");
    }
}

/// Property value and default value columns shared by every style
fn take_value_tail(walker: &mut Walker<'_>, out: &mut RowWriter<'_>) {
    out.push(walker.take(|r| matches!(r, R::PropertyValueSeparator | R::Null), Nested::NONE));
    out.push(walker.take(
        |r| matches!(r, R::PropertyValue | R::ParamSeparator | R::Null),
        Nested::NONE,
    ));
    out.push(walker.take(|r| matches!(r, R::DefaultValueSeparator | R::Null), Nested::NONE));
    out.push(walker.rest());
}

fn is_peelable_symbol(tokens: &TokenStream, index: usize) -> bool {
    let token = &tokens.tokens()[index];
    token.class() == TokenClass::Symbol
        && token.text != "_"
        && !token.role.is_closing_modifier()
        && token.role != R::EndOfTuple
}

/// Move the symbols at the end of the type (`*`, `&`, `[]`) into their own
/// column so names line up after them.
///
/// `floor` is the first token of the parameter and `at` the token where the
/// name begins. Cells already written are truncated at the cut; whitespace
/// that separated the symbols from their neighbors survives as the trailing
/// space of the last non-empty cell before them.
fn peel_symbols(tokens: &TokenStream, written: &mut [Cell], floor: usize, at: usize) -> Cell {
    let symbols_end = tokens.back_past_whitespace(at, floor);
    let gap_after = symbols_end < at;

    let mut symbols_start = symbols_end;
    while symbols_start > floor && is_peelable_symbol(tokens, symbols_start - 1) {
        symbols_start -= 1;
    }

    if symbols_start == symbols_end {
        return Cell::empty_at(tokens.offset(at));
    }

    let cut = tokens.offset(symbols_start);
    let gap_before = symbols_start > floor && tokens.tokens()[symbols_start - 1].is_whitespace();

    for cell in written.iter_mut().rev() {
        if cell.start >= cut {
            *cell = Cell::empty_at(cut);
            continue;
        }
        if cell.is_empty() {
            continue;
        }
        if cell.end > cut {
            let first = tokens.index_at_offset(cell.start);
            let trimmed = tokens.back_past_whitespace(symbols_start, first);
            cell.end = tokens.offset(trimmed);
            cell.trailing_space = trimmed < symbols_start;
        }
        if gap_before || gap_after {
            cell.trailing_space = true;
        }
        break;
    }

    Cell {
        start: cut,
        end: tokens.offset(symbols_end),
        leading_space: false,
        trailing_space: false,
    }
}

/// `modifiers type symbols name :prop =default`
pub fn extract_c(tokens: &TokenStream, parameter: TokenSpan, row: &mut [Cell]) {
    let mut walker = Walker::new(tokens, parameter);
    let mut out = RowWriter::new(row);
    let floor = walker.pos;

    // ModifierQualifier
    out.push(walker.take(
        |r| matches!(r, R::TypeModifier | R::TypeQualifier | R::ParamModifier | R::Null),
        Nested::BLOCKS,
    ));

    // Type
    out.push(walker.take(
        |r| matches!(r, R::Type | R::TypeModifier | R::TypeQualifier | R::ParamModifier | R::Null),
        Nested::BLOCKS_AND_TUPLES,
    ));

    // Symbols
    let symbols = peel_symbols(tokens, out.filled_mut(), floor, walker.pos);
    out.push(symbols);

    // Name
    out.push(walker.take(
        |r| {
            matches!(
                r,
                R::Name | R::KeywordName | R::TypeModifier | R::ParamModifier | R::ParamSeparator | R::Null
            )
        },
        Nested::BLOCKS,
    ));

    take_value_tail(&mut walker, &mut out);
    out.finish();
}

/// `modifiers name : symbols type :prop =default`
///
/// Styles without a name/type separator (SQL-like `name TYPE`) go through the
/// same path; trailing modifiers then belong to the type rather than the name.
pub fn extract_pascal(tokens: &TokenStream, parameter: TokenSpan, row: &mut [Cell]) {
    let mut walker = Walker::new(tokens, parameter);
    let mut out = RowWriter::new(row);

    // ModifierQualifier
    out.push(walker.take(
        |r| matches!(r, R::TypeModifier | R::ParamModifier | R::ParamSeparator | R::Null),
        Nested::BLOCKS,
    ));

    let has_separator = tokens.tokens()[walker.pos..walker.end]
        .iter()
        .any(|t| t.role == R::NameTypeSeparator);

    // Name
    out.push(walker.take(
        |r| match r {
            R::Name | R::KeywordName | R::ParamSeparator | R::Null => true,
            R::TypeModifier | R::ParamModifier => has_separator,
            _ => false,
        },
        Nested::BLOCKS,
    ));

    // TypeNameSeparator
    out.push(walker.take(|r| matches!(r, R::NameTypeSeparator | R::Null), Nested::NONE));

    // Symbols
    let start = walker.pos;
    while walker.pos < walker.end {
        let token = &tokens.tokens()[walker.pos];
        let symbol = token.class() == TokenClass::Symbol
            && token.text != "_"
            && matches!(token.role, R::Null | R::TypeModifier | R::ParamModifier);
        let blank = token.is_whitespace() && token.role == R::Null && walker.pos > start;
        if symbol || blank {
            walker.pos += 1;
        } else {
            break;
        }
    }
    out.push(walker.close(start, walker.pos));

    // Type
    out.push(walker.take(
        |r| {
            matches!(
                r,
                R::Type | R::TypeModifier | R::TypeQualifier | R::ParamModifier | R::ParamSeparator | R::Null
            )
        },
        Nested::BLOCKS_AND_TUPLES,
    ));

    take_value_tail(&mut walker, &mut out);
    out.finish();
}

/// `keywords type signed [dim] name [dim] =default`
pub fn extract_system_verilog(tokens: &TokenStream, parameter: TokenSpan, row: &mut [Cell]) {
    let mut walker = Walker::new(tokens, parameter);
    let mut out = RowWriter::new(row);

    // ParameterKeywords
    out.push(walker.take(|r| matches!(r, R::ParamKeyword | R::InOut | R::Null), Nested::NONE));

    // Type
    out.push(walker.take(
        |r| matches!(r, R::Type | R::TypeModifier | R::TypeQualifier | R::Null),
        Nested::NONE,
    ));

    // Signed
    out.push(walker.take(|r| matches!(r, R::Signed | R::Null), Nested::NONE));

    // TypeDimension
    out.push(walker.take(|r| r == R::Null, Nested::TYPE_BLOCKS));

    // Name
    out.push(walker.take(
        |r| matches!(r, R::Name | R::KeywordName | R::ParamSeparator | R::Null),
        Nested::NONE,
    ));

    // ParameterDimension
    out.push(walker.take(|r| r == R::Null, Nested::PARAM_BLOCKS));

    take_value_tail(&mut walker, &mut out);
    out.finish();
}
