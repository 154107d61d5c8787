//! Spacing normalization
//!
//! Extraction records the spaces the source happened to have. This pass
//! rewrites the leading/trailing flags so separators are spaced the same way
//! in every row, the grid has no ragged outer edges, and doubled spaces
//! between columns collapse. Column widths are recomputed after every batch
//! of changes so each rule sees current widths.

use serde::{Deserialize, Serialize};

use super::cells::{Cell, CellGrid};
use super::columns::ColumnModel;
use super::schema::ColumnSpacing;
use crate::models::{ParameterSection, TokenSpan, TokenStream};

/// One normalization scope: the grids that share a column model
pub struct SpacingScope<'a> {
    tokens: &'a TokenStream,
    grids: Vec<&'a mut CellGrid>,
    columns: &'a mut ColumnModel,
}

impl<'a> SpacingScope<'a> {
    pub fn new(tokens: &'a TokenStream, grids: Vec<&'a mut CellGrid>, columns: &'a mut ColumnModel) -> Self {
        Self { tokens, grids, columns }
    }

    fn recompute(&mut self) {
        let grids = &self.grids;
        self.columns
            .recompute(grids.iter().flat_map(|grid| grid.iter_rows()));
    }

    fn for_each_row(&mut self, mut f: impl FnMut(&mut [Cell])) {
        for grid in self.grids.iter_mut() {
            for parameter in 0..grid.rows() {
                f(grid.row_mut(parameter));
            }
        }
    }

    fn all_rows(&self, mut f: impl FnMut(&[Cell]) -> bool) -> bool {
        self.grids.iter().all(|grid| grid.iter_rows().all(&mut f))
    }

    /// Whether a cell's content starts with a colon that is not `:=` or `::=`
    fn starts_with_bare_colon(&self, start: usize, end: usize) -> bool {
        let first = self.tokens.index_at_offset(start);
        let last = self.tokens.index_at_offset(end);
        self.tokens.first_char_from(first, last) == Some(':')
            && !self.tokens.text_starts_with(first, last, ":=")
            && !self.tokens.text_starts_with(first, last, "::=")
    }

    /// Run the three column passes to completion
    pub fn normalize(&mut self) {
        self.recompute();
        self.apply_column_policies();
        self.collapse_separator_leading_spaces();
        self.collapse_modifier_gaps();
    }

    /// Step 1: force policy spacing, clear the neighbors' facing flags, then
    /// strip the outer edges
    fn apply_column_policies(&mut self) {
        let schema = self.columns.schema();
        let policy_columns: Vec<(usize, ColumnSpacing)> = self
            .columns
            .used_columns()
            .map(|c| (c, schema.spacing_of(c)))
            .filter(|(_, spacing)| *spacing != ColumnSpacing::Normal)
            .collect();

        for (column, spacing) in policy_columns {
            let previous = self.columns.previous_used(column);
            let next = self.columns.next_used(column);

            let mut leading_by_row = Vec::new();
            for grid in self.grids.iter() {
                for row in grid.iter_rows() {
                    let cell = &row[column];
                    let leading = match spacing {
                        ColumnSpacing::SpacedUnlessColon => {
                            !cell.is_empty() && !self.starts_with_bare_colon(cell.start, cell.end)
                        }
                        _ => true,
                    };
                    leading_by_row.push(leading);
                }
            }

            let mut leading = leading_by_row.into_iter();
            self.for_each_row(|row| {
                let forced_leading = leading.next().unwrap_or(true);
                if !row[column].is_empty() {
                    row[column].leading_space = forced_leading;
                    row[column].trailing_space = true;
                }
                if let Some(p) = previous {
                    row[p].trailing_space = false;
                }
                if let Some(n) = next {
                    row[n].leading_space = false;
                }
            });
            log::trace!("column {} ({:?}): applied {:?}", column, schema.kind_of(column), spacing);
        }

        self.clear_outer_edges();
        self.recompute();
    }

    /// First used column has no leading space, last used no trailing space
    fn clear_outer_edges(&mut self) {
        let (Some(first), Some(last)) = (self.columns.first_used(), self.columns.last_used()) else {
            return;
        };
        self.for_each_row(|row| {
            row[first].leading_space = false;
            row[last].trailing_space = false;
        });
    }

    /// Step 2: drop a separator's leading space when the column before it
    /// already leaves a gap in every row
    fn collapse_separator_leading_spaces(&mut self) {
        let schema = self.columns.schema();
        let candidates: Vec<usize> = self
            .columns
            .used_columns()
            .filter(|&c| schema.spacing_of(c) != ColumnSpacing::Normal)
            .collect();

        for column in candidates {
            let Some(previous) = self.columns.previous_used(column) else {
                continue;
            };
            if self.columns.kind_of(previous).is_right_aligned() {
                continue;
            }

            let previous_width = self.columns.width_of(previous);
            let removable = self.all_rows(|row| {
                row[column].is_empty() || row[previous].is_empty() || row[previous].width() < previous_width
            });
            if !removable {
                continue;
            }

            let mut changed = false;
            self.for_each_row(|row| {
                if row[column].leading_space {
                    row[column].leading_space = false;
                    changed = true;
                }
            });
            if changed {
                log::trace!("column {}: leading space collapsed into the gap before it", column);
                self.recompute();
            }
        }
    }

    /// Step 3: drop the space before a modifier column when both columns are
    /// full width wherever both have content
    fn collapse_modifier_gaps(&mut self) {
        let candidates: Vec<usize> = self
            .columns
            .used_columns()
            .filter(|&c| self.columns.kind_of(c).is_modifier_like())
            .collect();

        for column in candidates {
            let Some(previous) = self.columns.previous_used(column) else {
                continue;
            };

            let column_width = self.columns.width_of(column);
            let previous_width = self.columns.width_of(previous);
            let clearable = self.all_rows(|row| {
                row[column].is_empty()
                    || row[previous].is_empty()
                    || (row[previous].width() == previous_width && row[column].width() == column_width)
            });
            if !clearable {
                continue;
            }

            let mut changed = false;
            self.for_each_row(|row| {
                if row[previous].trailing_space {
                    row[previous].trailing_space = false;
                    changed = true;
                }
            });
            if changed {
                log::trace!("column {}: trailing space before modifiers collapsed", previous);
                self.recompute();
            }
        }
    }
}

/// Spacing around a section's parameter list
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionSpacing {
    pub space_before_parameters: bool,
    pub space_after_parameters: bool,
}

impl SectionSpacing {
    pub fn resolve(tokens: &TokenStream, section: &ParameterSection) -> Self {
        Self {
            space_before_parameters: section
                .before
                .map(|span| needs_space_before_parameters(tokens, span))
                .unwrap_or(false),
            space_after_parameters: section
                .after
                .map(|span| needs_space_after_parameters(tokens, span))
                .unwrap_or(false),
        }
    }
}

/// A pre-parameter span needs a space before the first parameter if it ended
/// in whitespace or does not end in a bare `(`, `[` or `<`
pub fn needs_space_before_parameters(tokens: &TokenStream, span: TokenSpan) -> bool {
    if span.is_empty() {
        return false;
    }
    let content_end = tokens.back_past_whitespace(span.end, span.start);
    if content_end < span.end {
        return true;
    }
    !matches!(tokens.tokens()[content_end - 1].last_char(), Some('(' | '[' | '<'))
}

/// A post-parameter span needs a space after the last parameter if it began
/// with whitespace or does not start with a bare `)`, `]` or `>`
pub fn needs_space_after_parameters(tokens: &TokenStream, span: TokenSpan) -> bool {
    if span.is_empty() {
        return false;
    }
    let content_start = tokens.forward_past_whitespace(span.start, span.end);
    if content_start > span.start {
        return true;
    }
    !matches!(tokens.tokens()[content_start].first_char(), Some(')' | ']' | '>'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Highlight, Token, TokenRole};

    fn stream(parts: &[&str]) -> TokenStream {
        TokenStream::new(
            parts
                .iter()
                .map(|p| Token::new(*p, TokenRole::Null, Highlight::Null))
                .collect(),
        )
    }

    #[test]
    fn test_before_parameter_terminators() {
        let s = stream(&["void", " ", "F", "("]);
        assert!(!needs_space_before_parameters(&s, TokenSpan::new(0, 4)));

        let s = stream(&["F", "(", " "]);
        assert!(needs_space_before_parameters(&s, TokenSpan::new(0, 3)));

        let s = stream(&["F", "{"]);
        assert!(needs_space_before_parameters(&s, TokenSpan::new(0, 2)));
    }

    #[test]
    fn test_after_parameter_terminators() {
        let s = stream(&[")", " ", "const"]);
        assert!(!needs_space_after_parameters(&s, TokenSpan::new(0, 3)));

        let s = stream(&[" ", ")"]);
        assert!(needs_space_after_parameters(&s, TokenSpan::new(0, 2)));

        let s = stream(&["*", ")"]);
        assert!(needs_space_after_parameters(&s, TokenSpan::new(0, 2)));
    }
}
