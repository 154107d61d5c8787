//! Column widths across a scope of parameters

use serde::{Deserialize, Serialize};

use super::cells::Cell;
use super::schema::{schema_for, ColumnKind, ColumnSchema};
use crate::models::ParameterStyle;

/// Maximum cell width per column over a set of parameter rows
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ColumnModel {
    style: ParameterStyle,
    widths: Vec<usize>,
}

impl ColumnModel {
    /// An all-unused model for a style
    pub fn new(style: ParameterStyle) -> Self {
        Self {
            style,
            widths: vec![0; schema_for(style).len()],
        }
    }

    /// A model computed from rows
    pub fn from_rows<'c>(style: ParameterStyle, rows: impl IntoIterator<Item = &'c [Cell]>) -> Self {
        let mut model = Self::new(style);
        model.recompute(rows);
        model
    }

    pub fn style(&self) -> ParameterStyle {
        self.style
    }

    pub fn schema(&self) -> &'static ColumnSchema {
        schema_for(self.style)
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Throw away all widths and measure `rows` again
    pub fn recompute<'c>(&mut self, rows: impl IntoIterator<Item = &'c [Cell]>) {
        self.widths.iter_mut().for_each(|w| *w = 0);
        for row in rows {
            debug_assert_eq!(row.len(), self.widths.len(), "row does not match the {:?} schema", self.style);
            for (width, cell) in self.widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
    }

    /// Widen every column to at least the other model's width
    pub fn merge_with(&mut self, other: &ColumnModel) {
        debug_assert_eq!(self.style, other.style, "cannot merge column models of different styles");
        for (width, theirs) in self.widths.iter_mut().zip(&other.widths) {
            *width = (*width).max(*theirs);
        }
    }

    pub fn width_of(&self, column: usize) -> usize {
        self.widths[column]
    }

    pub fn is_used(&self, column: usize) -> bool {
        self.widths[column] > 0
    }

    pub fn kind_of(&self, column: usize) -> ColumnKind {
        self.schema().kind_of(column)
    }

    pub fn index_of(&self, kind: ColumnKind) -> Option<usize> {
        self.schema().index_of(kind)
    }

    pub fn first_used(&self) -> Option<usize> {
        self.widths.iter().position(|&w| w > 0)
    }

    pub fn last_used(&self) -> Option<usize> {
        self.widths.iter().rposition(|&w| w > 0)
    }

    pub fn next_used(&self, column: usize) -> Option<usize> {
        assert!(column < self.widths.len(), "column {} out of range", column);
        (column + 1..self.widths.len()).find(|&c| self.widths[c] > 0)
    }

    pub fn previous_used(&self, column: usize) -> Option<usize> {
        assert!(column < self.widths.len(), "column {} out of range", column);
        (0..column).rev().find(|&c| self.widths[c] > 0)
    }

    pub fn used_count(&self) -> usize {
        self.widths.iter().filter(|&&w| w > 0).count()
    }

    /// Position of a used column among the used columns, 0-based
    pub fn used_index_of(&self, column: usize) -> Option<usize> {
        if !self.is_used(column) {
            return None;
        }
        Some(self.widths[..column].iter().filter(|&&w| w > 0).count())
    }

    /// Used column indexes in order
    pub fn used_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.widths
            .iter()
            .enumerate()
            .filter(|(_, &w)| w > 0)
            .map(|(c, _)| c)
    }
}
