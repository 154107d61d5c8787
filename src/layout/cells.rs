//! Cells and per-section cell grids

use serde::{Deserialize, Serialize};

use crate::models::TokenStream;

/// A parameter's content for one column, in character offsets
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub start: usize,
    pub end: usize,
    pub leading_space: bool,
    pub trailing_space: bool,
}

impl Cell {
    /// An empty cell anchored at `offset`
    pub fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            leading_space: false,
            trailing_space: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn content_width(&self) -> usize {
        self.end - self.start
    }

    /// Content width plus one for each space flag
    pub fn width(&self) -> usize {
        self.content_width() + usize::from(self.leading_space) + usize::from(self.trailing_space)
    }

    /// Token indexes covered by the cell's content
    pub fn token_range(&self, tokens: &TokenStream) -> std::ops::Range<usize> {
        tokens.index_at_offset(self.start)..tokens.index_at_offset(self.end)
    }
}

/// Cells of every parameter in one section, row-major
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CellGrid {
    columns: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            columns,
            cells: vec![Cell::default(); rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.cells.len() / self.columns
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row(&self, parameter: usize) -> &[Cell] {
        &self.cells[parameter * self.columns..(parameter + 1) * self.columns]
    }

    pub fn row_mut(&mut self, parameter: usize) -> &mut [Cell] {
        let columns = self.columns;
        &mut self.cells[parameter * columns..(parameter + 1) * columns]
    }

    pub fn get(&self, parameter: usize, column: usize) -> &Cell {
        assert!(column < self.columns, "column {} out of range", column);
        &self.cells[parameter * self.columns + column]
    }

    pub fn get_mut(&mut self, parameter: usize, column: usize) -> &mut Cell {
        assert!(column < self.columns, "column {} out of range", column);
        &mut self.cells[parameter * self.columns + column]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_counts_space_flags() {
        let cell = Cell {
            start: 4,
            end: 7,
            leading_space: true,
            trailing_space: true,
        };
        assert_eq!(cell.width(), 5);
        assert!(Cell::empty_at(3).is_empty());
        assert_eq!(Cell::empty_at(3).width(), 0);
    }

    #[test]
    fn test_grid_rows() {
        let mut grid = CellGrid::new(2, 3);
        grid.get_mut(1, 2).end = 4;
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.row(1)[2].end, 4);
        assert_eq!(grid.iter_rows().count(), 2);
    }
}
