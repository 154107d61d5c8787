//! Grid placement
//!
//! Every visual element of a parameter group gets a CSS grid area in two
//! forms from the same pass: the wide form keeps the text before the
//! parameters in its own column to the left, while the narrow form stacks it
//! above them or tucks it into an indent column. Slots that no element covers
//! are filled with filler elements belonging to one form only, so each form's
//! areas tile its grid exactly.
//!
//! Independent sections get their own sub-grids, nested in an outer grid
//! whose first track lines up their pre spans.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::columns::ColumnModel;
use crate::config::LayoutConfig;
use crate::models::{ParameterSection, TokenStream};

/// A grid area, 1-based and end-exclusive
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridArea {
    pub row_start: usize,
    pub col_start: usize,
    pub row_end: usize,
    pub col_end: usize,
}

impl GridArea {
    pub fn new(row_start: usize, col_start: usize, row_end: usize, col_end: usize) -> Self {
        debug_assert!(row_start < row_end && col_start < col_end, "degenerate grid area");
        Self {
            row_start,
            col_start,
            row_end,
            col_end,
        }
    }

    /// Single grid slot
    pub fn slot(row: usize, col: usize) -> Self {
        Self::new(row, col, row + 1, col + 1)
    }
}

impl fmt::Display for GridArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.row_start, self.col_start, self.row_end, self.col_end)
    }
}

/// Which of the two forms an area belongs to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Form {
    Wide,
    Narrow,
}

/// What a placed element shows
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ElementKind {
    BeforeParameters,
    Cell { parameter: usize, column: usize },
    AfterParameters,
    Filler,
    /// A nested grid holding one independent section
    SubGrid,
}

/// One element of a grid with its area in each form
///
/// Content elements have both areas; fillers have exactly one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlacedElement {
    /// Section index within the grid
    pub section: usize,
    pub kind: ElementKind,
    pub wide: Option<GridArea>,
    pub narrow: Option<GridArea>,
}

/// All element areas of one grid plus its declared size in each form
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GridPlacement {
    pub wide_rows: usize,
    pub wide_columns: usize,
    pub narrow_rows: usize,
    pub narrow_columns: usize,
    pub elements: Vec<PlacedElement>,
}

impl GridPlacement {
    pub fn size(&self, form: Form) -> (usize, usize) {
        match form {
            Form::Wide => (self.wide_rows, self.wide_columns),
            Form::Narrow => (self.narrow_rows, self.narrow_columns),
        }
    }

    pub fn area(element: &PlacedElement, form: Form) -> Option<GridArea> {
        match form {
            Form::Wide => element.wide,
            Form::Narrow => element.narrow,
        }
    }

    /// Whether the areas of one form cover every slot exactly once and stay
    /// inside the declared size
    pub fn tiles(&self, form: Form) -> bool {
        let (rows, columns) = self.size(form);
        let mut covered = vec![0u32; rows * columns];
        for area in self.elements.iter().filter_map(|e| Self::area(e, form)) {
            if area.row_start < 1 || area.col_start < 1 || area.row_end > rows + 1 || area.col_end > columns + 1 {
                return false;
            }
            for row in area.row_start..area.row_end {
                for col in area.col_start..area.col_end {
                    covered[(row - 1) * columns + (col - 1)] += 1;
                }
            }
        }
        covered.iter().all(|&n| n == 1)
    }

    pub fn tiles_exactly(&self) -> bool {
        self.tiles(Form::Wide) && self.tiles(Form::Narrow)
    }

    /// Cover every slot left open in one form with single-row fillers
    fn fill_gaps(&mut self, form: Form) {
        let (rows, columns) = self.size(form);
        let mut open = vec![true; rows * columns];
        // Section owning each row, so fillers report where they sit.
        let mut row_section = vec![0usize; rows];

        for element in &self.elements {
            if let Some(area) = Self::area(element, form) {
                for row in area.row_start..area.row_end {
                    row_section[row - 1] = element.section;
                    for col in area.col_start..area.col_end {
                        let slot = &mut open[(row - 1) * columns + (col - 1)];
                        debug_assert!(*slot, "{:?} areas overlap at {}/{}", form, row, col);
                        *slot = false;
                    }
                }
            }
        }

        for row in 1..=rows {
            let mut col = 1;
            while col <= columns {
                if !open[(row - 1) * columns + (col - 1)] {
                    col += 1;
                    continue;
                }
                let start = col;
                while col <= columns && open[(row - 1) * columns + (col - 1)] {
                    col += 1;
                }
                let area = GridArea::new(row, start, row + 1, col);
                let (wide, narrow) = match form {
                    Form::Wide => (Some(area), None),
                    Form::Narrow => (None, Some(area)),
                };
                self.elements.push(PlacedElement {
                    section: row_section[row - 1],
                    kind: ElementKind::Filler,
                    wide,
                    narrow,
                });
            }
        }
    }
}

/// Size of one section as far as placement cares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionShape {
    pub parameter_count: usize,
    pub before_len: Option<usize>,
    pub after_len: Option<usize>,
}

impl SectionShape {
    pub fn new(tokens: &TokenStream, section: &ParameterSection) -> Self {
        Self {
            parameter_count: section.parameters.len(),
            before_len: section.before.map(|span| tokens.span_char_len(span)),
            after_len: section.after.map(|span| tokens.span_char_len(span)),
        }
    }

    /// The same section with its pre span moved out to an enclosing grid
    pub fn without_before(self) -> Self {
        Self {
            before_len: None,
            ..self
        }
    }

    fn is_blank(&self) -> bool {
        self.parameter_count == 0 && self.before_len.is_none() && self.after_len.is_none()
    }

    /// Rows taken in the wide and indented narrow forms
    fn wide_rows(&self) -> usize {
        if self.is_blank() {
            0
        } else {
            self.parameter_count.max(1)
        }
    }

    /// Rows taken in the stacked narrow form
    fn stacked_rows(&self) -> usize {
        usize::from(self.before_len.is_some()) + self.parameter_count + usize::from(self.after_len.is_some())
    }

    fn fits_indent(&self, config: &LayoutConfig) -> bool {
        self.before_len.unwrap_or(0) <= config.narrow_indent_max_before_len
            && self.after_len.unwrap_or(0) <= config.narrow_indent_max_after_len
    }
}

/// Whether every section of a grid is short enough for the indented narrow form
pub fn fits_narrow_indent(shapes: &[SectionShape], config: &LayoutConfig) -> bool {
    shapes.iter().all(|s| s.fits_indent(config))
}

/// Place the sections of one grid that share `columns`
pub fn place_sections(shapes: &[SectionShape], columns: &ColumnModel, narrow_indent: bool) -> GridPlacement {
    place_grid(shapes, columns, narrow_indent, true)
}

/// Place the parameter cells and post span of one independent section
///
/// The pre span sits in the enclosing grid from [`place_independent`], so the
/// sub-grid has no track for it. `narrow_indent` is decided for the whole
/// group.
pub fn place_sub_grid(shape: SectionShape, columns: &ColumnModel, narrow_indent: bool) -> GridPlacement {
    place_grid(&[shape.without_before()], columns, narrow_indent, false)
}

/// Place the outer grid of an independent group
///
/// In the wide form every pre span sits in track 1 so they share one
/// alignment point, with the section's sub-grid in track 2 on the same row.
/// The narrow form keeps both tracks when the group fits the indent limits;
/// otherwise it is one track with each pre span on its own row above its
/// sub-grid.
pub fn place_independent(shapes: &[SectionShape], narrow_indent: bool) -> GridPlacement {
    let count = shapes.len();
    let with_before = shapes.iter().filter(|s| s.before_len.is_some()).count();

    let mut placement = GridPlacement {
        wide_rows: count,
        wide_columns: 2,
        narrow_rows: if narrow_indent { count } else { count + with_before },
        narrow_columns: if narrow_indent { 2 } else { 1 },
        elements: Vec::new(),
    };

    let mut narrow_row = 1;
    for (section, shape) in shapes.iter().enumerate() {
        let row = section + 1;
        let (before_narrow, sub_grid_narrow) = if narrow_indent {
            (GridArea::slot(row, 1), GridArea::slot(row, 2))
        } else {
            let before = GridArea::slot(narrow_row, 1);
            narrow_row += usize::from(shape.before_len.is_some());
            let sub_grid = GridArea::slot(narrow_row, 1);
            narrow_row += 1;
            (before, sub_grid)
        };

        if shape.before_len.is_some() {
            placement.elements.push(PlacedElement {
                section,
                kind: ElementKind::BeforeParameters,
                wide: Some(GridArea::slot(row, 1)),
                narrow: Some(before_narrow),
            });
        }
        placement.elements.push(PlacedElement {
            section,
            kind: ElementKind::SubGrid,
            wide: Some(GridArea::slot(row, 2)),
            narrow: Some(sub_grid_narrow),
        });
    }

    placement.fill_gaps(Form::Wide);
    placement.fill_gaps(Form::Narrow);
    debug_assert!(placement.tiles_exactly(), "independent grid left gaps or overlaps");
    placement
}

fn place_grid(shapes: &[SectionShape], columns: &ColumnModel, narrow_indent: bool, before_track: bool) -> GridPlacement {
    let used = columns.used_count();
    let used_columns: Vec<usize> = columns.used_columns().collect();
    // Tracks ahead of the first parameter column
    let lead = usize::from(before_track);

    let mut placement = GridPlacement {
        wide_rows: shapes.iter().map(SectionShape::wide_rows).sum(),
        wide_columns: used + 1 + lead,
        narrow_rows: if narrow_indent {
            shapes.iter().map(SectionShape::wide_rows).sum()
        } else {
            shapes.iter().map(SectionShape::stacked_rows).sum()
        },
        narrow_columns: if narrow_indent { used + 1 + lead } else { used + 1 },
        elements: Vec::new(),
    };

    let mut wide_row = 1;
    let mut narrow_row = 1;

    for (section, shape) in shapes.iter().enumerate() {
        let rows = shape.wide_rows();
        let params = shape.parameter_count;

        // Narrow row of the first parameter
        let narrow_params = if narrow_indent {
            narrow_row
        } else {
            narrow_row + usize::from(shape.before_len.is_some())
        };
        let narrow_cell_offset = if narrow_indent { 1 + lead } else { 1 };

        if shape.before_len.is_some() {
            let narrow = if narrow_indent {
                GridArea::new(narrow_row, 1, narrow_row + 1, 2)
            } else {
                GridArea::new(narrow_row, 1, narrow_row + 1, used + 2)
            };
            placement.elements.push(PlacedElement {
                section,
                kind: ElementKind::BeforeParameters,
                wide: Some(GridArea::new(wide_row, 1, wide_row + rows, 2)),
                narrow: Some(narrow),
            });
        }

        for parameter in 0..params {
            for (used_index, &column) in used_columns.iter().enumerate() {
                placement.elements.push(PlacedElement {
                    section,
                    kind: ElementKind::Cell { parameter, column },
                    wide: Some(GridArea::slot(wide_row + parameter, used_index + 1 + lead)),
                    narrow: Some(GridArea::slot(narrow_params + parameter, used_index + narrow_cell_offset)),
                });
            }
        }

        if shape.after_len.is_some() {
            let last = used + 1 + lead;
            let narrow = if narrow_indent {
                GridArea::new(narrow_row + rows - 1, last, narrow_row + rows, last + 1)
            } else {
                let row = narrow_params + params;
                GridArea::new(row, 1, row + 1, used + 2)
            };
            placement.elements.push(PlacedElement {
                section,
                kind: ElementKind::AfterParameters,
                wide: Some(GridArea::new(wide_row + rows - 1, last, wide_row + rows, last + 1)),
                narrow: Some(narrow),
            });
        }

        wide_row += rows;
        narrow_row += if narrow_indent { rows } else { shape.stacked_rows() };
    }

    placement.fill_gaps(Form::Wide);
    placement.fill_gaps(Form::Narrow);
    debug_assert!(placement.tiles_exactly(), "grid placement left gaps or overlaps");
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_area_format() {
        assert_eq!(GridArea::new(1, 2, 3, 4).to_string(), "1/2/3/4");
    }

    fn shape(parameter_count: usize, before_len: Option<usize>) -> SectionShape {
        SectionShape {
            parameter_count,
            before_len,
            after_len: Some(1),
        }
    }

    #[test]
    fn test_independent_outer_grid() {
        let shapes = [shape(1, Some(7)), shape(2, None), shape(1, Some(1))];

        let stacked = place_independent(&shapes, false);
        assert!(stacked.tiles_exactly());
        assert_eq!(stacked.size(Form::Wide), (3, 2));
        assert_eq!(stacked.size(Form::Narrow), (5, 1));
        assert_eq!(stacked.elements[4].kind, ElementKind::SubGrid);
        assert_eq!(stacked.elements[4].narrow, Some(GridArea::slot(5, 1)));

        let indented = place_independent(&shapes, true);
        assert!(indented.tiles_exactly());
        assert_eq!(indented.size(Form::Narrow), (3, 2));
        let fillers = indented.elements.iter().filter(|e| e.kind == ElementKind::Filler).count();
        assert_eq!(fillers, 2, "missing pre span leaves one slot per form");
    }

    #[test]
    fn test_sub_grid_has_no_before_track() {
        let columns = ColumnModel::new(crate::models::ParameterStyle::C);
        let placement = place_sub_grid(shape(0, Some(3)), &columns, true);
        assert_eq!(placement.size(Form::Wide), (1, 1));
        assert_eq!(placement.size(Form::Narrow), (1, 1));
        assert_eq!(placement.elements.len(), 1);
        assert_eq!(placement.elements[0].kind, ElementKind::AfterParameters);
    }
}
