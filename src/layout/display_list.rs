//! Layout result
//!
//! The abstract result of laying out one prototype: which sections render as
//! text, and for parameter groups the cells, column widths, spacing and grid
//! areas the renderer needs. It carries no markup and serializes as-is for
//! JavaScript consumers that build their own DOM.

use serde::{Deserialize, Serialize};

use super::cells::CellGrid;
use super::columns::ColumnModel;
use super::grouping::GroupMode;
use super::placement::GridPlacement;
use super::spacing::SectionSpacing;
use crate::models::ParameterStyle;

/// Complete layout of a prototype
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrototypeLayout {
    pub groups: Vec<GroupLayout>,

    /// True when any group is laid out as a parameter grid
    pub has_parameters: bool,
}

/// One rendering unit
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupLayout {
    /// Sections rendered as plain text, in order
    Plain { sections: Vec<usize> },

    Parameters(ParameterGroupLayout),
}

/// Sections laid out together as a parameter grid
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ParameterGroupLayout {
    pub mode: GroupMode,

    /// Style of the first section; independent sections carry their own
    pub style: ParameterStyle,

    pub sections: Vec<SectionLayout>,

    /// One grid for shared columns, one per section when independent
    pub grids: Vec<GridLayout>,

    /// Grid holding the pre spans and sub-grids of an independent group
    pub outer: Option<GridPlacement>,
}

/// Cells and spacing of one parameter section
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SectionLayout {
    /// Index into the prototype's sections
    pub section: usize,

    pub style: ParameterStyle,

    pub cells: CellGrid,

    /// Widths over this section alone
    pub columns: ColumnModel,

    pub spacing: SectionSpacing,

    /// The last parameter's final cell is narrower than its column, so the
    /// grid already leaves a space after it
    pub last_cell_ends_with_space: bool,
}

/// One CSS grid: the sections it holds, their shared widths, and placements
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    /// First section of the grid, as an index into the group's sections
    pub first_section: usize,
    pub section_count: usize,

    pub columns: ColumnModel,

    pub placement: GridPlacement,
}

impl GridLayout {
    pub fn section_range(&self) -> std::ops::Range<usize> {
        self.first_section..self.first_section + self.section_count
    }
}
