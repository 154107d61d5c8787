//! Prototype layout
//!
//! Turns annotated prototypes into grid layouts:
//!
//! - [`schema`]: column order and spacing policy per parameter style
//! - [`extract`]: cutting each parameter into one cell per column
//! - [`columns`]: column widths over a set of parameters
//! - [`grouping`]: which adjacent sections share a grid
//! - [`spacing`]: normalizing the space flags on cells
//! - [`placement`]: wide and narrow grid areas for every element
//! - [`builder`]: the driver running all of the above

pub mod builder;
pub mod cells;
pub mod columns;
pub mod display_list;
pub mod extract;
pub mod grouping;
pub mod placement;
pub mod schema;
pub mod spacing;

pub use builder::{extract_cells, PrototypeLayoutBuilder};
pub use cells::{Cell, CellGrid};
pub use columns::ColumnModel;
pub use display_list::{GridLayout, GroupLayout, ParameterGroupLayout, PrototypeLayout, SectionLayout};
pub use grouping::{group_at, group_sections, GroupMode, NameClass, ParameterSummary, SectionGroup, SectionSummary};
pub use placement::{
    fits_narrow_indent, place_independent, place_sections, place_sub_grid, ElementKind, Form, GridArea, GridPlacement,
    PlacedElement, SectionShape,
};
pub use schema::{schema_for, ColumnKind, ColumnSchema, ColumnSpacing};
pub use spacing::{needs_space_after_parameters, needs_space_before_parameters, SectionSpacing, SpacingScope};
