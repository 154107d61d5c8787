//! Layout builder - runs extraction, grouping, spacing and placement
//!
//! One builder lays out one prototype at a time. It keeps scratch vectors
//! between calls to avoid reallocating, but clears them on every call, so
//! nothing from a previous prototype can leak into the next.

use super::cells::{Cell, CellGrid};
use super::columns::ColumnModel;
use super::display_list::{GridLayout, GroupLayout, ParameterGroupLayout, PrototypeLayout, SectionLayout};
use super::grouping::{group_sections, GroupMode, SectionGroup, SectionSummary};
use super::placement::{fits_narrow_indent, place_independent, place_sections, place_sub_grid, SectionShape};
use super::schema::{schema_for, ColumnKind};
use super::spacing::{SectionSpacing, SpacingScope};
use crate::config::LayoutConfig;
use crate::models::{ParameterSection, Prototype, Section, TokenStream};

/// Main builder turning annotated prototypes into layouts
#[derive(Debug, Default)]
pub struct PrototypeLayoutBuilder {
    config: LayoutConfig,

    /// Extracted cells per section, `None` for plain sections
    grids: Vec<Option<CellGrid>>,

    summaries: Vec<SectionSummary>,
}

impl PrototypeLayoutBuilder {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            grids: Vec::new(),
            summaries: Vec::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out a prototype
    ///
    /// The prototype is trusted to be well formed; run
    /// [`Prototype::validate`] first on input from outside the crate.
    pub fn build(&mut self, prototype: &Prototype) -> PrototypeLayout {
        self.grids.clear();
        self.summaries.clear();

        let tokens = &prototype.tokens;
        for section in &prototype.sections {
            let grid = match section {
                Section::Plain { .. } => None,
                Section::Parameters(params) => Some(extract_cells(tokens, params)),
            };
            let first_name = grid.as_ref().and_then(|grid| first_name_cell(grid, section));
            self.summaries
                .push(SectionSummary::new(tokens, section, first_name));
            self.grids.push(grid);
        }

        let groups = group_sections(&self.summaries, &self.config);
        let mut layout = PrototypeLayout::default();

        for group in groups {
            log::debug!(
                "sections {}..{} grouped as {:?}",
                group.start,
                group.start + group.count,
                group.mode
            );
            match group.mode {
                GroupMode::Plain => layout.groups.push(GroupLayout::Plain {
                    sections: group.sections().collect(),
                }),
                GroupMode::SharedColumns | GroupMode::Independent => {
                    if let Some(group_layout) = self.layout_parameter_group(prototype, group) {
                        layout.has_parameters = true;
                        layout.groups.push(GroupLayout::Parameters(group_layout));
                    }
                }
            }
        }

        layout
    }

    fn layout_parameter_group(&mut self, prototype: &Prototype, group: SectionGroup) -> Option<ParameterGroupLayout> {
        let tokens = &prototype.tokens;

        let mut sections: Vec<SectionLayout> = Vec::with_capacity(group.count);
        let mut shapes: Vec<SectionShape> = Vec::with_capacity(group.count);
        for index in group.sections() {
            let (Some(params), Some(cells)) = (prototype.sections[index].as_parameters(), self.grids[index].take())
            else {
                continue;
            };
            let columns = ColumnModel::from_rows(params.style, cells.iter_rows());
            sections.push(SectionLayout {
                section: index,
                style: params.style,
                cells,
                columns,
                spacing: SectionSpacing::resolve(tokens, params),
                last_cell_ends_with_space: false,
            });
            shapes.push(SectionShape::new(tokens, params));
        }

        let style = sections.first()?.style;
        let mut grids = Vec::new();
        let mut outer = None;

        match group.mode {
            GroupMode::SharedColumns => {
                let mut merged = ColumnModel::new(style);
                for section in &sections {
                    merged.merge_with(&section.columns);
                }
                SpacingScope::new(tokens, sections.iter_mut().map(|s| &mut s.cells).collect(), &mut merged)
                    .normalize();

                for section in sections.iter_mut() {
                    section.columns.recompute(section.cells.iter_rows());
                    section.last_cell_ends_with_space = last_cell_ends_with_space(&section.cells, &merged);
                }

                let narrow_indent = fits_narrow_indent(&shapes, &self.config);
                grids.push(GridLayout {
                    first_section: 0,
                    section_count: sections.len(),
                    placement: place_sections(&shapes, &merged, narrow_indent),
                    columns: merged,
                });
            }
            GroupMode::Independent | GroupMode::Plain => {
                let narrow_indent = fits_narrow_indent(&shapes, &self.config);
                for (i, section) in sections.iter_mut().enumerate() {
                    let SectionLayout { cells, columns, .. } = section;
                    SpacingScope::new(tokens, vec![cells], columns).normalize();
                    section.last_cell_ends_with_space = last_cell_ends_with_space(&section.cells, &section.columns);

                    grids.push(GridLayout {
                        first_section: i,
                        section_count: 1,
                        placement: place_sub_grid(shapes[i], &section.columns, narrow_indent),
                        columns: section.columns.clone(),
                    });
                }
                outer = Some(place_independent(&shapes, narrow_indent));
            }
        }

        Some(ParameterGroupLayout {
            mode: group.mode,
            style,
            sections,
            grids,
            outer,
        })
    }
}

/// Cut every parameter of a section into cells
pub fn extract_cells(tokens: &TokenStream, section: &ParameterSection) -> CellGrid {
    let schema = schema_for(section.style);
    let mut grid = CellGrid::new(section.parameters.len(), schema.len());
    for (i, parameter) in section.parameters.iter().enumerate() {
        schema.extract(tokens, *parameter, grid.row_mut(i));
    }
    grid
}

fn first_name_cell<'g>(grid: &'g CellGrid, section: &Section) -> Option<&'g Cell> {
    let params = section.as_parameters()?;
    if grid.rows() == 0 {
        return None;
    }
    let name = schema_for(params.style).index_of(ColumnKind::Name)?;
    Some(grid.get(0, name))
}

fn last_cell_ends_with_space(cells: &CellGrid, columns: &ColumnModel) -> bool {
    let (Some(last_row), Some(last_column)) = (cells.rows().checked_sub(1), columns.last_used()) else {
        return false;
    };
    cells.get(last_row, last_column).width() < columns.width_of(last_column)
}
