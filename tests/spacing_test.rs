// Spacing normalization and pre/post parameter spacing

use prototype_grid::layout::{
    extract_cells, needs_space_after_parameters, needs_space_before_parameters, schema_for, Cell, CellGrid,
    ColumnKind, ColumnModel, GroupLayout, PrototypeLayoutBuilder, SpacingScope,
};
use prototype_grid::models::{ParameterStyle, Prototype, PrototypeAssembler, TokenRole, TokenSpan, TokenStream};
use prototype_grid::LayoutConfig;

use TokenRole as R;

fn normalized(prototype: &Prototype) -> (CellGrid, ColumnModel) {
    let section = prototype.sections[0].as_parameters().unwrap();
    let mut grid = extract_cells(&prototype.tokens, section);
    let mut model = ColumnModel::new(section.style);
    SpacingScope::new(&prototype.tokens, vec![&mut grid], &mut model).normalize();
    (grid, model)
}

fn column(style: ParameterStyle, kind: ColumnKind) -> usize {
    schema_for(style).index_of(kind).unwrap()
}

/// `(int x <separator> 5)` with a C property value separator
fn make_property(separator: &[&str]) -> Prototype {
    let mut asm = PrototypeAssembler::new();
    asm.begin_parameters(ParameterStyle::C)
        .push("(", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("x", R::Name)
        .push(" ", R::Null);
    for piece in separator {
        asm.push(piece, R::PropertyValueSeparator);
    }
    asm.push(" ", R::Null)
        .push("5", R::PropertyValue)
        .end_parameters()
        .push(")", R::Null);
    asm.finish()
}

fn stream(parts: &[&str]) -> TokenStream {
    let mut asm = PrototypeAssembler::new();
    asm.begin_plain();
    for part in parts {
        asm.push(part, R::Null);
    }
    asm.finish().tokens
}

#[test]
fn test_colon_equals_keeps_leading_space() {
    let separator = column(ParameterStyle::C, ColumnKind::PropertyValueSeparator);

    for pieces in [&[":", "="][..], &[":", ":", "="][..]] {
        let (grid, _) = normalized(&make_property(pieces));
        let cell = grid.get(0, separator);
        assert!(cell.leading_space, "{:?} keeps its leading space", pieces);
        assert!(cell.trailing_space);
    }

    let (grid, _) = normalized(&make_property(&[":"]));
    let cell = grid.get(0, separator);
    assert!(!cell.leading_space, "a bare colon hugs the name");
    assert!(cell.trailing_space);
}

#[test]
fn test_policy_clears_facing_neighbors() {
    let (grid, _) = normalized(&make_property(&[":", "="]));
    let name = column(ParameterStyle::C, ColumnKind::Name);
    let value = column(ParameterStyle::C, ColumnKind::PropertyValue);
    assert!(!grid.get(0, name).trailing_space);
    assert!(!grid.get(0, value).leading_space);
}

#[test]
fn test_separator_collapses_into_existing_gap() {
    // (int longname, int x = 5)
    let mut asm = PrototypeAssembler::new();
    asm.begin_parameters(ParameterStyle::C)
        .push("(", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("longname", R::Name)
        .push(",", R::ParamSeparator)
        .push(" ", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("x", R::Name)
        .push(" ", R::Null)
        .push("=", R::DefaultValueSeparator)
        .push(" ", R::Null)
        .push("5", R::DefaultValue)
        .end_parameters()
        .push(")", R::Null);
    let prototype = asm.finish();
    let (grid, model) = normalized(&prototype);

    let separator = column(ParameterStyle::C, ColumnKind::DefaultValueSeparator);
    let default = column(ParameterStyle::C, ColumnKind::DefaultValue);
    let equals = grid.get(1, separator);
    assert!(!equals.leading_space, "short name already leaves a gap before `=`");
    assert!(equals.trailing_space);
    assert!(!grid.get(1, default).leading_space);
    assert_eq!(model.width_of(separator), 2);
}

#[test]
fn test_edge_invariant_after_build() {
    let mut asm = PrototypeAssembler::new();
    asm.begin_parameters(ParameterStyle::Pascal)
        .push("function F(", R::Null)
        .begin_parameter()
        .push("var", R::ParamModifier)
        .push(" ", R::Null)
        .push("a", R::Name)
        .push(":", R::NameTypeSeparator)
        .push(" ", R::Null)
        .push("Integer", R::Type)
        .push(";", R::ParamSeparator)
        .push(" ", R::Null)
        .begin_parameter()
        .push("b", R::Name)
        .push(":", R::NameTypeSeparator)
        .push(" ", R::Null)
        .push("string", R::Type)
        .push(" ", R::Null)
        .push("=", R::DefaultValueSeparator)
        .push(" ", R::Null)
        .push("'x'", R::DefaultValue)
        .push(" ", R::Null)
        .end_parameters()
        .push("): Boolean", R::Null);
    let prototype = asm.finish();

    let layout = PrototypeLayoutBuilder::new(LayoutConfig::default()).build(&prototype);
    let mut checked = 0;
    for group in &layout.groups {
        let GroupLayout::Parameters(group) = group else { continue };
        for grid in &group.grids {
            let first = grid.columns.first_used().unwrap();
            let last = grid.columns.last_used().unwrap();
            for section in &group.sections[grid.section_range()] {
                for row in section.cells.iter_rows() {
                    assert!(!row[first].leading_space, "first used column has a leading space");
                    assert!(!row[last].trailing_space, "last used column has a trailing space");
                    checked += 1;
                }
            }
        }
    }
    assert_eq!(checked, 2);
}

#[test]
fn test_normalize_reaches_a_fixed_point() {
    let prototype = make_property(&[":", "="]);
    let (mut grid, mut model) = normalized(&prototype);
    let cells: Vec<Cell> = grid.iter_rows().flatten().copied().collect();
    let widths = model.widths().to_vec();

    SpacingScope::new(&prototype.tokens, vec![&mut grid], &mut model).normalize();
    let again: Vec<Cell> = grid.iter_rows().flatten().copied().collect();
    assert_eq!(again, cells);
    assert_eq!(model.widths(), widths.as_slice());
}

#[test]
fn test_scenario_d_space_before_parameters() {
    let s = stream(&["F", "("]);
    assert!(!needs_space_before_parameters(&s, TokenSpan::new(0, s.len())));

    let s = stream(&["F", "(", "*"]);
    assert!(needs_space_before_parameters(&s, TokenSpan::new(0, s.len())));

    let s = stream(&["template", "<"]);
    assert!(!needs_space_before_parameters(&s, TokenSpan::new(0, s.len())));
}

#[test]
fn test_space_after_parameters() {
    let s = stream(&[")", " ", "const"]);
    assert!(!needs_space_after_parameters(&s, TokenSpan::new(0, s.len())));

    let s = stream(&[" ", "]"]);
    assert!(needs_space_after_parameters(&s, TokenSpan::new(0, s.len())));

    let s = stream(&["}"]);
    assert!(needs_space_after_parameters(&s, TokenSpan::new(0, s.len())));
}

#[test]
fn test_word_separator_collapses_like_punctuation() {
    // (a AS INTEGER, longname TEXT)
    let mut asm = PrototypeAssembler::new();
    asm.begin_parameters(ParameterStyle::Pascal)
        .push("(", R::Null)
        .begin_parameter()
        .push("a", R::Name)
        .push(" ", R::Null)
        .push("AS", R::NameTypeSeparator)
        .push(" ", R::Null)
        .push("INTEGER", R::Type)
        .push(",", R::ParamSeparator)
        .push(" ", R::Null)
        .begin_parameter()
        .push("longname", R::Name)
        .push(" ", R::Null)
        .push("TEXT", R::Type)
        .end_parameters()
        .push(")", R::Null);
    let (grid, model) = normalized(&asm.finish());

    let separator = column(ParameterStyle::Pascal, ColumnKind::TypeNameSeparator);
    let name = column(ParameterStyle::Pascal, ColumnKind::Name);
    let as_cell = grid.get(0, separator);
    assert!(!as_cell.leading_space, "the short name already leaves a gap before AS");
    assert!(as_cell.trailing_space);
    assert_eq!(model.width_of(separator), 3);
    assert_eq!(model.width_of(name), 8);
}
