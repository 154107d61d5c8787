//! Column schemas
//!
//! Each parameter style has a fixed, total ordering of column kinds, a
//! spacing policy per kind, and the routine that cuts a parameter into cells
//! for those columns. Extraction and rendering both index columns by their
//! position in this order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cells::Cell;
use super::extract;
use crate::models::{ParameterStyle, TokenSpan, TokenStream};

/// Kind of content held by a column
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    ModifierQualifier,
    Type,
    TypeNameSeparator,
    Symbols,
    Name,
    DefaultValueSeparator,
    DefaultValue,
    PropertyValueSeparator,
    PropertyValue,
    ParameterKeywords,
    Signed,
    TypeDimension,
    ParameterDimension,
}

impl ColumnKind {
    /// CSS class of cells in this column
    pub fn css_class(self) -> &'static str {
        match self {
            ColumnKind::ModifierQualifier => "PModifierQualifier",
            ColumnKind::Type => "PType",
            ColumnKind::TypeNameSeparator => "PTypeNameSeparator",
            ColumnKind::Symbols => "PSymbols",
            ColumnKind::Name => "PName",
            ColumnKind::DefaultValueSeparator => "PDefaultValueSeparator",
            ColumnKind::DefaultValue => "PDefaultValue",
            ColumnKind::PropertyValueSeparator => "PPropertyValueSeparator",
            ColumnKind::PropertyValue => "PPropertyValue",
            ColumnKind::ParameterKeywords => "PParameterKeywords",
            ColumnKind::Signed => "PSigned",
            ColumnKind::TypeDimension => "PTypeDimension",
            ColumnKind::ParameterDimension => "PParameterDimension",
        }
    }

    /// Columns holding modifiers and qualifiers that lead a parameter
    pub fn is_modifier_like(self) -> bool {
        matches!(self, ColumnKind::ModifierQualifier | ColumnKind::ParameterKeywords)
    }

    /// Columns whose content hugs the column that follows them
    pub fn is_right_aligned(self) -> bool {
        self == ColumnKind::Symbols
    }
}

/// How the normalizer treats the space around a column's cells
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnSpacing {
    /// Keep whatever the source had
    Normal,

    /// Always a space on both sides
    AlwaysLeadingAndTrailing,

    /// Both sides, except no leading space before a bare `:`
    SpacedUnlessColon,
}

/// Cuts one parameter into cells, one per schema column
pub type CellExtractor = fn(&TokenStream, TokenSpan, &mut [Cell]);

/// Column layout of one parameter style
pub struct ColumnSchema {
    pub style: ParameterStyle,
    pub columns: &'static [ColumnKind],
    spacing: &'static [(ColumnKind, ColumnSpacing)],
    extractor: CellExtractor,
}

impl ColumnSchema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn kind_of(&self, column: usize) -> ColumnKind {
        self.columns[column]
    }

    pub fn index_of(&self, kind: ColumnKind) -> Option<usize> {
        self.columns.iter().position(|&k| k == kind)
    }

    pub fn spacing_of(&self, column: usize) -> ColumnSpacing {
        let kind = self.columns[column];
        self.spacing
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, spacing)| *spacing)
            .unwrap_or(ColumnSpacing::Normal)
    }

    /// Fill `row` with the cells of one parameter
    pub fn extract(&self, tokens: &TokenStream, parameter: TokenSpan, row: &mut [Cell]) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "cell row has {} slots but the {:?} schema has {} columns",
            row.len(),
            self.style,
            self.columns.len()
        );
        (self.extractor)(tokens, parameter, row);
    }
}

impl fmt::Debug for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSchema")
            .field("style", &self.style)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

const C_COLUMNS: &[ColumnKind] = &[
    ColumnKind::ModifierQualifier,
    ColumnKind::Type,
    ColumnKind::Symbols,
    ColumnKind::Name,
    ColumnKind::PropertyValueSeparator,
    ColumnKind::PropertyValue,
    ColumnKind::DefaultValueSeparator,
    ColumnKind::DefaultValue,
];

const C_SPACING: &[(ColumnKind, ColumnSpacing)] = &[
    (ColumnKind::DefaultValueSeparator, ColumnSpacing::AlwaysLeadingAndTrailing),
    (ColumnKind::PropertyValueSeparator, ColumnSpacing::SpacedUnlessColon),
];

const PASCAL_COLUMNS: &[ColumnKind] = &[
    ColumnKind::ModifierQualifier,
    ColumnKind::Name,
    ColumnKind::TypeNameSeparator,
    ColumnKind::Symbols,
    ColumnKind::Type,
    ColumnKind::PropertyValueSeparator,
    ColumnKind::PropertyValue,
    ColumnKind::DefaultValueSeparator,
    ColumnKind::DefaultValue,
];

const PASCAL_SPACING: &[(ColumnKind, ColumnSpacing)] = &[
    (ColumnKind::DefaultValueSeparator, ColumnSpacing::AlwaysLeadingAndTrailing),
    (ColumnKind::TypeNameSeparator, ColumnSpacing::SpacedUnlessColon),
    (ColumnKind::PropertyValueSeparator, ColumnSpacing::SpacedUnlessColon),
];

const SYSTEM_VERILOG_COLUMNS: &[ColumnKind] = &[
    ColumnKind::ParameterKeywords,
    ColumnKind::Type,
    ColumnKind::Signed,
    ColumnKind::TypeDimension,
    ColumnKind::Name,
    ColumnKind::ParameterDimension,
    ColumnKind::PropertyValueSeparator,
    ColumnKind::PropertyValue,
    ColumnKind::DefaultValueSeparator,
    ColumnKind::DefaultValue,
];

const SYSTEM_VERILOG_SPACING: &[(ColumnKind, ColumnSpacing)] = &[
    (ColumnKind::TypeDimension, ColumnSpacing::AlwaysLeadingAndTrailing),
    (ColumnKind::ParameterDimension, ColumnSpacing::AlwaysLeadingAndTrailing),
    (ColumnKind::PropertyValueSeparator, ColumnSpacing::AlwaysLeadingAndTrailing),
    (ColumnKind::DefaultValueSeparator, ColumnSpacing::AlwaysLeadingAndTrailing),
];

static C_SCHEMA: ColumnSchema = ColumnSchema {
    style: ParameterStyle::C,
    columns: C_COLUMNS,
    spacing: C_SPACING,
    extractor: extract::extract_c,
};

static PASCAL_SCHEMA: ColumnSchema = ColumnSchema {
    style: ParameterStyle::Pascal,
    columns: PASCAL_COLUMNS,
    spacing: PASCAL_SPACING,
    extractor: extract::extract_pascal,
};

static SYSTEM_VERILOG_SCHEMA: ColumnSchema = ColumnSchema {
    style: ParameterStyle::SystemVerilog,
    columns: SYSTEM_VERILOG_COLUMNS,
    spacing: SYSTEM_VERILOG_SPACING,
    extractor: extract::extract_system_verilog,
};

/// Schema for a parameter style
pub fn schema_for(style: ParameterStyle) -> &'static ColumnSchema {
    match style {
        ParameterStyle::C => &C_SCHEMA,
        ParameterStyle::Pascal => &PASCAL_SCHEMA,
        ParameterStyle::SystemVerilog => &SYSTEM_VERILOG_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_has_a_name_column() {
        for style in [ParameterStyle::C, ParameterStyle::Pascal, ParameterStyle::SystemVerilog] {
            assert!(schema_for(style).index_of(ColumnKind::Name).is_some(), "{:?}", style);
        }
    }

    #[test]
    fn test_spacing_lookup() {
        let pascal = schema_for(ParameterStyle::Pascal);
        let separator = pascal.index_of(ColumnKind::TypeNameSeparator).unwrap();
        assert_eq!(pascal.spacing_of(separator), ColumnSpacing::SpacedUnlessColon);
        assert_eq!(pascal.spacing_of(0), ColumnSpacing::Normal);
    }

    #[test]
    fn test_modifier_columns_lead() {
        for style in [ParameterStyle::C, ParameterStyle::Pascal, ParameterStyle::SystemVerilog] {
            assert!(schema_for(style).kind_of(0).is_modifier_like());
        }
    }
}
