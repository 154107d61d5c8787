//! Section grouping
//!
//! Adjacent parameter sections such as `template<...>` followed by `(...)`,
//! or a function's parameters followed by a short `[attributes]` list, can be
//! laid out as one grid. Grouping only looks at small per-section summaries,
//! so the same summaries always produce the same groups.

use serde::{Deserialize, Serialize};

use super::cells::Cell;
use crate::config::LayoutConfig;
use crate::models::{Highlight, ParameterSection, ParameterStyle, Section, TokenStream};

/// How the sections of a group share columns
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupMode {
    /// No parameters anywhere; render as text
    Plain,

    /// One column model for every section in the group
    SharedColumns,

    /// Same grid position, separate column models
    Independent,
}

/// Highlight classification of a parameter name
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameClass {
    Identifier,
    Keyword,
    Metadata,
}

impl NameClass {
    /// Classify the first non-blank token of a name cell
    pub fn of_cell(tokens: &TokenStream, cell: &Cell) -> Self {
        if cell.is_empty() {
            return NameClass::Identifier;
        }
        let range = cell.token_range(tokens);
        let highlight = tokens.tokens()[range]
            .iter()
            .find(|t| !t.is_whitespace())
            .map(|t| t.highlight)
            .unwrap_or_default();
        match highlight {
            Highlight::Keyword => NameClass::Keyword,
            Highlight::Metadata | Highlight::PreprocessingDirective => NameClass::Metadata,
            _ => NameClass::Identifier,
        }
    }
}

/// What the grouper needs to know about a parameter section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterSummary {
    pub style: ParameterStyle,
    pub parameter_count: usize,

    /// Character length of the pre-parameter span, `None` when absent
    pub before_len: Option<usize>,
    pub before_first_char: Option<char>,

    /// Character length of the post-parameter span, 0 when absent
    pub after_len: usize,

    /// Class of the first parameter's name, `None` without parameters
    pub name_class: Option<NameClass>,
}

impl ParameterSummary {
    pub fn new(tokens: &TokenStream, section: &ParameterSection, first_name: Option<&Cell>) -> Self {
        let before_len = section.before.map(|span| tokens.span_char_len(span));
        let before_first_char = section
            .before
            .and_then(|span| tokens.first_char_from(span.start, span.end));
        let after_len = section.after.map(|span| tokens.span_char_len(span)).unwrap_or(0);
        let name_class = if section.parameters.is_empty() {
            None
        } else {
            Some(first_name.map(|cell| NameClass::of_cell(tokens, cell)).unwrap_or(NameClass::Identifier))
        };

        Self {
            style: section.style,
            parameter_count: section.parameters.len(),
            before_len,
            before_first_char,
            after_len,
            name_class,
        }
    }

    /// Whether this section may join the group that precedes it
    pub fn is_attachable(&self, config: &LayoutConfig) -> bool {
        let Some(before_len) = self.before_len else {
            return false;
        };
        before_len <= config.max_grouped_before_len
            && self.after_len <= config.max_grouped_after_len
            && matches!(self.before_first_char, Some('(' | '[' | '<' | '{'))
    }
}

/// Per-section summary used for grouping
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionSummary {
    Plain,
    Parameters(ParameterSummary),
}

impl SectionSummary {
    pub fn new(tokens: &TokenStream, section: &Section, first_name: Option<&Cell>) -> Self {
        match section {
            Section::Plain { .. } => SectionSummary::Plain,
            Section::Parameters(params) => {
                SectionSummary::Parameters(ParameterSummary::new(tokens, params, first_name))
            }
        }
    }
}

/// A run of adjacent sections rendered as one unit
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionGroup {
    pub start: usize,
    pub count: usize,
    pub mode: GroupMode,
}

impl SectionGroup {
    pub fn sections(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.count
    }
}

/// Decide the group that starts at `index`
pub fn group_at(summaries: &[SectionSummary], index: usize, config: &LayoutConfig) -> SectionGroup {
    assert!(
        index < summaries.len(),
        "group requested at section {} of {}",
        index,
        summaries.len()
    );

    let first = match &summaries[index] {
        SectionSummary::Plain => {
            return SectionGroup {
                start: index,
                count: 1,
                mode: GroupMode::Plain,
            }
        }
        SectionSummary::Parameters(first) => first,
    };

    let style = first.style;
    let mut reference_name = first.name_class;
    let mut has_parameters = first.parameter_count > 0;
    let mut degraded = false;
    let mut count = 1;

    while let Some(SectionSummary::Parameters(candidate)) = summaries.get(index + count) {
        if !candidate.is_attachable(config) {
            break;
        }

        if candidate.style != style {
            log::debug!(
                "section {}: style {:?} differs from {:?}, columns become independent",
                index + count,
                candidate.style,
                style
            );
            degraded = true;
        }

        if let Some(name) = candidate.name_class {
            match reference_name {
                None => reference_name = Some(name),
                Some(reference) if reference != name => {
                    log::debug!(
                        "section {}: name class {:?} differs from {:?}, columns become independent",
                        index + count,
                        name,
                        reference
                    );
                    degraded = true;
                }
                Some(_) => {}
            }
        }

        has_parameters |= candidate.parameter_count > 0;
        count += 1;
    }

    let mode = if !has_parameters {
        GroupMode::Plain
    } else if degraded {
        GroupMode::Independent
    } else {
        GroupMode::SharedColumns
    };

    SectionGroup {
        start: index,
        count,
        mode,
    }
}

/// Partition every section into groups, front to back
pub fn group_sections(summaries: &[SectionSummary], config: &LayoutConfig) -> Vec<SectionGroup> {
    let mut groups = Vec::new();
    let mut index = 0;
    while index < summaries.len() {
        let group = group_at(summaries, index, config);
        index += group.count.max(1);
        groups.push(group);
    }
    groups
}
