//! HTML renderer for prototype layouts
//!
//! Serializes a [`PrototypeLayout`] into nested `div`s for a CSS grid client.
//! Every grid element carries its wide and narrow areas as data attributes
//! and applies the wide area inline, so the page renders correctly before any
//! script runs.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::config::LayoutConfig;
use crate::layout::{
    ElementKind, Form, GridLayout, GridPlacement, GroupLayout, GroupMode, ParameterGroupLayout, PlacedElement,
    PrototypeLayout, SectionLayout,
};
use crate::models::{Highlight, Prototype, TokenRole, TokenSpan};

/// Render a laid-out prototype as HTML
pub fn render_html(prototype: &Prototype, layout: &PrototypeLayout, config: &LayoutConfig) -> String {
    let mut renderer = HtmlRenderer::new(prototype, config);
    renderer.append_prototype(layout);
    renderer.finish()
}

/// Streaming HTML writer for one prototype
pub struct HtmlRenderer<'a> {
    prototype: &'a Prototype,
    config: &'a LayoutConfig,
    output: String,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(prototype: &'a Prototype, config: &'a LayoutConfig) -> Self {
        Self {
            prototype,
            config,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn append_prototype(&mut self, layout: &PrototypeLayout) {
        self.output.push_str("<div");
        if let Some(id) = &self.prototype.id {
            let _ = write!(self.output, " id=\"{}{}\"", escape(self.config.id_prefix.as_str()), escape(id.as_str()));
        }
        let _ = write!(
            self.output,
            " class=\"NDPrototype{}\">",
            if layout.has_parameters { " WideForm" } else { "" }
        );

        for group in &layout.groups {
            match group {
                GroupLayout::Plain { sections } => {
                    for &section in sections {
                        self.append_plain_section(self.prototype.sections[section].extent());
                    }
                }
                GroupLayout::Parameters(group) => self.append_parameter_group(group),
            }
        }

        self.output.push_str("</div>");
    }

    fn append_plain_section(&mut self, span: TokenSpan) {
        self.output.push_str("<div class=\"PSection PPlainSection\">");
        self.append_text_excluding_partial(span.start, span.end);
        self.output.push_str("</div>");
    }

    fn append_parameter_group(&mut self, group: &ParameterGroupLayout) {
        match group.mode {
            GroupMode::Independent => {
                self.output.push_str("<div class=\"PSection PParameterSection PIndependentSections\">");
                if let Some(outer) = &group.outer {
                    let _ = write!(
                        self.output,
                        "<div class=\"PIndependentCells\" data-WideColumnCount=\"{}\" data-NarrowColumnCount=\"{}\">",
                        outer.wide_columns, outer.narrow_columns
                    );
                    for element in &outer.elements {
                        let Some(section) = group.sections.get(element.section) else {
                            continue;
                        };
                        match element.kind {
                            ElementKind::BeforeParameters => self.append_before_parameters(group, section, element),
                            ElementKind::SubGrid => {
                                let Some(grid) = group.grids.get(element.section) else {
                                    continue;
                                };
                                let classes = format!("PSubGrid {}", section.style.css_class());
                                self.open_element(&classes, element);
                                self.append_grid(group, grid);
                                self.output.push_str("</div>");
                            }
                            ElementKind::Filler => self.append_filler(element),
                            ElementKind::Cell { .. } | ElementKind::AfterParameters => {}
                        }
                    }
                    self.output.push_str("</div>");
                }
                self.output.push_str("</div>");
            }
            GroupMode::SharedColumns | GroupMode::Plain => {
                let _ = write!(
                    self.output,
                    "<div class=\"PSection PParameterSection {}\">",
                    group.style.css_class()
                );
                for grid in &group.grids {
                    self.append_grid(group, grid);
                }
                self.output.push_str("</div>");
            }
        }
    }

    fn append_grid(&mut self, group: &ParameterGroupLayout, grid: &GridLayout) {
        let placement = &grid.placement;
        let _ = write!(
            self.output,
            "<div class=\"PParameterCells\" data-WideColumnCount=\"{}\" data-NarrowColumnCount=\"{}\">",
            placement.wide_columns, placement.narrow_columns
        );

        let prototype = self.prototype;
        let tokens = &prototype.tokens;
        let first_used = grid.columns.first_used();
        let last_used = grid.columns.last_used();

        for element in &placement.elements {
            let Some(section) = group.sections.get(grid.first_section + element.section) else {
                continue;
            };
            let Some(params) = prototype.sections[section.section].as_parameters() else {
                continue;
            };

            match element.kind {
                ElementKind::BeforeParameters => self.append_before_parameters(group, section, element),

                ElementKind::Cell { parameter, column } => {
                    let mut classes = String::from(grid.columns.kind_of(column).css_class());
                    if Some(column) == first_used {
                        classes.push_str(" InFirstParameterColumn");
                    }
                    if Some(column) == last_used {
                        classes.push_str(" InLastParameterColumn");
                    }
                    self.open_element(&classes, element);

                    let cell = *section.cells.get(parameter, column);
                    if !cell.is_empty() {
                        if cell.leading_space {
                            self.output.push_str("&nbsp;");
                        }
                        let range = cell.token_range(tokens);
                        self.append_highlighted(range.start, range.end);
                        if cell.trailing_space {
                            self.output.push_str("&nbsp;");
                        }
                    }
                    self.output.push_str("</div>");
                }

                ElementKind::AfterParameters => {
                    let mut classes = String::from("PAfterParameters");
                    match (section.spacing.space_after_parameters, section.last_cell_ends_with_space) {
                        (true, false) => classes.push_str(" LeftSpaceOnWide"),
                        (false, true) => classes.push_str(" NegativeLeftSpaceOnWide"),
                        _ => {}
                    }
                    self.open_element(&classes, element);
                    if let Some(span) = params.after {
                        let start = tokens.forward_past_whitespace(span.start, span.end);
                        self.append_highlighted(start, span.end);
                    }
                    self.output.push_str("</div>");
                }

                ElementKind::Filler => self.append_filler(element),

                ElementKind::SubGrid => {}
            }
        }

        self.output.push_str("</div>");
    }

    fn append_before_parameters(&mut self, group: &ParameterGroupLayout, section: &SectionLayout, element: &PlacedElement) {
        let mut classes = String::from("PBeforeParameters");
        if section.spacing.space_before_parameters {
            classes.push_str(" RightSpaceOnWide");
        }
        if group.sections.len() > 1 {
            classes.push_str(" RightAlignOnWide");
        }
        self.open_element(&classes, element);

        let prototype = self.prototype;
        if let Some(span) = prototype.sections[section.section].as_parameters().and_then(|p| p.before) {
            let end = prototype.tokens.back_past_whitespace(span.end, span.start);
            self.append_text_excluding_partial(span.start, end);
        }
        self.output.push_str("</div>");
    }

    fn append_filler(&mut self, element: &PlacedElement) {
        let classes = match (element.wide.is_some(), element.narrow.is_some()) {
            (true, false) => "PFiller WideOnly",
            (false, true) => "PFiller NarrowOnly",
            _ => "PFiller",
        };
        self.open_element(classes, element);
        self.output.push_str("</div>");
    }

    fn open_element(&mut self, classes: &str, element: &PlacedElement) {
        let _ = write!(self.output, "<div class=\"{}\"", classes);
        for form in [Form::Wide, Form::Narrow] {
            if let Some(area) = GridPlacement::area(element, form) {
                let attribute = match form {
                    Form::Wide => "data-WideGridArea",
                    Form::Narrow => "data-NarrowGridArea",
                };
                let _ = write!(self.output, " {}=\"{}\"", attribute, area);
            }
        }
        if let Some(wide) = element.wide {
            let _ = write!(self.output, " style=\"grid-area:{}\"", wide);
        }
        self.output.push('>');
    }

    /// Append tokens, dropping a standalone `partial` type modifier when
    /// configured to
    fn append_text_excluding_partial(&mut self, mut start: usize, end: usize) {
        if !self.config.exclude_partial_keyword {
            self.append_highlighted(start, end);
            return;
        }

        let prototype = self.prototype;
        let tokens = &prototype.tokens;
        while let Some(partial) =
            (start..end).find(|&i| {
                let token = &tokens.tokens()[i];
                token.text == "partial" && token.role == TokenRole::TypeModifier
            })
        {
            let before_end = tokens.back_past_whitespace(partial, start);
            let after_start = tokens.forward_past_whitespace(partial + 1, end);
            let had_space = before_end < partial || after_start > partial + 1;

            self.append_highlighted(start, before_end);
            if before_end > start && after_start < end && had_space {
                self.output.push(' ');
            }
            start = after_start;
        }
        self.append_highlighted(start, end);
    }

    /// Append tokens with highlight spans, folding unhighlighted whitespace
    /// between two runs of the same highlight into one span
    fn append_highlighted(&mut self, start: usize, end: usize) {
        let prototype = self.prototype;
        let tokens = &prototype.tokens.tokens()[start..end];
        let mut i = 0;

        while i < tokens.len() {
            let highlight = tokens[i].highlight;
            let mut j = i + 1;

            if highlight == Highlight::Null {
                while j < tokens.len() && tokens[j].highlight == Highlight::Null {
                    j += 1;
                }
            } else {
                loop {
                    if j < tokens.len() && tokens[j].highlight == highlight {
                        j += 1;
                        continue;
                    }
                    let mut k = j;
                    while k < tokens.len() && tokens[k].highlight == Highlight::Null && tokens[k].is_whitespace() {
                        k += 1;
                    }
                    if k > j && k < tokens.len() && tokens[k].highlight == highlight {
                        j = k + 1;
                        continue;
                    }
                    break;
                }
            }

            let css_class = highlight.css_class();
            if let Some(class) = css_class {
                let _ = write!(self.output, "<span class=\"{}\">", class);
            }
            for token in &tokens[i..j] {
                if token.text == "\n" || token.text == "\r\n" {
                    self.output.push_str("<br />");
                } else {
                    self.output.push_str(&escape(token.text.as_str()));
                }
            }
            if css_class.is_some() {
                self.output.push_str("</span>");
            }

            i = j;
        }
    }
}
