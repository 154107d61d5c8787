// HTML output of laid-out prototypes

use prototype_grid::models::{Highlight, ParameterStyle, Prototype, PrototypeAssembler, TokenRole};
use prototype_grid::{render_prototype, render_prototype_json, LayoutConfig, PrototypeError};

use TokenRole as R;

/// `void F(int x, char* y)`
fn make_scenario_b() -> Prototype {
    let mut asm = PrototypeAssembler::new().with_id("42");
    asm.begin_parameters(ParameterStyle::C)
        .push("void F(", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("x", R::Name)
        .push(",", R::ParamSeparator)
        .push(" ", R::Null)
        .begin_parameter()
        .push("char", R::Type)
        .push("*", R::TypeModifier)
        .push(" ", R::Null)
        .push("y", R::Name)
        .end_parameters()
        .push(")", R::Null);
    asm.finish()
}

fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

#[test]
fn test_outer_element_and_section() {
    let html = render_prototype(&make_scenario_b(), &LayoutConfig::default());

    assert!(html.starts_with("<div id=\"NDPrototype42\" class=\"NDPrototype WideForm\">"), "{}", html);
    assert!(html.contains(
        "<div class=\"PSection PParameterSection CStyle\">\
         <div class=\"PParameterCells\" data-WideColumnCount=\"5\" data-NarrowColumnCount=\"4\">"
    ));
    assert!(html.ends_with("</div></div></div>"));
}

#[test]
fn test_scenario_b_elements() {
    let html = render_prototype(&make_scenario_b(), &LayoutConfig::default());

    assert!(html.contains(
        "<div class=\"PBeforeParameters\" data-WideGridArea=\"1/1/3/2\" \
         data-NarrowGridArea=\"1/1/2/5\" style=\"grid-area:1/1/3/2\">void F(</div>"
    ), "{}", html);
    assert!(html.contains(
        "<div class=\"PType InFirstParameterColumn\" data-WideGridArea=\"1/2/2/3\" \
         data-NarrowGridArea=\"2/1/3/2\" style=\"grid-area:1/2/2/3\">int&nbsp;</div>"
    ), "{}", html);
    assert!(html.contains(
        "<div class=\"PSymbols\" data-WideGridArea=\"2/3/3/4\" \
         data-NarrowGridArea=\"3/2/4/3\" style=\"grid-area:2/3/3/4\">*</div>"
    ), "{}", html);
    assert!(html.contains(">x,</div>"), "last column loses its trailing space");
    assert!(html.contains(
        "<div class=\"PAfterParameters NegativeLeftSpaceOnWide\" data-WideGridArea=\"2/5/3/6\" \
         data-NarrowGridArea=\"4/1/5/5\" style=\"grid-area:2/5/3/6\">)</div>"
    ), "{}", html);
}

#[test]
fn test_fillers_carry_one_form() {
    let html = render_prototype(&make_scenario_b(), &LayoutConfig::default());

    assert!(html.contains(
        "<div class=\"PFiller WideOnly\" data-WideGridArea=\"1/5/2/6\" style=\"grid-area:1/5/2/6\"></div>"
    ), "{}", html);
    assert!(html.contains("<div class=\"PFiller NarrowOnly\" data-NarrowGridArea=\"2/4/3/5\"></div>"));
    assert!(html.contains("<div class=\"PFiller NarrowOnly\" data-NarrowGridArea=\"3/4/4/5\"></div>"));
    assert_eq!(count(&html, "PFiller"), 3);
}

#[test]
fn test_grouped_sections_align_right() {
    let mut asm = PrototypeAssembler::new();
    asm.begin_parameters(ParameterStyle::C)
        .push("void F(", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("a", R::Name)
        .end_parameters()
        .push(")", R::Null);
    asm.begin_parameters(ParameterStyle::C)
        .push("(*", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("b", R::Name)
        .end_parameters()
        .push(")", R::Null);
    let html = render_prototype(&asm.finish(), &LayoutConfig::default());

    assert_eq!(count(&html, "PParameterCells"), 1, "shared columns render one grid");
    assert!(html.contains("class=\"PBeforeParameters RightAlignOnWide\""));
    assert!(html.contains("class=\"PBeforeParameters RightSpaceOnWide RightAlignOnWide\""));
}

#[test]
fn test_space_after_parameters_class() {
    let mut asm = PrototypeAssembler::new();
    asm.begin_parameters(ParameterStyle::C)
        .push("struct S {", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("x", R::Name)
        .end_parameters()
        .push("}", R::Null);
    let html = render_prototype(&asm.finish(), &LayoutConfig::default());

    assert!(html.contains("class=\"PBeforeParameters RightSpaceOnWide\""), "{}", html);
    assert!(html.contains("class=\"PAfterParameters LeftSpaceOnWide\""), "{}", html);
}

#[test]
fn test_independent_sections_render_sub_grids() {
    let mut asm = PrototypeAssembler::new();
    asm.begin_parameters(ParameterStyle::C)
        .push("void F(", R::Null)
        .begin_parameter()
        .push("int", R::Type)
        .push(" ", R::Null)
        .push("a", R::Name)
        .end_parameters()
        .push(")", R::Null);
    asm.begin_parameters(ParameterStyle::Pascal)
        .push("[", R::Null)
        .begin_parameter()
        .push("x", R::Name)
        .push(":", R::NameTypeSeparator)
        .push(" ", R::Null)
        .push("T", R::Type)
        .end_parameters()
        .push("]", R::Null);
    let html = render_prototype(&asm.finish(), &LayoutConfig::default());

    assert!(html.contains("<div class=\"PSection PParameterSection PIndependentSections\">"), "{}", html);
    assert!(html.contains(
        "<div class=\"PIndependentCells\" data-WideColumnCount=\"2\" data-NarrowColumnCount=\"1\">"
    ));

    // Pre spans share the first outer track and stack above their sub-grids when narrow
    assert!(html.contains(
        "<div class=\"PBeforeParameters RightAlignOnWide\" data-WideGridArea=\"1/1/2/2\" \
         data-NarrowGridArea=\"1/1/2/2\" style=\"grid-area:1/1/2/2\">void F(</div>"
    ), "{}", html);
    assert!(html.contains(
        "data-WideGridArea=\"2/1/3/2\" data-NarrowGridArea=\"3/1/4/2\" style=\"grid-area:2/1/3/2\">[</div>"
    ), "{}", html);

    // Each sub-grid carries its own section's style
    assert!(html.contains(
        "<div class=\"PSubGrid CStyle\" data-WideGridArea=\"1/2/2/3\" \
         data-NarrowGridArea=\"2/1/3/2\" style=\"grid-area:1/2/2/3\"><div class=\"PParameterCells\""
    ), "{}", html);
    assert!(html.contains(
        "<div class=\"PSubGrid PascalStyle\" data-WideGridArea=\"2/2/3/3\" \
         data-NarrowGridArea=\"4/1/5/2\" style=\"grid-area:2/2/3/3\"><div class=\"PParameterCells\""
    ), "{}", html);
    assert_eq!(count(&html, "CStyle"), 1);
    assert_eq!(count(&html, "PascalStyle"), 1);

    // Sub-grids have no pre-parameter track of their own
    assert_eq!(count(&html, "PBeforeParameters"), 2);
    assert!(html.contains(
        "data-WideGridArea=\"1/3/2/4\" data-NarrowGridArea=\"2/1/3/4\" style=\"grid-area:1/3/2/4\">)</div>"
    ), "{}", html);
    assert_eq!(count(&html, "PParameterCells"), 2);
    assert!(html.contains(">:&nbsp;</div>"), "{}", html);
}

#[test]
fn test_plain_prototype() {
    let mut asm = PrototypeAssembler::new().with_id("Count");
    asm.begin_plain()
        .push_highlighted("int", R::Type, Highlight::Keyword)
        .push(" Count\n", R::Null)
        .push("{ get; }", R::Null);
    let config = LayoutConfig {
        id_prefix: "Proto".to_string(),
        ..LayoutConfig::default()
    };
    let html = render_prototype(&asm.finish(), &config);

    assert_eq!(
        html,
        "<div id=\"ProtoCount\" class=\"NDPrototype\"><div class=\"PSection PPlainSection\">\
         <span class=\"SHKeyword\">int</span> Count<br />{ get; }</div></div>"
    );
}

#[test]
fn test_json_entry_point() {
    let json = r#"{
        "id": "7",
        "tokens": [
            { "text": "f" }, { "text": "(" },
            { "text": "int", "role": "type", "highlight": "keyword" },
            { "text": " " }, { "text": "x", "role": "name" }, { "text": ")" }
        ],
        "sections": [
            { "kind": "parameters", "style": 0,
              "before": { "start": 0, "end": 2 },
              "parameters": [ { "start": 2, "end": 5 } ],
              "after": { "start": 5, "end": 6 } }
        ]
    }"#;
    let html = render_prototype_json(json, &LayoutConfig::default()).unwrap();
    assert!(html.starts_with("<div id=\"NDPrototype7\" class=\"NDPrototype WideForm\">"));
    assert!(html.contains("<span class=\"SHKeyword\">int</span>&nbsp;</div>"), "{}", html);

    let bad_style = json.replace("\"style\": 0", "\"style\": 5");
    let err = render_prototype_json(&bad_style, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, PrototypeError::Decode(_)));
    assert!(err.to_string().contains("Unknown parameter style code: 5"));

    let bad_span = json.replace("\"end\": 6", "\"end\": 60");
    let err = render_prototype_json(&bad_span, &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, PrototypeError::SpanOutOfRange { section: 0, .. }));
}
