//! SVG regression tests
//!
//! Small tables whose geometry can be checked by hand are rendered without the
//! XML declaration and with zero padding, and compared line by line.

use anchor_grid::{render_with_config, RenderConfig, SvgConfig};
use pretty_assertions::assert_eq;

fn render_plain(source: &str) -> String {
    let config = RenderConfig::new().with_svg(
        SvgConfig::new()
            .with_standalone(false)
            .with_viewbox_padding(0.0),
    );
    render_with_config(source, config).expect("script should render")
}

/// Strip indentation so that pretty-printing changes don't matter
fn normalize_svg(svg: &str) -> Vec<String> {
    svg.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_single_column_with_title() {
    let svg = render_plain("[table]\ntitles = [\"ab\"]\nrows = 2\n");
    let expected = r##"
<svg xmlns="http://www.w3.org/2000/svg" viewBox="14 14 52.5 67.5">
<rect class="ag-fill ag-accent" x="24" y="24" width="42" height="29" fill="#e3f2fd"/>
<rect class="ag-fill ag-placeholder ag-column" x="24.5" y="14" width="42" height="10" fill="#ffffff"/>
<rect class="ag-fill ag-placeholder ag-row" x="14" y="24.5" width="10" height="28" fill="#ffffff"/>
<rect class="ag-fill ag-placeholder ag-row" x="14" y="53.5" width="10" height="28" fill="#ffffff"/>
<text class="ag-text ag-cell ag-head" x="45.5" y="38.5" text-anchor="middle" dominant-baseline="central" font-weight="bold">ab</text>
<line class="ag-line ag-grid-line" x1="24" y1="53" x2="66" y2="53" stroke="#333333" stroke-width="1"/>
<rect class="ag-frame ag-border" x="24" y="24" width="42" height="57" fill="none" stroke="#333333" stroke-width="1"/>
</svg>
"##;
    assert_eq!(normalize_svg(&svg), normalize_svg(expected));
}

#[test]
fn test_frame_scales_with_table() {
    let config = RenderConfig::new().with_scale(2.0).with_svg(
        SvgConfig::new()
            .with_standalone(false)
            .with_viewbox_padding(0.0),
    );
    let svg = render_with_config("[table]\ntitles = [\"ab\"]\nrows = 2\n", config).unwrap();
    let lines = normalize_svg(&svg);
    let frame = lines.iter().find(|l| l.contains("ag-border")).unwrap();
    assert_eq!(
        frame,
        r##"<rect class="ag-frame ag-border" x="48" y="48" width="84" height="114" fill="none" stroke="#333333" stroke-width="2"/>"##
    );
    let grid_line = lines.iter().find(|l| l.contains("ag-grid-line")).unwrap();
    assert_eq!(
        grid_line,
        r##"<line class="ag-line ag-grid-line" x1="48" y1="106" x2="132" y2="106" stroke="#333333" stroke-width="2"/>"##
    );
}

#[test]
fn test_without_accent_head() {
    let svg = render_plain("[table]\ncolumns = 1\nrows = 2\n\n[config]\naccent_head = false\n");
    assert!(!svg.contains("ag-accent"));
    assert_eq!(svg.matches("ag-placeholder").count(), 3);
}

#[test]
fn test_text_field_is_framed() {
    let svg = render_plain(
        r#"
[table]
columns = 2
rows = 2

[[ops]]
op = "set_cell_kind"
column = 1
row = 1
kind = "text_field"
"#,
    );
    let fields: Vec<&str> = svg.lines().filter(|l| l.contains("ag-field")).collect();
    assert_eq!(fields.len(), 1);
    assert!(fields[0].contains(r##"stroke="#9e9e9e""##));
}

#[test]
fn test_grid_lines_per_interior_boundary() {
    let svg = render_plain("[table]\ncolumns = 4\nrows = 3\n");
    assert_eq!(svg.matches("ag-grid-line").count(), 3 + 2);
}

#[test]
fn test_markup_in_cells_is_escaped() {
    let svg = render_plain("[table]\ntitles = [\"<b>&\"]\nrows = 2\n");
    assert!(svg.contains(">&lt;b&gt;&amp;</text>"));
    assert!(!svg.contains("<b>"));
}
