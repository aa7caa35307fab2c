//! SVG generation from resolved layout

use crate::grid::Table;
use crate::layout::{Bounds, Point, Style};

use super::paint::Painter;
use super::SvgConfig;

/// Painter that builds an SVG document incrementally
pub struct SvgPainter {
    config: SvgConfig,
    elements: Vec<String>,
    extent: Option<Bounds>,
}

impl SvgPainter {
    /// Create a new SVG painter
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            extent: None,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn grow(&mut self, bounds: Bounds) {
        self.extent = Some(match self.extent {
            Some(extent) => extent.union(&bounds),
            None => bounds,
        });
    }

    fn class_attr(&self, kind: &str, style: &Style) -> String {
        let prefix = self.prefix();
        let classes = std::iter::once(format!("{}{}", prefix, kind))
            .chain(style.classes.iter().map(|c| format!("{}{}", prefix, c)))
            .collect::<Vec<_>>()
            .join(" ");
        format!(r#" class="{}""#, classes)
    }

    fn stroke_attrs(&self, style: &Style) -> String {
        format!(
            r#" stroke="{}" stroke-width="{}""#,
            escape_xml(self.config.palette.stroke_for(style)),
            style.stroke_width.unwrap_or(1.0)
        )
    }

    fn push(&mut self, element: String) {
        let line = format!("{}{}", self.indent_str(), element);
        self.elements.push(line);
    }

    /// Number of elements painted so far
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build the final SVG string
    pub fn finish(self) -> String {
        let padding = self.config.viewbox_padding;
        let extent = self.extent.unwrap_or_default();
        let nl = self.newline();

        let mut svg = String::new();
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            extent.x - padding,
            extent.y - padding,
            extent.width + 2.0 * padding,
            extent.height + 2.0 * padding
        ));
        svg.push_str(nl);
        for element in &self.elements {
            svg.push_str(element);
            svg.push_str(nl);
        }
        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

impl Painter for SvgPainter {
    fn fill_rect(&mut self, bounds: Bounds, style: &Style) {
        self.grow(bounds);
        let class = self.class_attr("fill", style);
        let fill = escape_xml(self.config.palette.fill_for(style));
        self.push(format!(
            r#"<rect{} x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            class,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            fill
        ));
    }

    fn stroke_rect(&mut self, bounds: Bounds, style: &Style) {
        self.grow(bounds);
        let class = self.class_attr("frame", style);
        self.push(format!(
            r#"<rect{} x="{}" y="{}" width="{}" height="{}" fill="none"{}/>"#,
            class,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            self.stroke_attrs(style)
        ));
    }

    fn line(&mut self, from: Point, to: Point, style: &Style) {
        let x = from.x.min(to.x);
        let y = from.y.min(to.y);
        self.grow(Bounds::new(x, y, (to.x - from.x).abs(), (to.y - from.y).abs()));
        let class = self.class_attr("line", style);
        self.push(format!(
            r#"<line{} x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            class,
            from.x,
            from.y,
            to.x,
            to.y,
            self.stroke_attrs(style)
        ));
    }

    fn text(&mut self, bounds: Bounds, text: &str, style: &Style) {
        self.grow(bounds);
        let class = self.class_attr("text", style);
        let center = bounds.center();
        let weight = if style.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };
        let fill = style
            .fill
            .as_deref()
            .map(|f| format!(r#" fill="{}""#, escape_xml(f)))
            .unwrap_or_default();
        self.push(format!(
            r#"<text{} x="{}" y="{}" text-anchor="middle" dominant-baseline="central"{}{}>{}</text>"#,
            class,
            center.x,
            center.y,
            weight,
            fill,
            escape_xml(text)
        ));
    }
}

/// Paint a table into an SVG document
pub fn render_table_svg(table: &Table, config: &SvgConfig) -> String {
    let mut painter = SvgPainter::new(config.clone());
    table.paint(&mut painter);
    painter.finish()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Palette;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_empty_document() {
        let svg = SvgPainter::new(SvgConfig::new().with_standalone(false)).finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="-10 -10 20 20""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_viewbox_covers_painted_elements() {
        let mut painter = SvgPainter::new(
            SvgConfig::new()
                .with_viewbox_padding(0.0)
                .with_standalone(false)
                .with_pretty_print(false),
        );
        painter.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0), &Style::new());
        painter.stroke_rect(Bounds::new(5.0, 5.0, 20.0, 10.0), &Style::new());
        let svg = painter.finish();
        assert!(svg.contains(r#"viewBox="0 0 25 15""#));
        assert!(svg.contains(r#"class="ag-fill""#));
        assert!(svg.contains(r##"fill="none" stroke="#000000" stroke-width="1""##));
    }

    #[test]
    fn test_text_is_centered_and_escaped() {
        let mut painter = SvgPainter::new(SvgConfig::new().without_class_prefix());
        painter.text(
            Bounds::new(0.0, 0.0, 40.0, 20.0),
            "a&b",
            &Style::new().with_bold(true).with_class("head"),
        );
        let svg = painter.finish();
        assert!(svg.contains(r#"class="text head""#));
        assert!(svg.contains(r#"x="20" y="10""#));
        assert!(svg.contains(r#"font-weight="bold""#));
        assert!(svg.contains(">a&amp;b</text>"));
    }

    #[test]
    fn test_palette_colours_tagged_elements() {
        let palette = Palette {
            accent: "#ffe0b2".to_string(),
            frame: "#000000".to_string(),
            ..Palette::default()
        };
        let mut painter = SvgPainter::new(SvgConfig::new().with_palette(palette));
        painter.fill_rect(Bounds::new(0.0, 0.0, 4.0, 4.0), &Style::new().with_class("accent"));
        painter.stroke_rect(
            Bounds::new(0.0, 0.0, 4.0, 4.0),
            &Style::new().with_stroke_width(2.0).with_class("border"),
        );
        let svg = painter.finish();
        assert!(svg.contains(r##"fill="#ffe0b2""##));
        assert!(svg.contains(r##"stroke="#000000" stroke-width="2""##));
    }
}
