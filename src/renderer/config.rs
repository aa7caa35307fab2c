//! Configuration for SVG rendering

use serde::Deserialize;

use crate::layout::Style;

/// Colours the SVG painter gives each painted role
///
/// Components only tag what they paint with classes (`accent`, `placeholder`,
/// `field`, ...); the palette turns those roles into colours. An explicit
/// `fill` or `stroke` on a [`Style`] always wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Header band and header text fields
    pub accent: String,
    /// Drag handles along the top and left edges
    pub placeholder: String,
    /// Outer border and interior grid lines
    pub frame: String,
    /// Grip strokes on a hovered or dragged handle
    pub grip: String,
    /// Text field outlines
    pub field: String,
    /// Progress track and bar
    pub track: String,
    pub bar: String,
    /// Fallbacks for untagged elements
    pub fill: String,
    pub stroke: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: "#e3f2fd".to_string(),
            placeholder: "#ffffff".to_string(),
            frame: "#333333".to_string(),
            grip: "#333333".to_string(),
            field: "#9e9e9e".to_string(),
            track: "#eeeeee".to_string(),
            bar: "#2196f3".to_string(),
            fill: "#f2f2f2".to_string(),
            stroke: "#000000".to_string(),
        }
    }
}

impl Palette {
    pub fn fill_for<'a>(&'a self, style: &'a Style) -> &'a str {
        if let Some(fill) = style.fill.as_deref() {
            return fill;
        }
        let role = [
            ("accent", &self.accent),
            ("placeholder", &self.placeholder),
            ("progress-bar", &self.bar),
            ("progress", &self.track),
        ]
        .into_iter()
        .find(|(class, _)| style.has_class(class));
        role.map_or(&self.fill, |(_, colour)| colour)
    }

    pub fn stroke_for<'a>(&'a self, style: &'a Style) -> &'a str {
        if let Some(stroke) = style.stroke.as_deref() {
            return stroke;
        }
        let role = [
            ("field", &self.field),
            ("grip", &self.grip),
            ("grid-line", &self.frame),
            ("border", &self.frame),
        ]
        .into_iter()
        .find(|(class, _)| style.has_class(class));
        role.map_or(&self.stroke, |(_, colour)| colour)
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Padding around the painted extent
    pub viewbox_padding: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to put each element on its own indented line
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "ag-" for "ag-cell")
    pub class_prefix: Option<String>,

    pub palette: Palette,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 10.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("ag-".to_string()),
            palette: Palette::default(),
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Emit bare class names
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}
