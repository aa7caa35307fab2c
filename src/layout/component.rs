//! Component capabilities
//!
//! Widgets are not a class hierarchy here: a component is an opaque
//! [`ComponentId`] registered in a container, a [`Style`] value, and whichever
//! capabilities it implements.

use crate::renderer::Painter;

use super::error::LayoutError;
use super::scale::ScalePolicy;
use super::types::{Bounds, ComponentId};

/// Paint properties of a component
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub bold: bool,
    /// CSS classes emitted by SVG painters
    pub classes: Vec<String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }

    /// Stroke width only, leaving the colour to the painter
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Merge another style set, with other taking precedence
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            fill: other.fill.clone().or_else(|| self.fill.clone()),
            stroke: other.stroke.clone().or_else(|| self.stroke.clone()),
            stroke_width: other.stroke_width.or(self.stroke_width),
            bold: self.bold || other.bold,
            classes: {
                let mut classes = self.classes.clone();
                classes.extend(other.classes.iter().cloned());
                classes
            },
        }
    }
}

/// Something positioned by a layout container
pub trait Anchorable {
    fn component_id(&self) -> ComponentId;
}

/// Something that can draw itself into resolved bounds
pub trait Paintable {
    fn paint(&self, bounds: Bounds, painter: &mut dyn Painter);
}

/// Something that must re-resolve when the scale policy changes
pub trait Scalable {
    fn on_scale_changed(&mut self, policy: &ScalePolicy) -> Result<(), LayoutError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_merge_precedence() {
        let base = Style::new().with_fill("#fff").with_class("cell");
        let over = Style::new().with_fill("#000").with_bold(true).with_class("head");
        let merged = base.merge(&over);
        assert_eq!(merged.fill.as_deref(), Some("#000"));
        assert!(merged.bold);
        assert_eq!(merged.classes, vec!["cell".to_string(), "head".to_string()]);
    }
}
