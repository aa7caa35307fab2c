//! Paint sink consumed by the repaint pass

use crate::layout::{Bounds, Point, Style};

/// Drawing primitives a repaint pass issues against resolved bounds
///
/// Implementations only draw; they never resolve layout.
pub trait Painter {
    fn fill_rect(&mut self, bounds: Bounds, style: &Style);

    fn stroke_rect(&mut self, bounds: Bounds, style: &Style);

    fn line(&mut self, from: Point, to: Point, style: &Style);

    /// Text centered in `bounds`
    fn text(&mut self, bounds: Bounds, text: &str, style: &Style);
}

/// A single recorded paint call
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Fill(Bounds),
    Stroke(Bounds),
    Line(Point, Point),
    Text(Bounds, String),
}

/// Painter that records calls, for tests and for hosts that replay draw lists
#[derive(Debug, Clone, Default)]
pub struct RecordingPainter {
    pub ops: Vec<PaintOp>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts in paint order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Text(_, text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Painter for RecordingPainter {
    fn fill_rect(&mut self, bounds: Bounds, _style: &Style) {
        self.ops.push(PaintOp::Fill(bounds));
    }

    fn stroke_rect(&mut self, bounds: Bounds, _style: &Style) {
        self.ops.push(PaintOp::Stroke(bounds));
    }

    fn line(&mut self, from: Point, to: Point, _style: &Style) {
        self.ops.push(PaintOp::Line(from, to));
    }

    fn text(&mut self, bounds: Bounds, text: &str, _style: &Style) {
        self.ops.push(PaintOp::Text(bounds, text.to_string()));
    }
}
