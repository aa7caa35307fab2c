//! Grid cells: interchangeable label or editable-field components

use std::fmt;

use serde::Deserialize;

use crate::layout::{Anchorable, Bounds, ComponentId, Paintable, Size, Style};
use crate::renderer::Painter;

use super::measure::TextMeasure;

/// What a cell is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Static text
    #[default]
    Label,
    /// Editable text box filling its slot
    TextField,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Label => write!(f, "label"),
            CellKind::TextField => write!(f, "text_field"),
        }
    }
}

/// One cell of the grid, anchored to its column's and row's placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub(crate) id: ComponentId,
    pub(crate) kind: CellKind,
    pub(crate) content: String,
    pub(crate) style: Style,
}

impl Cell {
    pub(crate) fn new(id: ComponentId, kind: CellKind, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
            style: Style::new(),
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Unscaled size of the content alone
    pub fn content_size(&self, measure: &dyn TextMeasure) -> Size {
        measure.measure(&self.content)
    }

    /// Unscaled declared size inside a slot of `slot` size
    ///
    /// Labels take their content size; text fields fill the slot minus half a
    /// control width on each axis.
    pub(crate) fn declared_size(&self, measure: &dyn TextMeasure, slot: Size, inset: f64) -> Size {
        match self.kind {
            CellKind::Label => self.content_size(measure),
            CellKind::TextField => Size::new(
                (slot.width - inset).max(0.0),
                (slot.height - inset).max(0.0),
            ),
        }
    }

    /// Recompute the paint style for the cell's position
    pub(crate) fn restyle(&mut self, header: bool, accent_head: bool) {
        let mut style = Style::new().with_class("cell");
        if header {
            style = style.with_bold(true).with_class("head");
        }
        if self.kind == CellKind::TextField {
            style = style.with_class("field").with_stroke_width(1.0);
            if header && accent_head {
                style = style.with_class("accent");
            }
        }
        self.style = style;
    }
}

impl Anchorable for Cell {
    fn component_id(&self) -> ComponentId {
        self.id
    }
}

impl Paintable for Cell {
    fn paint(&self, bounds: Bounds, painter: &mut dyn Painter) {
        if self.kind == CellKind::TextField {
            if self.style.has_class("accent") {
                painter.fill_rect(bounds, &self.style);
            }
            painter.stroke_rect(bounds, &self.style);
        }
        if !self.content.is_empty() {
            painter.text(bounds, &self.content, &self.style);
        }
    }
}
