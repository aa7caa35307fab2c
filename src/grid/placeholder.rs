//! Placeholders: zero-content components standing for one grid line

use std::fmt;

use serde::Deserialize;

use crate::layout::{Anchorable, Axis, Bounds, ComponentId, Paintable, Point, Size, Style};
use crate::renderer::Painter;

use super::config::GridConfig;

/// Which family of grid lines a placeholder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Column,
    Row,
}

impl LineKind {
    pub fn name(self) -> &'static str {
        match self {
            LineKind::Column => "column",
            LineKind::Row => "row",
        }
    }

    /// Axis along which lines of this kind are chained (and dragged)
    pub fn axis(self) -> Axis {
        match self {
            LineKind::Column => Axis::Horizontal,
            LineKind::Row => Axis::Vertical,
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One column or row handle; cells anchor to the centers of two placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub(crate) id: ComponentId,
    pub(crate) kind: LineKind,
    /// Always equal to the placeholder's position in its sequence
    pub(crate) index: usize,
    /// Largest content length along the line's axis, unscaled
    pub(crate) extent: f64,
    pub(crate) dragging: bool,
    pub(crate) hovered: bool,
}

impl Placeholder {
    pub(crate) fn new(id: ComponentId, kind: LineKind, index: usize) -> Self {
        Self {
            id,
            kind,
            index,
            extent: 0.0,
            dragging: false,
            hovered: false,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Unscaled size of the placeholder
    ///
    /// A column is at least two control widths wide plus one control width, and
    /// as tall as the drag handle; rows mirror this on the other axis.
    pub fn declared_size(&self, config: &GridConfig) -> Size {
        let button = config.control_button_width;
        let length = self.extent.max(2.0 * button);
        let handle = if config.allow_swap(self.kind) {
            config.swap_handle_length
        } else {
            0.0
        };
        match self.kind {
            LineKind::Column => Size::new(length + button, handle),
            LineKind::Row => Size::new(handle, length),
        }
    }

    /// Length of the line along its own axis, unscaled
    pub fn span(&self, config: &GridConfig) -> f64 {
        self.declared_size(config).along(self.kind.axis())
    }
}

impl Anchorable for Placeholder {
    fn component_id(&self) -> ComponentId {
        self.id
    }
}

impl Paintable for Placeholder {
    fn paint(&self, bounds: Bounds, painter: &mut dyn Painter) {
        let style = Style::new()
            .with_class("placeholder")
            .with_class(self.kind.to_string());
        painter.fill_rect(bounds, &style);

        if !(self.hovered || self.dragging) {
            return;
        }
        // three grip strokes across the handle
        let grip = Style::new().with_stroke_width(1.0).with_class("grip");
        match self.kind {
            LineKind::Column => {
                let gap = bounds.height / 5.0;
                let margin = bounds.width * 0.2;
                let mid = bounds.center().y;
                for dy in [-gap, 0.0, gap] {
                    painter.line(
                        Point::new(bounds.x + margin, mid + dy),
                        Point::new(bounds.right() - margin, mid + dy),
                        &grip,
                    );
                }
            }
            LineKind::Row => {
                let gap = bounds.width / 5.0;
                let margin = bounds.height * 0.2;
                let mid = bounds.center().x;
                for dx in [-gap, 0.0, gap] {
                    painter.line(
                        Point::new(mid + dx, bounds.y + margin),
                        Point::new(mid + dx, bounds.bottom() - margin),
                        &grip,
                    );
                }
            }
        }
    }
}
