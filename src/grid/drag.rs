//! Interactive drag of a column or row
//!
//! Dragging only displaces what is painted: the placeholder and every cell on
//! its line follow the pointer along the drag axis while the anchor chain stays
//! untouched. Releasing reports where the line was dropped; reordering happens
//! only when the caller commits that [`DropTarget`].

use crate::layout::{Axis, ComponentId, LayoutError, Point};

use super::placeholder::LineKind;
use super::table::Table;

/// Line currently under the pointer's control
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    kind: LineKind,
    index: usize,
    pointer: Point,
}

/// Where a released line would move to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub kind: LineKind,
    pub from: usize,
    pub to: usize,
}

impl DropTarget {
    /// Whether committing would change the order
    pub fn is_move(&self) -> bool {
        self.from != self.to
    }
}

impl Table {
    /// Start dragging a line; `Ok(false)` when that kind may not be reordered
    pub fn begin_drag(
        &mut self,
        kind: LineKind,
        index: usize,
        pointer: Point,
    ) -> Result<bool, LayoutError> {
        self.placeholder(kind, index)?;
        if !self.config.allow_swap(kind) {
            return Ok(false);
        }
        self.cancel_drag();

        let line = self.placeholder_mut(kind, index)?;
        line.dragging = true;
        line.hovered = true;
        self.drag = Some(DragState {
            kind,
            index,
            pointer,
        });
        tracing::debug!(%kind, index, "drag started");
        Ok(true)
    }

    /// Center the dragged line on the pointer along its axis
    ///
    /// Returns `Ok(false)` when no drag is active.
    pub fn drag_to(&mut self, pointer: Point) -> Result<bool, LayoutError> {
        let state = match self.drag.as_mut() {
            Some(state) => {
                state.pointer = pointer;
                *state
            }
            None => return Ok(false),
        };

        let id = self.placeholder(state.kind, state.index)?.id;
        let resolved = self
            .layout
            .resolved_bounds(id)
            .ok_or(LayoutError::UnknownComponent { id })?;
        let axis = state.kind.axis();
        let delta = pointer.along(axis) - resolved.center().along(axis);
        let shift = match axis {
            Axis::Horizontal => Point::new(delta, 0.0),
            Axis::Vertical => Point::new(0.0, delta),
        };

        self.layout.displace(id, shift)?;
        for cell in self.line_cells(state.kind, state.index) {
            self.layout.displace(cell, shift)?;
        }
        Ok(true)
    }

    /// Stop dragging and report the slot nearest to the last pointer position
    ///
    /// Every displaced component snaps back under anchor control; nothing is
    /// reordered.
    pub fn release(&mut self) -> Option<DropTarget> {
        let state = self.drag.take()?;
        self.end_drag(state);
        let target = DropTarget {
            kind: state.kind,
            from: state.index,
            to: self.slot_at(state.kind, state.pointer).unwrap_or(state.index),
        };
        tracing::debug!(kind = %target.kind, from = target.from, to = target.to, "drag released");
        Some(target)
    }

    /// Apply a drop by moving the line into the target slot
    pub fn commit_reorder(&mut self, target: DropTarget) -> Result<(), LayoutError> {
        self.move_line(target.kind, target.from, target.to)
    }

    /// Abandon the active drag, if any
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(state) => {
                self.end_drag(state);
                true
            }
            None => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The line being dragged
    pub fn dragging(&self) -> Option<(LineKind, usize)> {
        self.drag.map(|state| (state.kind, state.index))
    }

    /// Re-center the dragged line after a relayout moved its slot
    pub(super) fn follow_pointer(&mut self) -> Result<(), LayoutError> {
        match self.drag {
            Some(state) => self.drag_to(state.pointer).map(|_| ()),
            None => Ok(()),
        }
    }

    /// A structural change arrived mid-drag: drop the drag before touching the chain
    pub(super) fn interrupt_drag(&mut self) {
        if let Some(state) = self.drag.take() {
            tracing::warn!(kind = %state.kind, index = state.index, "drag cancelled by structural change");
            self.end_drag(state);
        }
    }

    fn end_drag(&mut self, state: DragState) {
        let mut ids = self.line_cells(state.kind, state.index);
        if let Ok(line) = self.placeholder_mut(state.kind, state.index) {
            line.dragging = false;
            line.hovered = false;
            ids.push(line.id);
        }
        for id in ids {
            if let Err(err) = self.layout.clear_displacement(id) {
                tracing::warn!(%err, "failed to clear drag displacement");
            }
        }
    }

    fn line_cells(&self, kind: LineKind, index: usize) -> Vec<ComponentId> {
        match kind {
            LineKind::Column => self
                .cells
                .get(index)
                .map(|column| column.iter().map(|cell| cell.id).collect())
                .unwrap_or_default(),
            LineKind::Row => self
                .cells
                .iter()
                .filter_map(|column| column.get(index))
                .map(|cell| cell.id)
                .collect(),
        }
    }

    /// Index of the line whose resolved center is nearest to `pointer`
    fn slot_at(&self, kind: LineKind, pointer: Point) -> Option<usize> {
        let axis = kind.axis();
        let target = pointer.along(axis);
        self.lines(kind)
            .iter()
            .filter_map(|line| {
                self.layout
                    .resolved_bounds(line.id)
                    .map(|b| (line.index, (b.center().along(axis) - target).abs()))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
