//! Error types for the layout engine

use thiserror::Error;

use super::anchor::{Anchor, Axis};
use super::types::ComponentId;

/// Configuration errors raised by the layout engine and the grid model
///
/// Every variant is reported synchronously by the call that introduced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Reference to a component not registered in this container
    #[error("component {id} is not registered in this container")]
    UnknownComponent { id: ComponentId },

    /// Circular dependency between constraints on one axis
    #[error("circular constraint on {axis} axis: {}", format_cycle(.cycle))]
    CircularConstraint { axis: Axis, cycle: Vec<ComponentId> },

    /// An anchor used on the wrong axis
    #[error("anchor '{anchor}' cannot be used on the {axis} axis (valid anchors: {valid_anchors})")]
    InvalidAnchor {
        anchor: Anchor,
        axis: Axis,
        valid_anchors: String,
    },

    /// Scale factor outside the supported range
    #[error("scale factor {factor} outside range [{min}, {max}]")]
    ScaleOutOfRange { factor: f64, min: f64, max: f64 },

    /// Column, row or cell index outside the valid range
    #[error("{what} index {index} out of range (valid: {valid})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        valid: String,
    },

    /// Invalid grid shape or content
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// Invalid value for a bounded input
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
}

impl LayoutError {
    /// Create an unknown component error
    pub fn unknown(id: ComponentId) -> Self {
        Self::UnknownComponent { id }
    }

    /// Create a circular constraint error
    pub fn circular(axis: Axis, cycle: Vec<ComponentId>) -> Self {
        Self::CircularConstraint { axis, cycle }
    }

    /// Create an invalid anchor error
    pub fn invalid_anchor(anchor: Anchor, axis: Axis) -> Self {
        Self::InvalidAnchor {
            anchor,
            axis,
            valid_anchors: Anchor::valid_for(axis)
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Index rejected for access or deletion (`[0, len)`)
    pub fn index(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what,
            index,
            valid: format!("0..{}", len),
        }
    }

    /// Index rejected for insertion (`[0, len]`)
    pub fn insert_index(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what,
            index,
            valid: format!("0..={}", len),
        }
    }

    /// Create an invalid grid error
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

fn format_cycle(cycle: &[ComponentId]) -> String {
    cycle
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
