//! Grid model: a table of cells whose columns and rows are anchor chains
//!
//! Each column and row is represented by a [`Placeholder`] registered in the
//! table's [`LayoutContainer`](crate::layout::LayoutContainer); cells are
//! centered on one column and one row placeholder. Inserting, deleting and
//! swapping lines re-points only the anchors next to the edit.

pub mod cell;
pub mod config;
pub mod drag;
pub mod measure;
pub mod placeholder;
pub mod table;

pub use cell::{Cell, CellKind};
pub use config::{GridConfig, GridShape};
pub use drag::DropTarget;
pub use measure::{MonospaceMeasure, TextMeasure};
pub use placeholder::{LineKind, Placeholder};
pub use table::Table;
