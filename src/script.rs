//! TOML layout scripts
//!
//! A script describes an initial table and a list of edits to replay on it:
//!
//! ```toml
//! scale = 1.5
//!
//! [table]
//! titles = ["Name", "Qty"]
//! rows = 3
//!
//! [config]
//! spacing = 2
//!
//! [palette]
//! accent = "#fff3e0"
//!
//! [[ops]]
//! op = "set_cell"
//! column = 0
//! row = 1
//! content = "bolts"
//!
//! [[ops]]
//! op = "swap_columns"
//! i = 0
//! j = 1
//! ```

use std::path::Path;

use serde::Deserialize;
use toml::Spanned;

use crate::error::ScriptError;
use crate::grid::{CellKind, GridConfig, GridShape, LineKind, Table};
use crate::layout::LayoutError;
use crate::renderer::Palette;

/// One edit applied to the table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    InsertColumn {
        index: usize,
    },
    DeleteColumn {
        index: usize,
    },
    InsertRow {
        index: usize,
    },
    DeleteRow {
        index: usize,
    },
    SwapColumns {
        i: usize,
        j: usize,
    },
    SwapRows {
        i: usize,
        j: usize,
    },
    SetCell {
        column: usize,
        row: usize,
        content: String,
    },
    SetCellKind {
        column: usize,
        row: usize,
        kind: CellKind,
        #[serde(default)]
        preserve_text: bool,
    },
    Scale {
        factor: f64,
    },
    /// Refit placeholders to the current cell contents
    Fit,
    /// Drag line `from` onto the slot of line `to`
    Drag {
        kind: LineKind,
        from: usize,
        to: usize,
        #[serde(default = "default_commit")]
        commit: bool,
    },
}

fn default_commit() -> bool {
    true
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::InsertColumn { .. } => "insert_column",
            Op::DeleteColumn { .. } => "delete_column",
            Op::InsertRow { .. } => "insert_row",
            Op::DeleteRow { .. } => "delete_row",
            Op::SwapColumns { .. } => "swap_columns",
            Op::SwapRows { .. } => "swap_rows",
            Op::SetCell { .. } => "set_cell",
            Op::SetCellKind { .. } => "set_cell_kind",
            Op::Scale { .. } => "scale",
            Op::Fit => "fit",
            Op::Drag { .. } => "drag",
        }
    }

    /// Apply the edit to `table`
    pub fn apply(&self, table: &mut Table) -> Result<(), LayoutError> {
        match *self {
            Op::InsertColumn { index } => table.insert_column(index),
            Op::InsertRow { index } => table.insert_row(index),
            Op::DeleteColumn { index } => refuse_at_floor(table.delete_column(index)?, self),
            Op::DeleteRow { index } => refuse_at_floor(table.delete_row(index)?, self),
            Op::SwapColumns { i, j } => table.swap_column(i, j),
            Op::SwapRows { i, j } => table.swap_row(i, j),
            Op::SetCell {
                column,
                row,
                ref content,
            } => table.set_cell(column, row, content.as_str()),
            Op::SetCellKind {
                column,
                row,
                kind,
                preserve_text,
            } => table.set_cell_kind(column, row, preserve_text, kind),
            Op::Scale { factor } => table.set_scale(factor),
            Op::Fit => table.fit_to_content(),
            Op::Drag {
                kind,
                from,
                to,
                commit,
            } => drag(table, kind, from, to, commit),
        }
    }
}

fn refuse_at_floor(deleted: bool, op: &Op) -> Result<(), LayoutError> {
    if !deleted {
        tracing::warn!(op = op.name(), "deletion refused at minimum line count");
    }
    Ok(())
}

/// Simulate a pointer drag from the center of one line to the center of another
fn drag(
    table: &mut Table,
    kind: LineKind,
    from: usize,
    to: usize,
    commit: bool,
) -> Result<(), LayoutError> {
    let start = table.placeholder_bounds(kind, from)?.center();
    let end = table.placeholder_bounds(kind, to)?.center();
    if !table.begin_drag(kind, from, start)? {
        tracing::warn!(%kind, from, "reordering disabled, drag ignored");
        return Ok(());
    }
    table.drag_to(end)?;
    match table.release() {
        Some(target) if commit && target.is_move() => table.commit_reorder(target),
        _ => Ok(()),
    }
}

/// A parsed layout script
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Script {
    /// Scale factor applied before any operation
    pub scale: Option<f64>,
    pub table: GridShape,
    pub config: GridConfig,
    /// Colours for SVG output, replacing the renderer's palette
    pub palette: Option<Palette>,
    /// Operations with the source range of their `[[ops]]` entry
    pub ops: Vec<Spanned<Op>>,
}

impl Script {
    /// Load a script from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a script from TOML source
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(source)?)
    }

    /// Build the table and replay every operation in order
    pub fn run(&self) -> Result<Table, ScriptError> {
        let mut table = Table::from_config(self.table.clone(), self.config.clone())?;
        if let Some(factor) = self.scale {
            table.set_scale(factor)?;
        }
        for (index, entry) in self.ops.iter().enumerate() {
            let op = entry.get_ref();
            tracing::debug!(index, op = op.name(), "applying operation");
            op.apply(&mut table).map_err(|err| {
                ScriptError::operation(index, op.name(), err).with_span(entry.span())
            })?;
        }
        Ok(table)
    }
}
