//! Configuration for the grid editor

use serde::Deserialize;

use crate::layout::LayoutError;

use super::cell::CellKind;
use super::placeholder::LineKind;

/// Configuration options for a [`Table`](super::Table)
///
/// Deserializes from TOML with every field optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Column floor below which deletion is a silent no-op (at least 1)
    pub min_columns: usize,

    /// Row floor below which deletion is a silent no-op
    pub min_rows: usize,

    /// Gap between adjacent lines
    pub spacing: f64,

    /// Stroke width of the outer border and grid lines
    pub border_width: f64,

    /// Width of the add/delete control strip
    pub control_button_width: f64,

    /// Thickness of the drag handle strip
    pub swap_handle_length: f64,

    pub allow_add_columns: bool,
    pub allow_add_rows: bool,
    pub allow_swap_columns: bool,
    pub allow_swap_rows: bool,

    /// Paint an accent band behind the header row
    pub accent_head: bool,

    /// Kind of cell created by insertions
    pub new_cell_kind: CellKind,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_columns: 1,
            min_rows: 2,
            spacing: 1.0,
            border_width: 1.0,
            control_button_width: 14.0,
            swap_handle_length: 10.0,
            allow_add_columns: true,
            allow_add_rows: true,
            allow_swap_columns: true,
            allow_swap_rows: true,
            accent_head: true,
            new_cell_kind: CellKind::Label,
        }
    }
}

impl GridConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column and row floors
    pub fn with_minimums(mut self, columns: usize, rows: usize) -> Self {
        self.min_columns = columns;
        self.min_rows = rows;
        self
    }

    /// Set the spacing between lines
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_border_width(mut self, width: f64) -> Self {
        self.border_width = width;
        self
    }

    pub fn with_control_button_width(mut self, width: f64) -> Self {
        self.control_button_width = width;
        self
    }

    pub fn with_swap_handle_length(mut self, length: f64) -> Self {
        self.swap_handle_length = length;
        self
    }

    /// Allow or forbid adding/deleting lines of both kinds
    pub fn with_add(mut self, columns: bool, rows: bool) -> Self {
        self.allow_add_columns = columns;
        self.allow_add_rows = rows;
        self
    }

    /// Allow or forbid drag reordering of both kinds
    pub fn with_swap(mut self, columns: bool, rows: bool) -> Self {
        self.allow_swap_columns = columns;
        self.allow_swap_rows = rows;
        self
    }

    pub fn with_accent_head(mut self, accent: bool) -> Self {
        self.accent_head = accent;
        self
    }

    pub fn with_new_cell_kind(mut self, kind: CellKind) -> Self {
        self.new_cell_kind = kind;
        self
    }

    /// Reject values the layout cannot work with
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.min_columns == 0 {
            return Err(LayoutError::invalid_value(
                "min_columns must be at least 1",
            ));
        }
        for (name, value) in [
            ("spacing", self.spacing),
            ("border_width", self.border_width),
            ("control_button_width", self.control_button_width),
            ("swap_handle_length", self.swap_handle_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::invalid_value(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Deletion floor for one kind of line
    pub fn minimum(&self, kind: LineKind) -> usize {
        match kind {
            LineKind::Column => self.min_columns,
            LineKind::Row => self.min_rows,
        }
    }

    /// Whether lines of this kind can be dragged
    pub fn allow_swap(&self, kind: LineKind) -> bool {
        match kind {
            LineKind::Column => self.allow_swap_columns,
            LineKind::Row => self.allow_swap_rows,
        }
    }

    /// Horizontal margin reserved left of the grid for row controls
    pub fn extra_x(&self) -> f64 {
        self.margin(self.allow_add_rows, self.allow_swap_rows)
    }

    /// Vertical margin reserved above the grid for column controls
    pub fn extra_y(&self) -> f64 {
        self.margin(self.allow_add_columns, self.allow_swap_columns)
    }

    fn margin(&self, add: bool, swap: bool) -> f64 {
        let mut margin = 0.0;
        if add {
            margin += self.control_button_width;
        }
        if swap {
            margin += self.swap_handle_length;
        }
        margin
    }

    /// Offsets of the first column placeholder from the container's north-west corner
    pub fn origin(&self) -> (f64, f64) {
        let mut x = self.extra_x();
        let mut y = self.extra_y();
        if self.allow_add_columns {
            x += self.spacing / 2.0;
        }
        if self.allow_swap_columns {
            y -= self.swap_handle_length;
        }
        (x, y)
    }
}

/// Initial shape of a table
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
    /// Header texts; when present they also fix the column count
    pub titles: Vec<String>,
}

impl GridShape {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            titles: vec![],
        }
    }

    pub fn with_titles(rows: usize, titles: Vec<String>) -> Self {
        Self {
            columns: titles.len(),
            rows,
            titles,
        }
    }

    /// Column count, taking titles into account
    pub fn column_count(&self) -> usize {
        if self.titles.is_empty() {
            self.columns
        } else {
            self.titles.len()
        }
    }
}
