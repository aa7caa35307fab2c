//! The table: a grid of cells chained through column and row placeholders
//!
//! Placeholders live in dense vectors and their anchors are derived from their
//! position: column 0 hangs off the container's north-west corner, column `i`
//! follows column `i - 1`, row 0 hangs below column 0 and row `i` follows row
//! `i - 1`. Every cell is centered on its column's and row's placeholders.
//! Structural edits splice the vectors, renumber, and re-derive the anchors of
//! the slots whose predecessor changed.

use std::fmt;

use crate::layout::{
    Anchor, AxisConstraint, Bounds, ComponentId, Constraint, LayoutContainer, LayoutError,
    Paintable, Point, Reference, Scalable, ScalePolicy, Size, Style,
};
use crate::renderer::Painter;

use super::cell::{Cell, CellKind};
use super::config::{GridConfig, GridShape};
use super::drag::DragState;
use super::measure::{MonospaceMeasure, TextMeasure};
use super::placeholder::{LineKind, Placeholder};

/// A structurally editable grid of cells
pub struct Table {
    pub(super) config: GridConfig,
    pub(super) layout: LayoutContainer,
    pub(super) scale: ScalePolicy,
    pub(super) measure: Box<dyn TextMeasure>,
    pub(super) columns: Vec<Placeholder>,
    pub(super) rows: Vec<Placeholder>,
    /// Indexed `[column][row]`
    pub(super) cells: Vec<Vec<Cell>>,
    pub(super) drag: Option<DragState>,
}

impl Table {
    /// Create a table of empty label cells with the default configuration
    pub fn new(columns: usize, rows: usize) -> Result<Self, LayoutError> {
        Self::from_config(GridShape::new(columns, rows), GridConfig::default())
    }

    /// Create a table whose header row holds `titles`, one column per title
    pub fn with_titles<I, S>(rows: usize, titles: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        Self::from_config(GridShape::with_titles(rows, titles), GridConfig::default())
    }

    /// Create a table from an explicit shape and configuration
    pub fn from_config(shape: GridShape, config: GridConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let column_count = shape.column_count();
        if column_count == 0 {
            return Err(LayoutError::invalid_grid(
                "a table must contain at least one column",
            ));
        }

        let mut table = Self {
            config,
            layout: LayoutContainer::default(),
            scale: ScalePolicy::default(),
            measure: Box::new(MonospaceMeasure::default()),
            columns: Vec::with_capacity(column_count),
            rows: Vec::with_capacity(shape.rows),
            cells: Vec::with_capacity(column_count),
            drag: None,
        };

        for index in 0..column_count {
            let id = table.layout.create(Size::zero());
            table
                .columns
                .push(Placeholder::new(id, LineKind::Column, index));
            table.anchor_line(LineKind::Column, index)?;
        }
        for index in 0..shape.rows {
            let id = table.layout.create(Size::zero());
            table.rows.push(Placeholder::new(id, LineKind::Row, index));
            table.anchor_line(LineKind::Row, index)?;
        }

        let row_ids: Vec<ComponentId> = table.rows.iter().map(|r| r.id).collect();
        for c in 0..column_count {
            let column_id = table.columns[c].id;
            let mut column = Vec::with_capacity(row_ids.len());
            for (r, row_id) in row_ids.iter().enumerate() {
                let text = match r {
                    0 => shape.titles.get(c).cloned().unwrap_or_default(),
                    _ => String::new(),
                };
                column.push(table.new_cell(column_id, *row_id, CellKind::Label, text)?);
            }
            table.cells.push(column);
        }

        tracing::debug!(columns = column_count, rows = shape.rows, "table created");
        table.fit_to_content()?;
        Ok(table)
    }

    /// Replace the text measurement and refit placeholders to it
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Result<Self, LayoutError> {
        self.measure = Box::new(measure);
        self.fit_to_content()?;
        Ok(self)
    }

    /// Resolve at a different scale from the start
    pub fn with_scale(mut self, policy: ScalePolicy) -> Result<Self, LayoutError> {
        self.on_scale_changed(&policy)?;
        Ok(self)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The underlying anchor layout
    pub fn layout(&self) -> &LayoutContainer {
        &self.layout
    }

    pub fn scale(&self) -> ScalePolicy {
        self.scale
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of lines of one kind
    pub fn count(&self, kind: LineKind) -> usize {
        self.lines(kind).len()
    }

    pub fn columns(&self) -> &[Placeholder] {
        &self.columns
    }

    pub fn rows(&self) -> &[Placeholder] {
        &self.rows
    }

    pub fn lines(&self, kind: LineKind) -> &[Placeholder] {
        match kind {
            LineKind::Column => &self.columns,
            LineKind::Row => &self.rows,
        }
    }

    fn lines_mut(&mut self, kind: LineKind) -> &mut Vec<Placeholder> {
        match kind {
            LineKind::Column => &mut self.columns,
            LineKind::Row => &mut self.rows,
        }
    }

    /// Placeholder of one line
    pub fn placeholder(&self, kind: LineKind, index: usize) -> Result<&Placeholder, LayoutError> {
        let lines = self.lines(kind);
        lines
            .get(index)
            .ok_or_else(|| LayoutError::index(kind.name(), index, lines.len()))
    }

    pub(super) fn placeholder_mut(
        &mut self,
        kind: LineKind,
        index: usize,
    ) -> Result<&mut Placeholder, LayoutError> {
        let lines = self.lines_mut(kind);
        let len = lines.len();
        lines
            .get_mut(index)
            .ok_or_else(|| LayoutError::index(kind.name(), index, len))
    }

    // ---------------------------------------------------------------------
    // Chain
    // ---------------------------------------------------------------------

    /// The constraint a line must carry at `index`
    fn line_constraint(&self, kind: LineKind, index: usize) -> Result<Constraint, LayoutError> {
        let spacing = self.config.spacing;
        let constraint = match (kind, index) {
            (LineKind::Column, 0) => {
                let (x, y) = self.config.origin();
                Constraint::to(
                    Reference::Container,
                    (Anchor::West, Anchor::West, x),
                    (Anchor::North, Anchor::North, y),
                )
            }
            (LineKind::Column, _) => Constraint::to(
                self.placeholder(kind, index - 1)?.id,
                (Anchor::West, Anchor::East, spacing),
                (Anchor::VerticalCenter, Anchor::VerticalCenter, 0.0),
            ),
            (LineKind::Row, 0) => Constraint::to(
                self.placeholder(LineKind::Column, 0)?.id,
                (Anchor::East, Anchor::West, -spacing / 2.0),
                (Anchor::North, Anchor::South, spacing / 2.0),
            ),
            (LineKind::Row, _) => Constraint::to(
                self.placeholder(kind, index - 1)?.id,
                (Anchor::HorizontalCenter, Anchor::HorizontalCenter, 0.0),
                (Anchor::North, Anchor::South, spacing),
            ),
        };
        Ok(constraint)
    }

    /// (Re-)anchor the line at `index` to its predecessor
    fn anchor_line(&mut self, kind: LineKind, index: usize) -> Result<(), LayoutError> {
        let id = self.placeholder(kind, index)?.id;
        let constraint = self.line_constraint(kind, index)?;
        self.layout.add_constrained(id, constraint)
    }

    fn cell_constraint(column: ComponentId, row: ComponentId) -> Constraint {
        Constraint::new(
            AxisConstraint::new(Anchor::HorizontalCenter, column, Anchor::HorizontalCenter, 0.0),
            AxisConstraint::new(Anchor::VerticalCenter, row, Anchor::VerticalCenter, 0.0),
        )
    }

    fn new_cell(
        &mut self,
        column: ComponentId,
        row: ComponentId,
        kind: CellKind,
        content: impl Into<String>,
    ) -> Result<Cell, LayoutError> {
        let id = self
            .layout
            .add(Size::zero(), Self::cell_constraint(column, row))?;
        Ok(Cell::new(id, kind, content))
    }

    fn renumber(&mut self, kind: LineKind) {
        for (index, line) in self.lines_mut(kind).iter_mut().enumerate() {
            line.index = index;
        }
    }

    /// References of each line's chain anchor, in index order
    pub fn chain(&self, kind: LineKind) -> Vec<Reference> {
        self.lines(kind)
            .iter()
            .filter_map(|line| self.layout.constraint(line.id))
            .map(|constraint| constraint.axis(kind.axis()).reference)
            .collect()
    }

    /// Verify counts, index fields, chain anchors and cell anchors
    pub fn check_integrity(&self) -> Result<(), LayoutError> {
        if self.cells.len() != self.columns.len() {
            return Err(LayoutError::invalid_grid(format!(
                "{} cell columns for {} column placeholders",
                self.cells.len(),
                self.columns.len()
            )));
        }
        for (c, column) in self.cells.iter().enumerate() {
            if column.len() != self.rows.len() {
                return Err(LayoutError::invalid_grid(format!(
                    "column {} holds {} cells for {} rows",
                    c,
                    column.len(),
                    self.rows.len()
                )));
            }
        }

        for kind in [LineKind::Column, LineKind::Row] {
            for (position, line) in self.lines(kind).iter().enumerate() {
                if line.index != position || line.kind != kind {
                    return Err(LayoutError::invalid_grid(format!(
                        "{} at position {} is numbered {} {}",
                        kind, position, line.kind, line.index
                    )));
                }
                let actual = self.layout.constraint(line.id).ok_or_else(|| {
                    LayoutError::invalid_grid(format!("{} {} is not anchored", kind, position))
                })?;
                if *actual != self.line_constraint(kind, position)? {
                    return Err(LayoutError::invalid_grid(format!(
                        "{} {} is not anchored to its predecessor",
                        kind, position
                    )));
                }
                self.check_references(actual)?;
            }
        }

        for (column, cells) in self.columns.iter().zip(&self.cells) {
            for (row, cell) in self.rows.iter().zip(cells) {
                let actual = self.layout.constraint(cell.id).ok_or_else(|| {
                    LayoutError::invalid_grid(format!(
                        "cell ({}, {}) is not anchored",
                        column.index, row.index
                    ))
                })?;
                if *actual != Self::cell_constraint(column.id, row.id) {
                    return Err(LayoutError::invalid_grid(format!(
                        "cell ({}, {}) is not centered on its placeholders",
                        column.index, row.index
                    )));
                }
                self.check_references(actual)?;
            }
        }

        let expected = self.columns.len() * (self.rows.len() + 1) + self.rows.len();
        if self.layout.len() != expected {
            return Err(LayoutError::invalid_grid(format!(
                "layout holds {} components, expected {}",
                self.layout.len(),
                expected
            )));
        }
        Ok(())
    }

    fn check_references(&self, constraint: &Constraint) -> Result<(), LayoutError> {
        match constraint.references().find(|id| !self.layout.contains(*id)) {
            Some(missing) => Err(LayoutError::unknown(missing)),
            None => Ok(()),
        }
    }

    // ---------------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------------

    /// Insert an empty column before `index` (`index == column_count()` appends)
    pub fn insert_column(&mut self, index: usize) -> Result<(), LayoutError> {
        self.insert_line(LineKind::Column, index)
    }

    /// Insert an empty row before `index` (`index == row_count()` appends)
    pub fn insert_row(&mut self, index: usize) -> Result<(), LayoutError> {
        self.insert_line(LineKind::Row, index)
    }

    /// Delete a column; `Ok(false)` when the table is already at its column floor
    pub fn delete_column(&mut self, index: usize) -> Result<bool, LayoutError> {
        self.delete_line(LineKind::Column, index)
    }

    /// Delete a row; `Ok(false)` when the table is already at its row floor
    pub fn delete_row(&mut self, index: usize) -> Result<bool, LayoutError> {
        self.delete_line(LineKind::Row, index)
    }

    pub fn swap_column(&mut self, i: usize, j: usize) -> Result<(), LayoutError> {
        self.swap_line(LineKind::Column, i, j)
    }

    pub fn swap_row(&mut self, i: usize, j: usize) -> Result<(), LayoutError> {
        self.swap_line(LineKind::Row, i, j)
    }

    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), LayoutError> {
        self.move_line(LineKind::Column, from, to)
    }

    pub fn move_row(&mut self, from: usize, to: usize) -> Result<(), LayoutError> {
        self.move_line(LineKind::Row, from, to)
    }

    pub fn insert_line(&mut self, kind: LineKind, index: usize) -> Result<(), LayoutError> {
        let count = self.count(kind);
        if index > count {
            return Err(LayoutError::insert_index(kind.name(), index, count));
        }
        self.interrupt_drag();

        let id = self.layout.create(Size::zero());
        self.lines_mut(kind)
            .insert(index, Placeholder::new(id, kind, index));
        self.renumber(kind);
        self.anchor_line(kind, index)?;
        if index + 1 < self.count(kind) {
            self.anchor_line(kind, index + 1)?;
        }
        if kind == LineKind::Column && index == 0 && !self.rows.is_empty() {
            self.anchor_line(LineKind::Row, 0)?;
        }

        let cell_kind = self.config.new_cell_kind;
        match kind {
            LineKind::Column => {
                let row_ids: Vec<ComponentId> = self.rows.iter().map(|r| r.id).collect();
                let column = row_ids
                    .into_iter()
                    .map(|row| self.new_cell(id, row, cell_kind, ""))
                    .collect::<Result<Vec<_>, _>>()?;
                self.cells.insert(index, column);
            }
            LineKind::Row => {
                let column_ids: Vec<ComponentId> = self.columns.iter().map(|c| c.id).collect();
                let row = column_ids
                    .into_iter()
                    .map(|column| self.new_cell(column, id, cell_kind, ""))
                    .collect::<Result<Vec<_>, _>>()?;
                for (column, cell) in self.cells.iter_mut().zip(row) {
                    column.insert(index, cell);
                }
            }
        }

        tracing::debug!(%kind, index, count = self.count(kind), "line inserted");
        self.relayout()
    }

    pub fn delete_line(&mut self, kind: LineKind, index: usize) -> Result<bool, LayoutError> {
        let count = self.count(kind);
        let floor = self.config.minimum(kind);
        if count <= floor {
            tracing::debug!(%kind, index, count, floor, "deletion at floor ignored");
            return Ok(false);
        }
        if index >= count {
            return Err(LayoutError::index(kind.name(), index, count));
        }
        self.interrupt_drag();

        let removed = self.lines_mut(kind).remove(index);
        let cells: Vec<Cell> = match kind {
            LineKind::Column => self.cells.remove(index),
            LineKind::Row => self
                .cells
                .iter_mut()
                .map(|column| column.remove(index))
                .collect(),
        };
        for cell in &cells {
            self.layout.remove(cell.id)?;
        }
        self.layout.remove(removed.id)?;

        self.renumber(kind);
        if index < self.count(kind) {
            self.anchor_line(kind, index)?;
        }
        if kind == LineKind::Column && index == 0 && !self.rows.is_empty() {
            self.anchor_line(LineKind::Row, 0)?;
        }

        tracing::debug!(%kind, index, count = self.count(kind), "line deleted");
        self.relayout()?;
        Ok(true)
    }

    /// Exchange two lines; content follows its placeholder, chain slots stay put
    pub fn swap_line(&mut self, kind: LineKind, i: usize, j: usize) -> Result<(), LayoutError> {
        self.placeholder(kind, i)?;
        self.placeholder(kind, j)?;
        if i == j {
            return Ok(());
        }
        self.interrupt_drag();
        self.exchange(kind, i, j)?;
        tracing::debug!(%kind, i, j, "lines swapped");
        self.relayout()
    }

    /// Move a line to a new position through adjacent swaps
    pub fn move_line(&mut self, kind: LineKind, from: usize, to: usize) -> Result<(), LayoutError> {
        self.placeholder(kind, from)?;
        self.placeholder(kind, to)?;
        if from == to {
            return Ok(());
        }
        self.interrupt_drag();
        let mut at = from;
        while at != to {
            let next = if to > at { at + 1 } else { at - 1 };
            self.exchange(kind, at, next)?;
            at = next;
        }
        tracing::debug!(%kind, from, to, "line moved");
        self.relayout()
    }

    fn exchange(&mut self, kind: LineKind, i: usize, j: usize) -> Result<(), LayoutError> {
        self.lines_mut(kind).swap(i, j);
        match kind {
            LineKind::Column => self.cells.swap(i, j),
            LineKind::Row => {
                for column in &mut self.cells {
                    column.swap(i, j);
                }
            }
        }
        self.renumber(kind);

        let mut slots = vec![i, i + 1, j, j + 1];
        slots.sort_unstable();
        slots.dedup();
        for slot in slots {
            if slot < self.count(kind) {
                self.anchor_line(kind, slot)?;
            }
        }
        if kind == LineKind::Column && (i == 0 || j == 0) && !self.rows.is_empty() {
            self.anchor_line(LineKind::Row, 0)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Cells
    // ---------------------------------------------------------------------

    fn check_cell(&self, column: usize, row: usize) -> Result<(), LayoutError> {
        self.placeholder(LineKind::Column, column)?;
        self.placeholder(LineKind::Row, row)?;
        Ok(())
    }

    /// The cell at `(column, row)`
    pub fn cell_at(&self, column: usize, row: usize) -> Result<&Cell, LayoutError> {
        self.check_cell(column, row)?;
        self.cells
            .get(column)
            .and_then(|cells| cells.get(row))
            .ok_or_else(|| LayoutError::invalid_grid(format!("no cell at ({}, {})", column, row)))
    }

    fn cell_mut(&mut self, column: usize, row: usize) -> Result<&mut Cell, LayoutError> {
        self.check_cell(column, row)?;
        self.cells
            .get_mut(column)
            .and_then(|cells| cells.get_mut(row))
            .ok_or_else(|| LayoutError::invalid_grid(format!("no cell at ({}, {})", column, row)))
    }

    /// Text of one cell
    pub fn cell(&self, column: usize, row: usize) -> Result<&str, LayoutError> {
        self.cell_at(column, row).map(Cell::content)
    }

    /// Replace the text of one cell
    ///
    /// The cell is resized to its content; placeholders keep their size until
    /// [`fit_to_content`](Self::fit_to_content).
    pub fn set_cell(
        &mut self,
        column: usize,
        row: usize,
        content: impl Into<String>,
    ) -> Result<(), LayoutError> {
        self.cell_mut(column, row)?.content = content.into();
        self.relayout()
    }

    pub fn cell_kind(&self, column: usize, row: usize) -> Result<CellKind, LayoutError> {
        self.cell_at(column, row).map(Cell::kind)
    }

    /// Change what a cell is drawn as, optionally keeping its text
    pub fn set_cell_kind(
        &mut self,
        column: usize,
        row: usize,
        preserve_text: bool,
        kind: CellKind,
    ) -> Result<(), LayoutError> {
        self.retype(column, row, preserve_text, kind)?;
        self.relayout()
    }

    pub fn set_column_kind(
        &mut self,
        column: usize,
        preserve_text: bool,
        kind: CellKind,
    ) -> Result<(), LayoutError> {
        self.placeholder(LineKind::Column, column)?;
        for row in 0..self.rows.len() {
            self.retype(column, row, preserve_text, kind)?;
        }
        self.relayout()
    }

    pub fn set_row_kind(
        &mut self,
        row: usize,
        preserve_text: bool,
        kind: CellKind,
    ) -> Result<(), LayoutError> {
        self.placeholder(LineKind::Row, row)?;
        for column in 0..self.columns.len() {
            self.retype(column, row, preserve_text, kind)?;
        }
        self.relayout()
    }

    pub fn set_table_kind(&mut self, preserve_text: bool, kind: CellKind) -> Result<(), LayoutError> {
        for cell in self.cells.iter_mut().flatten() {
            cell.kind = kind;
            if !preserve_text {
                cell.content.clear();
            }
        }
        self.relayout()
    }

    fn retype(
        &mut self,
        column: usize,
        row: usize,
        preserve_text: bool,
        kind: CellKind,
    ) -> Result<(), LayoutError> {
        let cell = self.cell_mut(column, row)?;
        cell.kind = kind;
        if !preserve_text {
            cell.content.clear();
        }
        Ok(())
    }

    /// Put the same text in every cell
    pub fn fill(&mut self, content: &str) -> Result<(), LayoutError> {
        for cell in self.cells.iter_mut().flatten() {
            cell.content = content.to_string();
        }
        self.relayout()
    }

    /// Set cell texts from a `[column][row]` matrix anchored at the top-left cell
    pub fn set_contents<S: AsRef<str>>(&mut self, contents: &[Vec<S>]) -> Result<(), LayoutError> {
        let first = contents
            .first()
            .ok_or_else(|| LayoutError::invalid_grid("contents need at least one column"))?;
        if first.is_empty() {
            return Err(LayoutError::invalid_grid("contents need at least one row"));
        }
        if contents.len() > self.columns.len() {
            return Err(LayoutError::invalid_grid(format!(
                "{} columns of content cannot fit a table of {}",
                contents.len(),
                self.columns.len()
            )));
        }
        if let Some(tall) = contents.iter().find(|c| c.len() > self.rows.len()) {
            return Err(LayoutError::invalid_grid(format!(
                "{} rows of content cannot fit a table of {}",
                tall.len(),
                self.rows.len()
            )));
        }

        for (cells, texts) in self.cells.iter_mut().zip(contents) {
            for (cell, text) in cells.iter_mut().zip(texts) {
                cell.content = text.as_ref().to_string();
            }
        }
        self.relayout()
    }

    /// All cell texts as a `[column][row]` matrix
    pub fn contents(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|column| column.iter().map(|c| c.content.clone()).collect())
            .collect()
    }

    // ---------------------------------------------------------------------
    // Options
    // ---------------------------------------------------------------------

    pub fn set_allow_add_columns(&mut self, allow: bool) -> Result<(), LayoutError> {
        self.config.allow_add_columns = allow;
        self.reanchor_origin()
    }

    pub fn set_allow_add_rows(&mut self, allow: bool) -> Result<(), LayoutError> {
        self.config.allow_add_rows = allow;
        self.reanchor_origin()
    }

    pub fn set_allow_swap_columns(&mut self, allow: bool) -> Result<(), LayoutError> {
        self.config.allow_swap_columns = allow;
        self.reanchor_origin()
    }

    pub fn set_allow_swap_rows(&mut self, allow: bool) -> Result<(), LayoutError> {
        self.config.allow_swap_rows = allow;
        self.reanchor_origin()
    }

    pub fn set_accent_head(&mut self, accent: bool) -> Result<(), LayoutError> {
        self.config.accent_head = accent;
        self.relayout()
    }

    /// Margins changed: move column 0 and drop drag state the new flags forbid
    fn reanchor_origin(&mut self) -> Result<(), LayoutError> {
        if let Some((kind, _)) = self.dragging() {
            if !self.config.allow_swap(kind) {
                self.interrupt_drag();
            }
        }
        for kind in [LineKind::Column, LineKind::Row] {
            if !self.config.allow_swap(kind) {
                for line in self.lines_mut(kind) {
                    line.hovered = false;
                }
            }
        }
        self.anchor_line(LineKind::Column, 0)?;
        self.relayout()
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    /// Size every placeholder to the largest cell on its line
    pub fn fit_to_content(&mut self) -> Result<(), LayoutError> {
        let measure = self.measure.as_ref();
        for (column, cells) in self.columns.iter_mut().zip(&self.cells) {
            column.extent = cells
                .iter()
                .map(|cell| cell.content_size(measure).width)
                .fold(0.0, f64::max);
        }
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.extent = self
                .cells
                .iter()
                .filter_map(|column| column.get(r))
                .map(|cell| cell.content_size(measure).height)
                .fold(0.0, f64::max);
        }
        self.relayout()
    }

    /// Push declared sizes into the layout and re-resolve
    fn relayout(&mut self) -> Result<(), LayoutError> {
        let config = &self.config;
        for line in self.columns.iter().chain(&self.rows) {
            self.layout
                .set_declared_size(line.id, line.declared_size(config))?;
        }

        let inset = config.control_button_width / 2.0;
        let measure = self.measure.as_ref();
        for (column, cells) in self.columns.iter().zip(self.cells.iter_mut()) {
            let width = column.declared_size(config).width;
            for (row, cell) in self.rows.iter().zip(cells.iter_mut()) {
                let slot = Size::new(width, row.declared_size(config).height);
                cell.restyle(row.index == 0, config.accent_head);
                self.layout
                    .set_declared_size(cell.id, cell.declared_size(measure, slot, inset))?;
            }
        }

        let size = self.preferred_size_from_lines();
        self.layout.set_size(size);
        self.resolve()?;
        self.follow_pointer()
    }

    fn preferred_size_from_lines(&self) -> Size {
        let spacing = self.config.spacing;
        let width = self
            .columns
            .iter()
            .map(|c| c.declared_size(&self.config).width + spacing)
            .sum::<f64>();
        let height = self
            .rows
            .iter()
            .map(|r| r.declared_size(&self.config).height + spacing)
            .sum::<f64>();
        Size::new(self.config.extra_x() + width, self.config.extra_y() + height)
    }

    /// Re-resolve the layout at the current scale
    pub fn resolve(&mut self) -> Result<(), LayoutError> {
        self.layout.resolve(&self.scale)
    }

    /// Rescale and re-resolve in one step
    pub fn set_scale(&mut self, factor: f64) -> Result<(), LayoutError> {
        let policy = ScalePolicy::with_factor(factor)?;
        self.on_scale_changed(&policy)
    }

    /// Unscaled size of the whole table
    pub fn preferred_size(&self) -> Size {
        self.layout.size()
    }

    /// Scaled bounds of the whole table
    pub fn bounds(&self) -> Bounds {
        self.layout.container_bounds()
    }

    pub fn cell_bounds(&self, column: usize, row: usize) -> Result<Bounds, LayoutError> {
        let id = self.cell_at(column, row)?.id;
        self.painted_bounds(id)
    }

    pub fn placeholder_bounds(&self, kind: LineKind, index: usize) -> Result<Bounds, LayoutError> {
        let id = self.placeholder(kind, index)?.id;
        self.painted_bounds(id)
    }

    fn painted_bounds(&self, id: ComponentId) -> Result<Bounds, LayoutError> {
        self.layout
            .bounds(id)
            .ok_or_else(|| LayoutError::invalid_grid(format!("component {} is unresolved", id)))
    }

    // ---------------------------------------------------------------------
    // Painting and pointer input
    // ---------------------------------------------------------------------

    /// Paint from cached bounds: header band, placeholders, cells, grid lines, border
    pub fn paint(&self, painter: &mut dyn Painter) {
        let factor = self.scale.factor();
        let outer = self.layout.container_bounds();
        let first = match self
            .columns
            .first()
            .and_then(|c| self.layout.resolved_bounds(c.id))
        {
            Some(bounds) => bounds,
            None => return,
        };

        let half = self.config.spacing * factor / 2.0;
        let left = first.x - half;
        let top = first.y
            + if self.config.allow_swap_columns {
                self.config.swap_handle_length * factor
            } else {
                0.0
            };
        let border = self.config.border_width * factor;
        let right = outer.width - border;
        let bottom = outer.height - border;
        let frame_width = right - left;

        if self.config.accent_head {
            if let Some(head) = self.rows.first() {
                let height = (head.declared_size(&self.config).height + self.config.spacing) * factor;
                let accent = Style::new().with_class("accent");
                painter.fill_rect(Bounds::new(left, top, frame_width, height), &accent);
            }
        }

        for line in self.columns.iter().chain(&self.rows) {
            if let Some(bounds) = self.layout.bounds(line.id) {
                line.paint(bounds, painter);
            }
        }
        for cell in self.cells.iter().flatten() {
            if let Some(bounds) = self.layout.bounds(cell.id) {
                cell.paint(bounds, painter);
            }
        }

        let stroke = Style::new().with_stroke_width(border);
        let grid_line = stroke.clone().with_class("grid-line");
        for column in self.columns.iter().skip(1) {
            if let Some(bounds) = self.layout.resolved_bounds(column.id) {
                let x = bounds.x - half;
                painter.line(Point::new(x, top), Point::new(x, bottom), &grid_line);
            }
        }
        for row in self.rows.iter().skip(1) {
            if let Some(bounds) = self.layout.resolved_bounds(row.id) {
                let y = bounds.y - half;
                painter.line(Point::new(left, y), Point::new(right, y), &grid_line);
            }
        }

        let frame = Bounds::new(left, top, frame_width, bottom - top);
        painter.stroke_rect(frame, &stroke.with_class("border"));
    }

    /// The placeholder under `point`, columns first
    pub fn hit_test(&self, point: Point) -> Option<(LineKind, usize)> {
        [LineKind::Column, LineKind::Row]
            .into_iter()
            .flat_map(|kind| self.lines(kind).iter())
            .find(|line| {
                self.layout
                    .bounds(line.id)
                    .map(|b| b.width > 0.0 && b.height > 0.0 && b.contains(point))
                    .unwrap_or(false)
            })
            .map(|line| (line.kind, line.index))
    }

    /// Pointer entered or left a placeholder
    ///
    /// Only draggable lines show as hovered, and a line being dragged stays
    /// hovered until released.
    pub fn set_hovered(
        &mut self,
        kind: LineKind,
        index: usize,
        hovered: bool,
    ) -> Result<(), LayoutError> {
        let allow = self.config.allow_swap(kind);
        let line = self.placeholder_mut(kind, index)?;
        if hovered {
            line.hovered = allow;
        } else if !line.dragging {
            line.hovered = false;
        }
        Ok(())
    }
}

impl Scalable for Table {
    fn on_scale_changed(&mut self, policy: &ScalePolicy) -> Result<(), LayoutError> {
        self.interrupt_drag();
        self.layout.resolve(policy)?;
        self.scale = *policy;
        Ok(())
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("config", &self.config)
            .field("scale", &self.scale)
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("cells", &self.cells)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

/// Resolved geometry dump: table, placeholders, then cells in `[column][row]` order
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "table {}", self.bounds())?;
        for line in self.columns.iter().chain(&self.rows) {
            match self.layout.bounds(line.id) {
                Some(bounds) => writeln!(f, "{} {} {}", line.kind, line.index, bounds)?,
                None => writeln!(f, "{} {} unresolved", line.kind, line.index)?,
            }
        }
        for (c, column) in self.cells.iter().enumerate() {
            for (r, cell) in column.iter().enumerate() {
                match self.layout.bounds(cell.id) {
                    Some(bounds) => writeln!(f, "cell {},{} {:?} {}", c, r, cell.content, bounds)?,
                    None => writeln!(f, "cell {},{} {:?} unresolved", c, r, cell.content)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{PaintOp, RecordingPainter};

    fn contents(table: &Table) -> Vec<Vec<String>> {
        table.contents()
    }

    fn labelled(columns: usize, rows: usize) -> Table {
        let mut table = Table::new(columns, rows).unwrap();
        for c in 0..columns {
            for r in 0..rows {
                table.set_cell(c, r, format!("{}{}", c, r)).unwrap();
            }
        }
        table
    }

    #[test]
    fn test_zero_columns_rejected() {
        assert!(matches!(
            Table::new(0, 2),
            Err(LayoutError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_initial_geometry() {
        let table = Table::new(2, 2).unwrap();
        // empty cells: columns are 2*14 + 14 wide, rows 2*14 tall
        assert_eq!(table.preferred_size(), Size::new(24.0 + 2.0 * 43.0, 24.0 + 2.0 * 29.0));

        let col0 = table.placeholder_bounds(LineKind::Column, 0).unwrap();
        assert_eq!(col0, Bounds::new(24.5, 14.0, 42.0, 10.0));
        let col1 = table.placeholder_bounds(LineKind::Column, 1).unwrap();
        assert_eq!(col1, Bounds::new(67.5, 14.0, 42.0, 10.0));

        let row0 = table.placeholder_bounds(LineKind::Row, 0).unwrap();
        assert_eq!(row0, Bounds::new(14.0, 24.5, 10.0, 28.0));
        let row1 = table.placeholder_bounds(LineKind::Row, 1).unwrap();
        assert_eq!(row1, Bounds::new(14.0, 53.5, 10.0, 28.0));
        table.check_integrity().unwrap();
    }

    #[test]
    fn test_cells_center_on_placeholders() {
        let mut table = Table::new(2, 2).unwrap();
        table.set_cell(1, 1, "ab").unwrap();
        let cell = table.cell_bounds(1, 1).unwrap();
        let column = table.placeholder_bounds(LineKind::Column, 1).unwrap();
        let row = table.placeholder_bounds(LineKind::Row, 1).unwrap();
        assert_eq!(cell.center().x, column.center().x);
        assert_eq!(cell.center().y, row.center().y);
        assert_eq!(cell.size(), Size::new(14.0, 14.0));
    }

    #[test]
    fn test_titles_fill_header_and_size_columns() {
        let table = Table::with_titles(3, ["Name", "A much longer title"]).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(0, 0).unwrap(), "Name");
        assert_eq!(table.cell(1, 0).unwrap(), "A much longer title");
        assert_eq!(table.columns()[1].extent(), 19.0 * 7.0);
        assert!(table.cell_at(0, 0).unwrap().style().bold);
        assert!(!table.cell_at(0, 1).unwrap().style().bold);
    }

    #[test]
    fn test_insert_column_in_middle() {
        let mut table = labelled(2, 2);
        table.insert_column(1).unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell(1, 0).unwrap(), "");
        assert_eq!(table.cell(1, 1).unwrap(), "");
        assert_eq!(table.cell(2, 1).unwrap(), "11");
        assert_eq!(table.columns()[2].index(), 2);
        table.check_integrity().unwrap();
    }

    #[test]
    fn test_insert_column_at_front_reanchors_rows() {
        let mut table = labelled(2, 2);
        let before = table.placeholder_bounds(LineKind::Row, 0).unwrap();
        table.insert_column(0).unwrap();
        table.check_integrity().unwrap();
        assert_eq!(
            table.chain(LineKind::Row)[0],
            Reference::Component(table.columns()[0].id())
        );
        assert_eq!(table.chain(LineKind::Column)[0], Reference::Container);
        assert_eq!(table.placeholder_bounds(LineKind::Row, 0).unwrap(), before);
        assert_eq!(table.cell(1, 0).unwrap(), "00");
    }

    #[test]
    fn test_insert_out_of_range_is_rejected_without_change() {
        let mut table = labelled(2, 2);
        let err = table.insert_column(3).unwrap_err();
        assert_eq!(
            err,
            LayoutError::IndexOutOfRange {
                what: "column",
                index: 3,
                valid: "0..=2".to_string()
            }
        );
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.layout().len(), 2 * 3 + 2);
    }

    #[test]
    fn test_append_row_uses_new_cell_kind() {
        let config = GridConfig::new().with_new_cell_kind(CellKind::TextField);
        let mut table = Table::from_config(GridShape::new(2, 2), config).unwrap();
        table.insert_row(2).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell_kind(0, 2).unwrap(), CellKind::TextField);
        assert_eq!(table.cell_kind(0, 1).unwrap(), CellKind::Label);
        table.check_integrity().unwrap();
    }

    #[test]
    fn test_delete_column_repoints_successor() {
        let mut table = labelled(3, 2);
        assert!(table.delete_column(1).unwrap());
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(1, 0).unwrap(), "20");
        assert_eq!(
            table.chain(LineKind::Column),
            vec![
                Reference::Container,
                Reference::Component(table.columns()[0].id())
            ]
        );
        table.check_integrity().unwrap();
    }

    #[test]
    fn test_delete_first_column_anchors_successor_to_container() {
        let mut table = labelled(3, 2);
        let origin = table.placeholder_bounds(LineKind::Column, 0).unwrap();
        assert!(table.delete_column(0).unwrap());
        table.check_integrity().unwrap();
        assert_eq!(table.cell(0, 1).unwrap(), "11");
        let new_origin = table.placeholder_bounds(LineKind::Column, 0).unwrap();
        assert_eq!((new_origin.x, new_origin.y), (origin.x, origin.y));
    }

    #[test]
    fn test_delete_at_floor_is_silent() {
        let mut table = Table::new(1, 2).unwrap();
        assert_eq!(table.delete_column(0), Ok(false));
        // floor is checked before the range
        assert_eq!(table.delete_column(9), Ok(false));
        assert_eq!(table.delete_row(0), Ok(false));
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_delete_out_of_range_above_floor() {
        let mut table = Table::new(3, 3).unwrap();
        assert!(matches!(
            table.delete_row(3),
            Err(LayoutError::IndexOutOfRange { what: "row", .. })
        ));
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_delete_header_row_promotes_next() {
        let mut table = labelled(2, 3);
        assert!(table.delete_row(0).unwrap());
        table.check_integrity().unwrap();
        assert_eq!(table.cell(0, 0).unwrap(), "01");
        assert!(table.cell_at(0, 0).unwrap().style().bold);
    }

    #[test]
    fn test_swap_columns_moves_content_not_slots() {
        let mut table = labelled(3, 2);
        let slots: Vec<Bounds> = (0..3)
            .map(|c| table.placeholder_bounds(LineKind::Column, c).unwrap())
            .collect();
        table.swap_column(0, 2).unwrap();
        table.check_integrity().unwrap();
        assert_eq!(table.cell(0, 1).unwrap(), "21");
        assert_eq!(table.cell(2, 1).unwrap(), "01");
        assert_eq!(table.cell(1, 1).unwrap(), "11");
        for (c, slot) in slots.iter().enumerate() {
            assert_eq!(table.placeholder_bounds(LineKind::Column, c).unwrap().x, slot.x);
        }
    }

    #[test]
    fn test_swap_adjacent_rows() {
        let mut table = labelled(2, 3);
        table.swap_row(1, 2).unwrap();
        table.check_integrity().unwrap();
        assert_eq!(table.cell(0, 1).unwrap(), "02");
        assert_eq!(table.cell(0, 2).unwrap(), "01");
    }

    #[test]
    fn test_swap_same_index_is_noop() {
        let mut table = labelled(2, 2);
        table.swap_column(1, 1).unwrap();
        assert_eq!(table.cell(1, 1).unwrap(), "11");
        assert!(table.swap_column(0, 2).is_err());
    }

    #[test]
    fn test_move_column() {
        let mut table = labelled(4, 2);
        table.move_column(0, 3).unwrap();
        table.check_integrity().unwrap();
        let header: Vec<String> = (0..4).map(|c| table.cell(c, 0).unwrap().to_string()).collect();
        assert_eq!(header, vec!["10", "20", "30", "00"]);
        table.move_column(3, 0).unwrap();
        assert_eq!(table.cell(0, 0).unwrap(), "00");
    }

    #[test]
    fn test_set_cell_kind_preserving_text() {
        let mut table = labelled(2, 2);
        table.set_cell_kind(1, 1, true, CellKind::TextField).unwrap();
        assert_eq!(table.cell(1, 1).unwrap(), "11");
        assert_eq!(table.cell_kind(1, 1).unwrap(), CellKind::TextField);
        table.set_column_kind(0, false, CellKind::TextField).unwrap();
        assert_eq!(table.cell(0, 1).unwrap(), "");
        table.set_row_kind(0, true, CellKind::Label).unwrap();
        assert_eq!(table.cell_kind(0, 0).unwrap(), CellKind::Label);
        table.set_table_kind(true, CellKind::Label).unwrap();
        assert_eq!(table.cell_kind(1, 1).unwrap(), CellKind::Label);
        assert_eq!(table.cell(1, 1).unwrap(), "11");
    }

    #[test]
    fn test_text_field_fills_its_slot() {
        let mut table = Table::new(1, 2).unwrap();
        table.set_cell_kind(0, 1, true, CellKind::TextField).unwrap();
        let cell = table.cell_bounds(0, 1).unwrap();
        assert_eq!(cell.size(), Size::new(42.0 - 7.0, 28.0 - 7.0));
    }

    #[test]
    fn test_set_contents_validation() {
        let mut table = Table::new(2, 2).unwrap();
        let empty: Vec<Vec<&str>> = vec![];
        assert!(table.set_contents(&empty).is_err());
        assert!(table.set_contents(&[Vec::<&str>::new()]).is_err());
        assert!(table.set_contents(&[vec!["a"], vec!["b"], vec!["c"]]).is_err());
        assert!(table.set_contents(&[vec!["a", "b", "c"]]).is_err());

        table.set_contents(&[vec!["a", "b"], vec!["c"]]).unwrap();
        assert_eq!(
            contents(&table),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), String::new()]
            ]
        );
        table.fill("x").unwrap();
        assert!(contents(&table).iter().flatten().all(|t| t == "x"));
    }

    #[test]
    fn test_cell_access_out_of_range() {
        let table = Table::new(2, 2).unwrap();
        assert!(matches!(
            table.cell(2, 0),
            Err(LayoutError::IndexOutOfRange { what: "column", .. })
        ));
        assert!(matches!(
            table.cell(0, 2),
            Err(LayoutError::IndexOutOfRange { what: "row", .. })
        ));
    }

    #[test]
    fn test_fit_to_content_is_explicit() {
        let mut table = Table::new(1, 2).unwrap();
        table.set_cell(0, 1, "a fairly long line of text").unwrap();
        assert_eq!(table.columns()[0].extent(), 0.0);
        table.fit_to_content().unwrap();
        assert_eq!(table.columns()[0].extent(), 26.0 * 7.0);
        assert_eq!(table.preferred_size().width, 24.0 + 26.0 * 7.0 + 14.0 + 1.0);
    }

    #[test]
    fn test_disabling_controls_shrinks_margins() {
        let mut table = Table::new(1, 2).unwrap();
        table.set_allow_add_rows(false).unwrap();
        table.set_allow_swap_rows(false).unwrap();
        table.set_allow_add_columns(false).unwrap();
        table.set_allow_swap_columns(false).unwrap();
        table.check_integrity().unwrap();
        assert_eq!(
            table.placeholder_bounds(LineKind::Column, 0).unwrap(),
            Bounds::new(0.0, 0.0, 42.0, 0.0)
        );
        assert_eq!(table.preferred_size(), Size::new(43.0, 58.0));
    }

    #[test]
    fn test_scale_doubles_geometry() {
        let mut table = labelled(2, 2);
        let before = table.cell_bounds(1, 1).unwrap();
        table.set_scale(2.0).unwrap();
        let after = table.cell_bounds(1, 1).unwrap();
        assert_eq!(after.x, before.x * 2.0);
        assert_eq!(after.width, before.width * 2.0);
        table.set_scale(1.0).unwrap();
        assert_eq!(table.cell_bounds(1, 1).unwrap(), before);
        assert!(table.set_scale(3.0).is_err());
        assert_eq!(table.scale().factor(), 1.0);
    }

    #[test]
    fn test_hit_test_and_hover() {
        let mut table = Table::new(2, 2).unwrap();
        assert_eq!(table.hit_test(Point::new(30.0, 20.0)), Some((LineKind::Column, 0)));
        assert_eq!(table.hit_test(Point::new(20.0, 60.0)), Some((LineKind::Row, 1)));
        assert_eq!(table.hit_test(Point::new(1.0, 1.0)), None);

        table.set_hovered(LineKind::Column, 1, true).unwrap();
        assert!(table.columns()[1].is_hovered());
        table.set_allow_swap_columns(false).unwrap();
        assert!(!table.columns()[1].is_hovered());
        table.set_hovered(LineKind::Column, 1, true).unwrap();
        assert!(!table.columns()[1].is_hovered());
    }

    #[test]
    fn test_paint_order() {
        let mut table = labelled(2, 2);
        table.set_cell(0, 0, "").unwrap();
        let mut painter = RecordingPainter::new();
        table.paint(&mut painter);

        // accent band first, outer border last
        assert!(matches!(painter.ops.first(), Some(PaintOp::Fill(_))));
        assert!(matches!(painter.ops.last(), Some(PaintOp::Stroke(_))));
        assert_eq!(painter.texts(), vec!["01", "10", "11"]);
        let lines = painter
            .ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Line(..)))
            .count();
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_display_dump() {
        let table = Table::new(1, 2).unwrap();
        let dump = table.to_string();
        assert!(dump.starts_with("table x=0 y=0 w=67 h=82\n"));
        assert!(dump.contains("column 0 x=24.5 y=14 w=42 h=10\n"));
        assert!(dump.contains("cell 0,1 \"\" x=45.5 y=60.5 w=0 h=14\n"));
    }
}
