//! FILENAME: core/engine/src/sheet.rs
//! PURPOSE: The sheet aggregate: cell grid, axis format stores and merges.
//! CONTEXT: This file defines the `Sheet` struct, the single source of truth
//! that commands mutate. It uses a sparse storage strategy (BTreeMap keyed
//! by (row, col)) so empty cells cost nothing and iteration is row-major.
//!
//! The `*_impl` methods are building blocks: they change state directly and
//! record no undo information. Reversible edits go through `commands`.

use std::collections::{BTreeMap, VecDeque};

use crate::cell::{Cell, CellChange, CellValue};
use crate::config::{EngineConfig, DEFAULT_MAX_EVENTS};
use crate::error::{Result, SheetError};
use crate::format::CellFormat;
use crate::interval::{IntervalEdit, IntervalStore, OrderedInterval};
use crate::logging::SHEET;
use crate::merge::{CellMerge, MergeRerange, MergeStore};
use crate::region::{Axis, CellCoord, Region};
use crate::{log_debug, log_warn};

/// Notifications queued by impl-level mutations for a host to redraw from.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetEvent {
    RowInserted { index: u32 },
    RowRemoved { index: u32 },
    ColumnInserted { index: u32 },
    ColumnRemoved { index: u32 },
    CellChanged { row: u32, col: u32 },
    FormatChanged { region: Region },
    MergesChanged,
}

#[derive(Debug, Clone)]
pub struct Sheet {
    /// Sparse storage: keys are (row, col). Empty cells are never stored.
    cells: BTreeMap<CellCoord, Cell>,
    row_formats: IntervalStore<CellFormat>,
    column_formats: IntervalStore<CellFormat>,
    merges: MergeStore,
    num_rows: u32,
    num_cols: u32,
    /// Bounded: once `max_events` are queued the oldest is dropped.
    events: VecDeque<SheetEvent>,
    max_events: usize,
}

impl Sheet {
    /// Creates an empty sheet with the given dimensions.
    pub fn new(num_rows: u32, num_cols: u32) -> Self {
        Sheet {
            cells: BTreeMap::new(),
            row_formats: IntervalStore::new(),
            column_formats: IntervalStore::new(),
            merges: MergeStore::new(),
            num_rows,
            num_cols,
            events: VecDeque::new(),
            max_events: DEFAULT_MAX_EVENTS,
        }
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        let mut sheet = Sheet::new(config.initial_rows, config.initial_columns);
        sheet.set_max_events(config.max_events);
        sheet
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    /// Number of indices along `axis`.
    pub fn len(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Row => self.num_rows,
            Axis::Column => self.num_cols,
        }
    }

    // ========================================================================
    // READ SURFACE
    // ========================================================================

    /// Returns the stored cell, or None if the cell is empty.
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn get_value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.get_cell(row, col).and_then(|cell| cell.value.as_ref())
    }

    /// Per-cell format override only.
    pub fn get_cell_format(&self, row: u32, col: u32) -> Option<&CellFormat> {
        self.get_cell(row, col).and_then(|cell| cell.format.as_ref())
    }

    /// The format that applies to a cell: its own override, else the row
    /// format, else the column format.
    pub fn effective_format(&self, row: u32, col: u32) -> Option<&CellFormat> {
        self.get_cell_format(row, col)
            .or_else(|| self.row_formats.get(row).map(|i| &i.data))
            .or_else(|| self.column_formats.get(col).map(|i| &i.data))
    }

    /// Positions of stored cells inside `region`, row-major ascending.
    pub fn get_non_empty_cell_positions(&self, region: Region) -> Vec<CellCoord> {
        let Some(region) = region.clip(self.num_rows, self.num_cols) else {
            return Vec::new();
        };
        self.cells
            .range((region.start_row, region.start_col)..=(region.end_row, region.end_col))
            .filter(|(pos, cell)| {
                pos.1 >= region.start_col && pos.1 <= region.end_col && !cell.is_empty()
            })
            .map(|(&pos, _)| pos)
            .collect()
    }

    /// Number of stored (non-empty) cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn row_formats(&self) -> &IntervalStore<CellFormat> {
        &self.row_formats
    }

    pub fn column_formats(&self) -> &IntervalStore<CellFormat> {
        &self.column_formats
    }

    pub fn axis_formats(&self, axis: Axis) -> &IntervalStore<CellFormat> {
        match axis {
            Axis::Row => &self.row_formats,
            Axis::Column => &self.column_formats,
        }
    }

    /// Direct access to an axis format store. Records no undo information.
    pub fn axis_formats_mut(&mut self, axis: Axis) -> &mut IntervalStore<CellFormat> {
        match axis {
            Axis::Row => &mut self.row_formats,
            Axis::Column => &mut self.column_formats,
        }
    }

    pub fn merges(&self) -> &MergeStore {
        &self.merges
    }

    pub fn get_merge_at(&self, row: u32, col: u32) -> Option<&CellMerge> {
        self.merges.get_at(row, col)
    }

    /// The cell that edits at (row, col) land on: the merge anchor when the
    /// cell is merged, otherwise the cell itself.
    pub fn merge_anchor(&self, row: u32, col: u32) -> CellCoord {
        self.merges
            .get_at(row, col)
            .map(CellMerge::anchor)
            .unwrap_or((row, col))
    }

    /// Drains the queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<SheetEvent> {
        self.events.drain(..).collect()
    }

    /// Caps the event queue. Zero turns event recording off.
    pub fn set_max_events(&mut self, max_events: usize) {
        self.max_events = max_events;
        while self.events.len() > max_events {
            self.events.pop_front();
        }
    }

    fn emit(&mut self, event: SheetEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() == self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Grows `region` until it fully contains every merge it touches.
    pub fn expand_to_merges(&self, region: Region) -> Region {
        let mut expanded = region;
        loop {
            let grown = self
                .merges
                .get_overlapping(&expanded)
                .into_iter()
                .fold(expanded, |acc, merge| acc.union(&merge.region));
            if grown == expanded {
                return expanded;
            }
            expanded = grown;
        }
    }

    // ========================================================================
    // CELL PRIMITIVES
    // ========================================================================

    fn check_cell(&self, row: u32, col: u32) -> Result<()> {
        if row >= self.num_rows {
            return Err(SheetError::RowOutOfBounds { index: row, len: self.num_rows });
        }
        if col >= self.num_cols {
            return Err(SheetError::ColumnOutOfBounds { index: col, len: self.num_cols });
        }
        Ok(())
    }

    /// Applies `edit` to the cell at (row, col), materializing it if needed
    /// and dropping it again if it ends up empty.
    fn edit_cell(&mut self, row: u32, col: u32, edit: impl FnOnce(&mut Cell)) {
        let cell = self.cells.entry((row, col)).or_default();
        edit(cell);
        if cell.is_empty() {
            self.cells.remove(&(row, col));
        }
    }

    pub fn set_cell_value_impl(&mut self, row: u32, col: u32, value: Option<CellValue>) -> Result<()> {
        self.check_cell(row, col)?;
        self.edit_cell(row, col, |cell| cell.value = value);
        self.emit(SheetEvent::CellChanged { row, col });
        Ok(())
    }

    /// Writes every change in order (later entries win). All positions are
    /// validated first, so an out-of-bounds entry leaves the sheet untouched.
    pub fn set_cell_values_impl(&mut self, changes: &[CellChange]) -> Result<()> {
        for change in changes {
            self.check_cell(change.row, change.col)?;
        }
        for change in changes {
            self.set_cell_value_impl(change.row, change.col, change.value.clone())?;
        }
        Ok(())
    }

    /// Writes the per-cell format override; `None` removes it.
    pub fn set_cell_format(&mut self, row: u32, col: u32, format: Option<CellFormat>) -> Result<()> {
        self.check_cell(row, col)?;
        self.edit_cell(row, col, |cell| cell.format = format);
        self.emit(SheetEvent::FormatChanged { region: Region::cell(row, col) });
        Ok(())
    }

    /// Removes the cell entirely, returning what was stored.
    pub fn clear_cell_impl(&mut self, row: u32, col: u32) -> Option<Cell> {
        let removed = self.cells.remove(&(row, col));
        if removed.is_some() {
            self.emit(SheetEvent::CellChanged { row, col });
        }
        removed
    }

    // ========================================================================
    // AXIS FORMAT PRIMITIVES
    // ========================================================================

    /// Replaces whatever covers [start, end] on `axis` with `format`.
    /// The returned edit includes the new interval in `added`.
    pub fn set_axis_format_impl(
        &mut self,
        axis: Axis,
        start: u32,
        end: u32,
        format: CellFormat,
    ) -> IntervalEdit<CellFormat> {
        let interval = OrderedInterval::new(start, end, format);
        let store = self.axis_formats_mut(axis);
        let mut edit = store.clear(interval.start, interval.end);
        store.add(interval.clone());
        edit.added.push(interval);
        self.emit(SheetEvent::FormatChanged { region: axis_region(axis, start, end) });
        edit
    }

    pub fn revert_axis_format_impl(&mut self, axis: Axis, edit: &IntervalEdit<CellFormat>) {
        self.axis_formats_mut(axis).revert(edit);
        for interval in edit.removed.iter().chain(&edit.added) {
            self.emit(SheetEvent::FormatChanged {
                region: axis_region(axis, interval.start, interval.end),
            });
        }
    }

    // ========================================================================
    // MERGE PRIMITIVES
    // ========================================================================

    pub fn add_merge_impl(&mut self, region: Region) -> Result<CellMerge> {
        let merge = self.merges.add(region)?;
        self.emit(SheetEvent::MergesChanged);
        Ok(merge)
    }

    pub fn remove_merge_impl(&mut self, merge: &CellMerge) -> bool {
        let removed = self.merges.remove(merge);
        if removed {
            self.emit(SheetEvent::MergesChanged);
        }
        removed
    }

    pub fn rerange_merged_cells(&mut self, axis: Axis, index: u32, delta: i32) -> MergeRerange {
        let outcome = self.merges.rerange(axis, index, delta);
        if !outcome.is_empty() {
            self.emit(SheetEvent::MergesChanged);
        }
        outcome
    }

    pub fn undo_rerange_merged_cells(&mut self, outcome: &MergeRerange) {
        self.merges.undo_rerange(outcome);
        if !outcome.is_empty() {
            self.emit(SheetEvent::MergesChanged);
        }
    }

    // ========================================================================
    // STRUCTURAL PRIMITIVES
    // ========================================================================

    /// Removes the row at `index`: its cells are discarded and every later
    /// row moves up by one. Row formats starting after `index` move with
    /// them; intervals covering `index` are left to the caller.
    pub fn remove_row_at_impl(&mut self, index: u32) -> Result<()> {
        self.remove_at_impl(Axis::Row, index)
    }

    /// Inserts an empty row at `index` (0 ..= num_rows), moving `index` and
    /// every later row down by one.
    pub fn insert_row_at_impl(&mut self, index: u32) -> Result<()> {
        self.insert_at_impl(Axis::Row, index)
    }

    /// Inserts an empty row directly after `index`.
    pub fn insert_row_after_impl(&mut self, index: u32) -> Result<()> {
        let at = index.checked_add(1).ok_or(SheetError::RowOutOfBounds {
            index,
            len: self.num_rows,
        })?;
        self.insert_at_impl(Axis::Row, at)
    }

    pub fn remove_column_at_impl(&mut self, index: u32) -> Result<()> {
        self.remove_at_impl(Axis::Column, index)
    }

    pub fn insert_column_at_impl(&mut self, index: u32) -> Result<()> {
        self.insert_at_impl(Axis::Column, index)
    }

    pub fn insert_column_after_impl(&mut self, index: u32) -> Result<()> {
        let at = index.checked_add(1).ok_or(SheetError::ColumnOutOfBounds {
            index,
            len: self.num_cols,
        })?;
        self.insert_at_impl(Axis::Column, at)
    }

    /// Checks that `index` names an existing row/column.
    pub fn check_index(&self, axis: Axis, index: u32) -> Result<()> {
        let len = self.len(axis);
        if index < len {
            Ok(())
        } else {
            Err(out_of_bounds(axis, index, len))
        }
    }

    /// Checks that `index` is a valid insertion point (0 ..= len).
    pub fn check_insert_index(&self, axis: Axis, index: u32) -> Result<()> {
        let len = self.len(axis);
        if index <= len && len < u32::MAX {
            Ok(())
        } else {
            Err(out_of_bounds(axis, index, len))
        }
    }

    pub fn remove_at_impl(&mut self, axis: Axis, index: u32) -> Result<()> {
        if let Err(err) = self.check_index(axis, index) {
            log_warn!(SHEET, "remove_at_impl refused: {}", err);
            return Err(err);
        }

        self.remap_cells(|row, col| {
            let (along, across) = split(axis, row, col);
            if along == index {
                None
            } else if along > index {
                Some(join(axis, along - 1, across))
            } else {
                Some((row, col))
            }
        });
        if let Some(next) = index.checked_add(1) {
            self.axis_formats_mut(axis).shift_from(next, -1);
        }

        match axis {
            Axis::Row => {
                self.num_rows -= 1;
                self.emit(SheetEvent::RowRemoved { index });
            }
            Axis::Column => {
                self.num_cols -= 1;
                self.emit(SheetEvent::ColumnRemoved { index });
            }
        }
        log_debug!(SHEET, "removed {:?} {} (len now {})", axis, index, self.len(axis));
        Ok(())
    }

    pub fn insert_at_impl(&mut self, axis: Axis, index: u32) -> Result<()> {
        if let Err(err) = self.check_insert_index(axis, index) {
            log_warn!(SHEET, "insert_at_impl refused: {}", err);
            return Err(err);
        }

        self.remap_cells(|row, col| {
            let (along, across) = split(axis, row, col);
            if along >= index {
                Some(join(axis, along + 1, across))
            } else {
                Some((row, col))
            }
        });
        self.axis_formats_mut(axis).shift_from(index, 1);

        match axis {
            Axis::Row => {
                self.num_rows += 1;
                self.emit(SheetEvent::RowInserted { index });
            }
            Axis::Column => {
                self.num_cols += 1;
                self.emit(SheetEvent::ColumnInserted { index });
            }
        }
        log_debug!(SHEET, "inserted {:?} {} (len now {})", axis, index, self.len(axis));
        Ok(())
    }

    /// Rebuilds the cell map through `remap`; `None` drops the cell.
    fn remap_cells(&mut self, remap: impl Fn(u32, u32) -> Option<CellCoord>) {
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .filter_map(|((row, col), cell)| remap(row, col).map(|pos| (pos, cell)))
            .collect();
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Sheet::with_config(&EngineConfig::default())
    }
}

/// Deep equality of the model. Queued events are bookkeeping and not compared.
impl PartialEq for Sheet {
    fn eq(&self, other: &Self) -> bool {
        self.num_rows == other.num_rows
            && self.num_cols == other.num_cols
            && self.cells == other.cells
            && self.row_formats == other.row_formats
            && self.column_formats == other.column_formats
            && self.merges == other.merges
    }
}

fn out_of_bounds(axis: Axis, index: u32, len: u32) -> SheetError {
    match axis {
        Axis::Row => SheetError::RowOutOfBounds { index, len },
        Axis::Column => SheetError::ColumnOutOfBounds { index, len },
    }
}

/// (index along `axis`, index across it)
fn split(axis: Axis, row: u32, col: u32) -> (u32, u32) {
    match axis {
        Axis::Row => (row, col),
        Axis::Column => (col, row),
    }
}

fn join(axis: Axis, along: u32, across: u32) -> CellCoord {
    match axis {
        Axis::Row => (along, across),
        Axis::Column => (across, along),
    }
}

fn axis_region(axis: Axis, start: u32, end: u32) -> Region {
    match axis {
        Axis::Row => Region::new(start, 0, end, u32::MAX),
        Axis::Column => Region::new(0, start, u32::MAX, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_column_of_values() -> Sheet {
        let mut sheet = Sheet::new(5, 3);
        for row in 0..5 {
            sheet
                .set_cell_value_impl(row, 0, Some(CellValue::Number(row as f64)))
                .unwrap();
        }
        sheet
    }

    #[test]
    fn test_empty_cells_are_not_stored() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_cell_value_impl(1, 1, Some(CellValue::from("x"))).unwrap();
        assert_eq!(sheet.cell_count(), 1);

        sheet.set_cell_value_impl(1, 1, None).unwrap();
        assert_eq!(sheet.cell_count(), 0);
        assert!(sheet.get_cell(1, 1).is_none());

        sheet.set_cell_format(0, 0, Some(CellFormat::new())).unwrap();
        assert_eq!(sheet.cell_count(), 0);
    }

    #[test]
    fn test_non_empty_positions_are_row_major() {
        let mut sheet = Sheet::new(4, 4);
        sheet.set_cell_value_impl(2, 0, Some(CellValue::from(1.0))).unwrap();
        sheet.set_cell_value_impl(0, 3, Some(CellValue::from(2.0))).unwrap();
        sheet.set_cell_format(0, 1, Some(CellFormat::new().with_bold(true))).unwrap();
        sheet.set_cell_value_impl(3, 3, Some(CellValue::from(3.0))).unwrap();

        let positions = sheet.get_non_empty_cell_positions(Region::new(0, 0, 2, 3));
        assert_eq!(positions, vec![(0, 1), (0, 3), (2, 0)]);

        let row = sheet.get_non_empty_cell_positions(Region::row(0));
        assert_eq!(row, vec![(0, 1), (0, 3)]);

        let column = sheet.get_non_empty_cell_positions(Region::column(3));
        assert_eq!(column, vec![(0, 3), (3, 3)]);
    }

    #[test]
    fn test_set_cell_outside_bounds_fails() {
        let mut sheet = Sheet::new(2, 2);
        assert_eq!(
            sheet.set_cell_value_impl(2, 0, Some(CellValue::from(1.0))),
            Err(SheetError::RowOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(
            sheet.set_cell_format(0, 5, None),
            Err(SheetError::ColumnOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_set_cell_values_impl_validates_before_writing() {
        let mut sheet = Sheet::new(2, 2);
        let changes = vec![
            CellChange::new(0, 0, Some(CellValue::from(1.0))),
            CellChange::new(9, 0, Some(CellValue::from(2.0))),
        ];
        assert!(sheet.set_cell_values_impl(&changes).is_err());
        assert_eq!(sheet.cell_count(), 0);
    }

    #[test]
    fn test_remove_row_shifts_cells_up() {
        let mut sheet = sheet_with_column_of_values();
        sheet.remove_row_at_impl(1).unwrap();

        assert_eq!(sheet.num_rows(), 4);
        assert_eq!(sheet.get_value(0, 0), Some(&CellValue::Number(0.0)));
        assert_eq!(sheet.get_value(1, 0), Some(&CellValue::Number(2.0)));
        assert_eq!(sheet.get_value(3, 0), Some(&CellValue::Number(4.0)));
        assert!(sheet.get_cell(4, 0).is_none());
    }

    #[test]
    fn test_remove_row_out_of_bounds_leaves_sheet_unchanged() {
        let mut sheet = sheet_with_column_of_values();
        let before = sheet.clone();

        assert_eq!(
            sheet.remove_row_at_impl(5),
            Err(SheetError::RowOutOfBounds { index: 5, len: 5 })
        );
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_insert_row_after_creates_empty_row() {
        let mut sheet = sheet_with_column_of_values();
        sheet.insert_row_after_impl(1).unwrap();

        assert_eq!(sheet.num_rows(), 6);
        assert_eq!(sheet.get_value(1, 0), Some(&CellValue::Number(1.0)));
        assert!(sheet.get_cell(2, 0).is_none());
        assert_eq!(sheet.get_value(3, 0), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_structural_edits_shift_later_axis_formats() {
        let mut sheet = Sheet::new(10, 2);
        let bold = CellFormat::new().with_bold(true);
        sheet.axis_formats_mut(Axis::Row).add(OrderedInterval::new(6, 7, bold.clone()));

        sheet.remove_row_at_impl(2).unwrap();
        assert_eq!(sheet.row_formats().get(5).map(|i| (i.start, i.end)), Some((5, 6)));

        sheet.insert_row_at_impl(0).unwrap();
        assert_eq!(sheet.row_formats().get(6).map(|i| (i.start, i.end)), Some((6, 7)));
    }

    #[test]
    fn test_column_edits_shift_cells_left_and_right() {
        let mut sheet = Sheet::new(2, 4);
        sheet.set_cell_value_impl(0, 3, Some(CellValue::from("d"))).unwrap();

        sheet.remove_column_at_impl(1).unwrap();
        assert_eq!(sheet.get_value(0, 2), Some(&CellValue::from("d")));

        sheet.insert_column_at_impl(0).unwrap();
        assert_eq!(sheet.get_value(0, 3), Some(&CellValue::from("d")));
        assert_eq!(sheet.num_cols(), 4);
    }

    #[test]
    fn test_effective_format_precedence() {
        let mut sheet = Sheet::new(5, 5);
        let cell_fmt = CellFormat::new().with_bold(true);
        let row_fmt = CellFormat::new().with_italic(true);
        let col_fmt = CellFormat::new().with_number_format("0.0");

        sheet.set_axis_format_impl(Axis::Row, 1, 2, row_fmt.clone());
        sheet.set_axis_format_impl(Axis::Column, 0, 4, col_fmt.clone());
        sheet.set_cell_format(1, 1, Some(cell_fmt.clone())).unwrap();

        assert_eq!(sheet.effective_format(1, 1), Some(&cell_fmt));
        assert_eq!(sheet.effective_format(2, 1), Some(&row_fmt));
        assert_eq!(sheet.effective_format(4, 1), Some(&col_fmt));
    }

    #[test]
    fn test_events_are_queued_and_drained() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_cell_value_impl(0, 0, Some(CellValue::from(1.0))).unwrap();
        sheet.remove_row_at_impl(2).unwrap();

        assert_eq!(
            sheet.take_events(),
            vec![
                SheetEvent::CellChanged { row: 0, col: 0 },
                SheetEvent::RowRemoved { index: 2 },
            ]
        );
        assert!(sheet.take_events().is_empty());
    }

    #[test]
    fn test_event_queue_drops_oldest_past_limit() {
        let mut sheet = Sheet::new(10, 1);
        sheet.set_max_events(3);
        for row in 0..10 {
            sheet.set_cell_value_impl(row, 0, Some(CellValue::from(1.0))).unwrap();
        }

        assert_eq!(
            sheet.take_events(),
            vec![
                SheetEvent::CellChanged { row: 7, col: 0 },
                SheetEvent::CellChanged { row: 8, col: 0 },
                SheetEvent::CellChanged { row: 9, col: 0 },
            ]
        );
    }

    #[test]
    fn test_zero_event_limit_records_nothing() {
        let mut sheet = Sheet::new(3, 3);
        sheet.set_cell_value_impl(0, 0, Some(CellValue::from(1.0))).unwrap();
        sheet.set_max_events(0);
        assert!(sheet.clone().take_events().is_empty());

        sheet.remove_row_at_impl(2).unwrap();
        assert!(sheet.take_events().is_empty());
    }

    #[test]
    fn test_expand_to_merges_follows_chains() {
        let mut sheet = Sheet::new(8, 8);
        sheet.add_merge_impl(Region::new(1, 1, 2, 3)).unwrap();
        sheet.add_merge_impl(Region::new(3, 3, 5, 4)).unwrap();

        assert_eq!(sheet.expand_to_merges(Region::cell(2, 2)), Region::new(1, 1, 2, 3));
        // Growing into the first merge reaches the second one.
        assert_eq!(sheet.expand_to_merges(Region::new(2, 0, 3, 2)), Region::new(1, 0, 5, 4));
        assert_eq!(sheet.expand_to_merges(Region::cell(7, 7)), Region::cell(7, 7));
    }
}
