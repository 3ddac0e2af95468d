//! FILENAME: core/engine/src/commands/data.rs
//! PURPOSE: Cell value edits: batch set and region clear.

use super::{capture_cells, restore_cells, UndoableCommand};
use crate::cell::{CellChange, CellChangedFormat};
use crate::error::{Result, SheetError};
use crate::region::{Axis, Region};
use crate::sheet::Sheet;

/// Writes a batch of values. A value aimed at any cell of a merged region
/// lands on the region's anchor.
#[derive(Debug, Clone)]
pub struct SetCellValuesCommand {
    changes: Vec<CellChange>,
    previous: Option<Vec<CellChange>>,
}

impl SetCellValuesCommand {
    pub fn new(changes: Vec<CellChange>) -> Self {
        SetCellValuesCommand {
            changes,
            previous: None,
        }
    }

    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }
}

impl UndoableCommand for SetCellValuesCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.previous.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }

        let targets: Vec<CellChange> = self
            .changes
            .iter()
            .map(|change| {
                let (row, col) = sheet.merge_anchor(change.row, change.col);
                CellChange::new(row, col, change.value.clone())
            })
            .collect();
        let previous: Vec<CellChange> = targets
            .iter()
            .map(|t| CellChange::new(t.row, t.col, sheet.get_value(t.row, t.col).cloned()))
            .collect();

        // Validates every target before writing any of them.
        sheet.set_cell_values_impl(&targets)?;
        self.previous = Some(previous);
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let previous = self.previous.take().ok_or(SheetError::NotExecuted)?;
        // Reverse order so a cell written twice ends with its first prior value.
        let replay: Vec<CellChange> = previous.into_iter().rev().collect();
        sheet.set_cell_values_impl(&replay)
    }

    fn description(&self) -> String {
        match self.changes.as_slice() {
            [single] => format!("Edit cell ({}, {})", single.row, single.col),
            changes => format!("Edit {} cells", changes.len()),
        }
    }

    fn is_executed(&self) -> bool {
        self.previous.is_some()
    }
}

#[derive(Debug, Clone)]
struct ClearCapture {
    values: Vec<CellChange>,
    formats: Vec<CellChangedFormat>,
}

/// Removes values and per-cell formats from every cell in a region.
/// A merge touched by the region is cleared as a whole.
#[derive(Debug, Clone)]
pub struct ClearCellsCommand {
    region: Region,
    capture: Option<ClearCapture>,
}

impl ClearCellsCommand {
    pub fn new(region: Region) -> Self {
        ClearCellsCommand {
            region,
            capture: None,
        }
    }
}

impl UndoableCommand for ClearCellsCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.capture.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }
        sheet.check_index(Axis::Row, self.region.start_row)?;
        sheet.check_index(Axis::Column, self.region.start_col)?;

        let target = sheet.expand_to_merges(self.region);
        let positions = sheet.get_non_empty_cell_positions(target);
        let (values, formats) = capture_cells(sheet, positions.iter().copied());
        for (row, col) in positions {
            sheet.clear_cell_impl(row, col);
        }

        self.capture = Some(ClearCapture { values, formats });
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let capture = self.capture.take().ok_or(SheetError::NotExecuted)?;
        restore_cells(sheet, &capture.values, &capture.formats)
    }

    fn description(&self) -> String {
        format!("Clear {}", self.region)
    }

    fn is_executed(&self) -> bool {
        self.capture.is_some()
    }
}
