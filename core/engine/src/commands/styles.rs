//! FILENAME: core/engine/src/commands/styles.rs
//! PURPOSE: Format edits: per-cell overrides and row/column interval formats.

use super::UndoableCommand;
use crate::cell::CellChangedFormat;
use crate::error::{Result, SheetError};
use crate::format::CellFormat;
use crate::interval::IntervalEdit;
use crate::region::{Axis, Region};
use crate::sheet::Sheet;

/// Overlays `format` onto the per-cell format of every cell in a region.
/// A merge touched by the region is formatted through its anchor.
#[derive(Debug, Clone)]
pub struct SetCellFormatCommand {
    region: Region,
    format: CellFormat,
    changes: Option<Vec<CellChangedFormat>>,
}

impl SetCellFormatCommand {
    pub fn new(region: Region, format: CellFormat) -> Self {
        SetCellFormatCommand {
            region,
            format,
            changes: None,
        }
    }
}

impl UndoableCommand for SetCellFormatCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.changes.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }
        sheet.check_index(Axis::Row, self.region.start_row)?;
        sheet.check_index(Axis::Column, self.region.start_col)?;
        let target = sheet.expand_to_merges(self.region);
        let Some(region) = target.clip(sheet.num_rows(), sheet.num_cols()) else {
            return Ok(());
        };

        let mut changes = Vec::new();
        for row in region.start_row..=region.end_row {
            for col in region.start_col..=region.end_col {
                // Hidden merge members take no format of their own.
                if sheet.merge_anchor(row, col) != (row, col) {
                    continue;
                }
                let old_format = sheet.get_cell_format(row, col).cloned();
                let mut new_format = old_format.clone().unwrap_or_default();
                new_format.merge_with(&self.format);
                sheet.set_cell_format(row, col, Some(new_format.clone()))?;
                changes.push(CellChangedFormat::new(row, col, old_format, Some(new_format)));
            }
        }

        self.changes = Some(changes);
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let changes = self.changes.take().ok_or(SheetError::NotExecuted)?;
        for change in changes.iter().rev() {
            sheet.set_cell_format(change.row, change.col, change.old_format.clone())?;
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Format {}", self.region)
    }

    fn is_executed(&self) -> bool {
        self.changes.is_some()
    }
}

/// Sets the format of a range of whole rows or columns, replacing any
/// interval format already covering part of the range.
#[derive(Debug, Clone)]
pub struct SetAxisFormatCommand {
    axis: Axis,
    start: u32,
    end: u32,
    format: CellFormat,
    edit: Option<IntervalEdit<CellFormat>>,
}

impl SetAxisFormatCommand {
    pub fn new(axis: Axis, start: u32, end: u32, format: CellFormat) -> Self {
        SetAxisFormatCommand {
            axis,
            start: start.min(end),
            end: start.max(end),
            format,
            edit: None,
        }
    }
}

impl UndoableCommand for SetAxisFormatCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.edit.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }
        sheet.check_index(self.axis, self.end)?;

        let edit = sheet.set_axis_format_impl(self.axis, self.start, self.end, self.format.clone());
        self.edit = Some(edit);
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let edit = self.edit.take().ok_or(SheetError::NotExecuted)?;
        sheet.revert_axis_format_impl(self.axis, &edit);
        Ok(())
    }

    fn description(&self) -> String {
        let noun = match self.axis {
            Axis::Row => "rows",
            Axis::Column => "columns",
        };
        format!("Format {} {}-{}", noun, self.start, self.end)
    }

    fn is_executed(&self) -> bool {
        self.edit.is_some()
    }
}
