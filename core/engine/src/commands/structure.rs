//! FILENAME: core/engine/src/commands/structure.rs
//! PURPOSE: Inserting and removing rows/columns, reversibly.
//! CONTEXT: A structural edit touches three structures that must stay
//! consistent: the cell grid, the axis format intervals and the merges.
//! The grid (and intervals strictly after the edit point) move inside the
//! sheet's impl primitives; intervals covering the edit point and merges
//! are adjusted here, because that is where the undo record is kept.

use super::{capture_cells, restore_cells, UndoableCommand};
use crate::cell::{CellChange, CellChangedFormat};
use crate::error::{Result, SheetError};
use crate::format::CellFormat;
use crate::interval::{OrderedInterval, ShrunkInterval};
use crate::merge::MergeRerange;
use crate::region::{Axis, Region};
use crate::sheet::Sheet;

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Row => "row",
        Axis::Column => "column",
    }
}

fn whole_line(axis: Axis, index: u32) -> Region {
    match axis {
        Axis::Row => Region::row(index),
        Axis::Column => Region::column(index),
    }
}

// ============================================================================
// REMOVE
// ============================================================================

#[derive(Debug, Clone)]
struct RemoveCapture {
    removed_values: Vec<CellChange>,
    removed_cell_formats: Vec<CellChangedFormat>,
    modified_formats: Vec<ShrunkInterval<CellFormat>>,
    merges: MergeRerange,
}

/// Removes one row or column; later rows/columns move back by one.
#[derive(Debug, Clone)]
pub struct RemoveAxisCommand {
    axis: Axis,
    index: u32,
    capture: Option<RemoveCapture>,
}

impl RemoveAxisCommand {
    pub fn new(axis: Axis, index: u32) -> Self {
        RemoveAxisCommand {
            axis,
            index,
            capture: None,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl UndoableCommand for RemoveAxisCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.capture.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }
        // Validate before capturing anything so a refused edit mutates nothing.
        sheet.check_index(self.axis, self.index)?;

        let positions = sheet.get_non_empty_cell_positions(whole_line(self.axis, self.index));
        let (removed_values, removed_cell_formats) = capture_cells(sheet, positions);

        let modified_formats = sheet.axis_formats_mut(self.axis).shrink_at(self.index);
        let merges = sheet.rerange_merged_cells(self.axis, self.index, -1);

        if let Err(err) = sheet.remove_at_impl(self.axis, self.index) {
            sheet.undo_rerange_merged_cells(&merges);
            sheet.axis_formats_mut(self.axis).unshrink(&modified_formats);
            return Err(err);
        }

        self.capture = Some(RemoveCapture {
            removed_values,
            removed_cell_formats,
            modified_formats,
            merges,
        });
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let capture = self.capture.take().ok_or(SheetError::NotExecuted)?;
        if let Err(err) = sheet.check_insert_index(self.axis, self.index) {
            self.capture = Some(capture);
            return Err(err);
        }

        // The shrunk copies come out before the row goes back in: re-inserting
        // would shift any that start at the removed index.
        sheet.axis_formats_mut(self.axis).remove_shrunk(&capture.modified_formats);
        sheet.insert_at_impl(self.axis, self.index)?;
        sheet.set_cell_values_impl(&capture.removed_values)?;
        sheet.axis_formats_mut(self.axis).restore_shrunk(&capture.modified_formats);

        restore_cells(sheet, &[], &capture.removed_cell_formats)?;
        sheet.undo_rerange_merged_cells(&capture.merges);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove {} {}", axis_name(self.axis), self.index)
    }

    fn is_executed(&self) -> bool {
        self.capture.is_some()
    }
}

// ============================================================================
// INSERT
// ============================================================================

#[derive(Debug, Clone)]
struct InsertCapture {
    expanded_formats: Vec<(OrderedInterval<CellFormat>, OrderedInterval<CellFormat>)>,
    merges: MergeRerange,
}

/// Inserts one empty row or column at `index`; it and everything after it
/// move forward by one. Formats and merges spanning the insertion grow.
#[derive(Debug, Clone)]
pub struct InsertAxisCommand {
    axis: Axis,
    index: u32,
    capture: Option<InsertCapture>,
}

impl InsertAxisCommand {
    pub fn new(axis: Axis, index: u32) -> Self {
        InsertAxisCommand {
            axis,
            index,
            capture: None,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl UndoableCommand for InsertAxisCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.capture.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }
        sheet.check_insert_index(self.axis, self.index)?;

        let expanded_formats = sheet.axis_formats_mut(self.axis).expand_at(self.index);
        let merges = sheet.rerange_merged_cells(self.axis, self.index, 1);

        if let Err(err) = sheet.insert_at_impl(self.axis, self.index) {
            sheet.undo_rerange_merged_cells(&merges);
            sheet.axis_formats_mut(self.axis).unexpand(&expanded_formats);
            return Err(err);
        }

        self.capture = Some(InsertCapture {
            expanded_formats,
            merges,
        });
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let capture = self.capture.take().ok_or(SheetError::NotExecuted)?;
        if let Err(err) = sheet.check_index(self.axis, self.index) {
            self.capture = Some(capture);
            return Err(err);
        }

        sheet.remove_at_impl(self.axis, self.index)?;
        sheet.axis_formats_mut(self.axis).unexpand(&capture.expanded_formats);
        sheet.undo_rerange_merged_cells(&capture.merges);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Insert {} at {}", axis_name(self.axis), self.index)
    }

    fn is_executed(&self) -> bool {
        self.capture.is_some()
    }
}
