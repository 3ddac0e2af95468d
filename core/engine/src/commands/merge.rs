//! FILENAME: core/engine/src/commands/merge.rs
//! PURPOSE: Merging and unmerging cells.
//! CONTEXT: The top-left cell becomes the anchor holding the merged
//! content. All other cells in the range are cleared, and their content
//! is kept by the command so undo can bring it back.

use super::{capture_cells, restore_cells, UndoableCommand};
use crate::cell::{CellChange, CellChangedFormat};
use crate::error::{Result, SheetError};
use crate::merge::CellMerge;
use crate::region::{Axis, Region};
use crate::sheet::Sheet;

#[derive(Debug, Clone)]
struct MergeCapture {
    merge: CellMerge,
    cleared_values: Vec<CellChange>,
    cleared_formats: Vec<CellChangedFormat>,
}

#[derive(Debug, Clone)]
pub struct MergeCellsCommand {
    region: Region,
    capture: Option<MergeCapture>,
}

impl MergeCellsCommand {
    pub fn new(region: Region) -> Self {
        MergeCellsCommand {
            region,
            capture: None,
        }
    }
}

impl UndoableCommand for MergeCellsCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.capture.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }
        if self.region.is_single_cell() {
            return Err(SheetError::SingleCellMerge);
        }
        sheet.check_index(Axis::Row, self.region.end_row)?;
        sheet.check_index(Axis::Column, self.region.end_col)?;
        if !sheet.merges().get_overlapping(&self.region).is_empty() {
            return Err(SheetError::MergeOverlap(self.region));
        }

        let anchor = (self.region.start_row, self.region.start_col);
        let positions: Vec<_> = sheet
            .get_non_empty_cell_positions(self.region)
            .into_iter()
            .filter(|&pos| pos != anchor)
            .collect();
        let (cleared_values, cleared_formats) = capture_cells(sheet, positions.iter().copied());
        for (row, col) in positions {
            sheet.clear_cell_impl(row, col);
        }

        let merge = sheet.add_merge_impl(self.region)?;
        self.capture = Some(MergeCapture {
            merge,
            cleared_values,
            cleared_formats,
        });
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let capture = self.capture.take().ok_or(SheetError::NotExecuted)?;
        sheet.remove_merge_impl(&capture.merge);
        restore_cells(sheet, &capture.cleared_values, &capture.cleared_formats)
    }

    fn description(&self) -> String {
        format!("Merge {}", self.region)
    }

    fn is_executed(&self) -> bool {
        self.capture.is_some()
    }
}

/// Dissolves the merge containing (row, col). Cell content is untouched.
#[derive(Debug, Clone)]
pub struct UnmergeCellsCommand {
    row: u32,
    col: u32,
    removed: Option<CellMerge>,
}

impl UnmergeCellsCommand {
    pub fn new(row: u32, col: u32) -> Self {
        UnmergeCellsCommand {
            row,
            col,
            removed: None,
        }
    }
}

impl UndoableCommand for UnmergeCellsCommand {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.removed.is_some() {
            return Err(SheetError::AlreadyExecuted);
        }
        let merge = sheet
            .get_merge_at(self.row, self.col)
            .copied()
            .ok_or(SheetError::NotMerged { row: self.row, col: self.col })?;
        sheet.remove_merge_impl(&merge);
        self.removed = Some(merge);
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let merge = self.removed.take().ok_or(SheetError::NotExecuted)?;
        if let Err(err) = sheet.add_merge_impl(merge.region) {
            self.removed = Some(merge);
            return Err(err);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Unmerge ({}, {})", self.row, self.col)
    }

    fn is_executed(&self) -> bool {
        self.removed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::format::CellFormat;

    #[test]
    fn test_merge_clears_non_anchor_cells_and_undo_restores() {
        let mut sheet = Sheet::new(5, 5);
        sheet.set_cell_value_impl(1, 1, Some(CellValue::from("anchor"))).unwrap();
        sheet.set_cell_value_impl(2, 2, Some(CellValue::from("gone"))).unwrap();
        sheet.set_cell_format(1, 2, Some(CellFormat::new().with_bold(true))).unwrap();
        let before = sheet.clone();

        let mut command = MergeCellsCommand::new(Region::new(1, 1, 2, 2));
        command.execute(&mut sheet).unwrap();

        assert_eq!(sheet.merges().len(), 1);
        assert_eq!(sheet.get_value(1, 1), Some(&CellValue::from("anchor")));
        assert!(sheet.get_cell(2, 2).is_none());
        assert!(sheet.get_cell(1, 2).is_none());

        command.undo(&mut sheet).unwrap();
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_merge_refusals() {
        let mut sheet = Sheet::new(5, 5);
        sheet.add_merge_impl(Region::new(0, 0, 1, 1)).unwrap();

        let mut single = MergeCellsCommand::new(Region::cell(3, 3));
        assert_eq!(single.execute(&mut sheet), Err(SheetError::SingleCellMerge));

        let mut overlapping = MergeCellsCommand::new(Region::new(1, 1, 2, 2));
        assert_eq!(
            overlapping.execute(&mut sheet),
            Err(SheetError::MergeOverlap(Region::new(1, 1, 2, 2)))
        );

        let mut outside = MergeCellsCommand::new(Region::new(3, 3, 3, 9));
        assert!(outside.execute(&mut sheet).is_err());
        assert_eq!(sheet.merges().len(), 1);
    }

    #[test]
    fn test_unmerge_round_trip() {
        let mut sheet = Sheet::new(5, 5);
        sheet.add_merge_impl(Region::new(0, 0, 1, 1)).unwrap();
        let before = sheet.clone();

        let mut command = UnmergeCellsCommand::new(1, 0);
        command.execute(&mut sheet).unwrap();
        assert!(sheet.merges().is_empty());

        command.undo(&mut sheet).unwrap();
        assert_eq!(sheet, before);

        let mut missing = UnmergeCellsCommand::new(4, 4);
        assert_eq!(
            missing.execute(&mut sheet),
            Err(SheetError::NotMerged { row: 4, col: 4 })
        );
    }
}
