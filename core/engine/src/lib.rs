//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the sheet engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//! The model lives in `sheet`; every reversible edit is a `Command`
//! executed through an `UndoStack`.

pub mod logging;

pub mod cell;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod interval;
pub mod merge;
pub mod region;
pub mod sheet;
pub mod undo;

// Re-export commonly used types at the crate root
pub use cell::{Cell, CellChange, CellChangedFormat, CellValue};
pub use commands::{Command, CommandGroup, UndoableCommand};
pub use config::EngineConfig;
pub use error::{Result, SheetError};
pub use format::{CellFormat, Color, TextAlign};
pub use interval::{IntervalEdit, IntervalStore, OrderedInterval, ShrunkInterval};
pub use merge::{CellMerge, MergeRerange, MergeStore};
pub use region::{column_name, Axis, CellCoord, Region};
pub use sheet::{Sheet, SheetEvent};
pub use undo::UndoStack;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_edits_and_reverts_through_history() {
        let mut sheet = Sheet::new(10, 4);
        let mut history = UndoStack::new();

        history.execute(&mut sheet, Command::set_cell_value(4, 1, "Hello")).unwrap();
        history.execute(&mut sheet, Command::set_row_format(2, 6, CellFormat::new().with_bold(true))).unwrap();
        history.execute(&mut sheet, Command::merge_cells(Region::new(4, 1, 5, 2))).unwrap();
        let edited = sheet.clone();

        history.execute(&mut sheet, Command::remove_row(3)).unwrap();
        assert_eq!(sheet.get_value(3, 1), Some(&CellValue::from("Hello")));
        assert_eq!(sheet.merges().iter().next().map(|m| m.region), Some(Region::new(3, 1, 4, 2)));

        history.undo(&mut sheet).unwrap();
        assert_eq!(sheet, edited);
    }
}
