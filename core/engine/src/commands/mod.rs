//! FILENAME: core/engine/src/commands/mod.rs
//! PURPOSE: Reversible commands over a `Sheet`.
//! CONTEXT: Every command follows the same shape: capture what the edit
//! will destroy, mutate through the sheet's impl-level primitives, and on
//! undo replay the capture through those same primitives.
//!
//! Captures live in an `Option`: `Some` only between a successful execute
//! and the following undo. Executing twice or undoing twice is refused with
//! `AlreadyExecuted` / `NotExecuted` rather than corrupting the sheet.
//! Undo assumes the sheet is in the state execute left it in; interleaving
//! foreign structural edits between the two is a caller error.

pub mod data;
pub mod merge;
pub mod structure;
pub mod styles;

pub use data::{ClearCellsCommand, SetCellValuesCommand};
pub use merge::{MergeCellsCommand, UnmergeCellsCommand};
pub use structure::{InsertAxisCommand, RemoveAxisCommand};
pub use styles::{SetAxisFormatCommand, SetCellFormatCommand};

use crate::cell::{CellChange, CellChangedFormat, CellValue};
use crate::error::{Result, SheetError};
use crate::format::CellFormat;
use crate::logging::CMD;
use crate::region::{Axis, CellCoord, Region};
use crate::sheet::Sheet;
use crate::{log_debug, log_error, log_warn};

/// The reversible-operation contract shared by every command.
pub trait UndoableCommand {
    /// Applies the command. On `Err` the sheet is unchanged.
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()>;

    /// Reverts a successful `execute`.
    fn undo(&mut self, sheet: &mut Sheet) -> Result<()>;

    /// Human-readable description (e.g., "Remove row 3").
    fn description(&self) -> String;

    /// True between a successful execute and the following undo.
    fn is_executed(&self) -> bool;
}

/// All command kinds, dispatched through `UndoableCommand`.
#[derive(Debug, Clone)]
pub enum Command {
    Remove(RemoveAxisCommand),
    Insert(InsertAxisCommand),
    SetCellValues(SetCellValuesCommand),
    ClearCells(ClearCellsCommand),
    SetCellFormat(SetCellFormatCommand),
    SetAxisFormat(SetAxisFormatCommand),
    MergeCells(MergeCellsCommand),
    UnmergeCells(UnmergeCellsCommand),
    Group(CommandGroup),
}

impl Command {
    pub fn remove_row(index: u32) -> Self {
        Command::Remove(RemoveAxisCommand::new(Axis::Row, index))
    }

    pub fn remove_column(index: u32) -> Self {
        Command::Remove(RemoveAxisCommand::new(Axis::Column, index))
    }

    /// Inserts an empty row so that it ends up at `index`.
    pub fn insert_row_at(index: u32) -> Self {
        Command::Insert(InsertAxisCommand::new(Axis::Row, index))
    }

    pub fn insert_row_after(index: u32) -> Self {
        Command::insert_row_at(index.saturating_add(1))
    }

    pub fn insert_column_at(index: u32) -> Self {
        Command::Insert(InsertAxisCommand::new(Axis::Column, index))
    }

    pub fn insert_column_after(index: u32) -> Self {
        Command::insert_column_at(index.saturating_add(1))
    }

    pub fn set_cell_value(row: u32, col: u32, value: impl Into<CellValue>) -> Self {
        Command::SetCellValues(SetCellValuesCommand::new(vec![CellChange::new(
            row,
            col,
            Some(value.into()),
        )]))
    }

    pub fn set_cell_values(changes: Vec<CellChange>) -> Self {
        Command::SetCellValues(SetCellValuesCommand::new(changes))
    }

    pub fn clear_cells(region: Region) -> Self {
        Command::ClearCells(ClearCellsCommand::new(region))
    }

    pub fn set_cell_format(region: Region, format: CellFormat) -> Self {
        Command::SetCellFormat(SetCellFormatCommand::new(region, format))
    }

    pub fn set_row_format(start: u32, end: u32, format: CellFormat) -> Self {
        Command::SetAxisFormat(SetAxisFormatCommand::new(Axis::Row, start, end, format))
    }

    pub fn set_column_format(start: u32, end: u32, format: CellFormat) -> Self {
        Command::SetAxisFormat(SetAxisFormatCommand::new(Axis::Column, start, end, format))
    }

    pub fn merge_cells(region: Region) -> Self {
        Command::MergeCells(MergeCellsCommand::new(region))
    }

    pub fn unmerge_cells(row: u32, col: u32) -> Self {
        Command::UnmergeCells(UnmergeCellsCommand::new(row, col))
    }

    pub fn group(description: impl Into<String>, commands: Vec<Command>) -> Self {
        Command::Group(CommandGroup::new(description, commands))
    }

    fn inner(&self) -> &dyn UndoableCommand {
        match self {
            Command::Remove(c) => c,
            Command::Insert(c) => c,
            Command::SetCellValues(c) => c,
            Command::ClearCells(c) => c,
            Command::SetCellFormat(c) => c,
            Command::SetAxisFormat(c) => c,
            Command::MergeCells(c) => c,
            Command::UnmergeCells(c) => c,
            Command::Group(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn UndoableCommand {
        match self {
            Command::Remove(c) => c,
            Command::Insert(c) => c,
            Command::SetCellValues(c) => c,
            Command::ClearCells(c) => c,
            Command::SetCellFormat(c) => c,
            Command::SetAxisFormat(c) => c,
            Command::MergeCells(c) => c,
            Command::UnmergeCells(c) => c,
            Command::Group(c) => c,
        }
    }
}

impl UndoableCommand for Command {
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        let description = self.description();
        match self.inner_mut().execute(sheet) {
            Ok(()) => {
                log_debug!(CMD, "execute \"{}\"", description);
                Ok(())
            }
            Err(err) => {
                log_warn!(CMD, "execute \"{}\" failed: {}", description, err);
                Err(err)
            }
        }
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        let description = self.description();
        match self.inner_mut().undo(sheet) {
            Ok(()) => {
                log_debug!(CMD, "undo \"{}\"", description);
                Ok(())
            }
            Err(err) => {
                log_warn!(CMD, "undo \"{}\" failed: {}", description, err);
                Err(err)
            }
        }
    }

    fn description(&self) -> String {
        self.inner().description()
    }

    fn is_executed(&self) -> bool {
        self.inner().is_executed()
    }
}

// ============================================================================
// GROUP
// ============================================================================

/// An ordered batch that executes and undoes as one step.
#[derive(Debug, Clone)]
pub struct CommandGroup {
    description: String,
    commands: Vec<Command>,
    executed: bool,
}

impl CommandGroup {
    pub fn new(description: impl Into<String>, commands: Vec<Command>) -> Self {
        CommandGroup {
            description: description.into(),
            commands,
            executed: false,
        }
    }

    /// A group that is already "executed" and collects commands as they run.
    pub(crate) fn open(description: impl Into<String>) -> Self {
        CommandGroup {
            description: description.into(),
            commands: Vec::new(),
            executed: true,
        }
    }

    pub(crate) fn push_executed(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl UndoableCommand for CommandGroup {
    /// Runs members in order. If one fails, the members already run are
    /// undone in reverse and the failure is returned.
    fn execute(&mut self, sheet: &mut Sheet) -> Result<()> {
        if self.executed {
            return Err(SheetError::AlreadyExecuted);
        }
        for i in 0..self.commands.len() {
            if let Err(err) = self.commands[i].execute(sheet) {
                for done in self.commands[..i].iter_mut().rev() {
                    if let Err(rollback_err) = done.undo(sheet) {
                        log_error!(CMD, "group rollback failed: {}", rollback_err);
                    }
                }
                return Err(err);
            }
        }
        self.executed = true;
        Ok(())
    }

    fn undo(&mut self, sheet: &mut Sheet) -> Result<()> {
        if !self.executed {
            return Err(SheetError::NotExecuted);
        }
        for command in self.commands.iter_mut().rev() {
            command.undo(sheet)?;
        }
        self.executed = false;
        Ok(())
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn is_executed(&self) -> bool {
        self.executed
    }
}

// ============================================================================
// CAPTURE HELPERS
// ============================================================================

/// Records the value and per-cell format of every position given.
pub(crate) fn capture_cells(
    sheet: &Sheet,
    positions: impl IntoIterator<Item = CellCoord>,
) -> (Vec<CellChange>, Vec<CellChangedFormat>) {
    let mut values = Vec::new();
    let mut formats = Vec::new();
    for (row, col) in positions {
        let Some(cell) = sheet.get_cell(row, col) else {
            continue;
        };
        if let Some(value) = &cell.value {
            values.push(CellChange::new(row, col, Some(value.clone())));
        }
        if let Some(format) = &cell.format {
            formats.push(CellChangedFormat::new(row, col, Some(format.clone()), None));
        }
    }
    (values, formats)
}

/// Replays captured values, then writes each captured `old_format` back.
pub(crate) fn restore_cells(
    sheet: &mut Sheet,
    values: &[CellChange],
    formats: &[CellChangedFormat],
) -> Result<()> {
    sheet.set_cell_values_impl(values)?;
    for change in formats {
        sheet.set_cell_format(change.row, change.col, change.old_format.clone())?;
    }
    Ok(())
}
