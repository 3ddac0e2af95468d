//! FILENAME: core/engine/src/undo.rs
//! PURPOSE: Undo/Redo history stack using the Command Pattern.
//! CONTEXT: The stack owns every command it holds. A command is pushed
//! only after it executed successfully, and a new command clears redo.
//! Supports batching several commands into a single transaction.

use std::collections::VecDeque;

use crate::commands::{Command, CommandGroup, UndoableCommand};
use crate::config::{EngineConfig, MAX_HISTORY_SIZE};
use crate::error::{Result, SheetError};
use crate::logging::UNDO;
use crate::sheet::Sheet;
use crate::{log_debug, log_enter, log_exit, log_info, log_warn};

/// The history stack for undo/redo operations.
#[derive(Debug)]
pub struct UndoStack {
    /// Executed commands that can be undone (most recent at back)
    undo_stack: VecDeque<Command>,
    /// Commands that were undone and can be redone (most recent at back)
    redo_stack: VecDeque<Command>,
    /// Currently open transaction being built (for batching)
    current_transaction: Option<CommandGroup>,
    /// Maximum size of undo history
    max_size: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack::with_max_size(MAX_HISTORY_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        UndoStack {
            undo_stack: VecDeque::with_capacity(max_size),
            redo_stack: VecDeque::with_capacity(max_size),
            current_transaction: None,
            max_size,
        }
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        UndoStack::with_max_size(config.max_history)
    }

    /// Executes `command` against `sheet`. On success it is recorded (in the
    /// open transaction if there is one) and redo history is discarded.
    /// On failure nothing is recorded and the sheet is unchanged.
    pub fn execute(&mut self, sheet: &mut Sheet, mut command: Command) -> Result<()> {
        log_enter!(UNDO, "execute", "{}", command.description());
        command.execute(sheet)?;

        self.redo_stack.clear();
        match self.current_transaction.as_mut() {
            Some(transaction) => transaction.push_executed(command),
            None => self.push_undo(command),
        }
        log_exit!(UNDO, "execute", "undo={} redo={}", self.undo_stack.len(), self.redo_stack.len());
        Ok(())
    }

    /// Begin a new transaction for batching multiple commands.
    /// If a transaction is already open, this is a no-op (nested calls ignored).
    pub fn begin_transaction(&mut self, description: impl Into<String>) {
        if self.current_transaction.is_none() {
            self.current_transaction = Some(CommandGroup::open(description));
        }
    }

    /// Commit the current transaction to the undo stack as one entry.
    /// If no transaction is open or it's empty, this is a no-op.
    pub fn commit_transaction(&mut self) {
        if let Some(transaction) = self.current_transaction.take() {
            if !transaction.is_empty() {
                log_debug!(UNDO, "commit \"{}\" ({} commands)", transaction.description(), transaction.len());
                self.push_undo(Command::Group(transaction));
            }
        }
    }

    /// Cancel the current transaction, undoing what ran inside it.
    pub fn cancel_transaction(&mut self, sheet: &mut Sheet) -> Result<()> {
        match self.current_transaction.take() {
            Some(mut transaction) if !transaction.is_empty() => transaction.undo(sheet),
            _ => Ok(()),
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.current_transaction.is_some()
    }

    /// Undoes the most recent command and returns its description.
    /// An open transaction is committed first.
    pub fn undo(&mut self, sheet: &mut Sheet) -> Result<String> {
        self.commit_transaction();
        let mut command = self
            .undo_stack
            .pop_back()
            .ok_or(SheetError::EmptyHistory("undo"))?;

        if let Err(err) = command.undo(sheet) {
            log_warn!(UNDO, "undo failed, keeping command on the stack: {}", err);
            self.undo_stack.push_back(command);
            return Err(err);
        }

        let description = command.description();
        self.push_redo(command);
        Ok(description)
    }

    /// Re-executes the most recently undone command and returns its description.
    pub fn redo(&mut self, sheet: &mut Sheet) -> Result<String> {
        self.commit_transaction();
        let mut command = self
            .redo_stack
            .pop_back()
            .ok_or(SheetError::EmptyHistory("redo"))?;

        if let Err(err) = command.execute(sheet) {
            log_warn!(UNDO, "redo failed, keeping command on the stack: {}", err);
            self.redo_stack.push_back(command);
            return Err(err);
        }

        let description = command.description();
        self.push_undo(command);
        Ok(description)
    }

    fn push_undo(&mut self, command: Command) {
        while self.undo_stack.len() >= self.max_size {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(command);
    }

    fn push_redo(&mut self, command: Command) {
        while self.redo_stack.len() >= self.max_size {
            self.redo_stack.pop_front();
        }
        self.redo_stack.push_back(command);
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
            || self.current_transaction.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get description of next undo action (for UI).
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|c| c.description())
    }

    /// Get description of next redo action (for UI).
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(|c| c.description())
    }

    /// Clear all history. An open transaction is dropped as-is.
    pub fn clear(&mut self) {
        log_info!(UNDO, "history cleared ({} undo, {} redo)", self.undo_stack.len(), self.redo_stack.len());
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_transaction = None;
    }

    /// Get current stack sizes (for debugging).
    pub fn stack_sizes(&self) -> (usize, usize) {
        (self.undo_stack.len(), self.redo_stack.len())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn sheet() -> Sheet {
        Sheet::new(10, 5)
    }

    #[test]
    fn test_single_undo() {
        let mut sheet = sheet();
        let mut stack = UndoStack::new();

        stack.execute(&mut sheet, Command::set_cell_value(0, 0, 1.0)).unwrap();
        assert!(stack.can_undo());
        assert!(!stack.can_redo());

        let description = stack.undo(&mut sheet).unwrap();
        assert_eq!(description, "Edit cell (0, 0)");
        assert!(sheet.get_cell(0, 0).is_none());
        assert!(!stack.can_undo());
        assert!(stack.can_redo());
    }

    #[test]
    fn test_failed_command_is_not_recorded() {
        let mut sheet = sheet();
        let mut stack = UndoStack::new();

        assert!(stack.execute(&mut sheet, Command::remove_row(10)).is_err());
        assert_eq!(stack.stack_sizes(), (0, 0));
    }

    #[test]
    fn test_redo_after_undo() {
        let mut sheet = sheet();
        let mut stack = UndoStack::new();

        stack.execute(&mut sheet, Command::set_cell_value(2, 2, "x")).unwrap();
        stack.undo(&mut sheet).unwrap();
        stack.redo(&mut sheet).unwrap();

        assert_eq!(sheet.get_value(2, 2), Some(&CellValue::from("x")));
        assert_eq!(stack.stack_sizes(), (1, 0));
    }

    #[test]
    fn test_redo_cleared_on_new_action() {
        let mut sheet = sheet();
        let mut stack = UndoStack::new();

        stack.execute(&mut sheet, Command::set_cell_value(0, 0, 1.0)).unwrap();
        stack.undo(&mut sheet).unwrap();
        assert!(stack.can_redo());

        // New action should clear redo
        stack.execute(&mut sheet, Command::set_cell_value(1, 1, 1.0)).unwrap();
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_max_size_enforcement() {
        let mut sheet = sheet();
        let mut stack = UndoStack::with_max_size(3);

        for row in 0..4 {
            stack.execute(&mut sheet, Command::set_cell_value(row, 0, 1.0)).unwrap();
        }

        assert_eq!(stack.stack_sizes().0, 3);
        assert_eq!(stack.undo_description().as_deref(), Some("Edit cell (3, 0)"));
    }

    #[test]
    fn test_transaction_batching() {
        let mut sheet = sheet();
        let before = sheet.clone();
        let mut stack = UndoStack::new();

        stack.begin_transaction("Paste 3 cells");
        for col in 0..3 {
            stack.execute(&mut sheet, Command::set_cell_value(0, col, col as f64)).unwrap();
        }
        stack.commit_transaction();

        assert_eq!(stack.stack_sizes(), (1, 0));
        assert_eq!(stack.undo_description().as_deref(), Some("Paste 3 cells"));

        stack.undo(&mut sheet).unwrap();
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_empty_transaction_not_saved() {
        let mut stack = UndoStack::new();

        stack.begin_transaction("Empty");
        stack.commit_transaction();

        assert!(!stack.can_undo());
    }

    #[test]
    fn test_cancel_transaction_reverts_sheet() {
        let mut sheet = sheet();
        let before = sheet.clone();
        let mut stack = UndoStack::new();

        stack.begin_transaction("Abandoned");
        stack.execute(&mut sheet, Command::set_cell_value(0, 0, 1.0)).unwrap();
        stack.execute(&mut sheet, Command::remove_row(3)).unwrap();
        stack.cancel_transaction(&mut sheet).unwrap();

        assert_eq!(sheet, before);
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_empty_history_errors() {
        let mut sheet = sheet();
        let mut stack = UndoStack::new();
        assert_eq!(stack.undo(&mut sheet), Err(SheetError::EmptyHistory("undo")));
        assert_eq!(stack.redo(&mut sheet), Err(SheetError::EmptyHistory("redo")));
    }

    #[test]
    fn test_with_config() {
        let config = EngineConfig {
            max_history: 2,
            ..EngineConfig::default()
        };
        let mut sheet = Sheet::with_config(&config);
        let mut stack = UndoStack::with_config(&config);
        for row in 0..5 {
            stack.execute(&mut sheet, Command::set_cell_value(row, 0, 1.0)).unwrap();
        }
        assert_eq!(stack.stack_sizes(), (2, 0));
    }
}
