//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the fundamental data structures for a single sheet cell.
//! CONTEXT: This file contains the `Cell` struct, the `CellValue` enum and
//! the two change records commands capture before a destructive edit.
//! A cell with no value and no format is "absent" and never stored.

use serde::{Deserialize, Serialize};

use crate::format::CellFormat;

/// Represents the raw data within a cell. The engine never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// The atomic unit of the sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub value: Option<CellValue>,
    /// Per-cell override, layered above the row/column interval formats.
    pub format: Option<CellFormat>,
}

impl Cell {
    pub fn new() -> Self {
        Cell::default()
    }

    pub fn with_value(value: impl Into<CellValue>) -> Self {
        Cell {
            value: Some(value.into()),
            format: None,
        }
    }

    pub fn with_format(format: CellFormat) -> Self {
        Cell {
            value: None,
            format: Some(format),
        }
    }

    /// A cell is empty when it has neither a value nor a non-default format.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.format.as_ref().map_or(true, CellFormat::is_default)
    }
}

/// A cell value captured before a destructive edit.
/// Replaying it writes `value` back at (row, col); `None` clears the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellChange {
    pub row: u32,
    pub col: u32,
    pub value: Option<CellValue>,
}

impl CellChange {
    pub fn new(row: u32, col: u32, value: Option<CellValue>) -> Self {
        CellChange { row, col, value }
    }
}

/// A per-cell format transition. Undo writes `old_format` back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellChangedFormat {
    pub row: u32,
    pub col: u32,
    pub old_format: Option<CellFormat>,
    pub new_format: Option<CellFormat>,
}

impl CellChangedFormat {
    pub fn new(
        row: u32,
        col: u32,
        old_format: Option<CellFormat>,
        new_format: Option<CellFormat>,
    ) -> Self {
        CellChangedFormat {
            row,
            col,
            old_format,
            new_format,
        }
    }
}
