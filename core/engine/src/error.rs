//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

use crate::region::Region;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Row {index} is out of bounds (sheet has {len} rows)")]
    RowOutOfBounds { index: u32, len: u32 },

    #[error("Column {index} is out of bounds (sheet has {len} columns)")]
    ColumnOutOfBounds { index: u32, len: u32 },

    #[error("Command has not been executed")]
    NotExecuted,

    #[error("Command has already been executed")]
    AlreadyExecuted,

    #[error("Region {0} overlaps an existing merged region")]
    MergeOverlap(Region),

    #[error("Cell ({row}, {col}) is not part of a merged region")]
    NotMerged { row: u32, col: u32 },

    #[error("A single cell cannot be merged")]
    SingleCellMerge,

    #[error("Nothing to {0}")]
    EmptyHistory(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
