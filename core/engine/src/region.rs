//! FILENAME: core/engine/src/region.rs
//! PURPOSE: Coordinates, axes and rectangular regions.
//! CONTEXT: Row and col are 0-based indices. A `Region` is an inclusive
//! rectangle; whole-row and whole-column regions span the full u32 range
//! on the other axis and are clipped against the sheet where needed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate as (row, col) with 0-based indices.
pub type CellCoord = (u32, u32);

/// The two structural axes of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Column,
}

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl Region {
    /// Creates a region from two corners, normalizing so start <= end.
    pub fn new(row_a: u32, col_a: u32, row_b: u32, col_b: u32) -> Self {
        Region {
            start_row: row_a.min(row_b),
            start_col: col_a.min(col_b),
            end_row: row_a.max(row_b),
            end_col: col_a.max(col_b),
        }
    }

    pub fn cell(row: u32, col: u32) -> Self {
        Region::new(row, col, row, col)
    }

    /// Every column of a single row.
    pub fn row(row: u32) -> Self {
        Region::new(row, 0, row, u32::MAX)
    }

    /// Every row of a single column.
    pub fn column(col: u32) -> Self {
        Region::new(0, col, u32::MAX, col)
    }

    pub fn height(&self) -> u32 {
        (self.end_row - self.start_row).saturating_add(1)
    }

    pub fn width(&self) -> u32 {
        (self.end_col - self.start_col).saturating_add(1)
    }

    pub fn is_single_cell(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    pub fn overlaps(&self, other: &Region) -> bool {
        !(other.end_row < self.start_row
            || other.start_row > self.end_row
            || other.end_col < self.start_col
            || other.start_col > self.end_col)
    }

    /// The (start, end) span of this region along `axis`.
    pub fn span(&self, axis: Axis) -> (u32, u32) {
        match axis {
            Axis::Row => (self.start_row, self.end_row),
            Axis::Column => (self.start_col, self.end_col),
        }
    }

    /// Copy of this region with the span along `axis` replaced.
    pub fn with_span(&self, axis: Axis, start: u32, end: u32) -> Region {
        match axis {
            Axis::Row => Region { start_row: start, end_row: end, ..*self },
            Axis::Column => Region { start_col: start, end_col: end, ..*self },
        }
    }

    /// Smallest region containing both.
    pub fn union(&self, other: &Region) -> Region {
        Region {
            start_row: self.start_row.min(other.start_row),
            start_col: self.start_col.min(other.start_col),
            end_row: self.end_row.max(other.end_row),
            end_col: self.end_col.max(other.end_col),
        }
    }

    /// Intersection with the sheet bounds, if any cell survives.
    pub fn clip(&self, num_rows: u32, num_cols: u32) -> Option<Region> {
        if num_rows == 0 || num_cols == 0 || self.start_row >= num_rows || self.start_col >= num_cols {
            return None;
        }
        Some(Region {
            start_row: self.start_row,
            start_col: self.start_col,
            end_row: self.end_row.min(num_rows - 1),
            end_col: self.end_col.min(num_cols - 1),
        })
    }
}

/// Converts a 0-based column index to a column string.
/// 0 -> "A", 1 -> "B", ..., 25 -> "Z", 26 -> "AA", 27 -> "AB", etc.
pub fn column_name(mut col_index: u32) -> String {
    let mut result = String::new();
    loop {
        let remainder = col_index % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }
    result
}

impl fmt::Display for Region {
    /// A1-style range, e.g. "B2:D4". Whole rows/columns print as "3:3" / "C:C".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_col == 0 && self.end_col == u32::MAX {
            return write!(f, "{}:{}", self.start_row as u64 + 1, self.end_row as u64 + 1);
        }
        if self.start_row == 0 && self.end_row == u32::MAX {
            return write!(f, "{}:{}", column_name(self.start_col), column_name(self.end_col));
        }
        write!(
            f,
            "{}{}:{}{}",
            column_name(self.start_col),
            self.start_row as u64 + 1,
            column_name(self.end_col),
            self.end_row as u64 + 1
        )
    }
}
