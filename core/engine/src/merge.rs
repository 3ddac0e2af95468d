//! FILENAME: core/engine/src/merge.rs
//! PURPOSE: Non-overlapping merged regions and their re-ranging.
//! CONTEXT: When rows or columns are inserted or removed, every merge that
//! sits on or after the edit point moves, grows, shrinks or disappears.
//! `rerange` reports each change as a positional pair (performed[i]
//! replaced overridden[i]) and `undo_rerange` consumes exactly that pair
//! list to put the regions back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, SheetError};
use crate::logging::MERGE;
use crate::region::{Axis, Region};
use crate::{log_debug, log_warn};

/// A merged block of cells. The top-left cell is the anchor that holds
/// the value and format of the whole block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellMerge {
    pub region: Region,
}

impl CellMerge {
    pub fn new(region: Region) -> Self {
        CellMerge { region }
    }

    /// The (row, col) of the anchor cell.
    pub fn anchor(&self) -> (u32, u32) {
        (self.region.start_row, self.region.start_col)
    }
}

/// The outcome of re-ranging merges for one structural edit.
/// `performed[i]` replaced `overridden[i]`; `None` means the region
/// collapsed to zero size and was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeRerange {
    pub performed: Vec<Option<CellMerge>>,
    pub overridden: Vec<CellMerge>,
}

impl MergeRerange {
    pub fn is_empty(&self) -> bool {
        self.overridden.is_empty()
    }
}

/// Stores merges ordered by region, which makes iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeStore {
    merges: BTreeSet<CellMerge>,
}

impl MergeStore {
    pub fn new() -> Self {
        MergeStore::default()
    }

    pub fn len(&self) -> usize {
        self.merges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellMerge> {
        self.merges.iter()
    }

    /// Adds a merge, refusing any overlap with an existing one.
    pub fn add(&mut self, region: Region) -> Result<CellMerge> {
        if self.merges.iter().any(|m| m.region.overlaps(&region)) {
            log_warn!(MERGE, "add refused: {} overlaps an existing merge", region);
            return Err(SheetError::MergeOverlap(region));
        }
        let merge = CellMerge::new(region);
        self.merges.insert(merge);
        Ok(merge)
    }

    pub fn remove(&mut self, merge: &CellMerge) -> bool {
        self.merges.remove(merge)
    }

    /// The merge containing (row, col), if any.
    pub fn get_at(&self, row: u32, col: u32) -> Option<&CellMerge> {
        self.merges.iter().find(|m| m.region.contains(row, col))
    }

    pub fn get_overlapping(&self, region: &Region) -> Vec<&CellMerge> {
        self.merges.iter().filter(|m| m.region.overlaps(region)).collect()
    }

    /// Applies a structural shift of `delta` units at `index` along `axis`.
    ///
    /// Negative delta removes `-delta` indices starting at `index`: regions
    /// after the removed range move back, regions overlapping it lose the
    /// removed indices, and regions left with zero extent are dropped.
    /// Positive delta inserts `delta` indices before `index`: regions at or
    /// after it move forward, regions spanning it grow.
    pub fn rerange(&mut self, axis: Axis, index: u32, delta: i32) -> MergeRerange {
        let mut outcome = MergeRerange::default();
        if delta == 0 {
            return outcome;
        }

        for merge in &self.merges {
            if let Some(replacement) = rerange_span(merge.region.span(axis), index, delta) {
                outcome.performed.push(
                    replacement.map(|(start, end)| CellMerge::new(merge.region.with_span(axis, start, end))),
                );
                outcome.overridden.push(*merge);
            }
        }

        // Two phases so a moved region never collides with one not yet moved.
        for merge in &outcome.overridden {
            self.merges.remove(merge);
        }
        for merge in outcome.performed.iter().flatten() {
            self.merges.insert(*merge);
        }

        log_debug!(
            MERGE,
            "rerange axis={:?} index={} delta={} changed={}",
            axis,
            index,
            delta,
            outcome.overridden.len()
        );
        outcome
    }

    /// Exact inverse of the `rerange` call that produced `outcome`.
    pub fn undo_rerange(&mut self, outcome: &MergeRerange) {
        for merge in outcome.performed.iter().flatten() {
            self.merges.remove(merge);
        }
        for merge in &outcome.overridden {
            self.merges.insert(*merge);
        }
        log_debug!(MERGE, "undo_rerange restored={}", outcome.overridden.len());
    }
}

/// New span for one region along the edited axis.
/// Outer `None`: region unaffected. `Some(None)`: region collapses.
fn rerange_span((start, end): (u32, u32), index: u32, delta: i32) -> Option<Option<(u32, u32)>> {
    if end < index {
        return None;
    }

    if delta > 0 {
        let count = delta as u32;
        return if start >= index {
            Some(Some((start.saturating_add(count), end.saturating_add(count))))
        } else {
            Some(Some((start, end.saturating_add(count))))
        };
    }

    let count = delta.unsigned_abs();
    let removed_end = index.saturating_add(count - 1);
    if start > removed_end {
        return Some(Some((start - count, end - count)));
    }

    let overlap = end.min(removed_end) - start.max(index) + 1;
    let surviving = end - start + 1 - overlap;
    if surviving == 0 {
        return Some(None);
    }
    // A survivor may be a single cell and is kept as a merge. The
    // `SingleCellMerge` refusal applies only to merges created by command.
    let new_start = start.min(index);
    Some(Some((new_start, new_start + surviving - 1)))
}
