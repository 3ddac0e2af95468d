//! FILENAME: core/engine/src/interval.rs
//! PURPOSE: Sorted store of inclusive index ranges carrying a payload.
//! CONTEXT: One store per axis holds row formats and column formats.
//! Intervals are values: an edit replaces the stored value with a new one
//! and hands back the old value (and where it sat), so it can be put back
//! verbatim.
//!
//! Storage order is ascending `start`, ties kept in insertion order. Queries
//! return intervals in that order and "the" interval covering an index is
//! the first one found, so reversal restores positions as well as values.

use serde::{Deserialize, Serialize};

use crate::log_debug;
use crate::logging::FORMAT;

/// An inclusive range [start, end] on one axis with attached data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderedInterval<T> {
    pub start: u32,
    pub end: u32,
    pub data: T,
}

impl<T> OrderedInterval<T> {
    /// Creates an interval, normalizing so start <= end.
    pub fn new(start: u32, end: u32, data: T) -> Self {
        OrderedInterval {
            start: start.min(end),
            end: start.max(end),
            data,
        }
    }

    /// Number of indices covered.
    pub fn len(&self) -> u32 {
        (self.end - self.start).saturating_add(1)
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.start && index <= self.end
    }

    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        self.start <= end && self.end >= start
    }
}

/// Intervals removed and added by a `clear`, plus whatever the caller adds
/// on top. `removed_at[i]` is the storage position `removed[i]` held.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalEdit<T> {
    pub removed: Vec<OrderedInterval<T>>,
    pub added: Vec<OrderedInterval<T>>,
    removed_at: Vec<usize>,
}

impl<T> IntervalEdit<T> {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// A shrink performed by `IntervalStore::shrink_at`.
/// `shrunk` is `None` when the interval covered only the removed index.
/// `position` is where `original` sat in storage order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShrunkInterval<T> {
    pub original: OrderedInterval<T>,
    pub shrunk: Option<OrderedInterval<T>>,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalStore<T> {
    intervals: Vec<OrderedInterval<T>>,
}

impl<T> Default for IntervalStore<T> {
    fn default() -> Self {
        IntervalStore {
            intervals: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq> IntervalStore<T> {
    pub fn new() -> Self {
        IntervalStore::default()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// All intervals in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &OrderedInterval<T>> {
        self.intervals.iter()
    }

    /// Inserts an interval after every stored interval with an equal or
    /// smaller start. Adjacent or duplicate ranges are not coalesced.
    pub fn add(&mut self, interval: OrderedInterval<T>) {
        let position = self
            .intervals
            .partition_point(|existing| existing.start <= interval.start);
        self.intervals.insert(position, interval);
    }

    /// Removes the first stored interval equal to `interval` (bounds and data).
    /// Returns false when no such interval is stored.
    pub fn delete(&mut self, interval: &OrderedInterval<T>) -> bool {
        match self.intervals.iter().position(|existing| existing == interval) {
            Some(position) => {
                self.intervals.remove(position);
                true
            }
            None => false,
        }
    }

    /// Every interval intersecting [start, end], in storage order.
    pub fn get_overlapping_intervals(&self, start: u32, end: u32) -> Vec<&OrderedInterval<T>> {
        self.intervals
            .iter()
            .take_while(|interval| interval.start <= end)
            .filter(|interval| interval.overlaps(start, end))
            .collect()
    }

    /// The first interval covering `index`.
    pub fn get(&self, index: u32) -> Option<&OrderedInterval<T>> {
        self.intervals
            .iter()
            .take_while(|interval| interval.start <= index)
            .find(|interval| interval.contains(index))
    }

    // ========================================================================
    // SHRINK (index removed)
    // ========================================================================

    /// Removes one unit from every interval covering `index`, as happens when
    /// that index is removed from the axis. Each covering interval is replaced
    /// in its slot by a copy with `end - 1`; single-unit intervals are dropped.
    pub fn shrink_at(&mut self, index: u32) -> Vec<ShrunkInterval<T>> {
        let mut shrinks = Vec::new();
        let mut kept = Vec::with_capacity(self.intervals.len());

        for (position, original) in std::mem::take(&mut self.intervals).into_iter().enumerate() {
            if !original.contains(index) {
                kept.push(original);
                continue;
            }
            let shrunk = (original.len() > 1)
                .then(|| OrderedInterval::new(original.start, original.end - 1, original.data.clone()));
            if let Some(shrunk) = &shrunk {
                kept.push(shrunk.clone());
            }
            log_debug!(
                FORMAT,
                "shrink_at index={} [{}, {}] -> {:?}",
                index,
                original.start,
                original.end,
                shrunk.as_ref().map(|s| (s.start, s.end))
            );
            shrinks.push(ShrunkInterval {
                original,
                shrunk,
                position,
            });
        }

        self.intervals = kept;
        shrinks
    }

    /// Takes out the shrunk copies left by `shrink_at`. Afterwards the store
    /// holds exactly the intervals that did not cover the shrunk index.
    pub fn remove_shrunk(&mut self, shrinks: &[ShrunkInterval<T>]) {
        // Slot of each surviving copy: its old position minus the dropped
        // single-unit intervals that sat before it.
        let mut dropped = 0;
        let mut slots = Vec::new();
        for shrink in shrinks {
            match &shrink.shrunk {
                Some(shrunk) => slots.push((shrink.position - dropped, shrunk)),
                None => dropped += 1,
            }
        }

        for (slot, shrunk) in slots.into_iter().rev() {
            if self.intervals.get(slot) == Some(shrunk) {
                self.intervals.remove(slot);
            } else {
                self.delete(shrunk);
            }
        }
    }

    /// Puts every original recorded by `shrink_at` back at its position.
    /// Expects the store in the state `remove_shrunk` leaves it in.
    pub fn restore_shrunk(&mut self, shrinks: &[ShrunkInterval<T>]) {
        for shrink in shrinks {
            let position = shrink.position.min(self.intervals.len());
            self.intervals.insert(position, shrink.original.clone());
        }
    }

    /// Full reversal of `shrink_at` while the axis itself is unchanged.
    pub fn unshrink(&mut self, shrinks: &[ShrunkInterval<T>]) {
        self.remove_shrunk(shrinks);
        self.restore_shrunk(shrinks);
    }

    // ========================================================================
    // EXPAND (index inserted)
    // ========================================================================

    /// Grows by one unit every interval that strictly contains the boundary
    /// before `index` (start < index <= end), as happens when an index is
    /// inserted inside it. Returns (original, expanded) pairs.
    pub fn expand_at(&mut self, index: u32) -> Vec<(OrderedInterval<T>, OrderedInterval<T>)> {
        let mut expansions = Vec::new();
        for slot in self
            .intervals
            .iter_mut()
            .filter(|interval| interval.start < index && index <= interval.end)
        {
            let expanded = OrderedInterval::new(slot.start, slot.end.saturating_add(1), slot.data.clone());
            let original = std::mem::replace(slot, expanded.clone());
            expansions.push((original, expanded));
        }
        expansions
    }

    /// Reverses `expand_at`, putting each original back in its slot.
    pub fn unexpand(&mut self, expansions: &[(OrderedInterval<T>, OrderedInterval<T>)]) {
        for (original, expanded) in expansions {
            if let Some(slot) = self.intervals.iter_mut().find(|interval| **interval == *expanded) {
                *slot = original.clone();
            }
        }
    }

    /// Moves every interval whose start is >= `index` by `delta` units.
    /// Callers only pass a negative delta when no interval would cross zero.
    pub fn shift_from(&mut self, index: u32, delta: i64) {
        if delta == 0 {
            return;
        }
        for interval in self.intervals.iter_mut().filter(|i| i.start >= index) {
            interval.start = shift_index(interval.start, delta);
            interval.end = shift_index(interval.end, delta);
        }
    }

    // ========================================================================
    // CLEAR
    // ========================================================================

    /// Removes coverage of [start, end]. Partially covered intervals are
    /// split, keeping the parts outside the range.
    pub fn clear(&mut self, start: u32, end: u32) -> IntervalEdit<T> {
        let mut edit = IntervalEdit {
            removed: Vec::new(),
            added: Vec::new(),
            removed_at: Vec::new(),
        };
        let mut kept = Vec::with_capacity(self.intervals.len());
        for (position, interval) in std::mem::take(&mut self.intervals).into_iter().enumerate() {
            if interval.overlaps(start, end) {
                edit.removed_at.push(position);
                edit.removed.push(interval);
            } else {
                kept.push(interval);
            }
        }
        self.intervals = kept;

        for interval in &edit.removed {
            if interval.start < start {
                edit.added.push(OrderedInterval::new(interval.start, start - 1, interval.data.clone()));
            }
            if interval.end > end {
                edit.added.push(OrderedInterval::new(end + 1, interval.end, interval.data.clone()));
            }
        }
        for piece in &edit.added {
            self.add(piece.clone());
        }
        edit
    }

    /// Reverses an edit returned by `clear`, including anything the caller
    /// added to `added` after it, restoring the store exactly.
    pub fn revert(&mut self, edit: &IntervalEdit<T>) {
        // `add` places an interval after its equal-start peers, so the
        // newest copy of an added value is its last occurrence.
        for interval in edit.added.iter().rev() {
            if let Some(position) = self.intervals.iter().rposition(|existing| existing == interval) {
                self.intervals.remove(position);
            }
        }
        for (&position, interval) in edit.removed_at.iter().zip(&edit.removed) {
            let position = position.min(self.intervals.len());
            self.intervals.insert(position, interval.clone());
        }
    }
}

fn shift_index(index: u32, delta: i64) -> u32 {
    (index as i64 + delta).clamp(0, u32::MAX as i64) as u32
}
