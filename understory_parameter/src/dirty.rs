// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty parameter tracking.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::id::ParamId;

/// Parameters written since the last drain, with a generation counter.
///
/// A frame loop drains this once per frame and redraws every control bound
/// to a drained parameter. The generation increments on every mutation, so
/// callers can cheaply tell whether anything happened since they last looked.
///
/// ```
/// use understory_parameter::{DirtyParams, ParamId};
///
/// let mut dirty = DirtyParams::new();
/// dirty.mark(ParamId::new(3));
/// dirty.mark(ParamId::new(1));
/// dirty.mark(ParamId::new(3));
/// assert_eq!(dirty.len(), 2);
///
/// let drained = dirty.drain();
/// assert_eq!(drained, vec![ParamId::new(1), ParamId::new(3)]);
/// assert!(dirty.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DirtyParams {
    keys: HashSet<ParamId>,
    generation: u64,
}

impl DirtyParams {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Marks a parameter dirty. Returns `true` if it was not dirty already.
    pub fn mark(&mut self, id: ParamId) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.keys.insert(id)
    }

    /// Returns `true` if the parameter is dirty.
    #[must_use]
    pub fn is_dirty(&self, id: ParamId) -> bool {
        self.keys.contains(&id)
    }

    /// Returns `true` if nothing is dirty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of dirty parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Removes and returns every dirty parameter, in ID order.
    pub fn drain(&mut self) -> Vec<ParamId> {
        if self.keys.is_empty() {
            return Vec::new();
        }
        self.generation = self.generation.wrapping_add(1);
        let mut ids: Vec<ParamId> = self.keys.drain().collect();
        ids.sort_unstable();
        ids
    }

    /// Clears the set without returning its contents.
    pub fn clear(&mut self) {
        if !self.keys.is_empty() {
            self.generation = self.generation.wrapping_add(1);
            self.keys.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_reports_new_insertions() {
        let mut dirty = DirtyParams::new();
        assert!(dirty.mark(ParamId::new(0)));
        assert!(!dirty.mark(ParamId::new(0)));
        assert!(dirty.is_dirty(ParamId::new(0)));
        assert!(!dirty.is_dirty(ParamId::new(1)));
    }

    #[test]
    fn generation_moves_on_mutation() {
        let mut dirty = DirtyParams::new();
        let g0 = dirty.generation();
        dirty.mark(ParamId::new(0));
        let g1 = dirty.generation();
        assert!(g1 > g0);
        dirty.drain();
        assert!(dirty.generation() > g1);
    }

    #[test]
    fn empty_drain_keeps_generation() {
        let mut dirty = DirtyParams::new();
        let g = dirty.generation();
        assert!(dirty.drain().is_empty());
        dirty.clear();
        assert_eq!(dirty.generation(), g);
    }

    #[test]
    fn drain_is_sorted() {
        let mut dirty = DirtyParams::new();
        for i in [5, 2, 9, 0] {
            dirty.mark(ParamId::new(i));
        }
        let ids: Vec<u32> = dirty.drain().into_iter().map(ParamId::index).collect();
        assert_eq!(ids, [0, 2, 5, 9]);
    }
}
