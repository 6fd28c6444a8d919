// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame batching over a [`GeometryBackend`].

use std::collections::BTreeMap;

use kurbo::Size;

use crate::backend::{BufferId, GeometryBackend};
use crate::cache::GeometryCache;
use crate::shape::{DrawGroup, PrimitiveMode, TextRun};

/// Identifies the [`GeometryCache`] that owns a set of buffers and text runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheId(u32);

/// Counts from one [`Batch::draw`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Number of `draw_batch` calls issued.
    pub batches: usize,
    /// Number of buffers across those calls.
    pub buffers: usize,
    /// Number of text runs drawn.
    pub texts: usize,
}

/// Buffers grouped by draw state, drawn with one call per group.
///
/// The batch owns the backend. [`GeometryCache`]s created from it register
/// and release buffers here; [`draw`](Self::draw) then walks the groups in
/// [`DrawGroup::ALL`] order, skipping empty ones, and finishes with a single
/// text call.
///
/// ```
/// use kurbo::Rect;
/// use understory_geometry::{Batch, Corners, RecordingBackend, round_base};
///
/// let mut batch = Batch::new(RecordingBackend::default());
/// let mut cache = batch.create_cache();
/// let rect = Rect::new(0.0, 0.0, 100.0, 16.0);
/// cache.add_shape(&mut batch, &round_base(0, rect, 6.0, [0.5; 4], [0.6; 4], Corners::ALL));
///
/// let stats = batch.draw();
/// assert_eq!(stats.batches, 1);
/// assert_eq!(stats.buffers, 1);
/// ```
#[derive(Debug)]
pub struct Batch<B: GeometryBackend> {
    backend: B,
    groups: [Vec<BufferId>; 4],
    texts: BTreeMap<CacheId, Vec<TextRun>>,
    next_cache: u32,
    viewport: Size,
}

impl<B: GeometryBackend> Batch<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            groups: core::array::from_fn(|_| Vec::new()),
            texts: BTreeMap::new(),
            next_cache: 0,
            viewport: Size::ZERO,
        }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the batch and returns the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Creates an empty cache whose text runs are drawn by this batch.
    pub fn create_cache(&mut self) -> GeometryCache {
        let id = CacheId(self.next_cache);
        self.next_cache = self.next_cache.wrapping_add(1);
        GeometryCache::new(id)
    }

    /// Number of live buffers in `group`.
    #[must_use]
    pub fn buffer_count(&self, group: DrawGroup) -> usize {
        self.groups[group.index()].len()
    }

    /// Total number of live buffers.
    #[must_use]
    pub fn total_buffers(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Records the window size and forwards it to the backend.
    pub fn resize(&mut self, size: Size) {
        self.viewport = size;
        self.backend.set_viewport(size);
    }

    pub(crate) fn allocate(&mut self, group: DrawGroup, mode: PrimitiveMode, len: usize) -> BufferId {
        let id = self.backend.create_buffer(group, mode, len);
        self.groups[group.index()].push(id);
        id
    }

    pub(crate) fn release(&mut self, group: DrawGroup, id: BufferId) {
        self.groups[group.index()].retain(|b| *b != id);
        self.backend.destroy_buffer(id);
    }

    pub(crate) fn set_texts(&mut self, owner: CacheId, runs: Vec<TextRun>) {
        if runs.is_empty() {
            self.texts.remove(&owner);
        } else {
            self.texts.insert(owner, runs);
        }
    }

    /// Issues one draw per non-empty group, then one text draw.
    pub fn draw(&mut self) -> DrawStats {
        let mut stats = DrawStats::default();
        for group in DrawGroup::ALL {
            let buffers = &self.groups[group.index()];
            if buffers.is_empty() {
                continue;
            }
            self.backend.draw_batch(group, buffers);
            stats.batches += 1;
            stats.buffers += buffers.len();
        }
        let runs: Vec<TextRun> = self.texts.values().flatten().cloned().collect();
        if !runs.is_empty() {
            stats.texts = runs.len();
            self.backend.draw_text(&runs);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{Corners, round_base, round_outline};
    use crate::recording::{BackendEvent, RecordingBackend};
    use crate::shape::{ShapeList, TextAnchor};
    use kurbo::{Point, Rect};

    fn label(text: &str) -> TextRun {
        TextRun {
            text: text.into(),
            origin: Point::ZERO,
            anchor: TextAnchor::Left,
            color: [0.0, 0.0, 0.0, 1.0],
            size: 8.0,
            width: None,
            caret: None,
        }
    }

    #[test]
    fn empty_batch_draws_nothing() {
        let mut batch = Batch::new(RecordingBackend::default());
        assert_eq!(batch.draw(), DrawStats::default());
        assert!(batch.backend().events().is_empty());
    }

    #[test]
    fn one_call_per_group_in_order() {
        let mut batch = Batch::new(RecordingBackend::default());
        let rect = Rect::new(0.0, 0.0, 50.0, 16.0);
        let mut a = batch.create_cache();
        let mut b = batch.create_cache();
        for cache in [&mut a, &mut b] {
            let mut list = ShapeList::new();
            list.push(round_outline(0, rect, 6.0, [0.2; 4], Corners::ALL));
            list.push(round_base(0, rect, 6.0, [0.5; 4], [0.6; 4], Corners::ALL));
            list.push_text(label("x"));
            cache.apply(&mut batch, &list);
        }
        batch.backend_mut().clear_events();

        let stats = batch.draw();
        assert_eq!(stats.batches, 2);
        assert_eq!(stats.buffers, 4);
        assert_eq!(stats.texts, 2);

        let draws: Vec<_> = batch
            .backend()
            .events()
            .iter()
            .map(|e| match e {
                BackendEvent::DrawBatch { group, buffers } => (Some(*group), buffers.len()),
                BackendEvent::DrawText { runs } => (None, runs.len()),
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(
            draws,
            [
                (Some(DrawGroup::Plain), 2),
                (Some(DrawGroup::Outline), 2),
                (None, 2)
            ]
        );
    }

    #[test]
    fn resize_reaches_backend() {
        let mut batch = Batch::new(RecordingBackend::default());
        batch.resize(Size::new(640.0, 480.0));
        assert_eq!(batch.viewport(), Size::new(640.0, 480.0));
        assert_eq!(batch.backend().viewport(), Size::new(640.0, 480.0));
    }
}
