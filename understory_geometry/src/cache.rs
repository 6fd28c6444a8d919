// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-widget shape cache.
//!
//! A widget repaints by handing its whole [`ShapeList`] to
//! [`GeometryCache::apply`]. Shapes are matched to existing buffers by key:
//!
//! - an unknown key allocates a buffer in the group implied by the key;
//! - a known key with a different vertex count resizes that buffer;
//! - a known key with the same vertex count overwrites it, no allocation.
//!
//! Keys from the previous paint that are missing from the new list are
//! released, so a widget whose shape count shrinks does not leave stale
//! geometry behind.

use hashbrown::{HashMap, HashSet};
use log::trace;

use crate::backend::{BufferId, GeometryBackend};
use crate::batch::{Batch, CacheId};
use crate::shape::{DrawGroup, PrimitiveMode, Shape, ShapeList, TextRun};

/// What [`GeometryCache::add_shape`] did with a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CacheOutcome {
    /// A new buffer was allocated.
    Created,
    /// The existing buffer was resized and rewritten.
    Resized,
    /// The existing buffer was rewritten in place.
    Updated,
    /// The shape had no vertices; any buffer under its key was released.
    Empty,
}

/// Counts from one [`GeometryCache::apply`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Buffers allocated.
    pub created: usize,
    /// Buffers resized.
    pub resized: usize,
    /// Buffers rewritten in place.
    pub updated: usize,
    /// Buffers released.
    pub released: usize,
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    buffer: BufferId,
    group: DrawGroup,
    mode: PrimitiveMode,
    len: usize,
}

/// Map from shape key to a retained buffer, owned by one widget.
#[derive(Debug)]
pub struct GeometryCache {
    id: CacheId,
    entries: HashMap<String, Entry>,
    has_text: bool,
}

impl GeometryCache {
    pub(crate) fn new(id: CacheId) -> Self {
        Self {
            id,
            entries: HashMap::new(),
            has_text: false,
        }
    }

    /// Identifier of this cache within its batch.
    #[must_use]
    pub fn id(&self) -> CacheId {
        self.id
    }

    /// Number of retained shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no shapes are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a shape is retained under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the buffer retained under `key`.
    #[must_use]
    pub fn buffer(&self, key: &str) -> Option<BufferId> {
        self.entries.get(key).map(|e| e.buffer)
    }

    /// Uploads one shape, reusing the buffer under its key when possible.
    pub fn add_shape<B: GeometryBackend>(
        &mut self,
        batch: &mut Batch<B>,
        shape: &Shape,
    ) -> CacheOutcome {
        if shape.is_empty() {
            if let Some(entry) = self.entries.remove(&shape.key) {
                batch.release(entry.group, entry.buffer);
            }
            return CacheOutcome::Empty;
        }
        let len = shape.len();
        if let Some(entry) = self.entries.get_mut(&shape.key) {
            if entry.mode == shape.mode {
                let outcome = if entry.len == len {
                    CacheOutcome::Updated
                } else {
                    batch.backend_mut().resize_buffer(entry.buffer, len);
                    entry.len = len;
                    CacheOutcome::Resized
                };
                batch.backend_mut().write_buffer(entry.buffer, shape);
                trace!("{:?} {outcome:?} '{}' ({len} vertices)", self.id, shape.key);
                return outcome;
            }
            let stale = *entry;
            self.entries.remove(&shape.key);
            batch.release(stale.group, stale.buffer);
        }
        let group = shape.group();
        let buffer = batch.allocate(group, shape.mode, len);
        batch.backend_mut().write_buffer(buffer, shape);
        self.entries.insert(
            shape.key.clone(),
            Entry {
                buffer,
                group,
                mode: shape.mode,
                len,
            },
        );
        trace!(
            "{:?} created '{}' in {group:?} ({len} vertices)",
            self.id, shape.key
        );
        CacheOutcome::Created
    }

    /// Releases every shape whose key contains `fragment`. Returns how many.
    pub fn delete_shapes<B: GeometryBackend>(&mut self, batch: &mut Batch<B>, fragment: &str) -> usize {
        let doomed: Vec<String> = self
            .entries
            .keys()
            .filter(|k| k.contains(fragment))
            .cloned()
            .collect();
        for key in &doomed {
            if let Some(entry) = self.entries.remove(key) {
                batch.release(entry.group, entry.buffer);
            }
        }
        if !doomed.is_empty() {
            trace!("{:?} released {} shapes matching '{fragment}'", self.id, doomed.len());
        }
        doomed.len()
    }

    /// Replaces this cache's text runs.
    pub fn set_texts<B: GeometryBackend>(&mut self, batch: &mut Batch<B>, runs: Vec<TextRun>) {
        self.has_text = !runs.is_empty();
        batch.set_texts(self.id, runs);
    }

    /// Makes the cache hold exactly the contents of `list`.
    pub fn apply<B: GeometryBackend>(&mut self, batch: &mut Batch<B>, list: &ShapeList) -> ApplyStats {
        let mut stats = ApplyStats::default();
        let mut seen: HashSet<&str> = HashSet::with_capacity(list.shapes.len());
        for shape in &list.shapes {
            seen.insert(shape.key.as_str());
            let had = self.entries.contains_key(&shape.key);
            match self.add_shape(batch, shape) {
                CacheOutcome::Created => stats.created += 1,
                CacheOutcome::Resized => stats.resized += 1,
                CacheOutcome::Updated => stats.updated += 1,
                CacheOutcome::Empty => stats.released += usize::from(had),
            }
        }
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|k| !seen.contains(k.as_str()))
            .cloned()
            .collect();
        for key in stale {
            if let Some(entry) = self.entries.remove(&key) {
                batch.release(entry.group, entry.buffer);
                stats.released += 1;
            }
        }
        if self.has_text || !list.texts.is_empty() {
            self.set_texts(batch, list.texts.clone());
        }
        stats
    }

    /// Releases every buffer and text run owned by this cache.
    pub fn release_all<B: GeometryBackend>(&mut self, batch: &mut Batch<B>) {
        let count = self.entries.len();
        for (_, entry) in self.entries.drain() {
            batch.release(entry.group, entry.buffer);
        }
        self.set_texts(batch, Vec::new());
        if count > 0 {
            trace!("{:?} released all {count} shapes", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{Corners, color_wheel, round_base, round_outline};
    use crate::recording::RecordingBackend;
    use kurbo::Rect;

    fn setup() -> (Batch<RecordingBackend>, GeometryCache) {
        let mut batch = Batch::new(RecordingBackend::default());
        let cache = batch.create_cache();
        (batch, cache)
    }

    fn base(index: usize, width: f64) -> Shape {
        round_base(
            index,
            Rect::new(0.0, 0.0, width, 16.0),
            6.0,
            [0.5; 4],
            [0.6; 4],
            Corners::ALL,
        )
    }

    #[test]
    fn same_length_reuses_the_buffer() {
        let (mut batch, mut cache) = setup();
        assert_eq!(cache.add_shape(&mut batch, &base(0, 50.0)), CacheOutcome::Created);
        let first = cache.buffer("roundbase0");
        assert_eq!(cache.add_shape(&mut batch, &base(0, 80.0)), CacheOutcome::Updated);
        assert_eq!(cache.buffer("roundbase0"), first);
        assert_eq!(batch.backend().created(), 1);
        assert_eq!(batch.total_buffers(), 1);
    }

    #[test]
    fn different_length_resizes_in_place() {
        let (mut batch, mut cache) = setup();
        let mut shape = base(0, 50.0);
        cache.add_shape(&mut batch, &shape);
        shape.vertices.truncate(10);
        shape.colors.truncate(10);
        assert_eq!(cache.add_shape(&mut batch, &shape), CacheOutcome::Resized);
        assert_eq!(batch.backend().created(), 1);
        let id = cache.buffer("roundbase0").unwrap();
        assert_eq!(batch.backend().buffer(id).unwrap().len, 10);
    }

    #[test]
    fn keys_pick_groups() {
        let (mut batch, mut cache) = setup();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        cache.add_shape(&mut batch, &base(0, 50.0));
        cache.add_shape(&mut batch, &round_outline(0, rect, 6.0, [0.2; 4], Corners::ALL));
        cache.add_shape(&mut batch, &color_wheel(rect, 1.0));
        assert_eq!(batch.buffer_count(DrawGroup::Plain), 1);
        assert_eq!(batch.buffer_count(DrawGroup::Outline), 1);
        assert_eq!(batch.buffer_count(DrawGroup::Shader), 1);
        assert_eq!(batch.buffer_count(DrawGroup::Additive), 0);
    }

    #[test]
    fn delete_by_fragment() {
        let (mut batch, mut cache) = setup();
        cache.add_shape(&mut batch, &base(0, 50.0));
        cache.add_shape(&mut batch, &base(1, 50.0));
        cache.add_shape(
            &mut batch,
            &round_outline(0, Rect::new(0.0, 0.0, 50.0, 16.0), 6.0, [0.2; 4], Corners::ALL),
        );
        assert_eq!(cache.delete_shapes(&mut batch, "roundbase"), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("roundoutline0"));
        assert_eq!(batch.backend().live_buffers(), 1);
        assert_eq!(cache.delete_shapes(&mut batch, "missing"), 0);
    }

    #[test]
    fn apply_releases_shapes_that_disappear() {
        let (mut batch, mut cache) = setup();
        let mut list = ShapeList::new();
        list.push(base(0, 50.0));
        list.push(base(1, 50.0));
        let stats = cache.apply(&mut batch, &list);
        assert_eq!(stats.created, 2);

        list.shapes.pop();
        let stats = cache.apply(&mut batch, &list);
        assert_eq!(
            stats,
            ApplyStats {
                updated: 1,
                released: 1,
                ..ApplyStats::default()
            }
        );
        assert_eq!(batch.total_buffers(), 1);
    }

    #[test]
    fn steady_state_apply_allocates_nothing() {
        let (mut batch, mut cache) = setup();
        let mut list = ShapeList::new();
        list.push(base(0, 50.0));
        cache.apply(&mut batch, &list);
        let created = batch.backend().created();
        for _ in 0..10 {
            cache.apply(&mut batch, &list);
        }
        assert_eq!(batch.backend().created(), created);
    }

    #[test]
    fn release_all_empties_the_batch() {
        let (mut batch, mut cache) = setup();
        cache.add_shape(&mut batch, &base(0, 50.0));
        cache.add_shape(&mut batch, &base(1, 50.0));
        cache.release_all(&mut batch);
        assert!(cache.is_empty());
        assert_eq!(batch.total_buffers(), 0);
        assert_eq!(batch.backend().live_buffers(), 0);
    }

    #[test]
    fn empty_shape_releases_its_key() {
        let (mut batch, mut cache) = setup();
        let mut shape = base(0, 50.0);
        cache.add_shape(&mut batch, &shape);
        shape.vertices.clear();
        shape.colors.clear();
        assert_eq!(cache.add_shape(&mut batch, &shape), CacheOutcome::Empty);
        assert!(cache.is_empty());
    }
}
