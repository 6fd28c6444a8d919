// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live controls: a widget plus its frame, title and geometry cache.

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_geometry::GeometryCache;

use crate::layout::LayoutId;
use crate::widget::{ControlFrame, Widget};

/// Identifier of a control within its [`Ui`](crate::Ui).
///
/// IDs are never reused, so a stale ID simply stops resolving.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub(crate) u32);

pub(crate) struct Control {
    pub(crate) title: String,
    pub(crate) frame: ControlFrame,
    pub(crate) cache: GeometryCache,
    pub(crate) widget: Box<dyn Widget>,
    pub(crate) needs_paint: bool,
    pub(crate) parent: LayoutId,
}

impl core::fmt::Debug for Control {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Control")
            .field("title", &self.title)
            .field("frame", &self.frame)
            .field("kind", &self.widget.kind())
            .field("cache", &self.cache.id())
            .field("needs_paint", &self.needs_paint)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

impl Control {
    /// Inclusive on every edge, so controls stacked edge to edge both see a
    /// press on the shared line.
    pub(crate) fn contains(&self, pos: Point) -> bool {
        let r: Rect = self.frame.rect;
        pos.x >= r.x0 && pos.x <= r.x1 && pos.y >= r.y0 && pos.y <= r.y1
    }
}

/// Every live control, in creation order.
#[derive(Debug, Default)]
pub(crate) struct Controls {
    map: HashMap<ControlId, Control>,
    order: Vec<ControlId>,
    next: u32,
}

impl Controls {
    pub(crate) fn insert(&mut self, control: Control) -> ControlId {
        let id = ControlId(self.next);
        self.next += 1;
        self.map.insert(id, control);
        self.order.push(id);
        id
    }

    pub(crate) fn remove(&mut self, id: ControlId) -> Option<Control> {
        let control = self.map.remove(&id)?;
        self.order.retain(|c| *c != id);
        Some(control)
    }

    pub(crate) fn get(&self, id: ControlId) -> Option<&Control> {
        self.map.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.map.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: ControlId) -> bool {
        self.map.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn ids(&self) -> &[ControlId] {
        &self.order
    }

    /// Controls containing `pos` among those `eligible` accepts, in order.
    pub(crate) fn hits(
        &self,
        pos: Point,
        mut eligible: impl FnMut(&Control) -> bool,
    ) -> SmallVec<[ControlId; 4]> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.map
                    .get(id)
                    .is_some_and(|c| c.contains(pos) && eligible(c))
            })
            .collect()
    }

    /// Active controls, in order.
    pub(crate) fn active(&self) -> SmallVec<[ControlId; 4]> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.map.get(id).is_some_and(|c| c.frame.active))
            .collect()
    }
}
