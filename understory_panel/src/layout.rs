// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking layouts.
//!
//! A layout places its children top-down (vertical) or left to right
//! (horizontal). Positions use window pixels with `y` up, and a layout is
//! anchored by its *top* edge, so adding children grows it downwards.
//!
//! Arranging a vertical layout at `(x, top)` with padding `p` and effective
//! width `w = width * width_fraction`:
//!
//! 1. the cursor starts at `top - p`;
//! 2. each child gets width `w`, its height for that width, and the
//!    rectangle `[x, x + w] x [cursor - h, cursor]`; then `cursor -= h + p`;
//! 3. the layout's height is `top - cursor`.
//!
//! A horizontal layout splits `w` equally among its children, tops them all
//! at `top - p` and is `2p` taller than its tallest child. An empty layout
//! has height zero and never draws a background.

use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;
use understory_geometry::{Corners, GeometryCache, ShapeList, round_base};

use crate::control::{ControlId, Controls};
use crate::style::{Style, rgba};

/// Identifier of a layout within its [`Ui`](crate::Ui).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub(crate) u32);

/// Stacking direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// A layout child.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Child {
    Control(ControlId),
    Layout(LayoutId),
}

#[derive(Debug)]
pub(crate) struct LayoutNode {
    pub(crate) x: f64,
    pub(crate) top: f64,
    pub(crate) width: f64,
    pub(crate) width_fraction: f64,
    pub(crate) padding: f64,
    pub(crate) orientation: Orientation,
    pub(crate) children: SmallVec<[Child; 8]>,
    pub(crate) background: bool,
    pub(crate) height: f64,
    pub(crate) cache: GeometryCache,
    pub(crate) needs_paint: bool,
    pub(crate) parent: Option<LayoutId>,
}

impl LayoutNode {
    pub(crate) fn new(
        cache: GeometryCache,
        orientation: Orientation,
        padding: f64,
        parent: Option<LayoutId>,
    ) -> Self {
        Self {
            x: 0.0,
            top: 0.0,
            width: 0.0,
            width_fraction: 1.0,
            padding,
            orientation,
            children: SmallVec::new(),
            background: false,
            height: 0.0,
            cache,
            needs_paint: true,
            parent,
        }
    }

    /// Width children are laid out in.
    pub(crate) fn inner_width(&self) -> f64 {
        self.width * self.width_fraction
    }

    /// Box the layout covers, padding included.
    pub(crate) fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.padding,
            self.top - self.height,
            self.x + self.inner_width() + self.padding,
            self.top,
        )
    }

    /// Background box, when one is drawn.
    pub(crate) fn background_rect(&self) -> Option<Rect> {
        (self.background && !self.children.is_empty()).then(|| self.bounds())
    }

    pub(crate) fn paint(&self, style: &Style) -> ShapeList {
        let mut list = ShapeList::new();
        if let Some(rect) = self.background_rect() {
            let fill = style.palette.background;
            list.push(round_base(
                0,
                rect,
                style.background_radius,
                rgba(fill.bottom),
                rgba(fill.top),
                Corners::ALL,
            ));
        }
        list
    }
}

/// Every live layout.
#[derive(Debug, Default)]
pub(crate) struct Layouts {
    map: HashMap<LayoutId, LayoutNode>,
    next: u32,
}

impl Layouts {
    pub(crate) fn insert(&mut self, node: LayoutNode) -> LayoutId {
        let id = LayoutId(self.next);
        self.next += 1;
        self.map.insert(id, node);
        id
    }

    pub(crate) fn remove(&mut self, id: LayoutId) -> Option<LayoutNode> {
        self.map.remove(&id)
    }

    pub(crate) fn get(&self, id: LayoutId) -> Option<&LayoutNode> {
        self.map.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: LayoutId) -> Option<&mut LayoutNode> {
        self.map.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: LayoutId) -> bool {
        self.map.contains_key(&id)
    }

    /// Live layouts, oldest first.
    pub(crate) fn ids(&self) -> Vec<LayoutId> {
        let mut ids: Vec<LayoutId> = self.map.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// The root of the tree `id` belongs to.
    pub(crate) fn top_level(&self, mut id: LayoutId) -> LayoutId {
        while let Some(parent) = self.map.get(&id).and_then(|n| n.parent) {
            id = parent;
        }
        id
    }

    /// Every control and layout below `id`, `id` included, deepest first.
    pub(crate) fn subtree(&self, id: LayoutId) -> (Vec<ControlId>, Vec<LayoutId>) {
        let mut controls = Vec::new();
        let mut layouts = Vec::new();
        self.collect(id, &mut controls, &mut layouts);
        (controls, layouts)
    }

    fn collect(&self, id: LayoutId, controls: &mut Vec<ControlId>, layouts: &mut Vec<LayoutId>) {
        let Some(node) = self.map.get(&id) else {
            return;
        };
        for child in &node.children {
            match *child {
                Child::Control(c) => controls.push(c),
                Child::Layout(l) => self.collect(l, controls, layouts),
            }
        }
        layouts.push(id);
    }

    /// Positions every descendant of `id` and returns its height.
    ///
    /// The layout's own `x`, `top` and `width` must already be set.
    pub(crate) fn arrange(&mut self, controls: &mut Controls, id: LayoutId, style: &Style) -> f64 {
        let Some(node) = self.map.get(&id) else {
            return 0.0;
        };
        let (x, top, pad) = (node.x, node.top, node.padding);
        let width = node.inner_width();
        let orientation = node.orientation;
        let children = node.children.clone();

        let height = if children.is_empty() {
            0.0
        } else {
            match orientation {
                Orientation::Vertical => {
                    let mut cursor = top - pad;
                    for child in children {
                        let h = self.place(controls, child, x, cursor, width, style);
                        cursor -= h + pad;
                    }
                    top - cursor
                }
                Orientation::Horizontal => {
                    let share = width / children.len() as f64;
                    let mut tallest = 0.0_f64;
                    for (i, child) in children.into_iter().enumerate() {
                        let left = x + i as f64 * share;
                        let h = self.place(controls, child, left, top - pad, share, style);
                        tallest = tallest.max(h);
                    }
                    2.0 * pad + tallest
                }
            }
        };
        if let Some(node) = self.map.get_mut(&id) {
            node.height = height;
            node.needs_paint = true;
        }
        height
    }

    fn place(
        &mut self,
        controls: &mut Controls,
        child: Child,
        x: f64,
        top: f64,
        width: f64,
        style: &Style,
    ) -> f64 {
        match child {
            Child::Layout(id) => {
                if let Some(node) = self.map.get_mut(&id) {
                    node.x = x;
                    node.top = top;
                    node.width = width;
                }
                self.arrange(controls, id, style)
            }
            Child::Control(id) => {
                let Some(control) = controls.get_mut(id) else {
                    return 0.0;
                };
                let h = control.widget.height(width, style);
                control.frame.rect = Rect::new(x, top - h, x + width, top);
                control.needs_paint = true;
                h
            }
        }
    }
}
