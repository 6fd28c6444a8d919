// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch of input events to controls.
//!
//! The router never hit-tests by itself: the `Ui` decides which controls a
//! pointer event hits and passes them in. What the router owns is the
//! bookkeeping that outlives one event, namely which control is editing.
//!
//! | Event | Receivers |
//! |-------|-----------|
//! | press | every hit control, after committing an edit elsewhere |
//! | release | `release` for hit controls, `release_outside` for other active ones |
//! | drag | every active control, wherever the pointer is |
//! | text, key | the editing control only |

use log::trace;
use understory_parameter::ParamStore;

use crate::control::{ControlId, Controls};
use crate::event::{DragEvent, Key, Modifiers, PointerEvent};
use crate::style::Style;
use crate::widget::{EventCx, Request, Widget};

/// Mutable state a dispatch needs besides the router itself.
pub(crate) struct Dispatch<'a> {
    pub(crate) controls: &'a mut Controls,
    pub(crate) params: &'a mut ParamStore,
    pub(crate) style: &'a Style,
    pub(crate) requests: &'a mut Vec<Request>,
}

impl Dispatch<'_> {
    /// Runs `f` on one control's widget and marks the control for repaint.
    /// Returns whether the widget is editing afterwards.
    fn with(
        &mut self,
        id: ControlId,
        f: impl FnOnce(&mut dyn Widget, &mut EventCx<'_>),
    ) -> Option<bool> {
        let control = self.controls.get_mut(id)?;
        let mut cx = EventCx {
            params: self.params,
            frame: &mut control.frame,
            style: self.style,
            requests: self.requests,
        };
        f(control.widget.as_mut(), &mut cx);
        control.needs_paint = true;
        Some(control.widget.editing())
    }
}

/// Routes events and keeps at most one control editing.
#[derive(Debug, Default)]
pub(crate) struct EventRouter {
    editing: Option<ControlId>,
}

impl EventRouter {
    pub(crate) fn editing(&self) -> Option<ControlId> {
        self.editing
    }

    /// Records the editing state of `id` after it handled an event.
    fn settle(&mut self, d: &mut Dispatch<'_>, id: ControlId, editing: Option<bool>) {
        match editing {
            Some(true) => {
                if let Some(previous) = self.editing.filter(|p| *p != id) {
                    self.commit(d, previous);
                }
                self.editing = Some(id);
            }
            _ => {
                if self.editing == Some(id) {
                    self.editing = None;
                }
            }
        }
    }

    fn commit(&mut self, d: &mut Dispatch<'_>, id: ControlId) {
        trace!("committing edit of {id:?}");
        d.with(id, |w, cx| w.commit_edit(cx));
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    /// Applies and ends any edit in progress.
    pub(crate) fn commit_editing(&mut self, d: &mut Dispatch<'_>) {
        if let Some(id) = self.editing {
            self.commit(d, id);
        }
    }

    /// Drops editing state for a control that is going away.
    pub(crate) fn forget(&mut self, id: ControlId) {
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    pub(crate) fn press(&mut self, d: &mut Dispatch<'_>, hits: &[ControlId], event: &PointerEvent) {
        if let Some(id) = self.editing.filter(|e| !hits.contains(e)) {
            self.commit(d, id);
        }
        for &id in hits {
            let editing = d.with(id, |w, cx| w.press(cx, event));
            self.settle(d, id, editing);
        }
    }

    pub(crate) fn release(&mut self, d: &mut Dispatch<'_>, hits: &[ControlId], event: &PointerEvent) {
        let outside: Vec<ControlId> = d
            .controls
            .active()
            .into_iter()
            .filter(|id| !hits.contains(id))
            .collect();
        for &id in hits {
            let editing = d.with(id, |w, cx| w.release(cx, event));
            self.settle(d, id, editing);
        }
        for id in outside {
            let editing = d.with(id, |w, cx| w.release_outside(cx, event));
            self.settle(d, id, editing);
        }
    }

    pub(crate) fn drag(&mut self, d: &mut Dispatch<'_>, event: &DragEvent) {
        for id in d.controls.active() {
            let editing = d.with(id, |w, cx| w.drag(cx, event));
            self.settle(d, id, editing);
        }
    }

    pub(crate) fn text(&mut self, d: &mut Dispatch<'_>, text: &str) {
        if let Some(id) = self.editing {
            let editing = d.with(id, |w, cx| w.text(cx, text));
            self.settle(d, id, editing);
        }
    }

    pub(crate) fn key(&mut self, d: &mut Dispatch<'_>, key: Key, modifiers: Modifiers) {
        if let Some(id) = self.editing {
            let editing = d.with(id, |w, cx| w.key(cx, key, modifiers));
            self.settle(d, id, editing);
        }
    }
}
