// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Point;
use understory_geometry::{Corners, ShapeList, TextAnchor, round_base, round_outline};
use understory_parameter::ParamStore;

use super::{ControlKind, EventCx, PaintCx, Widget, text_run};
use crate::event::{PointerButtons, PointerEvent};
use crate::style::rgba;

/// Callback run when an action button is clicked.
pub type ActionCallback = Box<dyn FnMut(&mut ParamStore)>;

/// Push button. Fires on release inside after a press inside.
pub(crate) struct Action {
    callback: ActionCallback,
    pressed: bool,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

impl Action {
    pub(crate) fn new(callback: ActionCallback) -> Self {
        Self {
            callback,
            pressed: false,
        }
    }
}

impl Widget for Action {
    fn kind(&self) -> ControlKind {
        ControlKind::Action
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let palette = &style.palette;
        let rect = cx.rect();
        let (fill, outline, text) = if cx.is_active() {
            (palette.field_active, palette.outline, palette.text_active)
        } else {
            (palette.button, palette.outline_idle, palette.text)
        };
        let mut list = ShapeList::new();
        list.push(round_base(
            0,
            rect,
            style.field_radius,
            rgba(fill.bottom),
            rgba(fill.top),
            Corners::ALL,
        ));
        list.push(round_outline(
            0,
            rect,
            style.field_radius,
            rgba(outline),
            Corners::ALL,
        ));
        let mut run = text_run(
            cx.title(),
            Point::new(rect.center().x, rect.y0 + style.baseline),
            rgba(text),
            style,
        );
        run.anchor = TextAnchor::Center;
        list.push_text(run);
        list
    }

    fn press(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        if event.buttons.contains(PointerButtons::PRIMARY) {
            self.pressed = true;
            cx.activate();
        }
    }

    fn release(&mut self, cx: &mut EventCx<'_>, _event: &PointerEvent) {
        if core::mem::take(&mut self.pressed) {
            (self.callback)(cx.params);
        }
        cx.deactivate();
    }

    fn release_outside(&mut self, cx: &mut EventCx<'_>, _event: &PointerEvent) {
        self.pressed = false;
        cx.deactivate();
    }
}
