// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use understory_geometry::{Corners, ShapeList, checkmark, round_base, round_outline};

use super::{ControlKind, EventCx, PaintCx, Widget, text_run};
use crate::binding::Binding;
use crate::event::{PointerButtons, PointerEvent};
use crate::style::rgba;

/// Checkbox bound to a boolean. Flips once per press, on release.
#[derive(Debug)]
pub(crate) struct Toggle {
    binding: Binding,
    pressed: bool,
}

impl Toggle {
    pub(crate) fn new(binding: Binding) -> Self {
        Self {
            binding,
            pressed: false,
        }
    }

    fn finish(&mut self, cx: &mut EventCx<'_>) {
        if core::mem::take(&mut self.pressed) {
            let flag = self.binding.flag(cx.params).unwrap_or(false);
            self.binding.set_flag(cx.params, !flag);
        }
        cx.deactivate();
    }
}

impl Widget for Toggle {
    fn kind(&self) -> ControlKind {
        ControlKind::Toggle
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let palette = &style.palette;
        let rect = cx.rect();
        let checked = self.binding.flag(cx.params()).unwrap_or(false);
        let size = style.checkbox_size;
        let origin = Point::new(rect.x0 + 2.0, rect.y0 + (rect.height() - size) * 0.5);
        let square = Rect::from_origin_size(origin, (size, size));

        let fill = if checked || cx.is_active() {
            palette.field_active
        } else {
            palette.field
        };
        let outline = if checked || cx.is_active() {
            palette.outline
        } else {
            palette.outline_idle
        };
        let mut list = ShapeList::new();
        list.push(round_base(
            0,
            square,
            style.checkbox_radius,
            rgba(fill.bottom),
            rgba(fill.top),
            Corners::ALL,
        ));
        list.push(round_outline(
            0,
            square,
            style.checkbox_radius,
            rgba(outline),
            Corners::ALL,
        ));
        if checked {
            list.push(checkmark(square, rgba(palette.check)));
        }
        list.push_text(text_run(
            cx.title(),
            Point::new(rect.x0 + size + style.text_inset, rect.y0 + style.baseline),
            rgba(palette.text),
            style,
        ));
        list
    }

    fn press(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        if event.buttons.contains(PointerButtons::PRIMARY) {
            self.pressed = true;
            cx.activate();
        }
    }

    fn release(&mut self, cx: &mut EventCx<'_>, _event: &PointerEvent) {
        self.finish(cx);
    }

    fn release_outside(&mut self, cx: &mut EventCx<'_>, _event: &PointerEvent) {
        self.finish(cx);
    }

    fn binding(&self) -> Option<&Binding> {
        Some(&self.binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::Harness;
    use understory_parameter::{Param, ParamStore, Parameter};

    fn setup() -> (Harness, Param<bool>, Toggle) {
        let mut params = ParamStore::new();
        let p = params.register(Parameter::builder(false).title("Visible").build());
        let harness = Harness::new(params, Rect::new(0.0, 0.0, 200.0, 16.0));
        (harness, p, Toggle::new(Binding::Param(p.id())))
    }

    fn click(x: f64) -> PointerEvent {
        PointerEvent {
            pos: Point::new(x, 8.0),
            buttons: PointerButtons::PRIMARY,
            modifiers: crate::event::Modifiers::empty(),
        }
    }

    #[test]
    fn flips_on_release_inside() {
        let (mut h, p, mut toggle) = setup();
        toggle.press(&mut h.cx(), &click(5.0));
        assert!(h.frame.active);
        assert_eq!(h.params.get(p), Some(&false));
        toggle.release(&mut h.cx(), &click(5.0));
        assert_eq!(h.params.get(p), Some(&true));
        assert!(!h.frame.active);
    }

    #[test]
    fn flips_on_release_outside_after_inside_press() {
        let (mut h, p, mut toggle) = setup();
        toggle.press(&mut h.cx(), &click(5.0));
        toggle.release_outside(&mut h.cx(), &click(500.0));
        assert_eq!(h.params.get(p), Some(&true));
    }

    #[test]
    fn release_without_press_does_nothing() {
        let (mut h, p, mut toggle) = setup();
        toggle.release(&mut h.cx(), &click(5.0));
        toggle.release_outside(&mut h.cx(), &click(5.0));
        assert_eq!(h.params.get(p), Some(&false));
    }

    #[test]
    fn secondary_press_is_ignored() {
        let (mut h, p, mut toggle) = setup();
        let mut event = click(5.0);
        event.buttons = PointerButtons::SECONDARY;
        toggle.press(&mut h.cx(), &event);
        toggle.release(&mut h.cx(), &event);
        assert_eq!(h.params.get(p), Some(&false));
    }

    #[test]
    fn check_mark_only_when_checked() {
        let (mut h, p, toggle) = setup();
        let keys = |list: &ShapeList| list.shapes.iter().map(|s| s.key.clone()).collect::<Vec<_>>();
        let idle = h.paint(&toggle, "Visible");
        assert_eq!(keys(&idle), ["roundbase0", "roundoutline0"]);
        assert_eq!(idle.texts[0].origin, Point::new(18.0, 4.0));
        h.params.set(p, true).unwrap();
        let checked = h.paint(&toggle, "Visible");
        assert_eq!(keys(&checked), ["roundbase0", "roundoutline0", "checkmarkoutline"]);
    }
}
