// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed and slidable numeric fields, one per component.
//!
//! The primary button edits text, the auxiliary button slides. A slide
//! moves the value by `dx * (max - min) / slide_pixels` from where it was
//! grabbed and keeps going after the pointer leaves the control.

use kurbo::{Point, Rect};
use log::debug;
use understory_geometry::{Corners, ShapeList, TextCaret, round_base, round_outline};

use super::{
    ControlKind, EventCx, PaintCx, Widget, caret_run, segment, segment_at, text_run, value_area,
};
use crate::binding::Binding;
use crate::drag::SlideState;
use crate::event::{DragEvent, Key, Modifiers, PointerButtons, PointerEvent};
use crate::style::rgba;
use crate::text::{TextField, format_value, parse_value};

/// Inset of field text from the field's left edge.
const FIELD_TEXT_INSET: f64 = 6.0;

#[derive(Debug)]
pub(crate) struct Numeric {
    binding: Binding,
    edit: Option<(usize, TextField)>,
    slide: SlideState,
}

impl Numeric {
    pub(crate) fn new(binding: Binding) -> Self {
        Self {
            binding,
            edit: None,
            slide: SlideState::default(),
        }
    }

    fn begin(&mut self, cx: &EventCx<'_>, sub: usize) {
        let value = self.binding.component(cx.params, sub).unwrap_or_default();
        let subtype = self.binding.subtype(cx.params);
        self.edit = Some((sub, TextField::begin(format_value(value, subtype))));
    }

    fn cancel(&mut self, cx: &mut EventCx<'_>) {
        self.edit = None;
        cx.deactivate();
    }

    /// Character index under `x` inside field `sub`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "positive and bounded by the field width in characters"
    )]
    fn char_index(area: Rect, count: usize, sub: usize, x: f64, char_width: f64) -> usize {
        let left = segment(area, count, sub).x0 + FIELD_TEXT_INSET;
        if char_width <= 0.0 || x <= left {
            return 0;
        }
        ((x - left) / char_width).round() as usize
    }
}

impl Widget for Numeric {
    fn kind(&self) -> ControlKind {
        ControlKind::Numeric
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let palette = &style.palette;
        let count = self.binding.components(cx.params());
        let subtype = self.binding.subtype(cx.params());
        let area = cx.value_area();

        let mut list = ShapeList::new();
        list.push_text(cx.title_run(style.text_inset));
        for sub in 0..count {
            let field = segment(area, count, sub);
            let corners = match (sub == 0, sub + 1 == count) {
                (true, true) => Corners::ALL,
                (true, false) => Corners::TOP_LEFT | Corners::BOTTOM_LEFT,
                (false, true) => Corners::TOP_RIGHT | Corners::BOTTOM_RIGHT,
                (false, false) => Corners::empty(),
            };
            let editing = self.edit.as_ref().filter(|(s, _)| *s == sub);
            let active = editing.is_some() || self.slide.sub == Some(sub);
            let (fill, text_color) = if active {
                (palette.field_active, palette.text_active)
            } else {
                (palette.field, palette.text)
            };
            list.push(round_base(
                sub,
                field,
                style.field_radius,
                rgba(fill.bottom),
                rgba(fill.top),
                corners,
            ));
            list.push(round_outline(
                sub,
                field,
                style.field_radius,
                rgba(palette.outline),
                corners,
            ));
            let (text, caret) = match editing {
                Some((_, edit)) => (
                    edit.text().to_owned(),
                    Some(TextCaret {
                        position: edit.caret(),
                        mark: edit.mark(),
                    }),
                ),
                None => {
                    let value = self.binding.component(cx.params(), sub).unwrap_or_default();
                    (format_value(value, subtype), None)
                }
            };
            let mut run = text_run(
                &text,
                Point::new(field.x0 + FIELD_TEXT_INSET, field.y0 + style.baseline),
                rgba(text_color),
                style,
            );
            run.width = Some(field.width());
            list.push_text(caret_run(run, caret));
        }
        list
    }

    fn press(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        let count = self.binding.components(cx.params);
        let area = value_area(cx.rect(), cx.style);
        let hit = segment_at(area, count, event.pos.x);

        if event.buttons.contains(PointerButtons::AUXILIARY) {
            if let Some(sub) = hit {
                let origin = self.binding.component(cx.params, sub).unwrap_or_default();
                self.slide.start(sub, cx.style.slide_pixels, origin);
                cx.activate();
            }
            return;
        }
        if !event.buttons.contains(PointerButtons::PRIMARY) {
            return;
        }
        cx.activate();
        let editing = self.edit.as_ref().map(|(sub, _)| *sub);
        match (hit, editing) {
            (Some(sub), Some(current)) if current == sub => {
                let index = Self::char_index(area, count, sub, event.pos.x, cx.style.char_width);
                if let Some((_, field)) = self.edit.as_mut() {
                    field.set_caret(index, event.modifiers.contains(Modifiers::SHIFT));
                }
            }
            (Some(sub), current) => {
                if current.is_some() {
                    self.commit_edit(cx);
                    cx.activate();
                }
                self.begin(cx, sub);
            }
            (None, Some(_)) => {
                self.commit_edit(cx);
                cx.activate();
            }
            (None, None) => {}
        }
    }

    fn release(&mut self, cx: &mut EventCx<'_>, _event: &PointerEvent) {
        self.slide.end();
        cx.deactivate();
    }

    fn release_outside(&mut self, cx: &mut EventCx<'_>, _event: &PointerEvent) {
        self.slide.end();
        if self.edit.is_some() {
            self.commit_edit(cx);
        }
        cx.deactivate();
    }

    fn drag(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) {
        let Some(sub) = self.slide.sub else {
            return;
        };
        if event.delta.x == 0.0 {
            return;
        }
        let range = self.binding.range(cx.params);
        if let Some(value) = self.slide.update(event.delta, range) {
            self.binding.set_component(cx.params, sub, value);
        }
    }

    fn text(&mut self, _cx: &mut EventCx<'_>, text: &str) {
        if let Some((_, field)) = self.edit.as_mut() {
            field.insert(text);
        }
    }

    fn key(&mut self, cx: &mut EventCx<'_>, key: Key, _modifiers: Modifiers) {
        if key.confirms() {
            self.commit_edit(cx);
            return;
        }
        if key == Key::Escape {
            self.cancel(cx);
            return;
        }
        let Some((_, field)) = self.edit.as_mut() else {
            return;
        };
        match key {
            Key::Backspace => field.backspace(),
            Key::Delete => field.delete(),
            Key::Left => field.left(),
            Key::Right => field.right(),
            Key::Home => field.home(),
            Key::End => field.end(),
            _ => {}
        }
    }

    fn editing(&self) -> bool {
        self.edit.is_some()
    }

    fn commit_edit(&mut self, cx: &mut EventCx<'_>) {
        if let Some((sub, field)) = self.edit.take() {
            let subtype = self.binding.subtype(cx.params);
            match parse_value(field.text(), subtype) {
                Some(value) => {
                    self.binding.set_component(cx.params, sub, value);
                }
                None => debug!("ignoring unparsable input {:?}", field.text()),
            }
        }
        cx.deactivate();
    }

    fn binding(&self) -> Option<&Binding> {
        Some(&self.binding)
    }
}
