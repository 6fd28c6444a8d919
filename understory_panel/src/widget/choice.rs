// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use understory_geometry::{Corners, ShapeList, TextAnchor, round_base, round_outline};

use super::{ControlKind, EventCx, PaintCx, Widget, segment, segment_at, text_run, value_area};
use crate::binding::Binding;
use crate::event::{PointerButtons, PointerEvent};
use crate::style::rgba;

/// One segment per enumeration entry; pressing a segment selects it.
#[derive(Debug)]
pub(crate) struct Choice {
    binding: Binding,
}

impl Choice {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }
}

impl Widget for Choice {
    fn kind(&self) -> ControlKind {
        ControlKind::Choice
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let palette = &style.palette;
        let labels = self.binding.enum_labels(cx.params()).unwrap_or_default();
        let selected = self.binding.enum_index(cx.params());
        let area = cx.value_area();
        let count = labels.len();

        let mut list = ShapeList::new();
        list.push_text(cx.title_run(style.text_inset));
        for (i, label) in labels.iter().enumerate() {
            let seg = segment(area, count, i);
            let corners = match (i == 0, i + 1 == count) {
                (true, true) => Corners::ALL,
                (true, false) => Corners::TOP_LEFT | Corners::BOTTOM_LEFT,
                (false, true) => Corners::TOP_RIGHT | Corners::BOTTOM_RIGHT,
                (false, false) => Corners::empty(),
            };
            let on = selected == Some(i);
            let (fill, text) = if on {
                (palette.field_active, palette.text_active)
            } else {
                (palette.field, palette.text)
            };
            list.push(round_base(
                i,
                seg,
                style.field_radius,
                rgba(fill.bottom),
                rgba(fill.top),
                corners,
            ));
            list.push(round_outline(
                i,
                seg,
                style.field_radius,
                rgba(palette.outline),
                corners,
            ));
            let mut run = text_run(
                label,
                Point::new(seg.center().x, seg.y0 + style.baseline),
                rgba(text),
                style,
            );
            run.anchor = TextAnchor::Center;
            run.width = Some(seg.width());
            list.push_text(run);
        }
        list
    }

    fn press(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        if !event.buttons.contains(PointerButtons::PRIMARY) {
            return;
        }
        let count = self
            .binding
            .enum_labels(cx.params)
            .map_or(0, |labels| labels.len());
        let area = value_area(cx.rect(), cx.style);
        if let Some(index) = segment_at(area, count, event.pos.x) {
            self.binding.select_enum(cx.params, index);
        }
    }

    fn binding(&self) -> Option<&Binding> {
        Some(&self.binding)
    }
}
