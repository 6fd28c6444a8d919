// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use understory_geometry::{Corners, ShapeList, histogram, round_outline};
use understory_parameter::{Histogram, ParamId};

use super::{ControlKind, EventCx, PaintCx, Widget};
use crate::binding::Binding;
use crate::event::PointerEvent;
use crate::style::{Style, rgba};

/// Read-only plot of a histogram parameter: title row, then the plot.
#[derive(Debug)]
pub(crate) struct HistogramPlot {
    binding: Binding,
    param: ParamId,
}

impl HistogramPlot {
    pub(crate) fn new(param: ParamId) -> Self {
        Self {
            binding: Binding::Param(param),
            param,
        }
    }
}

impl Widget for HistogramPlot {
    fn kind(&self) -> ControlKind {
        ControlKind::Histogram
    }

    fn height(&self, _width: f64, style: &Style) -> f64 {
        style.row_height + style.histogram_height
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let rect = cx.rect();
        let plot = Rect::new(
            rect.x0 + style.text_inset,
            rect.y0,
            rect.x1 - style.text_inset,
            rect.y0 + style.histogram_height,
        );
        let mut list = ShapeList::new();
        list.push_text(cx.title_run(style.text_inset));
        list.push(round_outline(
            0,
            plot,
            0.0,
            rgba(style.palette.outline),
            Corners::empty(),
        ));
        if let Ok(data) = cx.params().value_by_id::<Histogram>(self.param) {
            for (i, channel) in data.channels.iter().enumerate() {
                if let Some(shape) = histogram(i, plot, &channel.points, channel.color) {
                    list.push(shape);
                }
            }
        }
        list
    }

    fn press(&mut self, _cx: &mut EventCx<'_>, _event: &PointerEvent) {}

    fn binding(&self) -> Option<&Binding> {
        Some(&self.binding)
    }
}
