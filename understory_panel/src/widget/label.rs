// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use understory_geometry::ShapeList;

use super::{ControlKind, PaintCx, Widget, text_run};
use crate::style::{Style, rgba};

/// Static text, word-wrapped to the control's width.
#[derive(Debug)]
pub(crate) struct Label {
    text: String,
}

impl Label {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Columns that fit in `width`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "column counts are small and positive"
    )]
    fn columns(width: f64, style: &Style) -> usize {
        if style.char_width <= 0.0 {
            return usize::MAX;
        }
        (((width - 2.0 * style.text_inset) / style.char_width).floor().max(1.0)) as usize
    }
}

/// Greedy word wrap to `columns` characters. Words longer than a line are
/// split. Explicit newlines are kept. Always yields at least one line.
pub(crate) fn wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > columns {
                if len > 0 {
                    lines.push(core::mem::take(&mut line));
                    len = 0;
                }
                let rest = word.split_off(columns);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if len == 0 { word.len() } else { len + 1 + word.len() };
            if needed > columns && len > 0 {
                lines.push(core::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            len += word.len();
            line.extend(word);
        }
        lines.push(line);
    }
    lines
}

impl Widget for Label {
    fn kind(&self) -> ControlKind {
        ControlKind::Label
    }

    fn height(&self, width: f64, style: &Style) -> f64 {
        let lines = wrap(&self.text, Self::columns(width, style)).len();
        lines as f64 * style.row_height
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let rect = cx.rect();
        let mut list = ShapeList::new();
        for (i, line) in wrap(&self.text, Self::columns(rect.width(), style))
            .iter()
            .enumerate()
        {
            let baseline = rect.y1 - (i + 1) as f64 * style.row_height + style.baseline;
            list.push_text(text_run(
                line,
                Point::new(rect.x0 + style.text_inset, baseline),
                rgba(style.palette.text_active),
                style,
            ));
        }
        list
    }

    fn set_text(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.text);
        true
    }
}
