// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The listener interface every control implements, and the stock controls.
//!
//! A widget is a plain struct implementing [`Widget`]. It never owns its
//! rectangle or active flag: those live in the control that wraps it and are
//! reached through [`EventCx`] and [`PaintCx`]. Painting is pure; a widget
//! describes its whole look as a [`ShapeList`] and the control's geometry
//! cache decides what to upload.

use kurbo::{Point, Rect};
use understory_geometry::{ShapeList, TextAnchor, TextCaret, TextRun};
use understory_parameter::{ParamId, ParamStore};

use crate::binding::Binding;
use crate::event::{DragEvent, Key, Modifiers, PointerEvent};
use crate::style::{Style, rgba};

mod action;
mod choice;
mod color;
mod histogram;
mod label;
mod numeric;
mod toggle;

pub(crate) use action::Action;
pub use action::ActionCallback;
pub(crate) use choice::Choice;
pub(crate) use color::{ColorSwatch, ColorWheel};
pub(crate) use histogram::HistogramPlot;
pub(crate) use label::Label;
pub(crate) use numeric::Numeric;
pub(crate) use toggle::Toggle;

/// The stock control kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Checkbox.
    Toggle,
    /// One typed, slidable field per component.
    Numeric,
    /// One segment per enumeration entry.
    Choice,
    /// Color patch that opens the color picker.
    ColorSwatch,
    /// Hue/saturation disc.
    ColorWheel,
    /// Push button.
    Action,
    /// Wrapped static text.
    Label,
    /// Plot of histogram channels.
    Histogram,
    /// A host-supplied widget.
    Custom,
}

/// Something a widget asks its `Ui` to do after an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// Open the color picker for a color parameter at a window position.
    OpenColorPicker {
        /// Color parameter to edit.
        param: ParamId,
        /// Top-left corner of the picker.
        at: Point,
    },
    /// Heights changed; lay everything out again.
    Relayout,
}

/// Rectangle and active flag of a control.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct ControlFrame {
    pub(crate) rect: Rect,
    pub(crate) active: bool,
}

/// What a widget can see and change while handling an event.
pub struct EventCx<'a> {
    pub(crate) params: &'a mut ParamStore,
    pub(crate) frame: &'a mut ControlFrame,
    pub(crate) style: &'a Style,
    pub(crate) requests: &'a mut Vec<Request>,
}

impl core::fmt::Debug for EventCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventCx")
            .field("rect", &self.frame.rect)
            .field("active", &self.frame.active)
            .finish_non_exhaustive()
    }
}

impl EventCx<'_> {
    /// The parameter store.
    pub fn params(&self) -> &ParamStore {
        self.params
    }

    /// The parameter store, for writing.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        self.params
    }

    /// Panel metrics.
    pub fn style(&self) -> &Style {
        self.style
    }

    /// The control's rectangle.
    pub fn rect(&self) -> Rect {
        self.frame.rect
    }

    /// Returns `true` while the control is tracking a held button.
    pub fn is_active(&self) -> bool {
        self.frame.active
    }

    /// Starts tracking the held button.
    pub fn activate(&mut self) {
        self.frame.active = true;
    }

    /// Stops tracking.
    pub fn deactivate(&mut self) {
        self.frame.active = false;
    }

    /// Queues a request to the `Ui`.
    pub fn request(&mut self, request: Request) {
        self.requests.push(request);
    }
}

/// What a widget can see while painting.
#[derive(Debug)]
pub struct PaintCx<'a> {
    pub(crate) params: &'a ParamStore,
    pub(crate) style: &'a Style,
    pub(crate) frame: ControlFrame,
    pub(crate) title: &'a str,
}

impl PaintCx<'_> {
    /// The parameter store.
    pub fn params(&self) -> &ParamStore {
        self.params
    }

    /// Panel metrics.
    pub fn style(&self) -> &Style {
        self.style
    }

    /// The control's rectangle.
    pub fn rect(&self) -> Rect {
        self.frame.rect
    }

    /// Returns `true` while the control is tracking a held button.
    pub fn is_active(&self) -> bool {
        self.frame.active
    }

    /// The control's title.
    pub fn title(&self) -> &str {
        self.title
    }

    /// Title text at the left of the control's first row.
    pub fn title_run(&self, inset: f64) -> TextRun {
        let rect = self.rect();
        let style = self.style;
        text_run(
            self.title,
            Point::new(rect.x0 + inset, rect.y1 - style.row_height + style.baseline),
            rgba(style.palette.text),
            style,
        )
    }

    /// Left part of the first row that holds values, right of the title.
    pub fn value_area(&self) -> Rect {
        value_area(self.rect(), self.style)
    }
}

/// A left-anchored text run with the panel font.
pub(crate) fn text_run(text: &str, origin: Point, color: [f32; 4], style: &Style) -> TextRun {
    TextRun {
        text: text.to_owned(),
        origin,
        anchor: TextAnchor::Left,
        color,
        size: style.font_size,
        width: None,
        caret: None,
    }
}

/// Same, with a visible caret.
pub(crate) fn caret_run(mut run: TextRun, caret: Option<TextCaret>) -> TextRun {
    run.caret = caret;
    run
}

/// Value part of a one-row control: everything right of the title.
pub(crate) fn value_area(rect: Rect, style: &Style) -> Rect {
    let x0 = rect.x0 + rect.width() * style.label_fraction;
    Rect::new(x0, rect.y1 - style.row_height, rect.x1, rect.y1)
}

/// Index of the equal-width segment of `area` under `x`, if any.
pub(crate) fn segment_at(area: Rect, count: usize, x: f64) -> Option<usize> {
    if count == 0 || x < area.x0 || x > area.x1 || area.width() <= 0.0 {
        return None;
    }
    let width = area.width() / count as f64;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "non-negative and bounded by the segment count"
    )]
    let index = ((x - area.x0) / width).floor() as usize;
    Some(index.min(count - 1))
}

/// Segment `index` of `count` equal-width segments of `area`.
pub(crate) fn segment(area: Rect, count: usize, index: usize) -> Rect {
    let width = area.width() / count.max(1) as f64;
    let x0 = area.x0 + index as f64 * width;
    Rect::new(x0, area.y0, x0 + width, area.y1)
}

/// A control's behavior and look.
///
/// Every handler has a default, so a display-only widget implements just
/// [`kind`](Widget::kind) and [`paint`](Widget::paint). The defaults track
/// the pointer: `press` activates, `release` and `release_outside`
/// deactivate.
pub trait Widget {
    /// Which stock kind this is.
    fn kind(&self) -> ControlKind;

    /// Height for a given width. Never depends on position.
    fn height(&self, width: f64, style: &Style) -> f64 {
        let _ = width;
        style.row_height
    }

    /// Describes the whole look of the control.
    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList;

    /// A button went down inside the control.
    fn press(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        let _ = event;
        cx.activate();
    }

    /// A button went up inside the control.
    fn release(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        let _ = event;
        cx.deactivate();
    }

    /// A button went up outside the control while it was active.
    fn release_outside(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        let _ = event;
        cx.deactivate();
    }

    /// The pointer moved while the control was active.
    fn drag(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) {
        let _ = (cx, event);
    }

    /// Text typed while editing.
    fn text(&mut self, cx: &mut EventCx<'_>, text: &str) {
        let _ = (cx, text);
    }

    /// Key pressed while editing.
    fn key(&mut self, cx: &mut EventCx<'_>, key: Key, modifiers: Modifiers) {
        let _ = (cx, key, modifiers);
    }

    /// Returns `true` while one of the widget's fields is being edited.
    fn editing(&self) -> bool {
        false
    }

    /// Applies and ends any edit in progress.
    fn commit_edit(&mut self, cx: &mut EventCx<'_>) {
        let _ = cx;
    }

    /// What the widget reads and writes, if anything.
    fn binding(&self) -> Option<&Binding> {
        None
    }

    /// Replaces displayed text. Returns `false` if the widget has none.
    fn set_text(&mut self, text: &str) -> bool {
        let _ = text;
        false
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Drives a single widget without a `Ui`.

    use super::*;

    pub(crate) struct Harness {
        pub(crate) params: ParamStore,
        pub(crate) frame: ControlFrame,
        pub(crate) style: Style,
        pub(crate) requests: Vec<Request>,
    }

    impl Harness {
        pub(crate) fn new(params: ParamStore, rect: Rect) -> Self {
            Self {
                params,
                frame: ControlFrame {
                    rect,
                    active: false,
                },
                style: Style::default(),
                requests: Vec::new(),
            }
        }

        pub(crate) fn cx(&mut self) -> EventCx<'_> {
            EventCx {
                params: &mut self.params,
                frame: &mut self.frame,
                style: &self.style,
                requests: &mut self.requests,
            }
        }

        pub(crate) fn paint(&self, widget: &dyn Widget, title: &str) -> ShapeList {
            widget.paint(&PaintCx {
                params: &self.params,
                style: &self.style,
                frame: self.frame,
                title,
            })
        }
    }
}
