// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adding controls and nested layouts to a layout.

use core::fmt;

use log::debug;
use understory_geometry::GeometryBackend;
use understory_parameter::{ParamId, ParamStore, ParamValue, ValueKind};

use crate::binding::{Binding, Field};
use crate::control::ControlId;
use crate::error::BuildError;
use crate::layout::{LayoutId, Orientation};
use crate::ui::Ui;
use crate::widget::{
    Action, Choice, ColorSwatch, ColorWheel, ControlKind, HistogramPlot, Label, Numeric, Toggle,
    Widget,
};

/// Builder for one layout of a [`Ui`].
///
/// Every addition lays the panel out again right away, so the new control
/// has its final rectangle as soon as the call returns.
pub struct LayoutMut<'a, B: GeometryBackend> {
    ui: &'a mut Ui<B>,
    id: LayoutId,
}

impl<B: GeometryBackend> fmt::Debug for LayoutMut<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutMut")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Control shown for a value when the caller does not pick one.
fn default_kind(kind: ValueKind, enumerated: bool) -> Option<ControlKind> {
    if enumerated {
        return Some(ControlKind::Choice);
    }
    match kind {
        ValueKind::Numeric => Some(ControlKind::Numeric),
        ValueKind::Toggle => Some(ControlKind::Toggle),
        ValueKind::Color => Some(ControlKind::ColorSwatch),
        ValueKind::Histogram => Some(ControlKind::Histogram),
        ValueKind::Other => None,
    }
}

/// Why `control` cannot show a value of `kind`, if it cannot.
fn incompatible(control: ControlKind, kind: ValueKind, enumerated: bool) -> Option<&'static str> {
    let ok = match control {
        ControlKind::Numeric => matches!(kind, ValueKind::Numeric | ValueKind::Color),
        ControlKind::Toggle => kind == ValueKind::Toggle,
        ControlKind::Choice => enumerated,
        ControlKind::ColorSwatch | ControlKind::ColorWheel => kind == ValueKind::Color,
        ControlKind::Histogram => kind == ValueKind::Histogram,
        ControlKind::Action | ControlKind::Label | ControlKind::Custom => {
            return Some("this control kind does not bind parameters");
        }
    };
    (!ok).then_some("the control kind cannot show this value")
}

impl<'a, B: GeometryBackend> LayoutMut<'a, B> {
    pub(crate) fn new(ui: &'a mut Ui<B>, id: LayoutId) -> Self {
        Self { ui, id }
    }

    /// The layout being built.
    pub fn id(&self) -> LayoutId {
        self.id
    }

    /// Adds a control bound to a registered parameter.
    ///
    /// With `kind` left out, the control follows the value: a choice for
    /// enumerated parameters, a checkbox for flags, a swatch for colors, a
    /// plot for histograms and numeric fields for everything numeric. The
    /// control's title is the parameter's.
    pub fn add_parameter(
        &mut self,
        param: impl Into<ParamId>,
        kind: Option<ControlKind>,
    ) -> Result<ControlId, BuildError> {
        let param = param.into();
        let params = &self.ui.params;
        let title = match params.title(param) {
            Ok(title) => title.to_owned(),
            Err(err) => return Err(BuildError::binding(&format!("{param}"), err.to_string())),
        };
        let value = params
            .kind(param)
            .map_err(|err| BuildError::binding(&title, err.to_string()))?;
        let enumerated = matches!(params.enum_labels(param), Ok(Some(_)));
        let kind = match kind.or_else(|| default_kind(value, enumerated)) {
            Some(kind) => kind,
            None => return Err(BuildError::binding(&title, "no control shows this value")),
        };
        if let Some(reason) = incompatible(kind, value, enumerated) {
            return Err(BuildError::binding(&title, reason));
        }
        let binding = Binding::Param(param);
        let widget: Box<dyn Widget> = match kind {
            ControlKind::Numeric => Box::new(Numeric::new(binding)),
            ControlKind::Toggle => Box::new(Toggle::new(binding)),
            ControlKind::Choice => Box::new(Choice::new(binding)),
            ControlKind::ColorSwatch => Box::new(ColorSwatch::new(param)),
            ControlKind::ColorWheel => Box::new(ColorWheel::new(binding)),
            ControlKind::Histogram => Box::new(HistogramPlot::new(param)),
            ControlKind::Action | ControlKind::Label | ControlKind::Custom => {
                return Err(BuildError::binding(&title, "this control kind does not bind parameters"));
            }
        };
        Ok(self.push(title, widget))
    }

    /// Adds a control reading and writing a field of a host object.
    ///
    /// Numbers and colors get numeric fields, flags a checkbox. Field
    /// writes do not go through the store, so other controls showing the
    /// same field only catch up when they repaint for another reason.
    pub fn add_control<O: 'static, T: ParamValue>(
        &mut self,
        title: &str,
        field: Field<O, T>,
    ) -> Result<ControlId, BuildError> {
        let binding = Binding::Field(Box::new(field));
        let widget: Box<dyn Widget> = match T::KIND {
            ValueKind::Numeric | ValueKind::Color => Box::new(Numeric::new(binding)),
            ValueKind::Toggle => Box::new(Toggle::new(binding)),
            ValueKind::Histogram | ValueKind::Other => {
                return Err(BuildError::binding(title, "fields must be numbers, colors or flags"));
            }
        };
        Ok(self.push(title.to_owned(), widget))
    }

    /// Adds a push button running `callback` when clicked.
    pub fn add_action(
        &mut self,
        title: &str,
        callback: impl FnMut(&mut ParamStore) + 'static,
    ) -> ControlId {
        self.push(title.to_owned(), Box::new(Action::new(Box::new(callback))))
    }

    /// Adds a block of wrapped text.
    pub fn add_label(&mut self, text: &str) -> ControlId {
        self.push(String::new(), Box::new(Label::new(text)))
    }

    /// Adds a host-supplied widget.
    pub fn add_widget(&mut self, title: &str, widget: Box<dyn Widget>) -> ControlId {
        self.push(title.to_owned(), widget)
    }

    /// Adds an empty nested layout and returns its ID.
    pub fn add_layout(&mut self, orientation: Orientation) -> LayoutId {
        let id = self.ui.insert_layout(self.id, orientation);
        debug!("added {orientation:?} layout {id:?} to {:?}", self.id);
        self.ui.relayout();
        id
    }

    /// Draws a rounded background behind the layout's children.
    pub fn set_background(&mut self, background: bool) -> &mut Self {
        if let Some(node) = self.ui.layouts.get_mut(self.id) {
            node.background = background;
            node.needs_paint = true;
        }
        self
    }

    /// Space around and between children.
    pub fn set_padding(&mut self, padding: f64) -> &mut Self {
        if let Some(node) = self.ui.layouts.get_mut(self.id) {
            node.padding = padding.max(0.0);
        }
        self.ui.relayout();
        self
    }

    /// Share of the available width the layout's children use.
    pub fn set_width_fraction(&mut self, fraction: f64) -> &mut Self {
        if let Some(node) = self.ui.layouts.get_mut(self.id) {
            node.width_fraction = fraction.clamp(0.0, 1.0);
        }
        self.ui.relayout();
        self
    }

    fn push(&mut self, title: String, widget: Box<dyn Widget>) -> ControlId {
        let id = self.ui.insert_control(self.id, title, widget);
        self.ui.relayout();
        id
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::{Point, Size};
    use understory_geometry::RecordingBackend;
    use understory_parameter::{Color3, Histogram, Parameter};

    use super::*;
    use crate::event::{InputEvent, PointerButtons};

    fn ui() -> Ui<RecordingBackend> {
        Ui::new(RecordingBackend::default(), Size::new(800.0, 600.0))
    }

    fn click(ui: &mut Ui<RecordingBackend>, at: Point, buttons: PointerButtons) {
        ui.handle_event(&InputEvent::press(at.x, at.y, buttons));
        ui.handle_event(&InputEvent::release(at.x, at.y, buttons));
    }

    #[test]
    fn default_kinds_follow_the_value() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let visible = ui.register(Parameter::builder(true).build());
        let tint = ui.register(Parameter::builder(Color3::default()).range(0.0, 1.0).build());
        let density = ui.register(Parameter::builder(Histogram::new()).build());
        let mode = ui.register(
            Parameter::builder(1_i32)
                .enumeration([("Play", 1), ("Pause", 0)])
                .build(),
        );
        let mut root = ui.root_layout();
        let ids = [
            root.add_parameter(size, None).unwrap(),
            root.add_parameter(visible, None).unwrap(),
            root.add_parameter(tint, None).unwrap(),
            root.add_parameter(density, None).unwrap(),
            root.add_parameter(mode, None).unwrap(),
        ];
        let kinds: Vec<_> = ids.iter().map(|id| ui.control_kind(*id).unwrap()).collect();
        assert_eq!(
            kinds,
            [
                ControlKind::Numeric,
                ControlKind::Toggle,
                ControlKind::ColorSwatch,
                ControlKind::Histogram,
                ControlKind::Choice,
            ]
        );
    }

    #[test]
    fn overrides_must_fit_the_value() {
        let mut ui = ui();
        let visible = ui.register(Parameter::builder(true).title("Visible").build());
        let tint = ui.register(Parameter::builder(Color3::default()).build());
        let mut root = ui.root_layout();
        let err = root
            .add_parameter(visible, Some(ControlKind::Numeric))
            .unwrap_err();
        assert!(
            matches!(&err, BuildError::InvalidBinding { title, .. } if title == "Visible"),
            "{err}"
        );
        assert!(root.add_parameter(visible, Some(ControlKind::Label)).is_err());
        assert!(root.add_parameter(visible, Some(ControlKind::Choice)).is_err());
        // Colors can be typed as three numbers or picked on a wheel.
        assert!(root.add_parameter(tint, Some(ControlKind::Numeric)).is_ok());
        assert!(root.add_parameter(tint, Some(ControlKind::ColorWheel)).is_ok());
        assert_eq!(ui.control_ids().len(), 2);
    }

    #[test]
    fn stale_parameters_are_rejected() {
        let mut ui = ui();
        let mut other = ParamStore::new();
        other.register(Parameter::builder(0.0_f64).build());
        let stale = other.register(Parameter::builder(0.0_f64).build());
        let err = ui.root_layout().add_parameter(stale, None).unwrap_err();
        assert!(matches!(err, BuildError::InvalidBinding { .. }));
        assert!(ui.control_ids().is_empty());
    }

    #[derive(Debug)]
    struct Material {
        opacity: f64,
        lit: bool,
    }

    #[test]
    fn fields_edit_host_objects() {
        let mut ui = ui();
        let material = Rc::new(RefCell::new(Material {
            opacity: 0.5,
            lit: false,
        }));
        let mut root = ui.root_layout();
        let opacity = root
            .add_control(
                "Opacity",
                Field::new(
                    material.clone(),
                    |m: &Material| m.opacity,
                    |m: &mut Material, v| m.opacity = v,
                )
                .range(0.0, 1.0),
            )
            .unwrap();
        let lit = root
            .add_control(
                "Lit",
                Field::new(
                    material.clone(),
                    |m: &Material| m.lit,
                    |m: &mut Material, v| m.lit = v,
                ),
            )
            .unwrap();
        assert_eq!(ui.control_kind(lit), Some(ControlKind::Toggle));

        let rect = ui.control_rect(opacity).unwrap();
        let (x, y) = (rect.x1 - 10.0, rect.center().y);
        ui.handle_event(&InputEvent::press(x, y, PointerButtons::AUXILIARY));
        ui.handle_event(&InputEvent::drag(x + 50.0, y, 50.0, 0.0, PointerButtons::AUXILIARY));
        ui.handle_event(&InputEvent::release(x + 50.0, y, PointerButtons::AUXILIARY));
        assert!((material.borrow().opacity - 0.6).abs() < 1e-9);

        let at = ui.control_rect(lit).unwrap().center();
        click(&mut ui, at, PointerButtons::PRIMARY);
        assert!(material.borrow().lit);
        assert!(!ui.params().has_dirty());
    }

    #[test]
    fn actions_run_on_click() {
        let mut ui = ui();
        let frame = ui.register(Parameter::builder(3_i32).range(0.0, 100.0).build());
        let reset = ui.root_layout().add_action("Reset", move |params| {
            params.set(frame, 0).unwrap();
        });
        assert_eq!(ui.control_title(reset), Some("Reset"));
        let at = ui.control_rect(reset).unwrap().center();
        click(&mut ui, at, PointerButtons::PRIMARY);
        assert_eq!(ui.params().get(frame), Some(&0));
    }

    #[test]
    fn nested_layouts_take_their_share() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let row = ui.root_layout().add_layout(Orientation::Horizontal);
        let mut builder = ui.layout(row).unwrap();
        let left = builder.add_parameter(size, None).unwrap();
        let right = builder.add_parameter(size, None).unwrap();
        assert_eq!(ui.control_rect(left).unwrap().width(), 200.0);
        assert_eq!(ui.control_rect(right).unwrap().x0, 210.0);

        ui.layout(row).unwrap().set_width_fraction(0.5);
        assert_eq!(ui.control_rect(left).unwrap().width(), 100.0);
        assert!(ui.layout(LayoutId(99)).is_err());
    }

    #[test]
    fn padding_spaces_children() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let mut root = ui.root_layout();
        root.set_padding(10.0);
        let a = root.add_parameter(size, None).unwrap();
        let b = root.add_parameter(size, None).unwrap();
        let (ra, rb) = (ui.control_rect(a).unwrap(), ui.control_rect(b).unwrap());
        assert_eq!(ra.y1, 590.0);
        assert_eq!(ra.y0 - rb.y1, 10.0);
    }
}
