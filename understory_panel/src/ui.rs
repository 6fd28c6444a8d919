// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The panel root: parameter store, layout tree, controls, router and batch.

use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use log::{debug, warn};
use smallvec::SmallVec;
use understory_geometry::{Batch, DrawStats, GeometryBackend};
use understory_parameter::{Param, ParamId, ParamStore, ParamValue, Parameter, ValueKind};

use crate::binding::Binding;
use crate::builder::LayoutMut;
use crate::control::{Control, ControlId, Controls};
use crate::error::BuildError;
use crate::event::InputEvent;
use crate::layout::{Child, LayoutId, LayoutNode, Layouts, Orientation};
use crate::router::{Dispatch, EventRouter};
use crate::style::Style;
use crate::widget::{ColorWheel, ControlFrame, ControlKind, Numeric, PaintCx, Request, Widget};

/// Counts from one [`Ui::frame`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Parameters found dirty at the start of the frame.
    pub dirty: usize,
    /// Controls repainted.
    pub repainted: usize,
    /// Whether the layout was recomputed.
    pub relaid_out: bool,
    /// What the batch drew.
    pub draw: DrawStats,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Popup {
    layout: LayoutId,
    param: ParamId,
}

/// A control panel.
///
/// The `Ui` owns everything: the [`ParamStore`] controls bind to, the
/// layout tree, the live controls and the [`Batch`] they draw into. The host
/// feeds it [`InputEvent`]s and calls [`frame`](Self::frame) once per frame.
///
/// ```
/// use kurbo::Size;
/// use understory_geometry::RecordingBackend;
/// use understory_panel::{InputEvent, PointerButtons, Ui};
/// use understory_parameter::Parameter;
///
/// let mut ui = Ui::new(RecordingBackend::default(), Size::new(800.0, 600.0));
/// let size = ui.register(Parameter::builder(2.0_f64).title("Point size").range(1.0, 10.0).build());
/// let control = ui.root_layout().add_parameter(size, None).unwrap();
/// ui.frame();
///
/// // Slide the field with the middle button: 50 px of a 500 px slide is a tenth of the range.
/// let rect = ui.control_rect(control).unwrap();
/// let (x, y) = (rect.x1 - 10.0, rect.center().y);
/// ui.handle_event(&InputEvent::press(x, y, PointerButtons::AUXILIARY));
/// ui.handle_event(&InputEvent::drag(x + 50.0, y, 50.0, 0.0, PointerButtons::AUXILIARY));
/// ui.handle_event(&InputEvent::release(x + 50.0, y, PointerButtons::AUXILIARY));
/// assert!((ui.params().get(size).unwrap() - 2.9).abs() < 1e-9);
///
/// let stats = ui.frame();
/// assert_eq!(stats.dirty, 1);
/// ```
pub struct Ui<B: GeometryBackend> {
    pub(crate) params: ParamStore,
    pub(crate) batch: Batch<B>,
    pub(crate) style: Style,
    pub(crate) controls: Controls,
    pub(crate) layouts: Layouts,
    root: LayoutId,
    popup: Option<Popup>,
    router: EventRouter,
    bound: HashMap<ParamId, SmallVec<[ControlId; 4]>>,
    size: Size,
    needs_layout: bool,
    requests: Vec<Request>,
}

impl<B: GeometryBackend> fmt::Debug for Ui<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("params", &self.params.len())
            .field("controls", &self.controls.len())
            .field("root", &self.root)
            .field("popup", &self.popup)
            .field("editing", &self.router.editing())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<B: GeometryBackend> Ui<B> {
    /// Creates an empty panel with the stock [`Style`].
    pub fn new(backend: B, size: Size) -> Self {
        Self::with_style(backend, size, Style::default())
    }

    /// Creates an empty panel.
    ///
    /// The root layout is vertical, anchored at `style.root_x` and the top of
    /// the window, and takes `style.root_width_fraction` of the window width.
    pub fn with_style(backend: B, size: Size, style: Style) -> Self {
        let mut batch = Batch::new(backend);
        batch.resize(size);
        let mut node = LayoutNode::new(
            batch.create_cache(),
            Orientation::Vertical,
            style.padding,
            None,
        );
        node.x = style.root_x;
        node.top = size.height;
        node.width = size.width;
        node.width_fraction = style.root_width_fraction;
        let mut layouts = Layouts::default();
        let root = layouts.insert(node);
        Self {
            params: ParamStore::new(),
            batch,
            style,
            controls: Controls::default(),
            layouts,
            root,
            popup: None,
            router: EventRouter::default(),
            bound: HashMap::new(),
            size,
            needs_layout: false,
            requests: Vec::new(),
        }
    }

    /// The parameter store.
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// The parameter store, for writing. Writes repaint bound controls on
    /// the next frame.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    /// Adds a parameter to the store.
    pub fn register<T: ParamValue>(&mut self, param: Parameter<T>) -> Param<T> {
        self.params.register(param)
    }

    /// Panel metrics.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Window size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The root layout.
    pub fn root(&self) -> LayoutId {
        self.root
    }

    /// Builder for the root layout.
    pub fn root_layout(&mut self) -> LayoutMut<'_, B> {
        let id = self.root;
        LayoutMut::new(self, id)
    }

    /// Builder for any live layout.
    pub fn layout(&mut self, id: LayoutId) -> Result<LayoutMut<'_, B>, BuildError> {
        if !self.layouts.contains(id) {
            return Err(BuildError::UnknownLayout(id));
        }
        Ok(LayoutMut::new(self, id))
    }

    /// The batch everything draws into.
    pub fn batch(&self) -> &Batch<B> {
        &self.batch
    }

    /// The rendering backend.
    pub fn backend(&self) -> &B {
        self.batch.backend()
    }

    /// The rendering backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        self.batch.backend_mut()
    }

    /// Live controls in creation order.
    pub fn control_ids(&self) -> &[ControlId] {
        self.controls.ids()
    }

    /// Rectangle of a control.
    pub fn control_rect(&self, id: ControlId) -> Option<Rect> {
        self.controls.get(id).map(|c| c.frame.rect)
    }

    /// Kind of a control.
    pub fn control_kind(&self, id: ControlId) -> Option<ControlKind> {
        self.controls.get(id).map(|c| c.widget.kind())
    }

    /// Title of a control.
    pub fn control_title(&self, id: ControlId) -> Option<&str> {
        self.controls.get(id).map(|c| c.title.as_str())
    }

    /// Returns `true` while a control tracks a held button.
    pub fn is_active(&self, id: ControlId) -> bool {
        self.controls.get(id).is_some_and(|c| c.frame.active)
    }

    /// Returns `true` while a control is editing text.
    pub fn is_editing(&self, id: ControlId) -> bool {
        self.router.editing() == Some(id)
    }

    /// The control editing text, if any.
    pub fn editing(&self) -> Option<ControlId> {
        self.router.editing()
    }

    /// Box a layout covers, padding included.
    pub fn layout_bounds(&self, id: LayoutId) -> Option<Rect> {
        self.layouts.get(id).map(LayoutNode::bounds)
    }

    /// Controls bound to a parameter.
    pub fn bound_controls(&self, param: impl Into<ParamId>) -> &[ControlId] {
        self.bound
            .get(&param.into())
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
    }

    /// Layout of the open color picker.
    pub fn popup(&self) -> Option<LayoutId> {
        self.popup.map(|p| p.layout)
    }

    /// Returns `true` while the color picker is open.
    pub fn popup_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Handles one input event.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Resize(size) => self.resize(*size),
            InputEvent::PointerDown(e) => {
                let in_popup = self.in_popup(e.pos);
                if self.popup.is_some() && !in_popup {
                    self.close_popup();
                }
                let hits = self.hits(e.pos, in_popup);
                self.route(|r, d| r.press(d, &hits, e));
            }
            InputEvent::PointerUp(e) => {
                let hits = self.hits(e.pos, self.in_popup(e.pos));
                self.route(|r, d| r.release(d, &hits, e));
            }
            InputEvent::PointerDrag(e) => self.route(|r, d| r.drag(d, e)),
            InputEvent::Text(text) => self.route(|r, d| r.text(d, text)),
            InputEvent::Key { key, modifiers } => self.route(|r, d| r.key(d, *key, *modifiers)),
        }
        self.process_requests();
    }

    /// Re-anchors the root layout to a new window size and lays out again.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.batch.resize(size);
        if let Some(root) = self.layouts.get_mut(self.root) {
            root.top = size.height;
            root.width = size.width;
        }
        self.relayout();
    }

    /// Runs one frame: repaints controls whose parameters changed, lays out
    /// again if a height changed, then draws every group once.
    pub fn frame(&mut self) -> FrameStats {
        let dirty = self.params.drain_dirty();
        for id in &dirty {
            for control in self.bound.get(id).into_iter().flatten() {
                if let Some(c) = self.controls.get_mut(*control) {
                    c.needs_paint = true;
                }
            }
        }
        let relaid_out = self.needs_layout;
        if relaid_out {
            self.relayout();
        }

        // Backgrounds first so their buffers sit below the controls on them.
        for id in self.layouts.ids() {
            let Some(node) = self.layouts.get_mut(id) else {
                continue;
            };
            if node.needs_paint {
                node.needs_paint = false;
                let list = node.paint(&self.style);
                node.cache.apply(&mut self.batch, &list);
            }
        }
        let mut repainted = 0;
        for id in self.controls.ids().to_vec() {
            let Some(control) = self.controls.get_mut(id) else {
                continue;
            };
            if !control.needs_paint {
                continue;
            }
            control.needs_paint = false;
            let list = control.widget.paint(&PaintCx {
                params: &self.params,
                style: &self.style,
                frame: control.frame,
                title: &control.title,
            });
            control.cache.apply(&mut self.batch, &list);
            repainted += 1;
        }
        FrameStats {
            dirty: dirty.len(),
            repainted,
            relaid_out,
            draw: self.batch.draw(),
        }
    }

    /// Removes a control and releases its geometry.
    pub fn remove_control(&mut self, id: ControlId) -> Result<(), BuildError> {
        if !self.controls.contains(id) {
            return Err(BuildError::UnknownControl(id));
        }
        self.drop_control(id);
        self.relayout();
        Ok(())
    }

    /// Removes a layout with everything in it. Removing the root only
    /// empties it.
    pub fn remove_layout(&mut self, id: LayoutId) -> Result<(), BuildError> {
        if !self.layouts.contains(id) {
            return Err(BuildError::UnknownLayout(id));
        }
        if id == self.root {
            let children = self
                .layouts
                .get(id)
                .map(|n| n.children.clone())
                .unwrap_or_default();
            for child in children {
                match child {
                    Child::Control(c) => self.drop_control(c),
                    Child::Layout(l) => self.drop_layout(l),
                }
            }
        } else {
            self.drop_layout(id);
        }
        self.relayout();
        Ok(())
    }

    /// Replaces the text of a label.
    pub fn set_label_text(&mut self, id: ControlId, text: &str) -> Result<(), BuildError> {
        let control = self
            .controls
            .get_mut(id)
            .ok_or(BuildError::UnknownControl(id))?;
        if !control.widget.set_text(text) {
            return Err(BuildError::binding(&control.title, "control shows no text"));
        }
        control.needs_paint = true;
        self.needs_layout = true;
        Ok(())
    }

    /// Opens the color picker for a color parameter, replacing any open one.
    ///
    /// The picker is a vertical layout with a background whose top-left
    /// corner is `at`, holding a color wheel and a numeric field bound to the
    /// same parameter.
    pub fn open_color_picker(&mut self, param: ParamId, at: Point) -> Result<(), BuildError> {
        let title = match self.params.title(param) {
            Ok(title) => title.to_owned(),
            Err(err) => return Err(BuildError::binding("color picker", err.to_string())),
        };
        if self.params.kind(param) != Ok(ValueKind::Color) {
            return Err(BuildError::binding(&title, "the color picker edits colors only"));
        }
        self.close_popup();
        let mut node = LayoutNode::new(
            self.batch.create_cache(),
            Orientation::Vertical,
            self.style.padding,
            None,
        );
        node.x = at.x;
        node.top = at.y;
        node.width = self.style.picker_width;
        node.background = true;
        let layout = self.layouts.insert(node);
        self.popup = Some(Popup { layout, param });
        self.insert_control(
            layout,
            String::new(),
            Box::new(ColorWheel::new(Binding::Param(param))),
        );
        self.insert_control(
            layout,
            title,
            Box::new(Numeric::new(Binding::Param(param))),
        );
        debug!("opened color picker for {param:?} at {at:?}");
        self.relayout();
        Ok(())
    }

    /// Closes the color picker, committing any edit in it.
    pub fn close_popup(&mut self) {
        let Some(popup) = self.popup.take() else {
            return;
        };
        debug!("closing color picker for {:?}", popup.param);
        self.drop_layout(popup.layout);
    }

    /// Releases every buffer and returns the backend.
    pub fn close(mut self) -> B {
        for id in self.controls.ids().to_vec() {
            self.drop_control(id);
        }
        for id in self.layouts.ids() {
            if let Some(mut node) = self.layouts.remove(id) {
                node.cache.release_all(&mut self.batch);
            }
        }
        self.batch.into_backend()
    }

    /// Positions everything again.
    pub(crate) fn relayout(&mut self) {
        let height = self
            .layouts
            .arrange(&mut self.controls, self.root, &self.style);
        if let Some(popup) = self.popup {
            self.layouts
                .arrange(&mut self.controls, popup.layout, &self.style);
        }
        self.needs_layout = false;
        debug!("relayout: root height {height}");
    }

    /// Adds a control at the end of `parent` without laying out.
    pub(crate) fn insert_control(
        &mut self,
        parent: LayoutId,
        title: String,
        widget: Box<dyn Widget>,
    ) -> ControlId {
        let param = widget.binding().and_then(Binding::param);
        let kind = widget.kind();
        let id = self.controls.insert(Control {
            title,
            frame: ControlFrame::default(),
            cache: self.batch.create_cache(),
            widget,
            needs_paint: true,
            parent,
        });
        if let Some(node) = self.layouts.get_mut(parent) {
            node.children.push(Child::Control(id));
        }
        if let Some(param) = param {
            self.bound.entry(param).or_default().push(id);
        }
        debug!("added {kind:?} control {id:?} to {parent:?}");
        id
    }

    /// Adds an empty layout at the end of `parent` without laying out.
    pub(crate) fn insert_layout(&mut self, parent: LayoutId, orientation: Orientation) -> LayoutId {
        let node = LayoutNode::new(
            self.batch.create_cache(),
            orientation,
            self.style.padding,
            Some(parent),
        );
        let id = self.layouts.insert(node);
        if let Some(node) = self.layouts.get_mut(parent) {
            node.children.push(Child::Layout(id));
        }
        id
    }

    fn drop_control(&mut self, id: ControlId) {
        if self.router.editing() == Some(id) {
            self.route(|r, d| r.commit_editing(d));
        }
        self.router.forget(id);
        let Some(mut control) = self.controls.remove(id) else {
            return;
        };
        control.cache.release_all(&mut self.batch);
        if let Some(node) = self.layouts.get_mut(control.parent) {
            node.children.retain(|c| *c != Child::Control(id));
        }
        if let Some(param) = control.widget.binding().and_then(Binding::param) {
            if let Some(ids) = self.bound.get_mut(&param) {
                ids.retain(|c| *c != id);
                if ids.is_empty() {
                    self.bound.remove(&param);
                }
            }
        }
        debug!("removed control {id:?} '{}'", control.title);
    }

    fn drop_layout(&mut self, id: LayoutId) {
        let (controls, layouts) = self.layouts.subtree(id);
        for control in controls {
            self.drop_control(control);
        }
        let parent = self.layouts.get(id).and_then(|n| n.parent);
        for layout in layouts {
            if let Some(mut node) = self.layouts.remove(layout) {
                node.cache.release_all(&mut self.batch);
            }
        }
        if let Some(node) = parent.and_then(|p| self.layouts.get_mut(p)) {
            node.children.retain(|c| *c != Child::Layout(id));
        }
        if self.popup.is_some_and(|p| p.layout == id) {
            self.popup = None;
        }
    }

    fn route(&mut self, f: impl FnOnce(&mut EventRouter, &mut Dispatch<'_>)) {
        let mut dispatch = Dispatch {
            controls: &mut self.controls,
            params: &mut self.params,
            style: &self.style,
            requests: &mut self.requests,
        };
        f(&mut self.router, &mut dispatch);
    }

    fn in_popup(&self, pos: Point) -> bool {
        self.popup
            .and_then(|p| self.layouts.get(p.layout))
            .is_some_and(|node| {
                let b = node.bounds();
                pos.x >= b.x0 && pos.x <= b.x1 && pos.y >= b.y0 && pos.y <= b.y1
            })
    }

    /// Controls under `pos`, restricted to the picker or to everything else.
    fn hits(&self, pos: Point, in_popup: bool) -> SmallVec<[ControlId; 4]> {
        let popup = self.popup.map(|p| p.layout);
        self.controls.hits(pos, |c| {
            let top = self.layouts.top_level(c.parent);
            (popup == Some(top)) == in_popup
        })
    }

    fn process_requests(&mut self) {
        for request in core::mem::take(&mut self.requests) {
            match request {
                Request::OpenColorPicker { param, at } => {
                    if let Err(err) = self.open_color_picker(param, at) {
                        warn!("{err}");
                    }
                }
                Request::Relayout => self.needs_layout = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, PointerButtons};
    use understory_geometry::{DrawGroup, RecordingBackend};
    use understory_parameter::Color3;

    fn ui() -> Ui<RecordingBackend> {
        Ui::new(RecordingBackend::default(), Size::new(800.0, 600.0))
    }

    fn center(ui: &Ui<RecordingBackend>, id: ControlId) -> Point {
        ui.control_rect(id).unwrap().center()
    }

    fn click(ui: &mut Ui<RecordingBackend>, at: Point, buttons: PointerButtons) {
        ui.handle_event(&InputEvent::press(at.x, at.y, buttons));
        ui.handle_event(&InputEvent::release(at.x, at.y, buttons));
    }

    /// Every control reachable from a top-level layout is live, and the reverse.
    fn assert_reachability(ui: &Ui<RecordingBackend>) {
        let (mut reachable, _) = ui.layouts.subtree(ui.root);
        if let Some(popup) = ui.popup() {
            reachable.extend(ui.layouts.subtree(popup).0);
        }
        reachable.sort();
        let mut live = ui.control_ids().to_vec();
        live.sort();
        assert_eq!(reachable, live, "control list and layout tree disagree");
    }

    #[test]
    fn root_anchors_to_the_window() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).title("Size").build());
        let id = ui.root_layout().add_parameter(size, None).unwrap();
        assert_eq!(ui.control_rect(id), Some(Rect::new(10.0, 582.0, 410.0, 598.0)));
    }

    #[test]
    fn shared_parameter_repaints_every_bound_control() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).title("Size").range(0.0, 10.0).build());
        let a = ui.root_layout().add_parameter(size, None).unwrap();
        let b = ui.root_layout().add_parameter(size, None).unwrap();
        assert_eq!(ui.bound_controls(size), [a, b]);
        ui.frame();

        ui.params_mut().set(size, 5.0).unwrap();
        let stats = ui.frame();
        assert_eq!(stats.dirty, 1);
        assert_eq!(stats.repainted, 2);
        let texts = ui.backend().last_texts();
        assert_eq!(texts.iter().filter(|t| t.text == "5.00").count(), 2);

        // Nothing changed: nothing repainted, buffers untouched.
        let created = ui.backend().created();
        ui.backend_mut().clear_events();
        let stats = ui.frame();
        assert_eq!(stats.repainted, 0);
        assert_eq!(ui.backend().created(), created);
        assert_eq!(ui.backend().draw_calls(), stats.draw.batches);
    }

    #[test]
    fn steady_slide_allocates_nothing() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).range(0.0, 100.0).build());
        let id = ui.root_layout().add_parameter(size, None).unwrap();
        ui.frame();
        let created = ui.backend().created();
        let at = center(&ui, id) + kurbo::Vec2::new(100.0, 0.0);
        ui.handle_event(&InputEvent::press(at.x, at.y, PointerButtons::AUXILIARY));
        for step in 1..=10 {
            let x = at.x + f64::from(step) * 5.0;
            ui.handle_event(&InputEvent::drag(x, at.y, 5.0, 0.0, PointerButtons::AUXILIARY));
            ui.frame();
        }
        ui.handle_event(&InputEvent::release(at.x + 50.0, at.y, PointerButtons::AUXILIARY));
        ui.frame();
        assert_eq!(ui.backend().created(), created);
        assert!((ui.params().get(size).unwrap() - 11.0).abs() < 1e-9);
    }

    #[test]
    fn typing_into_a_field() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).range(0.0, 10.0).build());
        let id = ui.root_layout().add_parameter(size, None).unwrap();
        let at = center(&ui, id) + kurbo::Vec2::new(100.0, 0.0);
        click(&mut ui, at, PointerButtons::PRIMARY);
        assert!(ui.is_editing(id));
        ui.handle_event(&InputEvent::Text("8.25".into()));
        ui.handle_event(&InputEvent::key(Key::Return));
        assert!(!ui.is_editing(id));
        assert_eq!(ui.params().get(size), Some(&8.25));
    }

    #[test]
    fn toggle_flips_once_per_click() {
        let mut ui = ui();
        let visible = ui.register(Parameter::builder(false).title("Visible").build());
        let id = ui.root_layout().add_parameter(visible, None).unwrap();
        assert_eq!(ui.control_kind(id), Some(ControlKind::Toggle));
        let at = center(&ui, id);
        click(&mut ui, at, PointerButtons::PRIMARY);
        assert_eq!(ui.params().get(visible), Some(&true));
        click(&mut ui, at, PointerButtons::PRIMARY);
        assert_eq!(ui.params().get(visible), Some(&false));
    }

    #[test]
    fn swatch_opens_a_picker_sharing_the_parameter() {
        let mut ui = ui();
        let tint = ui.register(
            Parameter::builder(Color3::new(0.2, 0.4, 0.6))
                .title("Tint")
                .range(0.0, 1.0)
                .build(),
        );
        let swatch = ui.root_layout().add_parameter(tint, None).unwrap();
        assert_eq!(ui.control_kind(swatch), Some(ControlKind::ColorSwatch));
        let at = center(&ui, swatch) + kurbo::Vec2::new(100.0, 0.0);
        click(&mut ui, at, PointerButtons::PRIMARY);
        let popup = ui.popup().unwrap();
        assert_eq!(ui.bound_controls(tint).len(), 3);
        assert_reachability(&ui);

        let bounds = ui.layout_bounds(popup).unwrap();
        assert_eq!(bounds.y1, at.y);
        assert_eq!(bounds.x0, at.x - 2.0);
        ui.frame();
        assert_eq!(ui.batch().buffer_count(DrawGroup::Shader), 1);

        // Press on the wheel rim at angle 0: hue 0.
        let wheel = ui
            .control_ids()
            .iter()
            .copied()
            .find(|id| ui.control_kind(*id) == Some(ControlKind::ColorWheel))
            .unwrap();
        let rect = ui.control_rect(wheel).unwrap();
        let rim = Point::new(
            rect.x0 + (rect.width() * 0.5).trunc() + rect.height() * 0.5,
            rect.y0 + (rect.height() * 0.5).trunc(),
        );
        click(&mut ui, rim, PointerButtons::PRIMARY);
        let c = *ui.params().get(tint).unwrap();
        assert!(c.r > c.g && c.g.abs() < 1e-6 && c.b.abs() < 1e-6, "{c:?}");
        let stats = ui.frame();
        assert_eq!(stats.repainted, 3, "swatch, wheel and field all redraw");

        // A press outside the picker closes it.
        click(&mut ui, Point::new(790.0, 10.0), PointerButtons::PRIMARY);
        assert!(!ui.popup_open());
        assert_eq!(ui.bound_controls(tint), [swatch]);
        assert_reachability(&ui);
        ui.frame();
        assert_eq!(ui.batch().buffer_count(DrawGroup::Shader), 0);
    }

    #[test]
    fn picker_rejects_non_colors() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let err = ui.open_color_picker(size.id(), Point::ZERO).unwrap_err();
        assert!(matches!(err, BuildError::InvalidBinding { .. }));
        assert!(!ui.popup_open());
    }

    #[test]
    fn resize_reflows_widths() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let a = ui.root_layout().add_parameter(size, None).unwrap();
        let b = ui.root_layout().add_parameter(size, None).unwrap();
        let before = (600.0 - ui.control_rect(a).unwrap().y1, 600.0 - ui.control_rect(b).unwrap().y1);
        ui.handle_event(&InputEvent::Resize(Size::new(1200.0, 900.0)));
        let ra = ui.control_rect(a).unwrap();
        let rb = ui.control_rect(b).unwrap();
        assert_eq!(ra.width(), 600.0);
        assert_eq!((900.0 - ra.y1, 900.0 - rb.y1), before);
        assert_eq!(ui.backend().viewport(), Size::new(1200.0, 900.0));
    }

    #[test]
    fn removing_controls_releases_geometry() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let a = ui.root_layout().add_parameter(size, None).unwrap();
        let b = ui.root_layout().add_parameter(size, None).unwrap();
        ui.frame();
        let live = ui.backend().live_buffers();
        ui.remove_control(a).unwrap();
        assert_reachability(&ui);
        assert_eq!(ui.bound_controls(size), [b]);
        assert_eq!(ui.backend().live_buffers(), live / 2);
        // The survivor moved up into the freed slot.
        assert_eq!(ui.control_rect(b).unwrap().y1, 598.0);
        assert_eq!(ui.remove_control(a), Err(BuildError::UnknownControl(a)));
    }

    #[test]
    fn removing_the_root_empties_it() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let root = ui.root();
        let row = ui.root_layout().add_layout(Orientation::Horizontal);
        ui.layout(row).unwrap().add_parameter(size, None).unwrap();
        ui.root_layout().add_label("hello");
        ui.remove_layout(root).unwrap();
        assert!(ui.control_ids().is_empty());
        assert!(ui.layout(row).is_err());
        assert!(ui.layout(root).is_ok());
        assert_reachability(&ui);
    }

    #[test]
    fn close_releases_everything() {
        let mut ui = ui();
        let size = ui.register(Parameter::builder(1.0_f64).build());
        ui.root_layout().set_background(true).add_parameter(size, None).unwrap();
        ui.frame();
        assert!(ui.backend().live_buffers() > 0);
        let backend = ui.close();
        assert_eq!(backend.live_buffers(), 0);
    }

    #[test]
    fn label_text_change_relayouts() {
        let mut ui = ui();
        let label = ui.root_layout().add_label("short");
        let size = ui.register(Parameter::builder(1.0_f64).build());
        let below = ui.root_layout().add_parameter(size, None).unwrap();
        let y = ui.control_rect(below).unwrap().y1;
        let long = "word ".repeat(200);
        ui.set_label_text(label, &long).unwrap();
        let stats = ui.frame();
        assert!(stats.relaid_out);
        assert!(ui.control_rect(below).unwrap().y1 < y);
        assert!(ui.set_label_text(below, "x").is_err());
    }
}
