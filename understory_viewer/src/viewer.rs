// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame loop tying scene, camera and panel together.

use core::fmt;
use std::collections::VecDeque;

use kurbo::Point;
use log::{debug, trace, warn};
use understory_geometry::GeometryBackend;
use understory_panel::{BuildError, FrameStats, InputEvent, LayoutId, Orientation, Ui};

use crate::camera::{Camera, Ray};
use crate::scene::{SceneObject, SceneRenderer};

/// A viewer: scene objects, a camera and the control panel editing them.
///
/// Host events are queued with [`push_event`](Self::push_event) as they
/// arrive and applied at the start of the next [`frame`](Self::frame), so a
/// frame always sees a consistent parameter state.
pub struct Viewer<B: GeometryBackend, C: Camera> {
    ui: Ui<B>,
    camera: C,
    objects: Vec<(Box<dyn SceneObject<B>>, LayoutId)>,
    events: VecDeque<InputEvent>,
}

impl<B: GeometryBackend, C: Camera> fmt::Debug for Viewer<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("ui", &self.ui)
            .field("objects", &self.objects.len())
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl<B: GeometryBackend, C: Camera> Viewer<B, C> {
    /// Creates a viewer around a panel and a camera.
    pub fn new(ui: Ui<B>, camera: C) -> Self {
        Self {
            ui,
            camera,
            objects: Vec::new(),
            events: VecDeque::new(),
        }
    }

    /// The control panel.
    pub fn ui(&self) -> &Ui<B> {
        &self.ui
    }

    /// The control panel, mutably.
    pub fn ui_mut(&mut self) -> &mut Ui<B> {
        &mut self.ui
    }

    /// The camera.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// The camera, mutably.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Number of scene objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Adds an object and builds its panel in a new framed section of the
    /// root layout. Returns the section's layout.
    pub fn add_object(&mut self, object: Box<dyn SceneObject<B>>) -> Result<LayoutId, BuildError> {
        let section = self.ui.root_layout().add_layout(Orientation::Vertical);
        let mut layout = self.ui.layout(section)?;
        layout.set_background(true);
        if let Err(err) = object.build_panel(&mut layout) {
            self.remove_section(section);
            return Err(err);
        }
        debug!("added scene object '{}'", object.name());
        self.objects.push((object, section));
        Ok(section)
    }

    /// Removes object `index` and its panel section.
    pub fn remove_object(&mut self, index: usize) -> Option<Box<dyn SceneObject<B>>> {
        if index >= self.objects.len() {
            return None;
        }
        let (object, section) = self.objects.remove(index);
        self.remove_section(section);
        Some(object)
    }

    fn remove_section(&mut self, section: LayoutId) {
        if let Err(err) = self.ui.remove_layout(section) {
            warn!("removing panel section: {err}");
        }
    }

    /// Queues an event for the next frame.
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Runs one frame.
    ///
    /// 1. Queued events are routed to the panel, in arrival order.
    /// 2. Objects update, then draw with the parameters as they now stand.
    /// 3. The panel repaints what changed and draws on top.
    pub fn frame(&mut self, dt: f64, renderer: &mut dyn SceneRenderer) -> FrameStats {
        let queued = self.events.len();
        while let Some(event) = self.events.pop_front() {
            self.ui.handle_event(&event);
        }
        let params = self.ui.params();
        for (object, _) in &mut self.objects {
            object.update(params, dt);
        }
        for (object, _) in &self.objects {
            object.draw(params, renderer);
        }
        let stats = self.ui.frame();
        trace!("frame: {queued} events, {stats:?}");
        stats
    }

    /// Frames every object with geometry. Does nothing for an empty scene.
    pub fn focus_all(&mut self) {
        let bounds = self
            .objects
            .iter()
            .filter_map(|(object, _)| object.bounds())
            .reduce(|a, b| a.union(&b));
        if let Some(bounds) = bounds {
            self.camera.focus(bounds);
        }
    }

    /// Ray through a window position.
    pub fn ray(&self, pos: Point) -> Ray {
        self.camera.project_ray(pos.x, pos.y)
    }

    /// Index of the nearest object whose bounds the ray through `pos` hits.
    pub fn pick(&self, pos: Point) -> Option<usize> {
        let ray = self.ray(pos);
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, (object, _))| Some((i, object.bounds()?.intersect(&ray)?)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// Frames one object.
    pub fn focus_object(&mut self, index: usize) -> bool {
        match self.objects.get(index).and_then(|(o, _)| o.bounds()) {
            Some(bounds) => {
                self.camera.focus(bounds);
                true
            }
            None => false,
        }
    }

    /// Tears down the panel and returns the rendering backend.
    pub fn close(self) -> B {
        self.ui.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Bounds;
    use crate::point_cloud::{PAUSE, PointCloud, PointCloudClass};
    use kurbo::Size;
    use understory_geometry::RecordingBackend;
    use understory_panel::{ControlKind, PointerButtons};

    /// Looks down `-z` with one world unit per 100 pixels.
    #[derive(Debug, Default)]
    struct TopDown {
        focused: Option<Bounds>,
    }

    impl Camera for TopDown {
        fn project_ray(&self, x: f64, y: f64) -> Ray {
            Ray {
                origin: [x / 100.0, y / 100.0, 10.0],
                direction: [0.0, 0.0, -1.0],
            }
        }

        fn focus(&mut self, bounds: Bounds) {
            self.focused = Some(bounds);
        }
    }

    #[derive(Default)]
    struct Sizes(Vec<f32>);

    impl SceneRenderer for Sizes {
        fn draw_points(&mut self, _points: &[[f32; 3]], size: f32, _color: [f32; 4]) {
            self.0.push(size);
        }
    }

    fn viewer() -> (Viewer<RecordingBackend, TopDown>, PointCloudClass) {
        let mut ui = Ui::new(RecordingBackend::default(), Size::new(800.0, 600.0));
        let class = PointCloudClass::register(ui.params_mut());
        (Viewer::new(ui, TopDown::default()), class)
    }

    fn cloud(
        viewer: &mut Viewer<RecordingBackend, TopDown>,
        class: PointCloudClass,
        name: &str,
        at: f32,
    ) -> LayoutId {
        let frames = vec![vec![[at, at, 0.0], [at + 1.0, at + 1.0, 0.0]]; 2];
        let object = PointCloud::new(viewer.ui_mut().params_mut(), class, name, frames);
        viewer.add_object(Box::new(object)).unwrap()
    }

    #[test]
    fn shared_settings_bind_every_instance() {
        let (mut viewer, class) = viewer();
        cloud(&mut viewer, class, "a", 0.0);
        cloud(&mut viewer, class, "b", 5.0);
        assert_eq!(viewer.ui().bound_controls(class.point_size).len(), 2);
        assert_eq!(viewer.ui().bound_controls(class.playback).len(), 2);

        // Slide the point size in the first panel.
        let control = viewer.ui().bound_controls(class.point_size)[0];
        let rect = viewer.ui().control_rect(control).unwrap();
        let (x, y) = (rect.x1 - 10.0, rect.center().y);
        viewer.push_event(InputEvent::press(x, y, PointerButtons::AUXILIARY));
        viewer.push_event(InputEvent::drag(x + 100.0, y, 100.0, 0.0, PointerButtons::AUXILIARY));
        viewer.push_event(InputEvent::release(x + 100.0, y, PointerButtons::AUXILIARY));

        let mut sizes = Sizes::default();
        let stats = viewer.frame(0.0, &mut sizes);
        assert_eq!(sizes.0.len(), 2);
        assert!(sizes.0.iter().all(|s| (s - 3.8).abs() < 1e-5), "{:?}", sizes.0);
        assert!(stats.repainted >= 2);
    }

    #[test]
    fn pause_from_the_panel_stops_playback() {
        let (mut viewer, class) = viewer();
        cloud(&mut viewer, class, "a", 0.0);
        let choice = viewer.ui().bound_controls(class.playback)[0];
        assert_eq!(viewer.ui().control_kind(choice), Some(ControlKind::Choice));
        let rect = viewer.ui().control_rect(choice).unwrap();
        let (x, y) = (rect.x1 - 5.0, rect.center().y);
        viewer.push_event(InputEvent::press(x, y, PointerButtons::PRIMARY));
        viewer.push_event(InputEvent::release(x, y, PointerButtons::PRIMARY));
        viewer.frame(1.0, &mut Sizes::default());
        assert_eq!(viewer.ui().params().get(class.playback), Some(&PAUSE));
    }

    #[test]
    fn focus_and_pick() {
        let (mut viewer, class) = viewer();
        viewer.focus_all();
        assert!(viewer.camera().focused.is_none());

        cloud(&mut viewer, class, "near origin", 0.0);
        cloud(&mut viewer, class, "far", 5.0);
        viewer.focus_all();
        let focused = viewer.camera().focused.unwrap();
        assert_eq!(focused.min, [0.0, 0.0, 0.0]);
        assert_eq!(focused.max, [6.0, 6.0, 0.0]);

        assert_eq!(viewer.pick(Point::new(50.0, 50.0)), Some(0));
        assert_eq!(viewer.pick(Point::new(550.0, 550.0)), Some(1));
        assert_eq!(viewer.pick(Point::new(300.0, 50.0)), None);
        assert!(viewer.focus_object(1));
        assert_eq!(viewer.camera().focused.unwrap().min, [5.0, 5.0, 0.0]);
    }

    #[test]
    fn removing_an_object_whose_section_is_gone() {
        let (mut viewer, class) = viewer();
        let section = cloud(&mut viewer, class, "a", 0.0);
        viewer.ui_mut().remove_layout(section).unwrap();
        assert!(viewer.remove_object(0).is_some());
        assert_eq!(viewer.object_count(), 0);
        assert_eq!(viewer.close().live_buffers(), 0);
    }

    #[test]
    fn removing_an_object_removes_its_panel() {
        let (mut viewer, class) = viewer();
        let section = cloud(&mut viewer, class, "a", 0.0);
        assert!(viewer.ui().layout_bounds(section).is_some());
        assert!(viewer.remove_object(0).is_some());
        assert!(viewer.ui().layout_bounds(section).is_none());
        assert!(viewer.ui().bound_controls(class.point_size).is_empty());
        assert!(viewer.remove_object(0).is_none());
        assert_eq!(viewer.close().live_buffers(), 0);
    }
}
