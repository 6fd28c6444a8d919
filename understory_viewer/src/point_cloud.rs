// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated point clouds.

use log::debug;
use understory_geometry::GeometryBackend;
use understory_panel::{BuildError, LayoutMut};
use understory_parameter::{Color3, Param, ParamStore, Parameter};

use crate::camera::Bounds;
use crate::scene::{SceneObject, SceneRenderer};

/// Playback value that advances frames.
pub const PLAY: i32 = 1;
/// Playback value that holds the current frame.
pub const PAUSE: i32 = 0;

/// Settings shared by every point cloud.
///
/// Register these once per store and hand a copy to each [`PointCloud`]:
/// every instance panel then binds the same parameters, and moving the
/// point size slider in one panel updates all of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointCloudClass {
    /// Drawn size of each point, in pixels.
    pub point_size: Param<f32>,
    /// [`PLAY`] or [`PAUSE`].
    pub playback: Param<i32>,
    /// Frames per second during playback.
    pub frame_rate: Param<f64>,
}

impl PointCloudClass {
    /// Registers the shared parameters.
    pub fn register(params: &mut ParamStore) -> Self {
        Self {
            point_size: params.register(
                Parameter::builder(2.0_f32)
                    .title("Point size")
                    .range(1.0, 10.0)
                    .build(),
            ),
            playback: params.register(
                Parameter::builder(PLAY)
                    .title("Playback")
                    .enumeration([("Play", PLAY), ("Pause", PAUSE)])
                    .build(),
            ),
            frame_rate: params.register(
                Parameter::builder(24.0_f64)
                    .title("Frame rate")
                    .range(1.0, 120.0)
                    .build(),
            ),
        }
    }
}

/// A point cloud with one point set per animation frame.
#[derive(Debug)]
pub struct PointCloud {
    name: String,
    class: PointCloudClass,
    visible: Param<bool>,
    color: Param<Color3>,
    frames: Vec<Vec<[f32; 3]>>,
    current: usize,
    elapsed: f64,
}

impl PointCloud {
    /// Creates a point cloud and registers its own settings.
    pub fn new(
        params: &mut ParamStore,
        class: PointCloudClass,
        name: &str,
        frames: Vec<Vec<[f32; 3]>>,
    ) -> Self {
        let visible = params.register(Parameter::builder(true).title("Visible").build());
        let color = params.register(
            Parameter::builder(Color3::new(1.0, 1.0, 1.0))
                .title("Color")
                .range(0.0, 1.0)
                .build(),
        );
        debug!("point cloud '{name}' with {} frames", frames.len());
        Self {
            name: name.to_owned(),
            class,
            visible,
            color,
            frames,
            current: 0,
            elapsed: 0.0,
        }
    }

    /// Index of the frame shown.
    pub fn current_frame(&self) -> usize {
        self.current
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The instance's visibility parameter.
    pub fn visible(&self) -> Param<bool> {
        self.visible
    }

    /// The instance's color parameter.
    pub fn color(&self) -> Param<Color3> {
        self.color
    }
}

impl<B: GeometryBackend> SceneObject<B> for PointCloud {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, params: &ParamStore, dt: f64) {
        if self.frames.len() < 2 || params.get(self.class.playback) != Some(&PLAY) {
            return;
        }
        let period = 1.0 / params.get(self.class.frame_rate).copied().unwrap_or(24.0);
        self.elapsed += dt;
        while self.elapsed >= period {
            self.elapsed -= period;
            self.current = (self.current + 1) % self.frames.len();
        }
    }

    fn draw(&self, params: &ParamStore, renderer: &mut dyn SceneRenderer) {
        if params.get(self.visible) != Some(&true) {
            return;
        }
        let Some(points) = self.frames.get(self.current) else {
            return;
        };
        let size = params.get(self.class.point_size).copied().unwrap_or(1.0);
        let color = params.get(self.color).copied().unwrap_or_default();
        renderer.draw_points(points, size, color.with_alpha(1.0));
    }

    fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.frames.iter().flatten())
    }

    fn build_panel(&self, layout: &mut LayoutMut<'_, B>) -> Result<(), BuildError> {
        layout.add_label(&self.name);
        layout.add_parameter(self.visible, None)?;
        layout.add_parameter(self.color, None)?;
        layout.add_parameter(self.class.point_size, None)?;
        layout.add_parameter(self.class.playback, None)?;
        layout.add_parameter(self.class.frame_rate, None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_geometry::RecordingBackend;

    #[derive(Default)]
    struct Points(Vec<(usize, f32)>);

    impl SceneRenderer for Points {
        fn draw_points(&mut self, points: &[[f32; 3]], size: f32, _color: [f32; 4]) {
            self.0.push((points.len(), size));
        }
    }

    fn frames() -> Vec<Vec<[f32; 3]>> {
        vec![
            vec![[0.0; 3]],
            vec![[0.0; 3], [1.0; 3]],
            vec![[0.0; 3], [1.0; 3], [-1.0; 3]],
        ]
    }

    fn update(cloud: &mut PointCloud, params: &ParamStore, dt: f64) {
        SceneObject::<RecordingBackend>::update(cloud, params, dt);
    }

    #[test]
    fn playback_advances_and_wraps() {
        let mut params = ParamStore::new();
        let class = PointCloudClass::register(&mut params);
        params.set(class.frame_rate, 10.0).unwrap();
        let mut cloud = PointCloud::new(&mut params, class, "cloud", frames());
        update(&mut cloud, &params, 0.25);
        assert_eq!(cloud.current_frame(), 2);
        update(&mut cloud, &params, 0.1);
        assert_eq!(cloud.current_frame(), 0, "wraps to the first frame");

        params.set(class.playback, PAUSE).unwrap();
        update(&mut cloud, &params, 1.0);
        assert_eq!(cloud.current_frame(), 0);
    }

    #[test]
    fn draw_reads_shared_and_own_settings() {
        let mut params = ParamStore::new();
        let class = PointCloudClass::register(&mut params);
        let a = PointCloud::new(&mut params, class, "a", frames());
        let b = PointCloud::new(&mut params, class, "b", frames());
        params.set(class.point_size, 4.0).unwrap();
        params.set(b.visible(), false).unwrap();

        let mut out = Points::default();
        SceneObject::<RecordingBackend>::draw(&a, &params, &mut out);
        SceneObject::<RecordingBackend>::draw(&b, &params, &mut out);
        assert_eq!(out.0, [(1, 4.0)]);
    }

    #[test]
    fn bounds_cover_every_frame() {
        let mut params = ParamStore::new();
        let class = PointCloudClass::register(&mut params);
        let cloud = PointCloud::new(&mut params, class, "cloud", frames());
        let b = SceneObject::<RecordingBackend>::bounds(&cloud).unwrap();
        assert_eq!(b.min, [-1.0; 3]);
        assert_eq!(b.max, [1.0; 3]);

        let empty = PointCloud::new(&mut params, class, "empty", Vec::new());
        assert!(SceneObject::<RecordingBackend>::bounds(&empty).is_none());
    }
}
