// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable objects and the 3D drawing seam.

use understory_geometry::GeometryBackend;
use understory_panel::{BuildError, LayoutMut};
use understory_parameter::ParamStore;

use crate::camera::Bounds;

/// Where scene objects draw. Implemented by the host on top of its 3D
/// renderer.
pub trait SceneRenderer {
    /// Draws `points` as screen-aligned squares `size` pixels wide.
    fn draw_points(&mut self, points: &[[f32; 3]], size: f32, color: [f32; 4]);
}

/// An object in the scene.
///
/// Objects keep their settings in the viewer's [`ParamStore`] and read them
/// back on every update and draw, so edits made in the panel apply on the
/// next frame without any notification.
pub trait SceneObject<B: GeometryBackend> {
    /// Name shown at the top of the object's panel.
    fn name(&self) -> &str;

    /// Advances animation by `dt` seconds.
    fn update(&mut self, params: &ParamStore, dt: f64);

    /// Draws the object.
    fn draw(&self, params: &ParamStore, renderer: &mut dyn SceneRenderer);

    /// World-space extent, if the object has any geometry.
    fn bounds(&self) -> Option<Bounds>;

    /// Adds the object's controls to its panel.
    fn build_panel(&self, layout: &mut LayoutMut<'_, B>) -> Result<(), BuildError>;
}
