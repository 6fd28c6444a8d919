// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Viewer: a point-cloud viewer shell around a control panel.
//!
//! The viewer owns a [`Ui`](understory_panel::Ui), a host [`Camera`] and a
//! list of [`SceneObject`]s. Each object contributes a framed section to the
//! panel; its settings are parameters in the panel's store, so the panel
//! edits them directly and the object reads them back every frame.
//!
//! 3D rendering stays with the host: objects draw through a
//! [`SceneRenderer`], and the camera is reduced to ray projection and
//! framing.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_geometry::RecordingBackend;
//! use understory_panel::Ui;
//! use understory_viewer::{Bounds, Camera, PointCloud, PointCloudClass, Ray, SceneRenderer, Viewer};
//!
//! struct Fixed;
//!
//! impl Camera for Fixed {
//!     fn project_ray(&self, x: f64, y: f64) -> Ray {
//!         Ray { origin: [x, y, 1.0], direction: [0.0, 0.0, -1.0] }
//!     }
//!     fn focus(&mut self, _bounds: Bounds) {}
//! }
//!
//! struct Count(usize);
//!
//! impl SceneRenderer for Count {
//!     fn draw_points(&mut self, points: &[[f32; 3]], _size: f32, _color: [f32; 4]) {
//!         self.0 += points.len();
//!     }
//! }
//!
//! let mut ui = Ui::new(RecordingBackend::default(), Size::new(800.0, 600.0));
//! let class = PointCloudClass::register(ui.params_mut());
//! let cloud = PointCloud::new(ui.params_mut(), class, "Smoke", vec![vec![[0.0; 3]; 100]]);
//!
//! let mut viewer = Viewer::new(ui, Fixed);
//! viewer.add_object(Box::new(cloud)).unwrap();
//!
//! let mut count = Count(0);
//! let stats = viewer.frame(1.0 / 60.0, &mut count);
//! assert_eq!(count.0, 100);
//! assert!(stats.repainted > 0);
//! ```

mod camera;
mod point_cloud;
mod scene;
mod viewer;

pub use camera::{Bounds, Camera, Ray};
pub use point_cloud::{PAUSE, PLAY, PointCloud, PointCloudClass};
pub use scene::{SceneObject, SceneRenderer};
pub use viewer::Viewer;
