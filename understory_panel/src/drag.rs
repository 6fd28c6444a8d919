// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide tracker: turns horizontal pointer motion into values.
//!
//! The tracker remembers the value at the grab and the distance travelled
//! since, so the value follows the pointer even when the bound parameter
//! rounds each write (integers) or clamps it.
//!
//! ## Usage
//!
//! 1) Grab a component with [`SlideState::start`] when the slide button goes down.
//! 2) On each drag event, [`SlideState::update`] returns the value for the motion so far.
//! 3) [`SlideState::end`] releases the grab.
//!
//! ```
//! use kurbo::Vec2;
//! use understory_panel::SlideState;
//!
//! let mut slide = SlideState::default();
//! slide.start(0, 500.0, 2.0);
//! // 50 px across a 0..10 range is one unit.
//! assert_eq!(slide.update(Vec2::new(50.0, 7.0), (0.0, 10.0)), Some(3.0));
//! assert_eq!(slide.update(Vec2::new(50.0, 0.0), (0.0, 10.0)), Some(4.0));
//! slide.end();
//! assert_eq!(slide.update(Vec2::new(50.0, 0.0), (0.0, 10.0)), None);
//! ```

use kurbo::Vec2;

/// Tracks one slide gesture on a numeric field.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct SlideState {
    /// Component being slid.
    pub sub: Option<usize>,
    /// Pixels of motion that cover the full range.
    pub pixels: f64,
    /// Component value when the grab started.
    pub origin: f64,
    /// Horizontal distance moved since the grab.
    pub travelled: f64,
}

impl SlideState {
    /// Grabs component `sub`, currently at `origin`.
    pub fn start(&mut self, sub: usize, pixels: f64, origin: f64) {
        self.sub = Some(sub);
        self.pixels = pixels;
        self.origin = origin;
        self.travelled = 0.0;
    }

    /// Adds a pointer motion of `delta` and returns the slid value over `range`.
    ///
    /// Only horizontal motion counts. The result is not clamped. Returns
    /// `None` when nothing is grabbed.
    pub fn update(&mut self, delta: Vec2, range: (f64, f64)) -> Option<f64> {
        self.sub?;
        if self.pixels <= 0.0 {
            return Some(self.origin);
        }
        self.travelled += delta.x;
        Some(self.origin + self.travelled * (range.1 - range.0) / self.pixels)
    }

    /// Releases the grab.
    pub fn end(&mut self) {
        self.sub = None;
        self.travelled = 0.0;
    }

    /// Returns `true` while a component is grabbed.
    pub fn is_sliding(&self) -> bool {
        self.sub.is_some()
    }
}
