// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The camera seam and the world-space boxes it frames.

/// A world-space ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: [f64; 3],
    /// Direction. Need not be normalized.
    pub direction: [f64; 3],
}

impl Ray {
    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f64) -> [f64; 3] {
        core::array::from_fn(|i| self.origin[i] + t * self.direction[i])
    }
}

/// Axis-aligned world-space box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest corner.
    pub min: [f64; 3],
    /// Largest corner.
    pub max: [f64; 3],
}

impl Bounds {
    /// Creates a box from two corners in any order.
    pub fn new(a: [f64; 3], b: [f64; 3]) -> Self {
        Self {
            min: core::array::from_fn(|i| a[i].min(b[i])),
            max: core::array::from_fn(|i| a[i].max(b[i])),
        }
    }

    /// Smallest box holding every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f32; 3]>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Self>, p| {
            let p = p.map(f64::from);
            Some(match acc {
                Some(b) => b.union(&Self::new(p, p)),
                None => Self::new(p, p),
            })
        })
    }

    /// Smallest box holding both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: core::array::from_fn(|i| self.min[i].min(other.min[i])),
            max: core::array::from_fn(|i| self.max[i].max(other.max[i])),
        }
    }

    /// Centre point.
    pub fn center(&self) -> [f64; 3] {
        core::array::from_fn(|i| 0.5 * (self.min[i] + self.max[i]))
    }

    /// Parameter of the first point where `ray` enters the box, `0` when it
    /// starts inside, `None` when it misses.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let mut near = 0.0_f64;
        let mut far = f64::INFINITY;
        for i in 0..3 {
            let (o, d) = (ray.origin[i], ray.direction[i]);
            if d == 0.0 {
                if o < self.min[i] || o > self.max[i] {
                    return None;
                }
                continue;
            }
            let (mut t0, mut t1) = ((self.min[i] - o) / d, (self.max[i] - o) / d);
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            near = near.max(t0);
            far = far.min(t1);
            if far < near {
                return None;
            }
        }
        Some(near)
    }
}

/// What the viewer needs from a camera.
///
/// Projection math and orbit kinematics live with the host; the viewer only
/// turns window positions into rays and asks the camera to frame a box.
pub trait Camera {
    /// Ray through window position `(x, y)`, in pixels with `y` up.
    fn project_ray(&self, x: f64, y: f64) -> Ray;

    /// Moves the camera so `bounds` fills the view.
    fn focus(&mut self, bounds: Bounds);
}
