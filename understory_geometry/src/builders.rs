// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape builders for panel widgets.
//!
//! Every builder returns a [`Shape`] whose key follows a fixed naming scheme
//! (`roundbase{i}`, `roundoutline{i}`, `checkmarkoutline`, `wheel`,
//! `additive_histogram{i}`), so the key alone decides the draw group and a
//! widget repainting the same shape overwrites its buffer in place.
//!
//! Line geometry is anti-aliased by [`aa_jitter`]: the vertex list is
//! repeated once per sub-pixel sample with the alpha divided by the sample
//! count, which the blended outline group accumulates back to full coverage.

use core::f64::consts::{FRAC_PI_2, TAU};

use bitflags::bitflags;
use kurbo::Rect;

use crate::shape::{PrimitiveMode, Shape};

/// Number of sub-pixel samples used by [`aa_jitter`].
pub const AA_SAMPLES: usize = 6;

/// Radial subdivisions per rounded corner.
const ROUND_STEPS: i32 = 2;

/// Segments around the color wheel.
const WHEEL_STEPS: usize = 48;

bitflags! {
    /// Which corners of a rounded box are rounded.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        /// Top left.
        const TOP_LEFT = 1;
        /// Top right.
        const TOP_RIGHT = 1 << 1;
        /// Bottom right.
        const BOTTOM_RIGHT = 1 << 2;
        /// Bottom left.
        const BOTTOM_LEFT = 1 << 3;
        /// All four corners.
        const ALL = Self::TOP_LEFT.bits()
            | Self::TOP_RIGHT.bits()
            | Self::BOTTOM_RIGHT.bits()
            | Self::BOTTOM_LEFT.bits();
    }
}

#[expect(clippy::cast_possible_truncation, reason = "vertex data is uploaded as f32")]
fn pt(x: f64, y: f64) -> [f32; 2] {
    [x as f32, y as f32]
}

/// Returns `n` base-2 Hammersley points on the unit square.
///
/// ```
/// let pts = understory_geometry::hammersley(4);
/// assert_eq!(pts[0], [0.0, 0.125]);
/// assert_eq!(pts[1], [0.5, 0.375]);
/// assert_eq!(pts[3], [0.75, 0.875]);
/// ```
#[must_use]
pub fn hammersley(n: usize) -> Vec<[f32; 2]> {
    (0..n)
        .map(|k| {
            let mut u = 0.0_f64;
            let mut p = 0.5;
            let mut kk = k;
            while kk > 0 {
                if kk & 1 == 1 {
                    u += p;
                }
                p *= 0.5;
                kk >>= 1;
            }
            let v = (k as f64 + 0.5) / n as f64;
            pt(u, v)
        })
        .collect()
}

/// Repeats a vertex list once per sub-pixel sample.
///
/// Copy `k` of the list is offset by Hammersley point `k`; every color keeps
/// its RGB and has its alpha divided by [`AA_SAMPLES`].
#[must_use]
pub fn aa_jitter(vertices: &[[f32; 2]], colors: &[[f32; 4]]) -> (Vec<[f32; 2]>, Vec<[f32; 4]>) {
    let samples = hammersley(AA_SAMPLES);
    let mut out_vertices = Vec::with_capacity(vertices.len() * AA_SAMPLES);
    let mut out_colors = Vec::with_capacity(colors.len() * AA_SAMPLES);
    let scale = 1.0 / AA_SAMPLES as f32;
    for [du, dv] in samples {
        out_vertices.extend(vertices.iter().map(|[x, y]| [x + du, y + dv]));
        out_colors.extend(colors.iter().map(|&[r, g, b, a]| [r, g, b, a * scale]));
    }
    (out_vertices, out_colors)
}

/// Duplicates the first and last vertex so consecutive strips drawn in one
/// batch are separated by degenerate triangles.
fn strip_fix(mut vertices: Vec<[f32; 2]>) -> Vec<[f32; 2]> {
    if let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) {
        vertices.insert(0, first);
        vertices.push(last);
    }
    vertices
}

/// Rounded box as left/right vertex pairs from bottom to top.
///
/// Suitable as a triangle strip. The radius is limited to half the smaller
/// side of `rect`.
#[must_use]
pub fn round_strip(rect: Rect, radius: f64, corners: Corners) -> Vec<[f32; 2]> {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let r = radius.min(w * 0.5).min(h * 0.5).max(0.0);
    let ch = h - 2.0 * r;
    let mut geo = Vec::with_capacity(2 * (2 * ROUND_STEPS as usize + 2));
    for i in -ROUND_STEPS..=ROUND_STEPS {
        if i == 0 {
            geo.push(pt(x, y + r));
            geo.push(pt(x + w, y + r));
            geo.push(pt(x, y + r + ch));
            geo.push(pt(x + w, y + r + ch));
            continue;
        }
        let theta = FRAC_PI_2 * f64::from(i) / f64::from(ROUND_STEPS);
        let ct = theta.cos();
        let (left, right, y0) = if i > 0 {
            (
                corners.contains(Corners::TOP_LEFT),
                corners.contains(Corners::TOP_RIGHT),
                theta.sin() * r + r + ch,
            )
        } else {
            (
                corners.contains(Corners::BOTTOM_LEFT),
                corners.contains(Corners::BOTTOM_RIGHT),
                theta.sin() * r + r,
            )
        };
        let x1 = if left { r * (1.0 - ct) } else { 0.0 };
        let x2 = if right { ct * r } else { r };
        geo.push(pt(x + x1, y + y0));
        geo.push(pt(x + x2 + w - r, y + y0));
    }
    geo
}

/// Filled rounded box with a vertical gradient from `bottom` to `top`.
#[must_use]
pub fn round_base(
    index: usize,
    rect: Rect,
    radius: f64,
    bottom: [f32; 4],
    top: [f32; 4],
    corners: Corners,
) -> Shape {
    let vertices = strip_fix(round_strip(rect, radius, corners));
    let (min_y, max_y) = vertices
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v[1]), hi.max(v[1]))
        });
    let span = max_y - min_y;
    let colors = vertices
        .iter()
        .map(|v| {
            let t = if span > 0.0 { (v[1] - min_y) / span } else { 0.0 };
            core::array::from_fn(|c| bottom[c] + t * (top[c] - bottom[c]))
        })
        .collect();
    Shape {
        key: format!("roundbase{index}"),
        mode: PrimitiveMode::TriangleStrip,
        vertices,
        colors,
        tex_coords: None,
    }
}

/// Anti-aliased outline of a rounded box, as line segments.
#[must_use]
pub fn round_outline(
    index: usize,
    rect: Rect,
    radius: f64,
    color: [f32; 4],
    corners: Corners,
) -> Shape {
    let strip = round_strip(rect, radius, corners);
    // Left side going up, then right side coming down, closes the loop.
    let ring: Vec<[f32; 2]> = strip
        .iter()
        .step_by(2)
        .chain(strip.iter().skip(1).step_by(2).rev())
        .copied()
        .collect();
    let mut lines = Vec::with_capacity(ring.len() * 2);
    for (i, &v) in ring.iter().enumerate() {
        lines.push(v);
        lines.push(ring[(i + 1) % ring.len()]);
    }
    let colors = vec![color; lines.len()];
    let (vertices, colors) = aa_jitter(&lines, &colors);
    Shape {
        key: format!("roundoutline{index}"),
        mode: PrimitiveMode::Lines,
        vertices,
        colors,
        tex_coords: None,
    }
}

/// Anti-aliased check mark drawn over a checkbox occupying `rect`.
#[must_use]
pub fn checkmark(rect: Rect, color: [f32; 4]) -> Shape {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let lines = [
        pt(x + w * 0.2, y + h * 0.5),
        pt(x + w * 0.5, y + h * 0.2),
        pt(x + w * 0.5, y + h * 0.2),
        pt(x + w * 1.3, y + h * 1.3),
    ];
    let colors = [color; 4];
    let (vertices, colors) = aa_jitter(&lines, &colors);
    Shape {
        key: "checkmarkoutline".into(),
        mode: PrimitiveMode::Lines,
        vertices,
        colors,
        tex_coords: None,
    }
}

/// Disc for the color wheel, as a triangle fan.
///
/// The disc is centred in `rect` with a diameter of its height. Vertex
/// colors are the gray level `value`; texture coordinates span the disc's
/// bounding box from 0 to 1 and are what the wheel shader turns into hue
/// and saturation.
#[must_use]
pub fn color_wheel(rect: Rect, value: f32) -> Shape {
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let cx = x + (w * 0.5).trunc();
    let cy = y + (h * 0.5).trunc();
    let r = h * 0.5;
    let dtheta = TAU / WHEEL_STEPS as f64;
    let mut vertices = Vec::with_capacity(WHEEL_STEPS + 2);
    vertices.push(pt(cx, cy));
    for i in 0..=WHEEL_STEPS {
        let theta = i as f64 * dtheta;
        vertices.push(pt(cx + r * theta.cos(), cy + r * theta.sin()));
    }
    let colors = vec![[value, value, value, 1.0]; vertices.len()];
    let tex_coords = Some(normalized_coords(&vertices));
    Shape {
        key: "wheel".into(),
        mode: PrimitiveMode::TriangleFan,
        vertices,
        colors,
        tex_coords,
    }
}

/// Maps vertices into `0..=1` over their own bounding box.
fn normalized_coords(vertices: &[[f32; 2]]) -> Vec<[f32; 2]> {
    let mut lo = [f32::INFINITY; 2];
    let mut hi = [f32::NEG_INFINITY; 2];
    for v in vertices {
        for c in 0..2 {
            lo[c] = lo[c].min(v[c]);
            hi[c] = hi[c].max(v[c]);
        }
    }
    let norm = |v: f32, c: usize| {
        let span = hi[c] - lo[c];
        if span > 0.0 { (v - lo[c]) / span } else { 0.0 }
    };
    vertices
        .iter()
        .map(|v| [norm(v[0], 0), norm(v[1], 1)])
        .collect()
}

/// Filled plot of `points` scaled to fill `rect`, additively blended.
///
/// Returns `None` when there are no points.
#[must_use]
pub fn histogram(index: usize, rect: Rect, points: &[[f64; 2]], color: [f32; 4]) -> Option<Shape> {
    if points.is_empty() {
        return None;
    }
    let (x, y, w, h) = (rect.x0, rect.y0, rect.width(), rect.height());
    let (mut xmin, mut xmax) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut ymin, mut ymax) = (f64::INFINITY, f64::NEG_INFINITY);
    for &[px, py] in points {
        xmin = xmin.min(px);
        xmax = xmax.max(px);
        ymin = ymin.min(py);
        ymax = ymax.max(py);
    }
    let xw = if xmax > xmin { xmax - xmin } else { 1.0 };
    let yh = if ymax > ymin { ymax - ymin } else { 1.0 };

    let mut strip = Vec::with_capacity(points.len() * 2 + 2);
    strip.push(pt(x, y));
    for &[px, py] in points {
        let sx = (px - xmin) * (w / xw) + x;
        let sy = (py - ymin) * (h / yh) + y;
        strip.push(pt(sx, sy));
        strip.push(pt(sx, y));
    }
    strip.push(pt(x + w, y));
    let strip = strip_fix(strip);
    let colors = vec![color; strip.len()];
    let (vertices, colors) = aa_jitter(&strip, &colors);
    Some(Shape {
        key: format!("additive_histogram{index}"),
        mode: PrimitiveMode::TriangleStrip,
        vertices,
        colors,
        tex_coords: None,
    })
}
