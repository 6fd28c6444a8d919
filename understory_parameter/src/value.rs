// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value types a parameter can hold.
//!
//! [`ParamValue`] exposes a value as a short list of numeric components and,
//! for booleans, as a flag. That is all a control needs in order to edit a
//! value without knowing its concrete type, and it is also what range
//! clamping works on: every numeric component is clamped independently.

use alloc::vec::Vec;
use core::fmt;

/// Broad category of a parameter value, used to pick a default control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// One or more numeric components (sliders / typed fields).
    Numeric,
    /// A boolean flag (checkbox).
    Toggle,
    /// An RGB color with three components in `0..=1`.
    Color,
    /// Read-only plotted data.
    Histogram,
    /// Anything else; only usable with an enumeration.
    Other,
}

/// A type that can be stored in a [`Parameter`](crate::Parameter).
///
/// Implementations exist for the primitive numeric types, `bool`, fixed-size
/// `f64` vectors, [`Color3`] and [`Histogram`]. Application enums can
/// implement it with the defaults and be used through an enumeration list.
pub trait ParamValue: Clone + PartialEq + fmt::Debug + 'static {
    /// Category used for default control selection.
    const KIND: ValueKind;

    /// Number of components (1 for scalars, N for vectors).
    fn components(&self) -> usize {
        1
    }

    /// Returns numeric component `sub`, or `None` if there is no such
    /// numeric component.
    fn component(&self, sub: usize) -> Option<f64> {
        let _ = sub;
        None
    }

    /// Writes numeric component `sub`. Returns `false` if the value has no
    /// such component.
    fn set_component(&mut self, sub: usize, value: f64) -> bool {
        let _ = (sub, value);
        false
    }

    /// Returns the value as a flag, for boolean values.
    fn flag(&self) -> Option<bool> {
        None
    }

    /// Writes the value from a flag. Returns `false` for non-boolean values.
    fn set_flag(&mut self, value: bool) -> bool {
        let _ = value;
        false
    }
}

impl ParamValue for f64 {
    const KIND: ValueKind = ValueKind::Numeric;

    fn component(&self, sub: usize) -> Option<f64> {
        (sub == 0).then_some(*self)
    }

    fn set_component(&mut self, sub: usize, value: f64) -> bool {
        if sub != 0 {
            return false;
        }
        *self = value;
        true
    }
}

impl ParamValue for f32 {
    const KIND: ValueKind = ValueKind::Numeric;

    fn component(&self, sub: usize) -> Option<f64> {
        (sub == 0).then_some(f64::from(*self))
    }

    fn set_component(&mut self, sub: usize, value: f64) -> bool {
        if sub != 0 {
            return false;
        }
        #[expect(clippy::cast_possible_truncation, reason = "f32 parameters store f32")]
        {
            *self = value as f32;
        }
        true
    }
}

macro_rules! impl_integer_value {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                const KIND: ValueKind = ValueKind::Numeric;

                fn component(&self, sub: usize) -> Option<f64> {
                    (sub == 0).then_some(*self as f64)
                }

                fn set_component(&mut self, sub: usize, value: f64) -> bool {
                    if sub != 0 {
                        return false;
                    }
                    // `as` saturates at the integer bounds and maps NaN to zero.
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "rounded and saturated on purpose"
                    )]
                    {
                        *self = round_half_away(value) as $ty;
                    }
                    true
                }
            }
        )*
    };
}

impl_integer_value!(i32, i64, u32);

/// Rounds half away from zero without relying on `std` float intrinsics.
fn round_half_away(value: f64) -> f64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "values outside the i64 range saturate, which is fine for UI input"
    )]
    let truncated = value as i64 as f64;
    let frac = value - truncated;
    if frac >= 0.5 {
        truncated + 1.0
    } else if frac <= -0.5 {
        truncated - 1.0
    } else {
        truncated
    }
}

impl ParamValue for bool {
    const KIND: ValueKind = ValueKind::Toggle;

    fn flag(&self) -> Option<bool> {
        Some(*self)
    }

    fn set_flag(&mut self, value: bool) -> bool {
        *self = value;
        true
    }
}

impl<const N: usize> ParamValue for [f64; N] {
    const KIND: ValueKind = ValueKind::Numeric;

    fn components(&self) -> usize {
        N
    }

    fn component(&self, sub: usize) -> Option<f64> {
        self.get(sub).copied()
    }

    fn set_component(&mut self, sub: usize, value: f64) -> bool {
        match self.get_mut(sub) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// An RGB color with components nominally in `0..=1`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color3 {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Color3 {
    /// Creates a color from its components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Returns `[r, g, b, alpha]`.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl ParamValue for Color3 {
    const KIND: ValueKind = ValueKind::Color;

    fn components(&self) -> usize {
        3
    }

    fn component(&self, sub: usize) -> Option<f64> {
        match sub {
            0 => Some(f64::from(self.r)),
            1 => Some(f64::from(self.g)),
            2 => Some(f64::from(self.b)),
            _ => None,
        }
    }

    fn set_component(&mut self, sub: usize, value: f64) -> bool {
        #[expect(clippy::cast_possible_truncation, reason = "colors are stored as f32")]
        let value = value as f32;
        match sub {
            0 => self.r = value,
            1 => self.g = value,
            2 => self.b = value,
            _ => return false,
        }
        true
    }
}

/// One plotted series of a [`Histogram`].
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramChannel {
    /// `(x, y)` samples, in data space.
    pub points: Vec<[f64; 2]>,
    /// Display color (RGBA).
    pub color: [f32; 4],
}

/// Read-only plotted data shown by a histogram control.
///
/// ```rust
/// use understory_parameter::Histogram;
///
/// let hist = Histogram::new()
///     .with_bins(&[1.0, 4.0, 2.0], [1.0, 0.2, 0.2, 1.0])
///     .with_bins(&[0.5, 0.5, 3.0], [0.2, 1.0, 0.2, 1.0]);
/// assert_eq!(hist.channels.len(), 2);
/// assert_eq!(hist.channels[0].points[1], [1.0, 4.0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram {
    /// Series, drawn in order.
    pub channels: Vec<HistogramChannel>,
}

impl Histogram {
    /// Creates an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a channel from explicit `(x, y)` samples.
    #[must_use]
    pub fn with_points(mut self, points: Vec<[f64; 2]>, color: [f32; 4]) -> Self {
        self.channels.push(HistogramChannel { points, color });
        self
    }

    /// Adds a channel from bin heights; bin `i` is plotted at `x = i`.
    #[must_use]
    pub fn with_bins(self, bins: &[f64], color: [f32; 4]) -> Self {
        let points = bins
            .iter()
            .enumerate()
            .map(|(i, &y)| [i as f64, y])
            .collect();
        self.with_points(points, color)
    }
}

impl ParamValue for Histogram {
    const KIND: ValueKind = ValueKind::Histogram;
}
