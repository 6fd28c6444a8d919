// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parameter cells and their builder.
//!
//! A [`Parameter`] is a value plus the metadata a control needs to edit it:
//! a numeric range, an optional list of named values, a display subtype and
//! a title. Writes go through one path that validates enumerations, clamps
//! numeric components into range and then invokes the change callback.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::value::ParamValue;

/// Callback invoked after every successful write, with the stored value.
pub type ChangeCallback<T> = Box<dyn FnMut(&T)>;

/// How a numeric parameter is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Subtype {
    /// Plain number.
    #[default]
    None,
    /// Stored in radians, shown and typed in degrees.
    Angle,
}

/// Why a write was refused. Converted to a [`ParamError`](crate::ParamError)
/// by the store, which knows the parameter ID.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Rejection {
    Index { sub: usize, len: usize },
    InvalidEnum,
    NotNumeric,
}

/// A typed, observable value cell.
///
/// Parameters are created with [`Parameter::builder`] and handed to a
/// [`ParamStore`](crate::ParamStore), which owns them for the rest of their
/// life and routes all reads and writes.
///
/// For numeric values every component stays within `min..=max` after any
/// write. Enumerated parameters are the exception: the list of named values
/// is their domain, so they are validated against it instead of clamped.
pub struct Parameter<T: ParamValue> {
    title: String,
    value: T,
    min: f64,
    max: f64,
    enumeration: Option<Vec<(String, T)>>,
    subtype: Subtype,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: ParamValue> Parameter<T> {
    /// Starts building a parameter holding `default`.
    ///
    /// The range defaults to `0.0..=1.0`.
    #[must_use]
    pub fn builder(default: T) -> ParameterBuilder<T> {
        ParameterBuilder::new(default)
    }

    /// Returns the current value.
    #[must_use]
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns `(min, max)`.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Returns the display subtype.
    #[must_use]
    pub fn subtype(&self) -> Subtype {
        self.subtype
    }

    /// Returns the named values, if this parameter is enumerated.
    #[must_use]
    pub fn enumeration(&self) -> Option<&[(String, T)]> {
        self.enumeration.as_deref()
    }

    /// Returns the number of components of the value.
    #[must_use]
    pub fn components(&self) -> usize {
        self.value.components()
    }

    /// Returns the position of the current value in the enumeration.
    #[must_use]
    pub fn enum_index(&self) -> Option<usize> {
        self.enumeration
            .as_ref()?
            .iter()
            .position(|(_, v)| *v == self.value)
    }

    pub(crate) fn component(&self, sub: usize) -> Result<f64, Rejection> {
        let len = self.value.components();
        if sub >= len {
            return Err(Rejection::Index { sub, len });
        }
        self.value.component(sub).ok_or(Rejection::NotNumeric)
    }

    /// The single write path.
    pub(crate) fn set(&mut self, value: T) -> Result<(), Rejection> {
        let value = match &self.enumeration {
            Some(list) => {
                if !list.iter().any(|(_, v)| *v == value) {
                    return Err(Rejection::InvalidEnum);
                }
                value
            }
            None => clamp_components(value, self.min, self.max),
        };
        self.value = value;
        if let Some(callback) = &mut self.on_change {
            callback(&self.value);
        }
        Ok(())
    }

    pub(crate) fn set_component(&mut self, sub: usize, value: f64) -> Result<(), Rejection> {
        self.set_components(sub, &[value])
    }

    /// Writes consecutive components starting at `first` as one write.
    pub(crate) fn set_components(&mut self, first: usize, values: &[f64]) -> Result<(), Rejection> {
        let len = self.value.components();
        let mut candidate = self.value.clone();
        for (offset, &v) in values.iter().enumerate() {
            let sub = first + offset;
            if sub >= len {
                return Err(Rejection::Index { sub, len });
            }
            if !candidate.set_component(sub, v) {
                return Err(Rejection::NotNumeric);
            }
        }
        self.set(candidate)
    }

    pub(crate) fn set_flag(&mut self, flag: bool) -> Result<(), Rejection> {
        let mut candidate = self.value.clone();
        if !candidate.set_flag(flag) {
            return Err(Rejection::NotNumeric);
        }
        self.set(candidate)
    }

    pub(crate) fn select_enum(&mut self, index: usize) -> Result<(), Rejection> {
        let Some(list) = &self.enumeration else {
            return Err(Rejection::InvalidEnum);
        };
        let Some((_, value)) = list.get(index) else {
            return Err(Rejection::Index {
                sub: index,
                len: list.len(),
            });
        };
        let value = value.clone();
        self.set(value)
    }
}

impl<T: ParamValue> fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("title", &self.title)
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("enumeration", &self.enumeration)
            .field("subtype", &self.subtype)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

/// Clamps every numeric component of `value` into `min..=max`.
///
/// NaN components are replaced by `min`.
fn clamp_components<T: ParamValue>(mut value: T, min: f64, max: f64) -> T {
    for sub in 0..value.components() {
        let Some(c) = value.component(sub) else {
            continue;
        };
        let clamped = if c.is_nan() || c < min {
            min
        } else if c > max {
            max
        } else {
            continue;
        };
        value.set_component(sub, clamped);
    }
    value
}

/// Builder for [`Parameter`].
///
/// # Example
///
/// ```rust
/// use understory_parameter::{ParamStore, Parameter, Subtype};
///
/// let mut store = ParamStore::new();
/// let angle = store.register(
///     Parameter::builder(0.5_f64)
///         .title("Rotation")
///         .range(0.0, core::f64::consts::TAU)
///         .subtype(Subtype::Angle)
///         .build(),
/// );
/// store.set(angle, 10.0).unwrap();
/// assert_eq!(store.get(angle), Some(&core::f64::consts::TAU));
/// ```
pub struct ParameterBuilder<T: ParamValue> {
    title: String,
    default: T,
    min: f64,
    max: f64,
    enumeration: Option<Vec<(String, T)>>,
    subtype: Subtype,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: ParamValue> fmt::Debug for ParameterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterBuilder")
            .field("title", &self.title)
            .field("default", &self.default)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("enumeration", &self.enumeration)
            .field("subtype", &self.subtype)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<T: ParamValue> ParameterBuilder<T> {
    /// Creates a builder with the given default value.
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            title: String::new(),
            default,
            min: 0.0,
            max: 1.0,
            enumeration: None,
            subtype: Subtype::None,
            on_change: None,
        }
    }

    /// Sets the title shown next to bound controls.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the numeric range. Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        if min <= max {
            self.min = min;
            self.max = max;
        } else {
            self.min = max;
            self.max = min;
        }
        self
    }

    /// Restricts the parameter to a list of named values.
    ///
    /// The default must be one of the listed values.
    #[must_use]
    pub fn enumeration<S: Into<String>>(mut self, values: impl IntoIterator<Item = (S, T)>) -> Self {
        self.enumeration = Some(
            values
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        );
        self
    }

    /// Sets the display subtype.
    #[must_use]
    pub fn subtype(mut self, subtype: Subtype) -> Self {
        self.subtype = subtype;
        self
    }

    /// Sets a callback run after every successful write.
    #[must_use]
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Builds the parameter. A non-enumerated default is clamped into range.
    ///
    /// Panics in debug builds when an enumerated default is not listed.
    #[must_use]
    pub fn build(self) -> Parameter<T> {
        let value = if let Some(values) = &self.enumeration {
            debug_assert!(
                values.iter().any(|(_, v)| *v == self.default),
                "default of '{}' is not one of its enumerated values",
                self.title
            );
            self.default
        } else {
            clamp_components(self.default, self.min, self.max)
        };
        Parameter {
            title: self.title,
            value,
            min: self.min,
            max: self.max,
            enumeration: self.enumeration,
            subtype: self.subtype,
            on_change: self.on_change,
        }
    }
}
