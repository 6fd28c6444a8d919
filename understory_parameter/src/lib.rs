// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Parameter: typed, observable value cells for control panels.
//!
//! A parameter is a value with the metadata an editor needs: a numeric
//! range, an optional list of named values, a display subtype and a title.
//! Parameters live in a [`ParamStore`] arena and are addressed by
//! [`Param<T>`] handles, so one parameter can be shared by any number of
//! controls, for example a class-wide setting shown in every instance's
//! panel.
//!
//! ## Core Concepts
//!
//! - [`Parameter`] / [`ParameterBuilder`]: the value cell and its metadata.
//! - [`ParamValue`]: what a value exposes to generic editors (numeric
//!   components, a flag).
//! - [`ParamStore`]: owns parameters, validates and clamps writes, runs
//!   change callbacks and records dirty parameters.
//! - [`DirtyParams`]: the set of parameters written since the last frame.
//!
//! ## Write rules
//!
//! - Numeric components are clamped into `min..=max`; out-of-range input is
//!   never an error.
//! - Enumerated parameters only accept listed values
//!   ([`ParamError::InvalidEnumValue`] otherwise).
//! - Every successful write runs the change callback exactly once and marks
//!   the parameter dirty. Reading never does either.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_parameter::{ParamStore, Parameter};
//!
//! let writes = Rc::new(Cell::new(0));
//! let counter = writes.clone();
//!
//! let mut store = ParamStore::new();
//! let size = store.register(
//!     Parameter::builder(2.0_f64)
//!         .title("Point size")
//!         .range(1.0, 8.0)
//!         .on_change(move |_| counter.set(counter.get() + 1))
//!         .build(),
//! );
//!
//! store.set(size, 12.0).unwrap();
//! assert_eq!(store.get(size), Some(&8.0));
//! assert_eq!(writes.get(), 1);
//! assert_eq!(store.drain_dirty(), vec![size.id()]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dirty;
mod error;
mod id;
mod parameter;
mod store;
mod value;

pub use dirty::DirtyParams;
pub use error::ParamError;
pub use id::{Param, ParamId};
pub use parameter::{ChangeCallback, Parameter, ParameterBuilder, Subtype};
pub use store::ParamStore;
pub use value::{Color3, Histogram, HistogramChannel, ParamValue, ValueKind};
