// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parameter handles.
//!
//! [`ParamId`] is the untyped key controls and dirty sets work with, and
//! [`Param<T>`] is the typed handle application code keeps around.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// An untyped parameter identifier.
///
/// Identifiers are handed out by [`ParamStore::register`](crate::ParamStore::register)
/// in registration order and are never reused by the store that issued them.
///
/// # Example
///
/// ```rust
/// use understory_parameter::ParamId;
///
/// let id = ParamId::new(7);
/// assert_eq!(id.index(), 7);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamId(u32);

impl ParamId {
    /// Creates a parameter ID from a raw index.
    #[must_use]
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this ID.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParamId").field(&self.0).finish()
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParamId({})", self.0)
    }
}

/// A typed handle to a parameter living in a [`ParamStore`](crate::ParamStore).
///
/// The phantom type ties the handle to the value type it was registered
/// with, so `store.set(handle, value)` is checked at compile time. Handles
/// are `Copy` and can be shared freely between every consumer of a
/// parameter, which is how one class-wide setting ends up bound to many
/// controls.
///
/// ```rust
/// use understory_parameter::{Param, Parameter, ParamStore};
///
/// let mut store = ParamStore::new();
/// let size: Param<f64> = store.register(Parameter::builder(1.0_f64).range(0.0, 4.0).build());
/// let shared = size;
/// store.set(shared, 2.5).unwrap();
/// assert_eq!(store.get(size), Some(&2.5));
/// ```
pub struct Param<T> {
    id: ParamId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Param<T> {
    /// Wraps a raw ID in a typed handle.
    ///
    /// Normally produced by [`ParamStore::register`](crate::ParamStore::register).
    /// A handle whose `T` does not match the registered type makes every
    /// typed access fail with [`ParamError::TypeMismatch`](crate::ParamError::TypeMismatch).
    #[must_use]
    #[inline]
    pub const fn from_id(id: ParamId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the untyped ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> ParamId {
        self.id
    }
}

impl<T> Copy for Param<T> {}

impl<T> Clone for Param<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Param<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Param<T> {}

impl<T> Hash for Param<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> From<Param<T>> for ParamId {
    #[inline]
    fn from(param: Param<T>) -> Self {
        param.id
    }
}

impl<T> fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}
