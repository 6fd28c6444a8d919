// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by parameter reads and writes.

use core::fmt;

use crate::id::ParamId;

/// Failure of a [`ParamStore`](crate::ParamStore) operation.
///
/// Out-of-range numeric writes are not errors: they are clamped.
#[derive(Clone, PartialEq, Eq)]
pub enum ParamError {
    /// No parameter with this ID was registered in the store.
    UnknownParameter(ParamId),
    /// The parameter exists but holds a different value type than requested.
    TypeMismatch {
        /// The parameter.
        id: ParamId,
        /// Name of the type that was requested.
        expected: &'static str,
    },
    /// Component index past the end of a vector-valued parameter.
    IndexOutOfRange {
        /// The parameter.
        id: ParamId,
        /// Requested component.
        sub: usize,
        /// Number of components the parameter has.
        len: usize,
    },
    /// The value is not one of the parameter's enumerated values.
    InvalidEnumValue(ParamId),
    /// A numeric or flag operation on a value that has no such representation.
    NotNumeric(ParamId),
}

impl fmt::Debug for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParameter(id) => write!(f, "UnknownParameter({id:?})"),
            Self::TypeMismatch { id, expected } => {
                write!(f, "TypeMismatch {{ id: {id:?}, expected: {expected} }}")
            }
            Self::IndexOutOfRange { id, sub, len } => {
                write!(f, "IndexOutOfRange {{ id: {id:?}, sub: {sub}, len: {len} }}")
            }
            Self::InvalidEnumValue(id) => write!(f, "InvalidEnumValue({id:?})"),
            Self::NotNumeric(id) => write!(f, "NotNumeric({id:?})"),
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParameter(id) => write!(f, "no parameter registered as {id}"),
            Self::TypeMismatch { id, expected } => {
                write!(f, "parameter {id} does not hold a value of type {expected}")
            }
            Self::IndexOutOfRange { id, sub, len } => write!(
                f,
                "component {sub} is out of range for parameter {id} with {len} components"
            ),
            Self::InvalidEnumValue(id) => {
                write!(f, "value is not in the enumeration of parameter {id}")
            }
            Self::NotNumeric(id) => write!(f, "parameter {id} has no numeric representation"),
        }
    }
}

impl core::error::Error for ParamError {}
