// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::control::ControlId;
use crate::layout::LayoutId;

/// Error returned when building or editing a panel.
///
/// Everything here is detected when a control or layout is created or
/// addressed, never while events are being dispatched.
#[derive(Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The control could not be bound: the parameter handle is stale, or the
    /// requested control kind cannot show the value.
    InvalidBinding {
        /// Title of the control being built.
        title: String,
        /// What was wrong.
        reason: String,
    },
    /// No live layout has this ID.
    UnknownLayout(LayoutId),
    /// No live control has this ID.
    UnknownControl(ControlId),
}

impl BuildError {
    pub(crate) fn binding(title: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBinding {
            title: title.to_owned(),
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBinding { title, reason } => f
                .debug_struct("InvalidBinding")
                .field("title", title)
                .field("reason", reason)
                .finish(),
            Self::UnknownLayout(id) => f.debug_tuple("UnknownLayout").field(id).finish(),
            Self::UnknownControl(id) => f.debug_tuple("UnknownControl").field(id).finish(),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBinding { title, reason } => {
                write!(f, "cannot bind control '{title}': {reason}")
            }
            Self::UnknownLayout(id) => write!(f, "no layout with id {id:?}"),
            Self::UnknownControl(id) => write!(f, "no control with id {id:?}"),
        }
    }
}

impl core::error::Error for BuildError {}
