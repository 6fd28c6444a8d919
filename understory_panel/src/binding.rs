// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a control reads and writes.
//!
//! A control is bound either to a parameter in the [`ParamStore`] (by ID,
//! shared with any other control bound to it) or to a field of an
//! application object through a pair of accessor functions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::warn;
use understory_parameter::{ParamError, ParamId, ParamStore, ParamValue, Subtype, ValueKind};

/// Default range of accessor-bound numeric fields.
pub const FIELD_RANGE: (f64, f64) = (0.0, 100.0);

/// Erased access to an application field.
///
/// Implemented by [`Field`]; hosts rarely need to implement it themselves.
pub trait FieldAccess {
    /// Value category.
    fn kind(&self) -> ValueKind;
    /// Number of components.
    fn components(&self) -> usize;
    /// Reads numeric component `sub`.
    fn component(&self, sub: usize) -> Option<f64>;
    /// Writes consecutive numeric components starting at `first`, clamped.
    /// Returns `false` if any component does not exist.
    fn set_components(&mut self, first: usize, values: &[f64]) -> bool;
    /// Reads a boolean field.
    fn flag(&self) -> Option<bool>;
    /// Writes a boolean field. Returns `false` for non-boolean fields.
    fn set_flag(&mut self, flag: bool) -> bool;
    /// Clamping range.
    fn range(&self) -> (f64, f64);
}

/// A field of a shared application object, read and written through
/// accessor functions.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use understory_panel::{Field, FieldAccess};
///
/// struct Camera {
///     fov: f64,
/// }
///
/// let camera = Rc::new(RefCell::new(Camera { fov: 45.0 }));
/// let mut field = Field::new(camera.clone(), |c: &Camera| c.fov, |c, v| c.fov = v);
/// assert_eq!(FieldAccess::range(&field), (0.0, 100.0));
/// field.set_components(0, &[250.0]);
/// assert_eq!(camera.borrow().fov, 100.0);
/// ```
pub struct Field<O, T> {
    object: Rc<RefCell<O>>,
    get: fn(&O) -> T,
    set: fn(&mut O, T),
    min: f64,
    max: f64,
}

impl<O, T> Field<O, T> {
    /// Binds `get`/`set` on `object`, with the range `0..=100`.
    pub fn new(object: Rc<RefCell<O>>, get: fn(&O) -> T, set: fn(&mut O, T)) -> Self {
        Self {
            object,
            get,
            set,
            min: FIELD_RANGE.0,
            max: FIELD_RANGE.1,
        }
    }

    /// Replaces the clamping range. Bounds in the wrong order are swapped.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min.min(max);
        self.max = max.max(min);
        self
    }
}

impl<O, T> fmt::Debug for Field<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("object", &std::any::type_name::<O>())
            .field("value", &std::any::type_name::<T>())
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

impl<O: 'static, T: ParamValue> FieldAccess for Field<O, T> {
    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn components(&self) -> usize {
        (self.get)(&self.object.borrow()).components()
    }

    fn component(&self, sub: usize) -> Option<f64> {
        (self.get)(&self.object.borrow()).component(sub)
    }

    fn set_components(&mut self, first: usize, values: &[f64]) -> bool {
        let mut value = (self.get)(&self.object.borrow());
        for (offset, &v) in values.iter().enumerate() {
            let v = if v.is_nan() { self.min } else { v.clamp(self.min, self.max) };
            if !value.set_component(first + offset, v) {
                return false;
            }
        }
        (self.set)(&mut self.object.borrow_mut(), value);
        true
    }

    fn flag(&self) -> Option<bool> {
        (self.get)(&self.object.borrow()).flag()
    }

    fn set_flag(&mut self, flag: bool) -> bool {
        let mut value = (self.get)(&self.object.borrow());
        if !value.set_flag(flag) {
            return false;
        }
        (self.set)(&mut self.object.borrow_mut(), value);
        true
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// A control's source of truth.
pub enum Binding {
    /// A parameter in the panel's store.
    Param(ParamId),
    /// An application field.
    Field(Box<dyn FieldAccess>),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Param(id) => f.debug_tuple("Param").field(id).finish(),
            Self::Field(_) => f.write_str("Field(..)"),
        }
    }
}

/// Logs a write the binding could not perform. Bindings are validated when
/// the control is built, so this only fires on misuse.
fn report(result: Result<(), ParamError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("control write failed: {err}");
            false
        }
    }
}

impl Binding {
    /// The bound parameter, if any.
    #[must_use]
    pub fn param(&self) -> Option<ParamId> {
        match self {
            Self::Param(id) => Some(*id),
            Self::Field(_) => None,
        }
    }

    /// Value category.
    pub fn kind(&self, params: &ParamStore) -> Result<ValueKind, ParamError> {
        match self {
            Self::Param(id) => params.kind(*id),
            Self::Field(field) => Ok(field.kind()),
        }
    }

    /// Number of components, 1 if unknown.
    #[must_use]
    pub fn components(&self, params: &ParamStore) -> usize {
        match self {
            Self::Param(id) => params.components(*id).unwrap_or(1),
            Self::Field(field) => field.components(),
        }
    }

    /// Reads numeric component `sub`.
    #[must_use]
    pub fn component(&self, params: &ParamStore, sub: usize) -> Option<f64> {
        match self {
            Self::Param(id) => params.component(*id, sub).ok(),
            Self::Field(field) => field.component(sub),
        }
    }

    /// Writes numeric component `sub`.
    pub fn set_component(&mut self, params: &mut ParamStore, sub: usize, value: f64) -> bool {
        self.set_components(params, sub, &[value])
    }

    /// Writes consecutive components as one write.
    pub fn set_components(&mut self, params: &mut ParamStore, first: usize, values: &[f64]) -> bool {
        match self {
            Self::Param(id) => report(params.set_components(*id, first, values)),
            Self::Field(field) => field.set_components(first, values),
        }
    }

    /// Reads a boolean value.
    #[must_use]
    pub fn flag(&self, params: &ParamStore) -> Option<bool> {
        match self {
            Self::Param(id) => params.flag(*id).ok(),
            Self::Field(field) => field.flag(),
        }
    }

    /// Writes a boolean value.
    pub fn set_flag(&mut self, params: &mut ParamStore, flag: bool) -> bool {
        match self {
            Self::Param(id) => report(params.set_flag(*id, flag)),
            Self::Field(field) => field.set_flag(flag),
        }
    }

    /// Clamping range.
    #[must_use]
    pub fn range(&self, params: &ParamStore) -> (f64, f64) {
        match self {
            Self::Param(id) => params.range(*id).unwrap_or((0.0, 1.0)),
            Self::Field(field) => field.range(),
        }
    }

    /// Display subtype; accessor fields are always plain numbers.
    #[must_use]
    pub fn subtype(&self, params: &ParamStore) -> Subtype {
        match self {
            Self::Param(id) => params.subtype(*id).unwrap_or_default(),
            Self::Field(_) => Subtype::None,
        }
    }

    /// Enumeration labels, for enumerated parameters.
    #[must_use]
    pub fn enum_labels(&self, params: &ParamStore) -> Option<Vec<String>> {
        match self {
            Self::Param(id) => params.enum_labels(*id).ok().flatten(),
            Self::Field(_) => None,
        }
    }

    /// Index of the current enumeration entry.
    #[must_use]
    pub fn enum_index(&self, params: &ParamStore) -> Option<usize> {
        match self {
            Self::Param(id) => params.enum_index(*id).ok().flatten(),
            Self::Field(_) => None,
        }
    }

    /// Writes enumeration entry `index`.
    pub fn select_enum(&mut self, params: &mut ParamStore, index: usize) -> bool {
        match self {
            Self::Param(id) => report(params.select_enum(*id, index)),
            Self::Field(_) => false,
        }
    }
}
