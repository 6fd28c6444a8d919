// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parameter arena.
//!
//! [`ParamStore`] owns every parameter of a panel. Application code talks to
//! it through typed [`Param<T>`] handles; controls talk to it through raw
//! [`ParamId`]s and the type-erased accessors, which expose a value as
//! numeric components, a flag or an enumeration index. Every successful
//! write marks the parameter in the store's [`DirtyParams`].

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;

use crate::dirty::DirtyParams;
use crate::error::ParamError;
use crate::id::{Param, ParamId};
use crate::parameter::{Parameter, Rejection, Subtype};
use crate::value::{ParamValue, ValueKind};

/// Object-safe view of a [`Parameter<T>`].
trait ErasedParam {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn kind(&self) -> ValueKind;
    fn title(&self) -> &str;
    fn range(&self) -> (f64, f64);
    fn subtype(&self) -> Subtype;
    fn components(&self) -> usize;
    fn component(&self, sub: usize) -> Result<f64, Rejection>;
    fn set_components(&mut self, first: usize, values: &[f64]) -> Result<(), Rejection>;
    fn flag(&self) -> Option<bool>;
    fn set_flag(&mut self, flag: bool) -> Result<(), Rejection>;
    fn enum_labels(&self) -> Option<Vec<String>>;
    fn enum_index(&self) -> Option<usize>;
    fn select_enum(&mut self, index: usize) -> Result<(), Rejection>;
    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T: ParamValue> ErasedParam for Parameter<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn title(&self) -> &str {
        Self::title(self)
    }

    fn range(&self) -> (f64, f64) {
        Self::range(self)
    }

    fn subtype(&self) -> Subtype {
        Self::subtype(self)
    }

    fn components(&self) -> usize {
        Self::components(self)
    }

    fn component(&self, sub: usize) -> Result<f64, Rejection> {
        Self::component(self, sub)
    }

    fn set_components(&mut self, first: usize, values: &[f64]) -> Result<(), Rejection> {
        Self::set_components(self, first, values)
    }

    fn flag(&self) -> Option<bool> {
        self.get().flag()
    }

    fn set_flag(&mut self, flag: bool) -> Result<(), Rejection> {
        Self::set_flag(self, flag)
    }

    fn enum_labels(&self) -> Option<Vec<String>> {
        self.enumeration()
            .map(|list| list.iter().map(|(label, _)| label.clone()).collect())
    }

    fn enum_index(&self) -> Option<usize> {
        Self::enum_index(self)
    }

    fn select_enum(&mut self, index: usize) -> Result<(), Rejection> {
        Self::select_enum(self, index)
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Debug for dyn ErasedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug(f)
    }
}

/// Arena of parameters with dirty tracking.
///
/// # Example
///
/// ```rust
/// use understory_parameter::{ParamStore, Parameter, ValueKind};
///
/// let mut store = ParamStore::new();
/// let size = store.register(Parameter::builder(1.0_f64).range(0.0, 10.0).build());
/// let mode = store.register(
///     Parameter::builder(1_i32).enumeration([("Play", 1), ("Pause", 0)]).build(),
/// );
///
/// // Typed access from application code.
/// store.set(size, 20.0).unwrap();
/// assert_eq!(store.get(size), Some(&10.0));
///
/// // Erased access, as used by controls.
/// assert_eq!(store.kind(mode.id()).unwrap(), ValueKind::Numeric);
/// store.select_enum(mode.id(), 1).unwrap();
/// assert_eq!(store.get(mode), Some(&0));
///
/// let dirty = store.drain_dirty();
/// assert_eq!(dirty, vec![size.id(), mode.id()]);
/// ```
#[derive(Debug, Default)]
pub struct ParamStore {
    params: Vec<Box<dyn ErasedParam>>,
    dirty: DirtyParams,
}

impl ParamStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a parameter and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` parameters are registered.
    pub fn register<T: ParamValue>(&mut self, param: Parameter<T>) -> Param<T> {
        assert!(
            self.params.len() < u32::MAX as usize,
            "Too many parameters registered (max {})",
            u32::MAX
        );
        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = ParamId::new(self.params.len() as u32);
        self.params.push(Box::new(param));
        Param::from_id(id)
    }

    /// Returns the number of registered parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns `true` if `id` names a parameter of this store.
    #[must_use]
    pub fn contains(&self, id: ParamId) -> bool {
        (id.index() as usize) < self.params.len()
    }

    fn slot(&self, id: ParamId) -> Result<&dyn ErasedParam, ParamError> {
        self.params
            .get(id.index() as usize)
            .map(Box::as_ref)
            .ok_or(ParamError::UnknownParameter(id))
    }

    fn slot_mut(&mut self, id: ParamId) -> Result<&mut dyn ErasedParam, ParamError> {
        match self.params.get_mut(id.index() as usize) {
            Some(param) => Ok(param.as_mut()),
            None => Err(ParamError::UnknownParameter(id)),
        }
    }

    fn typed<T: ParamValue>(&self, id: ParamId) -> Result<&Parameter<T>, ParamError> {
        self.slot(id)?
            .as_any()
            .downcast_ref::<Parameter<T>>()
            .ok_or(ParamError::TypeMismatch {
                id,
                expected: type_name::<T>(),
            })
    }

    fn typed_mut<T: ParamValue>(&mut self, id: ParamId) -> Result<&mut Parameter<T>, ParamError> {
        self.slot_mut(id)?
            .as_any_mut()
            .downcast_mut::<Parameter<T>>()
            .ok_or(ParamError::TypeMismatch {
                id,
                expected: type_name::<T>(),
            })
    }

    /// Turns a refused write into an error and marks accepted writes dirty.
    fn finish_write(&mut self, id: ParamId, result: Result<(), Rejection>) -> Result<(), ParamError> {
        result.map_err(|r| Self::reject(id, r))?;
        self.dirty.mark(id);
        Ok(())
    }

    fn reject(id: ParamId, rejection: Rejection) -> ParamError {
        match rejection {
            Rejection::Index { sub, len } => ParamError::IndexOutOfRange { id, sub, len },
            Rejection::InvalidEnum => ParamError::InvalidEnumValue(id),
            Rejection::NotNumeric => ParamError::NotNumeric(id),
        }
    }

    // --- typed access ---

    /// Returns the value behind a typed handle.
    ///
    /// `None` if the handle belongs to another store or has the wrong type.
    #[must_use]
    pub fn get<T: ParamValue>(&self, param: Param<T>) -> Option<&T> {
        self.typed::<T>(param.id()).ok().map(Parameter::get)
    }

    /// Returns the parameter behind a typed handle, with its metadata.
    pub fn parameter<T: ParamValue>(&self, param: Param<T>) -> Result<&Parameter<T>, ParamError> {
        self.typed(param.id())
    }

    /// Returns the value of `id` as `T`.
    pub fn value_by_id<T: ParamValue>(&self, id: ParamId) -> Result<&T, ParamError> {
        self.typed::<T>(id).map(Parameter::get)
    }

    /// Writes a whole value: validated, clamped, then `on_change` runs once.
    pub fn set<T: ParamValue>(&mut self, param: Param<T>, value: T) -> Result<(), ParamError> {
        let id = param.id();
        let result = self.typed_mut::<T>(id)?.set(value);
        self.finish_write(id, result)
    }

    // --- erased access ---

    /// Returns the value category of a parameter.
    pub fn kind(&self, id: ParamId) -> Result<ValueKind, ParamError> {
        Ok(self.slot(id)?.kind())
    }

    /// Returns the parameter's title.
    pub fn title(&self, id: ParamId) -> Result<&str, ParamError> {
        Ok(self.slot(id)?.title())
    }

    /// Returns the parameter's `(min, max)`.
    pub fn range(&self, id: ParamId) -> Result<(f64, f64), ParamError> {
        Ok(self.slot(id)?.range())
    }

    /// Returns the parameter's display subtype.
    pub fn subtype(&self, id: ParamId) -> Result<Subtype, ParamError> {
        Ok(self.slot(id)?.subtype())
    }

    /// Returns the number of components of the value.
    pub fn components(&self, id: ParamId) -> Result<usize, ParamError> {
        Ok(self.slot(id)?.components())
    }

    /// Reads numeric component `sub`.
    pub fn component(&self, id: ParamId, sub: usize) -> Result<f64, ParamError> {
        self.slot(id)?
            .component(sub)
            .map_err(|r| Self::reject(id, r))
    }

    /// Writes numeric component `sub`.
    pub fn set_component(&mut self, id: ParamId, sub: usize, value: f64) -> Result<(), ParamError> {
        self.set_components(id, sub, &[value])
    }

    /// Writes consecutive components starting at `first` as a single write.
    pub fn set_components(
        &mut self,
        id: ParamId,
        first: usize,
        values: &[f64],
    ) -> Result<(), ParamError> {
        let result = self.slot_mut(id)?.set_components(first, values);
        self.finish_write(id, result)
    }

    /// Reads a boolean parameter.
    pub fn flag(&self, id: ParamId) -> Result<bool, ParamError> {
        self.slot(id)?.flag().ok_or(ParamError::NotNumeric(id))
    }

    /// Writes a boolean parameter.
    pub fn set_flag(&mut self, id: ParamId, flag: bool) -> Result<(), ParamError> {
        let result = self.slot_mut(id)?.set_flag(flag);
        self.finish_write(id, result)
    }

    /// Returns the enumeration labels, or `None` for non-enumerated parameters.
    pub fn enum_labels(&self, id: ParamId) -> Result<Option<Vec<String>>, ParamError> {
        Ok(self.slot(id)?.enum_labels())
    }

    /// Returns the position of the current value in the enumeration.
    pub fn enum_index(&self, id: ParamId) -> Result<Option<usize>, ParamError> {
        Ok(self.slot(id)?.enum_index())
    }

    /// Writes the enumeration entry at `index`.
    pub fn select_enum(&mut self, id: ParamId, index: usize) -> Result<(), ParamError> {
        let result = self.slot_mut(id)?.select_enum(index);
        self.finish_write(id, result)
    }

    // --- dirty tracking ---

    /// Marks a parameter dirty without writing it, e.g. after its data was
    /// replaced out of band.
    pub fn touch(&mut self, id: ParamId) -> Result<(), ParamError> {
        self.slot(id)?;
        self.dirty.mark(id);
        Ok(())
    }

    /// Returns `true` if the parameter was written since the last drain.
    #[must_use]
    pub fn is_dirty(&self, id: ParamId) -> bool {
        self.dirty.is_dirty(id)
    }

    /// Returns `true` if any parameter was written since the last drain.
    #[must_use]
    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Removes and returns every parameter written since the last drain.
    pub fn drain_dirty(&mut self) -> Vec<ParamId> {
        self.dirty.drain()
    }

    /// Returns the dirty-set generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.dirty.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Color3, Histogram};
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    fn store_with_size() -> (ParamStore, Param<f64>) {
        let mut store = ParamStore::new();
        let size = store.register(Parameter::builder(1.0_f64).range(0.0, 5.0).build());
        (store, size)
    }

    #[test]
    fn register_hands_out_sequential_ids() {
        let mut store = ParamStore::new();
        let a = store.register(Parameter::builder(0.0_f64).build());
        let b = store.register(Parameter::builder(false).build());
        assert_eq!(a.id().index(), 0);
        assert_eq!(b.id().index(), 1);
        assert_eq!(store.len(), 2);
        assert!(store.contains(b.id()));
        assert!(!store.contains(ParamId::new(2)));
    }

    #[test]
    fn clamp_on_set() {
        let (mut store, size) = store_with_size();
        store.set(size, -1.0).unwrap();
        assert_eq!(store.get(size), Some(&0.0));
        store.set(size, 6.0).unwrap();
        assert_eq!(store.get(size), Some(&5.0));
        store.set_component(size.id(), 0, 99.0).unwrap();
        assert_eq!(store.component(size.id(), 0), Ok(5.0));
    }

    #[test]
    fn wrong_type_is_reported() {
        let (store, size) = store_with_size();
        let wrong: Param<bool> = Param::from_id(size.id());
        assert_eq!(store.get(wrong), None);
        assert!(matches!(
            store.value_by_id::<bool>(size.id()),
            Err(ParamError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn unknown_id_is_reported() {
        let store = ParamStore::new();
        assert_eq!(
            store.kind(ParamId::new(4)),
            Err(ParamError::UnknownParameter(ParamId::new(4)))
        );
    }

    #[test]
    fn writes_mark_dirty_once_per_frame() {
        let (mut store, size) = store_with_size();
        assert!(!store.has_dirty());
        store.set(size, 2.0).unwrap();
        store.set(size, 3.0).unwrap();
        assert!(store.is_dirty(size.id()));
        assert_eq!(store.drain_dirty(), vec![size.id()]);
        assert!(!store.has_dirty());
    }

    #[test]
    fn failed_writes_do_not_mark_dirty() {
        let mut store = ParamStore::new();
        let mode = store.register(
            Parameter::builder(1_i32)
                .enumeration([("Play", 1), ("Pause", 0)])
                .build(),
        );
        assert_eq!(
            store.set(mode, 7),
            Err(ParamError::InvalidEnumValue(mode.id()))
        );
        assert!(!store.has_dirty());
    }

    #[test]
    fn component_index_errors() {
        let mut store = ParamStore::new();
        let v = store.register(Parameter::builder([0.0_f64; 3]).build());
        assert_eq!(
            store.component(v.id(), 3),
            Err(ParamError::IndexOutOfRange {
                id: v.id(),
                sub: 3,
                len: 3
            })
        );
        assert_eq!(store.components(v.id()), Ok(3));
    }

    #[test]
    fn flags_through_erased_api() {
        let mut store = ParamStore::new();
        let show = store.register(Parameter::builder(false).build());
        let size = store.register(Parameter::builder(0.5_f64).build());
        store.set_flag(show.id(), true).unwrap();
        assert_eq!(store.flag(show.id()), Ok(true));
        assert_eq!(
            store.set_flag(size.id(), true),
            Err(ParamError::NotNumeric(size.id()))
        );
    }

    #[test]
    fn enum_selection_by_index() {
        let mut store = ParamStore::new();
        let mode = store.register(
            Parameter::builder(1_i32)
                .enumeration([("Play", 1), ("Pause", 0)])
                .build(),
        );
        let labels = store.enum_labels(mode.id()).unwrap().unwrap();
        assert_eq!(labels, ["Play", "Pause"]);
        assert_eq!(store.enum_index(mode.id()), Ok(Some(0)));
        store.select_enum(mode.id(), 0).unwrap();
        assert_eq!(store.get(mode), Some(&1));
        assert!(store.select_enum(mode.id(), 2).is_err());
    }

    #[test]
    fn color_write_is_a_single_change() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut store = ParamStore::new();
        let color = store.register(
            Parameter::builder(Color3::default())
                .on_change(move |_| seen.set(seen.get() + 1))
                .build(),
        );
        store
            .set_components(color.id(), 0, &[1.0, 0.5, 2.0])
            .unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(store.get(color), Some(&Color3::new(1.0, 0.5, 1.0)));
    }

    #[test]
    fn metadata_is_visible_through_ids() {
        let mut store = ParamStore::new();
        let hist = store.register(
            Parameter::builder(Histogram::new())
                .title("Density")
                .build(),
        );
        assert_eq!(store.title(hist.id()), Ok("Density"));
        assert_eq!(store.kind(hist.id()), Ok(ValueKind::Histogram));
        assert_eq!(store.range(hist.id()), Ok((0.0, 1.0)));
        assert_eq!(store.subtype(hist.id()), Ok(Subtype::None));
    }

    #[test]
    fn touch_marks_without_writing() {
        let (mut store, size) = store_with_size();
        store.touch(size.id()).unwrap();
        assert!(store.is_dirty(size.id()));
        assert!(store.touch(ParamId::new(10)).is_err());
    }
}
