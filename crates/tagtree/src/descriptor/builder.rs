// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for typed descriptors.

use crate::descriptor::{
    extractor, Describe, Descriptor, EntryId, Extractor, Field, FieldListBuilder, Primitive,
    Registry, Value,
};
use crate::error::{Error, Result};
use std::any::Any;
use std::marker::PhantomData;

/// Builder accumulating the fields of composite type `T`.
///
/// Each field's value type is resolved against the registry when the field is
/// declared, so every referenced type must already be registered. The
/// descriptor is registered under `T::KEY` by [`finish`](Self::finish).
#[derive(Debug)]
pub struct DescriptorBuilder<'r, T> {
    registry: &'r mut Registry,
    fields: FieldListBuilder,
    _owner: PhantomData<fn(&T)>,
}

impl<'r, T: Describe> DescriptorBuilder<'r, T> {
    pub(crate) fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            fields: Descriptor::builder(),
            _owner: PhantomData,
        }
    }

    /// Add a field read by reference.
    pub fn field<U, F>(self, name: impl Into<String>, get: F) -> Result<Self>
    where
        U: Describe,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        let extract = extractor(move |instance| Ok(get(narrow::<T>(instance)?).to_value()));
        self.push::<U>(name.into(), extract)
    }

    /// Add a field that may be absent. An absent value fails serialization
    /// with [`Error::NullValue`].
    pub fn optional_field<U, F>(self, name: impl Into<String>, get: F) -> Result<Self>
    where
        U: Describe,
        F: Fn(&T) -> Option<&U> + Send + Sync + 'static,
    {
        let extract = extractor(move |instance| {
            Ok(get(narrow::<T>(instance)?).map_or(Value::Null, Describe::to_value))
        });
        self.push::<U>(name.into(), extract)
    }

    /// Add a primitive field computed from the instance.
    pub fn computed_field<U, F>(self, name: impl Into<String>, compute: F) -> Result<Self>
    where
        U: Primitive,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let extract = extractor(move |instance| Ok(compute(narrow::<T>(instance)?).into_value()));
        self.push::<U>(name.into(), extract)
    }

    /// Register the finished descriptor under `T::KEY`.
    pub fn finish(self) -> Result<EntryId> {
        self.registry.register(T::KEY, self.fields.build())
    }

    fn push<U: Describe>(mut self, name: String, extract: Extractor) -> Result<Self> {
        let value_type = self.registry.id_of(&U::KEY)?;
        self.fields.push(Field::new(name, value_type, extract)?);
        Ok(self)
    }
}

/// Narrow an erased instance back to the extractor's owning type.
fn narrow<T: Describe>(instance: &dyn Any) -> Result<&T> {
    instance
        .downcast_ref::<T>()
        .ok_or_else(|| Error::mismatch(T::KEY.as_str(), "instance of another type"))
}
