// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry mapping type keys to descriptors or primitive markers.
//!
//! The registry is append-only. Population happens once, at startup, in an
//! order where every type is registered before any descriptor that refers to
//! it; the registry does not sort anything itself. After population it is
//! only read, so a shared `&Registry` (or `Arc<Registry>`) is all concurrent
//! serializers need.

use crate::descriptor::{
    Describe, Descriptor, DescriptorBuilder, Entry, EntryId, PrimitiveKind, TypeKey,
};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Type key -> descriptor-or-primitive table.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<(TypeKey, Entry)>,
    index: HashMap<TypeKey, EntryId>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in primitive under its canonical
    /// key (`text`, `bool`, `int8` .. `uint64`).
    #[must_use]
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        for kind in PrimitiveKind::ALL {
            registry.insert(TypeKey::from_static(kind.name()), Entry::Primitive(kind));
        }
        registry
    }

    /// Register a composite type.
    ///
    /// Every field must reference an entry already present in this registry,
    /// which keeps the type graph acyclic. On failure the registry is left
    /// unchanged.
    pub fn register(
        &mut self,
        key: impl Into<TypeKey>,
        descriptor: Descriptor,
    ) -> Result<EntryId> {
        let key = key.into();
        self.ensure_vacant(&key)?;
        if let Some(field) = descriptor
            .fields()
            .iter()
            .find(|f| f.value_type().0 >= self.entries.len())
        {
            log::debug!(
                "[registry] {} field <{}> points past the registry",
                key,
                field.name()
            );
            return Err(Error::UnknownType(TypeKey::new(format!(
                "#{}",
                field.value_type().0
            ))));
        }

        log::debug!(
            "[registry] composite {} ({} fields)",
            key,
            descriptor.len()
        );
        Ok(self.insert(key, Entry::Composite(descriptor)))
    }

    /// Register a primitive type.
    pub fn register_primitive(
        &mut self,
        key: impl Into<TypeKey>,
        kind: PrimitiveKind,
    ) -> Result<EntryId> {
        let key = key.into();
        self.ensure_vacant(&key)?;
        log::debug!("[registry] primitive {} as {}", key, kind.name());
        Ok(self.insert(key, Entry::Primitive(kind)))
    }

    /// Open a typed builder for `T`'s descriptor.
    ///
    /// ```
    /// use tagtree::{Describe, Registry, TypeKey};
    ///
    /// struct Point { x: i32, y: i32 }
    /// impl Describe for Point {
    ///     const KEY: TypeKey = TypeKey::from_static("Point");
    /// }
    ///
    /// let mut registry = Registry::with_primitives();
    /// registry
    ///     .describe::<Point>()
    ///     .field("x", |p: &Point| &p.x)?
    ///     .field("y", |p: &Point| &p.y)?
    ///     .finish()?;
    /// assert!(registry.contains(&Point::KEY));
    /// # Ok::<(), tagtree::Error>(())
    /// ```
    pub fn describe<T: Describe>(&mut self) -> DescriptorBuilder<'_, T> {
        DescriptorBuilder::new(self)
    }

    /// Look up an entry by key.
    pub fn lookup(&self, key: &TypeKey) -> Result<&Entry> {
        self.id_of(key).map(|id| &self.entries[id.0].1)
    }

    /// Resolve a key to its entry id.
    pub fn id_of(&self, key: &TypeKey) -> Result<EntryId> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| Error::UnknownType(key.clone()))
    }

    /// Get an entry by id.
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.0).map(|(_, entry)| entry)
    }

    /// Get the key an id was registered under.
    pub fn key_of(&self, id: EntryId) -> Option<&TypeKey> {
        self.entries.get(id.0).map(|(key, _)| key)
    }

    /// Check whether a key is registered.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.index.contains_key(key)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &TypeKey, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (key, entry))| (EntryId(i), key, entry))
    }

    fn ensure_vacant(&self, key: &TypeKey) -> Result<()> {
        if self.index.contains_key(key) {
            return Err(Error::DuplicateRegistration(key.clone()));
        }
        Ok(())
    }

    fn insert(&mut self, key: TypeKey, entry: Entry) -> EntryId {
        let id = EntryId(self.entries.len());
        self.index.insert(key.clone(), id);
        self.entries.push((key, entry));
        id
    }
}
