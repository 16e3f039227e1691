// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type identity without runtime introspection.

use crate::descriptor::{PrimitiveKind, Value};
use std::any::Any;
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Stable, manually assigned identity of a registered type.
///
/// The key text doubles as the default root tag when a value of the type is
/// serialized at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    /// Create a key from a static name (usable in `const` context).
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a key from an owned or borrowed name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// A Rust type that participates in a [`Registry`](crate::Registry).
///
/// Implementors pick their key by hand. Composite types keep the default
/// `to_value`, which hands the instance to the serializer as an erased record;
/// their fields are declared through
/// [`DescriptorBuilder`](crate::DescriptorBuilder), never discovered.
///
/// ```
/// use tagtree::{Describe, TypeKey};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Describe for Point {
///     const KEY: TypeKey = TypeKey::from_static("Point");
/// }
/// ```
pub trait Describe: Any + Sized {
    /// Registry key of this type.
    const KEY: TypeKey;

    /// View this instance as a serializer value.
    fn to_value(&self) -> Value<'_> {
        Value::Record(self)
    }
}

/// A type from the closed primitive set.
///
/// Only primitives may be produced by value from an extractor (see
/// [`DescriptorBuilder::computed_field`](crate::DescriptorBuilder::computed_field)),
/// since their values do not borrow from the owning instance.
pub trait Primitive: Describe {
    /// Primitive kind this type registers as.
    const KIND: PrimitiveKind;

    /// Convert into an owned value.
    fn into_value(self) -> Value<'static>;
}

macro_rules! impl_primitive {
    ($ty:ty, $kind:ident, $variant:ident, $wide:ty) => {
        impl Describe for $ty {
            const KEY: TypeKey = TypeKey::from_static(PrimitiveKind::$kind.name());

            fn to_value(&self) -> Value<'_> {
                Value::$variant(<$wide>::from(*self))
            }
        }

        impl Primitive for $ty {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;

            fn into_value(self) -> Value<'static> {
                Value::$variant(<$wide>::from(self))
            }
        }
    };
}

impl_primitive!(bool, Bool, Bool, bool);
impl_primitive!(i8, Int8, Int, i64);
impl_primitive!(i16, Int16, Int, i64);
impl_primitive!(i32, Int32, Int, i64);
impl_primitive!(i64, Int64, Int, i64);
impl_primitive!(u8, UInt8, UInt, u64);
impl_primitive!(u16, UInt16, UInt, u64);
impl_primitive!(u32, UInt32, UInt, u64);
impl_primitive!(u64, UInt64, UInt, u64);

impl Describe for String {
    const KEY: TypeKey = TypeKey::from_static(PrimitiveKind::Text.name());

    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self))
    }
}

impl Primitive for String {
    const KIND: PrimitiveKind = PrimitiveKind::Text;

    fn into_value(self) -> Value<'static> {
        Value::Text(Cow::Owned(self))
    }
}

impl Describe for &'static str {
    const KEY: TypeKey = TypeKey::from_static(PrimitiveKind::Text.name());

    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(*self))
    }
}

impl Primitive for &'static str {
    const KIND: PrimitiveKind = PrimitiveKind::Text;

    fn into_value(self) -> Value<'static> {
        Value::Text(Cow::Borrowed(self))
    }
}
