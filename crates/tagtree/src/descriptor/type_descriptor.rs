// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptors for composite types.

use crate::descriptor::Value;
use crate::error::{Error, Result};
use std::any::Any;
use std::fmt;

/// Primitive type kinds.
///
/// The set is closed: adding a kind means adding a rendering case in the
/// serializer, not changing the descriptor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Text,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl PrimitiveKind {
    /// Every kind, in registration order for [`Registry::with_primitives`](crate::Registry::with_primitives).
    pub const ALL: [PrimitiveKind; 10] = [
        Self::Text,
        Self::Bool,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
    ];

    /// Canonical key name of the kind.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
        }
    }

    /// Check whether a primitive value may sit at a position of this kind.
    ///
    /// Integers must fit the kind's width.
    pub fn accepts(&self, value: &Value<'_>) -> bool {
        match (self, value) {
            (Self::Text, Value::Text(_)) | (Self::Bool, Value::Bool(_)) => true,
            (Self::Int8, Value::Int(v)) => i8::try_from(*v).is_ok(),
            (Self::Int16, Value::Int(v)) => i16::try_from(*v).is_ok(),
            (Self::Int32, Value::Int(v)) => i32::try_from(*v).is_ok(),
            (Self::Int64, Value::Int(_)) => true,
            (Self::UInt8, Value::UInt(v)) => u8::try_from(*v).is_ok(),
            (Self::UInt16, Value::UInt(v)) => u16::try_from(*v).is_ok(),
            (Self::UInt32, Value::UInt(v)) => u32::try_from(*v).is_ok(),
            (Self::UInt64, Value::UInt(_)) => true,
            _ => false,
        }
    }
}

/// Dense index of an entry inside one [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// Registration position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What the registry knows about one type.
#[derive(Debug)]
pub enum Entry {
    /// Rendered directly as text.
    Primitive(PrimitiveKind),
    /// Walked field by field.
    Composite(Descriptor),
}

impl Entry {
    /// Check if this is a primitive entry.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Get the descriptor if this is a composite.
    pub fn descriptor(&self) -> Option<&Descriptor> {
        match self {
            Self::Composite(desc) => Some(desc),
            Self::Primitive(_) => None,
        }
    }
}

/// Erased extraction function: owning instance in, field value out.
pub type Extractor = Box<dyn for<'a> Fn(&'a dyn Any) -> Result<Value<'a>> + Send + Sync>;

/// Wrap a closure as an [`Extractor`].
///
/// Routing the closure through this bound lets its signature be inferred as
/// higher-ranked over the instance lifetime.
pub fn extractor<F>(f: F) -> Extractor
where
    F: for<'a> Fn(&'a dyn Any) -> Result<Value<'a>> + Send + Sync + 'static,
{
    Box::new(f)
}

/// One member of a [`Descriptor`].
pub struct Field {
    name: String,
    extract: Extractor,
    value_type: EntryId,
}

impl Field {
    /// Create a field. `name` is validated as a tag.
    pub fn new(name: impl Into<String>, value_type: EntryId, extract: Extractor) -> Result<Self> {
        let name = name.into();
        validate_tag(&name)?;
        Ok(Self {
            name,
            extract,
            value_type,
        })
    }

    /// Output tag of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry entry of the field's declared type.
    pub fn value_type(&self) -> EntryId {
        self.value_type
    }

    /// Read this field from an owning instance.
    pub fn extract<'a>(&self, instance: &'a dyn Any) -> Result<Value<'a>> {
        (self.extract)(instance)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

/// Ordered field list of one composite type. Immutable once built.
#[derive(Debug, Default)]
pub struct Descriptor {
    fields: Vec<Field>,
}

impl Descriptor {
    /// Start an untyped descriptor.
    pub fn builder() -> FieldListBuilder {
        FieldListBuilder::default()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// First field with the given tag.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` for a composite with no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Accumulates fields whose value types were already resolved to [`EntryId`]s.
///
/// Used when registering by [`TypeKey`](crate::TypeKey) without a backing
/// Rust type. Typed code goes through [`DescriptorBuilder`](crate::DescriptorBuilder).
#[derive(Debug, Default)]
pub struct FieldListBuilder {
    fields: Vec<Field>,
}

impl FieldListBuilder {
    /// Append a field.
    pub fn field(
        mut self,
        name: impl Into<String>,
        value_type: EntryId,
        extract: Extractor,
    ) -> Result<Self> {
        self.fields.push(Field::new(name, value_type, extract)?);
        Ok(self)
    }

    /// Append an already built field.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Freeze the descriptor.
    pub fn build(self) -> Descriptor {
        Descriptor {
            fields: self.fields,
        }
    }
}

/// Reject tag names that would break the output syntax.
pub fn validate_tag(tag: &str) -> Result<()> {
    let broken = tag.is_empty()
        || tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '&'));
    if broken {
        return Err(Error::InvalidTag(tag.to_string()));
    }
    Ok(())
}
