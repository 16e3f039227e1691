// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-erased values flowing through the serializer.

use crate::descriptor::Describe;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// A value handed from an extractor to the serializer.
#[derive(Clone)]
pub enum Value<'a> {
    // Primitives
    Text(Cow<'a, str>),
    Int(i64),
    UInt(u64),
    Bool(bool),

    /// Composite instance, narrowed back by its field extractors.
    Record(&'a dyn Any),

    /// Absent value.
    Null,
}

impl<'a> Value<'a> {
    /// Wrap a registered instance.
    pub fn of<T: Describe>(instance: &'a T) -> Self {
        instance.to_value()
    }

    /// Text value.
    pub fn text(s: impl Into<Cow<'a, str>>) -> Self {
        Self::Text(s.into())
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if value is a primitive.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Text(_) | Self::Int(_) | Self::UInt(_) | Self::Bool(_)
        )
    }

    /// Try to get as record handle.
    pub fn as_record(&self) -> Option<&'a dyn Any> {
        match self {
            Self::Record(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Bool(_) => "bool",
            Self::Record(_) => "record",
            Self::Null => "null",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
            Self::Null => f.write_str("Null"),
        }
    }
}

impl From<i64> for Value<'_> {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value<'_> {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}
