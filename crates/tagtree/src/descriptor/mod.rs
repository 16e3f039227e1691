// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptors and the registry that owns them.
//!
//! Describes, per type, which named fields it has, how to read each one from
//! an instance, and which registry entry describes the field's own type.
//! Nothing here inspects types at runtime: fields are declared by hand.
//!
//! # Features
//!
//! - **TypeKey / Describe**: manually assigned type identity
//! - **Registry**: append-only key -> descriptor-or-primitive table
//! - **DescriptorBuilder**: fluent, eagerly resolved field declarations
//! - **Value**: type-erased values handed to the serializer
//!
//! # Example
//!
//! ```rust
//! use tagtree::{Describe, Registry, TypeKey};
//!
//! struct Reading {
//!     sensor: String,
//!     celsius: i32,
//! }
//!
//! impl Describe for Reading {
//!     const KEY: TypeKey = TypeKey::from_static("Reading");
//! }
//!
//! let mut registry = Registry::with_primitives();
//! registry
//!     .describe::<Reading>()
//!     .field("Sensor", |r: &Reading| &r.sensor)?
//!     .field("Celsius", |r: &Reading| &r.celsius)?
//!     .finish()?;
//!
//! let desc = registry.lookup(&Reading::KEY)?.descriptor().unwrap();
//! assert_eq!(desc.fields()[0].name(), "Sensor");
//! # Ok::<(), tagtree::Error>(())
//! ```

mod builder;
mod key;
mod registry;
mod type_descriptor;
mod value;

pub use builder::DescriptorBuilder;
pub use key::{Describe, Primitive, TypeKey};
pub use registry::Registry;
pub use type_descriptor::{
    extractor, validate_tag, Descriptor, Entry, EntryId, Extractor, Field, FieldListBuilder,
    PrimitiveKind,
};
pub use value::Value;
