// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tagtree - descriptor-driven tagged text serialization
//!
//! Serializes tree-shaped object graphs to line-oriented tagged text without
//! runtime type introspection. Every type declares its fields by hand, once,
//! into a [`Registry`]; the [`TreeSerializer`] then walks instances using
//! nothing but those declarations.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagtree::{Describe, Registry, TreeSerializer, TypeKey};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Describe for Point {
//!     const KEY: TypeKey = TypeKey::from_static("Point");
//! }
//!
//! let mut registry = Registry::with_primitives();
//! registry
//!     .describe::<Point>()
//!     .field("x", |p: &Point| &p.x)?
//!     .field("y", |p: &Point| &p.y)?
//!     .finish()?;
//!
//! let text = TreeSerializer::new(&registry).to_string(&Point { x: 3, y: -5 })?;
//! assert_eq!(text, "<Point>\n<x>3</x>\n<y>-5</y>\n</Point>\n");
//! # Ok::<(), tagtree::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  TreeSerializer   depth-first walk, one element per line      |
//! +---------------------------------------------------------------+
//! |  Registry         TypeKey -> Descriptor | Primitive marker    |
//! +---------------------------------------------------------------+
//! |  Descriptor       ordered (name, extractor, EntryId) fields   |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Lifecycle
//!
//! 1. Build a [`Registry`]: primitives first, then each composite after all
//!    the types its fields use. Field types resolve as they are declared.
//! 2. Share it read-only (`&Registry` or `Arc<Registry>`).
//! 3. Serialize any number of values, from any number of threads.
//!
//! ## Modules Overview
//!
//! - [`descriptor`] - type keys, descriptors, builder, registry, values
//! - [`serializer`] - tree walk and primitive rendering
//! - [`config`] - serializer configuration

pub mod config;
pub mod descriptor;
mod error;
pub mod serializer;

pub use config::{LineEnding, SerializerConfig, TextEscape, DEFAULT_MAX_DEPTH};
pub use descriptor::{
    Describe, Descriptor, DescriptorBuilder, Entry, EntryId, Field, Primitive, PrimitiveKind,
    Registry, TypeKey, Value,
};
pub use error::{Error, Result};
pub use serializer::{serialize, TreeSerializer};
