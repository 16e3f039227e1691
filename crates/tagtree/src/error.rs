// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy shared by registration and serialization.
//!
//! Every variant is fatal to the call that produced it. Nothing is retried
//! internally, and text already written to an output sink stays written.

use crate::descriptor::TypeKey;
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors raised while populating a [`Registry`](crate::Registry) or
/// serializing through it.
#[derive(Debug, Error)]
pub enum Error {
    /// A type key was referenced but never registered.
    #[error("Unknown type: {0}")]
    UnknownType(TypeKey),

    /// The same type key was registered twice.
    #[error("Duplicate registration: {0}")]
    DuplicateRegistration(TypeKey),

    /// A value reached a primitive position but has no primitive rendering.
    #[error("Unknown primitive at <{tag}>: value kind {kind}")]
    UnknownPrimitive { tag: String, kind: &'static str },

    /// A value or instance did not match the type its position declares.
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// A required value was absent.
    #[error("Null value at <{tag}>")]
    NullValue { tag: String },

    /// A tag name that would break the output syntax.
    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    /// Nesting went deeper than the configured limit.
    #[error("Nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },

    /// The text sink refused a write.
    #[error("Write error: {0}")]
    Write(#[from] fmt::Error),

    /// The byte sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
