// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sample domain: types, their registration, and fixed instances.

use tagtree::{Describe, Registry, Result, TypeKey};

pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Describe for Point {
    const KEY: TypeKey = TypeKey::from_static("Point");
}

pub struct Wrapper {
    pub inner: Point,
}

impl Describe for Wrapper {
    const KEY: TypeKey = TypeKey::from_static("Wrapper");
}

pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: u32,
}

impl Describe for Address {
    const KEY: TypeKey = TypeKey::from_static("Address");
}

pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub address: Address,
}

impl Describe for Person {
    const KEY: TypeKey = TypeKey::from_static("Person");
}

/// Register the sample types, leaves first.
pub fn build_registry() -> Result<Registry> {
    let mut registry = Registry::with_primitives();

    registry
        .describe::<Point>()
        .field("x", |p: &Point| &p.x)?
        .field("y", |p: &Point| &p.y)?
        .finish()?;

    registry
        .describe::<Wrapper>()
        .field("inner", |w: &Wrapper| &w.inner)?
        .finish()?;

    registry
        .describe::<Address>()
        .field("Street", |a: &Address| &a.street)?
        .field("City", |a: &Address| &a.city)?
        .field("Zip", |a: &Address| &a.zip)?
        .finish()?;

    registry
        .describe::<Person>()
        .field("FirstName", |p: &Person| &p.first_name)?
        .field("LastName", |p: &Person| &p.last_name)?
        .field("Age", |p: &Person| &p.age)?
        .field("Address", |p: &Person| &p.address)?
        .finish()?;

    tracing::debug!(types = registry.len(), "sample registry ready");
    Ok(registry)
}

pub fn point() -> Point {
    Point { x: 3, y: -5 }
}

pub fn wrapper() -> Wrapper {
    Wrapper {
        inner: Point { x: 0, y: 0 },
    }
}

pub fn person() -> Person {
    Person {
        first_name: "John".into(),
        last_name: "Smith".into(),
        age: 42,
        address: Address {
            street: "21 2nd Street".into(),
            city: "New York".into(),
            zip: 10021,
        },
    }
}
