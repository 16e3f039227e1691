// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tree serializer.
//!
//! Walks a value depth-first using only registry descriptors and writes one
//! element per line:
//!
//! ```text
//! <Point>
//! <x>3</x>
//! <y>-5</y>
//! </Point>
//! ```
//!
//! Composites always get separate open and close lines, even with no fields.
//! There are no attributes, no self-closing tags and no indentation.
//!
//! A failed call stops immediately. Whatever was already written to the sink
//! stays there.

mod render;

pub use render::render_primitive;

use crate::config::SerializerConfig;
use crate::descriptor::{validate_tag, Describe, Entry, EntryId, Registry, TypeKey, Value};
use crate::error::{Error, Result};
use std::fmt::{self, Write};
use std::io;

/// Serializer bound to a populated registry.
#[derive(Debug, Clone)]
pub struct TreeSerializer<'r> {
    registry: &'r Registry,
    config: SerializerConfig,
}

impl<'r> TreeSerializer<'r> {
    /// Create a serializer with the default configuration.
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_config(registry, SerializerConfig::default())
    }

    /// Create a serializer with an explicit configuration.
    pub fn with_config(registry: &'r Registry, config: SerializerConfig) -> Self {
        Self { registry, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Serialize `root`, declared as `root_key`, under `root_tag`.
    pub fn serialize<W: Write>(
        &self,
        out: &mut W,
        root_tag: &str,
        root_key: &TypeKey,
        root: Value<'_>,
    ) -> Result<()> {
        validate_tag(root_tag)?;
        let id = self.registry.id_of(root_key)?;
        log::trace!("[serializer] root <{}> as {}", root_tag, root_key);
        let mut scratch = String::new();
        self.node(out, &mut scratch, root_tag, id, root, 1)
    }

    /// Serialize a typed instance under its own key name.
    pub fn serialize_root<T: Describe, W: Write>(&self, out: &mut W, value: &T) -> Result<()> {
        self.serialize(out, T::KEY.as_str(), &T::KEY, value.to_value())
    }

    /// Serialize a typed instance into a new string.
    pub fn to_string<T: Describe>(&self, value: &T) -> Result<String> {
        let mut out = String::new();
        self.serialize_root(&mut out, value)?;
        Ok(out)
    }

    /// Serialize a typed instance to a byte sink under `root_tag`.
    pub fn serialize_io<T: Describe, W: io::Write + ?Sized>(
        &self,
        out: &mut W,
        root_tag: &str,
        value: &T,
    ) -> Result<()> {
        let mut adapter = IoAdapter {
            inner: out,
            error: None,
        };
        match self.serialize(&mut adapter, root_tag, &T::KEY, value.to_value()) {
            Err(Error::Write(e)) => Err(adapter.error.take().map_or(Error::Write(e), Error::Io)),
            other => other,
        }
    }

    fn node<W: Write>(
        &self,
        out: &mut W,
        scratch: &mut String,
        tag: &str,
        id: EntryId,
        value: Value<'_>,
        depth: usize,
    ) -> Result<()> {
        let limit = self.config.max_depth;
        if limit != 0 && depth > limit {
            return Err(Error::DepthExceeded { limit });
        }
        let eol = self.config.line_ending.as_str();

        match self.resolve(id)? {
            Entry::Primitive(kind) => {
                scratch.clear();
                render_primitive(scratch, tag, *kind, &value, self.config.text_escape)?;
                log::trace!("[serializer] leaf <{}> depth {}", tag, depth);
                write!(out, "<{}>{}</{}>{}", tag, scratch, tag, eol)?;
            }
            Entry::Composite(desc) => {
                let instance = match value {
                    Value::Record(instance) => instance,
                    Value::Null => {
                        return Err(Error::NullValue {
                            tag: tag.to_string(),
                        })
                    }
                    other => return Err(Error::mismatch(self.key_name(id), other.kind_name())),
                };

                log::trace!("[serializer] open <{}> depth {}", tag, depth);
                write!(out, "<{}>{}", tag, eol)?;
                for field in desc.fields() {
                    let field_value = field.extract(instance)?;
                    self.node(
                        out,
                        scratch,
                        field.name(),
                        field.value_type(),
                        field_value,
                        depth + 1,
                    )?;
                }
                write!(out, "</{}>{}", tag, eol)?;
            }
        }
        Ok(())
    }

    fn resolve(&self, id: EntryId) -> Result<&'r Entry> {
        self.registry
            .entry(id)
            .ok_or_else(|| Error::UnknownType(TypeKey::new(format!("#{}", id.index()))))
    }

    fn key_name(&self, id: EntryId) -> String {
        self.registry
            .key_of(id)
            .map_or_else(|| format!("#{}", id.index()), |k| k.to_string())
    }
}

/// Serialize with the default configuration.
pub fn serialize<W: Write>(
    out: &mut W,
    registry: &Registry,
    root_tag: &str,
    root_key: &TypeKey,
    root: Value<'_>,
) -> Result<()> {
    TreeSerializer::new(registry).serialize(out, root_tag, root_key, root)
}

/// Bridges a byte sink to the text sink the serializer writes to, keeping
/// the underlying I/O error.
struct IoAdapter<'a, W: ?Sized> {
    inner: &'a mut W,
    error: Option<io::Error>,
}

impl<W: io::Write + ?Sized> Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LineEnding, TextEscape};
    use crate::descriptor::{extractor, Descriptor, DescriptorBuilder, PrimitiveKind};

    struct Point {
        x: i32,
        y: i32,
    }

    impl Describe for Point {
        const KEY: TypeKey = TypeKey::from_static("Point");
    }

    struct Label {
        text: String,
    }

    impl Describe for Label {
        const KEY: TypeKey = TypeKey::from_static("Label");
    }

    fn registry() -> Registry {
        let mut registry = Registry::with_primitives();
        registry
            .describe::<Point>()
            .field("x", |p: &Point| &p.x)
            .and_then(|b| b.field("y", |p: &Point| &p.y))
            .and_then(DescriptorBuilder::finish)
            .expect("Point");
        registry
            .describe::<Label>()
            .field("Text", |l: &Label| &l.text)
            .and_then(DescriptorBuilder::finish)
            .expect("Label");
        registry
    }

    #[test]
    fn test_point() {
        let registry = registry();
        let out = TreeSerializer::new(&registry)
            .to_string(&Point { x: 3, y: -5 })
            .expect("serialize");
        assert_eq!(out, "<Point>\n<x>3</x>\n<y>-5</y>\n</Point>\n");
    }

    #[test]
    fn test_custom_root_tag() {
        let registry = registry();
        let p = Point { x: 0, y: 0 };
        let mut out = String::new();
        serialize(&mut out, &registry, "Origin", &Point::KEY, Value::of(&p)).expect("serialize");
        assert!(out.starts_with("<Origin>\n"));
        assert!(out.ends_with("</Origin>\n"));
    }

    #[test]
    fn test_crlf_and_markup() {
        let registry = registry();
        let config = SerializerConfig::default()
            .line_ending(LineEnding::CrLf)
            .text_escape(TextEscape::Markup);
        let out = TreeSerializer::with_config(&registry, config)
            .to_string(&Label {
                text: "a<b".into(),
            })
            .expect("serialize");
        assert_eq!(out, "<Label>\r\n<Text>a&lt;b</Text>\r\n</Label>\r\n");
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let registry = registry();
        let out = TreeSerializer::new(&registry)
            .to_string(&Label {
                text: "x & <y>".into(),
            })
            .expect("serialize");
        assert_eq!(out, "<Label>\n<Text>x & <y></Text>\n</Label>\n");
    }

    #[test]
    fn test_unknown_root_type() {
        let registry = registry();
        let mut out = String::new();
        let err = serialize(
            &mut out,
            &registry,
            "Ghost",
            &TypeKey::from_static("Ghost"),
            Value::Null,
        );
        assert!(matches!(err, Err(Error::UnknownType(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_root_tag() {
        let registry = registry();
        let p = Point { x: 1, y: 2 };
        let mut out = String::new();
        let err = serialize(&mut out, &registry, "bad tag", &Point::KEY, Value::of(&p));
        assert!(matches!(err, Err(Error::InvalidTag(_))));
    }

    #[test]
    fn test_wrong_root_instance() {
        let registry = registry();
        let label = Label { text: "l".into() };
        let mut out = String::new();
        let err = serialize(&mut out, &registry, "Point", &Point::KEY, Value::of(&label));
        assert!(matches!(err, Err(Error::TypeMismatch { .. })));
        // The open tag was already written when the first extractor failed.
        assert_eq!(out, "<Point>\n");
    }

    #[test]
    fn test_null_and_primitive_at_composite_position() {
        let registry = registry();
        let mut out = String::new();
        let err = serialize(&mut out, &registry, "Point", &Point::KEY, Value::Null);
        assert!(matches!(err, Err(Error::NullValue { tag }) if tag == "Point"));

        let err = serialize(&mut out, &registry, "Point", &Point::KEY, Value::Int(1));
        assert!(matches!(err, Err(Error::TypeMismatch { expected, got }) if expected == "Point" && got == "int"));
    }

    #[test]
    fn test_unknown_primitive() {
        // A type registered as primitive whose values are records has no
        // rendering rule.
        struct Opaque;
        impl Describe for Opaque {
            const KEY: TypeKey = TypeKey::from_static("opaque");
        }
        struct Holder {
            inner: Opaque,
        }
        impl Describe for Holder {
            const KEY: TypeKey = TypeKey::from_static("Holder");
        }

        let mut registry = Registry::with_primitives();
        registry
            .register_primitive(Opaque::KEY, PrimitiveKind::Text)
            .expect("opaque");
        registry
            .describe::<Holder>()
            .field("Inner", |h: &Holder| &h.inner)
            .and_then(DescriptorBuilder::finish)
            .expect("Holder");

        let err = TreeSerializer::new(&registry).to_string(&Holder { inner: Opaque });
        assert!(matches!(err, Err(Error::UnknownPrimitive { tag, kind: "record" }) if tag == "Inner"));
    }

    #[test]
    fn test_depth_limit() {
        struct Outer {
            p: Point,
        }
        impl Describe for Outer {
            const KEY: TypeKey = TypeKey::from_static("Outer");
        }

        let mut registry = registry();
        registry
            .describe::<Outer>()
            .field("P", |o: &Outer| &o.p)
            .and_then(DescriptorBuilder::finish)
            .expect("Outer");
        let outer = Outer {
            p: Point { x: 1, y: 1 },
        };

        // Outer(1) > P(2) > x(3)
        let ok = TreeSerializer::with_config(&registry, SerializerConfig::default().max_depth(3))
            .to_string(&outer);
        assert!(ok.is_ok());

        let err = TreeSerializer::with_config(&registry, SerializerConfig::default().max_depth(2))
            .to_string(&outer);
        assert!(matches!(err, Err(Error::DepthExceeded { limit: 2 })));

        let unlimited = TreeSerializer::with_config(&registry, SerializerConfig::default().max_depth(0))
            .to_string(&outer);
        assert!(unlimited.is_ok());
    }

    #[test]
    fn test_value_wider_than_kind() {
        struct Level(i32);
        impl Describe for Level {
            const KEY: TypeKey = TypeKey::from_static("level");

            fn to_value(&self) -> Value<'_> {
                Value::Int(i64::from(self.0))
            }
        }
        struct Gauge {
            level: Level,
        }
        impl Describe for Gauge {
            const KEY: TypeKey = TypeKey::from_static("Gauge");
        }

        let mut registry = Registry::with_primitives();
        registry
            .register_primitive(Level::KEY, PrimitiveKind::Int8)
            .expect("level");
        registry
            .describe::<Gauge>()
            .field("Level", |g: &Gauge| &g.level)
            .and_then(DescriptorBuilder::finish)
            .expect("Gauge");

        let serializer = TreeSerializer::new(&registry);
        let ok = serializer.to_string(&Gauge { level: Level(-12) });
        assert_eq!(ok.expect("in range"), "<Gauge>\n<Level>-12</Level>\n</Gauge>\n");

        let mut out = String::new();
        let err = serializer.serialize_root(&mut out, &Gauge { level: Level(1000) });
        assert!(matches!(err, Err(Error::TypeMismatch { expected, .. }) if expected == "int8"));
        assert_eq!(out, "<Gauge>\n");
    }

    #[test]
    fn test_deep_chain_has_no_default_limit() {
        // T0 > int32, T(i) > T(i-1)
        let mut registry = Registry::with_primitives();
        let mut prev = registry.id_of(&i32::KEY).expect("int32");
        for i in 0..70 {
            let extract = if i == 0 {
                extractor(|_| Ok(Value::Int(7)))
            } else {
                extractor(|any| Ok(Value::Record(any)))
            };
            let desc = Descriptor::builder()
                .field("v", prev, extract)
                .expect("field")
                .build();
            prev = registry.register(format!("T{i}"), desc).expect("register");
        }

        let unit = ();
        let key = TypeKey::from_static("T69");
        let mut out = String::new();
        TreeSerializer::new(&registry)
            .serialize(&mut out, "T69", &key, Value::Record(&unit))
            .expect("serialize");
        assert_eq!(out.lines().count(), 70 + 1 + 70);
        assert!(out.contains("<v>7</v>\n"));
        assert!(out.ends_with("</v>\n</T69>\n"));

        let mut out = String::new();
        let err = TreeSerializer::with_config(&registry, SerializerConfig::default().max_depth(64))
            .serialize(&mut out, "T69", &key, Value::Record(&unit));
        assert!(matches!(err, Err(Error::DepthExceeded { limit: 64 })));
    }

    #[test]
    fn test_kind_mismatch_from_untyped_extractor() {
        let mut registry = Registry::with_primitives();
        let int32 = registry.id_of(&i32::KEY).expect("int32");
        let desc = Descriptor::builder()
            .field("n", int32, extractor(|_| Ok(Value::from("seven"))))
            .expect("field")
            .build();
        registry.register("Loose", desc).expect("Loose");

        let mut out = String::new();
        let unit = ();
        let err = serialize(
            &mut out,
            &registry,
            "Loose",
            &TypeKey::from_static("Loose"),
            Value::Record(&unit),
        );
        assert!(matches!(err, Err(Error::TypeMismatch { expected, .. }) if expected == "int32"));
        assert_eq!(out, "<Loose>\n");
    }

    #[test]
    fn test_serialize_io() {
        let registry = registry();
        let mut bytes = Vec::new();
        TreeSerializer::new(&registry)
            .serialize_io(&mut bytes, "P", &Point { x: 10, y: 20 })
            .expect("serialize");
        assert_eq!(bytes, b"<P>\n<x>10</x>\n<y>20</y>\n</P>\n");
    }

    #[test]
    fn test_serialize_io_surfaces_io_error() {
        struct Broken;
        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let registry = registry();
        let err = TreeSerializer::new(&registry).serialize_io(
            &mut Broken,
            "Point",
            &Point { x: 1, y: 1 },
        );
        assert!(matches!(err, Err(Error::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
