// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive rendering rules.

use crate::config::TextEscape;
use crate::descriptor::{PrimitiveKind, Value};
use crate::error::{Error, Result};
use std::fmt::{self, Write};

/// Write the canonical text of a primitive value.
///
/// Integers are base-10 with a leading `-` for negatives. Text is written
/// untouched unless `escape` asks for markup entities. No trimming.
pub fn render_primitive<W: Write>(
    out: &mut W,
    tag: &str,
    kind: PrimitiveKind,
    value: &Value<'_>,
    escape: TextEscape,
) -> Result<()> {
    match value {
        Value::Null => {
            return Err(Error::NullValue {
                tag: tag.to_string(),
            })
        }
        Value::Record(_) => {
            return Err(Error::UnknownPrimitive {
                tag: tag.to_string(),
                kind: value.kind_name(),
            })
        }
        _ if !kind.accepts(value) => {
            return Err(Error::mismatch(kind.name(), value.kind_name()));
        }
        _ => {}
    }

    match value {
        Value::Text(s) => write_text(out, s, escape)?,
        Value::Int(v) => write!(out, "{}", v)?,
        Value::UInt(v) => write!(out, "{}", v)?,
        Value::Bool(v) => out.write_str(if *v { "true" } else { "false" })?,
        Value::Record(_) | Value::Null => {}
    }
    Ok(())
}

fn write_text<W: Write>(out: &mut W, text: &str, escape: TextEscape) -> fmt::Result {
    match escape {
        TextEscape::Raw => out.write_str(text),
        TextEscape::Markup => {
            let mut rest = text;
            while let Some(pos) = rest.find(['&', '<', '>']) {
                out.write_str(&rest[..pos])?;
                out.write_str(match rest.as_bytes()[pos] {
                    b'&' => "&amp;",
                    b'<' => "&lt;",
                    _ => "&gt;",
                })?;
                rest = &rest[pos + 1..];
            }
            out.write_str(rest)
        }
    }
}
