//! Codec Emitter
//!
//! Emits `serializeX`/`deserializeX` function pairs for named schemas that
//! [`is_conversion_required`] says need one. Each function builds its
//! result as a spread of the input with overrides only for the fields that
//! actually need converting — so `JSON.stringify`/`JSON.parse` still do
//! the bulk of the work and the generated code stays readable next to a
//! hand-written one.

use crate::typeprinter::{classify, property_access, TypeKind};
use crate::writer::Writer;
use discoverygen_common::Result;
use discoverygen_parser::discovery::{DiscoveryDocument, Schema};
use std::collections::HashMap;

pub use crate::conversion::{is_conversion_required, is_conversion_required_for_ref};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Serialize,
    Deserialize,
}

/// Tracks which base64 helpers the emitted codecs actually use, so the
/// module assembler only prints the prelude functions that are needed.
#[derive(Debug, Default)]
pub struct Flags {
    pub needs_base64_encoder: bool,
    pub needs_base64_decoder: bool,
}

/// Emit `export function serializeX(...)`/`export function deserializeX(...)`
/// for `schema` under `name`. Caller is expected to have already confirmed
/// `is_conversion_required(doc, schema)`; this function doesn't check.
pub fn emit_codec(w: &mut Writer, doc: &DiscoveryDocument, name: &str, schema: &Schema, flags: &mut Flags) -> Result<()> {
    let ser_body = codec_body(doc, schema, "data", Direction::Serialize, flags)?;
    let deser_body = codec_body(doc, schema, "data", Direction::Deserialize, flags)?;

    w.line(&format!("export function serialize{name}(data: {name}): unknown {{"));
    w.indent();
    w.line(&format!("return {};", ser_body));
    w.dedent();
    w.line("}");
    w.blank();
    w.line(&format!("export function deserialize{name}(data: unknown): {name} {{"));
    w.indent();
    w.line(&format!("return {} as {name};", deser_body));
    w.dedent();
    w.line("}");
    Ok(())
}

/// The top-level expression for a named schema's codec body. Object schemas
/// get the spread-and-override treatment; everything else (array, map,
/// $ref, leaf format) reuses the same recursive conversion used for
/// properties and parameters.
fn codec_body(doc: &DiscoveryDocument, schema: &Schema, expr: &str, dir: Direction, flags: &mut Flags) -> Result<String> {
    match classify(schema)? {
        TypeKind::ObjectProperties(props) => object_codec_expr(doc, props, expr, dir, flags),
        _ => convert_expr(doc, schema, expr, dir, flags),
    }
}

/// The recursive runtime<->wire conversion expression for one value,
/// given its schema. Used for object properties, array elements, map
/// values, and (via `codec_body`) whole named schemas that aren't objects.
pub fn convert_expr(doc: &DiscoveryDocument, schema: &Schema, expr: &str, dir: Direction, flags: &mut Flags) -> Result<String> {
    match classify(schema)? {
        TypeKind::Byte => {
            match dir {
                Direction::Serialize => {
                    flags.needs_base64_encoder = true;
                    Ok(format!("encodeBase64({})", expr))
                }
                Direction::Deserialize => {
                    flags.needs_base64_decoder = true;
                    Ok(format!("decodeBase64({})", expr))
                }
            }
        }
        TypeKind::BigInt => Ok(match dir {
            Direction::Serialize => format!("String({})", expr),
            Direction::Deserialize => format!("BigInt({})", expr),
        }),
        TypeKind::DateTime => Ok(match dir {
            Direction::Serialize => format!("({}).toISOString()", expr),
            Direction::Deserialize => format!("new Date({})", expr),
        }),
        TypeKind::Duration | TypeKind::FieldMask => Ok(expr.to_string()),
        TypeKind::Array(items) => {
            if !is_conversion_required(doc, items)? {
                return Ok(expr.to_string());
            }
            let inner = convert_expr(doc, items, "x", dir, flags)?;
            Ok(format!("{}.map((x: any) => ({}))", expr, inner))
        }
        TypeKind::ObjectMap(value) => {
            if !is_conversion_required(doc, value)? {
                return Ok(expr.to_string());
            }
            let inner = convert_expr(doc, value, "v", dir, flags)?;
            Ok(format!(
                "Object.fromEntries(Object.entries({}).map(([k, v]: [string, any]) => [k, {}]))",
                expr, inner
            ))
        }
        TypeKind::Ref(name) => {
            if !is_conversion_required_for_ref(doc, name)? {
                return Ok(expr.to_string());
            }
            let fname = match dir {
                Direction::Serialize => format!("serialize{}", name),
                Direction::Deserialize => format!("deserialize{}", name),
            };
            Ok(format!("{}({})", fname, expr))
        }
        TypeKind::ObjectProperties(props) => object_codec_expr(doc, props, expr, dir, flags),
        TypeKind::Any | TypeKind::Boolean | TypeKind::Number | TypeKind::PlainString | TypeKind::Enum(_) | TypeKind::ObjectOpaque => {
            Ok(expr.to_string())
        }
    }
}

fn object_codec_expr(
    doc: &DiscoveryDocument,
    props: &HashMap<String, Schema>,
    expr: &str,
    dir: Direction,
    flags: &mut Flags,
) -> Result<String> {
    let mut names: Vec<&String> = props.keys().collect();
    names.sort();

    let mut overrides = Vec::new();
    for name in names {
        let prop = &props[name];
        // readOnly properties are never written back to the wire.
        if dir == Direction::Serialize && prop.read_only {
            continue;
        }
        if !is_conversion_required(doc, prop)? {
            continue;
        }
        let access = property_access(expr, name);
        let converted = convert_expr(doc, prop, &access, dir, flags)?;
        let key = crate::typeprinter::format_key(name);
        let line = if prop.required {
            format!("{}: {}", key, converted)
        } else {
            format!("{}: {} !== undefined ? {} : undefined", key, access, converted)
        };
        overrides.push(line);
    }

    if overrides.is_empty() {
        Ok(expr.to_string())
    } else {
        Ok(format!("{{ ...{}, {} }}", expr, overrides.join(", ")))
    }
}
