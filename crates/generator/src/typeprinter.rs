//! Type Printer
//!
//! Classifies a [`Schema`] node into the shape it represents and renders it
//! as a TypeScript type expression. Classification is structural — the
//! format doesn't tag which role a node plays, so [`classify`] infers it
//! from which fields are populated, in the same precedence order the
//! conversion analyzer and codec emitter both rely on: `$ref` first, then
//! `enum`, then `type`.

use discoverygen_common::{GeneratorError, Result};
use discoverygen_parser::discovery::{DiscoveryDocument, Items, Schema};
use std::collections::HashMap;

/// The shape a [`Schema`] node represents, independent of its `repeated`
/// wrapping (which every [`TypeKind`] can carry — see [`print_type`]).
pub enum TypeKind<'a> {
    Any,
    Boolean,
    Number,
    PlainString,
    Byte,
    BigInt,
    DateTime,
    Duration,
    FieldMask,
    Enum(&'a [String]),
    Array(&'a Schema),
    ObjectProperties(&'a HashMap<String, Schema>),
    ObjectMap(&'a Schema),
    ObjectOpaque,
    Ref(&'a str),
}

pub fn classify(schema: &Schema) -> Result<TypeKind<'_>> {
    if let Some(r) = &schema.ref_schema {
        return Ok(TypeKind::Ref(r));
    }
    if !schema.enum_values.is_empty() {
        return Ok(TypeKind::Enum(&schema.enum_values));
    }
    match schema.schema_type.as_deref() {
        None | Some("any") => Ok(TypeKind::Any),
        Some("boolean") => Ok(TypeKind::Boolean),
        Some("integer") | Some("number") => Ok(TypeKind::Number),
        Some("string") => match schema.format.as_deref() {
            None => Ok(TypeKind::PlainString),
            Some("byte") => Ok(TypeKind::Byte),
            Some("int64") | Some("uint64") => Ok(TypeKind::BigInt),
            Some("date") | Some("date-time") | Some("google-datetime") => Ok(TypeKind::DateTime),
            Some("google-duration") => Ok(TypeKind::Duration),
            Some("google-fieldmask") => Ok(TypeKind::FieldMask),
            Some(other) => Err(GeneratorError::Schema(format!("unsupported string format '{}'", other))),
        },
        Some("array") => match &schema.items {
            Some(Items::Single(item)) => Ok(TypeKind::Array(item)),
            Some(Items::Tuple(_)) => {
                Err(GeneratorError::Schema("array-of-tuple schemas (\"items\": [...]) are not supported".into()))
            }
            None => Err(GeneratorError::Schema("array schema is missing 'items'".into())),
        },
        Some("object") => {
            let has_props = !schema.properties.is_empty();
            let has_additional = schema.additional_properties.is_some();
            if has_props && has_additional {
                return Err(GeneratorError::Schema(
                    "schema has both 'properties' and 'additionalProperties' populated".into(),
                ));
            }
            if let Some(ap) = &schema.additional_properties {
                Ok(TypeKind::ObjectMap(ap))
            } else if has_props {
                Ok(TypeKind::ObjectProperties(&schema.properties))
            } else {
                Ok(TypeKind::ObjectOpaque)
            }
        }
        Some(other) => Err(GeneratorError::Schema(format!("unsupported schema type '{}'", other))),
    }
}

/// Render `schema`'s TypeScript type expression, resolving `$ref` names
/// against `doc`'s schema table (to confirm the reference exists — the
/// printed name is always the bare ref name, never inlined).
pub fn print_type(doc: &DiscoveryDocument, schema: &Schema) -> Result<String> {
    let base = match classify(schema)? {
        TypeKind::Any => "any".to_string(),
        TypeKind::Boolean => "boolean".to_string(),
        TypeKind::Number => "number".to_string(),
        TypeKind::PlainString => "string".to_string(),
        TypeKind::Byte => "Uint8Array".to_string(),
        TypeKind::BigInt => "bigint".to_string(),
        TypeKind::DateTime => "Date".to_string(),
        TypeKind::Duration => "number /* Duration */".to_string(),
        TypeKind::FieldMask => "string /* FieldMask */".to_string(),
        TypeKind::Enum(values) => {
            values.iter().map(|v| format!("{:?}", v)).collect::<Vec<_>>().join(" | ")
        }
        TypeKind::Array(items) => format!("{}[]", print_type(doc, items)?),
        TypeKind::ObjectProperties(props) => print_inline_object(doc, props)?,
        TypeKind::ObjectMap(value) => format!("{{ [key: string]: {} }}", print_type(doc, value)?),
        TypeKind::ObjectOpaque => "Record<string, unknown>".to_string(),
        TypeKind::Ref(name) => {
            if doc.resolve_ref(name).is_none() {
                return Err(GeneratorError::Schema(format!("unresolved $ref '{}'", name)));
            }
            name.to_string()
        }
    };
    if schema.repeated {
        Ok(format!("{}[]", base))
    } else {
        Ok(base)
    }
}

fn print_inline_object(doc: &DiscoveryDocument, props: &HashMap<String, Schema>) -> Result<String> {
    let mut names: Vec<&String> = props.keys().collect();
    names.sort();

    let mut fields = Vec::with_capacity(names.len());
    for name in names {
        let prop = &props[name];
        let ty = print_type(doc, prop)?;
        let key = format_key(name);
        let opt = if prop.required { "" } else { "?" };
        fields.push(format!("{}{}: {}", key, opt, ty));
    }
    if fields.is_empty() {
        Ok("Record<string, never>".to_string())
    } else {
        Ok(format!("{{ {} }}", fields.join("; ")))
    }
}

/// A property or parameter name as a TypeScript object key — quoted when it
/// isn't a valid bare identifier (contains a dot, starts with a digit, ...).
pub fn format_key(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        format!("{:?}", name)
    }
}

/// A property access expression for `name` read off `expr` — bracketed when
/// `name` isn't a valid bare identifier, e.g. `data["weird.name"]`.
pub fn property_access(expr: &str, name: &str) -> String {
    if is_valid_identifier(name) {
        format!("{}.{}", expr, name)
    } else {
        format!("{}[{:?}]", expr, name)
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
