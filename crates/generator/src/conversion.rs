//! Conversion Analyzer
//!
//! Decides whether a schema node requires any runtime<->wire conversion at
//! all before the codec emitter bothers generating one. A node requires
//! conversion if it (or something reachable from it) uses a format that
//! TypeScript's `JSON.parse`/`JSON.stringify` can't round-trip losslessly:
//! `bytes`, 64-bit integers, timestamps. `google-duration` and
//! `google-fieldmask` are also classified as conversion-required even
//! though their codec is an identity expression today — so that giving
//! them a richer runtime type later doesn't silently change whether a
//! schema gets a codec at all.
//!
//! `$ref` cycles are broken with a per-top-level-query visited set: each
//! call to [`is_conversion_required`] starts a fresh `HashSet`, so sibling
//! queries never share state. A single query that revisits a schema name
//! (directly recursive or through a longer cycle) stops recursing right
//! there and conservatively reports that revisit as conversion-required —
//! mutually- or self-referencing schemas get codecs emitted for them
//! (resolved at call time, same as any other named codec pair) rather than
//! silently being treated as conversion-free just because the analyzer
//! couldn't fully unroll the cycle.

use crate::typeprinter::{classify, TypeKind};
use discoverygen_common::{GeneratorError, Result};
use discoverygen_parser::discovery::{DiscoveryDocument, Schema};
use std::collections::HashSet;

pub fn is_conversion_required(doc: &DiscoveryDocument, schema: &Schema) -> Result<bool> {
    let mut visited = HashSet::new();
    required(doc, schema, &mut visited)
}

/// Resolve `name` in `doc`'s schema table and check whether it requires
/// conversion. Used for method request/response types, where the caller
/// only has the `$ref` name, not the node itself.
pub fn is_conversion_required_for_ref(doc: &DiscoveryDocument, name: &str) -> Result<bool> {
    let schema = doc
        .resolve_ref(name)
        .ok_or_else(|| GeneratorError::Schema(format!("unresolved $ref '{}'", name)))?;
    is_conversion_required(doc, schema)
}

fn required(doc: &DiscoveryDocument, schema: &Schema, visited: &mut HashSet<String>) -> Result<bool> {
    match classify(schema)? {
        TypeKind::Any
        | TypeKind::Boolean
        | TypeKind::Number
        | TypeKind::PlainString
        | TypeKind::Enum(_)
        | TypeKind::ObjectOpaque => Ok(false),

        // Identity on the wire today, but declared conversion-required so a
        // future richer runtime type for these formats doesn't silently
        // change whether a codec gets emitted.
        TypeKind::Byte | TypeKind::BigInt | TypeKind::DateTime | TypeKind::Duration | TypeKind::FieldMask => Ok(true),

        TypeKind::Array(items) => required(doc, items, visited),
        TypeKind::ObjectMap(value) => required(doc, value, visited),

        TypeKind::ObjectProperties(props) => {
            for prop in props.values() {
                // readOnly properties never force the *parent* to need a
                // codec; they're still converted in the deserializer when
                // one exists for some other reason (see codec.rs), but on
                // their own they don't trigger one.
                if prop.read_only {
                    continue;
                }
                if required(doc, prop, visited)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }

        TypeKind::Ref(name) => {
            if visited.contains(name) {
                return Ok(true);
            }
            visited.insert(name.to_string());
            let target = doc
                .resolve_ref(name)
                .ok_or_else(|| GeneratorError::Schema(format!("unresolved $ref '{}'", name)))?;
            required(doc, target, visited)
        }
    }
}
