//! Module Assembler
//!
//! Produces the final output in a fixed order: header comment, imports,
//! the primary client class (constructor + methods, already sorted by
//! `flatten`), then type declarations and codecs interleaved and sorted
//! by schema id, then the base64 prelude if any codec needed one. Fixed
//! order plus sorted iteration everywhere a `HashMap` is involved is what
//! makes two generation runs over the same document byte-identical.

use crate::codec::{self, is_conversion_required, Flags};
use crate::method;
use crate::typeprinter::{classify, format_key, print_type, TypeKind};
use crate::writer::Writer;
use discoverygen_common::Result;
use discoverygen_parser::discovery::{self, DiscoveryDocument, Schema};
use std::collections::HashMap;

const IMPORT_SOURCE: &str = "/_/base@v1/mod.ts";

/// Build the `*Options` schema for every method that takes query
/// parameters and register it in a cloned copy of `doc`, keyed by
/// `{PascalCaseMethodName}Options`. The cloned document is what every
/// later emission pass (types, codecs, method bodies) reads from, so
/// these synthetic schemas get codecs and type declarations exactly like
/// any other named schema.
fn augment_with_options(doc: &DiscoveryDocument, records: &[discovery::MethodRecord]) -> DiscoveryDocument {
    let mut augmented = doc.clone();
    for record in records {
        if record.query_params.is_empty() {
            continue;
        }
        let mut props = HashMap::new();
        for (name, schema) in &record.query_params {
            props.insert(name.clone(), schema.clone());
        }
        let name = format!("{}Options", record.pascal_case_name);
        let schema = Schema { schema_type: Some("object".to_string()), properties: props, ..Default::default() };
        augmented.schemas.insert(name, schema);
    }
    augmented
}

/// Assemble the complete generated module as a single string.
pub fn assemble(doc: &DiscoveryDocument, primary_name: &str, self_url: &str) -> Result<String> {
    let records = discovery::flatten(doc)?;
    let augmented = augment_with_options(doc, &records);

    let mut w = Writer::new();
    let mut flags = Flags::default();

    emit_header(&mut w, &augmented, self_url);
    emit_imports(&mut w);
    w.blank();

    emit_class(&mut w, &augmented, primary_name, &records, &mut flags)?;
    w.blank();

    let mut names: Vec<&String> = augmented.schemas.keys().collect();
    names.sort();
    for name in names {
        let schema = &augmented.schemas[name];
        emit_type_declaration(&mut w, &augmented, name, schema)?;
        if is_conversion_required(&augmented, schema)? {
            w.blank();
            codec::emit_codec(&mut w, &augmented, name, schema, &mut flags)?;
        }
        w.blank();
    }

    if flags.needs_base64_encoder || flags.needs_base64_decoder {
        emit_base64_prelude(&mut w, &flags);
    }

    Ok(w.into_string())
}

fn emit_header(w: &mut Writer, doc: &DiscoveryDocument, self_url: &str) {
    w.line("// Copyright Google LLC");
    w.line(&format!("// {}", doc.title));
    if let Some(desc) = &doc.description {
        for line in desc.lines() {
            w.line(&format!("// {}", line));
        }
    }
    if let Some(link) = &doc.documentation_link {
        w.line(&format!("// Docs: {}", link));
    }
    w.line(&format!("// Generated from: {}", self_url));
}

fn emit_imports(w: &mut Writer) {
    w.line(&format!("import {{ auth, CredentialsClient, GoogleAuth, request }} from {:?};", IMPORT_SOURCE));
    w.line("export { auth, GoogleAuth };");
    w.line("export type { CredentialsClient };");
}

fn emit_class(
    w: &mut Writer,
    doc: &DiscoveryDocument,
    primary_name: &str,
    records: &[discovery::MethodRecord],
    flags: &mut Flags,
) -> Result<()> {
    w.line(&format!("export class {} {{", primary_name));
    w.indent();
    w.line("#client: CredentialsClient | undefined;");
    w.line("#baseUrl: string;");
    w.blank();
    w.line(&format!("constructor(client?: CredentialsClient, baseUrl: string = {:?}) {{", doc.root_url));
    w.indent();
    w.line("this.#client = client;");
    w.line("this.#baseUrl = baseUrl;");
    w.dedent();
    w.line("}");

    for record in records {
        w.blank();
        method::emit_method(w, doc, record, flags)?;
    }

    w.dedent();
    w.line("}");
    Ok(())
}

fn emit_type_declaration(w: &mut Writer, doc: &DiscoveryDocument, name: &str, schema: &Schema) -> Result<()> {
    if let Some(desc) = &schema.description {
        w.line("/**");
        w.line(&format!(" * {}", desc.replace("*/", "*\\/")));
        w.line(" */");
    }

    match classify(schema)? {
        TypeKind::ObjectProperties(props) => {
            w.line(&format!("export interface {} {{", name));
            w.indent();
            let mut names: Vec<&String> = props.keys().collect();
            names.sort();
            for pname in names {
                let prop = &props[pname];
                if let Some(desc) = &prop.description {
                    w.line(&format!("/** {} */", desc.replace("*/", "*\\/")));
                }
                let ty = print_type(doc, prop)?;
                let key = format_key(pname);
                let opt = if prop.required { "" } else { "?" };
                w.line(&format!("{}{}: {};", key, opt, ty));
            }
            w.dedent();
            w.line("}");
        }
        _ => {
            let ty = print_type(doc, schema)?;
            w.line(&format!("export type {} = {};", name, ty));
        }
    }
    Ok(())
}

fn emit_base64_prelude(w: &mut Writer, flags: &Flags) {
    w.line("const BASE64_ALPHABET =");
    w.indent();
    w.line("\"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/\";");
    w.dedent();
    w.blank();

    if flags.needs_base64_encoder {
        w.line("function encodeBase64(data: Uint8Array): string {");
        w.indent();
        w.line("let result = \"\";");
        w.line("for (let i = 0; i < data.length; i += 3) {");
        w.indent();
        w.line("const b0 = data[i];");
        w.line("const b1 = i + 1 < data.length ? data[i + 1] : undefined;");
        w.line("const b2 = i + 2 < data.length ? data[i + 2] : undefined;");
        w.line("result += BASE64_ALPHABET[b0 >> 2];");
        w.line("result += BASE64_ALPHABET[((b0 & 0x03) << 4) | (b1 === undefined ? 0 : b1 >> 4)];");
        w.line("result += b1 === undefined ? \"=\" : BASE64_ALPHABET[((b1 & 0x0f) << 2) | (b2 === undefined ? 0 : b2 >> 6)];");
        w.line("result += b2 === undefined ? \"=\" : BASE64_ALPHABET[b2 & 0x3f];");
        w.dedent();
        w.line("}");
        w.line("return result;");
        w.dedent();
        w.line("}");
        w.blank();
    }

    if flags.needs_base64_decoder {
        w.line("function decodeBase64(data: string): Uint8Array {");
        w.indent();
        w.line("const clean = data.replace(/=+$/, \"\");");
        w.line("const bytes: number[] = [];");
        w.line("let buffer = 0;");
        w.line("let bits = 0;");
        w.line("for (const ch of clean) {");
        w.indent();
        w.line("const value = BASE64_ALPHABET.indexOf(ch);");
        w.line("buffer = (buffer << 6) | value;");
        w.line("bits += 6;");
        w.line("if (bits >= 8) {");
        w.indent();
        w.line("bits -= 8;");
        w.line("bytes.push((buffer >> bits) & 0xff);");
        w.dedent();
        w.line("}");
        w.dedent();
        w.line("}");
        w.line("return new Uint8Array(bytes);");
        w.dedent();
        w.line("}");
    }
}
