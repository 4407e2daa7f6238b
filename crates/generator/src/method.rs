//! Method Emitter
//!
//! Turns one flattened [`MethodRecord`] into an `async` method body on the
//! generated client class: builds the request URL from the path template,
//! serializes path/query parameters and the request body, issues the
//! request, and deserializes the response.

use crate::codec::{convert_expr, is_conversion_required, is_conversion_required_for_ref, Direction, Flags};
use crate::typeprinter::{print_type, property_access};
use crate::writer::Writer;
use discoverygen_common::Result;
use discoverygen_parser::discovery::{DiscoveryDocument, MethodRecord};
use std::collections::HashMap;

/// Emit one method. `doc` must already have any synthetic `*Options`
/// schema this record needs registered (see `module::augment_with_options`).
pub fn emit_method(w: &mut Writer, doc: &DiscoveryDocument, record: &MethodRecord, flags: &mut Flags) -> Result<()> {
    emit_doc_comment(w, record);

    let mut params = Vec::new();
    for (name, schema) in &record.path_params {
        params.push(format!("{}: {}", name, print_type(doc, schema)?));
    }
    if let Some(req) = &record.request {
        params.push(format!("req: {}", req));
    }
    let options_type = format!("{}Options", record.pascal_case_name);
    if !record.query_params.is_empty() {
        params.push(format!("opts: {} = {{}}", options_type));
    }

    let return_type = match &record.response {
        Some(r) => format!("Promise<{}>", r),
        None => "Promise<void>".to_string(),
    };

    w.line(&format!("async {}({}): {} {{", record.camel_case_name, params.join(", "), return_type));
    w.indent();

    // Path params are always interpolated into the URL as strings, but
    // their declared parameter type is the schema's own runtime type (e.g.
    // `bigint` for int64) — reassigning the parameter itself to its
    // serialized form would violate its declared type. Converted params
    // get a separate string-typed local instead, and the path template
    // substitutes that local in their place.
    let mut path_renames: HashMap<String, String> = HashMap::new();
    for (name, schema) in &record.path_params {
        if is_conversion_required(doc, schema)? {
            let local = format!("{}Param", name);
            let expr = convert_expr(doc, schema, name, Direction::Serialize, flags)?;
            w.line(&format!("const {} = {};", local, expr));
            path_renames.insert(name.clone(), local);
        }
    }

    let url_path = substitute_path_template(&record.path, &path_renames);
    w.line(&format!("const url = new URL(`${{this.#baseUrl}}{}`);", url_path));

    for (name, schema) in &record.query_params {
        let access_expr = property_access("opts", name);
        w.line(&format!("if ({} !== undefined) {{", access_expr));
        w.indent();
        if schema.repeated {
            w.line(&format!("for (const value of {}) {{", access_expr));
            w.indent();
            let value_expr = if is_conversion_required(doc, schema)? {
                convert_expr(doc, schema, "value", Direction::Serialize, flags)?
            } else {
                "value".to_string()
            };
            w.line(&format!("url.searchParams.append({:?}, String({}));", name, value_expr));
            w.dedent();
            w.line("}");
        } else {
            let value_expr = if is_conversion_required(doc, schema)? {
                convert_expr(doc, schema, &access_expr, Direction::Serialize, flags)?
            } else {
                access_expr.clone()
            };
            w.line(&format!("url.searchParams.append({:?}, String({}));", name, value_expr));
        }
        w.dedent();
        w.line("}");
    }

    let mut has_body = false;
    if let Some(req_name) = &record.request {
        has_body = true;
        if is_conversion_required_for_ref(doc, req_name)? {
            w.line(&format!("const body = JSON.stringify(serialize{}(req));", req_name));
        } else {
            w.line("const body = JSON.stringify(req);");
        }
    }

    let call_opts = if has_body {
        format!("{{ client: this.#client, method: {:?}, body }}", record.http_method)
    } else {
        format!("{{ client: this.#client, method: {:?} }}", record.http_method)
    };

    match &record.response {
        Some(resp_name) => {
            w.line(&format!("const data = await request(url.href, {});", call_opts));
            if is_conversion_required_for_ref(doc, resp_name)? {
                w.line(&format!("return deserialize{}(data);", resp_name));
            } else {
                w.line(&format!("return data as {};", resp_name));
            }
        }
        None => {
            w.line(&format!("await request(url.href, {});", call_opts));
        }
    }

    w.dedent();
    w.line("}");
    Ok(())
}

/// Rewrite `{name}` and `{+name}` path template tokens into template
/// literal interpolations (`${name}`). The `+` reserved-expansion marker
/// only affects how a real client would encode the substituted value
/// (allowing `/` through unescaped); it carries no distinction for the
/// generated parameter type or name. `renames` substitutes a different
/// identifier for a token's name — used when the path parameter's
/// converted form is held in a separate local rather than the parameter
/// itself.
fn substitute_path_template(path: &str, renames: &HashMap<String, String>) -> String {
    let mut result = String::new();
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '{' {
            result.push(c);
            continue;
        }
        let mut token = String::new();
        for c2 in chars.by_ref() {
            if c2 == '}' {
                break;
            }
            token.push(c2);
        }
        let name = token.strip_prefix('+').unwrap_or(&token);
        let resolved = renames.get(name).map(String::as_str).unwrap_or(name);
        result.push_str("${");
        result.push_str(resolved);
        result.push('}');
    }
    result
}

fn emit_doc_comment(w: &mut Writer, record: &MethodRecord) {
    let width = 80usize.saturating_sub(3).saturating_sub(w.depth() * 2).max(20);

    let mut lines = Vec::new();
    if let Some(desc) = &record.description {
        lines.extend(wrap_text(desc, width));
    }
    for (name, schema) in record.path_params.iter().chain(record.query_params.iter()) {
        if let Some(desc) = &schema.description {
            lines.push(format!("@param {} {}", name, desc));
        }
    }
    if lines.is_empty() {
        return;
    }

    w.line("/**");
    for line in lines {
        w.line(&format!(" * {}", line.replace("*/", "*\\/")));
    }
    w.line(" */");
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_plus_and_plain_path_tokens() {
        let renames = HashMap::new();
        assert_eq!(substitute_path_template("b/{bucket}/o/{+object}", &renames), "b/${bucket}/o/${object}");
        assert_eq!(substitute_path_template("things", &renames), "things");
    }

    #[test]
    fn renames_converted_path_tokens() {
        let mut renames = HashMap::new();
        renames.insert("jobId".to_string(), "jobIdParam".to_string());
        assert_eq!(substitute_path_template("jobs/{jobId}", &renames), "jobs/${jobIdParam}");
    }

    #[test]
    fn wraps_long_descriptions() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_text(text, 15);
        assert!(lines.iter().all(|l| l.len() <= 15));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn dotted_query_parameter_name_is_emitted_bracketed() {
        use discoverygen_parser::discovery::Schema;

        let doc = DiscoveryDocument {
            id: "x".into(),
            name: "x".into(),
            version: "v1".into(),
            title: "X".into(),
            description: None,
            documentation_link: None,
            root_url: "https://x/".into(),
            service_path: None,
            resources: HashMap::new(),
            schemas: HashMap::new(),
        };
        let record = MethodRecord {
            http_method: "GET".into(),
            path: "things".into(),
            request: None,
            response: None,
            camel_case_name: "thingsList".into(),
            pascal_case_name: "ThingsList".into(),
            path_params: Vec::new(),
            query_params: vec![("weird.name".to_string(), Schema { schema_type: Some("string".into()), ..Default::default() })],
            description: None,
        };
        let mut flags = Flags::default();
        let mut w = Writer::new();
        emit_method(&mut w, &doc, &record, &mut flags).unwrap();
        let out = w.into_string();
        assert!(out.contains("if (opts[\"weird.name\"] !== undefined) {"));
        assert!(!out.contains("opts.\"weird.name\""));
    }

    #[test]
    fn converted_path_param_keeps_its_declared_type() {
        use discoverygen_parser::discovery::Schema;

        let doc = DiscoveryDocument {
            id: "x".into(),
            name: "x".into(),
            version: "v1".into(),
            title: "X".into(),
            description: None,
            documentation_link: None,
            root_url: "https://x/".into(),
            service_path: None,
            resources: HashMap::new(),
            schemas: HashMap::new(),
        };
        let record = MethodRecord {
            http_method: "GET".into(),
            path: "jobs/{jobId}".into(),
            request: None,
            response: None,
            camel_case_name: "jobsGet".into(),
            pascal_case_name: "JobsGet".into(),
            path_params: vec![(
                "jobId".to_string(),
                Schema { schema_type: Some("string".into()), format: Some("int64".into()), required: true, ..Default::default() },
            )],
            query_params: Vec::new(),
            description: None,
        };
        let mut flags = Flags::default();
        let mut w = Writer::new();
        emit_method(&mut w, &doc, &record, &mut flags).unwrap();
        let out = w.into_string();
        assert!(out.contains("async jobsGet(jobId: bigint): Promise<void> {"));
        assert!(out.contains("const jobIdParam = String(jobId);"));
        assert!(out.contains("const url = new URL(`${this.#baseUrl}jobs/${jobIdParam}`);"));
        assert!(!out.contains("jobId = String(jobId)"));
    }
}
