//! Resource Flattener
//!
//! Walks a Discovery document's nested `resources` tree depth-first and
//! produces a flat, sorted list of [`MethodRecord`]s — the shape every
//! later codegen stage consumes instead of the tree itself.

use super::types::{DiscoveryDocument, Method, Resource, Schema};
use discoverygen_common::{capitalize, GeneratorError, Result};
use std::collections::HashMap;

/// One flattened API method: a resource-tree leaf plus its computed
/// identifiers and partitioned, sorted parameter lists.
#[derive(Debug, Clone)]
pub struct MethodRecord {
    pub http_method: String,
    pub path: String,
    pub request: Option<String>,
    pub response: Option<String>,
    pub camel_case_name: String,
    pub pascal_case_name: String,
    pub path_params: Vec<(String, Schema)>,
    pub query_params: Vec<(String, Schema)>,
    pub description: Option<String>,
}

/// Flatten `doc.resources` into a method-record list sorted by
/// `camel_case_name`.
///
/// HashMap iteration order over resources and methods is not
/// deterministic, so the list is explicitly sorted after the full
/// traversal rather than relying on visit order — instability here would
/// make the generator's output non-deterministic, which violates the
/// generator's core determinism invariant.
pub fn flatten(doc: &DiscoveryDocument) -> Result<Vec<MethodRecord>> {
    let mut records = Vec::new();
    walk(&[], &doc.resources, &mut records)?;
    records.sort_by(|a, b| a.camel_case_name.cmp(&b.camel_case_name));
    Ok(records)
}

fn walk(prefix: &[String], resources: &HashMap<String, Resource>, out: &mut Vec<MethodRecord>) -> Result<()> {
    let mut names: Vec<&String> = resources.keys().collect();
    names.sort();

    for name in names {
        let resource = &resources[name];
        let mut path = prefix.to_vec();
        path.push(name.clone());

        let mut method_names: Vec<&String> = resource.methods.keys().collect();
        method_names.sort();
        for method_name in method_names {
            let method = &resource.methods[method_name];
            out.push(build_record(&path, method_name, method)?);
        }

        walk(&path, &resource.resources, out)?;
    }

    Ok(())
}

fn build_record(path: &[String], method_name: &str, method: &Method) -> Result<MethodRecord> {
    let method_id = method
        .id
        .clone()
        .unwrap_or_else(|| format!("{}.{}", path.join("."), method_name));

    let mut segments: Vec<&str> = path.iter().map(String::as_str).collect();
    segments.push(method_name);

    let camel_case_name = camel_join(&segments);
    let pascal_case_name = segments.iter().copied().map(capitalize).collect();

    let mut path_params = Vec::new();
    let mut query_params = Vec::new();
    for (param_name, param) in &method.parameters {
        match param.location.as_deref() {
            Some("path") => {
                if !param.required {
                    return Err(GeneratorError::Schema(format!(
                        "method '{}': path parameter '{}' must be required",
                        method_id, param_name
                    )));
                }
                path_params.push((param_name.clone(), param.clone()));
            }
            Some("query") => query_params.push((param_name.clone(), param.clone())),
            _ => {}
        }
    }
    path_params.sort_by(|a, b| a.0.cmp(&b.0));
    query_params.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(MethodRecord {
        http_method: method.http_method.clone(),
        path: method.path.clone(),
        request: method.request.as_ref().map(|r| r.ref_schema.clone()),
        response: method.response.as_ref().map(|r| r.ref_schema.clone()),
        camel_case_name,
        pascal_case_name,
        path_params,
        query_params,
        description: method.description.clone(),
    })
}

fn camel_join(segments: &[&str]) -> String {
    let mut result = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i == 0 {
            result.push_str(segment);
        } else {
            result.push_str(&capitalize(segment));
        }
    }
    result
}
