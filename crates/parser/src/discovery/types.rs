//! Google Discovery Document type definitions
//!
//! Based on JSON Schema Draft 3 with Google-specific extensions. A single
//! [`Schema`] struct stands in for every "type node" the format defines —
//! a top-level named schema, an object property, an array's `items`, a
//! method parameter — since the wire format itself does not tag which of
//! those a given JSON object is; that's inferred from which fields are
//! populated (see `typeprinter::classify` in the codegen crate).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Discovery Document root, as received from the caller.
///
/// `name`, `title` and `root_url` are `Option` here even though the format
/// requires them, so that a missing field surfaces as a
/// `GeneratorError::Schema` from [`super::loader::load`] rather than a
/// generic JSON parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDiscoveryDocument {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "documentationLink", default)]
    pub documentation_link: Option<String>,

    #[serde(rename = "rootUrl", default)]
    pub root_url: Option<String>,

    #[serde(rename = "servicePath", default)]
    pub service_path: Option<String>,

    #[serde(default)]
    pub resources: HashMap<String, Resource>,

    #[serde(default)]
    pub schemas: HashMap<String, Schema>,
}

/// A Discovery document that has passed [`super::loader::load`]'s
/// assertions: `id`, `name`, `title` and `root_url` are guaranteed present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    pub id: String,
    pub name: String,
    pub version: String,
    pub title: String,
    pub description: Option<String>,
    pub documentation_link: Option<String>,
    pub root_url: String,
    pub service_path: Option<String>,
    pub resources: HashMap<String, Resource>,
    pub schemas: HashMap<String, Schema>,
}

impl DiscoveryDocument {
    /// Resolve a `$ref` target in this document's schema table.
    pub fn resolve_ref(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }
}

/// A resource node: a named bag of methods plus nested sub-resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub methods: HashMap<String, Method>,

    #[serde(default)]
    pub resources: HashMap<String, Resource>,
}

/// One API method (operation) as it appears in a resource's `methods` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Method {
    #[serde(default)]
    pub id: Option<String>,

    pub path: String,

    #[serde(rename = "httpMethod")]
    pub http_method: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: HashMap<String, Schema>,

    #[serde(default)]
    pub request: Option<RefSchema>,

    #[serde(default)]
    pub response: Option<RefSchema>,
}

/// `{"$ref": "SchemaName"}`, used for `method.request` / `method.response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefSchema {
    #[serde(rename = "$ref")]
    pub ref_schema: String,
}

/// Either a single item schema (`"items": {...}`) or a tuple of them
/// (`"items": [...]`). The latter is accepted at parse time but rejected
/// by the codegen crate's type classifier — see `typeprinter::classify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Single(Box<Schema>),
    Tuple(Vec<Schema>),
}

/// A Discovery type node: a schema table entry, an object property, array
/// `items`, `additionalProperties`, or a method parameter. Which of those
/// a given instance represents is inferred structurally, not tagged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Present on entries in the top-level `schemas` table.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub schema_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: HashMap<String, Schema>,

    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Option<Box<Schema>>,

    #[serde(default)]
    pub items: Option<Items>,

    #[serde(rename = "$ref", default)]
    pub ref_schema: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<String>,

    /// True when this node is a *required* property of its parent object,
    /// or a required method parameter. Note this is a bool per node, not
    /// (as in JSON Schema Draft 4) a list of names on the parent.
    #[serde(default)]
    pub required: bool,

    #[serde(rename = "readOnly", default)]
    pub read_only: bool,

    /// True for array-valued query parameters.
    #[serde(default)]
    pub repeated: bool,

    /// `"path"` or `"query"`; only meaningful on method parameters.
    #[serde(default)]
    pub location: Option<String>,
}
