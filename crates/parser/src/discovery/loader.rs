//! Schema Loader & Normalizer
//!
//! Accepts a raw, just-parsed Discovery document and a self-URL, asserts
//! the fields later stages depend on, and computes the primary (client)
//! class name.

use super::types::{DiscoveryDocument, RawDiscoveryDocument};
use discoverygen_common::{GeneratorError, Result};

/// A Discovery document after loader assertions, paired with the
/// information later stages need but that isn't part of the document
/// itself: the canonical output source URL and the computed class name.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub doc: DiscoveryDocument,
    pub self_url: String,
    pub primary_name: String,
}

/// Validate `raw` and compute its primary class name.
///
/// Fails with `GeneratorError::Schema` if `name`, `title` or `root_url` is
/// missing — the three fields every later stage assumes are present.
pub fn load(raw: RawDiscoveryDocument, self_url: &str) -> Result<LoadedDocument> {
    let name = raw
        .name
        .ok_or_else(|| GeneratorError::Schema("document is missing required field `name`".into()))?;
    let title = raw
        .title
        .ok_or_else(|| GeneratorError::Schema("document is missing required field `title`".into()))?;
    let root_url = raw.root_url.ok_or_else(|| {
        GeneratorError::Schema("document is missing required field `rootUrl`".into())
    })?;

    let words: Vec<&str> = title.split(' ').collect();
    let primary_name = primary_name(&name, &words);

    let doc = DiscoveryDocument {
        id: raw.id.unwrap_or_else(|| name.clone()),
        name,
        version: raw.version.unwrap_or_default(),
        title,
        description: raw.description,
        documentation_link: raw.documentation_link,
        root_url,
        service_path: raw.service_path,
        resources: raw.resources,
        schemas: raw.schemas,
    };

    Ok(LoadedDocument {
        doc,
        self_url: self_url.to_string(),
        primary_name,
    })
}

/// Case-correct `name` against a list of `words` (typically the API
/// title's space-split words).
///
/// Walks `name` left to right. At each position, tries each word in
/// `words` and, if `name` starts with that word (case-insensitively) at
/// the current position, splices the word's *original* casing into the
/// result and advances by the word's length; otherwise copies one
/// character from `name` verbatim and advances by one.
///
/// `primary_name("bigquery", &["BigQuery", "API"])` returns `"BigQuery"`.
pub fn primary_name(name: &str, words: &[&str]) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    'chars: while i < chars.len() {
        let rest: String = chars[i..].iter().collect();
        let rest_lower = rest.to_lowercase();
        for word in words {
            if word.is_empty() {
                continue;
            }
            if rest_lower.starts_with(&word.to_lowercase()) {
                result.push_str(word);
                i += word.chars().count();
                continue 'chars;
            }
        }
        result.push(chars[i]);
        i += 1;
    }

    result
}
