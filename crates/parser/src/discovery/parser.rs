//! Discovery document parsing entry point

use super::flatten::{self, MethodRecord};
use super::loader::{self, LoadedDocument};
use super::types::{DiscoveryDocument, RawDiscoveryDocument};
use discoverygen_common::Result;
use std::fs;
use std::path::Path;

/// Loads a Discovery document from JSON, normalizes it, and flattens its
/// resource tree into method records.
///
/// One `DiscoveryParser` corresponds to one generation request: it owns
/// the loaded document, produces one method-record list, and is then
/// discarded.
pub struct DiscoveryParser {
    loaded: LoadedDocument,
}

impl DiscoveryParser {
    /// Load a Discovery document from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P, self_url: &str) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content, self_url)
    }

    /// Load a Discovery document from a JSON string.
    pub fn from_json(json: &str, self_url: &str) -> Result<Self> {
        let raw: RawDiscoveryDocument = serde_json::from_str(json)?;
        let loaded = loader::load(raw, self_url)?;
        Ok(Self { loaded })
    }

    /// The normalized document.
    pub fn doc(&self) -> &DiscoveryDocument {
        &self.loaded.doc
    }

    /// The self-URL this document will be generated under.
    pub fn self_url(&self) -> &str {
        &self.loaded.self_url
    }

    /// The case-corrected primary client class name.
    pub fn primary_name(&self) -> &str {
        &self.loaded.primary_name
    }

    /// Flatten the resource tree into a sorted method-record list.
    pub fn flatten(&self) -> Result<Vec<MethodRecord>> {
        flatten::flatten(&self.loaded.doc)
    }
}
