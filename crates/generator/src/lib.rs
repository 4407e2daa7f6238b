//! Discovery document to TypeScript client module compiler
//!
//! This crate turns a parsed [`discoverygen_parser::discovery::DiscoveryDocument`]
//! into one generated TypeScript source file: a client class with one
//! method per API operation, plus the type declarations and codec
//! functions its methods and schemas need.
//!
//! The pipeline fans out into one module per concern:
//! - [`typeprinter`] classifies schema nodes and renders TypeScript types
//! - [`conversion`] decides whether a node needs runtime<->wire conversion
//! - [`codec`] emits the `serializeX`/`deserializeX` function pairs
//! - [`method`] emits one client method body
//! - [`module`] assembles the above into the final file, in a fixed order
//!
//! [`module::assemble`] does the orchestration; [`Generator`] is a thin
//! convenience wrapper around it for callers that already have a parsed
//! document in hand.

mod codec;
mod conversion;
mod method;
mod module;
mod typeprinter;

use discoverygen_common::Result;
use discoverygen_parser::discovery::DiscoveryDocument;

pub use conversion::is_conversion_required_for_ref;

/// Compiles one Discovery document into one generated module.
///
/// Holds the document plus the two identifiers [`module::assemble`] needs
/// but can't derive from the document alone: the case-corrected primary
/// class name (from [`discoverygen_parser::discovery::primary_name`]) and
/// the self-URL the module's header comment should cite.
pub struct Generator {
    doc: DiscoveryDocument,
    primary_name: String,
    self_url: String,
}

impl Generator {
    pub fn new(doc: DiscoveryDocument, primary_name: impl Into<String>, self_url: impl Into<String>) -> Self {
        Self { doc, primary_name: primary_name.into(), self_url: self_url.into() }
    }

    /// Compile the document into a generated TypeScript source string.
    pub fn generate(&self) -> Result<String> {
        module::assemble(&self.doc, &self.primary_name, &self.self_url)
    }
}
