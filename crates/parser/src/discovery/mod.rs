//! Google Discovery Document loading and flattening
//!
//! Parses Google Cloud Discovery Documents (schema loader + resource
//! flattener, §4.1–4.2) into the normalized [`DiscoveryDocument`] and the
//! flattened [`MethodRecord`] list the codegen crate consumes.
//!
//! ## Discovery Document Format
//!
//! Google Cloud APIs publish "Discovery Documents" that describe REST APIs.
//! Format is based on JSON Schema Draft 3 with Google-specific extensions.
//!
//! ## Discovery Sources
//!
//! - **List all APIs**: `GET https://www.googleapis.com/discovery/v1/apis`
//! - **Get specific API**: `GET https://{service}.googleapis.com/$discovery/rest?version={version}`
//!
//! Examples:
//! - Cloud Storage: `https://storage.googleapis.com/$discovery/rest?version=v1`
//! - Compute Engine: `https://compute.googleapis.com/$discovery/rest?version=v1`
//! - BigQuery: `https://bigquery.googleapis.com/$discovery/rest?version=v2`
//!
//! ## Usage
//! ```rust,ignore
//! use discoverygen_parser::discovery::DiscoveryParser;
//!
//! let parser = DiscoveryParser::from_file("storage-v1.json", "https://.../storage:v1.ts")?;
//! let records = parser.flatten()?;
//! ```

mod flatten;
mod loader;
mod parser;
mod types;

pub use flatten::{flatten, MethodRecord};
pub use loader::{primary_name, LoadedDocument};
pub use parser::DiscoveryParser;
pub use types::{DiscoveryDocument, Items, Method, RawDiscoveryDocument, RefSchema, Resource, Schema};
