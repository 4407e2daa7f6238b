//! Discovery document parsing
//!
//! Loads, normalizes, and flattens Google Discovery Documents into the
//! intermediate representation the `discoverygen-codegen` crate compiles
//! into a TypeScript client module.

pub mod discovery;

pub use discovery::{DiscoveryDocument, DiscoveryParser, MethodRecord};
