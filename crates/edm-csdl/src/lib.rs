//! # edm-csdl
//!
//! Parser for the CSDL-JSON schema format, producing a fully linked
//! [`EdmModel`](edm_model::EdmModel).
//!
//! Construction is two-phase: a header pass creates skeleton type nodes
//! (resolving only base-type identity, recursively, so declaration order
//! never matters), then a body pass populates properties, members, keys,
//! and type references. Documents reachable through `$Reference` are
//! loaded through an injected resolver and deduplicated per parse, so
//! cyclic reference graphs terminate with each document parsed once.

/// Namespace alias table construction and name rewriting.
pub mod aliases;
/// Annotation key splitting, expression building, and attachment.
pub mod annotations;
/// The two-phase type graph builder.
pub mod builder;
/// Non-fatal diagnostics accumulated during a parse.
pub mod diagnostics;
/// First-pass classification of raw schema members.
pub mod extract;
/// Top-level parser entry points.
pub mod parser;
/// Reference graph loading and deduplication.
pub mod references;
/// Type-name and facet resolution into type references.
pub mod typeref;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use parser::{CsdlParser, ParseOutcome, Resolver};

use thiserror::Error;

/// Fatal errors that abort a parse
///
/// A parse either yields a complete, internally consistent model plus a
/// list of non-fatal diagnostics, or fails with the first of these and
/// no model.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed schema at {path}: {message}")]
    MalformedSchema { path: String, message: String },

    #[error("Alias '{alias}' is already mapped to namespace '{existing}' (duplicate mapping to '{duplicate}')")]
    AliasCollision {
        alias: String,
        existing: String,
        duplicate: String,
    },

    #[error("Unresolved base type '{name}' at {path}")]
    UnresolvedBaseType { name: String, path: String },

    #[error("Circular base type chain involving '{name}'")]
    CircularBaseType { name: String },

    #[error("Unresolved type '{name}' at {path}")]
    UnresolvedType { name: String, path: String },

    #[error("Key property '{key}' not found on entity type '{type_name}'")]
    UnresolvedKeyProperty { key: String, type_name: String },

    #[error("Annotation target '{target}' not found at {path}")]
    AnnotationTargetNotFound { target: String, path: String },

    #[error("Referenced document could not be resolved: {uri}")]
    UnresolvedReference { uri: String },

    #[error("Value tree error: {0}")]
    Values(#[from] edm_values::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a malformed-schema error with path context.
    pub fn malformed(path: &edm_values::Path, message: impl Into<String>) -> Self {
        Self::MalformedSchema {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Build an unresolved-type error with path context.
    pub fn unresolved_type(name: impl Into<String>, path: &edm_values::Path) -> Self {
        Self::UnresolvedType {
            name: name.into(),
            path: path.to_string(),
        }
    }
}

/// Crate-local result type for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
