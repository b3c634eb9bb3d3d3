#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

//! # edm-values
//!
//! Generic value tree and path tracking for schema-document parsing.
//!
//! This crate provides the materialized object/array/primitive tree the
//! CSDL parser operates on, decoupled from any concrete tokenizer. Every
//! node carries the path at which it was found so that diagnostics can
//! point into the source document.

/// Path segments and display formatting for diagnostics.
pub mod path;
/// The tagged value tree and its typed accessors.
pub mod value;

/// Source location of a value within a document.
pub use path::Path;
/// Tree node types and primitive leaves.
pub use value::{Primitive, Value, ValueKind};

use thiserror::Error;

/// Errors that can occur when reading the value tree
#[derive(Error, Debug)]
pub enum Error {
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Missing member '{name}' at {path}")]
    MissingMember { path: String, name: String },
}

impl Error {
    /// Build a type-mismatch error with path context.
    pub fn type_mismatch(
        path: &Path,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.to_string(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Build a missing-member error for a required object member.
    pub fn missing_member(path: &Path, name: impl Into<String>) -> Self {
        Self::MissingMember {
            path: path.to_string(),
            name: name.into(),
        }
    }
}

/// Crate-local result type for value-tree operations.
pub type Result<T> = std::result::Result<T, Error>;
