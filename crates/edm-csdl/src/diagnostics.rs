//! Non-fatal diagnostics
//!
//! Recoverable problems are recorded and skipped; the parse continues
//! and returns them alongside the model.

use std::fmt;

/// Classification of a non-fatal problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `$Reference` entry with neither includes nor include-annotations
    EmptyReference,

    /// A schema member that is not a recognizable schema item
    UnknownMember,

    /// A reference that was not loaded because reference loading is disabled
    UnresolvedReference,

    /// An annotation form that is accepted but not processed
    /// (annotations on annotations)
    UnsupportedAnnotation,
}

/// A recorded non-fatal problem with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,

    /// Human-readable detail
    pub message: String,

    /// Document path of the offending value
    pub path: String,
}

impl Diagnostic {
    /// Record a diagnostic at a document path.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, path: &edm_values::Path) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}: {}", self.kind, self.path, self.message)
    }
}
