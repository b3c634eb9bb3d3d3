//! Cross-document reference records

use serde::{Deserialize, Serialize};

/// A `$Reference` entry: one referenced document and what it contributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Target document URI
    pub uri: String,

    /// Schemas pulled in from the referenced document
    pub includes: Vec<Include>,

    /// Annotation sets pulled in from the referenced document
    pub include_annotations: Vec<IncludeAnnotations>,
}

/// An `$Include` entry: a namespace made visible, optionally under an alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Include {
    /// Namespace in the referenced document
    pub namespace: String,

    /// Document-scoped alias for that namespace
    pub alias: Option<String>,
}

/// An `$IncludeAnnotations` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeAnnotations {
    /// Namespace of the terms whose annotations are included
    pub term_namespace: String,

    /// Only annotations with this qualifier are included
    pub qualifier: Option<String>,

    /// Only annotations targeting elements of this namespace are included
    pub target_namespace: Option<String>,
}

impl Reference {
    /// A reference contributing neither schemas nor annotations is
    /// meaningless and gets flagged by the parser.
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.include_annotations.is_empty()
    }
}
