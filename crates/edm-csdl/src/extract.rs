//! First pass: classify raw schema members into schema items
//!
//! Extraction never resolves a name against other items; it only
//! classifies members by their `$Kind` discriminator and stores the raw
//! value for the later builder passes.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::{Error, Result};
use edm_values::{Path, Value};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Dotted sequence of CSDL SimpleIdentifiers.
static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("valid pattern")
});

/// The kinds a schema member can classify into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaItemKind {
    EntityType,
    ComplexType,
    EnumType,
    TypeDefinition,
    Term,
    Action,
    Function,
    EntityContainer,
}

impl SchemaItemKind {
    /// Map a `$Kind` discriminator string to an item kind.
    pub fn from_discriminator(kind: &str) -> Option<Self> {
        match kind {
            "EntityType" => Some(Self::EntityType),
            "ComplexType" => Some(Self::ComplexType),
            "EnumType" => Some(Self::EnumType),
            "TypeDefinition" => Some(Self::TypeDefinition),
            "Term" => Some(Self::Term),
            "Action" => Some(Self::Action),
            "Function" => Some(Self::Function),
            "EntityContainer" => Some(Self::EntityContainer),
            _ => None,
        }
    }
}

/// An unresolved schema item: classified, raw members retained
#[derive(Debug, Clone)]
pub struct SchemaItem {
    /// Declaring namespace
    pub namespace: String,

    /// Item name within the namespace
    pub name: String,

    /// Classified kind
    pub kind: SchemaItemKind,

    /// The raw member object, untouched
    pub value: Value,
}

impl SchemaItem {
    /// Namespace-qualified item name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Source path of the raw member object.
    pub fn path(&self) -> &Path {
        &self.value.path
    }
}

/// Everything extracted from one schema object
#[derive(Debug, Clone)]
pub struct ExtractedSchema {
    /// The schema's namespace
    pub namespace: String,

    /// Declared `$Alias`, if any
    pub alias: Option<String>,

    /// Classified items in document order
    pub items: Vec<SchemaItem>,

    /// Out-of-line `$Annotations` bodies: (target name, annotations object)
    pub out_of_line_annotations: Vec<(String, Value)>,
}

/// Classify every member of one namespace's schema object.
///
/// Recoverable problems (unrecognized `$Kind`, non-object members) are
/// recorded as [`DiagnosticKind::UnknownMember`] and skipped; a schema
/// that is not an object or carries an invalid namespace is fatal.
pub fn extract_schema(
    namespace: &str,
    schema: &Value,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<ExtractedSchema> {
    if namespace.is_empty() {
        return Err(Error::malformed(&schema.path, "schema namespace is empty"));
    }
    if !NAMESPACE_RE.is_match(namespace) {
        return Err(Error::malformed(
            &schema.path,
            format!("'{namespace}' is not a valid schema namespace"),
        ));
    }

    let members = schema.expect_object()?;

    let mut extracted = ExtractedSchema {
        namespace: namespace.to_string(),
        alias: None,
        items: Vec::new(),
        out_of_line_annotations: Vec::new(),
    };

    for (name, value) in members {
        match name.as_str() {
            "$Alias" => {
                extracted.alias = Some(value.expect_str()?.to_string());
            }
            "$Annotations" => {
                for (target, body) in value.expect_object()? {
                    extracted
                        .out_of_line_annotations
                        .push((target.clone(), body.clone()));
                }
            }
            _ => match classify_member(namespace, name, value) {
                Some(item) => {
                    trace!(namespace, name, kind = ?item.kind, "classified schema item");
                    extracted.items.push(item);
                }
                None => {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::UnknownMember,
                        format!("member '{name}' is not a recognizable schema item"),
                        &value.path,
                    ));
                }
            },
        }
    }

    Ok(extracted)
}

/// Classify one non-reserved member, or `None` when it is not a
/// recognizable schema item.
fn classify_member(namespace: &str, name: &str, value: &Value) -> Option<SchemaItem> {
    if !value.is_object() {
        return None;
    }
    let kind = value.get("$Kind")?.as_str()?;
    let kind = SchemaItemKind::from_discriminator(kind)?;
    Some(SchemaItem {
        namespace: namespace.to_string(),
        name: name.to_string(),
        kind,
        value: value.clone(),
    })
}
