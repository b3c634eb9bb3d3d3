//! Annotation key splitting and expression building
//!
//! Member names of the form `base@Term#Qualifier` are split at the
//! *last* `@`, because an annotation's own annotations stack further
//! `@Term` suffixes. Targets are matched against the enclosing element's
//! members once those exist; annotations on annotations are accepted as
//! input but deliberately not processed.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use edm_model::{Annotation, Expression};
use edm_values::{Primitive, Value, ValueKind};

/// A parsed annotation member key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationKey<'a> {
    /// Name of the annotated member; empty for the enclosing element
    pub target: &'a str,

    /// Qualified term name
    pub term: &'a str,

    /// Optional qualifier after `#`
    pub qualifier: Option<&'a str>,
}

/// Whether a member key carries an annotation.
pub fn is_annotation_key(key: &str) -> bool {
    key.contains('@')
}

/// Split an annotation member key at its last `@`.
///
/// Returns `None` when the target part itself contains an `@`, i.e. the
/// key annotates another annotation.
pub fn split_annotation_key(key: &str) -> Option<AnnotationKey<'_>> {
    let at = key.rfind('@')?;
    let (target, term_part) = key.split_at(at);
    let term_part = &term_part[1..];
    if target.contains('@') {
        return None;
    }
    let (term, qualifier) = match term_part.split_once('#') {
        Some((term, qualifier)) => (term, Some(qualifier)),
        None => (term_part, None),
    };
    Some(AnnotationKey {
        target,
        term,
        qualifier,
    })
}

/// Build an annotation expression from a raw value.
pub fn build_expression(value: &Value) -> Expression {
    match &value.kind {
        ValueKind::Primitive(Primitive::String(s)) => Expression::Str(s.clone()),
        ValueKind::Primitive(Primitive::Integer(i)) => Expression::Int(*i),
        ValueKind::Primitive(Primitive::Decimal(d)) => Expression::Float(*d),
        ValueKind::Primitive(Primitive::Boolean(b)) => Expression::Bool(*b),
        ValueKind::Primitive(Primitive::Null) => Expression::Null,
        ValueKind::Array(elements) => {
            Expression::Collection(elements.iter().map(build_expression).collect())
        }
        ValueKind::Object(members) => {
            if let Some(path) = value.get("$Path").and_then(Value::as_str) {
                return Expression::Path(path.to_string());
            }
            Expression::Record(
                members
                    .iter()
                    .filter(|(name, _)| !is_annotation_key(name))
                    .map(|(name, member)| (name.clone(), build_expression(member)))
                    .collect(),
            )
        }
    }
}

/// An annotation waiting for its target to exist
#[derive(Debug, Clone)]
pub struct PendingAnnotation {
    /// Target member name; empty for the enclosing element itself
    pub target: String,

    /// The built binding
    pub annotation: Annotation,

    /// Source path, for diagnostics when the target never materializes
    pub path: String,
}

/// Collect the annotation members of an element body into pending
/// bindings. Annotations on annotations are recorded as
/// [`DiagnosticKind::UnsupportedAnnotation`] and dropped.
pub fn collect_annotations(
    members: &[(String, Value)],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<PendingAnnotation> {
    let mut pending = Vec::new();
    for (key, value) in members {
        if !is_annotation_key(key) {
            continue;
        }
        match split_annotation_key(key) {
            Some(split) => pending.push(PendingAnnotation {
                target: split.target.to_string(),
                annotation: Annotation::new(
                    split.term,
                    split.qualifier.map(String::from),
                    build_expression(value),
                ),
                path: value.path.to_string(),
            }),
            None => diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnsupportedAnnotation,
                format!("annotation of an annotation ('{key}') is not processed"),
                &value.path,
            )),
        }
    }
    pending
}
