//! Reference graph parsing and deduplication
//!
//! Parses `$Reference` into reference records and tracks which URIs a
//! root parse has already resolved, so a document reachable through
//! several paths (or through a cycle) is parsed at most once.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::Result;
use edm_model::{Include, IncludeAnnotations, Reference};
use edm_values::Value;
use std::collections::HashSet;
use tracing::debug;

/// Standard OData vocabulary documents assumed pre-loaded by the caller.
/// A reference whose URI ends in one of these is not fetched.
const VOCABULARY_SUFFIXES: [&str; 6] = [
    "Org.OData.Core.V1.json",
    "Org.OData.Capabilities.V1.json",
    "Org.OData.Measures.V1.json",
    "Org.OData.Validation.V1.json",
    "Org.OData.Aggregation.V1.json",
    "Org.OData.Authorization.V1.json",
];

/// Whether a URI names a built-in vocabulary document.
pub fn is_vocabulary_uri(uri: &str) -> bool {
    VOCABULARY_SUFFIXES.iter().any(|suffix| uri.ends_with(suffix))
}

/// URIs already resolved during the current root parse
///
/// Owned by the top-level parse call and passed down by reference, so
/// concurrent independent parses never interfere.
#[derive(Debug, Default)]
pub struct ResolvedUris {
    uris: HashSet<String>,
}

impl ResolvedUris {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a URI resolved. Returns `false` if it already was, in which
    /// case the caller must not parse the document again.
    pub fn mark(&mut self, uri: &str) -> bool {
        let fresh = self.uris.insert(uri.to_string());
        if !fresh {
            debug!(uri, "reference already resolved, short-circuiting");
        }
        fresh
    }

    /// Whether a URI has been resolved during this parse.
    pub fn contains(&self, uri: &str) -> bool {
        self.uris.contains(uri)
    }
}

/// Parse a document's `$Reference` object into reference records.
///
/// References with neither `$Include` nor `$IncludeAnnotations` are
/// flagged [`DiagnosticKind::EmptyReference`] and still recorded, but
/// marked so the loader skips them.
pub fn parse_references(
    reference_object: &Value,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Reference>> {
    let mut references = Vec::new();

    for (uri, body) in reference_object.expect_object()? {
        let mut reference = Reference {
            uri: uri.clone(),
            includes: Vec::new(),
            include_annotations: Vec::new(),
        };

        if let Some(includes) = body.get("$Include") {
            for include in includes.expect_array()? {
                reference.includes.push(Include {
                    namespace: include.require("$Namespace")?.expect_str()?.to_string(),
                    alias: match include.get("$Alias") {
                        Some(alias) => Some(alias.expect_str()?.to_string()),
                        None => None,
                    },
                });
            }
        }

        if let Some(include_annotations) = body.get("$IncludeAnnotations") {
            for entry in include_annotations.expect_array()? {
                reference.include_annotations.push(IncludeAnnotations {
                    term_namespace: entry.require("$TermNamespace")?.expect_str()?.to_string(),
                    qualifier: match entry.get("$Qualifier") {
                        Some(qualifier) => Some(qualifier.expect_str()?.to_string()),
                        None => None,
                    },
                    target_namespace: match entry.get("$TargetNamespace") {
                        Some(target) => Some(target.expect_str()?.to_string()),
                        None => None,
                    },
                });
            }
        }

        if reference.is_empty() {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::EmptyReference,
                format!("reference '{uri}' includes no schemas and no annotations"),
                &body.path,
            ));
        }

        references.push(reference);
    }

    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(json: &str) -> Value {
        Value::from_json(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_parse_reference_with_includes() {
        let refs = value(
            r#"{
                "https://example.org/vocab.json": {
                    "$Include": [
                        {"$Namespace": "Example.Vocab", "$Alias": "EV"},
                        {"$Namespace": "Example.Other"}
                    ]
                }
            }"#,
        );
        let mut diagnostics = Vec::new();
        let references = parse_references(&refs, &mut diagnostics).unwrap();

        assert_eq!(references.len(), 1);
        assert_eq!(references[0].uri, "https://example.org/vocab.json");
        assert_eq!(references[0].includes.len(), 2);
        assert_eq!(references[0].includes[0].alias.as_deref(), Some("EV"));
        assert!(references[0].includes[1].alias.is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parse_include_annotations() {
        let refs = value(
            r#"{
                "https://example.org/annos.json": {
                    "$IncludeAnnotations": [
                        {
                            "$TermNamespace": "Example.Terms",
                            "$Qualifier": "Tablet",
                            "$TargetNamespace": "Acme.Model"
                        }
                    ]
                }
            }"#,
        );
        let mut diagnostics = Vec::new();
        let references = parse_references(&refs, &mut diagnostics).unwrap();

        let ia = &references[0].include_annotations[0];
        assert_eq!(ia.term_namespace, "Example.Terms");
        assert_eq!(ia.qualifier.as_deref(), Some("Tablet"));
        assert_eq!(ia.target_namespace.as_deref(), Some("Acme.Model"));
    }

    #[test]
    fn test_empty_reference_flagged_not_fatal() {
        let refs = value(r#"{"https://example.org/empty.json": {}}"#);
        let mut diagnostics = Vec::new();
        let references = parse_references(&refs, &mut diagnostics).unwrap();

        assert_eq!(references.len(), 1);
        assert!(references[0].is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::EmptyReference);
    }

    #[test]
    fn test_include_missing_namespace_is_fatal() {
        let refs = value(
            r#"{"https://example.org/bad.json": {"$Include": [{"$Alias": "B"}]}}"#,
        );
        let mut diagnostics = Vec::new();
        assert!(parse_references(&refs, &mut diagnostics).is_err());
    }

    #[test]
    fn test_vocabulary_uris_are_recognized() {
        assert!(is_vocabulary_uri(
            "https://oasis-tcs.github.io/odata-vocabularies/vocabularies/Org.OData.Core.V1.json"
        ));
        assert!(!is_vocabulary_uri("https://example.org/vocab.json"));
    }

    #[test]
    fn test_resolved_uris_dedup() {
        let mut resolved = ResolvedUris::new();
        assert!(resolved.mark("https://example.org/a.json"));
        assert!(!resolved.mark("https://example.org/a.json"));
        assert!(resolved.contains("https://example.org/a.json"));
        assert!(!resolved.contains("https://example.org/b.json"));
    }
}
