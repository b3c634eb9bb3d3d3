//! Top-level parser entry points
//!
//! A [`CsdlParser`] turns a CSDL-JSON document into an
//! [`EdmModel`]. Documents reachable through `$Reference` are loaded
//! through the injected resolver; each top-level parse call owns its own
//! dedup registry, alias tables, and namespace pools, so independent
//! parses never share mutable state.

use crate::aliases::AliasMap;
use crate::builder::ModelBuilder;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::extract::{extract_schema, ExtractedSchema};
use crate::references::{is_vocabulary_uri, parse_references, ResolvedUris};
use crate::{Error, Result};
use edm_model::{CsdlVersion, EdmModel, Reference};
use edm_values::Value;
use std::collections::HashSet;
use tracing::{debug, info};

/// Injected lookup for referenced documents. Returning `None` signals
/// "could not resolve". The call is synchronous by contract; hosts that
/// fetch over a network hide that behind this interface.
pub type Resolver = dyn Fn(&str) -> Option<serde_json::Value>;

/// Result of a successful parse: a complete model plus the non-fatal
/// problems recorded along the way.
#[derive(Debug)]
pub struct ParseOutcome {
    pub model: EdmModel,
    pub diagnostics: Vec<Diagnostic>,
}

/// CSDL-JSON parser with reference loading configuration
pub struct CsdlParser {
    resolver: Option<Box<Resolver>>,
    load_references: bool,
}

/// Everything gathered from one document before building
struct DocumentParts {
    version: CsdlVersion,
    schemas: Vec<ExtractedSchema>,
    references: Vec<Reference>,
}

/// State owned by one top-level parse call
struct ParseContext {
    resolved: ResolvedUris,
    /// Qualified names of every schema item seen anywhere in this parse
    known_names: HashSet<String>,
    /// Namespaces included from documents that were deliberately not
    /// loaded (built-in vocabularies, or loading disabled)
    promised_namespaces: HashSet<String>,
}

impl CsdlParser {
    /// Create a parser with no resolver; any reference that would need
    /// loading then fails as unresolved.
    pub fn new() -> Self {
        Self {
            resolver: None,
            load_references: true,
        }
    }

    /// Set the resolver used to load referenced documents.
    pub fn with_resolver(
        mut self,
        resolver: impl Fn(&str) -> Option<serde_json::Value> + 'static,
    ) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Enable or disable reference loading. When disabled, include
    /// aliases are still registered so name rewriting works, but no
    /// sub-model is built.
    pub fn load_references(mut self, enabled: bool) -> Self {
        self.load_references = enabled;
        self
    }

    /// Parse a CSDL-JSON document from text.
    pub fn parse_str(&self, text: &str) -> Result<ParseOutcome> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        self.parse_json(&json)
    }

    /// Parse an already-deserialized JSON document.
    pub fn parse_json(&self, json: &serde_json::Value) -> Result<ParseOutcome> {
        self.parse_value(&Value::from_json(json))
    }

    /// Parse a materialized value tree.
    pub fn parse_value(&self, root: &Value) -> Result<ParseOutcome> {
        let mut context = ParseContext {
            resolved: ResolvedUris::new(),
            known_names: HashSet::new(),
            promised_namespaces: HashSet::new(),
        };
        let mut diagnostics = Vec::new();
        let model = self.parse_document(root, None, &mut context, &mut diagnostics)?;
        Ok(ParseOutcome { model, diagnostics })
    }

    /// Parse one document of the reference graph.
    fn parse_document(
        &self,
        root: &Value,
        uri: Option<String>,
        context: &mut ParseContext,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<EdmModel> {
        let parts = self.read_document(root, diagnostics)?;
        info!(
            uri = uri.as_deref().unwrap_or("<main>"),
            schemas = parts.schemas.len(),
            references = parts.references.len(),
            "parsing document"
        );

        // All of this document's names join the root parse's pool before
        // any referenced document is loaded, so documents reached through
        // a cycle can resolve names declared here.
        for schema in &parts.schemas {
            for item in &schema.items {
                context.known_names.insert(item.full_name());
            }
        }

        let mut aliases = AliasMap::new();
        for reference in &parts.references {
            for include in &reference.includes {
                if let Some(alias) = &include.alias {
                    aliases.insert(alias.clone(), include.namespace.clone())?;
                }
            }
        }
        for schema in &parts.schemas {
            if let Some(alias) = &schema.alias {
                aliases.insert(alias.clone(), schema.namespace.clone())?;
            }
        }

        let referenced = self.load_referenced_models(&parts.references, context, diagnostics)?;

        let mut builder = ModelBuilder::new(
            &aliases,
            &referenced,
            &context.known_names,
            &context.promised_namespaces,
        );
        let mut out_of_line = Vec::new();
        for schema in &parts.schemas {
            for item in &schema.items {
                builder.add_item(item.clone())?;
            }
            out_of_line.extend(schema.out_of_line_annotations.iter().cloned());
        }
        let elements = builder.build(&out_of_line, diagnostics)?;

        let namespaces = parts.schemas.iter().map(|s| s.namespace.clone()).collect();
        Ok(EdmModel::new(
            parts.version,
            uri,
            elements,
            namespaces,
            aliases.into_table(),
            parts.references,
            referenced,
        ))
    }

    /// Validate the document shell and extract its schemas.
    ///
    /// `$Version` is checked before any schema item is extracted; an
    /// unsupported version fails with nothing processed.
    fn read_document(
        &self,
        root: &Value,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<DocumentParts> {
        let members = root
            .as_object()
            .ok_or_else(|| Error::malformed(&root.path, "document is not an object"))?;

        let declared = root
            .get("$Version")
            .ok_or_else(|| Error::malformed(&root.path, "missing required $Version"))?
            .expect_str()?;
        let version = CsdlVersion::parse(declared).ok_or_else(|| {
            Error::malformed(
                &root.path,
                format!("unsupported schema-format version '{declared}'"),
            )
        })?;

        let references = match root.get("$Reference") {
            Some(reference_object) => parse_references(reference_object, diagnostics)?,
            None => Vec::new(),
        };

        let mut schemas = Vec::new();
        for (name, value) in members {
            if name.starts_with('$') {
                // $Version and $Reference handled above; $EntityContainer
                // is informational only.
                continue;
            }
            schemas.push(extract_schema(name, value, diagnostics)?);
        }

        Ok(DocumentParts {
            version,
            schemas,
            references,
        })
    }

    /// Load every non-empty, non-vocabulary reference, deduplicating by
    /// canonical URI across the whole root parse.
    fn load_referenced_models(
        &self,
        references: &[Reference],
        context: &mut ParseContext,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<EdmModel>> {
        let mut referenced = Vec::new();

        for reference in references {
            if reference.is_empty() {
                // Already flagged during parsing; nothing to load.
                continue;
            }
            if is_vocabulary_uri(&reference.uri) {
                debug!(uri = %reference.uri, "skipping built-in vocabulary reference");
                promise_namespaces(context, reference);
                continue;
            }
            if !self.load_references {
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnresolvedReference,
                    message: format!(
                        "reference '{}' not loaded: reference loading is disabled",
                        reference.uri
                    ),
                    path: "$.$Reference".to_string(),
                });
                promise_namespaces(context, reference);
                continue;
            }
            if !context.resolved.mark(&reference.uri) {
                continue;
            }

            let raw = self
                .resolver
                .as_ref()
                .and_then(|resolve| resolve(&reference.uri))
                .ok_or_else(|| Error::UnresolvedReference {
                    uri: reference.uri.clone(),
                })?;

            let tree = Value::from_json(&raw);
            let model =
                self.parse_document(&tree, Some(reference.uri.clone()), context, diagnostics)?;
            referenced.push(model);
        }

        Ok(referenced)
    }
}

impl Default for CsdlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Record the namespaces an unloaded reference promised, so names into
/// them still resolve.
fn promise_namespaces(context: &mut ParseContext, reference: &Reference) {
    for include in &reference.includes {
        context
            .promised_namespaces
            .insert(include.namespace.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edm_model::SchemaElement;

    #[test]
    fn test_parse_minimal_document() {
        let outcome = CsdlParser::new()
            .parse_str(r#"{"$Version": "4.01", "Acme": {"Thing": {"$Kind": "ComplexType"}}}"#)
            .unwrap();
        assert_eq!(outcome.model.version(), CsdlVersion::V4_01);
        assert_eq!(outcome.model.namespaces(), ["Acme"]);
        assert!(outcome.model.complex_type("Acme.Thing").is_some());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_unsupported_version_fails_before_extraction() {
        // The schema body is malformed too; the version check must win.
        let err = CsdlParser::new()
            .parse_str(r#"{"$Version": "9.9", "Acme": {"Bad": {"$Kind": "EntityType", "$BaseType": "No.Such"}}}"#)
            .unwrap_err();
        match err {
            Error::MalformedSchema { message, .. } => {
                assert!(message.contains("9.9"));
            }
            e => panic!("Expected MalformedSchema error, got {e:?}"),
        }
    }

    #[test]
    fn test_missing_version_is_fatal() {
        let err = CsdlParser::new().parse_str(r#"{"Acme": {}}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedSchema { .. }));
    }

    #[test]
    fn test_entity_container_member_is_informational() {
        let outcome = CsdlParser::new()
            .parse_str(
                r#"{
                    "$Version": "4.0",
                    "$EntityContainer": "Acme.Default",
                    "Acme": {"Default": {"$Kind": "EntityContainer"}}
                }"#,
            )
            .unwrap();
        assert!(outcome.model.entity_container("Acme.Default").is_some());
    }

    #[test]
    fn test_unresolved_reference_is_fatal_when_loading_enabled() {
        let err = CsdlParser::new()
            .parse_str(
                r#"{
                    "$Version": "4.0",
                    "$Reference": {
                        "https://example.org/missing.json": {
                            "$Include": [{"$Namespace": "Missing.Vocab"}]
                        }
                    }
                }"#,
            )
            .unwrap_err();
        match err {
            Error::UnresolvedReference { uri } => {
                assert_eq!(uri, "https://example.org/missing.json");
            }
            e => panic!("Expected UnresolvedReference error, got {e:?}"),
        }
    }

    #[test]
    fn test_disabled_loading_still_registers_aliases() {
        let outcome = CsdlParser::new()
            .load_references(false)
            .parse_str(
                r#"{
                    "$Version": "4.0",
                    "$Reference": {
                        "https://example.org/vocab.json": {
                            "$Include": [{"$Namespace": "Example.Vocab", "$Alias": "EV"}]
                        }
                    },
                    "Acme": {
                        "Note": {
                            "$Kind": "Term",
                            "$Type": "EV.Text"
                        }
                    }
                }"#,
            )
            .unwrap();

        // The alias rewrote to the included namespace; the name is
        // accepted because the include promises that namespace.
        let Some(SchemaElement::Term(note)) = outcome.model.find_element("Acme.Note") else {
            panic!("Expected term");
        };
        assert_eq!(note.ty.named_type(), Some("Example.Vocab.Text"));
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnresolvedReference));
        assert!(outcome.model.referenced_models().is_empty());
    }

    #[test]
    fn test_vocabulary_reference_skipped() {
        let outcome = CsdlParser::new()
            .parse_str(
                r#"{
                    "$Version": "4.0",
                    "$Reference": {
                        "https://oasis-tcs.github.io/odata-vocabularies/vocabularies/Org.OData.Core.V1.json": {
                            "$Include": [{"$Namespace": "Org.OData.Core.V1", "$Alias": "Core"}]
                        }
                    },
                    "Acme": {}
                }"#,
            )
            .unwrap();
        assert!(outcome.model.referenced_models().is_empty());
        assert_eq!(
            outcome.model.aliases().get("Core").map(String::as_str),
            Some("Org.OData.Core.V1")
        );
    }
}
