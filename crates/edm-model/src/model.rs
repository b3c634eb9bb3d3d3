//! The top-level model container

use crate::element::SchemaElement;
use crate::reference::Reference;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported CSDL schema-format versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsdlVersion {
    V4_0,
    V4_01,
}

impl CsdlVersion {
    /// Parse a declared `$Version` string.
    pub fn parse(version: &str) -> Option<Self> {
        match version {
            "4.0" => Some(Self::V4_0),
            "4.01" => Some(Self::V4_01),
            _ => None,
        }
    }

    /// The `$Version` string for this version.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V4_0 => "4.0",
            Self::V4_01 => "4.01",
        }
    }
}

/// A built, internally consistent Entity Data Model
///
/// Owns the elements of its own schemas; referenced documents are built
/// into sub-models owned by this one and consulted read-only during
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdmModel {
    version: CsdlVersion,

    /// Source document URI; `None` for the main document
    uri: Option<String>,

    /// Elements of this document's schemas, keyed by qualified name
    elements: HashMap<String, SchemaElement>,

    /// Namespaces declared by this document's schemas
    namespaces: Vec<String>,

    /// Alias → namespace table in effect for this document
    aliases: HashMap<String, String>,

    /// References declared by this document
    references: Vec<Reference>,

    /// Models built from resolved references
    referenced: Vec<EdmModel>,
}

impl EdmModel {
    /// Assemble a model from its built parts.
    pub fn new(
        version: CsdlVersion,
        uri: Option<String>,
        elements: HashMap<String, SchemaElement>,
        namespaces: Vec<String>,
        aliases: HashMap<String, String>,
        references: Vec<Reference>,
        referenced: Vec<EdmModel>,
    ) -> Self {
        Self {
            version,
            uri,
            elements,
            namespaces,
            aliases,
            references,
            referenced,
        }
    }

    /// Declared schema-format version.
    pub fn version(&self) -> CsdlVersion {
        self.version
    }

    /// Source document URI; `None` for the main document.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Namespaces declared by this document's schemas.
    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Alias → namespace table in effect for this document.
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// References declared by this document.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Models built from this document's resolved references.
    pub fn referenced_models(&self) -> &[EdmModel] {
        &self.referenced
    }

    /// Elements of this document's own schemas, in no particular order.
    pub fn elements(&self) -> impl Iterator<Item = &SchemaElement> {
        self.elements.values()
    }

    /// Look up an element by qualified name, searching this document's
    /// schemas first, then referenced sub-models depth-first.
    pub fn find_element(&self, qualified_name: &str) -> Option<&SchemaElement> {
        if let Some(element) = self.elements.get(qualified_name) {
            return Some(element);
        }
        self.referenced
            .iter()
            .find_map(|model| model.find_element(qualified_name))
    }

    /// Look up an element declared directly in this document.
    pub fn own_element(&self, qualified_name: &str) -> Option<&SchemaElement> {
        self.elements.get(qualified_name)
    }

    /// Look up an entity type by qualified name.
    pub fn entity_type(&self, qualified_name: &str) -> Option<&crate::element::EntityType> {
        match self.find_element(qualified_name)? {
            SchemaElement::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Look up a complex type by qualified name.
    pub fn complex_type(&self, qualified_name: &str) -> Option<&crate::element::ComplexType> {
        match self.find_element(qualified_name)? {
            SchemaElement::Complex(complex) => Some(complex),
            _ => None,
        }
    }

    /// Look up an enumeration type by qualified name.
    pub fn enum_type(&self, qualified_name: &str) -> Option<&crate::element::EnumType> {
        match self.find_element(qualified_name)? {
            SchemaElement::Enum(enumeration) => Some(enumeration),
            _ => None,
        }
    }

    /// Look up an entity container by qualified name.
    pub fn entity_container(
        &self,
        qualified_name: &str,
    ) -> Option<&crate::element::EntityContainer> {
        match self.find_element(qualified_name)? {
            SchemaElement::Container(container) => Some(container),
            _ => None,
        }
    }

    /// Number of elements declared directly in this document.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}
