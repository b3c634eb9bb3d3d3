//! Type references: what a property, term, or parameter points at

use crate::primitive::PrimitiveKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The target of a type reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    /// A primitive catalog entry
    Primitive(PrimitiveKind),

    /// A model element, linked by namespace-qualified name. Existence is
    /// validated when the reference is built; lookup goes through the model.
    Named(String),
}

/// Optional constraints on a primitive type reference
///
/// Each facet applies only to its primitive family; the parser drops
/// facets supplied for an incompatible kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    /// Maximum length (Binary, String)
    pub max_length: Option<u32>,

    /// Significant digits (Decimal) or sub-second digits (temporal)
    pub precision: Option<u32>,

    /// Digits right of the decimal point (Decimal)
    pub scale: Option<u32>,

    /// Spatial reference system identifier (Geography, Geometry)
    pub srid: Option<u32>,

    /// Whether a string may hold non-ASCII content (String, default true)
    pub unicode: Option<bool>,
}

/// A resolved reference to a type, as used by properties, terms,
/// operation parameters, and return types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeReference {
    /// Referenced type
    pub ty: TypeKind,

    /// Whether the value may be null (collection: whether members may)
    pub nullable: bool,

    /// Whether the reference is a collection of the referenced type
    pub is_collection: bool,

    /// Primitive facets (empty for named types)
    pub facets: Facets,
}

impl Facets {
    /// Facet set with nothing specified.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether no facet is specified.
    pub fn is_empty(&self) -> bool {
        self.max_length.is_none()
            && self.precision.is_none()
            && self.scale.is_none()
            && self.srid.is_none()
            && self.unicode.is_none()
    }

    /// Keep only the facets legal for the given primitive kind.
    /// Facets supplied for an incompatible kind are dropped, not errors.
    pub fn restrict_to(&self, kind: PrimitiveKind) -> Self {
        Self {
            max_length: self.max_length.filter(|_| kind.supports_max_length()),
            precision: self.precision.filter(|_| kind.supports_precision()),
            scale: self.scale.filter(|_| kind.supports_scale()),
            srid: self.srid.filter(|_| kind.supports_srid()),
            unicode: self.unicode.filter(|_| kind.supports_unicode()),
        }
    }
}

impl TypeReference {
    /// Build a primitive reference, keeping only the legal facets.
    pub fn primitive(kind: PrimitiveKind, nullable: bool, is_collection: bool, facets: Facets) -> Self {
        Self {
            ty: TypeKind::Primitive(kind),
            nullable,
            is_collection,
            facets: facets.restrict_to(kind),
        }
    }

    /// Build a reference to a model element by qualified name.
    pub fn named(full_name: impl Into<String>, nullable: bool, is_collection: bool) -> Self {
        Self {
            ty: TypeKind::Named(full_name.into()),
            nullable,
            is_collection,
            facets: Facets::none(),
        }
    }

    /// The primitive kind, if this references a primitive type.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match &self.ty {
            TypeKind::Primitive(kind) => Some(*kind),
            TypeKind::Named(_) => None,
        }
    }

    /// The qualified element name, if this references a model element.
    pub fn named_type(&self) -> Option<&str> {
        match &self.ty {
            TypeKind::Primitive(_) => None,
            TypeKind::Named(name) => Some(name),
        }
    }

    /// Qualified name of the referenced type.
    pub fn type_name(&self) -> String {
        match &self.ty {
            TypeKind::Primitive(kind) => kind.name(),
            TypeKind::Named(name) => name.clone(),
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_collection {
            write!(f, "Collection({})", self.type_name())
        } else {
            write!(f, "{}", self.type_name())
        }
    }
}
