//! Schema element kinds: the nodes of the built type graph

use crate::annotation::Annotation;
use crate::primitive::PrimitiveKind;
use crate::typeref::{Facets, TypeReference};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fully built element of a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaElement {
    /// Entity type: keyed, possibly derived structured type
    Entity(EntityType),

    /// Complex type: keyless structured type
    Complex(ComplexType),

    /// Enumeration type
    Enum(EnumType),

    /// Named primitive type with facets
    TypeDefinition(TypeDefinition),

    /// Vocabulary term
    Term(Term),

    /// Action
    Action(Operation),

    /// Function
    Function(Operation),

    /// Entity container
    Container(EntityContainer),
}

/// Discriminant for [`SchemaElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Entity,
    Complex,
    Enum,
    TypeDefinition,
    Term,
    Action,
    Function,
    Container,
}

/// An entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    pub namespace: String,
    pub name: String,

    /// Qualified name of the base entity type, if derived
    pub base_type: Option<String>,

    pub is_abstract: bool,
    pub is_open: bool,
    pub has_stream: bool,

    /// Names of the key properties, in declared key order
    pub key: Vec<String>,

    /// Declared properties (structural and navigation) in document order
    pub properties: Vec<Property>,

    pub annotations: Vec<Annotation>,
}

/// A complex type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexType {
    pub namespace: String,
    pub name: String,

    /// Qualified name of the base complex type, if derived
    pub base_type: Option<String>,

    pub is_abstract: bool,
    pub is_open: bool,

    /// Declared properties (structural and navigation) in document order
    pub properties: Vec<Property>,

    pub annotations: Vec<Annotation>,
}

/// A property of a structured type, preserving declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Property {
    Structural(StructuralProperty),
    Navigation(NavigationProperty),
}

/// A structural property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralProperty {
    pub name: String,
    pub ty: TypeReference,

    /// Declared `$DefaultValue` as literal text (non-string primitives
    /// keep their display form)
    pub default_value: Option<String>,

    pub annotations: Vec<Annotation>,
}

/// A navigation property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationProperty {
    pub name: String,

    /// Target entity type (named reference; collection and nullability
    /// carried on the reference)
    pub ty: TypeReference,

    /// Path to the partner navigation property on the target type
    pub partner: Option<String>,

    pub contains_target: bool,

    /// `$OnDelete` action (Cascade, None, SetNull, SetDefault)
    pub on_delete: Option<String>,

    /// `$ReferentialConstraint`: dependent property → principal property
    pub referential_constraints: Vec<(String, String)>,

    pub annotations: Vec<Annotation>,
}

/// An enumeration type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub namespace: String,
    pub name: String,

    /// Backing integer kind (Int32 unless declared otherwise)
    pub underlying: PrimitiveKind,

    /// Whether members may be OR-combined
    pub is_flags: bool,

    /// Members in document order
    pub members: Vec<EnumMember>,

    pub annotations: Vec<Annotation>,
}

/// One member of an enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
    pub annotations: Vec<Annotation>,
}

/// A named primitive type with facets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub namespace: String,
    pub name: String,

    /// Underlying primitive kind (must be primitive per CSDL)
    pub underlying: PrimitiveKind,

    /// Facets constraining the underlying kind
    pub facets: Facets,

    pub annotations: Vec<Annotation>,
}

/// A vocabulary term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub namespace: String,
    pub name: String,

    /// Type of the term's value
    pub ty: TypeReference,

    /// Model element kinds this term may annotate
    pub applies_to: Vec<String>,

    /// Declared default value as literal text, when present
    pub default_value: Option<String>,

    pub annotations: Vec<Annotation>,
}

/// Whether an operation is an action or a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Action,
    Function,
}

/// An action or function signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub namespace: String,
    pub name: String,
    pub kind: OperationKind,

    /// Whether the first parameter is the binding parameter
    pub is_bound: bool,

    /// Path from the binding parameter to the target entity set
    pub entity_set_path: Option<String>,

    /// Functions only: whether the operation may be composed
    pub is_composable: bool,

    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeReference>,

    pub annotations: Vec<Annotation>,
}

/// One operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeReference,
    pub annotations: Vec<Annotation>,
}

/// An entity container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityContainer {
    pub namespace: String,
    pub name: String,

    /// Qualified name of the extended container, if any
    pub extends: Option<String>,

    /// Container children in document order
    pub children: Vec<ContainerChild>,

    pub annotations: Vec<Annotation>,
}

/// A child of an entity container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContainerChild {
    /// A collection-valued navigation source
    EntitySet {
        name: String,
        entity_type: String,
        navigation_bindings: HashMap<String, String>,
        annotations: Vec<Annotation>,
    },

    /// A single-valued navigation source
    Singleton {
        name: String,
        ty: String,
        navigation_bindings: HashMap<String, String>,
        annotations: Vec<Annotation>,
    },

    /// An action import
    ActionImport {
        name: String,
        action: String,
        entity_set: Option<String>,
        annotations: Vec<Annotation>,
    },

    /// A function import
    FunctionImport {
        name: String,
        function: String,
        entity_set: Option<String>,
        annotations: Vec<Annotation>,
    },
}

impl SchemaElement {
    /// Element name within its namespace.
    pub fn name(&self) -> &str {
        match self {
            Self::Entity(e) => &e.name,
            Self::Complex(c) => &c.name,
            Self::Enum(e) => &e.name,
            Self::TypeDefinition(t) => &t.name,
            Self::Term(t) => &t.name,
            Self::Action(o) | Self::Function(o) => &o.name,
            Self::Container(c) => &c.name,
        }
    }

    /// Namespace the element is declared in.
    pub fn namespace(&self) -> &str {
        match self {
            Self::Entity(e) => &e.namespace,
            Self::Complex(c) => &c.namespace,
            Self::Enum(e) => &e.namespace,
            Self::TypeDefinition(t) => &t.namespace,
            Self::Term(t) => &t.namespace,
            Self::Action(o) | Self::Function(o) => &o.namespace,
            Self::Container(c) => &c.namespace,
        }
    }

    /// Namespace-qualified element name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }

    /// Discriminant for kind dispatch.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Entity(_) => ElementKind::Entity,
            Self::Complex(_) => ElementKind::Complex,
            Self::Enum(_) => ElementKind::Enum,
            Self::TypeDefinition(_) => ElementKind::TypeDefinition,
            Self::Term(_) => ElementKind::Term,
            Self::Action(_) => ElementKind::Action,
            Self::Function(_) => ElementKind::Function,
            Self::Container(_) => ElementKind::Container,
        }
    }

    /// Annotations attached to the element itself.
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Self::Entity(e) => &e.annotations,
            Self::Complex(c) => &c.annotations,
            Self::Enum(e) => &e.annotations,
            Self::TypeDefinition(t) => &t.annotations,
            Self::Term(t) => &t.annotations,
            Self::Action(o) | Self::Function(o) => &o.annotations,
            Self::Container(c) => &c.annotations,
        }
    }
}

impl EntityType {
    /// Namespace-qualified name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Structural properties in declaration order.
    pub fn structural_properties(&self) -> impl Iterator<Item = &StructuralProperty> {
        self.properties.iter().filter_map(|p| match p {
            Property::Structural(s) => Some(s),
            Property::Navigation(_) => None,
        })
    }

    /// Navigation properties in declaration order.
    pub fn navigation_properties(&self) -> impl Iterator<Item = &NavigationProperty> {
        self.properties.iter().filter_map(|p| match p {
            Property::Navigation(n) => Some(n),
            Property::Structural(_) => None,
        })
    }

    /// Find a declared structural property by name.
    pub fn find_property(&self, name: &str) -> Option<&StructuralProperty> {
        self.structural_properties().find(|p| p.name == name)
    }
}

impl ComplexType {
    /// Namespace-qualified name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Structural properties in declaration order.
    pub fn structural_properties(&self) -> impl Iterator<Item = &StructuralProperty> {
        self.properties.iter().filter_map(|p| match p {
            Property::Structural(s) => Some(s),
            Property::Navigation(_) => None,
        })
    }
}

impl EnumType {
    /// Namespace-qualified name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Find a member by name.
    pub fn find_member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

impl Property {
    /// Property name regardless of kind.
    pub fn name(&self) -> &str {
        match self {
            Self::Structural(s) => &s.name,
            Self::Navigation(n) => &n.name,
        }
    }
}

impl ContainerChild {
    /// Child name regardless of kind.
    pub fn name(&self) -> &str {
        match self {
            Self::EntitySet { name, .. }
            | Self::Singleton { name, .. }
            | Self::ActionImport { name, .. }
            | Self::FunctionImport { name, .. } => name,
        }
    }

    /// Annotations attached to this child.
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Self::EntitySet { annotations, .. }
            | Self::Singleton { annotations, .. }
            | Self::ActionImport { annotations, .. }
            | Self::FunctionImport { annotations, .. } => annotations,
        }
    }
}

impl EntityContainer {
    /// Namespace-qualified name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Find a container child by name.
    pub fn find_child(&self, name: &str) -> Option<&ContainerChild> {
        self.children.iter().find(|c| c.name() == name)
    }
}
