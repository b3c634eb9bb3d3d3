#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

//! # edm-model
//!
//! The Entity Data Model produced by the CSDL parser: a fully linked,
//! queryable graph of entity and complex types, enumerations, type
//! definitions, terms, operations, and entity containers.
//!
//! Elements link to each other by namespace-qualified name; the model
//! exposes lookup across its own schemas and its referenced sub-models.

/// Annotation bindings and constant/structured expressions.
pub mod annotation;
/// Schema element kinds: structured types, enums, terms, operations, containers.
pub mod element;
/// The top-level model container and version handling.
pub mod model;
/// The fixed Edm primitive-type catalog and facet families.
pub mod primitive;
/// Cross-document reference and include records.
pub mod reference;
/// Type references with collection, nullability, and facets.
pub mod typeref;

pub use annotation::{Annotation, Expression};
pub use element::{
    ComplexType, ContainerChild, ElementKind, EntityContainer, EntityType, EnumMember, EnumType,
    NavigationProperty, Operation, OperationKind, Parameter, Property, SchemaElement,
    StructuralProperty, Term, TypeDefinition,
};
pub use model::{CsdlVersion, EdmModel};
pub use primitive::PrimitiveKind;
pub use reference::{Include, IncludeAnnotations, Reference};
pub use typeref::{Facets, TypeKind, TypeReference};
