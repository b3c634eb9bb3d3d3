//! Two-phase type graph construction
//!
//! The header pass creates a skeleton entry per schema item, resolving
//! only base-type identity. A base declared anywhere (later in the
//! document, in another schema, or in a referenced model) is headered
//! first by recursion, so declaration order never matters; completion
//! order is recorded and gives the body pass a base-before-derived
//! ordering. The body pass then populates properties, members, keys,
//! and type references, with every type name guaranteed a header to
//! point at.

use crate::aliases::AliasMap;
use crate::annotations::{collect_annotations, is_annotation_key};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::extract::{SchemaItem, SchemaItemKind};
use crate::typeref::{parse_facets, resolve_type_reference, type_reference_from_object};
use crate::{Error, Result};
use edm_model::{
    Annotation, ComplexType, ContainerChild, EdmModel, EntityContainer, EntityType, EnumMember,
    EnumType, NavigationProperty, Operation, OperationKind, Parameter, PrimitiveKind, Property,
    SchemaElement, StructuralProperty, Term, TypeDefinition,
};
use edm_values::{Primitive, Value, ValueKind};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Skeleton entry created by the header pass
#[derive(Debug, Clone)]
enum Header {
    Structured {
        /// Resolved qualified base-type name, if derived
        base: Option<String>,
        is_abstract: bool,
        is_open: bool,
        has_stream: bool,
    },
    Enum {
        underlying: PrimitiveKind,
        is_flags: bool,
    },
    Simple,
}

/// Builds the elements of one document from its extracted schema items
pub struct ModelBuilder<'a> {
    items: HashMap<String, SchemaItem>,
    item_order: Vec<String>,
    headers: HashMap<String, Header>,
    build_order: Vec<String>,
    in_progress: HashSet<String>,
    aliases: &'a AliasMap,
    referenced: &'a [EdmModel],
    /// Qualified names from every document of the root parse. Covers
    /// names owned by a document still being parsed further up the
    /// reference graph (cycles), which the `referenced` list cannot see.
    shared_pool: &'a HashSet<String>,
    /// Namespaces promised by includes whose documents were not loaded
    /// (built-in vocabularies, or loading disabled). Names into these
    /// namespaces are accepted without an element to point at.
    promised_namespaces: &'a HashSet<String>,
}

impl<'a> ModelBuilder<'a> {
    /// Create a builder over the given alias table, referenced models,
    /// and root-parse name pools.
    pub fn new(
        aliases: &'a AliasMap,
        referenced: &'a [EdmModel],
        shared_pool: &'a HashSet<String>,
        promised_namespaces: &'a HashSet<String>,
    ) -> Self {
        Self {
            items: HashMap::new(),
            item_order: Vec::new(),
            headers: HashMap::new(),
            build_order: Vec::new(),
            in_progress: HashSet::new(),
            aliases,
            referenced,
            shared_pool,
            promised_namespaces,
        }
    }

    /// Add an extracted schema item to the pool.
    pub fn add_item(&mut self, item: SchemaItem) -> Result<()> {
        let full_name = item.full_name();
        if self.items.contains_key(&full_name) {
            return Err(Error::malformed(
                item.path(),
                format!("duplicate schema element '{full_name}'"),
            ));
        }
        self.item_order.push(full_name.clone());
        self.items.insert(full_name, item);
        Ok(())
    }

    /// Run both passes and the out-of-line annotation attach, producing
    /// the document's elements keyed by qualified name.
    pub fn build(
        mut self,
        out_of_line: &[(String, Value)],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<HashMap<String, SchemaElement>> {
        // Header pass: every item gets a skeleton before any body runs.
        for full_name in self.item_order.clone() {
            self.ensure_header(&full_name)?;
        }
        debug!(items = self.build_order.len(), "header pass complete");

        // Body pass, in recorded order so bases precede derived types.
        let mut elements: HashMap<String, SchemaElement> = HashMap::new();
        for full_name in self.build_order.clone() {
            let item = &self.items[&full_name];
            let element = self.build_body(item, &elements, diagnostics)?;
            trace!(element = %full_name, "built element body");
            elements.insert(full_name, element);
        }

        self.attach_out_of_line(&mut elements, out_of_line, diagnostics)?;

        Ok(elements)
    }

    /// Whether a qualified name has a header, names a referenced
    /// element, or belongs to another document of this root parse.
    fn is_known_type(&self, qualified_name: &str) -> bool {
        self.headers.contains_key(qualified_name)
            || self.shared_pool.contains(qualified_name)
            || self
                .referenced
                .iter()
                .any(|model| model.find_element(qualified_name).is_some())
            || self.promised_namespaces.iter().any(|namespace| {
                qualified_name
                    .strip_prefix(namespace.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
            })
    }

    /// Header pass for one item. Idempotent: re-invocation during
    /// recursive base resolution is a no-op.
    fn ensure_header(&mut self, full_name: &str) -> Result<()> {
        if self.headers.contains_key(full_name) {
            return Ok(());
        }
        if !self.in_progress.insert(full_name.to_string()) {
            return Err(Error::CircularBaseType {
                name: full_name.to_string(),
            });
        }

        let item = self.items[full_name].clone();
        let header = match item.kind {
            SchemaItemKind::EntityType | SchemaItemKind::ComplexType => {
                let base = match item.value.get("$BaseType") {
                    Some(base) => {
                        let declared = base.expect_str()?;
                        let qualified = self.aliases.rewrite(declared);
                        if self.items.contains_key(&qualified) {
                            // Base declared in this document: header it first.
                            self.ensure_header(&qualified)?;
                        } else if !self.is_known_type(&qualified) {
                            return Err(Error::UnresolvedBaseType {
                                name: qualified,
                                path: base.path.to_string(),
                            });
                        }
                        Some(qualified)
                    }
                    None => None,
                };
                Header::Structured {
                    base,
                    is_abstract: flag(&item.value, "$Abstract"),
                    is_open: flag(&item.value, "$OpenType"),
                    has_stream: flag(&item.value, "$HasStream"),
                }
            }
            SchemaItemKind::EnumType => {
                let underlying = match item.value.get("$UnderlyingType") {
                    Some(declared) => {
                        let name = declared.expect_str()?;
                        match PrimitiveKind::from_name(name).filter(|kind| kind.is_integer()) {
                            Some(kind) => kind,
                            None => {
                                return Err(Error::malformed(
                                    &declared.path,
                                    format!("'{name}' cannot underlie an enumeration"),
                                ));
                            }
                        }
                    }
                    None => PrimitiveKind::Int32,
                };
                Header::Enum {
                    underlying,
                    is_flags: flag(&item.value, "$IsFlags"),
                }
            }
            SchemaItemKind::TypeDefinition
            | SchemaItemKind::Term
            | SchemaItemKind::Action
            | SchemaItemKind::Function
            | SchemaItemKind::EntityContainer => Header::Simple,
        };

        self.in_progress.remove(full_name);
        self.headers.insert(full_name.to_string(), header);
        self.build_order.push(full_name.to_string());
        Ok(())
    }

    /// Body pass for one item.
    fn build_body(
        &self,
        item: &SchemaItem,
        elements: &HashMap<String, SchemaElement>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<SchemaElement> {
        match item.kind {
            SchemaItemKind::EntityType | SchemaItemKind::ComplexType => {
                self.build_structured(item, elements, diagnostics)
            }
            SchemaItemKind::EnumType => self.build_enum(item, diagnostics),
            SchemaItemKind::TypeDefinition => self.build_type_definition(item, diagnostics),
            SchemaItemKind::Term => self.build_term(item, diagnostics),
            SchemaItemKind::Action => self.build_operation(item, OperationKind::Action, diagnostics),
            SchemaItemKind::Function => {
                self.build_operation(item, OperationKind::Function, diagnostics)
            }
            SchemaItemKind::EntityContainer => self.build_container(item, diagnostics),
        }
    }

    fn build_structured(
        &self,
        item: &SchemaItem,
        elements: &HashMap<String, SchemaElement>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<SchemaElement> {
        const RESERVED: [&str; 6] = [
            "$Kind",
            "$BaseType",
            "$Abstract",
            "$OpenType",
            "$HasStream",
            "$Key",
        ];

        let full_name = item.full_name();
        let Header::Structured {
            base,
            is_abstract,
            is_open,
            has_stream,
        } = self.headers[&full_name].clone()
        else {
            unreachable!("structured item headered as structured");
        };

        let members = item.value.expect_object()?;
        let known = |name: &str| self.is_known_type(name);
        let mut properties: Vec<Property> = Vec::new();

        for (name, value) in members {
            if RESERVED.contains(&name.as_str()) || is_annotation_key(name) {
                continue;
            }
            if !value.is_object() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnknownMember,
                    format!("member '{name}' of '{full_name}' is not a property object"),
                    &value.path,
                ));
                continue;
            }
            if value.get("$Kind").and_then(Value::as_str) == Some("NavigationProperty") {
                properties.push(Property::Navigation(
                    self.build_navigation_property(name, value)?,
                ));
            } else {
                properties.push(Property::Structural(StructuralProperty {
                    name: name.clone(),
                    ty: type_reference_from_object(value, self.aliases, &known)?,
                    default_value: value.get("$DefaultValue").and_then(default_value_text),
                    annotations: Vec::new(),
                }));
            }
        }

        // Property annotations attach once all properties of the type exist.
        let pending = collect_annotations(members, diagnostics);
        let mut own_annotations = Vec::new();
        for binding in pending {
            if binding.target.is_empty() {
                own_annotations.push(binding.annotation);
                continue;
            }
            match properties.iter_mut().find(|p| p.name() == binding.target) {
                Some(Property::Structural(property)) => {
                    property.annotations.push(binding.annotation);
                }
                Some(Property::Navigation(property)) => {
                    property.annotations.push(binding.annotation);
                }
                None => {
                    return Err(Error::AnnotationTargetNotFound {
                        target: binding.target,
                        path: binding.path,
                    });
                }
            }
        }

        if item.kind == SchemaItemKind::ComplexType {
            return Ok(SchemaElement::Complex(ComplexType {
                namespace: item.namespace.clone(),
                name: item.name.clone(),
                base_type: base,
                is_abstract,
                is_open,
                properties,
                annotations: own_annotations,
            }));
        }

        // $Key resolves after all properties are in place, against own
        // and inherited structural properties.
        let mut key = Vec::new();
        if let Some(declared) = item.value.get("$Key") {
            for entry in declared.expect_array()? {
                let name = entry.expect_str()?;
                let declared_here = properties.iter().any(|p| match p {
                    Property::Structural(s) => s.name == name,
                    Property::Navigation(_) => false,
                });
                let inherited = base
                    .as_deref()
                    .is_some_and(|b| self.structural_property_on_chain(elements, b, name));
                if !declared_here && !inherited {
                    return Err(Error::UnresolvedKeyProperty {
                        key: name.to_string(),
                        type_name: full_name,
                    });
                }
                key.push(name.to_string());
            }
        }

        Ok(SchemaElement::Entity(EntityType {
            namespace: item.namespace.clone(),
            name: item.name.clone(),
            base_type: base,
            is_abstract,
            is_open,
            has_stream,
            key,
            properties,
            annotations: own_annotations,
        }))
    }

    fn build_navigation_property(&self, name: &str, value: &Value) -> Result<NavigationProperty> {
        let declared = value.require("$Type")?.expect_str()?;
        let is_collection = flag(value, "$Collection");
        let nullable = flag(value, "$Nullable");
        let known = |name: &str| self.is_known_type(name);
        let ty = resolve_type_reference(
            declared,
            nullable,
            is_collection,
            edm_model::Facets::none(),
            self.aliases,
            &known,
            &value.path,
        )?;

        let mut referential_constraints = Vec::new();
        if let Some(constraints) = value.get("$ReferentialConstraint") {
            for (dependent, principal) in constraints.expect_object()? {
                if is_annotation_key(dependent) {
                    continue;
                }
                referential_constraints
                    .push((dependent.clone(), principal.expect_str()?.to_string()));
            }
        }

        Ok(NavigationProperty {
            name: name.to_string(),
            ty,
            partner: value.get("$Partner").and_then(Value::as_str).map(String::from),
            contains_target: flag(value, "$ContainsTarget"),
            on_delete: value.get("$OnDelete").and_then(Value::as_str).map(String::from),
            referential_constraints,
            annotations: Vec::new(),
        })
    }

    fn build_enum(
        &self,
        item: &SchemaItem,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<SchemaElement> {
        const RESERVED: [&str; 3] = ["$Kind", "$UnderlyingType", "$IsFlags"];

        let full_name = item.full_name();
        let Header::Enum {
            underlying,
            is_flags,
        } = self.headers[&full_name].clone()
        else {
            unreachable!("enum item headered as enum");
        };

        let members = item.value.expect_object()?;
        let mut enum_members: Vec<EnumMember> = Vec::new();
        for (name, value) in members {
            if RESERVED.contains(&name.as_str()) || is_annotation_key(name) {
                continue;
            }
            enum_members.push(EnumMember {
                name: name.clone(),
                value: value.expect_i64()?,
                annotations: Vec::new(),
            });
        }

        let pending = collect_annotations(members, diagnostics);
        let mut own_annotations = Vec::new();
        for binding in pending {
            if binding.target.is_empty() {
                own_annotations.push(binding.annotation);
                continue;
            }
            match enum_members.iter_mut().find(|m| m.name == binding.target) {
                Some(member) => member.annotations.push(binding.annotation),
                None => {
                    return Err(Error::AnnotationTargetNotFound {
                        target: binding.target,
                        path: binding.path,
                    });
                }
            }
        }

        Ok(SchemaElement::Enum(EnumType {
            namespace: item.namespace.clone(),
            name: item.name.clone(),
            underlying,
            is_flags,
            members: enum_members,
            annotations: own_annotations,
        }))
    }

    fn build_type_definition(
        &self,
        item: &SchemaItem,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<SchemaElement> {
        let declared = item.value.require("$UnderlyingType")?;
        let name = declared.expect_str()?;
        let Some(underlying) = PrimitiveKind::from_name(name) else {
            return Err(Error::malformed(
                &declared.path,
                format!("type definition underlying type '{name}' is not primitive"),
            ));
        };

        let members = item.value.expect_object()?;
        let own_annotations = self.element_annotations(members, diagnostics)?;

        Ok(SchemaElement::TypeDefinition(TypeDefinition {
            namespace: item.namespace.clone(),
            name: item.name.clone(),
            underlying,
            facets: parse_facets(&item.value).restrict_to(underlying),
            annotations: own_annotations,
        }))
    }

    fn build_term(
        &self,
        item: &SchemaItem,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<SchemaElement> {
        let known = |name: &str| self.is_known_type(name);
        let ty = type_reference_from_object(&item.value, self.aliases, &known)?;

        let mut applies_to = Vec::new();
        if let Some(declared) = item.value.get("$AppliesTo") {
            for entry in declared.expect_array()? {
                applies_to.push(entry.expect_str()?.to_string());
            }
        }

        let members = item.value.expect_object()?;
        let own_annotations = self.element_annotations(members, diagnostics)?;

        Ok(SchemaElement::Term(Term {
            namespace: item.namespace.clone(),
            name: item.name.clone(),
            ty,
            applies_to,
            default_value: item.value.get("$DefaultValue").and_then(default_value_text),
            annotations: own_annotations,
        }))
    }

    fn build_operation(
        &self,
        item: &SchemaItem,
        kind: OperationKind,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<SchemaElement> {
        let known = |name: &str| self.is_known_type(name);

        let mut parameters = Vec::new();
        if let Some(declared) = item.value.get("$Parameter") {
            for entry in declared.expect_array()? {
                parameters.push(Parameter {
                    name: entry.require("$Name")?.expect_str()?.to_string(),
                    ty: type_reference_from_object(entry, self.aliases, &known)?,
                    annotations: Vec::new(),
                });
            }
        }

        let return_type = match item.value.get("$ReturnType") {
            Some(declared) => Some(type_reference_from_object(declared, self.aliases, &known)?),
            None => None,
        };

        let members = item.value.expect_object()?;
        let own_annotations = self.element_annotations(members, diagnostics)?;

        let operation = Operation {
            namespace: item.namespace.clone(),
            name: item.name.clone(),
            kind,
            is_bound: flag(&item.value, "$IsBound"),
            entity_set_path: item
                .value
                .get("$EntitySetPath")
                .and_then(Value::as_str)
                .map(String::from),
            is_composable: flag(&item.value, "$IsComposable"),
            parameters,
            return_type,
            annotations: own_annotations,
        };

        Ok(match kind {
            OperationKind::Action => SchemaElement::Action(operation),
            OperationKind::Function => SchemaElement::Function(operation),
        })
    }

    fn build_container(
        &self,
        item: &SchemaItem,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<SchemaElement> {
        const RESERVED: [&str; 2] = ["$Kind", "$Extends"];

        let full_name = item.full_name();
        let members = item.value.expect_object()?;
        let mut children: Vec<ContainerChild> = Vec::new();

        for (name, value) in members {
            if RESERVED.contains(&name.as_str()) || is_annotation_key(name) {
                continue;
            }
            if !value.is_object() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnknownMember,
                    format!("member '{name}' of container '{full_name}' is not an object"),
                    &value.path,
                ));
                continue;
            }
            // Operation import first, then navigation source.
            children.push(if let Some(action) = value.get("$Action") {
                ContainerChild::ActionImport {
                    name: name.clone(),
                    action: self.aliases.rewrite(action.expect_str()?),
                    entity_set: value.get("$EntitySet").and_then(Value::as_str).map(String::from),
                    annotations: Vec::new(),
                }
            } else if let Some(function) = value.get("$Function") {
                ContainerChild::FunctionImport {
                    name: name.clone(),
                    function: self.aliases.rewrite(function.expect_str()?),
                    entity_set: value.get("$EntitySet").and_then(Value::as_str).map(String::from),
                    annotations: Vec::new(),
                }
            } else {
                let declared = value.require("$Type")?;
                let target = self.aliases.rewrite(declared.expect_str()?);
                if !self.is_known_type(&target) {
                    return Err(Error::unresolved_type(target, &declared.path));
                }
                let navigation_bindings = match value.get("$NavigationPropertyBinding") {
                    Some(bindings) => bindings
                        .expect_object()?
                        .iter()
                        .filter_map(|(path, target)| {
                            target.as_str().map(|t| (path.clone(), t.to_string()))
                        })
                        .collect(),
                    None => HashMap::new(),
                };
                if flag(value, "$Collection") {
                    ContainerChild::EntitySet {
                        name: name.clone(),
                        entity_type: target,
                        navigation_bindings,
                        annotations: Vec::new(),
                    }
                } else {
                    ContainerChild::Singleton {
                        name: name.clone(),
                        ty: target,
                        navigation_bindings,
                        annotations: Vec::new(),
                    }
                }
            });
        }

        let pending = collect_annotations(members, diagnostics);
        let mut own_annotations = Vec::new();
        for binding in pending {
            if binding.target.is_empty() {
                own_annotations.push(binding.annotation);
                continue;
            }
            match children.iter_mut().find(|c| c.name() == binding.target) {
                Some(child) => push_child_annotation(child, binding.annotation),
                None => {
                    return Err(Error::AnnotationTargetNotFound {
                        target: binding.target,
                        path: binding.path,
                    });
                }
            }
        }

        Ok(SchemaElement::Container(EntityContainer {
            namespace: item.namespace.clone(),
            name: item.name.clone(),
            extends: match item.value.get("$Extends") {
                Some(extends) => Some(self.aliases.rewrite(extends.expect_str()?)),
                None => None,
            },
            children,
            annotations: own_annotations,
        }))
    }

    /// Annotations of an element without annotatable members: only the
    /// bare `@Term` form can match.
    fn element_annotations(
        &self,
        members: &[(String, Value)],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<Annotation>> {
        let mut annotations = Vec::new();
        for binding in collect_annotations(members, diagnostics) {
            if binding.target.is_empty() {
                annotations.push(binding.annotation);
            } else {
                return Err(Error::AnnotationTargetNotFound {
                    target: binding.target,
                    path: binding.path,
                });
            }
        }
        Ok(annotations)
    }

    /// Whether a structural property exists on a built type or anywhere
    /// up its base chain (own elements first, then referenced models).
    fn structural_property_on_chain(
        &self,
        elements: &HashMap<String, SchemaElement>,
        type_name: &str,
        property: &str,
    ) -> bool {
        let mut current = Some(type_name.to_string());
        while let Some(name) = current {
            let element = elements
                .get(&name)
                .or_else(|| self.referenced.iter().find_map(|m| m.find_element(&name)));
            current = match element {
                Some(SchemaElement::Entity(entity)) => {
                    if entity.find_property(property).is_some() {
                        return true;
                    }
                    entity.base_type.clone()
                }
                Some(SchemaElement::Complex(complex)) => {
                    if complex.structural_properties().any(|p| p.name == property) {
                        return true;
                    }
                    complex.base_type.clone()
                }
                _ => None,
            };
        }
        false
    }

    /// Attach out-of-line `$Annotations` bodies once every element exists.
    fn attach_out_of_line(
        &self,
        elements: &mut HashMap<String, SchemaElement>,
        out_of_line: &[(String, Value)],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        for (target, body) in out_of_line {
            let qualified = self.aliases.rewrite(target);
            let (element_name, member_name) = match qualified.split_once('/') {
                Some((element, member)) => (element.to_string(), Some(member.to_string())),
                None => (qualified.clone(), None),
            };

            let mut annotations = Vec::new();
            for binding in collect_annotations(body.expect_object()?, diagnostics) {
                if binding.target.is_empty() {
                    annotations.push(binding.annotation);
                } else {
                    return Err(Error::AnnotationTargetNotFound {
                        target: binding.target,
                        path: binding.path,
                    });
                }
            }

            let Some(element) = elements.get_mut(&element_name) else {
                // Referenced models are read-only; their elements cannot
                // receive annotations from this document.
                if self
                    .referenced
                    .iter()
                    .any(|m| m.find_element(&element_name).is_some())
                {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::UnsupportedAnnotation,
                        format!("annotation target '{qualified}' lives in a referenced document"),
                        &body.path,
                    ));
                    continue;
                }
                return Err(Error::AnnotationTargetNotFound {
                    target: qualified,
                    path: body.path.to_string(),
                });
            };

            attach_to_element(element, member_name.as_deref(), annotations, &qualified, body)?;
        }
        Ok(())
    }
}

/// Attach a batch of annotations to an element or one of its members.
fn attach_to_element(
    element: &mut SchemaElement,
    member: Option<&str>,
    annotations: Vec<Annotation>,
    target: &str,
    body: &Value,
) -> Result<()> {
    let not_found = || Error::AnnotationTargetNotFound {
        target: target.to_string(),
        path: body.path.to_string(),
    };

    let Some(member) = member else {
        match element {
            SchemaElement::Entity(e) => e.annotations.extend(annotations),
            SchemaElement::Complex(c) => c.annotations.extend(annotations),
            SchemaElement::Enum(e) => e.annotations.extend(annotations),
            SchemaElement::TypeDefinition(t) => t.annotations.extend(annotations),
            SchemaElement::Term(t) => t.annotations.extend(annotations),
            SchemaElement::Action(o) | SchemaElement::Function(o) => {
                o.annotations.extend(annotations);
            }
            SchemaElement::Container(c) => c.annotations.extend(annotations),
        }
        return Ok(());
    };

    match element {
        SchemaElement::Entity(entity) => {
            match entity.properties.iter_mut().find(|p| p.name() == member) {
                Some(Property::Structural(p)) => p.annotations.extend(annotations),
                Some(Property::Navigation(p)) => p.annotations.extend(annotations),
                None => return Err(not_found()),
            }
        }
        SchemaElement::Complex(complex) => {
            match complex.properties.iter_mut().find(|p| p.name() == member) {
                Some(Property::Structural(p)) => p.annotations.extend(annotations),
                Some(Property::Navigation(p)) => p.annotations.extend(annotations),
                None => return Err(not_found()),
            }
        }
        SchemaElement::Enum(enumeration) => {
            match enumeration.members.iter_mut().find(|m| m.name == member) {
                Some(enum_member) => enum_member.annotations.extend(annotations),
                None => return Err(not_found()),
            }
        }
        SchemaElement::Container(container) => {
            match container.children.iter_mut().find(|c| c.name() == member) {
                Some(child) => {
                    for annotation in annotations {
                        push_child_annotation(child, annotation);
                    }
                }
                None => return Err(not_found()),
            }
        }
        _ => return Err(not_found()),
    }
    Ok(())
}

fn push_child_annotation(child: &mut ContainerChild, annotation: Annotation) {
    match child {
        ContainerChild::EntitySet { annotations, .. }
        | ContainerChild::Singleton { annotations, .. }
        | ContainerChild::ActionImport { annotations, .. }
        | ContainerChild::FunctionImport { annotations, .. } => annotations.push(annotation),
    }
}

/// Boolean member with a `false` default.
fn flag(object: &Value, name: &str) -> bool {
    object.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// `$DefaultValue` as literal text. Numeric and boolean defaults keep
/// their display form; null and structured values carry no default text.
fn default_value_text(value: &Value) -> Option<String> {
    match &value.kind {
        ValueKind::Primitive(Primitive::String(s)) => Some(s.clone()),
        ValueKind::Primitive(Primitive::Integer(i)) => Some(i.to_string()),
        ValueKind::Primitive(Primitive::Decimal(d)) => Some(d.to_string()),
        ValueKind::Primitive(Primitive::Boolean(b)) => Some(b.to_string()),
        ValueKind::Primitive(Primitive::Null) => None,
        ValueKind::Object(_) | ValueKind::Array(_) => None,
    }
}
