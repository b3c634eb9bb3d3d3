//! Type-name and facet resolution
//!
//! Turns a declared type name plus facet members into a
//! [`TypeReference`]: primitive catalog names get a primitive reference
//! carrying only the facets legal for that kind's family; anything else
//! must name an already-headered model element.

use crate::aliases::AliasMap;
use crate::{Error, Result};
use edm_model::{Facets, PrimitiveKind, TypeReference};
use edm_values::Value;

/// Read the facet members of a property-like object.
///
/// `$Scale` and `$SRID` may be the string `"variable"`; variable facets
/// are carried as unspecified.
pub fn parse_facets(object: &Value) -> Facets {
    Facets {
        max_length: object
            .get("$MaxLength")
            .and_then(Value::as_i64)
            .and_then(|v| u32::try_from(v).ok()),
        precision: object
            .get("$Precision")
            .and_then(Value::as_i64)
            .and_then(|v| u32::try_from(v).ok()),
        scale: object
            .get("$Scale")
            .and_then(Value::as_i64)
            .and_then(|v| u32::try_from(v).ok()),
        srid: object
            .get("$SRID")
            .and_then(Value::as_i64)
            .and_then(|v| u32::try_from(v).ok()),
        unicode: object.get("$Unicode").and_then(Value::as_bool),
    }
}

/// Resolve a declared type name into a reference.
///
/// The name is alias-rewritten first. Primitive names come from the
/// fixed catalog; any other name must satisfy `known` (a header in the
/// current pool or an element of a referenced model), else the reference
/// is unresolvable and the parse fails.
pub fn resolve_type_reference(
    name: &str,
    nullable: bool,
    is_collection: bool,
    facets: Facets,
    aliases: &AliasMap,
    known: &dyn Fn(&str) -> bool,
    path: &edm_values::Path,
) -> Result<TypeReference> {
    let qualified = aliases.rewrite(name);

    if let Some(kind) = PrimitiveKind::from_name(&qualified) {
        return Ok(TypeReference::primitive(kind, nullable, is_collection, facets));
    }

    if !known(&qualified) {
        return Err(Error::unresolved_type(qualified, path));
    }

    Ok(TypeReference::named(qualified, nullable, is_collection))
}

/// Build a type reference from a property-like object's `$Type`,
/// `$Collection`, `$Nullable`, and facet members. `$Type` defaults to
/// `Edm.String` and `$Nullable` to `false`.
pub fn type_reference_from_object(
    object: &Value,
    aliases: &AliasMap,
    known: &dyn Fn(&str) -> bool,
) -> Result<TypeReference> {
    let name = match object.get("$Type") {
        Some(ty) => ty.expect_str()?.to_string(),
        None => "Edm.String".to_string(),
    };
    let is_collection = object.get("$Collection").and_then(Value::as_bool).unwrap_or(false);
    let nullable = object.get("$Nullable").and_then(Value::as_bool).unwrap_or(false);
    let facets = parse_facets(object);

    resolve_type_reference(
        &name,
        nullable,
        is_collection,
        facets,
        aliases,
        known,
        &object.path,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use edm_model::TypeKind;
    use edm_values::Path;

    fn value(json: &str) -> Value {
        Value::from_json(&serde_json::from_str(json).unwrap())
    }

    fn no_aliases() -> AliasMap {
        AliasMap::new()
    }

    #[test]
    fn test_catalog_entries_resolve_without_facets() {
        for kind in PrimitiveKind::ALL {
            let reference = resolve_type_reference(
                &kind.name(),
                false,
                false,
                Facets::none(),
                &no_aliases(),
                &|_| false,
                &Path::root(),
            )
            .unwrap();
            assert_eq!(reference.primitive_kind(), Some(kind));
            assert!(reference.facets.is_empty());
        }
    }

    #[test]
    fn test_illegal_facets_are_dropped() {
        let object = value(r#"{"$Type": "Edm.Int32", "$MaxLength": 10, "$Precision": 5}"#);
        let reference = type_reference_from_object(&object, &no_aliases(), &|_| false).unwrap();
        assert!(reference.facets.is_empty());
    }

    #[test]
    fn test_string_facets_kept() {
        let object = value(r#"{"$MaxLength": 40, "$Unicode": false, "$SRID": 4326}"#);
        let reference = type_reference_from_object(&object, &no_aliases(), &|_| false).unwrap();
        assert_eq!(reference.primitive_kind(), Some(PrimitiveKind::String));
        assert_eq!(reference.facets.max_length, Some(40));
        assert_eq!(reference.facets.unicode, Some(false));
        assert!(reference.facets.srid.is_none());
    }

    #[test]
    fn test_variable_scale_carried_as_unspecified() {
        let object = value(r#"{"$Type": "Edm.Decimal", "$Precision": 10, "$Scale": "variable"}"#);
        let reference = type_reference_from_object(&object, &no_aliases(), &|_| false).unwrap();
        assert_eq!(reference.facets.precision, Some(10));
        assert!(reference.facets.scale.is_none());
    }

    #[test]
    fn test_defaults_to_nonnull_edm_string() {
        let object = value(r#"{}"#);
        let reference = type_reference_from_object(&object, &no_aliases(), &|_| false).unwrap();
        assert_eq!(reference.primitive_kind(), Some(PrimitiveKind::String));
        assert!(!reference.nullable);
        assert!(!reference.is_collection);
    }

    #[test]
    fn test_alias_rewrite_applies_to_collection_elements() {
        let mut aliases = AliasMap::new();
        aliases.insert("Self", "Acme.Model").unwrap();
        let object = value(r#"{"$Type": "Self.Address", "$Collection": true}"#);

        let reference =
            type_reference_from_object(&object, &aliases, &|name| name == "Acme.Model.Address")
                .unwrap();
        assert!(reference.is_collection);
        assert_eq!(reference.ty, TypeKind::Named("Acme.Model.Address".to_string()));
    }

    #[test]
    fn test_unknown_named_type_is_fatal() {
        let object = value(r#"{"$Type": "No.Such.Type"}"#);
        let err = type_reference_from_object(&object, &no_aliases(), &|_| false).unwrap_err();
        match err {
            Error::UnresolvedType { name, .. } => assert_eq!(name, "No.Such.Type"),
            e => panic!("Expected UnresolvedType error, got {e:?}"),
        }
    }
}
