//! The tagged value tree the parser operates on

use crate::path::Path;
use crate::{Error, Result};

/// A node in the value tree, carrying its source path
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// Where this value sits in the document
    pub path: Path,

    /// The value itself
    pub kind: ValueKind,
}

/// The three structural shapes a value can take
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// Object members in document order
    Object(Vec<(String, Value)>),

    /// Array elements
    Array(Vec<Value>),

    /// A leaf value
    Primitive(Primitive),
}

/// Leaf values
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// String value
    String(String),

    /// Integer value
    Integer(i64),

    /// Floating-point value
    Decimal(f64),

    /// Boolean value
    Boolean(bool),

    /// Null value
    Null,
}

impl Value {
    /// Materialize a tree from a parsed JSON document, threading paths.
    pub fn from_json(json: &serde_json::Value) -> Self {
        Self::from_json_at(json, Path::root())
    }

    fn from_json_at(json: &serde_json::Value, path: Path) -> Self {
        let kind = match json {
            serde_json::Value::Object(members) => ValueKind::Object(
                members
                    .iter()
                    .map(|(name, value)| {
                        let child = Self::from_json_at(value, path.member(name));
                        (name.clone(), child)
                    })
                    .collect(),
            ),
            serde_json::Value::Array(elements) => ValueKind::Array(
                elements
                    .iter()
                    .enumerate()
                    .map(|(i, value)| Self::from_json_at(value, path.index(i)))
                    .collect(),
            ),
            serde_json::Value::String(s) => ValueKind::Primitive(Primitive::String(s.clone())),
            serde_json::Value::Bool(b) => ValueKind::Primitive(Primitive::Boolean(*b)),
            serde_json::Value::Null => ValueKind::Primitive(Primitive::Null),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ValueKind::Primitive(Primitive::Integer(i))
                } else {
                    ValueKind::Primitive(Primitive::Decimal(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
        };
        Self { path, kind }
    }

    /// Human-readable shape name, used in type-mismatch diagnostics.
    pub fn shape(&self) -> &'static str {
        match &self.kind {
            ValueKind::Object(_) => "object",
            ValueKind::Array(_) => "array",
            ValueKind::Primitive(Primitive::String(_)) => "string",
            ValueKind::Primitive(Primitive::Integer(_)) => "integer",
            ValueKind::Primitive(Primitive::Decimal(_)) => "number",
            ValueKind::Primitive(Primitive::Boolean(_)) => "boolean",
            ValueKind::Primitive(Primitive::Null) => "null",
        }
    }

    /// Object members, if this is an object.
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match &self.kind {
            ValueKind::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Array elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.kind {
            ValueKind::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// String content, if this is a string primitive.
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::Primitive(Primitive::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean primitive.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.kind {
            ValueKind::Primitive(Primitive::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Integer content, if this is an integer primitive.
    pub fn as_i64(&self) -> Option<i64> {
        match &self.kind {
            ValueKind::Primitive(Primitive::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Floating-point content for integer or decimal primitives.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.kind {
            ValueKind::Primitive(Primitive::Decimal(d)) => Some(*d),
            ValueKind::Primitive(Primitive::Integer(i)) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(&self.kind, ValueKind::Object(_))
    }

    /// Look up an object member by name. Linear scan: schema objects are
    /// small and member order must be preserved.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }

    /// Object members, or a type-mismatch error.
    pub fn expect_object(&self) -> Result<&[(String, Value)]> {
        self.as_object()
            .ok_or_else(|| Error::type_mismatch(&self.path, "object", self.shape()))
    }

    /// Array elements, or a type-mismatch error.
    pub fn expect_array(&self) -> Result<&[Value]> {
        self.as_array()
            .ok_or_else(|| Error::type_mismatch(&self.path, "array", self.shape()))
    }

    /// String content, or a type-mismatch error.
    pub fn expect_str(&self) -> Result<&str> {
        self.as_str()
            .ok_or_else(|| Error::type_mismatch(&self.path, "string", self.shape()))
    }

    /// Boolean content, or a type-mismatch error.
    pub fn expect_bool(&self) -> Result<bool> {
        self.as_bool()
            .ok_or_else(|| Error::type_mismatch(&self.path, "boolean", self.shape()))
    }

    /// Integer content, or a type-mismatch error.
    pub fn expect_i64(&self) -> Result<i64> {
        self.as_i64()
            .ok_or_else(|| Error::type_mismatch(&self.path, "integer", self.shape()))
    }

    /// A required object member, or a missing-member error.
    pub fn require(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| Error::missing_member(&self.path, name))
    }
}

impl Primitive {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Primitive::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> Value {
        Value::from_json(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_from_json_preserves_member_order() {
        let value = tree(r#"{"Zeta": 1, "Alpha": 2, "Mid": 3}"#);
        let names: Vec<&str> = value
            .as_object()
            .unwrap()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_from_json_threads_paths() {
        let value = tree(r#"{"Items": [{"Name": "a"}]}"#);
        let name = value
            .get("Items")
            .unwrap()
            .as_array()
            .unwrap()[0]
            .get("Name")
            .unwrap();
        assert_eq!(name.path.to_string(), "$.Items[0].Name");
    }

    #[test]
    fn test_primitive_classification() {
        let value = tree(r#"{"s": "x", "i": 4, "d": 1.5, "b": true, "n": null}"#);
        assert_eq!(value.get("s").unwrap().as_str(), Some("x"));
        assert_eq!(value.get("i").unwrap().as_i64(), Some(4));
        assert_eq!(value.get("d").unwrap().as_f64(), Some(1.5));
        assert_eq!(value.get("b").unwrap().as_bool(), Some(true));
        assert!(matches!(
            value.get("n").unwrap().kind,
            ValueKind::Primitive(Primitive::Null)
        ));
    }

    #[test]
    fn test_integer_widens_to_f64() {
        let value = tree(r#"{"i": 4}"#);
        assert_eq!(value.get("i").unwrap().as_f64(), Some(4.0));
    }

    #[test]
    fn test_expect_object_mismatch_reports_path() {
        let value = tree(r#"{"a": [1]}"#);
        let err = value.get("a").unwrap().expect_object().unwrap_err();
        match err {
            Error::TypeMismatch {
                path,
                expected,
                found,
            } => {
                assert_eq!(path, "$.a");
                assert_eq!(expected, "object");
                assert_eq!(found, "array");
            }
            e => panic!("Expected TypeMismatch error, got {e:?}"),
        }
    }

    #[test]
    fn test_require_missing_member() {
        let value = tree(r#"{"a": 1}"#);
        let err = value.require("b").unwrap_err();
        assert!(matches!(err, Error::MissingMember { .. }));
    }

    #[test]
    fn test_get_on_non_object() {
        let value = tree(r#"[1, 2]"#);
        assert!(value.get("a").is_none());
    }
}
