//! Annotation bindings and their expression values

use serde::{Deserialize, Serialize};

/// An annotation applied to a model element, property, enum member,
/// or container child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Qualified term name (e.g. `Core.Description`)
    pub term: String,

    /// Optional qualifier distinguishing multiple applications of a term
    pub qualifier: Option<String>,

    /// The annotation value
    pub value: Expression,
}

/// Annotation expression values
///
/// Covers constant expressions plus the structural record/collection and
/// path forms. Dynamic expressions beyond `$Path` are carried as records
/// of their raw members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Boolean constant
    Bool(bool),

    /// Integer constant
    Int(i64),

    /// Floating-point constant
    Float(f64),

    /// String constant
    Str(String),

    /// Null constant
    Null,

    /// A `$Path` value expression
    Path(String),

    /// Record expression: ordered property-value pairs
    Record(Vec<(String, Expression)>),

    /// Collection expression
    Collection(Vec<Expression>),
}

impl Annotation {
    /// Create an annotation binding.
    pub fn new(term: impl Into<String>, qualifier: Option<String>, value: Expression) -> Self {
        Self {
            term: term.into(),
            qualifier,
            value,
        }
    }
}

impl Expression {
    /// String content, if this is a string constant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expression::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_binding() {
        let annotation = Annotation::new(
            "Core.Description",
            Some("en".to_string()),
            Expression::Str("warm".to_string()),
        );
        assert_eq!(annotation.term, "Core.Description");
        assert_eq!(annotation.qualifier.as_deref(), Some("en"));
        assert_eq!(annotation.value.as_str(), Some("warm"));
    }
}
