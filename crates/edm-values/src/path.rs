//! Document paths for error reporting

use std::fmt;

/// A single step into an object or array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member name
    Member(String),

    /// Array index
    Index(usize),
}

/// Path from the document root to a value
///
/// Rendered as `$.Reference.Includes[0].Namespace` in diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Create a path pointing at the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path with an object member name.
    pub fn member(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Member(name.into()));
        Self { segments }
    }

    /// Extend the path with an array index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Last member name on the path, if any.
    pub fn leaf_member(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            Segment::Member(name) => Some(name.as_str()),
            Segment::Index(_) => None,
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                Segment::Member(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
