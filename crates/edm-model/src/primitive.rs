//! The fixed Edm primitive-type catalog
//!
//! Maps canonical `Edm.*` names to primitive kinds and defines which
//! facet family each kind belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The built-in Edm primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    Stream,
    String,
    TimeOfDay,
    Geography,
    GeographyPoint,
    GeographyLineString,
    GeographyPolygon,
    GeographyMultiPoint,
    GeographyMultiLineString,
    GeographyMultiPolygon,
    GeographyCollection,
    Geometry,
    GeometryPoint,
    GeometryLineString,
    GeometryPolygon,
    GeometryMultiPoint,
    GeometryMultiLineString,
    GeometryMultiPolygon,
    GeometryCollection,
}

impl PrimitiveKind {
    /// Every catalog entry, in canonical order.
    pub const ALL: [PrimitiveKind; 33] = [
        Self::Binary,
        Self::Boolean,
        Self::Byte,
        Self::Date,
        Self::DateTimeOffset,
        Self::Decimal,
        Self::Double,
        Self::Duration,
        Self::Guid,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::SByte,
        Self::Single,
        Self::Stream,
        Self::String,
        Self::TimeOfDay,
        Self::Geography,
        Self::GeographyPoint,
        Self::GeographyLineString,
        Self::GeographyPolygon,
        Self::GeographyMultiPoint,
        Self::GeographyMultiLineString,
        Self::GeographyMultiPolygon,
        Self::GeographyCollection,
        Self::Geometry,
        Self::GeometryPoint,
        Self::GeometryLineString,
        Self::GeometryPolygon,
        Self::GeometryMultiPoint,
        Self::GeometryMultiLineString,
        Self::GeometryMultiPolygon,
        Self::GeometryCollection,
    ];

    /// Look up a catalog entry by its canonical `Edm.*` name.
    pub fn from_name(name: &str) -> Option<Self> {
        let unqualified = name.strip_prefix("Edm.")?;
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.unqualified_name() == unqualified)
    }

    /// Canonical namespace-qualified name (e.g. `Edm.Int32`).
    pub fn name(self) -> String {
        format!("Edm.{}", self.unqualified_name())
    }

    fn unqualified_name(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Date => "Date",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Duration => "Duration",
            Self::Guid => "Guid",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::SByte => "SByte",
            Self::Single => "Single",
            Self::Stream => "Stream",
            Self::String => "String",
            Self::TimeOfDay => "TimeOfDay",
            Self::Geography => "Geography",
            Self::GeographyPoint => "GeographyPoint",
            Self::GeographyLineString => "GeographyLineString",
            Self::GeographyPolygon => "GeographyPolygon",
            Self::GeographyMultiPoint => "GeographyMultiPoint",
            Self::GeographyMultiLineString => "GeographyMultiLineString",
            Self::GeographyMultiPolygon => "GeographyMultiPolygon",
            Self::GeographyCollection => "GeographyCollection",
            Self::Geometry => "Geometry",
            Self::GeometryPoint => "GeometryPoint",
            Self::GeometryLineString => "GeometryLineString",
            Self::GeometryPolygon => "GeometryPolygon",
            Self::GeometryMultiPoint => "GeometryMultiPoint",
            Self::GeometryMultiLineString => "GeometryMultiLineString",
            Self::GeometryMultiPolygon => "GeometryMultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }

    /// Whether this kind is one of the spatial (Geography/Geometry) types.
    pub fn is_spatial(self) -> bool {
        matches!(
            self,
            Self::Geography
                | Self::GeographyPoint
                | Self::GeographyLineString
                | Self::GeographyPolygon
                | Self::GeographyMultiPoint
                | Self::GeographyMultiLineString
                | Self::GeographyMultiPolygon
                | Self::GeographyCollection
                | Self::Geometry
                | Self::GeometryPoint
                | Self::GeometryLineString
                | Self::GeometryPolygon
                | Self::GeometryMultiPoint
                | Self::GeometryMultiLineString
                | Self::GeometryMultiPolygon
                | Self::GeometryCollection
        )
    }

    /// Whether this kind is a temporal type carrying sub-second precision.
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::DateTimeOffset | Self::Duration | Self::TimeOfDay)
    }

    /// Whether this kind can back an enumeration (whole-number types).
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::SByte | Self::Int16 | Self::Int32 | Self::Int64
        )
    }

    /// Kinds that accept a MaxLength facet.
    pub fn supports_max_length(self) -> bool {
        matches!(self, Self::Binary | Self::String)
    }

    /// Kinds that accept a Precision facet.
    pub fn supports_precision(self) -> bool {
        self.is_temporal() || self == Self::Decimal
    }

    /// Kinds that accept a Scale facet.
    pub fn supports_scale(self) -> bool {
        self == Self::Decimal
    }

    /// Kinds that accept a Unicode facet.
    pub fn supports_unicode(self) -> bool {
        self == Self::String
    }

    /// Kinds that accept an SRID facet.
    pub fn supports_srid(self) -> bool {
        self.is_spatial()
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edm.{}", self.unqualified_name())
    }
}
