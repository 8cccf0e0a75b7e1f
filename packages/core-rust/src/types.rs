use std::fmt;

use serde::Serialize;

/// Opaque driver scalar carried through the mapper unchanged.
///
/// Covers the value kinds a database driver hands back for non-composite
/// attributes. The mapper never inspects these; it only distinguishes them
/// from composite and collection handles.
///
/// Serializes untagged, so a record of scalars becomes a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integral NUMBER that fits a signed 64-bit integer.
    Int(i64),
    /// Binary floating point (`BINARY_DOUBLE` and friends).
    Float(f64),
    /// String form of an exact NUMBER that does not fit `Int`.
    Decimal(String),
    /// Character data (VARCHAR2, CHAR, CLOB contents).
    String(String),
    /// Binary data (RAW, BLOB contents).
    Bytes(Vec<u8>),
    /// DATE / TIMESTAMP as milliseconds since the Unix epoch.
    Timestamp(i64),
}

impl Scalar {
    /// Returns `true` for SQL NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload, if this is an `Int`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the character payload for `String` and `Decimal`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Decimal(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) | Self::Timestamp(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Decimal(s) | Self::String(s) => f.write_str(s),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
