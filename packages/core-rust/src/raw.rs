//! Driver-side values as produced by an [`Executable`](crate::traits::Executable).
//!
//! A driver hands back one of three shapes: a plain scalar, a composite
//! (STRUCT) handle, or a collection (VARRAY / nested table) handle. SQL NULL
//! for any of them is [`RawValue::Scalar`] holding [`Scalar::Null`].

use crate::types::Scalar;

/// Opaque composite handle: the runtime type name plus positional attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawComposite {
    type_name: String,
    attributes: Vec<RawValue>,
}

impl RawComposite {
    #[must_use]
    pub fn new(type_name: impl Into<String>, attributes: Vec<RawValue>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes,
        }
    }

    /// Runtime (most-derived) type name reported by the driver.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Attribute values in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[RawValue] {
        &self.attributes
    }
}

/// Opaque collection handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCollection {
    elements: Vec<RawValue>,
}

impl RawCollection {
    #[must_use]
    pub fn new(elements: Vec<RawValue>) -> Self {
        Self { elements }
    }

    /// Elements in collection order.
    #[must_use]
    pub fn elements(&self) -> &[RawValue] {
        &self.elements
    }
}

/// Any value a driver can return for an attribute or output parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Scalar(Scalar),
    Composite(RawComposite),
    Collection(RawCollection),
}

impl RawValue {
    /// SQL NULL.
    #[must_use]
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Shorthand for a composite handle.
    #[must_use]
    pub fn composite(type_name: impl Into<String>, attributes: Vec<RawValue>) -> Self {
        Self::Composite(RawComposite::new(type_name, attributes))
    }

    /// Shorthand for a collection handle.
    #[must_use]
    pub fn collection(elements: Vec<RawValue>) -> Self {
        Self::Collection(RawCollection::new(elements))
    }

    /// Short label of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(Scalar::Null) => "null",
            Self::Scalar(_) => "scalar",
            Self::Composite(_) => "composite",
            Self::Collection(_) => "collection",
        }
    }
}

impl From<Scalar> for RawValue {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<RawComposite> for RawValue {
    fn from(v: RawComposite) -> Self {
        Self::Composite(v)
    }
}

impl From<RawCollection> for RawValue {
    fn from(v: RawCollection) -> Self {
        Self::Collection(v)
    }
}

macro_rules! raw_scalar_from {
    ($($t:ty),*) => {
        $(impl From<$t> for RawValue {
            fn from(v: $t) -> Self {
                Self::Scalar(Scalar::from(v))
            }
        })*
    };
}

raw_scalar_from!(i64, f64, bool, &str, String);
