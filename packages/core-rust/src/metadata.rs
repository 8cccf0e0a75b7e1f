//! Catalog description of a composite type's attributes.

use serde::{Deserialize, Serialize};

/// Declared type names treated as plain scalars by [`AttributeMetadata::is_nested_composite`].
pub const SCALAR_TYPE_NAMES: [&str; 3] = ["NUMBER", "VARCHAR2", "DATE"];

/// One attribute of a composite type, as declared in the catalog.
///
/// Instances are immutable once loaded; the cache hands out shared slices of
/// them and never mutates an entry in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeMetadata {
    /// Attribute name exactly as the catalog reports it (usually upper case).
    pub name: String,
    /// Name of the attribute's declared type (`NUMBER`, `ADDRESS_T`, ...).
    pub declared_type_name: String,
    /// Whether the declared type is registered as a collection type.
    pub is_collection: bool,
}

impl AttributeMetadata {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        declared_type_name: impl Into<String>,
        is_collection: bool,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type_name: declared_type_name.into(),
            is_collection,
        }
    }

    /// Returns `true` when the attribute holds a nested composite value.
    ///
    /// Holds iff the attribute is not a collection and its declared type is
    /// not one of [`SCALAR_TYPE_NAMES`] (compared case-insensitively).
    #[must_use]
    pub fn is_nested_composite(&self) -> bool {
        !self.is_collection
            && !SCALAR_TYPE_NAMES
                .iter()
                .any(|scalar| self.declared_type_name.eq_ignore_ascii_case(scalar))
    }

    /// Output key for this attribute in a mapped record.
    #[must_use]
    pub fn record_key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn scalar_types_are_not_nested() {
        for name in ["NUMBER", "varchar2", "Date"] {
            assert!(!AttributeMetadata::new("A", name, false).is_nested_composite());
        }
    }

    #[test]
    fn user_type_is_nested() {
        assert!(AttributeMetadata::new("ADDR", "ADDRESS_T", false).is_nested_composite());
    }

    #[test]
    fn collection_is_never_nested() {
        assert!(!AttributeMetadata::new("LINES", "LINE_TAB", true).is_nested_composite());
    }

    #[test]
    fn record_key_is_lower_case() {
        assert_eq!(
            AttributeMetadata::new("CUSTOMER_ID", "NUMBER", false).record_key(),
            "customer_id"
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(AttributeMetadata::new("A", "NUMBER", false)).unwrap();
        assert_eq!(json["declaredTypeName"], "NUMBER");
        assert_eq!(json["isCollection"], false);
    }

    fn case_variants(base: &'static str) -> impl Strategy<Value = String> {
        proptest::collection::vec(any::<bool>(), base.len()).prop_map(move |upper| {
            base.chars()
                .zip(upper)
                .map(|(c, u)| {
                    if u {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn nested_iff_not_collection_and_not_scalar(
            type_name in "[A-Za-z_][A-Za-z0-9_]{0,12}",
            is_collection in any::<bool>(),
        ) {
            let meta = AttributeMetadata::new("X", type_name.clone(), is_collection);
            let is_scalar = SCALAR_TYPE_NAMES
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&type_name));
            prop_assert_eq!(meta.is_nested_composite(), !is_collection && !is_scalar);
        }

        #[test]
        fn scalar_names_match_in_any_case(
            type_name in prop_oneof![
                case_variants("NUMBER"),
                case_variants("VARCHAR2"),
                case_variants("DATE"),
            ],
        ) {
            let meta = AttributeMetadata::new("X", type_name, false);
            prop_assert!(!meta.is_nested_composite());
        }
    }
}
