//! Caller-side output of the mapper.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::Scalar;

/// A mapped attribute value: scalar, nested record, or ordered sequence.
///
/// Serializes untagged: records become JSON objects, lists become arrays and
/// scalars become their plain JSON form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MappedValue {
    Scalar(Scalar),
    Record(GenericRecord),
    List(Vec<MappedValue>),
}

impl MappedValue {
    /// Returns the nested record, if this value is one.
    #[must_use]
    pub fn as_record(&self) -> Option<&GenericRecord> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the element list, if this value is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[MappedValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the scalar, if this value is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Scalar> for MappedValue {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<GenericRecord> for MappedValue {
    fn from(v: GenericRecord) -> Self {
        Self::Record(v)
    }
}

/// Ordered mapping from lower-cased attribute name to mapped value.
///
/// Iteration order is attribute declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct GenericRecord {
    fields: IndexMap<String, MappedValue>,
}

impl GenericRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Appends a field. A repeated key keeps its original position and takes
    /// the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MappedValue>) {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MappedValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappedValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts the record into a JSON object with the same key order.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serializer errors.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl<'a> IntoIterator for &'a GenericRecord {
    type Item = (&'a String, &'a MappedValue);
    type IntoIter = indexmap::map::Iter<'a, String, MappedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut record = GenericRecord::new();
        record.insert("zeta", Scalar::Int(1));
        record.insert("alpha", Scalar::Int(2));
        record.insert("mid", Scalar::Null);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn json_keeps_declaration_order() {
        let mut inner = GenericRecord::new();
        inner.insert("city", Scalar::from("Sofia"));

        let mut record = GenericRecord::new();
        record.insert("b", Scalar::Int(1));
        record.insert("a", inner);
        record.insert(
            "tags",
            MappedValue::List(vec![Scalar::from("x").into(), Scalar::Null.into()]),
        );

        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"b":1,"a":{"city":"Sofia"},"tags":["x",null]}"#);
    }

    #[test]
    fn to_json_value_keeps_order() {
        let mut record = GenericRecord::new();
        record.insert("z", Scalar::Int(1));
        record.insert("a", Scalar::Int(2));
        let json = record.to_json().unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn empty_record_is_empty_object() {
        let record = GenericRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.to_json().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn accessors() {
        let mut record = GenericRecord::with_capacity(1);
        record.insert("n", Scalar::Int(5));
        let value = record.get("n").unwrap();
        assert_eq!(value.as_scalar(), Some(&Scalar::Int(5)));
        assert!(value.as_record().is_none());
        assert!(value.as_list().is_none());
        assert_eq!(record.len(), 1);
    }
}
