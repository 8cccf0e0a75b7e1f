//! In-memory [`CatalogConnection`] backed by [`DashMap`].
//!
//! Holds composite type definitions and the collection-type registry. It
//! answers [`ATTRIBUTE_QUERY`] the way the catalog views would, including
//! the owner match in the collection subquery. Redefining a type simulates
//! an `ALTER TYPE` between two mapper calls.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;
use udtmap_core::{CatalogConnection, CatalogRow, Scalar};

use super::loader::ATTRIBUTE_QUERY;

/// One declared attribute of an in-memory type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAttribute {
    pub name: String,
    /// `None` for built-in types, which have no owner in the catalog.
    pub type_owner: Option<String>,
    pub type_name: String,
}

impl MemoryAttribute {
    /// Attribute of a built-in type (`NUMBER`, `VARCHAR2`, `DATE`, ...).
    #[must_use]
    pub fn builtin(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_uppercase(),
            type_owner: None,
            type_name: type_name.to_uppercase(),
        }
    }

    /// Attribute of a user-defined type owned by `type_owner`.
    #[must_use]
    pub fn user(name: &str, type_owner: &str, type_name: &str) -> Self {
        Self {
            name: name.to_uppercase(),
            type_owner: Some(type_owner.to_uppercase()),
            type_name: type_name.to_uppercase(),
        }
    }
}

/// Catalog held entirely in memory.
#[derive(Default)]
pub struct MemoryCatalog {
    /// `(owner, name)` -> attributes in declaration order.
    types: DashMap<(String, String), Vec<MemoryAttribute>>,
    /// `(owner, name)` of registered collection types.
    collections: RwLock<HashSet<(String, String)>>,
    queries: AtomicUsize,
}

fn key(owner: &str, name: &str) -> (String, String) {
    (owner.to_uppercase(), name.to_uppercase())
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces an object type definition.
    pub fn define_type(&self, owner: &str, name: &str, attributes: Vec<MemoryAttribute>) {
        self.types.insert(key(owner, name), attributes);
    }

    /// Registers `owner.name` as a collection type.
    pub fn define_collection_type(&self, owner: &str, name: &str) {
        self.collections.write().insert(key(owner, name));
    }

    /// Removes an object or collection type. Returns whether anything was removed.
    pub fn drop_type(&self, owner: &str, name: &str) -> bool {
        let k = key(owner, name);
        let had_type = self.types.remove(&k).is_some();
        let had_collection = self.collections.write().remove(&k);
        had_type || had_collection
    }

    /// Number of queries answered so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn is_collection(&self, attr: &MemoryAttribute) -> bool {
        attr.type_owner.as_ref().is_some_and(|owner| {
            self.collections
                .read()
                .contains(&(owner.clone(), attr.type_name.clone()))
        })
    }
}

impl CatalogConnection for MemoryCatalog {
    fn query(&self, sql: &str, params: &[String]) -> anyhow::Result<Vec<CatalogRow>> {
        if sql != ATTRIBUTE_QUERY {
            anyhow::bail!("memory catalog cannot run statement: {sql}");
        }
        let [name, owner] = params else {
            anyhow::bail!("attribute query expects 2 bind parameters, got {}", params.len());
        };
        self.queries.fetch_add(1, Ordering::Relaxed);

        // Exact match, as the catalog views compare already-normalized names.
        let k = (owner.clone(), name.clone());
        let Some(attributes) = self.types.get(&k) else {
            return Ok(Vec::new());
        };

        let rows = attributes
            .iter()
            .zip(0_i64..)
            .map(|(attr, index)| {
                CatalogRow::new()
                    .with("ATTR_NAME", attr.name.as_str())
                    .with("ATTR_INDEX", index)
                    .with("ATTR_TYPE_NAME", attr.type_name.as_str())
                    .with(
                        "ATTR_TYPE_OWNER",
                        attr.type_owner.clone().map_or(Scalar::Null, Scalar::String),
                    )
                    .with("IS_COLLECTION", i64::from(self.is_collection(attr)))
            })
            .collect();
        Ok(rows)
    }
}
