//! Catalog access: where attribute metadata comes from.
//!
//! - [`MetadataSource`]: the seam the cache loads through
//! - [`CatalogMetadataLoader`]: queries the type-attribute catalog views over
//!   a host-supplied [`CatalogConnection`](udtmap_core::CatalogConnection)
//! - [`MemoryCatalog`]: in-memory connection answering the loader's query,
//!   for tests and local development

pub mod loader;
pub mod memory;

pub use loader::*;
pub use memory::*;

use udtmap_core::AttributeMetadata;

use crate::error::CatalogLoadError;

/// Source of attribute lists for composite types.
///
/// Used as `Arc<dyn MetadataSource>` by the cache. Implementations must
/// return attributes in declaration order.
pub trait MetadataSource: Send + Sync {
    /// Describe `type_name`. An unknown type yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogLoadError`] when the catalog cannot be queried.
    fn load(&self, type_name: &str) -> Result<Vec<AttributeMetadata>, CatalogLoadError>;
}

/// Owner and local name of a composite type, both upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedTypeName {
    pub owner: String,
    pub name: String,
}

impl QualifiedTypeName {
    /// Splits `type_name` on its first `.`; without one, `default_owner` is
    /// used as the owner.
    #[must_use]
    pub fn parse(type_name: &str, default_owner: &str) -> Self {
        let (owner, name) = type_name
            .split_once('.')
            .unwrap_or((default_owner, type_name));
        Self {
            owner: owner.to_uppercase(),
            name: name.to_uppercase(),
        }
    }
}
