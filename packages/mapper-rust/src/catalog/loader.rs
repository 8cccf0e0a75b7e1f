//! [`MetadataSource`] backed by the `ALL_TYPE_ATTRS` / `ALL_COLL_TYPES`
//! catalog views.

use std::sync::Arc;

use tracing::{debug, warn};
use udtmap_core::{AttributeMetadata, CatalogConnection, CatalogRow};

use super::{MetadataSource, QualifiedTypeName};
use crate::config::LoaderConfig;
use crate::error::CatalogLoadError;

/// Attribute query for one type. Binds: `[TYPE_NAME, OWNER]`.
pub const ATTRIBUTE_QUERY: &str = "\
SELECT ATTR_NAME, \
       ATTR_NO - 1 AS ATTR_INDEX, \
       ATTR_TYPE_NAME, \
       ATTR_TYPE_OWNER, \
       (SELECT COUNT(*) FROM ALL_COLL_TYPES \
         WHERE TYPE_NAME = ATTR_TYPE_NAME \
           AND OWNER = ATTR_TYPE_OWNER) AS IS_COLLECTION \
  FROM ALL_TYPE_ATTRS \
 WHERE TYPE_NAME = ? \
   AND OWNER = ? \
 ORDER BY ATTR_NO";

/// Loads attribute metadata by querying the catalog through a
/// [`CatalogConnection`].
pub struct CatalogMetadataLoader {
    connection: Arc<dyn CatalogConnection>,
    config: LoaderConfig,
}

impl CatalogMetadataLoader {
    #[must_use]
    pub fn new(connection: Arc<dyn CatalogConnection>, config: LoaderConfig) -> Self {
        Self { connection, config }
    }

    /// The `(owner, name)` pair the loader binds for `type_name`.
    #[must_use]
    pub fn resolve(&self, type_name: &str) -> QualifiedTypeName {
        QualifiedTypeName::parse(type_name, &self.config.default_owner)
    }
}

/// Converts one catalog row. Returns the declaration index (if reported)
/// alongside the metadata.
fn parse_row(
    type_name: &str,
    row_no: usize,
    row: &CatalogRow,
) -> Result<(Option<i64>, AttributeMetadata), CatalogLoadError> {
    let malformed = |reason: &str| CatalogLoadError::MalformedRow {
        type_name: type_name.to_string(),
        row: row_no,
        reason: reason.to_string(),
    };

    let name = row
        .get_str("ATTR_NAME")
        .ok_or_else(|| malformed("missing ATTR_NAME"))?;
    let declared = row
        .get_str("ATTR_TYPE_NAME")
        .ok_or_else(|| malformed("missing ATTR_TYPE_NAME"))?;

    // A NULL count reads as zero, as JDBC-style getInt does.
    let collection_count = match row.get("IS_COLLECTION") {
        None => 0,
        Some(v) if v.is_null() => 0,
        Some(_) => row
            .get_i64("IS_COLLECTION")
            .ok_or_else(|| malformed("non-numeric IS_COLLECTION"))?,
    };

    Ok((
        row.get_i64("ATTR_INDEX"),
        AttributeMetadata::new(name, declared, collection_count > 0),
    ))
}

impl MetadataSource for CatalogMetadataLoader {
    fn load(&self, type_name: &str) -> Result<Vec<AttributeMetadata>, CatalogLoadError> {
        let qualified = self.resolve(type_name);
        debug!(
            type_name = %type_name,
            owner = %qualified.owner,
            name = %qualified.name,
            "Querying catalog for type attributes"
        );

        let params = [qualified.name.clone(), qualified.owner.clone()];
        let rows = self
            .connection
            .query(ATTRIBUTE_QUERY, &params)
            .map_err(|source| CatalogLoadError::Query {
                type_name: type_name.to_string(),
                source,
            })?;

        let mut parsed = rows
            .iter()
            .enumerate()
            .map(|(row_no, row)| parse_row(type_name, row_no, row))
            .collect::<Result<Vec<_>, _>>()?;

        // Connections that ignore ORDER BY still yield declaration order.
        if parsed.iter().all(|(index, _)| index.is_some()) {
            parsed.sort_by_key(|(index, _)| *index);
        }

        let attributes: Vec<AttributeMetadata> = parsed.into_iter().map(|(_, m)| m).collect();
        if attributes.is_empty() {
            warn!(
                type_name = %type_name,
                owner = %qualified.owner,
                name = %qualified.name,
                "Catalog returned no attributes; type missing or attribute-less"
            );
        }
        Ok(attributes)
    }
}
