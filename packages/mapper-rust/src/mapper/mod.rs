//! Recursive composite/collection mapping and the stale-metadata retry.
//!
//! [`StructMapper`] zips cached attribute metadata positionally with the raw
//! attribute values of a composite handle, recursing into nested composites
//! and collections. [`StructMapper::fetch_and_map`] drives one statement
//! execution and retries it once after a forced metadata refresh when the
//! driver reports stale metadata (see [`is_stale_metadata_signal`]).

pub mod classify;

pub use classify::is_stale_metadata_signal;

use std::sync::Arc;

use tracing::{debug, warn};
use udtmap_core::{
    Executable, GenericRecord, MappedValue, RawCollection, RawComposite, RawValue, Scalar,
};

use crate::cache::TypeMetadataCache;
use crate::config::MapperConfig;
use crate::error::{MapError, MappingError};

// ---------------------------------------------------------------------------
// StructMapper
// ---------------------------------------------------------------------------

/// Converts composite handles into [`GenericRecord`]s.
///
/// Cheap to share: holds an `Arc` to the metadata cache and its config.
pub struct StructMapper {
    cache: Arc<TypeMetadataCache>,
    config: MapperConfig,
}

impl StructMapper {
    #[must_use]
    pub fn new(cache: Arc<TypeMetadataCache>, config: MapperConfig) -> Self {
        Self { cache, config }
    }

    /// The metadata cache this mapper reads through.
    #[must_use]
    pub fn cache(&self) -> &Arc<TypeMetadataCache> {
        &self.cache
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Maps a composite handle. `None` (SQL NULL) maps to an empty record.
    ///
    /// Metadata is looked up under the handle's runtime type name. Keys are
    /// the lower-cased attribute names in declaration order.
    ///
    /// # Errors
    ///
    /// - [`MapError::MetadataMismatch`] if the attribute counts differ
    /// - [`MapError::Catalog`] if metadata cannot be loaded
    /// - [`MapError::DepthExceeded`] past [`MapperConfig::max_depth`]
    pub fn map_composite(&self, raw: Option<&RawComposite>) -> Result<GenericRecord, MapError> {
        match raw {
            None => Ok(GenericRecord::new()),
            Some(composite) => self.composite_at(composite, 0),
        }
    }

    /// Maps a collection handle. `None` (SQL NULL) maps to `None`, unlike
    /// [`map_composite`](Self::map_composite).
    ///
    /// # Errors
    ///
    /// Propagates failures from mapping composite elements.
    pub fn map_collection(
        &self,
        raw: Option<&RawCollection>,
    ) -> Result<Option<Vec<MappedValue>>, MapError> {
        raw.map(|collection| self.collection_at(collection, 0, "<collection>"))
            .transpose()
    }
}

// ---------------------------------------------------------------------------
// Recursive mapping
// ---------------------------------------------------------------------------

impl StructMapper {
    fn enter(&self, depth: usize, type_name: &str) -> Result<usize, MapError> {
        let next = depth + 1;
        if next > self.config.max_depth {
            return Err(MapError::DepthExceeded {
                type_name: type_name.to_string(),
                max_depth: self.config.max_depth,
            });
        }
        Ok(next)
    }

    fn composite_at(&self, raw: &RawComposite, depth: usize) -> Result<GenericRecord, MapError> {
        let type_name = raw.type_name();
        let depth = self.enter(depth, type_name)?;
        let metadata = self.cache.get(type_name)?;
        let values = raw.attributes();

        if metadata.len() != values.len() {
            return Err(MapError::MetadataMismatch {
                type_name: type_name.to_string(),
                expected: metadata.len(),
                actual: values.len(),
            });
        }

        let mut record = GenericRecord::with_capacity(values.len());
        for (meta, value) in metadata.iter().zip(values) {
            record.insert(meta.record_key(), self.value_at(value, depth, type_name)?);
        }
        Ok(record)
    }

    fn collection_at(
        &self,
        raw: &RawCollection,
        depth: usize,
        owner_type: &str,
    ) -> Result<Vec<MappedValue>, MapError> {
        let depth = self.enter(depth, owner_type)?;
        raw.elements()
            .iter()
            .map(|element| self.value_at(element, depth, owner_type))
            .collect()
    }

    /// `owner_type` names the enclosing composite, for error messages only.
    fn value_at(
        &self,
        value: &RawValue,
        depth: usize,
        owner_type: &str,
    ) -> Result<MappedValue, MapError> {
        Ok(match value {
            RawValue::Composite(c) => MappedValue::Record(self.composite_at(c, depth)?),
            RawValue::Collection(c) => MappedValue::List(self.collection_at(c, depth, owner_type)?),
            RawValue::Scalar(s) => MappedValue::Scalar(s.clone()),
        })
    }

    fn execute_and_map(&self, executable: &mut dyn Executable) -> Result<GenericRecord, MapError> {
        executable.execute().map_err(MapError::Driver)?;
        let index = self.config.output_parameter_index;
        match executable.output(index).map_err(MapError::Driver)? {
            RawValue::Composite(composite) => self.map_composite(Some(&composite)),
            RawValue::Scalar(Scalar::Null) => self.map_composite(None),
            other => Err(MapError::UnexpectedOutput {
                index,
                kind: other.kind(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Stale-metadata retry
// ---------------------------------------------------------------------------

impl StructMapper {
    /// Executes `executable` and maps its composite OUT parameter.
    ///
    /// If the attempt fails with the configured stale-metadata signal
    /// anywhere in its cause chain, the cache entry for `type_name` is
    /// force-refreshed and the execute-and-map is retried exactly once.
    ///
    /// # Errors
    ///
    /// - [`MappingError::Failed`] for a first-attempt failure without the signal
    /// - [`MappingError::RetryFailed`] if the refresh or the retry fails
    pub fn fetch_and_map(
        &self,
        type_name: &str,
        executable: &mut dyn Executable,
    ) -> Result<GenericRecord, MappingError> {
        let err = match self.execute_and_map(executable) {
            Ok(record) => return Ok(record),
            Err(err) => err,
        };

        if !is_stale_metadata_signal(&err, &self.config.stale_signal) {
            return Err(MappingError::Failed {
                type_name: type_name.to_string(),
                source: err,
            });
        }

        warn!(
            type_name = %type_name,
            error = %err,
            "Detected stale metadata, reloading and retrying once"
        );
        let retry_failed = |source: MapError| MappingError::RetryFailed {
            type_name: type_name.to_string(),
            source,
        };
        self.cache
            .force_refresh(type_name)
            .map_err(|e| retry_failed(e.into()))?;

        let record = self.execute_and_map(executable).map_err(retry_failed)?;
        debug!(type_name = %type_name, "Retry after metadata refresh succeeded");
        Ok(record)
    }
}
