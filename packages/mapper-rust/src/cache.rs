//! Concurrent per-type attribute metadata cache.
//!
//! Each type name owns a slot holding an atomically swappable snapshot and a
//! load gate. Reads of a populated slot are lock-free. A miss takes that
//! slot's gate, so concurrent misses on one key run the loader once and share
//! its result, while loads for other keys proceed independently. No shard
//! lock of the underlying [`DashMap`] is held during a load.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info, trace};
use udtmap_core::AttributeMetadata;

use crate::catalog::MetadataSource;
use crate::error::CatalogLoadError;

// ---------------------------------------------------------------------------
// CacheEntry
// ---------------------------------------------------------------------------

/// Wall-clock millis since the Unix epoch.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// One loaded attribute list. Replaced wholesale, never mutated.
#[derive(Debug)]
pub struct CacheEntry {
    attributes: Arc<[AttributeMetadata]>,
    loaded_at: i64,
}

impl CacheEntry {
    /// Attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &Arc<[AttributeMetadata]> {
        &self.attributes
    }

    /// Load time in millis since epoch. Recorded only; nothing expires on it.
    #[must_use]
    pub fn loaded_at(&self) -> i64 {
        self.loaded_at
    }
}

// ---------------------------------------------------------------------------
// TypeMetadataCache
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Slot {
    current: ArcSwapOption<CacheEntry>,
    /// Held for the duration of a load or refresh of this key.
    load_gate: Mutex<()>,
}

/// Memoizes attribute lists per fully-qualified type name.
///
/// Constructed empty, owned by the host and shared as
/// `Arc<TypeMetadataCache>`. Entries live as long as the cache; there is no
/// eviction and no size bound.
pub struct TypeMetadataCache {
    source: Arc<dyn MetadataSource>,
    slots: DashMap<String, Arc<Slot>>,
}

impl TypeMetadataCache {
    #[must_use]
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            source,
            slots: DashMap::new(),
        }
    }

    fn slot(&self, type_name: &str) -> Arc<Slot> {
        if let Some(slot) = self.slots.get(type_name) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(type_name.to_string()).or_default().value())
    }

    fn load_entry(&self, type_name: &str) -> Result<Arc<CacheEntry>, CatalogLoadError> {
        let attributes = self.source.load(type_name)?;
        Ok(Arc::new(CacheEntry {
            attributes: attributes.into(),
            loaded_at: now_millis(),
        }))
    }

    /// Cached attributes for `type_name`, loading them on a miss.
    ///
    /// Concurrent callers missing on the same key wait for a single load and
    /// all receive the same snapshot.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`CatalogLoadError`]; the key stays uncached.
    pub fn get(&self, type_name: &str) -> Result<Arc<[AttributeMetadata]>, CatalogLoadError> {
        let slot = self.slot(type_name);
        if let Some(entry) = slot.current.load_full() {
            trace!(type_name = %type_name, "Metadata cache hit");
            return Ok(Arc::clone(&entry.attributes));
        }

        let _gate = slot.load_gate.lock();
        // Another caller may have finished the load while we waited.
        if let Some(entry) = slot.current.load_full() {
            return Ok(Arc::clone(&entry.attributes));
        }

        debug!(type_name = %type_name, "Metadata cache miss, loading");
        let entry = self.load_entry(type_name)?;
        slot.current.store(Some(Arc::clone(&entry)));
        Ok(Arc::clone(&entry.attributes))
    }

    /// Reloads `type_name` and atomically replaces its entry.
    ///
    /// Snapshots handed out earlier are unaffected. On failure the previous
    /// entry (if any) stays in place.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`CatalogLoadError`].
    pub fn force_refresh(
        &self,
        type_name: &str,
    ) -> Result<Arc<[AttributeMetadata]>, CatalogLoadError> {
        let slot = self.slot(type_name);
        let _gate = slot.load_gate.lock();

        let entry = self.load_entry(type_name)?;
        let previous = slot.current.swap(Some(Arc::clone(&entry)));
        info!(
            type_name = %type_name,
            previous_attributes = previous.map(|p| p.attributes.len()),
            attributes = entry.attributes.len(),
            "Metadata refreshed"
        );
        Ok(Arc::clone(&entry.attributes))
    }

    /// Current entry for `type_name` without loading.
    #[must_use]
    pub fn entry(&self, type_name: &str) -> Option<Arc<CacheEntry>> {
        self.slots
            .get(type_name)
            .and_then(|slot| slot.current.load_full())
    }

    /// Whether `type_name` has a loaded entry.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.entry(type_name).is_some()
    }

    /// Number of loaded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.current.load().is_some())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all loaded entries, in no particular order.
    #[must_use]
    pub fn type_names(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|slot| slot.current.load().is_some())
            .map(|slot| slot.key().clone())
            .collect()
    }
}
