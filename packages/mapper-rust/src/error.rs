//! Error types for loading metadata and mapping composite values.
//!
//! Driver failures arrive as `anyhow::Error` from the collaborator traits and
//! are attached as `#[source]`, so the whole cause chain stays walkable with
//! [`std::error::Error::source`]. The retry protocol depends on that.

use thiserror::Error;

/// The catalog could not describe a composite type.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The metadata query itself failed (connectivity, permissions, bad name).
    #[error("catalog query failed for type {type_name}: {source}")]
    Query {
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// A returned row lacks a required column or has an unusable value.
    #[error("malformed catalog row {row} for type {type_name}: {reason}")]
    MalformedRow {
        type_name: String,
        row: usize,
        reason: String,
    },
}

/// Failure within a single map attempt.
#[derive(Debug, Error)]
pub enum MapError {
    /// Metadata attribute count differs from the handle's value count.
    #[error(
        "mismatch between metadata and attributes for type {type_name}: \
         metadata has {expected} attributes, value has {actual}"
    )]
    MetadataMismatch {
        type_name: String,
        expected: usize,
        actual: usize,
    },

    /// Composite/collection nesting exceeded the configured bound.
    #[error("nesting deeper than {max_depth} levels while mapping type {type_name}")]
    DepthExceeded { type_name: String, max_depth: usize },

    /// The OUT parameter held something other than a composite.
    #[error("output parameter {index} holds a {kind} value, expected a composite")]
    UnexpectedOutput { index: usize, kind: &'static str },

    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    /// Statement execution or OUT value retrieval failed in the driver.
    #[error("driver error: {0}")]
    Driver(#[source] anyhow::Error),
}

/// Terminal failure of [`StructMapper::fetch_and_map`](crate::StructMapper::fetch_and_map).
#[derive(Debug, Error)]
pub enum MappingError {
    /// The first attempt failed with a cause that does not call for a retry.
    #[error("error while fetching or mapping type {type_name}")]
    Failed {
        type_name: String,
        #[source]
        source: MapError,
    },

    /// Stale metadata was detected, the entry refreshed, and the single
    /// retry (or the refresh itself) failed too.
    #[error("failed to fetch and map type {type_name} after refreshing metadata")]
    RetryFailed {
        type_name: String,
        #[source]
        source: MapError,
    },
}

impl MappingError {
    /// Type name passed to `fetch_and_map`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Failed { type_name, .. } | Self::RetryFailed { type_name, .. } => type_name,
        }
    }

    /// The attempt failure that ended the operation.
    #[must_use]
    pub fn cause(&self) -> &MapError {
        match self {
            Self::Failed { source, .. } | Self::RetryFailed { source, .. } => source,
        }
    }

    /// Whether a refresh-and-retry was attempted before giving up.
    #[must_use]
    pub fn retried(&self) -> bool {
        matches!(self, Self::RetryFailed { .. })
    }
}
