//! Factory for fully-wired [`StructMapper`] instances.
//!
//! [`MapperFactory`] is the dependency injection point: it builds the
//! [`CatalogMetadataLoader`] over a host connection, owns one shared
//! [`TypeMetadataCache`] on top of it, and hands out mappers that all read
//! through that cache.

use std::sync::Arc;

use udtmap_core::CatalogConnection;

use crate::cache::TypeMetadataCache;
use crate::catalog::CatalogMetadataLoader;
use crate::config::{MapperConfig, UdtMapConfig};
use crate::mapper::StructMapper;

pub struct MapperFactory {
    cache: Arc<TypeMetadataCache>,
    mapper_config: MapperConfig,
}

impl MapperFactory {
    /// Wires loader and cache over `connection`. The cache starts empty.
    #[must_use]
    pub fn new(connection: Arc<dyn CatalogConnection>, config: &UdtMapConfig) -> Self {
        let loader = CatalogMetadataLoader::new(connection, config.loader.clone());
        Self {
            cache: Arc::new(TypeMetadataCache::new(Arc::new(loader))),
            mapper_config: config.mapper.clone(),
        }
    }

    /// The shared cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<TypeMetadataCache> {
        &self.cache
    }

    /// A mapper using the factory's mapper config.
    #[must_use]
    pub fn create(&self) -> StructMapper {
        self.create_with(self.mapper_config.clone())
    }

    /// A mapper with its own config, still sharing the factory's cache.
    #[must_use]
    pub fn create_with(&self, config: MapperConfig) -> StructMapper {
        StructMapper::new(Arc::clone(&self.cache), config)
    }
}
