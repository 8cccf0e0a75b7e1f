//! Configuration types for the loader, mapper and tracing bootstrap.
//!
//! All structs implement `Default` and deserialize with `#[serde(default)]`,
//! so a host can embed a partial `[udtmap]` section in its own config file.

use serde::Deserialize;

/// Owner used for type names without an owner prefix.
pub const DEFAULT_OWNER_PLACEHOLDER: &str = "CURRENT_SCHEMA";

/// Driver error text that marks metadata as stale.
pub const DEFAULT_STALE_SIGNAL: &str = "invalid datatype";

/// Top-level configuration bundle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UdtMapConfig {
    pub loader: LoaderConfig,
    pub mapper: MapperConfig,
    pub tracing: TracingConfig,
}

/// Catalog metadata loader settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Owner bound when a type name carries no `OWNER.` prefix.
    ///
    /// Defaults to the literal [`DEFAULT_OWNER_PLACEHOLDER`], which the
    /// catalog views do not expand to the session schema.
    pub default_owner: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_owner: DEFAULT_OWNER_PLACEHOLDER.to_string(),
        }
    }
}

/// Struct mapper settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Maximum composite/collection nesting levels, top-level value included.
    pub max_depth: usize,
    /// 1-based OUT parameter index holding the composite result.
    pub output_parameter_index: usize,
    /// Substring searched for in every cause of a failed attempt.
    pub stale_signal: String,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            output_parameter_index: 1,
            stale_signal: DEFAULT_STALE_SIGNAL.to_string(),
        }
    }
}

/// Log output settings for [`init_tracing`](crate::telemetry::init_tracing).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_config_defaults() {
        let config = MapperConfig::default();
        assert_eq!(config.max_depth, 32);
        assert_eq!(config.output_parameter_index, 1);
        assert_eq!(config.stale_signal, "invalid datatype");
    }

    #[test]
    fn loader_config_defaults_to_placeholder_owner() {
        assert_eq!(LoaderConfig::default().default_owner, "CURRENT_SCHEMA");
    }

    #[test]
    fn tracing_config_defaults() {
        let config = TracingConfig::default();
        assert_eq!(config.filter, "info");
        assert!(!config.json);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config: UdtMapConfig = serde_json::from_str(
            r#"{"loader": {"default_owner": "HR"}, "mapper": {"max_depth": 4}}"#,
        )
        .unwrap();
        assert_eq!(config.loader.default_owner, "HR");
        assert_eq!(config.mapper.max_depth, 4);
        assert_eq!(config.mapper.stale_signal, DEFAULT_STALE_SIGNAL);
        assert_eq!(config.tracing.filter, "info");
    }
}
