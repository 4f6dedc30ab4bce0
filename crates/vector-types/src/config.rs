//! Configuration for backend selection.
//!
//! Layered: built-in defaults -> optional config file -> environment
//! variables (VECTOR_STORE__ prefix, `__` between nesting levels so
//! snake_case field names survive). The owning application loads this
//! once and hands it to the store builder; the core never reads the
//! environment at call time.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::VectorStoreError;
use crate::record::DEFAULT_NAMESPACE;

fn default_provider() -> String {
    "memory".to_string()
}

fn default_dimension() -> usize {
    384
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_max_concurrency() -> usize {
    8
}

fn default_timeout_ms() -> u64 {
    5_000
}

/// Connection parameters for a remote backend.
///
/// These are vendor-specific and passed through unchanged; the core
/// only checks presence of `endpoint` and `index` when a remote
/// provider is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Service endpoint URL
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key or token (loaded from env var, not stored in config file)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Index or collection name on the remote service
    #[serde(default)]
    pub index: Option<String>,
}

/// Bounds for the blocking-call offload pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffloadSettings {
    /// Maximum vendor calls in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Default per-call deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for OffloadSettings {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Top-level vector store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreSettings {
    /// Active backend name ("memory", or a registered remote provider)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Embedding dimension enforced on every stored and queried vector
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Default namespace applied when callers omit one
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Remote connection parameters
    #[serde(default)]
    pub remote: RemoteSettings,

    /// Offload pool bounds
    #[serde(default)]
    pub offload: OffloadSettings,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            dimension: default_dimension(),
            namespace: default_namespace(),
            remote: RemoteSettings::default(),
            offload: OffloadSettings::default(),
        }
    }
}

impl VectorStoreSettings {
    /// Load settings in precedence order:
    ///
    /// 1. Built-in defaults
    /// 2. Config file, if a path is given (TOML)
    /// 3. Environment variables (VECTOR_STORE__PROVIDER,
    ///    VECTOR_STORE__DIMENSION, VECTOR_STORE__REMOTE__API_KEY,
    ///    VECTOR_STORE__OFFLOAD__MAX_CONCURRENCY, ...)
    ///
    /// The `__` separator keeps field names containing underscores
    /// (api_key, timeout_ms) addressable from the environment.
    pub fn load(config_path: Option<&str>) -> Result<Self, VectorStoreError> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("VECTOR_STORE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| VectorStoreError::Config(e.to_string()))?;

        let settings: Self = config
            .try_deserialize()
            .map_err(|e| VectorStoreError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings values.
    pub fn validate(&self) -> Result<(), VectorStoreError> {
        if self.provider.is_empty() {
            return Err(VectorStoreError::Config("provider must not be empty".into()));
        }
        if self.dimension == 0 {
            return Err(VectorStoreError::Config("dimension must be > 0".into()));
        }
        if self.offload.max_concurrency == 0 {
            return Err(VectorStoreError::Config(
                "offload.max_concurrency must be > 0".into(),
            ));
        }
        if self.offload.timeout_ms == 0 {
            return Err(VectorStoreError::Config(
                "offload.timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
