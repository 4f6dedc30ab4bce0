//! Backend selection and construction.
//!
//! The provider string from configuration is resolved exactly once,
//! here. The built store owns its backend; there is no global registry
//! and no runtime hot-swap.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use vector_backend::{InMemoryBackend, VectorBackend};
use vector_remote::{RemoteBackend, RemoteVectorClient};
use vector_types::{VectorStoreError, VectorStoreSettings};

use crate::store::VectorStore;

/// Provider name of the built-in exact backend.
pub const MEMORY_PROVIDER: &str = "memory";

/// Builds a [`VectorStore`] from settings plus registered remote
/// clients.
///
/// The application constructs vendor clients (they carry credentials
/// and vendor SDKs the core knows nothing about) and registers them
/// under their provider name; `build` picks whichever one the settings
/// select.
pub struct VectorStoreBuilder {
    settings: VectorStoreSettings,
    remote_clients: HashMap<String, Arc<dyn RemoteVectorClient>>,
}

impl VectorStoreBuilder {
    pub fn new(settings: VectorStoreSettings) -> Self {
        Self {
            settings,
            remote_clients: HashMap::new(),
        }
    }

    /// Register a remote client under its provider name.
    pub fn register_remote(
        mut self,
        provider: impl Into<String>,
        client: Arc<dyn RemoteVectorClient>,
    ) -> Self {
        self.remote_clients.insert(provider.into(), client);
        self
    }

    /// Resolve the configured provider and construct the store.
    ///
    /// Fails fast: an unknown provider, missing connection parameters,
    /// or an unreachable remote service is a construction error, not a
    /// degraded store.
    pub async fn build(self) -> Result<VectorStore, VectorStoreError> {
        self.settings.validate()?;

        let backend: Arc<dyn VectorBackend> = if self.settings.provider == MEMORY_PROVIDER {
            Arc::new(InMemoryBackend::with_dimension(self.settings.dimension))
        } else {
            let client = self
                .remote_clients
                .get(&self.settings.provider)
                .cloned()
                .ok_or_else(|| {
                    VectorStoreError::Config(format!(
                        "unknown vector provider: {}",
                        self.settings.provider
                    ))
                })?;

            // Vendor fields are passed through unchanged; only presence
            // is checked here
            if self.settings.remote.endpoint.is_none() {
                return Err(VectorStoreError::Config(format!(
                    "provider '{}' requires remote.endpoint",
                    self.settings.provider
                )));
            }
            if self.settings.remote.index.is_none() {
                return Err(VectorStoreError::Config(format!(
                    "provider '{}' requires remote.index",
                    self.settings.provider
                )));
            }

            Arc::new(
                RemoteBackend::connect(client, self.settings.dimension, &self.settings.offload)
                    .await?,
            )
        };

        info!(
            provider = %self.settings.provider,
            dimension = self.settings.dimension,
            namespace = %self.settings.namespace,
            "Initialized vector store"
        );
        Ok(VectorStore::new(backend, self.settings.namespace))
    }
}
