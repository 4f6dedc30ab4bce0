//! Backend trait and types.
//!
//! Defines the uniform contract every storage backend implements. The
//! active backend is chosen once at construction time (see the
//! `vector-store` facade); callers never branch on a backend name.

use async_trait::async_trait;

use vector_types::{FilterExpression, QueryMatch, VectorRecord, VectorStoreError};

/// Backend statistics for observability.
#[derive(Debug, Clone, Default)]
pub struct BackendStats {
    /// Number of records across all namespaces (best effort for remote
    /// backends)
    pub record_count: usize,
    /// Enforced embedding dimension, if one is fixed
    pub dimension: Option<usize>,
    /// Records excluded because a filter used an unsupported operator
    pub unsupported_filter_skips: u64,
    /// Whether the backend is currently reachable
    pub available: bool,
}

/// Trait for vector storage backends.
///
/// Implementations must be safe for concurrent callers. Per-id writes
/// are last-writer-wins; a query observes a point-in-time snapshot and
/// offers no linearizability guarantee against upserts in flight.
///
/// Remote implementations may block under the hood and must route
/// every vendor call through an offload pool so the async caller is
/// never blocked on network I/O (see `vector-remote`).
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Stable backend name ("memory", "pinecone", ...).
    fn name(&self) -> &str;

    /// Insert or overwrite a record, keyed by id within
    /// `record.namespace`.
    ///
    /// Returns `Ok(false)` (rather than an error) when the record fails
    /// validation or the backend cannot be reached, so callers get
    /// uniform pass/fail signaling.
    async fn upsert(&self, record: VectorRecord) -> Result<bool, VectorStoreError>;

    /// The k nearest neighbors of `vector` in `namespace`, best score
    /// first, restricted to records matching `filter`.
    ///
    /// k may exceed the record count; all matching records are returned
    /// in that case. A mismatched query dimension is a validation
    /// error, not an empty result.
    async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        k: usize,
        filter: Option<&FilterExpression>,
    ) -> Result<Vec<QueryMatch>, VectorStoreError>;

    /// Fetch a record by id. A miss is `Ok(None)`, never an error.
    async fn get(&self, namespace: &str, id: &str)
        -> Result<Option<VectorRecord>, VectorStoreError>;

    /// Remove a record by id. Returns whether it existed.
    async fn delete(&self, namespace: &str, id: &str) -> Result<bool, VectorStoreError>;

    /// Remove every record in the namespace.
    async fn clear(&self, namespace: &str) -> Result<(), VectorStoreError>;

    /// Number of records in the namespace.
    async fn count(&self, namespace: &str) -> Result<usize, VectorStoreError>;

    /// Current backend statistics.
    fn stats(&self) -> BackendStats;
}
