//! Blocking vendor client contract.

use thiserror::Error;

use vector_types::{FilterExpression, QueryMatch, VectorRecord};

/// Failure modes a vendor client may report.
///
/// This is the full vocabulary vendor integrations are allowed to use;
/// the adapter maps it into `VectorStoreError` so no vendor-specific
/// error type crosses the backend boundary.
#[derive(Debug, Error)]
pub enum RemoteClientError {
    /// Could not reach the service (network, auth, service down)
    #[error("connection failed: {0}")]
    Connection(String),

    /// The service refused the request as malformed
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The service answered with something unparseable
    #[error("malformed response: {0}")]
    Protocol(String),
}

/// Synchronous client against one remote vector index.
///
/// Every method may block on network I/O. Callers never invoke these
/// directly; `RemoteBackend` runs them on the offload pool. The
/// `namespace` argument maps to whatever partition concept the vendor
/// offers.
///
/// Implementations must be `Send + Sync`: the pool invokes them from
/// blocking worker threads.
pub trait RemoteVectorClient: Send + Sync + 'static {
    /// Stable provider name, used for backend selection and logging.
    fn backend_name(&self) -> &str;

    /// Store or overwrite one record.
    fn upsert(&self, record: &VectorRecord) -> Result<(), RemoteClientError>;

    /// Nearest neighbors of `vector`, best first, filtered server-side.
    fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        k: usize,
        filter: Option<&FilterExpression>,
    ) -> Result<Vec<QueryMatch>, RemoteClientError>;

    /// Fetch one record by id.
    fn fetch(&self, namespace: &str, id: &str) -> Result<Option<VectorRecord>, RemoteClientError>;

    /// Delete one record by id; `true` if it existed.
    fn delete(&self, namespace: &str, id: &str) -> Result<bool, RemoteClientError>;

    /// Drop every record in the namespace.
    fn clear(&self, namespace: &str) -> Result<(), RemoteClientError>;

    /// Number of records in the namespace.
    fn count(&self, namespace: &str) -> Result<usize, RemoteClientError>;
}
