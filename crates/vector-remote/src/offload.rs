//! Bounded offload pool for blocking vendor calls.
//!
//! The single blocking/non-blocking boundary in the system: every
//! vendor SDK call goes through [`OffloadPool::run`], never through an
//! ad hoc `spawn_blocking` at a call site. That keeps the boundary
//! auditable in one place and bounds how many blocking calls can be in
//! flight at once.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, warn};

use vector_types::{OffloadSettings, VectorStoreError};

use crate::client::RemoteClientError;

/// Convert a vendor error into the core vocabulary.
///
/// `Rejected` means the service refused our input, so it surfaces as a
/// validation failure; everything else means the backend cannot be
/// relied on right now.
pub(crate) fn map_client_error(err: RemoteClientError) -> VectorStoreError {
    match err {
        RemoteClientError::Rejected(msg) => VectorStoreError::Validation(msg),
        RemoteClientError::Connection(msg) | RemoteClientError::Protocol(msg) => {
            VectorStoreError::BackendUnavailable(msg)
        }
    }
}

/// Bounded pool of blocking workers with per-call deadlines.
#[derive(Debug, Clone)]
pub struct OffloadPool {
    permits: Arc<Semaphore>,
    deadline: Duration,
}

impl OffloadPool {
    pub fn new(settings: &OffloadSettings) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(settings.max_concurrency)),
            deadline: Duration::from_millis(settings.timeout_ms),
        }
    }

    /// The pool's default per-call deadline.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run a blocking vendor call with the pool's default deadline.
    pub async fn run<T, F>(&self, op: &'static str, f: F) -> Result<T, VectorStoreError>
    where
        F: FnOnce() -> Result<T, RemoteClientError> + Send + 'static,
        T: Send + 'static,
    {
        self.run_with_timeout(op, self.deadline, f).await
    }

    /// Run a blocking vendor call with a caller-supplied deadline.
    ///
    /// On expiry the awaiting side gets `Timeout` immediately; the
    /// vendor call itself cannot be interrupted and runs to completion
    /// on its worker thread, holding its pool permit until it finishes.
    /// Dropping the returned future likewise abandons the wait without
    /// leaking a permit.
    pub async fn run_with_timeout<T, F>(
        &self,
        op: &'static str,
        deadline: Duration,
        f: F,
    ) -> Result<T, VectorStoreError>
    where
        F: FnOnce() -> Result<T, RemoteClientError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| VectorStoreError::Task(e.to_string()))?;

        // The permit travels into the closure so it is released when the
        // vendor call finishes, not when we stop waiting for it.
        let handle = task::spawn_blocking(move || {
            let _permit = permit;
            f()
        });

        match timeout(deadline, handle).await {
            Err(_) => {
                warn!(op, ?deadline, "Remote call exceeded deadline");
                Err(VectorStoreError::Timeout(deadline))
            }
            Ok(Err(join_err)) => Err(VectorStoreError::Task(join_err.to_string())),
            Ok(Ok(result)) => {
                debug!(op, "Remote call complete");
                result.map_err(map_client_error)
            }
        }
    }
}
