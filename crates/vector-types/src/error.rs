//! Error types for the vector store.

use std::time::Duration;

use thiserror::Error;

/// Unified error type for vector store operations.
///
/// "Not found" is deliberately absent: `get` and `delete` report misses
/// through their return values (`Option` / `bool`), never as an error.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    /// Malformed input (empty vector, bad id, invalid k)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Vector dimension does not match the store's fixed dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Remote backend failed to initialize or lost connectivity
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Unsupported filter operator
    #[error("Unsupported filter operator: {0}")]
    UnsupportedFilter(String),

    /// Remote call exceeded its deadline
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error (unknown provider, missing connection parameters)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Offload task failed to complete (panicked or was aborted)
    #[error("Task error: {0}")]
    Task(String),
}

impl VectorStoreError {
    /// Whether the facade should degrade this error into an empty/false
    /// result instead of propagating it.
    ///
    /// Backend unavailability and timeouts are transient operational
    /// conditions; callers should not crash because a remote vector
    /// service is briefly down. Validation and configuration errors
    /// always propagate.
    pub fn is_degraded_result(&self) -> bool {
        matches!(
            self,
            VectorStoreError::BackendUnavailable(_) | VectorStoreError::Timeout(_)
        )
    }
}
