//! # vector-store
//!
//! Facade over pluggable vector storage backends.
//!
//! Agents use this crate for long-term memory: after-step hooks upsert
//! reasoning summaries, before-plan hooks query for related memories,
//! and user-facing memory tools call both directly. All of them see the
//! same four-operation contract regardless of which backend is active.
//!
//! The backend is selected exactly once, when the store is built:
//!
//! ```rust
//! use vector_store::{VectorStore, VectorStoreSettings};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), vector_store::VectorStoreError> {
//! let settings = VectorStoreSettings {
//!     dimension: 4,
//!     ..Default::default()
//! };
//! let store = VectorStore::builder(settings).build().await?;
//!
//! store.upsert("mem-1", vec![0.1, 0.2, 0.3, 0.4], None).await?;
//! let response = store.query(&[0.1, 0.2, 0.3, 0.4], 3, None).await?;
//! assert_eq!(response.matches[0].id, "mem-1");
//! # Ok(())
//! # }
//! ```
//!
//! Remote providers are registered by the application that owns the
//! vendor client; the core never constructs one on its own:
//!
//! ```rust,ignore
//! let store = VectorStore::builder(settings)
//!     .register_remote("pinecone", Arc::new(pinecone_client))
//!     .build()
//!     .await?;
//! ```

pub mod registry;
pub mod store;

pub use registry::VectorStoreBuilder;
pub use store::VectorStore;

pub use vector_backend::{BackendStats, InMemoryBackend, VectorBackend};
pub use vector_remote::{RemoteBackend, RemoteClientError, RemoteVectorClient};
pub use vector_types::{
    FilterExpression, FilterOp, Metadata, OffloadSettings, QueryMatch, QueryResponse, QueryStatus,
    RemoteSettings, VectorRecord, VectorStoreError, VectorStoreSettings, DEFAULT_NAMESPACE,
};
