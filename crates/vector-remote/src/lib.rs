//! # vector-remote
//!
//! Remote backend adapter for external ANN services.
//!
//! Vendor SDKs for vector databases are synchronous and blocking under
//! the hood. This crate provides the one place where that blocking
//! world meets the async caller:
//!
//! - [`RemoteVectorClient`]: the blocking contract a vendor integration
//!   implements (the concrete clients live outside this workspace)
//! - [`OffloadPool`]: a bounded `spawn_blocking` pool with per-call
//!   deadlines
//! - [`RemoteBackend`]: a [`vector_backend::VectorBackend`] that routes
//!   every vendor call through the pool and converts vendor errors into
//!   the core vocabulary

pub mod adapter;
pub mod client;
pub mod offload;

pub use adapter::RemoteBackend;
pub use client::{RemoteClientError, RemoteVectorClient};
pub use offload::OffloadPool;
