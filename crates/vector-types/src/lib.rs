//! # vector-types
//!
//! Shared domain types for the pluggable vector store.
//!
//! This crate defines the data model used by every backend:
//! - `VectorRecord`: the stored entity (id, vector, metadata, namespace)
//! - `FilterExpression`: metadata predicates attached to queries
//! - `QueryMatch` / `QueryResponse`: ranked nearest-neighbor results
//! - `VectorStoreError`: the unified error taxonomy
//! - `VectorStoreSettings`: layered configuration for backend selection
//!
//! ## Usage
//!
//! ```rust
//! use vector_types::{FilterExpression, FilterOp, VectorRecord};
//!
//! let record = VectorRecord::new("mem-1", vec![0.1, 0.2, 0.3])
//!     .with_meta("category", "A");
//! let filter = FilterExpression::new().field_eq("category", "A");
//! assert_eq!(record.dimension(), 3);
//! assert!(!filter.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod query;
pub mod record;

pub use config::{OffloadSettings, RemoteSettings, VectorStoreSettings};
pub use error::VectorStoreError;
pub use filter::{FilterCondition, FilterExpression, FilterOp};
pub use query::{QueryMatch, QueryResponse, QueryStatus};
pub use record::{Metadata, VectorRecord, DEFAULT_NAMESPACE};
