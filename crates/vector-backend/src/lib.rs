//! # vector-backend
//!
//! Backend contract and the exact in-memory backend.
//!
//! Every backend exposes the same four-operation contract
//! (upsert/query/get/delete, plus clear and count). The in-memory
//! backend is the reference implementation: an exact O(n) cosine scan
//! over an owned record map, always available, used for development,
//! testing, and small deployments. Remote ANN engines plug in through
//! the same trait (see `vector-remote`).

pub mod backend;
pub mod filter;
pub mod memory;
pub mod similarity;

pub use backend::{BackendStats, VectorBackend};
pub use filter::FilterEvaluator;
pub use memory::InMemoryBackend;
pub use similarity::cosine;
