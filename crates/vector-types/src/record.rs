//! Vector record: the stored entity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Namespace applied when the caller does not specify one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Metadata attached to a stored vector.
///
/// Values are arbitrary JSON scalars or collections; numeric filter
/// operators only apply to values representable as `f64`.
pub type Metadata = HashMap<String, Value>;

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// A stored vector with its identity and metadata.
///
/// Invariants (enforced by the backends, not the type):
/// - `id` is unique within a namespace; re-upserting overwrites.
/// - All vectors in one namespace share one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique identifier within the namespace
    pub id: String,

    /// The embedding, fixed dimension per namespace
    pub vector: Vec<f32>,

    /// Arbitrary metadata stored alongside the vector
    #[serde(default)]
    pub metadata: Metadata,

    /// Logical partition this record belongs to
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl VectorRecord {
    /// Create a record in the default namespace with empty metadata.
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata: Metadata::new(),
            namespace: default_namespace(),
        }
    }

    /// Replace the metadata map.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add a single metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Number of components in the stored vector.
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}
