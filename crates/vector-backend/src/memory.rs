//! Exact in-memory backend.
//!
//! The reference backend: an owned map of records behind a single
//! `RwLock`, scanned exhaustively on every query. O(n) per query, which
//! is fine for the development/testing scale this backend targets;
//! large deployments select a remote ANN engine instead.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use vector_types::{FilterExpression, QueryMatch, VectorRecord, VectorStoreError};

use crate::backend::{BackendStats, VectorBackend};
use crate::filter::FilterEvaluator;
use crate::similarity::cosine;

/// A record plus its insertion sequence.
///
/// The sequence breaks score ties deterministically (original insertion
/// order) and survives overwrites, so repeated queries against an
/// unchanged store always return the same ordering.
#[derive(Debug, Clone)]
struct StoredRecord {
    record: VectorRecord,
    seq: u64,
}

#[derive(Debug, Default)]
struct NamespaceState {
    records: HashMap<String, StoredRecord>,
    /// Dimension locked by the first upsert when none was configured
    dimension: Option<usize>,
    next_seq: u64,
}

impl NamespaceState {
    fn expected_dimension(&self, configured: Option<usize>) -> Option<usize> {
        configured.or(self.dimension)
    }
}

/// In-memory vector backend.
///
/// All mutation goes through the single lock; there are no multi-record
/// transactions.
pub struct InMemoryBackend {
    namespaces: RwLock<HashMap<String, NamespaceState>>,
    configured_dimension: Option<usize>,
    evaluator: FilterEvaluator,
}

impl InMemoryBackend {
    /// Backend with the dimension inferred from the first upsert in
    /// each namespace.
    pub fn new() -> Self {
        Self {
            namespaces: RwLock::new(HashMap::new()),
            configured_dimension: None,
            evaluator: FilterEvaluator::new(),
        }
    }

    /// Backend with a fixed dimension enforced on every vector.
    pub fn with_dimension(dimension: usize) -> Self {
        info!(dimension, "Initialized in-memory vector backend");
        Self {
            namespaces: RwLock::new(HashMap::new()),
            configured_dimension: Some(dimension),
            evaluator: FilterEvaluator::new(),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorBackend for InMemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upsert(&self, record: VectorRecord) -> Result<bool, VectorStoreError> {
        if record.vector.is_empty() {
            warn!(id = %record.id, "Rejected upsert: empty vector");
            return Ok(false);
        }

        let mut namespaces = self.namespaces.write().unwrap();
        let state = namespaces.entry(record.namespace.clone()).or_default();

        match state.expected_dimension(self.configured_dimension) {
            Some(expected) if record.dimension() != expected => {
                warn!(
                    id = %record.id,
                    expected,
                    actual = record.dimension(),
                    "Rejected upsert: dimension mismatch"
                );
                return Ok(false);
            }
            Some(_) => {}
            None => state.dimension = Some(record.dimension()),
        }

        let id = record.id.clone();
        match state.records.entry(id.clone()) {
            // Overwrite keeps the original insertion sequence
            Entry::Occupied(mut entry) => entry.get_mut().record = record,
            Entry::Vacant(entry) => {
                let seq = state.next_seq;
                entry.insert(StoredRecord { record, seq });
                state.next_seq += 1;
            }
        }

        debug!(id = %id, "Upserted vector");
        Ok(true)
    }

    async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        k: usize,
        filter: Option<&FilterExpression>,
    ) -> Result<Vec<QueryMatch>, VectorStoreError> {
        if vector.is_empty() {
            return Err(VectorStoreError::Validation(
                "query vector must not be empty".into(),
            ));
        }

        let namespaces = self.namespaces.read().unwrap();
        let Some(state) = namespaces.get(namespace) else {
            // Nothing stored here yet; still enforce a configured dimension
            if let Some(expected) = self.configured_dimension {
                if vector.len() != expected {
                    return Err(VectorStoreError::DimensionMismatch {
                        expected,
                        actual: vector.len(),
                    });
                }
            }
            return Ok(Vec::new());
        };

        if let Some(expected) = state.expected_dimension(self.configured_dimension) {
            if vector.len() != expected {
                return Err(VectorStoreError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
        }

        let mut hits: Vec<(f32, u64, QueryMatch)> = Vec::new();
        for stored in state.records.values() {
            if let Some(filter) = filter {
                if !self.evaluator.matches(&stored.record.metadata, filter) {
                    continue;
                }
            }
            let score = cosine(vector, &stored.record.vector)?;
            hits.push((
                score,
                stored.seq,
                QueryMatch::new(
                    stored.record.id.clone(),
                    score,
                    stored.record.metadata.clone(),
                ),
            ));
        }

        // Score descending, then insertion order for reproducible ties
        hits.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        hits.truncate(k);

        debug!(
            namespace = %namespace,
            k,
            found = hits.len(),
            "Query complete"
        );
        Ok(hits.into_iter().map(|(_, _, m)| m).collect())
    }

    async fn get(
        &self,
        namespace: &str,
        id: &str,
    ) -> Result<Option<VectorRecord>, VectorStoreError> {
        let namespaces = self.namespaces.read().unwrap();
        Ok(namespaces
            .get(namespace)
            .and_then(|state| state.records.get(id))
            .map(|stored| stored.record.clone()))
    }

    async fn delete(&self, namespace: &str, id: &str) -> Result<bool, VectorStoreError> {
        let mut namespaces = self.namespaces.write().unwrap();
        let removed = namespaces
            .get_mut(namespace)
            .map(|state| state.records.remove(id).is_some())
            .unwrap_or(false);

        if removed {
            debug!(namespace = %namespace, id = %id, "Deleted vector");
        }
        Ok(removed)
    }

    async fn clear(&self, namespace: &str) -> Result<(), VectorStoreError> {
        let mut namespaces = self.namespaces.write().unwrap();
        // Dropping the whole state also unlocks an inferred dimension
        namespaces.remove(namespace);
        info!(namespace = %namespace, "Cleared namespace");
        Ok(())
    }

    async fn count(&self, namespace: &str) -> Result<usize, VectorStoreError> {
        let namespaces = self.namespaces.read().unwrap();
        Ok(namespaces
            .get(namespace)
            .map(|state| state.records.len())
            .unwrap_or(0))
    }

    fn stats(&self) -> BackendStats {
        let namespaces = self.namespaces.read().unwrap();
        let record_count = namespaces.values().map(|s| s.records.len()).sum();
        let dimension = self.configured_dimension.or_else(|| {
            let mut dims = namespaces.values().filter_map(|s| s.dimension);
            match (dims.next(), dims.next()) {
                (Some(d), None) => Some(d),
                _ => None,
            }
        });

        BackendStats {
            record_count,
            dimension,
            unsupported_filter_skips: self.evaluator.unsupported_skips(),
            available: true,
        }
    }
}
