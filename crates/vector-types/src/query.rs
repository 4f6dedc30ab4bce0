//! Query result types.

use serde::{Deserialize, Serialize};

use crate::record::Metadata;

/// One ranked nearest-neighbor match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Record identifier
    pub id: String,
    /// Cosine similarity to the query vector, in [-1, 1]
    pub score: f32,
    /// Metadata stored with the record
    pub metadata: Metadata,
}

impl QueryMatch {
    pub fn new(id: impl Into<String>, score: f32, metadata: Metadata) -> Self {
        Self {
            id: id.into(),
            score,
            metadata,
        }
    }
}

/// Outcome status attached to every query response.
///
/// Distinguishes "the store genuinely has no matches" from "the backend
/// was unreachable and the match list is empty for that reason".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum QueryStatus {
    /// The backend answered; the match list is authoritative.
    Ok,
    /// The backend could not be reached; the match list is empty and
    /// says nothing about stored contents.
    Degraded { reason: String },
}

/// Ordered nearest-neighbor results, best score first, length <= k.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Matches sorted by score descending
    pub matches: Vec<QueryMatch>,
    /// Whether the match list is authoritative
    pub status: QueryStatus,
}

impl QueryResponse {
    /// An authoritative response.
    pub fn ok(matches: Vec<QueryMatch>) -> Self {
        Self {
            matches,
            status: QueryStatus::Ok,
        }
    }

    /// An empty response standing in for an unreachable backend.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            matches: Vec::new(),
            status: QueryStatus::Degraded {
                reason: reason.into(),
            },
        }
    }

    /// Whether the backend failed to answer.
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, QueryStatus::Degraded { .. })
    }
}
