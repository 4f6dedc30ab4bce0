//! End-to-end tests against the facade.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use vector_store::{
    FilterExpression, Metadata, QueryMatch, QueryStatus, RemoteClientError, RemoteSettings,
    RemoteVectorClient, VectorRecord, VectorStore, VectorStoreSettings,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn memory_store(dimension: usize) -> VectorStore {
    VectorStore::builder(VectorStoreSettings {
        dimension,
        ..Default::default()
    })
    .build()
    .await
    .unwrap()
}

fn meta(pairs: &[(&str, serde_json::Value)]) -> Metadata {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[tokio::test]
async fn test_category_filtered_retrieval() {
    init_tracing();
    let store = memory_store(4).await;

    let records: [(&str, [f32; 4], &str); 5] = [
        ("m1", [1.0, 0.0, 0.0, 0.0], "A"),
        ("m2", [0.9, 0.1, 0.0, 0.0], "B"),
        ("m3", [0.8, 0.2, 0.0, 0.0], "A"),
        ("m4", [0.0, 1.0, 0.0, 0.0], "A"),
        ("m5", [0.0, 0.0, 1.0, 0.0], "B"),
    ];
    for (id, vector, category) in records {
        assert!(store
            .upsert(id, vector.to_vec(), Some(meta(&[("category", json!(category))])))
            .await
            .unwrap());
    }

    let filter: FilterExpression = serde_json::from_value(json!({"category": "A"})).unwrap();
    let response = store
        .query(&[1.0, 0.0, 0.0, 0.0], 3, Some(&filter))
        .await
        .unwrap();

    assert_eq!(response.status, QueryStatus::Ok);
    assert_eq!(response.matches.len(), 3);
    for m in &response.matches {
        assert_eq!(m.metadata["category"], "A");
    }
    // Ranked by similarity to the query
    let ids: Vec<&str> = response.matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m3", "m4"]);
    for pair in response.matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn test_importance_threshold_filter() {
    let store = memory_store(2).await;

    store
        .upsert("low", vec![1.0, 0.0], Some(meta(&[("importance", json!(2))])))
        .await
        .unwrap();
    store
        .upsert("high", vec![1.0, 0.0], Some(meta(&[("importance", json!(5))])))
        .await
        .unwrap();
    store.upsert("untagged", vec![1.0, 0.0], None).await.unwrap();

    let filter: FilterExpression =
        serde_json::from_value(json!({"importance": {"$gte": 4}})).unwrap();
    let response = store.query(&[1.0, 0.0], 10, Some(&filter)).await.unwrap();

    assert_eq!(response.matches.len(), 1);
    assert_eq!(response.matches[0].id, "high");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_upserts_lose_nothing() {
    let store = memory_store(3).await;

    let tasks: Vec<_> = (0..100)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let vector = vec![i as f32, 1.0, 0.0];
                store
                    .upsert(format!("id-{i}"), vector, None)
                    .await
                    .unwrap()
            })
        })
        .collect();

    for stored in futures::future::join_all(tasks).await {
        assert!(stored.unwrap());
    }

    assert_eq!(store.count().await.unwrap(), 100);
    let response = store.query(&[1.0, 1.0, 0.0], 200, None).await.unwrap();
    assert_eq!(response.matches.len(), 100);
}

#[tokio::test]
async fn test_delete_then_get_misses() {
    let store = memory_store(2).await;
    store.upsert("a", vec![1.0, 0.0], None).await.unwrap();

    assert!(store.delete("a").await.unwrap());
    assert!(store.get("a").await.unwrap().is_none());
    assert!(!store.delete("a").await.unwrap());
}

/// Remote client that answers the construction probe, then loses
/// connectivity for good.
struct FlakyClient {
    calls: AtomicUsize,
}

impl FlakyClient {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn fail_after_probe(&self) -> Result<(), RemoteClientError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(())
        } else {
            Err(RemoteClientError::Connection("connection reset".into()))
        }
    }
}

impl RemoteVectorClient for FlakyClient {
    fn backend_name(&self) -> &str {
        "flaky"
    }

    fn upsert(&self, _: &VectorRecord) -> Result<(), RemoteClientError> {
        self.fail_after_probe()
    }

    fn query(
        &self,
        _: &str,
        _: &[f32],
        _: usize,
        _: Option<&FilterExpression>,
    ) -> Result<Vec<QueryMatch>, RemoteClientError> {
        self.fail_after_probe().map(|_| Vec::new())
    }

    fn fetch(&self, _: &str, _: &str) -> Result<Option<VectorRecord>, RemoteClientError> {
        self.fail_after_probe().map(|_| None)
    }

    fn delete(&self, _: &str, _: &str) -> Result<bool, RemoteClientError> {
        self.fail_after_probe().map(|_| false)
    }

    fn clear(&self, _: &str) -> Result<(), RemoteClientError> {
        self.fail_after_probe()
    }

    fn count(&self, _: &str) -> Result<usize, RemoteClientError> {
        self.fail_after_probe().map(|_| 0)
    }
}

#[tokio::test]
async fn test_remote_outage_degrades_instead_of_crashing() {
    init_tracing();
    let settings = VectorStoreSettings {
        provider: "flaky".into(),
        dimension: 3,
        remote: RemoteSettings {
            endpoint: Some("https://vectors.example.net".into()),
            api_key: None,
            index: Some("memories".into()),
        },
        ..Default::default()
    };

    let store = VectorStore::builder(settings)
        .register_remote("flaky", Arc::new(FlakyClient::new()))
        .build()
        .await
        .unwrap();

    // Upsert and delete report failure instead of erroring
    assert!(!store.upsert("a", vec![1.0, 0.0, 0.0], None).await.unwrap());
    assert!(!store.delete("a").await.unwrap());

    // Query reports an explicitly degraded (not just empty) response
    let response = store.query(&[1.0, 0.0, 0.0], 5, None).await.unwrap();
    assert!(response.is_degraded());
    assert!(response.matches.is_empty());

    // Validation still fails fast even while the backend is down
    let result = store.query(&[1.0], 5, None).await;
    assert!(result.is_err());
}
