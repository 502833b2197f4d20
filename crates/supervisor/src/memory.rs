//! Long-term memory recall for routing.

use llm_core::MemoryStore;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Load up to `limit` memories for `user_id` as a `user_memories` map.
///
/// Returns `None` when the user has no memories or the store fails; a
/// memory outage never blocks routing.
pub async fn recall_memories(
    store: &dyn MemoryStore,
    user_id: &str,
    limit: usize,
) -> Option<Map<String, Value>> {
    if limit == 0 {
        return None;
    }

    let records = match store.retrieve(user_id, limit).await {
        Ok(records) => records,
        Err(e) => {
            warn!(user_id = user_id, error = %e, "MEMORY_RECALL_FAILED");
            return None;
        }
    };

    if records.is_empty() {
        return None;
    }

    debug!(user_id = user_id, count = records.len(), "Recalled memories");

    let count = records.len();
    let memories = records
        .into_iter()
        .map(|record| {
            let mut entry = Map::new();
            entry.insert("id".to_string(), Value::String(record.id));
            entry.insert("message".to_string(), Value::String(record.message));
            entry.insert("metadata".to_string(), Value::Object(record.metadata));
            Value::Object(entry)
        })
        .collect();

    let mut map = Map::new();
    map.insert("memories".to_string(), Value::Array(memories));
    map.insert("count".to_string(), Value::from(count));
    Some(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_core::{async_trait, InMemoryStore, MemoryAck, MemoryError, MemoryRecord};

    struct DownStore;

    #[async_trait]
    impl MemoryStore for DownStore {
        async fn add(
            &self,
            _user_id: &str,
            _message: &str,
            _metadata: Map<String, Value>,
        ) -> Result<MemoryAck, MemoryError> {
            Err(MemoryError::Unavailable("down".to_string()))
        }

        async fn retrieve(
            &self,
            _user_id: &str,
            _limit: usize,
        ) -> Result<Vec<MemoryRecord>, MemoryError> {
            Err(MemoryError::Unavailable("down".to_string()))
        }

        async fn delete(&self, _memory_id: &str) -> Result<bool, MemoryError> {
            Err(MemoryError::Unavailable("down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_recall_most_recent_first() {
        let store = InMemoryStore::new();
        store.add("u1", "likes hiking", Map::new()).await.unwrap();
        store.add("u1", "vegetarian", Map::new()).await.unwrap();
        store.add("u1", "lives in Lima", Map::new()).await.unwrap();

        let map = recall_memories(&store, "u1", 2).await.unwrap();
        assert_eq!(map["count"], 2);
        let memories = map["memories"].as_array().unwrap();
        assert_eq!(memories[0]["message"], "lives in Lima");
        assert_eq!(memories[1]["message"], "vegetarian");
    }

    #[tokio::test]
    async fn test_recall_degrades_to_none() {
        assert!(recall_memories(&DownStore, "u1", 5).await.is_none());

        let store = InMemoryStore::new();
        assert!(recall_memories(&store, "nobody", 5).await.is_none());

        store.add("u1", "x", Map::new()).await.unwrap();
        assert!(recall_memories(&store, "u1", 0).await.is_none());
    }
}
