//! Long-term memory store contract and an in-process implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;

/// Default maximum number of users tracked before LRU eviction.
const DEFAULT_MAX_USERS: usize = 10_000;

/// Default maximum number of memories kept per user.
const DEFAULT_MAX_RECORDS_PER_USER: usize = 200;

/// A single remembered fact about a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Remembered text.
    pub message: String,
    /// Free-form metadata supplied by the writer.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Acknowledgement returned by [`MemoryStore::add`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryAck {
    /// Identifier of the stored record.
    pub id: String,
}

/// Errors returned by memory stores.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// The backing store could not be reached.
    #[error("memory store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the request.
    #[error("memory request rejected: {0}")]
    Rejected(String),
}

/// A per-user long-term memory store.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Remember `message` for `user_id`.
    async fn add(
        &self,
        user_id: &str,
        message: &str,
        metadata: Map<String, Value>,
    ) -> Result<MemoryAck, MemoryError>;

    /// Return up to `limit` memories for `user_id`, most recent first.
    async fn retrieve(&self, user_id: &str, limit: usize) -> Result<Vec<MemoryRecord>, MemoryError>;

    /// Forget a single memory. Returns `false` if no such memory exists.
    async fn delete(&self, memory_id: &str) -> Result<bool, MemoryError>;
}

/// Bounded in-process memory store.
///
/// Keeps at most `max_records_per_user` memories per user (oldest dropped
/// first) and at most `max_users` users, evicting the least recently used
/// user when the limit is reached.
#[derive(Debug)]
pub struct InMemoryStore {
    users: RwLock<IndexMap<String, Vec<MemoryRecord>>>,
    max_records_per_user: usize,
    max_users: usize,
    next_id: AtomicU64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a store with default limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_RECORDS_PER_USER, DEFAULT_MAX_USERS)
    }

    /// Create a store with custom limits.
    pub fn with_limits(max_records_per_user: usize, max_users: usize) -> Self {
        Self {
            users: RwLock::new(IndexMap::new()),
            max_records_per_user,
            max_users,
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of users currently tracked.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Forget everything stored for a user.
    pub async fn clear_user(&self, user_id: &str) {
        self.users.write().await.shift_remove(user_id);
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn add(
        &self,
        user_id: &str,
        message: &str,
        metadata: Map<String, Value>,
    ) -> Result<MemoryAck, MemoryError> {
        if user_id.trim().is_empty() {
            return Err(MemoryError::Rejected("user id is empty".to_string()));
        }

        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut users = self.users.write().await;

        // Re-insert at the end to mark the user as recently used
        let mut records = users.shift_remove(user_id).unwrap_or_default();
        records.push(MemoryRecord {
            id: id.clone(),
            message: message.to_string(),
            metadata,
        });
        if records.len() > self.max_records_per_user {
            let excess = records.len() - self.max_records_per_user;
            records.drain(0..excess);
        }
        users.insert(user_id.to_string(), records);

        while users.len() > self.max_users {
            users.shift_remove_index(0);
        }

        Ok(MemoryAck { id })
    }

    async fn retrieve(&self, user_id: &str, limit: usize) -> Result<Vec<MemoryRecord>, MemoryError> {
        let mut users = self.users.write().await;

        let Some(records) = users.shift_remove(user_id) else {
            return Ok(Vec::new());
        };
        let recent = records.iter().rev().take(limit).cloned().collect();
        users.insert(user_id.to_string(), records);

        Ok(recent)
    }

    async fn delete(&self, memory_id: &str) -> Result<bool, MemoryError> {
        let mut users = self.users.write().await;
        for records in users.values_mut() {
            if let Some(pos) = records.iter().position(|r| r.id == memory_id) {
                records.remove(pos);
                return Ok(true);
            }
        }
        Ok(false)
    }
}
