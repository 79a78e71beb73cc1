//! InMemory message store 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。
//! プロセス内の VecDeque を履歴ストアとして使用します。

use std::{collections::VecDeque, num::NonZeroUsize};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageRecord, MessageStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    records: VecDeque<MessageRecord>,
    next_id: u64,
}

/// インメモリ MessageStore 実装
///
/// Ids are assigned in append order starting at 1. A bounded store keeps the
/// newest `capacity` records and drops the oldest ones; ids keep counting.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    inner: Mutex<Inner>,
    /// Maximum number of retained messages (`None` = unbounded)
    capacity: Option<NonZeroUsize>,
}

impl InMemoryMessageStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that retains at most `capacity` messages
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: Some(capacity),
        }
    }

    /// Number of stored messages
    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: ChatMessage) -> Result<MessageRecord, StoreError> {
        let mut inner = self.inner.lock().await;

        if let Some(capacity) = self.capacity {
            while inner.records.len() >= capacity.get() {
                inner.records.pop_front();
            }
        }

        inner.next_id += 1;
        let record = MessageRecord::from_message(inner.next_id, message);
        inner.records.push_back(record.clone());
        tracing::debug!("Stored message #{} from '{}'", record.id, record.username);

        Ok(record)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<MessageRecord>, StoreError> {
        let inner = self.inner.lock().await;
        let start = inner.records.len().saturating_sub(limit);
        Ok(inner.records.range(start..).cloned().collect())
    }
}
