//! UseCase: 直近のメッセージ履歴の取得

use std::sync::Arc;

use crate::domain::{MessageRecord, MessageStore};

use super::error::GetHistoryError;

/// Default number of messages returned by the history endpoint
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// 履歴取得のユースケース
pub struct GetHistoryUseCase {
    store: Arc<dyn MessageStore>,
    limit: usize,
}

impl GetHistoryUseCase {
    pub fn new(store: Arc<dyn MessageStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// 直近 `limit` 件を古い順に返す
    pub async fn execute(&self) -> Result<Vec<MessageRecord>, GetHistoryError> {
        Ok(self.store.recent(self.limit).await?)
    }
}
