//! UseCase: HTTP 経由のメッセージ送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 永続化 → ブロードキャストの順序と、失敗時に何も配信されないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：保存されたレコードが返り、接続中の参加者へ chat_message が届く
//! - 異常系：空のメッセージ、ストアの失敗

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    domain::{ChatMessage, Identity, MessageContent, MessageRecord, MessageStore, ServerEvent},
    hub::{Frame, Hub},
    infrastructure::codec,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
///
/// WebSocket 経由の発言と違い、保存を待ってから配信する。
/// 配信には `Hub::broadcast` を使うので二重に保存されることはない。
pub struct SendMessageUseCase {
    store: Arc<dyn MessageStore>,
    hub: Hub,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(store: Arc<dyn MessageStore>, hub: Hub, clock: Arc<dyn Clock>) -> Self {
        Self { store, hub, clock }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(MessageRecord)` - 保存されたメッセージ
    /// * `Err(SendMessageError)` - 検証・保存・配信のいずれかに失敗
    pub async fn execute(
        &self,
        author: Identity,
        content: String,
    ) -> Result<MessageRecord, SendMessageError> {
        let content = MessageContent::new(content)?;
        let message = ChatMessage::new(author, content, self.clock.now());

        // 1. 保存
        let record = self.store.append(message.clone()).await?;

        // 2. 接続中の参加者へ配信
        let frame = codec::encode(&ServerEvent::ChatMessage(message))?;
        self.hub.broadcast(Frame::from(frame)).await?;

        tracing::info!(
            "Message #{} from '{}' sent over HTTP",
            record.id,
            record.username
        );
        Ok(record)
    }
}
