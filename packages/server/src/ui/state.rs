//! Shared application state handed to every handler.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    connection::ConnectionConfig,
    domain::SessionAuthenticator,
    hub::Hub,
    usecase::{GetHistoryUseCase, LoginUseCase, RegisterUserUseCase, SendMessageUseCase},
};

pub struct AppState {
    /// Handle to the hub control loop
    pub hub: Hub,
    /// SessionAuthenticator（トークン検証の抽象化）
    pub authenticator: Arc<dyn SessionAuthenticator>,
    /// SendMessageUseCase（HTTP 経由のメッセージ送信）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetHistoryUseCase（履歴取得）
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    /// RegisterUserUseCase（アカウント登録）
    pub register_user_usecase: Arc<RegisterUserUseCase>,
    /// LoginUseCase（ログイン）
    pub login_usecase: Arc<LoginUseCase>,
    /// Settings applied to every new WebSocket connection
    pub connection_config: ConnectionConfig,
    pub clock: Arc<dyn Clock>,
}
