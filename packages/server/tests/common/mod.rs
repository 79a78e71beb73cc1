//! In-process test server and WebSocket helpers shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    connection::ConnectionConfig,
    domain::{Identity, MessageStore, PasswordHasher, UserId, UserRepository, Username},
    hub::{Hub, HubConfig},
    infrastructure::{
        auth::{Argon2PasswordHasher, JwtAuthenticator},
        repository::{InMemoryMessageStore, InMemoryUserRepository},
    },
    ui::{Server, state::AppState},
    usecase::{GetHistoryUseCase, LoginUseCase, RegisterUserUseCase, SendMessageUseCase},
};
use hiroba_shared::time::{Clock, SystemClock};
use serde_json::{Value, json};
use tokio::{net::TcpStream, sync::oneshot, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const SECRET: &[u8] = b"integration-test-secret-0123456789";

pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Chat server bound to an ephemeral port; stops when dropped
pub struct TestServer {
    addr: SocketAddr,
    authenticator: Arc<JwtAuthenticator>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().unwrap();

        let authenticator = Arc::new(JwtAuthenticator::new(SECRET));
        let store: Arc<dyn MessageStore> = Arc::new(InMemoryMessageStore::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
        let hub = Hub::spawn(store.clone(), HubConfig::default());
        let server = Server::new(AppState {
            hub: hub.clone(),
            authenticator: authenticator.clone(),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                store.clone(),
                hub,
                clock.clone(),
            )),
            get_history_usecase: Arc::new(GetHistoryUseCase::new(store, 50)),
            register_user_usecase: Arc::new(RegisterUserUseCase::new(
                users.clone(),
                hasher.clone(),
                authenticator.clone(),
                clock.clone(),
            )),
            login_usecase: Arc::new(LoginUseCase::new(users, hasher, authenticator.clone())),
            connection_config: ConnectionConfig::default(),
            clock,
        });

        let (shutdown, stopped) = oneshot::channel::<()>();
        tokio::spawn(server.serve(listener, async {
            let _ = stopped.await;
        }));

        Self {
            addr,
            authenticator,
            shutdown: Some(shutdown),
        }
    }

    pub fn token(&self, user_id: i64, username: &str) -> String {
        let identity = Identity::new(
            UserId::new(user_id).unwrap(),
            Username::new(username.to_string()).unwrap(),
        );
        self.authenticator.issue(&identity).unwrap()
    }

    /// Register an account over HTTP
    pub async fn register(&self, username: &str, email: &str, password: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.http_url("/api/auth/register"))
            .json(&json!({"username": username, "email": email, "password": password}))
            .send()
            .await
            .expect("Failed to send register request")
    }

    /// Log in over HTTP
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(self.http_url("/api/auth/login"))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await
            .expect("Failed to send login request")
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/api/chat/ws", self.addr)
    }

    /// Open a WebSocket session as the given user
    pub async fn connect(&self, user_id: i64, username: &str) -> Socket {
        let url = format!("{}?token={}", self.ws_url(), self.token(user_id, username));
        let (socket, _response) = connect_async(url).await.expect("Failed to connect");
        socket
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Next JSON event from the server, skipping control frames
pub async fn next_event(socket: &mut Socket) -> Value {
    loop {
        let message = timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("Timed out waiting for an event")
            .expect("Socket closed")
            .expect("Socket error");
        match message {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected frame: {:?}", other),
        }
    }
}

/// Read events until one of `kind` arrives
pub async fn next_of_type(socket: &mut Socket, kind: &str) -> Value {
    loop {
        let event = next_event(socket).await;
        if event["type"] == kind {
            return event;
        }
    }
}

/// Consume the join sequence a fresh connection receives
pub async fn skip_join(socket: &mut Socket) {
    for _ in 0..3 {
        next_event(socket).await;
    }
}

pub async fn send_chat(socket: &mut Socket, content: &str) {
    let frame = json!({"type": "chat_message", "payload": {"content": content}});
    socket
        .send(Message::text(frame.to_string()))
        .await
        .expect("Failed to send chat message");
}

/// Assert that nothing but control frames arrives for a short while
pub async fn assert_silent(socket: &mut Socket) {
    let waited = timeout(Duration::from_millis(200), async {
        loop {
            match socket.next().await {
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                other => return other,
            }
        }
    })
    .await;
    assert!(waited.is_err(), "expected silence, got {:?}", waited);
}
