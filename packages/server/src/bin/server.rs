//! Hiroba chat server.
//!
//! Authenticated participants connect over WebSocket and every chat message
//! is fanned out to everyone in the room.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=change-me cargo run --bin hiroba-server
//! JWT_SECRET=change-me cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! JWT_SECRET=change-me cargo run --bin hiroba-server -- token --user-id 1 --username alice
//! ```

use std::{num::NonZeroUsize, sync::Arc};

use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use hiroba_server::{
    connection::ConnectionConfig,
    domain::{Identity, MessageStore, PasswordHasher, UserId, UserRepository, Username},
    hub::{Hub, HubConfig},
    infrastructure::{
        auth::{Argon2PasswordHasher, JwtAuthenticator},
        repository::{InMemoryMessageStore, InMemoryUserRepository},
    },
    ui::{Server, state::AppState},
    usecase::{
        GetHistoryUseCase, LoginUseCase, RegisterUserUseCase, SendMessageUseCase,
        get_history::DEFAULT_HISTORY_LIMIT,
    },
};
use hiroba_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time chat server with WebSocket fan-out", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Secret used to sign and verify session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Lifetime of issued tokens in hours (at most one year)
    #[arg(long, default_value = "24", value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_TTL_HOURS))]
    token_ttl_hours: i64,

    /// Outbound queue depth per connection
    #[arg(long, default_value = "256")]
    queue_capacity: NonZeroUsize,

    /// Depth of the hub's request queue
    #[arg(long, default_value = "1024")]
    command_capacity: NonZeroUsize,

    /// Messages kept in memory; the oldest are dropped beyond this
    #[arg(long, default_value = "10000")]
    history_capacity: NonZeroUsize,

    /// Number of messages returned by the history endpoint
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a session token for the given user and exit
    Token {
        #[arg(long)]
        user_id: i64,

        #[arg(long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let authenticator = Arc::new(JwtAuthenticator::with_ttl(
        args.jwt_secret.as_bytes(),
        TimeDelta::hours(args.token_ttl_hours),
    ));

    if let Some(Command::Token { user_id, username }) = args.command {
        let token = UserId::new(user_id)
            .and_then(|user_id| Ok(Identity::new(user_id, Username::new(username)?)))
            .map_err(|e| e.to_string())
            .and_then(|identity| authenticator.issue(&identity).map_err(|e| e.to_string()));
        match token {
            Ok(token) => println!("{}", token),
            Err(e) => {
                tracing::error!("Failed to issue token: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Initialize dependencies in order:
    // 1. Stores
    // 2. Hub
    // 3. UseCases
    // 4. Server

    // 1. Create stores (in-memory history and accounts)
    let store: Arc<dyn MessageStore> =
        Arc::new(InMemoryMessageStore::with_capacity(args.history_capacity));
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Start the hub control loop
    let hub = Hub::spawn(
        store.clone(),
        HubConfig {
            command_capacity: args.command_capacity,
        },
    );

    // 3. Create UseCases
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        store.clone(),
        hub.clone(),
        clock.clone(),
    ));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(store, args.history_limit));
    let register_user_usecase = Arc::new(RegisterUserUseCase::new(
        users.clone(),
        hasher.clone(),
        authenticator.clone(),
        clock.clone(),
    ));
    let login_usecase = Arc::new(LoginUseCase::new(users, hasher, authenticator.clone()));

    // 4. Create and run Server
    let connection_config = ConnectionConfig {
        queue_capacity: args.queue_capacity,
        ..ConnectionConfig::default()
    };
    let server = Server::new(AppState {
        hub,
        authenticator,
        send_message_usecase,
        get_history_usecase,
        register_user_usecase,
        login_usecase,
        connection_config,
        clock,
    });

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
