//! Hiroba terminal chat client.
//!
//! Connects to the chat server with a session token, prints everything said
//! in the room and sends each line typed at the prompt.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! A rejected token ends the client immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --token <token>
//! HIROBA_TOKEN=<token> cargo run --bin hiroba-client -- -u ws://127.0.0.1:3000/api/chat/ws
//! ```

use clap::Parser;

use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal client for the Hiroba chat server", long_about = None)]
struct Args {
    /// Session token issued by the server (`hiroba-server token ...`)
    #[arg(short = 't', long, env = "HIROBA_TOKEN", hide_env_values = true)]
    token: String,

    /// WebSocket endpoint of the chat server
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/api/chat/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = hiroba_client::run_client(args.url, args.token).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
