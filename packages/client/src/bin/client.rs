//! Terminal client for Bookhaven group chat.
//!
//! Joins one group's chat room with an access token and sends lines typed
//! on stdin. Reconnects on disconnection (max 5 attempts, 5 seconds apart);
//! a refused connection exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin bookhaven-client -- --group-id 1 --token <token>
//! ```

use clap::Parser;

use bookhaven_client::run_client;
use bookhaven_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "bookhaven-client")]
#[command(about = "Terminal client for Bookhaven group chat", long_about = None)]
struct Args {
    /// Group whose chat room to join
    #[arg(short = 'g', long)]
    group_id: i64,

    /// Access token returned at sign-up
    #[arg(short = 't', long, env = "BOOKHAVEN_TOKEN")]
    token: String,

    /// Base WebSocket URL of the server
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger("bookhaven_client", env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.group_id, args.token).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
