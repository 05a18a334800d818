//! Bookhaven group chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin bookhaven-server
//! cargo run --bin bookhaven-server -- --host 0.0.0.0 --port 3000
//! ```

use bookhaven_server::{
    bootstrap::build_state,
    config::{DEFAULT_MAX_MESSAGE_CHARS, ServerConfig},
    ui::Server,
};
use bookhaven_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bookhaven-server")]
#[command(about = "Group chat server for Bookhaven discussion groups", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "BOOKHAVEN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "BOOKHAVEN_PORT", default_value = "8080")]
    port: u16,

    /// Maximum message length in characters
    #[arg(long, env = "BOOKHAVEN_MAX_MESSAGE_CHARS", default_value_t = DEFAULT_MAX_MESSAGE_CHARS)]
    max_message_chars: usize,
}

#[tokio::main]
async fn main() {
    setup_logger("bookhaven_server", env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        max_message_chars: args.max_message_chars,
    };

    let server = Server::new(build_state(&config));
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
