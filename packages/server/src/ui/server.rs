//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        create_group, delete_group, delete_me, edit_me, get_group_detail, get_groups, get_me,
        get_messages, get_user_profile, health_check, join_group, leave_group, post_message,
        sign_up, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Group chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(bootstrap::build_state(&config));
/// server.run("127.0.0.1", 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router with every HTTP and WebSocket route
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/groups/{group_id}/chat", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/users", post(sign_up))
            .route("/api/users/me", get(get_me).patch(edit_me).delete(delete_me))
            .route("/api/users/{username}", get(get_user_profile))
            .route("/api/groups", get(get_groups).post(create_group))
            .route(
                "/api/groups/{group_id}",
                get(get_group_detail).delete(delete_group),
            )
            .route("/api/groups/{group_id}/members", post(join_group))
            .route("/api/groups/{group_id}/members/me", delete(leave_group))
            .route(
                "/api/groups/{group_id}/messages",
                get(get_messages).post(post_message),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self, host: &str, port: u16) -> std::io::Result<()> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws/groups/{{group_id}}/chat", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        tracing::info!("Group chat server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
