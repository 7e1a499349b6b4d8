//! Server creation and management utilities
//!
//! Used by the `events-server` binary and by client tests, which bind the
//! backend to an ephemeral port.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/events", get(routes::list_events).post(routes::create_event))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server handle that can be used to shut down the server
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
}

impl ServerHandle {
    /// Root URL, e.g. `http://127.0.0.1:3004`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the events collection
    pub fn events_url(&self) -> String {
        format!("{}/events", self.base_url())
    }

    /// Signal the server to shut down gracefully
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn bind(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    Ok(TcpListener::bind(addr).await?)
}

/// Start the server in a background task, returning a handle for shutdown.
///
/// Pass port 0 to let the OS choose.
pub async fn start_server(state: AppState, host: &str, port: u16) -> anyhow::Result<ServerHandle> {
    let listener = bind(host, port).await?;
    let addr = listener.local_addr()?;
    let app = create_router(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Received shutdown signal");
            })
            .await
            .ok();
    });

    tracing::info!("Server started on {}", addr);

    Ok(ServerHandle { addr, shutdown_tx })
}

/// Start the server and block until it shuts down (for CLI usage)
pub async fn run_server_blocking(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = bind(host, port).await?;
    let app = create_router(state);

    tracing::info!("Server running on http://{}/events", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
