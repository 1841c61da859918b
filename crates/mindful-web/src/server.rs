//! Axum server setup and router construction.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use mindful::ui::Journal;
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};
use crate::view::SharedHtml;

/// Build the full axum router.
///
/// The router serves:
/// - The single page at `/`
/// - REST API at `/api/*`
pub fn build_router(journal: Arc<Journal>, rendered: SharedHtml) -> Router {
    let app_state = AppState { journal, rendered };

    // CORS layer so the API can be driven from a page served elsewhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::get_index))
        .route("/api/entries", get(api::get_entries))
        .route("/api/panels", get(api::get_panels))
        .route("/api/reflection", post(api::post_reflection))
        .route("/api/goal", post(api::post_goal))
        .with_state(app_state)
        .layer(cors)
}

/// Bind the listener, spawn the server and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Web server stopped: {e}");
        }
    });

    Ok(addr)
}
