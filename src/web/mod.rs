//! # HTTP API
//!
//! JSON API over an ADR repository, served with axum.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/health` | `{"status":"ok"}` |
//! | GET | `/api/adr?q=` | `[{number,title,status,date}]` |
//! | GET | `/api/adr/statuses` | status names in canonical order |
//! | GET | `/api/adr/:number` | `{number,title,status,date,content}` |
//! | PATCH | `/api/adr/:number/status` | updated record, body `{"status", "supersededBy"?}` |
//!
//! Data endpoints answer 503 when no repository is configured. PATCH needs a
//! status updater (and a superseder for `Superseded`), otherwise 501.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::storage::{FileRepository, Repository, StatusUpdater, Superseder};

/// Shared server state
///
/// Each capability is optional so the server can start without a workspace
/// and report what is missing per request.
#[derive(Clone, Default)]
pub struct AppState {
    repo: Option<Arc<dyn Repository>>,
    updater: Option<Arc<dyn StatusUpdater>>,
    superseder: Option<Arc<dyn Superseder>>,
}

impl AppState {
    /// State with no repository; data endpoints answer 503
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// State with every capability backed by one file repository
    pub fn for_repository(repo: FileRepository) -> Self {
        let repo = Arc::new(repo);
        Self::default()
            .with_repository(repo.clone())
            .with_status_updater(repo.clone())
            .with_superseder(repo)
    }

    pub fn with_repository(mut self, repo: Arc<dyn Repository>) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_status_updater(mut self, updater: Arc<dyn StatusUpdater>) -> Self {
        self.updater = Some(updater);
        self
    }

    pub fn with_superseder(mut self, superseder: Arc<dyn Superseder>) -> Self {
        self.superseder = Some(superseder);
        self
    }
}

async fn log_request(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = next.run(req).await;

    info!(
        %method,
        %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    resp
}

/// Builds the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/adr", get(handlers::list_adrs))
        .route("/api/adr/statuses", get(handlers::statuses))
        .route("/api/adr/:number", get(handlers::get_adr))
        .route("/api/adr/:number/status", patch(handlers::update_status))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
}

/// Serves the API on `addr` until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}
