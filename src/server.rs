//! HTTP front end for the URL parse path
//!
//! `GET /api/task?ttl=A1F&ry=0,0&...` validates the query and answers with
//! the resulting arguments and the flags that launch a solver with them.
//! Every request builds its own [`Args`]; the layout is shared read only.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::args::Args;
use crate::board::Layout;
use crate::config::ServerConfig;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub category: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Validated task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub args: Args,
    pub cmd_args: Vec<String>,
}

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Board symbol layout
    pub layout: Arc<Layout>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout: Arc::new(layout),
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/task", get(validate_task))
        .with_state(state)
}

/// Bind and serve until the process is interrupted
pub async fn serve(config: &ServerConfig, layout: Layout) -> anyhow::Result<()> {
    let mut router = create_router(AppState::new(layout));
    if config.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    let addr: SocketAddr = config.bind_address;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Task server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolve on Ctrl+C; without a signal handler, never resolve
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
        }
        Err(e) => {
            tracing::error!("Failed to wait for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

/// Validate task parameters from the query string
async fn validate_task(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    match Args::from_query(query.as_deref().unwrap_or_default(), state.layout.as_ref()) {
        Ok(args) => {
            let cmd_args = args.cmd_args();
            (
                StatusCode::OK,
                Json(ApiResponse::success(TaskResponse { args, cmd_args })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected task query");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    success: false,
                    error: e.to_string(),
                    category: e.category().to_string(),
                }),
            )
                .into_response()
        }
    }
}
