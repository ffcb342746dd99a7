use anyhow::Result;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::signal;
use tracing::{info, warn};

use crate::core::lyrics::LookupQuery;
use crate::error::LyricsdError;

use super::state::{AppState, SharedLookup};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
}

#[derive(Serialize)]
struct HealthStatus {
    pub status: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    pub error: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

fn error_response(err: LyricsdError) -> Response {
    let status = match &err {
        LyricsdError::NotFound => StatusCode::NOT_FOUND,
        LyricsdError::Provider(_) => StatusCode::BAD_GATEWAY,
        LyricsdError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = ErrorBody {
        error: err.to_string(),
    };
    (status, Json(body)).into_response()
}

async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(stats)
}

async fn health(State(lookup): State<SharedLookup>) -> Response {
    match lookup.store().ping().await {
        Ok(()) => Json(HealthStatus { status: "ok" }).into_response(),
        Err(err) => {
            warn!("Health check failed: {}", err);
            let body = ErrorBody {
                error: err.to_string(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

async fn get_lyrics(
    State(lookup): State<SharedLookup>,
    Query(query): Query<LookupQuery>,
) -> Response {
    match lookup.lookup(&query).await {
        Ok(record) => Json(record).into_response(),
        Err(LyricsdError::NotFound) => error_response(LyricsdError::NotFound),
        Err(err) => {
            warn!(
                "Lookup failed for '{}' - '{}': {}",
                query.artist_name, query.track_name, err
            );
            error_response(err)
        }
    }
}

pub fn make_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/getlyrics", get(get_lyrics))
        .with_state(state)
}

pub async fn run_server(bind_address: &str, state: AppState) -> Result<()> {
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to create SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
