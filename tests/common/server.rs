//! Test server lifecycle management
//!
//! Each test gets two isolated servers on random ports: a stub standing in
//! for the LRCLIB API, and the real lyricsd app wired to it through a
//! throwaway SQLite database. Both shut down when the handles drop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tempfile::TempDir;
use tokio::net::TcpListener;

use lyricsd::core::data::store::{self, SqliteStore, StoreOptions};
use lyricsd::core::lookup::LookupService;
use lyricsd::core::services::lrclib::LrclibProvider;
use lyricsd::server::{make_app, AppState};

use super::constants::*;

/// What the stub upstream does with each `/api/get` request
#[derive(Clone)]
pub enum UpstreamBehavior {
    /// 200 with the given record
    Found(serde_json::Value),
    /// 404 the way LRCLIB reports a missing track
    NotFound,
    /// 500 with an empty body
    ServerError,
    /// 200 with a body that is not JSON
    Malformed,
    /// Wait before answering 200 with the given record
    Slow(Duration, serde_json::Value),
}

#[derive(Clone)]
struct StubState {
    behavior: UpstreamBehavior,
    hits: Arc<AtomicUsize>,
}

async fn api_get(State(state): State<StubState>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    match state.behavior {
        UpstreamBehavior::Found(ref body) => Json(body.clone()).into_response(),
        UpstreamBehavior::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "code": 404,
                "name": "TrackNotFound",
                "message": "Failed to find specified track"
            })),
        )
            .into_response(),
        UpstreamBehavior::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        UpstreamBehavior::Malformed => "this is not json".into_response(),
        UpstreamBehavior::Slow(delay, ref body) => {
            tokio::time::sleep(delay).await;
            Json(body.clone()).into_response()
        }
    }
}

/// Stand-in for the LRCLIB API, listening on a random local port
pub struct StubLrclib {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl StubLrclib {
    pub async fn spawn(behavior: UpstreamBehavior) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            behavior,
            hits: hits.clone(),
        };

        let app = Router::new()
            .route("/api/get", get(api_get))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub upstream");
        let port = listener
            .local_addr()
            .expect("Failed to get stub address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Stub upstream failed");
        });

        Self {
            base_url,
            hits,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Number of `/api/get` requests the stub has served
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubLrclib {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// The lyricsd app under test, wired to a stub upstream
///
/// When dropped, both servers shut down and the temp database is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The stub upstream, for asserting on fetch counts
    pub upstream: StubLrclib,

    // Private fields - keep resources alive until drop
    _db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns the app with a generous provider timeout
    pub async fn spawn(behavior: UpstreamBehavior) -> Self {
        Self::spawn_with_provider_timeout(behavior, Duration::from_secs(5)).await
    }

    /// Spawns the app with an explicit provider timeout, for tests that
    /// need the upstream to look unreachable
    pub async fn spawn_with_provider_timeout(
        behavior: UpstreamBehavior,
        provider_timeout: Duration,
    ) -> Self {
        let upstream = StubLrclib::spawn(behavior).await;

        let db_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = db_dir.path().join("lyricsd-test.db");

        let pool = store::connect(&StoreOptions::new(&db_path))
            .await
            .expect("Failed to open test store");
        let lookup = LookupService::new(
            SqliteStore::new(pool),
            Arc::new(LrclibProvider::new(&upstream.base_url, provider_timeout)),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let app = make_app(AppState::new(lookup));

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            upstream,
            _db_dir: db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// GET /getlyrics with the given query parameters
    pub async fn get_lyrics(&self, params: &[(&str, &str)]) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/getlyrics", self.base_url))
            .query(params)
            .send()
            .await
            .expect("Request failed")
    }

    /// GET an arbitrary path
    pub async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Waits for the server to become ready by polling the / endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
