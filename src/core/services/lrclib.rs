//! Remote lyrics provider client for LRCLIB-compatible services.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::core::lyrics::{LookupQuery, RawLyrics};
use crate::error::ProviderError;

/// Seam between the lookup flow and the remote service, so tests can swap in
/// stubs. A clean "no data" answer is `Ok(None)`; only transport-level
/// trouble is an error.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    async fn fetch(&self, query: &LookupQuery) -> Result<Option<RawLyrics>, ProviderError>;
}

#[derive(Clone)]
pub struct LrclibProvider {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("lyricsd v{} (https://github.com/lyricsd/lyricsd)", version);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn query_params(query: &LookupQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("artist_name", query.artist_name.clone()),
        ("track_name", query.track_name.clone()),
    ];
    if let Some(ref album) = query.album_name {
        params.push(("album_name", album.clone()));
    }
    if let Some(duration) = query.duration {
        params.push(("duration", duration.to_string()));
    }
    params
}

#[async_trait]
impl LyricsProvider for LrclibProvider {
    async fn fetch(&self, query: &LookupQuery) -> Result<Option<RawLyrics>, ProviderError> {
        let url = format!("{}/api/get", self.base_url);
        debug!(
            "Fetching lyrics from remote for: {} - {}",
            query.artist_name, query.track_name
        );

        let response = self
            .client
            .get(&url)
            .query(&query_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Any non-success answer means the remote has nothing for us,
            // 404 included. Single attempt, no retry.
            debug!(
                "Remote returned {} for: {} - {}",
                status, query.artist_name, query.track_name
            );
            return Ok(None);
        }

        let raw: RawLyrics = response.json().await?;
        Ok(Some(raw))
    }
}
