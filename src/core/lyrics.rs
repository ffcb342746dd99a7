//! Lyrics record types and the provider-response field policy.

use serde::{Deserialize, Serialize};

use crate::core::key::NormalizedKey;

/// An inbound lookup: who is asking for what. Deserialized straight from the
/// HTTP query string, built by hand in the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupQuery {
    pub artist_name: String,
    pub track_name: String,
    pub album_name: Option<String>,
    pub duration: Option<i64>,
}

impl LookupQuery {
    pub fn key(&self) -> NormalizedKey {
        NormalizedKey::new(
            &self.artist_name,
            &self.track_name,
            self.album_name.as_deref(),
        )
    }
}

/// Raw record as the remote service returns it. Every field is optional;
/// the selection policy in [`LyricsInput::from_remote`] fills the gaps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLyrics {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub duration: Option<f64>,
    pub instrumental: Option<bool>,
    pub plain_lyrics: Option<String>,
    pub synced_lyrics: Option<String>,
}

/// A record ready to persist: all fallbacks applied, no id yet. The store
/// assigns the id and truncates the duration when it writes.
#[derive(Debug, Clone)]
pub struct LyricsInput {
    pub name: String,
    pub artist_name: String,
    pub track_name: String,
    pub album_name: Option<String>,
    pub duration: Option<f64>,
    pub instrumental: Option<bool>,
    pub plain_lyrics: String,
    pub synced_lyrics: Option<String>,
}

impl LyricsInput {
    /// Merge a remote response with the query that triggered it.
    ///
    /// Precedence: the caller's album wins over the provider's; the display
    /// name falls back to the queried track name; lyrics text defaults to
    /// empty rather than null; an empty synced payload collapses to none.
    pub fn from_remote(raw: RawLyrics, query: &LookupQuery) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| query.track_name.clone()),
            artist_name: query.artist_name.clone(),
            track_name: query.track_name.clone(),
            album_name: query.album_name.clone().or(raw.album_name),
            duration: raw.duration,
            instrumental: raw.instrumental,
            plain_lyrics: raw.plain_lyrics.unwrap_or_default(),
            synced_lyrics: raw.synced_lyrics.filter(|s| !s.is_empty()),
        }
    }
}

/// The canonical cached entity, as stored and as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LyricsRecord {
    pub id: i64,
    pub name: String,
    pub artist_name: String,
    pub track_name: String,
    pub album_name: Option<String>,
    pub duration: Option<i64>,
    pub instrumental: Option<bool>,
    pub plain_lyrics: String,
    pub synced_lyrics: Option<String>,
}
