//! Canonical cache key derivation.
//!
//! Two queries name the same song when their trimmed, lowercased
//! (artist, track, album) triples match. An absent album participates as the
//! empty string so `album_name=` and no album at all land on the same key.

/// Canonical lookup key. Fields hold the normalized form, never raw input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey {
    pub artist: String,
    pub track: String,
    pub album: String,
}

impl NormalizedKey {
    pub fn new(artist: &str, track: &str, album: Option<&str>) -> Self {
        Self {
            artist: normalize_part(artist),
            track: normalize_part(track),
            album: normalize_part(album.unwrap_or("")),
        }
    }
}

fn normalize_part(value: &str) -> String {
    value.trim().to_lowercase()
}
