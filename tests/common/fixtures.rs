//! Canned upstream payloads

use serde_json::json;

use super::constants::*;

/// The record the stub upstream returns on a hit, shaped like a real
/// LRCLIB `/api/get` response. The fractional duration is deliberate:
/// responses from the service must carry it truncated to whole seconds.
pub fn found_record() -> serde_json::Value {
    json!({
        "id": 3396226,
        "name": TEST_TRACK,
        "trackName": TEST_TRACK,
        "artistName": TEST_ARTIST,
        "albumName": TEST_ALBUM,
        "duration": 257.3,
        "instrumental": false,
        "plainLyrics": TEST_PLAIN_LYRICS,
        "syncedLyrics": TEST_SYNCED_LYRICS,
    })
}
