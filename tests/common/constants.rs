//! Shared constants for end-to-end tests
//!
//! The canned track below is what the stub upstream serves; tests that
//! assert on response fields should reference these rather than repeating
//! string literals.

/// Artist of the canned track
pub const TEST_ARTIST: &str = "OneRepublic";

/// Title of the canned track
pub const TEST_TRACK: &str = "Counting Stars";

/// Album of the canned track
pub const TEST_ALBUM: &str = "Native";

/// Plain lyrics body of the canned track
pub const TEST_PLAIN_LYRICS: &str = "Lately, I've been, I've been losing sleep";

/// Synced lyrics body of the canned track
pub const TEST_SYNCED_LYRICS: &str = "[00:14.51] Lately, I've been, I've been losing sleep";

/// How long to wait for a spawned server to start accepting requests
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Pause between readiness probes
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 25;
