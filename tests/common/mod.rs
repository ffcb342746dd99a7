//! Common test infrastructure
//!
//! This module provides everything the end-to-end tests need: a stub
//! LRCLIB upstream with scriptable behavior, and a helper that spawns the
//! full app against it on a random port.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{found_record, TestServer, UpstreamBehavior, TEST_ARTIST, TEST_TRACK};
//!
//! #[tokio::test]
//! async fn test_lookup() {
//!     let server = TestServer::spawn(UpstreamBehavior::Found(found_record())).await;
//!     let response = server
//!         .get_lyrics(&[("artist_name", TEST_ARTIST), ("track_name", TEST_TRACK)])
//!         .await;
//!     assert!(response.status().is_success());
//! }
//! ```

mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::found_record;
#[allow(unused_imports)]
pub use server::{StubLrclib, TestServer, UpstreamBehavior};
