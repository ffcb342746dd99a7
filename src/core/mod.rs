//! Core functionality modules
//!
//! This module contains all core business logic organized into logical layers:
//! - `data`: SQLite-backed lyrics store
//! - `services`: External API integrations and service clients
//! - `key`: Cache key normalization
//! - `lyrics`: Lookup queries, remote payloads, and stored records
//! - `lookup`: The read-through lookup flow

pub mod data;
pub mod key;
pub mod lookup;
pub mod lyrics;
pub mod services;

// Re-export commonly used types for convenience
pub use data::store::SqliteStore;
pub use key::NormalizedKey;
pub use lookup::LookupService;
pub use lyrics::{LookupQuery, LyricsRecord};
