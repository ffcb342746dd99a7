//! Data layer modules
//!
//! This module contains all database-related functionality:
//! - SQLite connection pool setup and migrations
//! - The append-only lyrics store

pub mod store;

// Re-export main types
pub use store::{SqliteStore, StoreOptions};
