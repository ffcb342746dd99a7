//! External services integration
//!
//! This module contains integrations with external APIs and services:
//! - LRCLIB API client for lyrics retrieval

pub mod lrclib;

// Re-export main types
pub use lrclib::{LrclibProvider, LyricsProvider};
