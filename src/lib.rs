//! lyricsd library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod server;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{LyricsdError, Result};
pub use server::{make_app, run_server, AppState};
