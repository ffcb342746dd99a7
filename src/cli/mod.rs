//! Command Line Interface module
//!
//! This module contains all CLI commands:
//! - `serve`: run the HTTP lookup service
//! - `lookup`: resolve lyrics for a single track from the terminal
//! - `config`: inspect and edit the configuration

pub mod config;
pub mod lookup;
pub mod serve;
