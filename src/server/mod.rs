//! Server Module
//!
//! Application state, configuration loading, and app construction.

/// Server initialization
pub mod init;

/// Application state
pub mod state;

/// Configuration loading
pub mod config;

pub use init::{create_app, create_app_with_pool};
pub use state::AppState;
