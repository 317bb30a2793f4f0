//! Apps Resource
//!
//! Owner-scoped deployable projects: model, repository, and HTTP handlers.

/// App model and payloads
pub mod model;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use model::{App, AppPatch, AppPayload, AppType, Framework};
