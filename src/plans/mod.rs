//! Plans Resource
//!
//! Global pricing tiers: model, repository, and HTTP handlers.

/// Plan model and payloads
pub mod model;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use model::{Plan, PlanPatch, PlanPayload, PlanTier};
