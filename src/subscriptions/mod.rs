//! Subscriptions Resource
//!
//! The binding of one App to one Plan, with one-shot uniqueness and
//! soft-delete cancellation.
//!
//! # Module Structure
//!
//! ```text
//! subscriptions/
//! ├── mod.rs       - Module exports
//! ├── model.rs     - Record and payload types
//! ├── db.rs        - Repository (scope-predicated queries)
//! ├── lifecycle.rs - Lifecycle controller (create / rebind / soft delete)
//! └── handlers.rs  - HTTP handlers
//! ```

/// Subscription model and payloads
pub mod model;

/// Database operations
pub mod db;

/// Lifecycle controller
pub mod lifecycle;

/// HTTP handlers
pub mod handlers;

pub use model::{Subscription, SubscriptionPatch, SubscriptionPayload};
