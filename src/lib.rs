//! apphub — multi-tenant resource-management API
//!
//! Authenticated users register Apps (deployable projects), browse shared
//! Plans (pricing tiers), and create Subscriptions binding one App to one
//! Plan. The core of the crate is the authorization-scoped resource
//! lifecycle: who may see and modify which records, how identity is
//! established and carried across requests, and how cancellation is
//! represented without destroying history.
//!
//! # Module Structure
//!
//! - **`auth`** - identity store: users, opaque bearer tokens
//!   (get-or-create), signup/login/me handlers
//! - **`policy`** - ownership policy: the pure scoping decision table
//! - **`apps`**, **`plans`**, **`subscriptions`** - resource repositories
//!   and handlers; `subscriptions::lifecycle` is the lifecycle controller
//! - **`middleware`** - bearer-token authentication
//! - **`routes`** - router assembly
//! - **`server`** - application state and configuration
//! - **`error`** - API error taxonomy and HTTP conversion
//!
//! # Invariants
//!
//! - Apps and subscriptions are visible and mutable only by their owner;
//!   a mismatch surfaces as 404, never 403.
//! - The subscription `(app, plan)` pair is unique across active and
//!   inactive rows, enforced by a store constraint.
//! - Subscription deletion is soft: `is_active` flips to false, the row
//!   and its timestamps remain fetchable by id.
//! - Authenticating while a token is outstanding returns that same token.

/// API error taxonomy
pub mod error;

/// Ownership policy
pub mod policy;

/// PATCH field semantics
pub mod patch;

/// Identity store
pub mod auth;

/// Apps resource
pub mod apps;

/// Plans resource
pub mod plans;

/// Subscriptions resource and lifecycle controller
pub mod subscriptions;

/// Authentication middleware
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup
pub mod server;

pub use error::ApiError;
pub use server::{create_app, create_app_with_pool, AppState};
