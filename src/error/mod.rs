//! API Error Module
//!
//! Error taxonomy for the whole API plus conversion to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions and status mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! All handlers return `Result<_, ApiError>` and rely on the
//! `IntoResponse` conversion to build the JSON error body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{is_foreign_key_violation, is_unique_violation, ApiError};
