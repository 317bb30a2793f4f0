//! Routes Module
//!
//! Router assembly and route tables.

/// Router assembly
pub mod router;

/// Route tables
pub mod api_routes;

pub use router::create_router;
