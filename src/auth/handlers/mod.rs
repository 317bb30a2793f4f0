//! Authentication Handlers Module
//!
//! HTTP handlers for the identity endpoints.
//!
//! # Handlers
//!
//! - **`signup`** - POST /signup - user registration (201)
//! - **`login`** - POST /login - authentication, token get-or-create (200)
//! - **`get_me`** - GET /me - current user profile (requires bearer token)

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};

pub use login::login;
pub use me::get_me;
pub use signup::signup;
