//! Identity Store
//!
//! User records, credential verification, and opaque bearer tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── users.rs    - User model and database operations
//! ├── tokens.rs   - Opaque token issuance (get-or-create) and resolution
//! ├── username.rs - Unique username derivation
//! ├── hooks.rs    - Fire-and-forget post-registration dispatch
//! └── handlers/   - HTTP handlers (signup, login, me)
//! ```
//!
//! # Token Semantics
//!
//! Tokens are opaque keys stored server-side, one live token per user.
//! Authenticating twice while a token is outstanding returns the same
//! token. Resolution (`tokens::resolve_token`) is the sole mechanism a
//! request uses to establish identity; handlers receive it as an explicit
//! parameter via the auth middleware, never from ambient state.

/// User data model and database operations
pub mod users;

/// Opaque bearer token issuance and resolution
pub mod tokens;

/// Unique username derivation
pub mod username;

/// Post-registration hooks
pub mod hooks;

/// HTTP handlers for identity endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use handlers::{get_me, login, signup};
