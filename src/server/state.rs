/**
 * Application State
 *
 * The central state container for the Axum application. The only shared
 * resource is the database pool: there is no other persistent in-process
 * state, so any number of requests can execute concurrently across
 * independent identities.
 *
 * The pool is optional: without a configured database the server still
 * starts, and data routes answer 503 instead.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` if `DATABASE_URL` is not set or the connection failed.
    /// Handlers check for `None` before touching the store.
    pub db_pool: Option<PgPool>,
}

/// Allow handlers to extract the pool directly via `State(Option<PgPool>)`
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
