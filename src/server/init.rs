/**
 * Server Initialization
 *
 * Builds the Axum application: loads the (optional) database, assembles
 * the application state, and configures the router.
 */

use axum::Router;

use crate::routes::router::create_router;
use crate::server::config::load_database;
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// Resilient by design: a missing or unreachable database does not
/// prevent startup; the affected routes answer 503 instead.
pub async fn create_app() -> Router<()> {
    tracing::info!("initializing apphub server");

    let db_pool = load_database().await;

    let app_state = AppState { db_pool };

    create_router(app_state)
}

/// Build the application around an existing pool (or none)
///
/// Used by integration tests to drive the full router without the
/// environment-based configuration path.
pub fn create_app_with_pool(db_pool: Option<sqlx::PgPool>) -> Router<()> {
    create_router(AppState { db_pool })
}
