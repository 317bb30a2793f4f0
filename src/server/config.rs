/**
 * Server Configuration
 *
 * Loads configuration from the environment. The database is optional:
 * failures are logged and the server continues without it, answering 503
 * on data routes rather than refusing to start.
 */

use sqlx::PgPool;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// Reads `DATABASE_URL`, connects, and runs the embedded migrations.
/// Returns `None` on any failure so startup never blocks on the store.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, data routes will answer 503");
            return None;
        }
    };

    tracing::info!("connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("failed to create database connection pool: {:?}", e);
            tracing::warn!("continuing without a database");
            return None;
        }
    };

    tracing::info!("database connection pool created");

    tracing::info!("running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("database migrations completed"),
        Err(e) => {
            // Migrations may already be applied by an operator.
            tracing::error!("failed to run database migrations: {:?}", e);
            tracing::warn!("continuing; database may not be up to date");
        }
    }

    Some(pool)
}

/// Server bind port (`SERVER_PORT`, default 3000)
pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        // Only meaningful when SERVER_PORT is unset in the test env.
        if std::env::var("SERVER_PORT").is_err() {
            assert_eq!(server_port(), 3000);
        }
    }
}
