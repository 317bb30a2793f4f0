//! Database operations for apps
//!
//! Every query carries the ownership `Scope` as an explicit predicate:
//! a NULL owner bind means unscoped, anything else restricts rows to
//! that owner. Row mapping is manual; the enum columns are stored as
//! text.

use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::apps::model::{App, AppPayload, AppType, Framework};
use crate::policy::Scope;

fn app_from_row(row: &PgRow) -> App {
    App {
        id: row.get("id"),
        user_id: row.get("user_id"),
        domain_name: row.get("domain_name"),
        name: row.get("name"),
        app_type: AppType::from_str(row.get::<String, _>("app_type").as_str())
            .unwrap_or(AppType::Web),
        framework: Framework::from_str(row.get::<String, _>("framework").as_str())
            .unwrap_or(Framework::ServerRendered),
        description: row.get("description"),
        screenshot: row.get("screenshot"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// List apps visible under the scope
pub async fn list_apps(pool: &PgPool, scope: &Scope) -> Result<Vec<App>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, domain_name, name, app_type, framework, description,
               screenshot, created_at, updated_at
        FROM apps
        WHERE ($1::uuid IS NULL OR user_id = $1)
        ORDER BY created_at
        "#,
    )
    .bind(scope.owner())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(app_from_row).collect())
}

/// Get one app by id, if visible under the scope
pub async fn get_app(pool: &PgPool, scope: &Scope, id: Uuid) -> Result<Option<App>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, domain_name, name, app_type, framework, description,
               screenshot, created_at, updated_at
        FROM apps
        WHERE id = $1 AND ($2::uuid IS NULL OR user_id = $2)
        "#,
    )
    .bind(id)
    .bind(scope.owner())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(app_from_row))
}

/// Insert a new app for the given (policy-pinned) owner
pub async fn insert_app(pool: &PgPool, owner: Uuid, payload: &AppPayload) -> Result<App, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO apps (id, user_id, domain_name, name, app_type, framework,
                          description, screenshot, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(&payload.domain_name)
    .bind(&payload.name)
    .bind(payload.app_type.as_str())
    .bind(payload.framework.as_str())
    .bind(&payload.description)
    .bind(&payload.screenshot)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(App {
        id,
        user_id: owner,
        domain_name: payload.domain_name.clone(),
        name: payload.name.clone(),
        app_type: payload.app_type,
        framework: payload.framework,
        description: payload.description.clone(),
        screenshot: payload.screenshot.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Replace the mutable fields of an app visible under the scope
///
/// The owner column is never touched. Returns `None` when the row does
/// not exist or is not visible, which the handler surfaces as 404.
pub async fn update_app(
    pool: &PgPool,
    scope: &Scope,
    id: Uuid,
    payload: &AppPayload,
) -> Result<Option<App>, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query(
        r#"
        UPDATE apps
        SET domain_name = $3, name = $4, app_type = $5, framework = $6,
            description = $7, screenshot = $8, updated_at = $9
        WHERE id = $1 AND ($2::uuid IS NULL OR user_id = $2)
        RETURNING id, user_id, domain_name, name, app_type, framework, description,
                  screenshot, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(scope.owner())
    .bind(&payload.domain_name)
    .bind(&payload.name)
    .bind(payload.app_type.as_str())
    .bind(payload.framework.as_str())
    .bind(&payload.description)
    .bind(&payload.screenshot)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(app_from_row))
}

/// Hard-delete an app visible under the scope
///
/// Returns `false` when nothing was deleted.
pub async fn delete_app(pool: &PgPool, scope: &Scope, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM apps
        WHERE id = $1 AND ($2::uuid IS NULL OR user_id = $2)
        "#,
    )
    .bind(id)
    .bind(scope.owner())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
