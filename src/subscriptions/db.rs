//! Database operations for subscriptions
//!
//! The ownership scope arrives as an explicit predicate: a NULL owner
//! bind means unscoped, and the active-only flag hides soft-deleted rows
//! from listings. The `(app_id, plan_id)` unique constraint does the
//! uniqueness enforcement; violations bubble up as database errors for
//! the lifecycle controller to classify.

use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::policy::Scope;
use crate::subscriptions::model::Subscription;

fn subscription_from_row(row: &PgRow) -> Subscription {
    Subscription {
        id: row.get("id"),
        user_id: row.get("user_id"),
        app_id: row.get("app_id"),
        plan_id: row.get("plan_id"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// List subscriptions visible under the scope
pub async fn list_subscriptions(pool: &PgPool, scope: &Scope) -> Result<Vec<Subscription>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, app_id, plan_id, is_active, created_at, updated_at
        FROM subscriptions
        WHERE ($1::uuid IS NULL OR user_id = $1)
          AND (is_active OR NOT $2)
        ORDER BY created_at
        "#,
    )
    .bind(scope.owner())
    .bind(scope.active_only())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(subscription_from_row).collect())
}

/// Get one subscription by id, if visible under the scope
///
/// With a non-active-only scope this also returns soft-deleted rows,
/// which is what keeps cancelled subscriptions auditable by id.
pub async fn get_subscription(
    pool: &PgPool,
    scope: &Scope,
    id: Uuid,
) -> Result<Option<Subscription>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, app_id, plan_id, is_active, created_at, updated_at
        FROM subscriptions
        WHERE id = $1
          AND ($2::uuid IS NULL OR user_id = $2)
          AND (is_active OR NOT $3)
        "#,
    )
    .bind(id)
    .bind(scope.owner())
    .bind(scope.active_only())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(subscription_from_row))
}

/// Insert a new active subscription for the given (policy-pinned) owner
pub async fn insert_subscription(
    pool: &PgPool,
    owner: Uuid,
    app_id: Uuid,
    plan_id: Uuid,
) -> Result<Subscription, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO subscriptions (id, user_id, app_id, plan_id, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, TRUE, $5, $6)
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(app_id)
    .bind(plan_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Subscription {
        id,
        user_id: owner,
        app_id,
        plan_id,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Rebind a subscription to a new (app, plan) pair
///
/// A single UPDATE: the unique constraint re-validates the new pair in
/// the same statement, so a conflicting update leaves the row untouched.
/// The owner and active state are never changed here.
pub async fn update_pair(
    pool: &PgPool,
    scope: &Scope,
    id: Uuid,
    app_id: Uuid,
    plan_id: Uuid,
) -> Result<Option<Subscription>, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query(
        r#"
        UPDATE subscriptions
        SET app_id = $3, plan_id = $4, updated_at = $5
        WHERE id = $1 AND ($2::uuid IS NULL OR user_id = $2)
        RETURNING id, user_id, app_id, plan_id, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(scope.owner())
    .bind(app_id)
    .bind(plan_id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(subscription_from_row))
}

/// Soft-delete: flip is_active to false, never remove the row
///
/// Returns `false` when no row was visible under the scope. Idempotent
/// on already-inactive rows.
pub async fn deactivate(pool: &PgPool, scope: &Scope, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE subscriptions
        SET is_active = FALSE, updated_at = $3
        WHERE id = $1 AND ($2::uuid IS NULL OR user_id = $2)
        "#,
    )
    .bind(id)
    .bind(scope.owner())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
