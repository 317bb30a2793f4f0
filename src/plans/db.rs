//! Database operations for plans
//!
//! Plans are unscoped (the policy returns `Scope::Unscoped`), but the
//! queries still take the scope predicate so the repository contract is
//! uniform across resources.

use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::plans::model::{Plan, PlanPayload, PlanTier};
use crate::policy::Scope;

fn plan_from_row(row: &PgRow) -> Plan {
    Plan {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: PlanTier::from_price(row.get::<i32, _>("price")).unwrap_or(PlanTier::Free),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// List all plans
pub async fn list_plans(pool: &PgPool, _scope: &Scope) -> Result<Vec<Plan>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, description, price, created_at, updated_at
        FROM plans
        ORDER BY price, created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(plan_from_row).collect())
}

/// Get one plan by id
pub async fn get_plan(pool: &PgPool, _scope: &Scope, id: Uuid) -> Result<Option<Plan>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, price, created_at, updated_at
        FROM plans
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(plan_from_row))
}

/// Insert a new plan
pub async fn insert_plan(pool: &PgPool, tier: PlanTier, payload: &PlanPayload) -> Result<Plan, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO plans (id, name, description, price, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(tier.price())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Plan {
        id,
        name: payload.name.clone(),
        description: payload.description.clone(),
        price: tier,
        created_at: now,
        updated_at: now,
    })
}

/// Replace the mutable fields of a plan
pub async fn update_plan(
    pool: &PgPool,
    _scope: &Scope,
    id: Uuid,
    tier: PlanTier,
    payload: &PlanPayload,
) -> Result<Option<Plan>, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query(
        r#"
        UPDATE plans
        SET name = $2, description = $3, price = $4, updated_at = $5
        WHERE id = $1
        RETURNING id, name, description, price, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(tier.price())
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(plan_from_row))
}

/// Hard-delete a plan
pub async fn delete_plan(pool: &PgPool, _scope: &Scope, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM plans WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
