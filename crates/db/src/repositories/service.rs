use crate::db_err;
use crate::models::DbService;
use chrono::Utc;
use slotwise_core::errors::SlotwiseResult;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_service(
    pool: &Pool<Postgres>,
    name: &str,
    description: &str,
    price_cents: i64,
    duration_minutes: i32,
) -> SlotwiseResult<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, name, description, price_cents, duration_minutes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, description, price_cents, duration_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(price_cents)
    .bind(duration_minutes)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(db_err)?;

    Ok(service)
}

pub async fn get_service_by_id<'e, E>(exec: E, id: Uuid) -> SlotwiseResult<Option<DbService>>
where
    E: PgExecutor<'e>,
{
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, price_cents, duration_minutes, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(exec)
    .await
    .map_err(db_err)?;

    Ok(service)
}

pub async fn list_services(pool: &Pool<Postgres>) -> SlotwiseResult<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, price_cents, duration_minutes, created_at
        FROM services
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    Ok(services)
}
