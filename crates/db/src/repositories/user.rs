use crate::db_err;
use crate::models::DbUser;
use chrono::Utc;
use slotwise_core::errors::SlotwiseResult;
use slotwise_core::models::user::ProfileHints;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn find_user_by_id<'e, E>(exec: E, id: Uuid) -> SlotwiseResult<Option<DbUser>>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, first_name, last_name, phone_number, address,
               password_hash, prospect, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(exec)
    .await
    .map_err(db_err)?;

    Ok(user)
}

pub async fn find_user_by_email<'e, E>(exec: E, email: &str) -> SlotwiseResult<Option<DbUser>>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, first_name, last_name, phone_number, address,
               password_hash, prospect, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(exec)
    .await
    .map_err(db_err)?;

    Ok(user)
}

pub async fn create_prospect_user<'e, E>(
    exec: E,
    email: &str,
    hints: &ProfileHints,
    password_hash: &str,
) -> SlotwiseResult<DbUser>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating prospect user for email {}", email);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users
            (id, email, first_name, last_name, phone_number, address,
             password_hash, prospect, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8)
        RETURNING id, email, first_name, last_name, phone_number, address,
                  password_hash, prospect, created_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(&hints.first_name)
    .bind(&hints.last_name)
    .bind(&hints.phone_number)
    .bind(&hints.address)
    .bind(password_hash)
    .bind(now)
    .fetch_one(exec)
    .await
    .map_err(db_err)?;

    Ok(user)
}

/// Refreshes a prospect's contact details from booking-time hints. `NULL`
/// hints keep the stored value.
pub async fn update_prospect_profile<'e, E>(
    exec: E,
    id: Uuid,
    hints: &ProfileHints,
) -> SlotwiseResult<DbUser>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            phone_number = COALESCE($4, phone_number),
            address = COALESCE($5, address)
        WHERE id = $1
        RETURNING id, email, first_name, last_name, phone_number, address,
                  password_hash, prospect, created_at
        "#,
    )
    .bind(id)
    .bind(&hints.first_name)
    .bind(&hints.last_name)
    .bind(&hints.phone_number)
    .bind(&hints.address)
    .fetch_one(exec)
    .await
    .map_err(db_err)?;

    Ok(user)
}
