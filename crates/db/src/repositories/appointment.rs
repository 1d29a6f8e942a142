use crate::db_err;
use crate::models::{DbAppointment, DbAppointmentDetails};
use chrono::{DateTime, Utc};
use slotwise_core::errors::SlotwiseResult;
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

const DETAILS_SELECT: &str = r#"
    SELECT a.id, a.user_id, a.service_id, a.time_slot_id, a.status, a.notes,
           a.start_time, a.end_time, a.created_at,
           u.first_name AS user_first_name, u.last_name AS user_last_name,
           s.name AS service_name
    FROM appointments a
    JOIN users u ON u.id = a.user_id
    LEFT JOIN services s ON s.id = a.service_id
"#;

#[allow(clippy::too_many_arguments)]
pub async fn create_appointment<'e, E>(
    exec: E,
    user_id: Uuid,
    service_id: Option<Uuid>,
    time_slot_id: Uuid,
    status: &str,
    notes: Option<&str>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> SlotwiseResult<DbAppointment>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (id, user_id, service_id, time_slot_id, status, notes, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, service_id, time_slot_id, status, notes,
                  start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(service_id)
    .bind(time_slot_id)
    .bind(status)
    .bind(notes)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(exec)
    .await
    .map_err(db_err)?;

    Ok(appointment)
}

pub async fn get_appointment_by_id<'e, E>(
    exec: E,
    id: Uuid,
) -> SlotwiseResult<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, user_id, service_id, time_slot_id, status, notes,
               start_time, end_time, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(exec)
    .await
    .map_err(db_err)?;

    Ok(appointment)
}

pub async fn get_appointment_details(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> SlotwiseResult<Option<DbAppointmentDetails>> {
    let details = sqlx::query_as::<_, DbAppointmentDetails>(&format!(
        "{DETAILS_SELECT} WHERE a.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(db_err)?;

    Ok(details)
}

pub async fn list_appointments_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> SlotwiseResult<Vec<DbAppointmentDetails>> {
    let appointments = sqlx::query_as::<_, DbAppointmentDetails>(&format!(
        "{DETAILS_SELECT} WHERE a.user_id = $1 ORDER BY a.start_time ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    Ok(appointments)
}

pub async fn list_all_appointments(
    pool: &Pool<Postgres>,
) -> SlotwiseResult<Vec<DbAppointmentDetails>> {
    let appointments = sqlx::query_as::<_, DbAppointmentDetails>(&format!(
        "{DETAILS_SELECT} ORDER BY a.start_time ASC"
    ))
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    Ok(appointments)
}

pub async fn update_appointment_status<'e, E>(
    exec: E,
    id: Uuid,
    status: &str,
) -> SlotwiseResult<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING id, user_id, service_id, time_slot_id, status, notes,
                  start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(exec)
    .await
    .map_err(db_err)?;

    Ok(appointment)
}

pub async fn update_appointment_notes<'e, E>(
    exec: E,
    id: Uuid,
    notes: Option<&str>,
) -> SlotwiseResult<Option<DbAppointment>>
where
    E: PgExecutor<'e>,
{
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET notes = $2
        WHERE id = $1
        RETURNING id, user_id, service_id, time_slot_id, status, notes,
                  start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(notes)
    .fetch_optional(exec)
    .await
    .map_err(db_err)?;

    Ok(appointment)
}
