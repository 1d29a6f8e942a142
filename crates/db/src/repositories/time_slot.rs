use crate::db_err;
use crate::models::DbTimeSlot;
use chrono::{DateTime, Utc};
use slotwise_core::errors::{SlotwiseError, SlotwiseResult};
use sqlx::{PgConnection, PgExecutor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_time_slot(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> SlotwiseResult<DbTimeSlot> {
    if start_time >= end_time {
        return Err(SlotwiseError::InvalidWindow {
            start: start_time,
            end: end_time,
        });
    }

    let id = Uuid::new_v4();
    let now = Utc::now();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, start_time, end_time, booked, appointment_id, created_at)
        VALUES ($1, $2, $3, FALSE, NULL, $4)
        RETURNING id, start_time, end_time, booked, appointment_id, created_at
        "#,
    )
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(db_err)?;

    Ok(time_slot)
}

/// Creates a batch of slots in a single transaction. Every window is
/// validated before any insert happens, so a malformed window leaves the
/// store untouched.
pub async fn create_time_slots_batch(
    pool: &Pool<Postgres>,
    windows: &[(DateTime<Utc>, DateTime<Utc>)],
) -> SlotwiseResult<Vec<DbTimeSlot>> {
    for (start, end) in windows {
        if start >= end {
            return Err(SlotwiseError::InvalidWindow {
                start: *start,
                end: *end,
            });
        }
    }

    let mut tx = pool.begin().await.map_err(db_err)?;
    let mut slots = Vec::with_capacity(windows.len());
    let now = Utc::now();

    for (start, end) in windows {
        let slot = sqlx::query_as::<_, DbTimeSlot>(
            r#"
            INSERT INTO time_slots (id, start_time, end_time, booked, appointment_id, created_at)
            VALUES ($1, $2, $3, FALSE, NULL, $4)
            RETURNING id, start_time, end_time, booked, appointment_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(start)
        .bind(end)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;
        slots.push(slot);
    }

    tx.commit().await.map_err(db_err)?;
    Ok(slots)
}

/// Unbooked slots that have not yet ended, ascending by start time.
pub async fn list_available_slots(
    pool: &Pool<Postgres>,
    now: DateTime<Utc>,
) -> SlotwiseResult<Vec<DbTimeSlot>> {
    let slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, start_time, end_time, booked, appointment_id, created_at
        FROM time_slots
        WHERE booked = FALSE AND end_time > $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    Ok(slots)
}

pub async fn get_time_slot_by_id<'e, E>(exec: E, id: Uuid) -> SlotwiseResult<Option<DbTimeSlot>>
where
    E: PgExecutor<'e>,
{
    let slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, start_time, end_time, booked, appointment_id, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(exec)
    .await
    .map_err(db_err)?;

    Ok(slot)
}

/// Atomically claims a free slot for an appointment.
///
/// The occupancy check and the write are one conditional UPDATE, so of two
/// concurrent claims on the same slot exactly one succeeds and the other gets
/// `SlotAlreadyBooked`. Takes a connection so it can run inside the booking
/// transaction.
pub async fn claim_slot(
    conn: &mut PgConnection,
    slot_id: Uuid,
    appointment_id: Uuid,
) -> SlotwiseResult<DbTimeSlot> {
    let claimed = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET booked = TRUE, appointment_id = $2
        WHERE id = $1 AND booked = FALSE
        RETURNING id, start_time, end_time, booked, appointment_id, created_at
        "#,
    )
    .bind(slot_id)
    .bind(appointment_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_err)?;

    match claimed {
        Some(slot) => {
            tracing::debug!("Claimed slot {} for appointment {}", slot_id, appointment_id);
            Ok(slot)
        }
        // No row matched: either the slot is taken or it does not exist.
        None => match get_time_slot_by_id(&mut *conn, slot_id).await? {
            Some(_) => Err(SlotwiseError::SlotAlreadyBooked(slot_id)),
            None => Err(SlotwiseError::SlotNotFound(slot_id)),
        },
    }
}

/// Releases a slot back to the free pool and clears the appointment
/// back-reference. Idempotent: releasing a free or unknown slot is a no-op.
pub async fn release_slot<'e, E>(exec: E, slot_id: Uuid) -> SlotwiseResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE time_slots
        SET booked = FALSE, appointment_id = NULL
        WHERE id = $1
        "#,
    )
    .bind(slot_id)
    .execute(exec)
    .await
    .map_err(db_err)?;

    tracing::debug!("Released slot {}", slot_id);
    Ok(())
}
