//! Appointment status transitions and their slot side effects.
//!
//! The legal transitions live in `AppointmentStatus::slot_effect`; this
//! module applies them: the status write and any slot release/re-claim share
//! one transaction, so a failed re-claim leaves the status untouched.

use slotwise_core::errors::{SlotwiseError, SlotwiseResult};
use slotwise_core::models::appointment::{Appointment, AppointmentStatus, SlotEffect};
use slotwise_db::models::DbAppointment;
use slotwise_db::repositories::{appointment as appointment_repo, time_slot as slot_repo};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Moves an appointment to `new_status`, releasing or re-claiming its slot
/// as the state machine dictates. A write of the current status is a no-op.
///
/// Re-accepting a denied/canceled appointment fails with `SlotAlreadyBooked`
/// when another appointment has taken the slot in the meantime; the
/// appointment keeps its previous status in that case.
pub async fn update_status(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    new_status: AppointmentStatus,
) -> SlotwiseResult<Appointment> {
    let appointment = appointment_repo::get_appointment_by_id(pool, appointment_id)
        .await?
        .ok_or(SlotwiseError::AppointmentNotFound(appointment_id))?;

    apply_transition(pool, appointment, new_status).await
}

/// Cancels an appointment on behalf of its owner. Slot handling is identical
/// to a staff transition to `Canceled`.
pub async fn cancel(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    caller_user_id: Uuid,
) -> SlotwiseResult<Appointment> {
    let appointment = appointment_repo::get_appointment_by_id(pool, appointment_id)
        .await?
        .ok_or(SlotwiseError::AppointmentNotFound(appointment_id))?;

    if appointment.user_id != caller_user_id {
        return Err(SlotwiseError::Forbidden(
            "Only the owner may cancel an appointment".to_string(),
        ));
    }

    apply_transition(pool, appointment, AppointmentStatus::Canceled).await
}

/// Owner-only edit of the free-text notes.
pub async fn update_notes(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    caller_user_id: Uuid,
    notes: Option<&str>,
) -> SlotwiseResult<Appointment> {
    let appointment = appointment_repo::get_appointment_by_id(pool, appointment_id)
        .await?
        .ok_or(SlotwiseError::AppointmentNotFound(appointment_id))?;

    if appointment.user_id != caller_user_id {
        return Err(SlotwiseError::Forbidden(
            "Only the owner may edit an appointment".to_string(),
        ));
    }

    let updated = appointment_repo::update_appointment_notes(pool, appointment_id, notes)
        .await?
        .ok_or(SlotwiseError::AppointmentNotFound(appointment_id))?;

    crate::projection::appointment_from_db(updated)
}

async fn apply_transition(
    pool: &Pool<Postgres>,
    appointment: DbAppointment,
    new_status: AppointmentStatus,
) -> SlotwiseResult<Appointment> {
    let current: AppointmentStatus = appointment.status.parse()?;

    // Idempotent no-op: nothing written, no slot side effect.
    if current == new_status {
        return crate::projection::appointment_from_db(appointment);
    }

    let effect = current.slot_effect(new_status);
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| SlotwiseError::Database(e.into()))?;

    match effect {
        SlotEffect::Keep => {}
        SlotEffect::Release => {
            slot_repo::release_slot(&mut *tx, appointment.time_slot_id).await?;
        }
        SlotEffect::Reclaim => {
            // The claim fails if someone else took the slot; the rollback
            // leaves the appointment status unchanged.
            match slot_repo::claim_slot(&mut *tx, appointment.time_slot_id, appointment.id).await {
                Ok(_) => {}
                Err(err) => {
                    tx.rollback()
                        .await
                        .map_err(|e| SlotwiseError::Database(e.into()))?;
                    return Err(err);
                }
            }
        }
    }

    let updated =
        appointment_repo::update_appointment_status(&mut *tx, appointment.id, new_status.as_str())
            .await?
            .ok_or(SlotwiseError::AppointmentNotFound(appointment.id))?;

    tx.commit()
        .await
        .map_err(|e| SlotwiseError::Database(e.into()))?;

    tracing::info!(
        "Appointment {} moved {} -> {} ({:?})",
        appointment.id,
        current,
        new_status,
        effect
    );

    crate::projection::appointment_from_db(updated)
}
