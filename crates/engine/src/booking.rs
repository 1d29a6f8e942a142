//! Booking orchestration.
//!
//! `book_appointment` is the single entry point for reserving a slot. The
//! appointment insert and the slot claim run in one Postgres transaction:
//! losing the claim race rolls the appointment back, so no appointment ever
//! references a slot it failed to claim.

use slotwise_core::errors::{SlotwiseError, SlotwiseResult};
use slotwise_core::models::appointment::{Appointment, AppointmentStatus, BookAppointmentRequest};
use slotwise_core::models::user::ProfileHints;
use slotwise_db::repositories::{appointment as appointment_repo, service as service_repo, time_slot as slot_repo};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::identity;
use crate::notify::{booking_confirmation, Notifier};
use crate::projection;

/// Books an appointment against `slot_id` on behalf of `caller` (an
/// authenticated user id) or, when `caller` is `None`, the contact details in
/// the request.
pub async fn book_appointment(
    pool: &Pool<Postgres>,
    notifier: &dyn Notifier,
    request: &BookAppointmentRequest,
    slot_id: Uuid,
    caller: Option<Uuid>,
) -> SlotwiseResult<Appointment> {
    let slot = slot_repo::get_time_slot_by_id(pool, slot_id)
        .await?
        .ok_or(SlotwiseError::SlotNotFound(slot_id))?;

    // Fast-path rejection. The authoritative check is the conditional claim
    // inside the transaction below.
    if slot.booked {
        return Err(SlotwiseError::SlotAlreadyBooked(slot_id));
    }

    let service = match request.service_id {
        Some(service_id) => Some(
            service_repo::get_service_by_id(pool, service_id)
                .await?
                .ok_or(SlotwiseError::ServiceNotFound(service_id))?,
        ),
        None => None,
    };

    let user = match caller {
        Some(caller_id) => identity::resolve_authenticated(pool, caller_id).await?,
        None => {
            let email = request.email.as_deref().ok_or_else(|| {
                SlotwiseError::Validation(
                    "An email address is required for anonymous booking".to_string(),
                )
            })?;
            let hints = ProfileHints {
                first_name: request.first_name.clone(),
                last_name: request.last_name.clone(),
                phone_number: request.phone_number.clone(),
                address: request.address.clone(),
            };
            identity::resolve_or_create_by_email(pool, email, &hints).await?
        }
    };

    // Appointment insert and slot claim share one transaction; a failed
    // claim rolls the insert back.
    let mut tx = pool.begin().await.map_err(|e| SlotwiseError::Database(e.into()))?;

    let appointment = appointment_repo::create_appointment(
        &mut *tx,
        user.id,
        service.as_ref().map(|s| s.id),
        slot.id,
        AppointmentStatus::Pending.as_str(),
        request.notes.as_deref(),
        slot.start_time,
        slot.end_time,
    )
    .await?;

    match slot_repo::claim_slot(&mut *tx, slot.id, appointment.id).await {
        Ok(_) => {}
        Err(err) => {
            tx.rollback()
                .await
                .map_err(|e| SlotwiseError::Database(e.into()))?;
            tracing::debug!(
                "Booking of slot {} lost the claim race, appointment rolled back",
                slot.id
            );
            return Err(err);
        }
    }

    tx.commit()
        .await
        .map_err(|e| SlotwiseError::Database(e.into()))?;

    tracing::info!(
        "Booked appointment {} on slot {} for user {}",
        appointment.id,
        slot.id,
        user.id
    );

    // Best-effort confirmation; a failed send never fails the booking.
    let (subject, body) =
        booking_confirmation(service.as_ref().map(|s| s.name.as_str()), slot.start_time);
    if let Err(err) = notifier.send(&user.email, &subject, &body).await {
        tracing::warn!("Failed to send booking confirmation to {}: {}", user.email, err);
    }

    projection::appointment_from_db(appointment)
}
