//! Handler-level tests against mock repositories. These exercise the same
//! decision logic the engine applies, without a database: the state machine
//! drives which slot calls happen, and the projections shape the responses.

use mockall::predicate;
use slotwise_core::errors::SlotwiseError;
use slotwise_core::models::appointment::{AppointmentStatus, SlotEffect};
use slotwise_db::models::DbAppointment;
use slotwise_engine::projection;
use uuid::Uuid;

use crate::test_utils::{sample_appointment, sample_slot, TestContext};

// Mirrors the status engine's transition flow on top of the mocks: look up
// the appointment, consult the state machine, touch the slot accordingly.
async fn test_update_status_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    new_status: AppointmentStatus,
) -> Result<DbAppointment, SlotwiseError> {
    let appointment = ctx
        .appointment_repo
        .get_appointment_by_id(id)
        .await?
        .ok_or(SlotwiseError::AppointmentNotFound(id))?;

    let current: AppointmentStatus = appointment.status.parse()?;
    if current == new_status {
        return Ok(appointment);
    }

    match current.slot_effect(new_status) {
        SlotEffect::Keep => {}
        SlotEffect::Release => {
            ctx.time_slot_repo
                .release_slot(appointment.time_slot_id)
                .await?;
        }
        SlotEffect::Reclaim => {
            ctx.time_slot_repo
                .claim_slot(appointment.time_slot_id, appointment.id)
                .await?;
        }
    }

    ctx.appointment_repo
        .update_appointment_status(id, new_status.as_str())
        .await?
        .ok_or(SlotwiseError::AppointmentNotFound(id))
}

#[tokio::test]
async fn denying_pending_appointment_releases_its_slot() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let appointment = sample_appointment("Pending", slot_id);
    let id = appointment.id;

    let lookup = appointment.clone();
    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(lookup.clone())));

    ctx.time_slot_repo
        .expect_release_slot()
        .with(predicate::eq(slot_id))
        .times(1)
        .returning(|_| Ok(()));

    ctx.appointment_repo
        .expect_update_appointment_status()
        .with(predicate::eq(id), predicate::eq("Denied"))
        .returning(move |_, status| {
            let mut updated = appointment.clone();
            updated.status = status.to_string();
            Ok(Some(updated))
        });

    let denied = test_update_status_wrapper(&mut ctx, id, AppointmentStatus::Denied)
        .await
        .unwrap();
    assert_eq!(denied.status, "Denied");
}

#[tokio::test]
async fn accepting_pending_appointment_leaves_slot_alone() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let appointment = sample_appointment("Pending", slot_id);
    let id = appointment.id;

    let lookup = appointment.clone();
    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));

    // No claim or release expectations: any slot call would fail the test.
    ctx.appointment_repo
        .expect_update_appointment_status()
        .returning(move |_, status| {
            let mut updated = appointment.clone();
            updated.status = status.to_string();
            Ok(Some(updated))
        });

    let accepted = test_update_status_wrapper(&mut ctx, id, AppointmentStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, "Accepted");
}

#[tokio::test]
async fn reaccepting_denied_appointment_reclaims_slot() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let appointment = sample_appointment("Denied", slot_id);
    let id = appointment.id;

    let lookup = appointment.clone();
    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));

    let reclaimed = sample_slot(true, Some(id));
    ctx.time_slot_repo
        .expect_claim_slot()
        .with(predicate::eq(slot_id), predicate::eq(id))
        .times(1)
        .returning(move |_, _| Ok(reclaimed.clone()));

    ctx.appointment_repo
        .expect_update_appointment_status()
        .returning(move |_, status| {
            let mut updated = appointment.clone();
            updated.status = status.to_string();
            Ok(Some(updated))
        });

    let accepted = test_update_status_wrapper(&mut ctx, id, AppointmentStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, "Accepted");
}

#[tokio::test]
async fn reacceptance_conflict_propagates_and_skips_status_write() {
    let mut ctx = TestContext::new();
    let slot_id = Uuid::new_v4();
    let appointment = sample_appointment("Canceled", slot_id);
    let id = appointment.id;

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .returning(move |_| Ok(Some(appointment.clone())));

    ctx.time_slot_repo
        .expect_claim_slot()
        .returning(move |requested, _| Err(SlotwiseError::SlotAlreadyBooked(requested)));

    // update_appointment_status must not be called; no expectation is set.
    let result = test_update_status_wrapper(&mut ctx, id, AppointmentStatus::Accepted).await;
    assert!(matches!(result, Err(SlotwiseError::SlotAlreadyBooked(s)) if s == slot_id));
}

#[tokio::test]
async fn noop_status_write_touches_nothing() {
    let mut ctx = TestContext::new();
    let appointment = sample_appointment("Accepted", Uuid::new_v4());
    let id = appointment.id;

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .returning(move |_| Ok(Some(appointment.clone())));

    // Neither slot mocks nor the status-update mock have expectations.
    let unchanged = test_update_status_wrapper(&mut ctx, id, AppointmentStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(unchanged.status, "Accepted");
}

#[tokio::test]
async fn unknown_appointment_maps_to_not_found() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .returning(|_| Ok(None));

    let result = test_update_status_wrapper(&mut ctx, id, AppointmentStatus::Denied).await;
    assert!(matches!(result, Err(SlotwiseError::AppointmentNotFound(a)) if a == id));
}

#[tokio::test]
async fn available_slots_project_into_views() {
    let mut ctx = TestContext::new();
    let free = sample_slot(false, None);
    let listed = vec![free.clone()];

    ctx.time_slot_repo
        .expect_list_available_slots()
        .returning(move |_| Ok(listed.clone()));

    let slots = ctx
        .time_slot_repo
        .list_available_slots(chrono::Utc::now())
        .await
        .unwrap();
    let views: Vec<_> = slots.into_iter().map(projection::slot_response).collect();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, free.id);
    assert_eq!(views[0].start, free.start_time);
    assert!(!views[0].booked);
}

#[test]
fn appointment_projection_parses_status() {
    let db = sample_appointment("Pending", Uuid::new_v4());
    let appointment = projection::appointment_from_db(db.clone()).unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.time_slot_id, db.time_slot_id);

    let mut corrupt = db;
    corrupt.status = "Archived".to_string();
    assert!(projection::appointment_from_db(corrupt).is_err());
}
