use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use slotwise_core::models::{
    appointment::{Appointment, AppointmentStatus, BookAppointmentRequest, SlotEffect},
    time_slot::TimeSlot,
    user::User,
};
use uuid::Uuid;

#[test]
fn test_time_slot_serialization() {
    let start_time = Utc::now();
    let time_slot = TimeSlot {
        id: Uuid::new_v4(),
        start_time,
        end_time: start_time + Duration::minutes(30),
        booked: false,
        appointment_id: None,
        created_at: Utc::now(),
    };

    let json = to_string(&time_slot).expect("Failed to serialize time slot");
    let deserialized: TimeSlot = from_str(&json).expect("Failed to deserialize time slot");

    assert_eq!(deserialized.id, time_slot.id);
    assert_eq!(deserialized.start_time, time_slot.start_time);
    assert_eq!(deserialized.end_time, time_slot.end_time);
    assert_eq!(deserialized.booked, time_slot.booked);
    assert_eq!(deserialized.appointment_id, None);
}

#[test]
fn test_appointment_serialization() {
    let start_time = Utc::now();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        service_id: Some(Uuid::new_v4()),
        time_slot_id: Uuid::new_v4(),
        status: AppointmentStatus::Pending,
        notes: Some("first consultation".to_string()),
        start_time,
        end_time: start_time + Duration::minutes(30),
        created_at: Utc::now(),
    };

    let json = to_string(&appointment).expect("Failed to serialize appointment");
    assert!(json.contains("\"Pending\""));

    let deserialized: Appointment = from_str(&json).expect("Failed to deserialize appointment");
    assert_eq!(deserialized.id, appointment.id);
    assert_eq!(deserialized.status, AppointmentStatus::Pending);
    assert_eq!(deserialized.notes, appointment.notes);
}

#[test]
fn test_book_request_deserialization_defaults() {
    let json = r#"{"email": "a@x.com"}"#;
    let request: BookAppointmentRequest =
        from_str(json).expect("Failed to deserialize book request");

    assert_eq!(request.email.as_deref(), Some("a@x.com"));
    assert_eq!(request.service_id, None);
    assert_eq!(request.notes, None);
}

#[rstest]
#[case("Pending", AppointmentStatus::Pending)]
#[case("accepted", AppointmentStatus::Accepted)]
#[case("DENIED", AppointmentStatus::Denied)]
#[case("canceled", AppointmentStatus::Canceled)]
fn test_status_parse(#[case] input: &str, #[case] expected: AppointmentStatus) {
    assert_eq!(input.parse::<AppointmentStatus>().unwrap(), expected);
}

#[test]
fn test_status_parse_rejects_unknown() {
    assert!("Completed".parse::<AppointmentStatus>().is_err());
}

#[test]
fn test_status_display_round_trip() {
    for status in [
        AppointmentStatus::Pending,
        AppointmentStatus::Accepted,
        AppointmentStatus::Denied,
        AppointmentStatus::Canceled,
    ] {
        assert_eq!(status.to_string().parse::<AppointmentStatus>().unwrap(), status);
    }
}

// The transition table from the status engine: releases happen only when a
// held slot moves into Denied/Canceled, re-claims only on re-acceptance.
#[rstest]
#[case(AppointmentStatus::Pending, AppointmentStatus::Pending, SlotEffect::Keep)]
#[case(AppointmentStatus::Pending, AppointmentStatus::Accepted, SlotEffect::Keep)]
#[case(AppointmentStatus::Pending, AppointmentStatus::Denied, SlotEffect::Release)]
#[case(AppointmentStatus::Pending, AppointmentStatus::Canceled, SlotEffect::Release)]
#[case(AppointmentStatus::Accepted, AppointmentStatus::Denied, SlotEffect::Release)]
#[case(AppointmentStatus::Accepted, AppointmentStatus::Canceled, SlotEffect::Release)]
#[case(AppointmentStatus::Accepted, AppointmentStatus::Pending, SlotEffect::Keep)]
#[case(AppointmentStatus::Denied, AppointmentStatus::Canceled, SlotEffect::Keep)]
#[case(AppointmentStatus::Canceled, AppointmentStatus::Denied, SlotEffect::Keep)]
#[case(AppointmentStatus::Denied, AppointmentStatus::Accepted, SlotEffect::Reclaim)]
#[case(AppointmentStatus::Canceled, AppointmentStatus::Accepted, SlotEffect::Reclaim)]
#[case(AppointmentStatus::Denied, AppointmentStatus::Pending, SlotEffect::Keep)]
#[case(AppointmentStatus::Denied, AppointmentStatus::Denied, SlotEffect::Keep)]
fn test_slot_effect_table(
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
    #[case] expected: SlotEffect,
) {
    assert_eq!(from.slot_effect(to), expected);
}

#[test]
fn test_user_display_name() {
    let base = User {
        id: Uuid::new_v4(),
        email: "a@x.com".to_string(),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        phone_number: None,
        address: None,
        prospect: true,
        created_at: Utc::now(),
    };

    assert_eq!(base.display_name().as_deref(), Some("Ada Lovelace"));

    let first_only = User {
        last_name: None,
        ..base.clone()
    };
    assert_eq!(first_only.display_name().as_deref(), Some("Ada"));

    let anonymous = User {
        first_name: None,
        last_name: None,
        ..base
    };
    assert_eq!(anonymous.display_name(), None);
}
