use slotwise_core::errors::SlotwiseResult;
use slotwise_core::models::{
    appointment::{Appointment, AppointmentResponse, AppointmentStatus},
    service::Service,
    time_slot::{TimeSlot, TimeSlotResponse},
    user::User,
};
use slotwise_db::models::{DbAppointment, DbAppointmentDetails, DbService, DbTimeSlot, DbUser};

pub fn appointment_from_db(db: DbAppointment) -> SlotwiseResult<Appointment> {
    let status: AppointmentStatus = db.status.parse()?;
    Ok(Appointment {
        id: db.id,
        user_id: db.user_id,
        service_id: db.service_id,
        time_slot_id: db.time_slot_id,
        status,
        notes: db.notes,
        start_time: db.start_time,
        end_time: db.end_time,
        created_at: db.created_at,
    })
}

pub fn response_from_details(db: DbAppointmentDetails) -> SlotwiseResult<AppointmentResponse> {
    let status: AppointmentStatus = db.status.parse()?;
    let user_name = match (db.user_first_name, db.user_last_name) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(first), None) => Some(first),
        (None, Some(last)) => Some(last),
        (None, None) => None,
    };
    Ok(AppointmentResponse {
        id: db.id,
        user_id: db.user_id,
        service_id: db.service_id,
        time_slot_id: db.time_slot_id,
        status,
        notes: db.notes,
        start_time: db.start_time,
        end_time: db.end_time,
        user_name,
        service_name: db.service_name,
    })
}

pub fn time_slot_from_db(db: DbTimeSlot) -> TimeSlot {
    TimeSlot {
        id: db.id,
        start_time: db.start_time,
        end_time: db.end_time,
        booked: db.booked,
        appointment_id: db.appointment_id,
        created_at: db.created_at,
    }
}

pub fn slot_response(db: DbTimeSlot) -> TimeSlotResponse {
    TimeSlotResponse {
        id: db.id,
        start: db.start_time,
        end: db.end_time,
        booked: db.booked,
    }
}

pub fn user_from_db(db: DbUser) -> User {
    User {
        id: db.id,
        email: db.email,
        first_name: db.first_name,
        last_name: db.last_name,
        phone_number: db.phone_number,
        address: db.address,
        prospect: db.prospect,
        created_at: db.created_at,
    }
}

pub fn service_from_db(db: DbService) -> Service {
    Service {
        id: db.id,
        name: db.name,
        description: db.description,
        price_cents: db.price_cents,
        duration_minutes: db.duration_minutes,
        created_at: db.created_at,
    }
}
