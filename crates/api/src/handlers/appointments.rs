use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use slotwise_core::{
    errors::SlotwiseError,
    models::{
        appointment::{
            Appointment, AppointmentResponse, BookAppointmentRequest, UpdateNotesRequest,
            UpdateStatusRequest,
        },
        time_slot::TimeSlotResponse,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{caller::Caller, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    caller: Caller,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = slotwise_engine::booking::book_appointment(
        &state.db_pool,
        state.notifier.as_ref(),
        &payload,
        slot_id,
        caller.0,
    )
    .await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TimeSlotResponse>>, AppError> {
    let slots =
        slotwise_db::repositories::time_slot::list_available_slots(&state.db_pool, Utc::now())
            .await?;

    Ok(Json(
        slots
            .into_iter()
            .map(slotwise_engine::projection::slot_response)
            .collect(),
    ))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let details =
        slotwise_db::repositories::appointment::get_appointment_details(&state.db_pool, id)
            .await?
            .ok_or(SlotwiseError::AppointmentNotFound(id))?;

    Ok(Json(slotwise_engine::projection::response_from_details(
        details,
    )?))
}

#[axum::debug_handler]
pub async fn list_my_appointments(
    State(state): State<Arc<ApiState>>,
    caller: Caller,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let user_id = caller.require()?;

    let appointments =
        slotwise_db::repositories::appointment::list_appointments_by_user(&state.db_pool, user_id)
            .await?;

    let responses = appointments
        .into_iter()
        .map(slotwise_engine::projection::response_from_details)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(responses))
}

#[axum::debug_handler]
pub async fn list_all_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let appointments =
        slotwise_db::repositories::appointment::list_all_appointments(&state.db_pool).await?;

    let responses = appointments
        .into_iter()
        .map(slotwise_engine::projection::response_from_details)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(responses))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment =
        slotwise_engine::status::update_status(&state.db_pool, id, payload.status).await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    caller: Caller,
) -> Result<StatusCode, AppError> {
    let user_id = caller.require()?;

    slotwise_engine::status::cancel(&state.db_pool, id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn update_notes(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    caller: Caller,
    Json(payload): Json<UpdateNotesRequest>,
) -> Result<Json<Appointment>, AppError> {
    let user_id = caller.require()?;

    let appointment = slotwise_engine::status::update_notes(
        &state.db_pool,
        id,
        user_id,
        payload.notes.as_deref(),
    )
    .await?;

    Ok(Json(appointment))
}
