use axum::{extract::State, Json};
use slotwise_core::models::time_slot::{
    CreateTimeSlotBatchRequest, CreateTimeSlotRequest, TimeSlot,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = slotwise_db::repositories::time_slot::create_time_slot(
        &state.db_pool,
        payload.start,
        payload.end,
    )
    .await?;

    Ok(Json(slotwise_engine::projection::time_slot_from_db(slot)))
}

#[axum::debug_handler]
pub async fn create_slots_batch(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimeSlotBatchRequest>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let windows: Vec<_> = payload
        .slots
        .iter()
        .map(|slot| (slot.start, slot.end))
        .collect();

    let slots =
        slotwise_db::repositories::time_slot::create_time_slots_batch(&state.db_pool, &windows)
            .await?;

    Ok(Json(
        slots
            .into_iter()
            .map(slotwise_engine::projection::time_slot_from_db)
            .collect(),
    ))
}
