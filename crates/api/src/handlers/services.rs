use axum::{
    extract::{Path, State},
    Json,
};
use slotwise_core::{
    errors::SlotwiseError,
    models::service::{CreateServiceRequest, Service},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(SlotwiseError::Validation(
            "Service name must not be empty".to_string(),
        )));
    }

    let service = slotwise_db::repositories::service::create_service(
        &state.db_pool,
        &payload.name,
        &payload.description,
        payload.price_cents,
        payload.duration_minutes,
    )
    .await?;

    Ok(Json(slotwise_engine::projection::service_from_db(service)))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, AppError> {
    let service = slotwise_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await?
        .ok_or(SlotwiseError::ServiceNotFound(id))?;

    Ok(Json(slotwise_engine::projection::service_from_db(service)))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = slotwise_db::repositories::service::list_services(&state.db_pool).await?;

    Ok(Json(
        services
            .into_iter()
            .map(slotwise_engine::projection::service_from_db)
            .collect(),
    ))
}
