use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/book/:slot_id",
            post(handlers::appointments::book_appointment),
        )
        .route(
            "/api/appointments/slots/available",
            get(handlers::appointments::available_slots),
        )
        .route(
            "/api/appointments/all",
            get(handlers::appointments::list_all_appointments),
        )
        .route(
            "/api/appointments",
            get(handlers::appointments::list_my_appointments),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointments::get_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            put(handlers::appointments::update_status),
        )
        .route(
            "/api/appointments/:id/cancel",
            put(handlers::appointments::cancel_appointment),
        )
        .route(
            "/api/appointments/:id/notes",
            put(handlers::appointments::update_notes),
        )
}
