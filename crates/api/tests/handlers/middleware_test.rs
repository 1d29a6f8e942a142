use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use rstest::rstest;
use slotwise_api::middleware::error_handling::{handle_middleware_error, AppError};
use slotwise_core::errors::SlotwiseError;
use tower::{Service, ServiceBuilder, ServiceExt};
use uuid::Uuid;

fn status_of(err: SlotwiseError) -> StatusCode {
    AppError(err).into_response().status()
}

#[rstest]
#[case(SlotwiseError::SlotNotFound(Uuid::new_v4()), StatusCode::NOT_FOUND)]
#[case(SlotwiseError::AppointmentNotFound(Uuid::new_v4()), StatusCode::NOT_FOUND)]
#[case(SlotwiseError::ServiceNotFound(Uuid::new_v4()), StatusCode::NOT_FOUND)]
#[case(SlotwiseError::UserNotFound("x".to_string()), StatusCode::NOT_FOUND)]
#[case(SlotwiseError::SlotAlreadyBooked(Uuid::new_v4()), StatusCode::CONFLICT)]
#[case(SlotwiseError::Validation("bad".to_string()), StatusCode::BAD_REQUEST)]
#[case(SlotwiseError::Forbidden("no".to_string()), StatusCode::FORBIDDEN)]
fn test_error_status_mapping(#[case] err: SlotwiseError, #[case] expected: StatusCode) {
    assert_eq!(status_of(err), expected);
}

#[test]
fn test_invalid_window_maps_to_bad_request() {
    let now = Utc::now();
    let err = SlotwiseError::InvalidWindow {
        start: now,
        end: now,
    };
    assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
}

#[test]
fn test_database_error_maps_to_internal() {
    let err = SlotwiseError::Database(eyre::eyre!("connection refused"));
    assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
}

// A request that outlives the timeout layer surfaces as 408, not 500.
#[tokio::test]
async fn test_timeout_error_maps_to_request_timeout() {
    let mut svc = ServiceBuilder::new()
        .timeout(Duration::from_millis(5))
        .service_fn(|_: ()| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, std::convert::Infallible>(())
        });

    let err = svc.ready().await.unwrap().call(()).await.unwrap_err();
    let response = handle_middleware_error(err).await.into_response();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_other_middleware_error_maps_to_internal() {
    let err: tower::BoxError = "broken stack".into();
    let response = handle_middleware_error(err).await.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// Conflict and not-found stay distinguishable on the wire: a 409 means
// "pick another slot", a 404 means the slot never existed.
#[test]
fn test_conflict_and_not_found_differ() {
    let id = Uuid::new_v4();
    assert_ne!(
        status_of(SlotwiseError::SlotAlreadyBooked(id)),
        status_of(SlotwiseError::SlotNotFound(id)),
    );
}
