//! HTTP request handlers for the rule engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::service::try_apply_rules;

use super::request::TimeCardRequest;
use super::response::{ApiError, ApiErrorResponse, ApplyRulesResponse, EntriesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/timecards/:id", put(upsert_time_card_handler))
        .route("/timecards/:id/apply-rules", post(apply_rules_handler))
        .route("/timecards/:id/entries", get(entries_handler))
        .with_state(state)
}

/// Handler for `PUT /timecards/:id`.
///
/// Stores the time card and its clock lines, dropping any entries
/// synthesized for an earlier version of the card.
async fn upsert_time_card_handler(
    State(state): State<AppState>,
    Path(time_card_id): Path<String>,
    payload: Result<Json<TimeCardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        time_card_id = %time_card_id,
        "Processing time card upsert"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_error(StatusCode::BAD_REQUEST, rejection_error(rejection, correlation_id));
        }
    };

    let clocks_count = request.clocks.len();
    let (card, intervals) = request.into_parts(&time_card_id);

    match state.store().upsert_time_card(card, intervals) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                time_card_id = %time_card_id,
                clocks_count = clocks_count,
                "Time card stored"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => engine_error(err, correlation_id),
    }
}

/// Handler for `POST /timecards/:id/apply-rules`.
///
/// Runs the rules against the stored card and returns the full result.
async fn apply_rules_handler(
    State(state): State<AppState>,
    Path(time_card_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        time_card_id = %time_card_id,
        "Processing apply-rules request"
    );

    match try_apply_rules(state.store(), &time_card_id) {
        Ok(application) => {
            info!(
                correlation_id = %correlation_id,
                time_card_id = %time_card_id,
                entries_count = application.entries.len(),
                unworked_pay_hours = %application.totals.unworked_pay_hours,
                duration_us = application.audit_trace.duration_us,
                "Rule application completed successfully"
            );
            let body: ApplyRulesResponse = application.into();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Err(err) => engine_error(err, correlation_id),
    }
}

/// Handler for `GET /timecards/:id/entries`.
async fn entries_handler(
    State(state): State<AppState>,
    Path(time_card_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.store().synthesized_entries(&time_card_id) {
        Ok(entries) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(EntriesResponse {
                time_card_id,
                entries,
            }),
        )
            .into_response(),
        Err(err) => engine_error(err, correlation_id),
    }
}

fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            crate::error::ErrorCode::InputValidation,
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn engine_error(err: crate::error::EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_error(api_error.status, api_error.error)
}

fn json_error(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::error::ErrorCode;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn put_card(id: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(format!("/timecards/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn apply(id: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/timecards/{}/apply-rules", id))
            .body(Body::empty())
            .unwrap()
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    const CARD: &str = r#"{
        "contract_id": "CTR_UNWORKED",
        "worker_id": "CON_1",
        "date": "2026-05-19",
        "clocks": [
            {"line_id": "TCL_1", "time_in": "03:00:00", "time_out": "08:00:00"},
            {"line_id": "TCL_2", "time_in": "09:00:00", "time_out": "09:30:00"},
            {"line_id": "TCL_3", "time_in": "20:45:00", "time_out": "23:45:00"}
        ]
    }"#;

    #[tokio::test]
    async fn test_api_001_upsert_returns_204() {
        let router = create_router(create_test_state());

        let response = router.oneshot(put_card("TCD_1", CARD)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(put_card("TCD_1", "{ invalid json }"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
        assert_eq!(error.error, ErrorCode::InputValidation);
    }

    #[tokio::test]
    async fn test_api_003_missing_field_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(put_card("TCD_1", r#"{"worker_id": "CON_1", "date": "2026-05-19"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("missing field"),
            "Expected error message to mention missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_api_004_unknown_time_card_returns_404() {
        let router = create_router(create_test_state());

        let response = router.oneshot(apply("TCD_404")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error = read_error(response).await;
        assert_eq!(error.code, "TIME_CARD_NOT_FOUND");
        assert_eq!(error.error, ErrorCode::DataAccess);
    }

    #[tokio::test]
    async fn test_apply_rules_after_upsert() {
        let state = create_test_state();

        let response = create_router(state.clone())
            .oneshot(put_card("TCD_1", CARD))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = create_router(state.clone())
            .oneshot(apply("TCD_1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: ApplyRulesResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.error, ErrorCode::Success);
        // The unworked contract pads both the 1.5 h after-meal shortfall and
        // the 1 h short evening call.
        assert_eq!(result.entries.len(), 2);
        assert_eq!(state.store().synthesized_entries("TCD_1").unwrap().len(), 2);
    }
}
