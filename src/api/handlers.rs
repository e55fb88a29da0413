//! HTTP request handlers for the payroll API.
//!
//! This module contains the router and the handler functions for all API
//! endpoints. Handlers stay thin: they extract the caller, decode the
//! request, call one service operation and map its result.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::PayrollResult;
use crate::models::{
    Actor, PayrollSummary, SubmitAttendanceRequest, SubmitOvertimeRequest,
    SubmitReimbursementRequest,
};

use super::identity::{CallerIdentity, require_admin_role};
use super::request::{CloseQuery, CloseResponse, PayslipPath, PeriodPath};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/admin/periods/:id/close", post(close_period_handler))
        .route(
            "/admin/periods/:id/payslips",
            post(generate_payslips_handler).get(list_payslips_handler),
        )
        .route("/admin/periods/:id/payslips/:user_id", get(get_payslip_handler))
        .route_layer(middleware::from_fn(require_admin_role));

    Router::new()
        .route("/attendance", post(submit_attendance_handler))
        .route("/overtime", post(submit_overtime_handler))
        .route("/reimbursements", post(submit_reimbursement_handler))
        .route("/periods/:id/breakdown", get(breakdown_handler))
        .merge(admin)
        .with_state(state)
}

/// Maps a JSON body rejection to a 400 response.
fn json_rejection(actor: &Actor, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(request_id = %actor.request_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(request_id = %actor.request_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn path_rejection(actor: &Actor, rejection: PathRejection) -> Response {
    warn!(request_id = %actor.request_id, error = %rejection, "invalid path parameters");
    ApiErrorResponse::bad_request(ApiError::new("INVALID_PATH", rejection.body_text())).into_response()
}

/// Turns a service result into a response, logging failures with the
/// caller's request id.
fn respond<T: Serialize>(
    actor: &Actor,
    operation: &'static str,
    status: StatusCode,
    result: PayrollResult<T>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => {
            let api_error = ApiErrorResponse::from(err);
            if api_error.status.is_server_error() {
                error!(
                    request_id = %actor.request_id,
                    operation,
                    error = %api_error.error.message,
                    details = api_error.error.details.as_deref().unwrap_or_default(),
                    "request failed"
                );
            } else {
                warn!(
                    request_id = %actor.request_id,
                    operation,
                    code = %api_error.error.code,
                    error = %api_error.error.message,
                    "request rejected"
                );
            }
            api_error.into_response()
        }
    }
}

/// Handler for POST /attendance.
async fn submit_attendance_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    payload: Result<Json<SubmitAttendanceRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&actor, rejection),
    };
    let result = state.services().submissions.submit_attendance(&actor, &request);
    respond(&actor, "submit_attendance", StatusCode::OK, result)
}

/// Handler for POST /overtime.
async fn submit_overtime_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    payload: Result<Json<SubmitOvertimeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&actor, rejection),
    };
    let result = state.services().submissions.submit_overtime(&actor, &request);
    respond(&actor, "submit_overtime", StatusCode::OK, result)
}

/// Handler for POST /reimbursements.
async fn submit_reimbursement_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    payload: Result<Json<SubmitReimbursementRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&actor, rejection),
    };
    let result = state.services().submissions.submit_reimbursement(&actor, &request);
    respond(&actor, "submit_reimbursement", StatusCode::OK, result)
}

/// Handler for GET /periods/:id/breakdown.
async fn breakdown_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<PeriodPath>, PathRejection>,
) -> Response {
    let Path(PeriodPath { id }) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection(&actor, rejection),
    };
    let result = state.services().queries.payslip_breakdown(&actor, id);
    respond(&actor, "payslip_breakdown", StatusCode::OK, result)
}

/// Handler for POST /admin/periods/:id/close.
///
/// Closes the period, then generates its payslips on the blocking pool
/// unless `?generate=false` is given. The response does not wait for
/// generation.
async fn close_period_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<PeriodPath>, PathRejection>,
    query: Result<Query<CloseQuery>, QueryRejection>,
) -> Response {
    let Path(PeriodPath { id }) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection(&actor, rejection),
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(ApiError::new("INVALID_QUERY", rejection.body_text()))
                .into_response();
        }
    };

    let period = match state.services().batch.close_payroll_period(&actor, id) {
        Ok(period) => period,
        Err(err) => return respond::<()>(&actor, "close_payroll_period", StatusCode::OK, Err(err)),
    };

    if query.generate {
        spawn_generation(&state, actor.clone(), id);
    }

    respond(
        &actor,
        "close_payroll_period",
        StatusCode::OK,
        Ok(CloseResponse {
            period,
            payslip_generation_scheduled: query.generate,
        }),
    )
}

/// Runs payslip generation for `period_id` in the background.
fn spawn_generation(state: &AppState, actor: Actor, period_id: i64) {
    let services = state.shared_services();
    tokio::task::spawn_blocking(move || {
        let start_time = Instant::now();
        match services.batch.generate_payslips_by_period(&actor, period_id) {
            Ok(batch) => info!(
                request_id = %actor.request_id,
                period_id,
                payslips = batch.len(),
                duration_ms = start_time.elapsed().as_millis(),
                "background payslip generation completed"
            ),
            Err(err) => error!(
                request_id = %actor.request_id,
                period_id,
                error = %err,
                "background payslip generation failed"
            ),
        }
    });
}

/// Handler for POST /admin/periods/:id/payslips.
async fn generate_payslips_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<PeriodPath>, PathRejection>,
) -> Response {
    let Path(PeriodPath { id }) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection(&actor, rejection),
    };

    let services = state.shared_services();
    let worker_actor = actor.clone();
    let joined = tokio::task::spawn_blocking(move || {
        services
            .batch
            .generate_payslips_by_period(&worker_actor, id)
            .and_then(|batch| PayrollSummary::new(id, batch))
    })
    .await;

    match joined {
        Ok(result) => respond(&actor, "generate_payslips", StatusCode::CREATED, result),
        Err(err) => {
            error!(request_id = %actor.request_id, period_id = id, error = %err, "generation task panicked");
            ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Payslip generation failed"),
            )
            .into_response()
        }
    }
}

/// Handler for GET /admin/periods/:id/payslips.
async fn list_payslips_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<PeriodPath>, PathRejection>,
) -> Response {
    let Path(PeriodPath { id }) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection(&actor, rejection),
    };
    let result = state.services().queries.payslips(id);
    respond(&actor, "list_payslips", StatusCode::OK, result)
}

/// Handler for GET /admin/periods/:id/payslips/:user_id.
async fn get_payslip_handler(
    State(state): State<AppState>,
    CallerIdentity(actor): CallerIdentity,
    path: Result<Path<PayslipPath>, PathRejection>,
) -> Response {
    let Path(PayslipPath { id, user_id }) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection(&actor, rejection),
    };
    let result = state.services().queries.payslip(user_id, id);
    respond(&actor, "get_payslip", StatusCode::OK, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PayrollPeriod, PeriodStatus, count_working_days};
    use crate::service::PayrollServices;
    use crate::store::InMemoryStore;
    use axum::{body::Body, http::Request};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let store = InMemoryStore::seeded(
            vec![PayrollPeriod {
                id: 1,
                period_start: start,
                period_end: end,
                working_days: count_working_days(start, end),
                status: PeriodStatus::Open,
            }],
            vec![],
        )
        .unwrap();
        AppState::new(PayrollServices::new(Arc::new(store)))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance")
                    .header("Content-Type", "application/json")
                    .header("x-user-id", "1")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/overtime")
                    .header("Content-Type", "application/json")
                    .header("x-user-id", "1")
                    .body(Body::from(r#"{"user_id": 1, "date": "2026-01-10"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("duration_hours"));
    }

    #[tokio::test]
    async fn test_admin_route_rejects_employee() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/periods/1/close")
                    .header("x-user-id", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "ADMIN_REQUIRED");
    }

    #[tokio::test]
    async fn test_non_numeric_period_id_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/periods/abc/breakdown")
                    .header("x-user-id", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_missing_identity_returns_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reimbursements")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
