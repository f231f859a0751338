//! HTTP request handlers for the mileage API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::MileageResult;
use crate::models::{NewMileageEntry, NewPeriod, PeriodUpdate};
use crate::service::MileageService;

use super::request::BatchRequest;
use super::response::{ApiError, ApiErrorResponse, PeriodResponse, ResourceChoice};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/periods", post(create_period_handler))
        .route("/periods/copy", post(copy_periods_handler))
        .route("/periods/draft", post(draft_handler))
        .route("/periods/confirm", post(confirm_handler))
        .route("/periods/post", post(post_handler))
        .route("/periods/cancel", post(cancel_handler))
        .route(
            "/periods/:id",
            get(get_period_handler)
                .put(update_period_handler)
                .delete(delete_period_handler),
        )
        .route("/periods/:id/entries", post(add_entry_handler))
        .route(
            "/entries/:id",
            get(get_entry_handler)
                .put(update_entry_handler)
                .delete(delete_entry_handler),
        )
        .route("/resources", get(resources_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    // Handle JSON parsing errors
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Turns a service result into a JSON response, logging the outcome.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    started: Instant,
    status: StatusCode,
    result: MileageResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                duration_us = started.elapsed().as_micros(),
                "Request completed successfully"
            );
            (status, Json(body)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn period_response(service: &MileageService, id: Uuid) -> MileageResult<PeriodResponse> {
    let period = service.period(id)?.clone();
    let entries = service
        .period_entries(id)?
        .into_iter()
        .cloned()
        .collect();
    Ok(PeriodResponse { period, entries })
}

/// Handler for POST /periods.
async fn create_period_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewPeriod>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create period request");
    let input = match parse_body(correlation_id, payload) {
        Ok(input) => input,
        Err(err) => return err.into_response(),
    };

    // Resolve company and employee from the headers
    let started = Instant::now();
    let ctx = state.context(&headers);
    let mut service = state.service().lock().await;
    let result = service
        .create_period(&ctx, input)
        .and_then(|period| period_response(&service, period.id));
    respond(correlation_id, started, StatusCode::CREATED, result)
}

/// Handler for GET /periods/:id.
async fn get_period_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let service = state.service().lock().await;
    respond(
        correlation_id,
        started,
        StatusCode::OK,
        period_response(&service, id),
    )
}

/// Handler for PUT /periods/:id.
async fn update_period_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<PeriodUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %id, "Processing update period request");
    let update = match parse_body(correlation_id, payload) {
        Ok(update) => update,
        Err(err) => return err.into_response(),
    };

    let started = Instant::now();
    let mut service = state.service().lock().await;
    let result = service
        .update_period(id, update)
        .and_then(|period| period_response(&service, period.id));
    respond(correlation_id, started, StatusCode::OK, result)
}

/// Handler for DELETE /periods/:id.
async fn delete_period_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %id, "Processing delete period request");

    let mut service = state.service().lock().await;
    match service.delete_period(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /periods/copy.
async fn copy_periods_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing copy periods request");
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let started = Instant::now();
    let mut service = state.service().lock().await;
    let result = service.copy_periods(&request.ids);
    respond(correlation_id, started, StatusCode::CREATED, result)
}

/// A workflow action applied to a batch of periods.
#[derive(Debug, Clone, Copy)]
enum WorkflowAction {
    Draft,
    Confirm,
    Post,
    Cancel,
}

impl WorkflowAction {
    fn as_str(self) -> &'static str {
        match self {
            WorkflowAction::Draft => "draft",
            WorkflowAction::Confirm => "confirm",
            WorkflowAction::Post => "post",
            WorkflowAction::Cancel => "cancel",
        }
    }
}

async fn run_workflow(
    state: AppState,
    headers: HeaderMap,
    payload: Result<Json<BatchRequest>, JsonRejection>,
    action: WorkflowAction,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        action = action.as_str(),
        periods = request.ids.len(),
        "Processing workflow request"
    );

    // Resolve company and employee from the headers
    let started = Instant::now();
    let ctx = state.context(&headers);
    let mut service = state.service().lock().await;

    // Apply the action to the whole batch
    let result = match action {
        WorkflowAction::Draft => service.draft(&request.ids),
        WorkflowAction::Confirm => service.confirm(&request.ids),
        WorkflowAction::Post => service.post(&ctx, &request.ids),
        WorkflowAction::Cancel => service.cancel(&ctx, &request.ids),
    };
    respond(correlation_id, started, StatusCode::OK, result)
}

/// Handler for POST /periods/draft.
async fn draft_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    run_workflow(state, headers, payload, WorkflowAction::Draft).await
}

/// Handler for POST /periods/confirm.
async fn confirm_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    run_workflow(state, headers, payload, WorkflowAction::Confirm).await
}

/// Handler for POST /periods/post.
async fn post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    run_workflow(state, headers, payload, WorkflowAction::Post).await
}

/// Handler for POST /periods/cancel.
async fn cancel_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    run_workflow(state, headers, payload, WorkflowAction::Cancel).await
}

/// Handler for POST /periods/:id/entries.
async fn add_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Result<Json<NewMileageEntry>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %id, "Processing add entry request");
    let input = match parse_body(correlation_id, payload) {
        Ok(input) => input,
        Err(err) => return err.into_response(),
    };

    let started = Instant::now();
    let ctx = state.context(&headers);
    let mut service = state.service().lock().await;
    let result = service.add_entry(&ctx, id, input);
    respond(correlation_id, started, StatusCode::CREATED, result)
}

/// Handler for GET /entries/:id.
async fn get_entry_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    let service = state.service().lock().await;
    let result = service.entry(id).cloned();
    respond(correlation_id, started, StatusCode::OK, result)
}

/// Handler for PUT /entries/:id.
async fn update_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Result<Json<NewMileageEntry>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, entry_id = %id, "Processing update entry request");
    let input = match parse_body(correlation_id, payload) {
        Ok(input) => input,
        Err(err) => return err.into_response(),
    };

    let started = Instant::now();
    let ctx = state.context(&headers);
    let mut service = state.service().lock().await;
    let result = service.update_entry(&ctx, id, input);
    respond(correlation_id, started, StatusCode::OK, result)
}

/// Handler for DELETE /entries/:id.
async fn delete_entry_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, entry_id = %id, "Processing delete entry request");

    let mut service = state.service().lock().await;
    match service.delete_entry(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /resources.
async fn resources_handler(State(state): State<AppState>) -> Response {
    let service = state.service().lock().await;
    let choices: Vec<ResourceChoice> = service
        .resource_selection()
        .into_iter()
        .map(|(kind, label)| ResourceChoice { kind, label })
        .collect();
    Json(choices).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::ledger::InMemoryLedger;
    use crate::models::{Address, Company, Currency, Employee, MileagePeriod, Party};
    use crate::registry::Registry;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/mileage").expect("Failed to load config");
        let mut registry = Registry::new();
        registry.add_company(Company {
            id: "acme".to_string(),
            name: "ACME".to_string(),
            currency: Currency {
                code: "EUR".to_string(),
                digits: 2,
            },
        });
        registry.add_party(Party {
            id: "party_emp".to_string(),
            name: "Employee".to_string(),
            account_payable: None,
            addresses: vec![Address {
                id: "addr_1".to_string(),
                street: "Main Street 1".to_string(),
                city: None,
            }],
        });
        registry
            .add_employee(Employee {
                id: "emp_001".to_string(),
                company: "acme".to_string(),
                party: "party_emp".to_string(),
                price_per_km: None,
                debit_account: None,
            })
            .unwrap();

        AppState::new(
            MileageService::new(config, registry, InMemoryLedger::new()),
            "acme",
        )
    }

    async fn send(router: Router, method: &str, uri: &str, body: &str) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .header("x-employee", "emp_001")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_period_returns_201() {
        let router = create_router(create_test_state());
        let response = send(
            router,
            "POST",
            "/periods",
            r#"{"name": "March", "mileage": [{"address": "addr_1", "distance": 4}]}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let period: PeriodResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(period.period.employee, "emp_001");
        assert_eq!(period.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/periods", "{ invalid json }").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_name_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/periods", r#"{"mileage": []}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("name"));
    }

    #[tokio::test]
    async fn test_unknown_period_returns_404() {
        let router = create_router(create_test_state());
        let uri = format!("/periods/{}", Uuid::new_v4());
        let response = send(router, "GET", &uri, "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_without_rate_returns_422() {
        let state = create_test_state();
        let period = {
            let mut service = state.service().lock().await;
            let ctx = state.context(&HeaderMap::new()).with_employee("emp_001");
            let period: MileagePeriod = service
                .create_period(
                    &ctx,
                    NewPeriod {
                        name: "March".to_string(),
                        employee: None,
                        mileage: vec![NewMileageEntry {
                            address: "addr_1".to_string(),
                            distance: Some(4),
                            ..Default::default()
                        }],
                    },
                )
                .unwrap();
            service.confirm(&[period.id]).unwrap();
            period
        };

        let body = format!(r#"{{"ids": ["{}"]}}"#, period.id);
        let response = send(create_router(state), "POST", "/periods/post", &body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MISSING_RATE_PER_DISTANCE");
    }

    #[tokio::test]
    async fn test_resources_lists_empty_choice_first() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/resources", "").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let choices: Vec<ResourceChoice> = serde_json::from_slice(&body).unwrap();
        assert_eq!(choices.len(), 3);
        assert!(choices[0].kind.is_none());
        assert_eq!(choices[0].label, "");
    }
}
