use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::domain::ProductInput;
use super::repository::SubmissionRepository;
use super::service::{ServiceError, SustainabilityService};

pub const GREETING: &str = "Bienvenue sur l'API de durabilité !";

/// Router builder exposing scoring, history, and summary endpoints.
pub fn sustainability_router<R>(service: Arc<SustainabilityService<R>>) -> Router
where
    R: SubmissionRepository + 'static,
{
    Router::new()
        .route("/", get(greeting_handler))
        .route("/score", post(score_handler::<R>))
        .route("/history", get(history_handler::<R>))
        .route("/score-summary", get(summary_handler::<R>))
        .with_state(service)
}

pub(crate) async fn greeting_handler() -> &'static str {
    GREETING
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<SustainabilityService<R>>>,
    payload: Result<axum::Json<Value>, JsonRejection>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    let axum::Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let body = json!({ "error": rejection.body_text() });
            return (rejection.status(), axum::Json(body)).into_response();
        }
    };

    let product = match ProductInput::from_json(&payload) {
        Ok(product) => product,
        Err(err) => return error_response(ServiceError::Validation(err)),
    };

    match service.submit(product).await {
        Ok(record) => (StatusCode::OK, axum::Json(record.score_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<SustainabilityService<R>>>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    match service.history().await {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<SustainabilityService<R>>>,
) -> Response
where
    R: SubmissionRepository + 'static,
{
    match service.summary().await {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Repository(source) => {
            error!(error = %source, "submission repository failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
