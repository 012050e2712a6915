use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::CalculationInput;
use super::session::{SavingsSessionService, SessionId, SessionServiceError, SessionStore};

/// Body for one session interaction.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub position_count: i64,
    pub days_already_vacant: i64,
    #[serde(default)]
    pub trigger: bool,
}

/// Router builder exposing the session-scoped estimator endpoints.
pub fn session_router<S>(service: Arc<SavingsSessionService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/savings/sessions", post(open_handler::<S>))
        .route(
            "/api/v1/savings/sessions/:session_id/evaluate",
            post(evaluate_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn open_handler<S>(State(service): State<Arc<SavingsSessionService<S>>>) -> Response
where
    S: SessionStore + 'static,
{
    match service.open(Utc::now()) {
        Ok(record) => {
            let payload = json!({
                "session_id": record.id.0,
                "state": record.state,
                "policy": service.policy(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<SavingsSessionService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    let input = match CalculationInput::new(request.position_count, request.days_already_vacant) {
        Ok(input) => input,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    let id = SessionId(session_id);
    match service.evaluate(&id, input, request.trigger, Utc::now()) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err @ SessionServiceError::UnknownSession(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => internal_error(err),
    }
}

fn internal_error(err: SessionServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
