use crate::infra::{parse_number_field, AppState, InMemorySessionStore};
use askama::Template;
use axum::extract::{Form, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use recruitment_savings::error::AppError;
use recruitment_savings::savings::{
    present, reference_panel, session_router, write_chart_csv, CalculationInput,
    CalculationResult, ReferencePanel, RenderedView, SavingsSessionService, SessionId,
    TriggerPolicy,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub(crate) type SessionService = SavingsSessionService<InMemorySessionStore>;

const CALCULATE_ACTION: &str = "calculate";

#[derive(Debug, Deserialize)]
pub(crate) struct EstimateRequest {
    pub(crate) position_count: i64,
    pub(crate) days_already_vacant: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct EstimateResponse {
    pub(crate) input: CalculationInput,
    pub(crate) result: CalculationResult,
    pub(crate) view: RenderedView,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default)]
    pub(crate) session: Option<String>,
}

/// Raw form fields; number inputs arrive as text and are coerced like widgets.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EstimatorForm {
    #[serde(default)]
    pub(crate) session: Option<String>,
    #[serde(default)]
    pub(crate) position_count: Option<String>,
    #[serde(default)]
    pub(crate) days_already_vacant: Option<String>,
    #[serde(default)]
    pub(crate) action: Option<String>,
}

#[derive(Template)]
#[template(path = "estimator.html")]
pub(crate) struct EstimatorPage {
    pub(crate) session_id: String,
    pub(crate) gated: bool,
    pub(crate) state_label: &'static str,
    pub(crate) position_count: u32,
    pub(crate) days_already_vacant: u32,
    pub(crate) view: Option<RenderedView>,
    pub(crate) reference: ReferencePanel,
}

/// Full application router: HTML form, JSON API, and probes.
pub(crate) fn app_router(service: Arc<SessionService>, state: AppState) -> Router {
    session_router(service.clone())
        .route("/", get(form_page).post(submit_form))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/savings/constants", get(constants_endpoint))
        .route("/api/v1/savings/estimate", post(estimate_endpoint))
        .route("/api/v1/savings/chart.csv", get(chart_csv_endpoint))
        .layer(Extension(state))
        .layer(Extension(service))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn constants_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<ReferencePanel> {
    Json(reference_panel(state.estimator.constants()))
}

pub(crate) async fn estimate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let input = CalculationInput::new(payload.position_count, payload.days_already_vacant)?;
    let result = state.estimator.compute(&input);
    let view = present(&result);

    Ok(Json(EstimateResponse {
        input,
        result,
        view,
    }))
}

pub(crate) async fn chart_csv_endpoint(
    Extension(state): Extension<AppState>,
    Query(payload): Query<EstimateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = CalculationInput::new(payload.position_count, payload.days_already_vacant)?;
    let view = present(&state.estimator.compute(&input));

    let mut buffer = Vec::new();
    write_chart_csv(&view.chart, &mut buffer)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        buffer,
    ))
}

pub(crate) async fn form_page(
    Extension(service): Extension<Arc<SessionService>>,
    Query(query): Query<PageQuery>,
) -> Result<EstimatorPage, AppError> {
    render_page(&service, query.session, None, false)
}

pub(crate) async fn submit_form(
    Extension(service): Extension<Arc<SessionService>>,
    Form(form): Form<EstimatorForm>,
) -> Result<EstimatorPage, AppError> {
    let defaults = CalculationInput::default();
    let input = CalculationInput::coerce(
        parse_number_field(
            form.position_count.as_deref(),
            i64::from(defaults.position_count),
        ),
        parse_number_field(
            form.days_already_vacant.as_deref(),
            i64::from(defaults.days_already_vacant),
        ),
    );
    let trigger = form.action.as_deref() == Some(CALCULATE_ACTION);

    render_page(&service, form.session, Some(input), trigger)
}

fn render_page(
    service: &SessionService,
    session: Option<String>,
    input: Option<CalculationInput>,
    trigger: bool,
) -> Result<EstimatorPage, AppError> {
    let now = Utc::now();
    let requested = session.filter(|id| !id.is_empty()).map(SessionId);
    let record = service.resume_or_open(requested.as_ref(), now)?;
    // A plain reload carries no inputs; show the session's last ones.
    let input = input.unwrap_or(record.last_input);
    let outcome = service.evaluate(&record.id, input, trigger, now)?;
    debug!(session = %outcome.session_id.0, state = ?outcome.state, "estimator page rendered");

    Ok(EstimatorPage {
        session_id: outcome.session_id.0,
        gated: service.policy() == TriggerPolicy::Gated,
        state_label: outcome.state_label,
        position_count: input.position_count,
        days_already_vacant: input.days_already_vacant,
        view: outcome.view,
        reference: reference_panel(service.estimator().constants()),
    })
}
