use super::common::*;
use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::savings::estimator::SavingsEstimator;
use crate::savings::router::{open_handler, session_router};
use crate::savings::session::{SavingsSessionService, TriggerPolicy};

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

fn evaluate_request(session_id: &str, body: Value) -> Request<Body> {
    Request::post(format!("/api/v1/savings/sessions/{session_id}/evaluate"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn open_then_trigger_over_http() {
    let service = Arc::new(service_with(MemorySessions::default(), TriggerPolicy::Gated));
    let app = session_router(service);

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/v1/savings/sessions")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);
    let opened = json_body(response).await;
    assert_eq!(opened["state"], "awaiting_trigger");
    assert_eq!(opened["policy"], "gated");
    let session_id = opened["session_id"].as_str().expect("id").to_string();

    let response = app
        .clone()
        .oneshot(evaluate_request(
            &session_id,
            json!({ "position_count": 1, "days_already_vacant": 0 }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let pending = json_body(response).await;
    assert_eq!(pending["state"], "awaiting_trigger");
    assert!(pending.get("view").is_none());

    let response = app
        .oneshot(evaluate_request(
            &session_id,
            json!({ "position_count": 1, "days_already_vacant": 0, "trigger": true }),
        ))
        .await
        .expect("router responds");
    let calculated = json_body(response).await;
    assert_eq!(calculated["state"], "calculated");
    assert_eq!(
        calculated["view"]["net_savings_headline"],
        "Net savings achieved: 10,764 €"
    );
    assert_eq!(calculated["view"]["chart"]["bars"][1]["scenario"], "assisted");
}

#[tokio::test]
async fn evaluate_rejects_zero_positions() {
    let service = Arc::new(service_with(MemorySessions::default(), TriggerPolicy::Gated));
    let session = service.open(morning()).expect("session opens");
    let app = session_router(service);

    let response = app
        .oneshot(evaluate_request(
            &session.id.0,
            json!({ "position_count": 0, "days_already_vacant": 0, "trigger": true }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("position_count"));
}

#[tokio::test]
async fn evaluate_unknown_session_is_not_found() {
    let service = Arc::new(service_with(MemorySessions::default(), TriggerPolicy::Gated));
    let app = session_router(service);

    let response = app
        .oneshot(evaluate_request(
            "does-not-exist",
            json!({ "position_count": 2, "days_already_vacant": 3 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn open_handler_reports_store_outage() {
    let service = Arc::new(SavingsSessionService::new(
        Arc::new(UnavailableSessions),
        SavingsEstimator::restaurant_france(),
        TriggerPolicy::Gated,
        idle_timeout(),
    ));

    let response = open_handler::<UnavailableSessions>(State(service)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
