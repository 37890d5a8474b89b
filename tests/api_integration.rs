//! Integration tests for the HTTP API
//!
//! Tests stateless detection endpoints and the survey session lifecycle

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cliffwatch::core::{create_router, run_server};
use cliffwatch::CliffError;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = send(create_router(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], cliffwatch::VERSION);
    assert_eq!(json["sessions_active"], 0);
}

#[tokio::test]
async fn test_detect_with_history() {
    let body = json!({
        "response": "Probably",
        "history": [{"implicitSignals": [{"signal": "maybe", "category": "hedging"}]}]
    });
    let (status, json) = send(create_router(), post("/detect", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["trigger"], true);
    assert_eq!(json["reason"], "compound_implicit");
    assert_eq!(json["confidence"], "MEDIUM");
    assert_eq!(json["signalCount"], 2);
}

#[tokio::test]
async fn test_detect_counts_caller_history_records() {
    // History records without a category still count
    let body = json!({
        "response": "maybe",
        "history": [{"implicitSignals": [{"signal": "perhaps"}]}]
    });
    let (status, json) = send(create_router(), post("/detect", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["signalCount"], 2);
    assert_eq!(json["reason"], "compound_implicit");
}

#[tokio::test]
async fn test_detect_no_trigger() {
    let (_, json) = send(create_router(), post("/detect", json!({"response": "Postgres"}))).await;

    assert_eq!(json["trigger"], false);
    assert!(json.get("reason").is_none());
    assert_eq!(json["confidence"], Value::Null);
}

#[tokio::test]
async fn test_detect_explicit_endpoint() {
    let (_, json) = send(
        create_router(),
        post("/detect/explicit", json!({"response": "No idea, you decide"})),
    )
    .await;

    assert_eq!(json["detected"], true);
    assert_eq!(json["signal"], "no idea");
    assert_eq!(json["confidence"], "HIGH");
}

#[tokio::test]
async fn test_detect_explicit_missing_response() {
    let (status, json) = send(create_router(), post("/detect/explicit", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["detected"], false);
}

#[tokio::test]
async fn test_detect_implicit_endpoint() {
    let (_, json) = send(
        create_router(),
        post("/detect/implicit", json!({"response": "um, maybe?"})),
    )
    .await;

    assert_eq!(json["detected"], true);
    assert_eq!(json["confidence"], "MEDIUM");
    assert_eq!(json["signals"][0]["signal"], "maybe");
    assert_eq!(json["signals"][0]["category"], "hedging");
    assert_eq!(json["signals"][1]["category"], "quality_degradation");
}

#[tokio::test]
async fn test_constraints_endpoint() {
    let body = json!({
        "survey": {"project": {"one_liner": "Solo MVP"}},
        "surveyor_notes": {"implicit_constraints": ["Stay on the free tier"]}
    });
    let (_, json) = send(create_router(), post("/constraints", body)).await;

    assert_eq!(json["teamSize"], "solo");
    assert_eq!(json["budget"], "constrained");
    assert_eq!(json["timeline"], "fast");
    assert_eq!(json["maxComplexity"], "minimal");
}

#[tokio::test]
async fn test_complexity_endpoint() {
    let body = json!({
        "recommendation": "Kubernetes cluster with microservices",
        "constraints": {"maxComplexity": "minimal"}
    });
    let (_, json) = send(create_router(), post("/complexity", body)).await;

    assert_eq!(json["valid"], false);
    assert_eq!(json["violations"].as_array().unwrap().len(), 2);
    assert_eq!(json["violations"][0]["type"], "over_engineering");
}

#[tokio::test]
async fn test_research_endpoint() {
    let body = json!({
        "gaps": [
            "Best practices for auth tokens",
            "Team size unknown",
            "backend.database: Postgres vs Mongo"
        ]
    });
    let (_, json) = send(create_router(), post("/research", body)).await;
    let gaps = json.as_array().unwrap();

    assert_eq!(gaps.len(), 2);
    assert_eq!(gaps[0]["priority"], "high");
    assert_eq!(gaps[0]["type"], "technology_comparison");
    assert_eq!(gaps[1]["priority"], "medium");
    assert!(gaps[0]["searchQuery"].as_str().unwrap().starts_with("database: Postgres vs Mongo"));
}

#[tokio::test]
async fn test_session_not_found() {
    let (status, _) = send(create_router(), get("/session/nonexistent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        create_router(),
        post("/session/nonexistent/response", json!({"response": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_session_flow() {
    // Clones share the router state
    let app = create_router();

    let (_, created) = send(app.clone(), post("/session/new", json!({}))).await;
    let id = created["session_id"].as_str().unwrap().to_string();

    let (_, turn) = send(
        app.clone(),
        post(&format!("/session/{}/response", id), json!({"response": "I don't know"})),
    )
    .await;
    assert_eq!(turn["turn"], 1);
    assert_eq!(turn["offer"], true);

    let (_, declined) = send(app.clone(), post(&format!("/session/{}/decline", id), json!({}))).await;
    assert_eq!(declined["declined_offers"], 1);
    assert_eq!(declined["pending_offer"], false);

    let (_, turn) = send(
        app.clone(),
        post(&format!("/session/{}/response", id), json!({"response": "Out of my depth here"})),
    )
    .await;
    assert_eq!(turn["offer"], true);

    let (_, accepted) = send(app.clone(), post(&format!("/session/{}/accept", id), json!({}))).await;
    assert_eq!(accepted["handed_off"], true);

    let (status, session) = send(app.clone(), get(&format!("/session/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["session_id"], id.as_str());
    assert_eq!(session["turn_count"], 2);
    assert_eq!(session["cliff_signals"].as_array().unwrap().len(), 2);

    let (_, health) = send(app, get("/health")).await;
    assert_eq!(health["sessions_active"], 1);
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_router();

    let (_, created) = send(app.clone(), post("/session/new", json!({}))).await;
    let id = created["session_id"].as_str().unwrap().to_string();

    let (status, _) = send(app.clone(), delete(&format!("/session/{}", id))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app.clone(), get(&format!("/session/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app.clone(), delete(&format!("/session/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, health) = send(app, get("/health")).await;
    assert_eq!(health["sessions_active"], 0);
}

#[tokio::test]
async fn test_run_server_bind_failure_is_server_error() {
    let err = run_server("not-an-address").await.unwrap_err();
    assert!(matches!(err, CliffError::Server(_)));
    assert!(err.to_string().starts_with("server error"));
}
