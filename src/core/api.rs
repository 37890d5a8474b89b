//! HTTP API for Cliffwatch
//!
//! Endpoints:
//! - GET  /health - Health check
//! - POST /detect - Compound analysis of one response (+ optional history)
//! - POST /detect/explicit - Explicit tier only
//! - POST /detect/implicit - Implicit tier only
//! - POST /constraints - Constraint profile from survey + notes
//! - POST /complexity - Check a recommendation against a profile
//! - POST /research - Researchable gaps
//! - POST /session/new - Create survey session
//! - GET  /session/:id - Session status
//! - DELETE /session/:id - Drop a finished session
//! - POST /session/:id/response - Feed a response to a session
//! - POST /session/:id/decline - Decline the pending offer
//! - POST /session/:id/accept - Accept the pending offer

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::CliffError;

use crate::core::{
    CompoundAnalyzer, ComplexityGuard, ConstraintExtractor, ExplicitDetector, ImplicitDetector,
    ResearchGapFinder, SurveySession,
};
use crate::types::{
    ComplexityCheck, CompoundResult, ConstraintProfile, DetectionResult, HistoryEntry,
    ImplicitDetectionResult, ResearchableGap, SessionStatus, Survey, SurveyorNotes, TurnOutcome,
};

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, SurveySession<'static>>>,
    next_id: AtomicU64,
}

/// Single response request; a missing response is treated as empty
#[derive(Debug, Default, Deserialize)]
pub struct ResponseRequest {
    #[serde(default)]
    pub response: Option<String>,
}

/// Compound detection request
#[derive(Debug, Default, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Constraint extraction request
#[derive(Debug, Default, Deserialize)]
pub struct ConstraintsRequest {
    #[serde(default)]
    pub survey: Survey,
    #[serde(default)]
    pub surveyor_notes: Option<SurveyorNotes>,
}

/// Complexity check request
#[derive(Debug, Default, Deserialize)]
pub struct ComplexityRequest {
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub constraints: ConstraintProfile,
}

/// Research gap request
#[derive(Debug, Default, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub gaps: Vec<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub status: SessionStatus,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        next_id: AtomicU64::new(1),
    });

    Router::new()
        .route("/health", get(health))
        .route("/detect", post(detect))
        .route("/detect/explicit", post(detect_explicit))
        .route("/detect/implicit", post(detect_implicit))
        .route("/constraints", post(constraints))
        .route("/complexity", post(complexity))
        .route("/research", post(research))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session).delete(delete_session))
        .route("/session/:id/response", post(session_response))
        .route("/session/:id/decline", post(session_decline))
        .route("/session/:id/accept", post(session_accept))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

// =============================================================================
// STATELESS ENDPOINTS
// =============================================================================

async fn detect(Json(req): Json<DetectRequest>) -> Json<CompoundResult> {
    let response = req.response.unwrap_or_default();
    Json(CompoundAnalyzer::new().analyze(&response, &req.history))
}

async fn detect_explicit(Json(req): Json<ResponseRequest>) -> Json<DetectionResult> {
    Json(ExplicitDetector::new().detect_opt(req.response.as_deref()))
}

async fn detect_implicit(Json(req): Json<ResponseRequest>) -> Json<ImplicitDetectionResult> {
    Json(ImplicitDetector::new().detect_opt(req.response.as_deref()))
}

async fn constraints(Json(req): Json<ConstraintsRequest>) -> Json<ConstraintProfile> {
    Json(ConstraintExtractor::new().extract(&req.survey, req.surveyor_notes.as_ref()))
}

async fn complexity(Json(req): Json<ComplexityRequest>) -> Json<ComplexityCheck> {
    let recommendation = req.recommendation.unwrap_or_default();
    Json(ComplexityGuard::new().check(&recommendation, &req.constraints))
}

async fn research(Json(req): Json<ResearchRequest>) -> Json<Vec<ResearchableGap>> {
    Json(ResearchGapFinder::new().identify(&req.gaps))
}

// =============================================================================
// SESSIONS
// =============================================================================

/// Create new session
async fn create_session(State(state): State<Arc<AppState>>) -> Json<NewSessionResponse> {
    let session_id = generate_session_id(&state);

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), SurveySession::new());
    info!(session = %session_id, "session created");

    Json(NewSessionResponse { session_id })
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(SessionStatusResponse {
        session_id: id,
        status: session.status(),
    }))
}

/// Remove a session; callers delete sessions once the survey is over
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    let mut sessions = state.sessions.write().await;
    match sessions.remove(&id) {
        Some(_) => {
            info!(session = %id, "session deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Feed one response to a session
async fn session_response(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ResponseRequest>,
) -> Result<Json<TurnOutcome>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let response = req.response.unwrap_or_default();
    Ok(Json(session.respond(&response)))
}

async fn session_decline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatus>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.decline();
    Ok(Json(session.status()))
}

async fn session_accept(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatus>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.accept();
    Ok(Json(session.status()))
}

/// Generate session ID
fn generate_session_id(state: &AppState) -> String {
    let seq = state.next_id.fetch_add(1, Ordering::Relaxed);
    let millis = chrono::Utc::now().timestamp_millis();
    format!("session_{:x}_{}", millis, seq)
}

/// Run the API server
pub async fn run_server(addr: &str) -> crate::Result<()> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(CliffError::Server)?;
    info!(%addr, "cliffwatch API listening");
    axum::serve(listener, router).await.map_err(CliffError::Server)

}
