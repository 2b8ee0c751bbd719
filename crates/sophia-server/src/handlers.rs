//! HTTP request handlers for the server.
//!
//! Thin JSON adapters over [`Brain`]; every route maps one-to-one onto a
//! Brain operation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use sophia_brain::{Brain, BrainError};
use sophia_context::{ContextExport, ContextSummary};
use sophia_domain::{GraphDocument, QualityLevel};
use sophia_provenance::{LedgerError, ProvenanceStats};
use std::sync::Arc;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The orchestrator
    pub brain: Arc<Brain>,
}

impl AppState {
    /// Wrap a brain for sharing across handlers
    pub fn new(brain: Brain) -> Self {
        Self {
            brain: Arc::new(brain),
        }
    }
}

/// Session creation response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// New session id
    pub session_id: String,
    /// Capability names
    pub capabilities: Vec<String>,
}

/// Message request
///
/// Fields are optional so that a missing one yields a 400 with a clear
/// message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Target session; created on first reference
    #[serde(default)]
    pub session_id: Option<String>,
    /// The utterance
    #[serde(default)]
    pub message: Option<String>,
    /// Current graph document
    #[serde(default)]
    pub graph_data: Option<GraphDocument>,
}

/// Message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Handler response
    pub response: sophia_domain::Response,
    /// Session summary after the message
    pub context_summary: ContextSummary,
}

/// Review request
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Reviewed content id
    pub content_id: String,
    /// Reviewer name
    #[serde(default = "default_reviewer")]
    pub reviewer: String,
    /// Rating from 1 to 5
    pub rating: i64,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

fn default_reviewer() -> String {
    "anonymous".to_string()
}

/// Review response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Reviewed content id
    pub content_id: String,
    /// Recomputed quality level
    pub quality_level: QualityLevel,
    /// Quality score after the review
    pub quality_score: f64,
}

/// Capability listing
#[derive(Debug, Serialize, Deserialize)]
pub struct CapabilitiesResponse {
    /// Capability names
    pub capabilities: Vec<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Live sessions
    pub session_count: usize,
    /// Records in the provenance ledger
    pub provenance_records: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Unknown session or content id
    NotFound(String),
    /// Missing or out-of-range input
    BadRequest(String),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InternalError(msg) => {
                warn!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<BrainError> for AppError {
    fn from(e: BrainError) -> Self {
        let message = e.to_string();
        match e {
            BrainError::NotFound(_) => AppError::NotFound(message),
            BrainError::MissingInput(_) => AppError::BadRequest(message),
            BrainError::Ledger(LedgerError::RecordNotFound(_)) => AppError::NotFound(message),
            BrainError::Ledger(LedgerError::InvalidRating(_)) => AppError::BadRequest(message),
        }
    }
}

fn capability_list(brain: &Brain) -> Vec<String> {
    brain.capabilities().iter().map(|c| c.to_string()).collect()
}

/// POST /brain/session - Start a new session
async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.brain.create_session();
    Json(CreateSessionResponse {
        session_id,
        capabilities: capability_list(&state.brain),
    })
}

/// Run a Brain call that may wait on a session lock
///
/// Same-session requests serialize on a blocking mutex, so the call runs on
/// the blocking pool instead of a runtime worker.
async fn with_brain<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Brain) -> Result<T, BrainError> + Send + 'static,
    T: Send + 'static,
{
    let brain = Arc::clone(&state.brain);
    tokio::task::spawn_blocking(move || f(&brain))
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .map_err(AppError::from)
}

/// POST /brain/message - Process one utterance
async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let session_id = request.session_id.unwrap_or_default();
    let message = request.message.unwrap_or_default();
    let graph = request.graph_data;

    let (response, context_summary) = with_brain(&state, move |brain| {
        brain.process_with_summary(&session_id, &message, graph.as_ref())
    })
    .await?;

    Ok(Json(MessageResponse {
        response,
        context_summary,
    }))
}

/// GET /brain/context/:session_id - Export a session
async fn get_context(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ContextExport>, AppError> {
    let export = with_brain(&state, move |brain| brain.context_export(&session_id)).await?;
    Ok(Json(export))
}

/// DELETE /brain/context/:session_id - Remove a session
async fn delete_context(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    with_brain(&state, move |brain| brain.delete_session(&session_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /brain/provenance - Ledger statistics
async fn provenance_stats(State(state): State<AppState>) -> Json<ProvenanceStats> {
    Json(state.brain.provenance_stats())
}

/// POST /brain/provenance/review - Review tracked content
async fn review_content(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    let rating = u8::try_from(request.rating).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid review rating {}: must be between 1 and 5",
            request.rating
        ))
    })?;

    let quality_level =
        state
            .brain
            .review_content(&request.content_id, &request.reviewer, rating, &request.notes)?;
    let quality_score = state
        .brain
        .ledger()
        .quality_score(&request.content_id)
        .ok_or_else(|| AppError::InternalError("Reviewed record disappeared".to_string()))?;

    Ok(Json(ReviewResponse {
        content_id: request.content_id,
        quality_level,
        quality_score,
    }))
}

/// GET /brain/capabilities - Capability listing
async fn capabilities(State(state): State<AppState>) -> Json<CapabilitiesResponse> {
    Json(CapabilitiesResponse {
        capabilities: capability_list(&state.brain),
    })
}

/// GET /health - Liveness and counts
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        session_count: state.brain.session_count(),
        provenance_records: state.brain.ledger().len(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/brain/session", post(create_session))
        .route("/brain/message", post(send_message))
        .route("/brain/context/:session_id", get(get_context).delete(delete_context))
        .route("/brain/provenance", get(provenance_stats))
        .route("/brain/provenance/review", post(review_content))
        .route("/brain/capabilities", get(capabilities))
        .route("/health", get(health_check))
        .with_state(state)
}
