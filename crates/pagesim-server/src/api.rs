//! HTTP routes mapping one-to-one onto [`SessionService`] operations.

use crate::protocol::{
    AccessRequest, AccessResponse, ErrorResponse, SetAlgorithmRequest, SetAlgorithmResponse,
    SimulateRequest, SimulateResponse, StatusResponse,
};
use crate::session::SessionService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pagesim_common::PagesimError;
use pagesim_engine::SimulationState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

/// Session shared across handlers.
pub type SharedSession = Arc<SessionService>;

/// Failure returned by a handler.
#[derive(Debug)]
pub enum ApiError {
    /// The session rejected the operation.
    Session(PagesimError),
    /// The request body could not be decoded.
    BadRequest(String),
}

impl From<PagesimError> for ApiError {
    fn from(err: PagesimError) -> Self {
        ApiError::Session(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// HTTP status for each error kind.
pub fn status_for(err: &PagesimError) -> StatusCode {
    match err {
        PagesimError::InvalidConfig(_)
        | PagesimError::OutOfRange { .. }
        | PagesimError::MissingReferenceString
        | PagesimError::ConfigError(_) => StatusCode::BAD_REQUEST,
        PagesimError::SessionBusy => StatusCode::CONFLICT,
        PagesimError::NoVictimAvailable => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Session(err) => (status_for(err), ErrorResponse::from(err)),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message.clone(),
                    kind: "BadRequest".to_string(),
                },
            ),
        };
        warn!(status = status.as_u16(), kind = %body.kind, error = %body.error, "Request rejected");
        (status, Json(body)).into_response()
    }
}

/// Health check reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Builds the application router.
pub fn create_router(session: SharedSession) -> Router {
    Router::new()
        .route("/state", get(state_handler))
        .route("/access", post(access_handler))
        .route("/set_algorithm", post(set_algorithm_handler))
        .route("/reset", post(reset_handler))
        .route("/simulate", post(simulate_handler))
        .route("/health", get(health_handler))
        .with_state(session)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn state_handler(
    State(session): State<SharedSession>,
) -> Result<Json<SimulationState>, ApiError> {
    Ok(Json(session.state()?))
}

async fn access_handler(
    State(session): State<SharedSession>,
    payload: Result<Json<AccessRequest>, JsonRejection>,
) -> Result<Json<AccessResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(session.access(request.page)?))
}

async fn set_algorithm_handler(
    State(session): State<SharedSession>,
    payload: Result<Json<SetAlgorithmRequest>, JsonRejection>,
) -> Result<Json<SetAlgorithmResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(session.set_algorithm(request)?))
}

async fn reset_handler(
    State(session): State<SharedSession>,
) -> Result<Json<StatusResponse>, ApiError> {
    Ok(Json(session.reset()?))
}

async fn simulate_handler(
    State(session): State<SharedSession>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(session.simulate(&request.sequence)?))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
