//! # REST API
//!
//! Builds the axum router that exposes the star registry over HTTP.
//! All endpoints share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                    | Description                          |
//! |--------|-------------------------|--------------------------------------|
//! | GET    | `/health`               | Liveness probe                       |
//! | GET    | `/status`               | Chain summary                        |
//! | POST   | `/requestValidation`    | Issue a challenge message            |
//! | POST   | `/submitstar`           | Submit a signed star claim           |
//! | GET    | `/block/height/:height` | Record by height                     |
//! | GET    | `/block/hash/:hash`     | Record by hash                       |
//! | GET    | `/blocks/:address`      | Stars owned by an address            |
//! | GET    | `/validate`             | Full-chain integrity report          |

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use starledger_protocol::{IntegrityIssue, OwnedStar, Record, RegistryError, Star, StarRegistry};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// The registry serving every request.
    pub registry: Arc<StarRegistry>,
    /// Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/requestValidation", post(request_validation_handler))
        .route("/submitstar", post(submit_star_handler))
        .route("/block/height/:height", get(block_by_height_handler))
        .route("/block/hash/:hash", get(block_by_hash_handler))
        .route("/blocks/:address", get(stars_by_address_handler))
        .route("/validate", get(validate_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Request body for `POST /requestValidation`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// Wallet address asking to prove ownership.
    pub address: String,
}

/// Response payload for `POST /requestValidation`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// The message the wallet must sign.
    pub message: String,
    /// Seconds the message stays valid.
    pub window_secs: u64,
}

/// Request body for `POST /submitstar`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitStarRequest {
    pub address: String,
    pub message: String,
    pub signature: String,
    pub star: Star,
}

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Node software version.
    pub version: String,
    /// Tip height, `null` before genesis.
    pub height: Option<u64>,
    /// Number of records including genesis.
    pub records: usize,
    /// Whether the full chain currently validates.
    pub valid: bool,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
}

/// Response payload for `GET /validate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub ok: bool,
    pub errors: Vec<IntegrityIssue>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description.
    pub error: String,
    /// Machine-readable error kind.
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Error Mapping
// ---------------------------------------------------------------------------

/// A registry error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(RegistryError);

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            RegistryError::MalformedMessage(_) | RegistryError::ExpiredRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::InvalidSignature { .. } => StatusCode::UNAUTHORIZED,
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::Decode(_) | RegistryError::Integrity(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn not_found(what: String) -> Response {
    let body = ErrorResponse {
        error: what,
        kind: "not_found".into(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health`: returns 200 if the node is alive.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /status`: tip height, record count, and chain validity.
async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let registry = &state.registry;
    Json(StatusResponse {
        version: state.version.clone(),
        height: registry.height(),
        records: registry.ledger().len(),
        valid: registry.validate_chain().is_empty(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `POST /requestValidation`: issue a challenge for `address`.
async fn request_validation_handler(
    State(state): State<AppState>,
    Json(req): Json<ValidationRequest>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let address = req.address.trim();
    if address.is_empty() {
        return Err(RegistryError::MalformedMessage("address must not be empty".into()).into());
    }

    let message = state.registry.request_verification_message(address);
    Ok(Json(ValidationResponse {
        message,
        window_secs: state.registry.config().verification_window.as_secs(),
    }))
}

/// `POST /submitstar`: verify ownership and register the star.
async fn submit_star_handler(
    State(state): State<AppState>,
    Json(req): Json<SubmitStarRequest>,
) -> Result<Json<Record>, ApiError> {
    let result = state.registry.submit_star(
        req.address.trim(),
        &req.message,
        &req.signature,
        req.star,
    );

    match result {
        Ok(record) => {
            state.metrics.records_appended_total.inc();
            Ok(Json(record))
        }
        Err(e) => {
            state
                .metrics
                .submissions_rejected_total
                .with_label_values(&[e.kind()])
                .inc();
            Err(e.into())
        }
    }
}

/// `GET /block/height/:height`: record at `height`, 404 when absent.
///
/// Anything that is not a non-negative integer cannot name a record, so it
/// is reported as absent rather than as a bad request.
async fn block_by_height_handler(
    Path(height): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match height
        .parse::<u64>()
        .ok()
        .and_then(|h| state.registry.get_by_height(h))
    {
        Some(record) => Json(record).into_response(),
        None => not_found(format!("no record at height {}", height)),
    }
}

/// `GET /block/hash/:hash`: record with `hash`, 404 on `NotFound`.
async fn block_by_hash_handler(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Record>, ApiError> {
    Ok(Json(state.registry.get_by_hash(&hash)?))
}

/// `GET /blocks/:address`: every star registered by `address`.
async fn stars_by_address_handler(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<OwnedStar>>, ApiError> {
    Ok(Json(state.registry.stars_by_address(&address)?))
}

/// `GET /validate`: run the full integrity check.
async fn validate_handler(State(state): State<AppState>) -> Json<ValidateResponse> {
    let errors = state.registry.validate_chain();
    Json(ValidateResponse {
        ok: errors.is_empty(),
        errors,
    })
}
