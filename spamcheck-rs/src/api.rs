//! REST API handlers
//!
//! Prediction, classification with history logging, and history listing.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use classifier_rs::{ClassifierError, PredictionResult, SpamClassifier, Verdict};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::HistoryConfig;
use crate::history::{HistoryStore, SpamLog};

/// Shared handler state
pub struct AppState {
    pub classifier: Arc<SpamClassifier>,
    pub history: HistoryStore,
    pub history_limits: HistoryConfig,
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }

    /// Failed request that still carries a usable result
    pub fn partial(data: T, msg: &str) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(msg.to_string()),
        }
    }
}

/// Message submitted for classification
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub label: Verdict,
    pub confidence: f64,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            label: result.label,
            confidence: result.confidence,
        }
    }
}

/// Classification response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub label: Verdict,
    pub confidence: f64,
    /// Stored record, absent when the write failed
    pub record: Option<SpamLog>,
    /// The write failed and the request can be retried
    pub retryable: bool,
}

/// History query parameters
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

/// Map a classifier failure to a response
fn classifier_error(e: ClassifierError) -> Response {
    match e {
        ClassifierError::UninitializedModel => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::<()>::error("Classifier is not trained")),
        )
            .into_response(),
        other => {
            error!("Classifier failure: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Classifier failure")),
            )
                .into_response()
        }
    }
}

/// GET /health - Liveness check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    // null when the history database cannot be read
    let history_records = match state.history.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("History count unavailable: {}", e);
            None
        }
    };

    Json(serde_json::json!({
        "status": "healthy",
        "service": "spamcheck-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "trained": state.classifier.is_trained(),
        "history_records": history_records,
    }))
}

/// GET /api/model - Statistics of the trained model
pub async fn model_summary(State(state): State<Arc<AppState>>) -> Response {
    match state.classifier.summary() {
        Ok(summary) => Json(ApiResponse::success(summary)).into_response(),
        Err(e) => classifier_error(e),
    }
}

/// POST /api/predict - Classify without storing
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessageRequest>,
) -> Response {
    match state.classifier.predict(&req.message) {
        Ok(result) => Json(ApiResponse::success(PredictionResponse::from(result))).into_response(),
        Err(e) => classifier_error(e),
    }
}

/// POST /api/classify - Classify and store the result
pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessageRequest>,
) -> Response {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error("Message must not be empty")),
        )
            .into_response();
    }

    let prediction = match state.classifier.predict(&req.message) {
        Ok(prediction) => prediction,
        Err(e) => return classifier_error(e),
    };

    info!(
        "Classified message as {} ({:.2}%)",
        prediction.label, prediction.confidence
    );

    match state.history.record(&req.message, &prediction).await {
        Ok(record) => Json(ApiResponse::success(ClassifyResponse {
            label: prediction.label,
            confidence: prediction.confidence,
            record: Some(record),
            retryable: false,
        }))
        .into_response(),
        Err(e) => {
            warn!("Failed to store classification: {}", e);
            let retryable = e.is_retryable();
            let status = if retryable {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(ApiResponse::partial(
                    ClassifyResponse {
                        label: prediction.label,
                        confidence: prediction.confidence,
                        record: None,
                        retryable,
                    },
                    "Failed to save result to database. Please try again.",
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/history - Most recent classifications, newest first
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let limit = state.history_limits.resolve(query.limit);

    match state.history.recent(limit).await {
        Ok(logs) => Json(ApiResponse::success(logs)).into_response(),
        Err(e) => {
            error!("Failed to list history: {}", e);
            let status = if e.is_retryable() {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(ApiResponse::<()>::error("Failed to load history")),
            )
                .into_response()
        }
    }
}
