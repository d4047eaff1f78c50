use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{PropertyContext, WeatherEvent};
use super::service::{AnalysisError, ClaimAnalysis, ClaimAnalysisRequest, DolAnalyzer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub property: PropertyContext,
    #[serde(default)]
    pub events: Vec<WeatherEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalyzeRequest {
    pub claims: Vec<ClaimAnalysisRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchAnalyzeResponse {
    pub results: Vec<ClaimAnalysis>,
}

/// Router builder exposing the date-of-loss endpoints.
pub fn dol_router(analyzer: Arc<DolAnalyzer>) -> Router {
    Router::new()
        .route("/api/v1/dol/analyze", post(analyze_handler))
        .route("/api/v1/dol/analyze/batch", post(batch_handler))
        .with_state(analyzer)
}

pub(crate) async fn analyze_handler(
    State(analyzer): State<Arc<DolAnalyzer>>,
    axum::Json(request): axum::Json<AnalyzeRequest>,
) -> Response {
    match analyzer.analyze(&request.property, &request.events) {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn batch_handler(
    State(analyzer): State<Arc<DolAnalyzer>>,
    axum::Json(request): axum::Json<BatchAnalyzeRequest>,
) -> Response {
    let claims = request.claims;
    let outcome = tokio::task::spawn_blocking(move || analyzer.analyze_batch(&claims)).await;

    match outcome {
        Ok(Ok(results)) => {
            (StatusCode::OK, axum::Json(BatchAnalyzeResponse { results })).into_response()
        }
        Ok(Err(error)) => error_response(error),
        Err(join_error) => {
            let payload = json!({
                "error": format!("batch analysis aborted: {join_error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn error_response(error: AnalysisError) -> Response {
    let status = match error {
        AnalysisError::InvalidProperty { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
