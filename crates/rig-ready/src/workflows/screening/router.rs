use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::batch::{BatchSummary, ScoredDocument};
use super::{ScreeningEngine, ScreeningError};
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub documents: Vec<ScoreRequest>,
}

/// Router exposing résumé scoring over HTTP.
pub fn screening_router(engine: Arc<ScreeningEngine>) -> Router {
    Router::new()
        .route("/api/v1/screening/score", post(score_handler))
        .route("/api/v1/screening/batch", post(batch_handler))
        .route("/api/v1/screening/policy", get(policy_handler))
        .with_state(engine)
}

pub(crate) async fn score_handler(
    State(engine): State<Arc<ScreeningEngine>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Result<Response, AppError> {
    let result = engine.score_document(request.text.as_deref())?;
    Ok((StatusCode::OK, axum::Json(result)).into_response())
}

pub(crate) async fn batch_handler(
    State(engine): State<Arc<ScreeningEngine>>,
    axum::Json(request): axum::Json<BatchRequest>,
) -> Result<Response, AppError> {
    let mut pending = Vec::with_capacity(request.documents.len());
    for (index, document) in request.documents.into_iter().enumerate() {
        let name = document
            .name
            .unwrap_or_else(|| format!("document-{}", index + 1));
        let Some(text) = document.text else {
            return Err(ScreeningError::InvalidInput(format!(
                "résumé text is required for {name}"
            ))
            .into());
        };
        pending.push((name, text));
    }

    let handles: Vec<_> = pending
        .into_iter()
        .map(|(name, text)| {
            let engine = engine.clone();
            tokio::task::spawn_blocking(move || ScoredDocument {
                result: engine.score(&text),
                name,
            })
        })
        .collect();

    let mut documents = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(document) => documents.push(document),
            Err(error) => {
                tracing::error!(%error, "scoring task failed");
                let payload = json!({
                    "error": format!("scoring task failed: {error}"),
                });
                return Ok(
                    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
                );
            }
        }
    }

    let summary = BatchSummary::from_documents(documents);
    Ok((StatusCode::OK, axum::Json(summary)).into_response())
}

pub(crate) async fn policy_handler(State(engine): State<Arc<ScreeningEngine>>) -> Response {
    (StatusCode::OK, axum::Json(engine.config().clone())).into_response()
}
