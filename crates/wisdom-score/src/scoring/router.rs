use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::JoinError;
use tracing::error;

use super::calculator::{ScoreComponent, ScoreResult};
use super::domain::{Boundary, Commitment, Event, LifeAreaId};
use super::repository::{LifeAreaStore, StoreError};
use super::service::{FulfillmentService, ScoringServiceError};

/// Router builder exposing lookup, recalculation and preview endpoints.
pub fn scoring_router<S>(service: Arc<FulfillmentService<S>>) -> Router
where
    S: LifeAreaStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/life-areas/recalculate",
            post(recalculate_all_handler::<S>),
        )
        .route(
            "/api/v1/life-areas/:life_area_id",
            get(life_area_handler::<S>),
        )
        .route(
            "/api/v1/life-areas/:life_area_id/recalculate",
            post(recalculate_handler::<S>),
        )
        .route("/api/v1/scores/preview", post(preview_handler::<S>))
        .with_state(service)
}

/// Records supplied directly by the caller for a store-free score.
///
/// Events older than the configured window, measured back from `as_of` (default: now), are
/// dropped before scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorePreviewRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub boundaries: Vec<Boundary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResultView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_area_id: Option<LifeAreaId>,
    pub score: f64,
    pub status: &'static str,
    pub events_considered: usize,
    pub components: Vec<ScoreComponent>,
}

impl ScoreResultView {
    pub fn new(life_area_id: Option<LifeAreaId>, result: &ScoreResult) -> Self {
        Self {
            life_area_id,
            score: result.score.value(),
            status: result.status.label(),
            events_considered: result.events_considered,
            components: result.breakdown.components(),
        }
    }
}

fn error_response(error: ScoringServiceError) -> Response {
    let status = match &error {
        ScoringServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ScoringServiceError::Store(_) | ScoringServiceError::WindowOutOfRange { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn join_error_response(join_error: JoinError) -> Response {
    error!(error = %join_error, "recalculation task did not complete");
    let payload = json!({ "error": "recalculation task did not complete" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

pub(crate) async fn life_area_handler<S>(
    State(service): State<Arc<FulfillmentService<S>>>,
    Path(life_area_id): Path<String>,
) -> Response
where
    S: LifeAreaStore + 'static,
{
    let id = LifeAreaId(life_area_id);
    match service.life_area(&id) {
        Ok(life_area) => (StatusCode::OK, axum::Json(life_area.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recalculate_handler<S>(
    State(service): State<Arc<FulfillmentService<S>>>,
    Path(life_area_id): Path<String>,
) -> Response
where
    S: LifeAreaStore + 'static,
{
    let id = LifeAreaId(life_area_id);
    let lookup = id.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        service.life_area(&lookup)?;
        service.recalculate(&lookup, Utc::now())
    })
    .await;

    match outcome {
        Ok(Ok(result)) => {
            let view = ScoreResultView::new(Some(id), &result);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Ok(Err(error)) => error_response(error),
        Err(join_error) => join_error_response(join_error),
    }
}

pub(crate) async fn recalculate_all_handler<S>(
    State(service): State<Arc<FulfillmentService<S>>>,
) -> Response
where
    S: LifeAreaStore + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || service.recalculate_all(Utc::now())).await;

    match outcome {
        Ok(Ok(summary)) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => join_error_response(join_error),
    }
}

pub(crate) async fn preview_handler<S>(
    State(service): State<Arc<FulfillmentService<S>>>,
    axum::Json(request): axum::Json<ScorePreviewRequest>,
) -> Response
where
    S: LifeAreaStore + 'static,
{
    let now = request.as_of.unwrap_or_else(Utc::now);
    match service.preview_records(
        &request.events,
        &request.commitments,
        &request.boundaries,
        now,
    ) {
        Ok(result) => {
            let view = ScoreResultView::new(None, &result);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}
