use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::error::AppError;

use super::aggregate::{aggregate, inconsistent_records, LevelShare, RiskCounts};
use super::client::RiskApi;
use super::domain::RiskId;
use super::preview::{HtmlPreviewRenderer, PreviewInput, PreviewRenderer, PreviewView};
use super::recommendations::RecommendationSet;

#[derive(Debug, Deserialize, Serialize)]
pub struct ClassifyRequest {
    pub probability: u8,
    pub impact: u8,
}

/// Raw form values, exactly as typed.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub probability: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub view: PreviewView,
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub counts: RiskCounts,
    pub breakdown: Vec<LevelShare>,
    pub inconsistent: Vec<RiskId>,
}

/// Gateway endpoints for hosts that cannot embed the core directly.
pub fn register_router<A>(api: Arc<A>) -> Router
where
    A: RiskApi + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/risks/classify", post(classify_handler))
        .route("/api/v1/risks/preview", post(preview_handler))
        .route("/api/v1/risks/stats", get(stats_handler::<A>))
        .with_state(api)
}

pub(crate) async fn classify_handler(Json(request): Json<ClassifyRequest>) -> Response {
    let in_scale = |value: u8| (1..=5).contains(&value);
    if !in_scale(request.probability) || !in_scale(request.impact) {
        let payload = json!({
            "error": "probability and impact must be between 1 and 5",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let set = RecommendationSet::for_inputs(request.probability, request.impact);
    let payload = json!({
        "score": set.score,
        "level": set.level,
        "urgency": set.urgency,
        "follow_up": set.follow_up(),
        "general_recommendations": set.general,
        "specific_recommendations": set.specific,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn preview_handler(Json(request): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let input = PreviewInput::from_fields(
        request.title.as_deref(),
        request.probability.as_deref(),
        request.impact.as_deref(),
    );
    let view = PreviewView::build(&input);
    let html = HtmlPreviewRenderer.render(&view).as_str().to_string();
    Json(PreviewResponse { view, html })
}

pub(crate) async fn stats_handler<A>(
    State(api): State<Arc<A>>,
) -> Result<Json<StatsResponse>, AppError>
where
    A: RiskApi + ?Sized + 'static,
{
    let records = api.list_risks().await.map_err(|err| {
        error!(error = %err, "stats gateway could not reach the risk register");
        AppError::from(err)
    })?;

    let counts = aggregate(&records);
    Ok(Json(StatsResponse {
        counts,
        breakdown: counts.breakdown(),
        inconsistent: inconsistent_records(&records),
    }))
}
