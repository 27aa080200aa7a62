// src/web/assessment_handlers.rs
use crate::{
    error::AppResult,
    models::assessment::{Assessment, ScoreRequest},
    state::AppState,
    web::extract::ApiJson,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::Value;

// GET /api/questionnaire
pub async fn show_questionnaire(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.questionnaire.view()).into_response()
}

// POST /api/score: missing answers score as all zero.
pub async fn handle_score(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ScoreRequest>,
) -> AppResult<Json<Assessment>> {
    let answers = body.answers.unwrap_or(Value::Null);
    let assessment = state.questionnaire.assess_json(&answers);
    tracing::debug!(
        "Scored answers: {}/{} -> {}",
        assessment.total_score,
        assessment.max_score,
        assessment.zone.as_str()
    );
    Ok(Json(assessment))
}
