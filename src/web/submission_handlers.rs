// src/web/submission_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::submission::{Submission, SubmissionWithUser, SubmitRequest, SubmitResponse},
    services::{
        access_policy::{self, Action},
        submission_service,
    },
    state::AppState,
    web::{extract::ApiJson, mw_auth::CurrentUser},
};
use axum::{
    extract::{Extension, Path, State},
    Json,
};

// POST /api/submissions: always the caller's own record.
pub async fn handle_submit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(body): ApiJson<SubmitRequest>,
) -> AppResult<Json<SubmitResponse>> {
    // 1. Students and admins may both submit, for themselves only
    access_policy::authorize(&user, Action::Submit)?;
    // 2. Reject blank zones and missing answers before touching the database
    let submission = body.validate()?;
    tracing::info!("New submission from {} ({})", user.username, user.id);

    // 3. First submission inserts, later ones overwrite the same row
    let outcome = submission_service::upsert_submission(&state.db_pool, &user.id, &submission).await?;
    Ok(Json(outcome.into()))
}

// GET /api/submissions (admin only, newest first, with user details)
pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Vec<SubmissionWithUser>>> {
    access_policy::authorize(&user, Action::ListSubmissions)?;

    let rows = submission_service::find_all_submissions(&state.db_pool).await?;
    Ok(Json(rows.into_iter().map(SubmissionWithUser::from).collect()))
}

// GET /api/submissions/{user_id} (the owner or an admin)
pub async fn show_submission(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(owner_id): Path<String>,
) -> AppResult<Json<Submission>> {
    // Checked before the lookup: a 403 says nothing about whether the record exists
    access_policy::authorize(&user, Action::ReadSubmission { owner_id: &owner_id })?;

    let row = submission_service::find_submission_for_user(&state.db_pool, &owner_id)
        .await?
        .ok_or(AppError::NotFound)?; // allowed, but nothing submitted yet
    Ok(Json(row.into()))
}
