// src/web/admin_handlers.rs
use crate::{
    error::AppResult,
    models::user::UserSummary,
    services::{
        access_policy::{self, Action},
        export_service, submission_service, user_service,
    },
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, State},
    http::header,
    response::IntoResponse,
    Json,
};

// GET /api/users (admin only; password hashes are never selected)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Vec<UserSummary>>> {
    access_policy::authorize(&user, Action::ListUsers)?;
    Ok(Json(user_service::find_all_users(&state.db_pool).await?))
}

// GET /api/export/submissions.csv
pub async fn export_submissions_csv(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    access_policy::authorize(&user, Action::Export)?;

    // Same rows and order as GET /api/submissions
    let rows = submission_service::find_all_submissions(&state.db_pool).await?;
    let csv = export_service::submissions_to_csv(&rows)?;
    tracing::info!("📤 '{}' exported {} submissions as CSV", user.username, rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"submissions.csv\""),
        ],
        csv,
    ))
}

// GET /api/db/download
pub async fn download_database(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    access_policy::authorize(&user, Action::Export)?;

    // Consistent copy via VACUUM INTO, safe while the pool keeps serving writes
    let bytes = export_service::database_snapshot(&state.db_pool).await?;
    tracing::info!("📤 '{}' downloaded a database snapshot ({} bytes)", user.username, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/vnd.sqlite3"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"db.sqlite\""),
        ],
        bytes,
    ))
}
