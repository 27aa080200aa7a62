// src/services/export_service.rs
//! Admin bulk exports: submissions as CSV and a copy of the database file.
use crate::{
    error::{AppError, AppResult},
    models::submission::SubmissionWithUserRow,
};
use sqlx::SqlitePool;
use uuid::Uuid;

pub const CSV_HEADER: [&str; 8] = [
    "id",
    "user_id",
    "username",
    "user_name",
    "score",
    "zone",
    "answers",
    "submitted_at",
];

/// Renders submissions as CSV. `answers` is written as its stored JSON text.
pub fn submissions_to_csv(rows: &[SubmissionWithUserRow]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for r in rows {
        wtr.write_record([
            r.id.to_string(),
            r.user_id.clone(),
            r.username.clone(),
            r.user_name.clone(),
            r.score.to_string(),
            r.zone.clone(),
            r.answers.clone(),
            r.submitted_at.to_rfc3339(),
        ])?;
    }

    wtr.into_inner().map_err(|e| {
        tracing::error!("Failed to flush CSV writer: {:?}", e);
        AppError::InternalServerError
    })
}

/// Takes a consistent snapshot of the live database with `VACUUM INTO` and
/// returns its bytes. Works for in-memory databases too.
pub async fn database_snapshot(db_pool: &SqlitePool) -> AppResult<Vec<u8>> {
    let path = std::env::temp_dir().join(format!("mind-assessment-{}.sqlite", Uuid::new_v4()));
    let path_str = path.to_string_lossy().into_owned();
    tracing::info!("Writing database snapshot to {}", path_str);

    sqlx::query("VACUUM INTO ?1")
        .bind(&path_str)
        .execute(db_pool)
        .await?;

    let bytes = tokio::fs::read(&path).await;
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("Could not remove snapshot {}: {}", path_str, e);
    }
    Ok(bytes?)
}
