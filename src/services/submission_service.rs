// src/services/submission_service.rs
use crate::{
    error::{AppError, AppResult},
    models::submission::{NewSubmission, SubmissionRow, SubmissionWithUserRow, UpsertOutcome},
};
use chrono::Utc;
use sqlx::SqlitePool;

/// Stores `submission` as the one and only result of `user_id`.
///
/// The first submit inserts; any later submit overwrites score, zone, answers
/// and timestamp of the same row. Concurrent submits for one user are
/// last-write-wins: whichever UPDATE commits last is what stays stored, and
/// the UNIQUE(user_id) constraint makes a second row impossible.
pub async fn upsert_submission(
    db_pool: &SqlitePool,
    user_id: &str,
    submission: &NewSubmission,
) -> AppResult<UpsertOutcome> {
    let answers_json = serde_json::to_string(&submission.answers).map_err(|e| {
        tracing::error!("Could not serialize answers for {}: {:?}", user_id, e);
        AppError::InternalServerError
    })?;
    let now = Utc::now();

    let inserted: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO submissions (user_id, score, zone, answers, submitted_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(user_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(submission.score)
    .bind(&submission.zone)
    .bind(&answers_json)
    .bind(now)
    .fetch_optional(db_pool)
    .await?;

    if let Some(id) = inserted {
        tracing::info!("📝 New submission {} stored for user {}", id, user_id);
        return Ok(UpsertOutcome::Inserted(id));
    }

    let rows_affected = sqlx::query(
        r#"
        UPDATE submissions
        SET score = ?1, zone = ?2, answers = ?3, submitted_at = ?4
        WHERE user_id = ?5
        "#,
    )
    .bind(submission.score)
    .bind(&submission.zone)
    .bind(&answers_json)
    .bind(now)
    .bind(user_id)
    .execute(db_pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        // Rows are never deleted, so the conflicting row must still be there.
        tracing::error!("Submission for {} vanished between insert and update", user_id);
        return Err(AppError::InternalServerError);
    }

    tracing::info!("📝 Submission updated for user {}", user_id);
    Ok(UpsertOutcome::Updated)
}

pub async fn find_submission_for_user(
    db_pool: &SqlitePool,
    user_id: &str,
) -> AppResult<Option<SubmissionRow>> {
    tracing::debug!("Fetching submission of user {}", user_id);
    let row = sqlx::query_as::<_, SubmissionRow>(
        r#"
        SELECT id, user_id, score, zone, answers, submitted_at
        FROM submissions
        WHERE user_id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(row)
}

/// Every submission joined with its owner, newest first.
pub async fn find_all_submissions(db_pool: &SqlitePool) -> AppResult<Vec<SubmissionWithUserRow>> {
    tracing::debug!("Listing all submissions...");
    let rows = sqlx::query_as::<_, SubmissionWithUserRow>(
        r#"
        SELECT s.id, s.user_id, u.username AS username, u.name AS user_name,
               s.score, s.zone, s.answers, s.submitted_at
        FROM submissions s
        JOIN users u ON u.id = s.user_id
        ORDER BY julianday(s.submitted_at) DESC, s.id DESC
        "#,
    )
    .fetch_all(db_pool)
    .await?;
    tracing::debug!("Found {} submissions.", rows.len());
    Ok(rows)
}
