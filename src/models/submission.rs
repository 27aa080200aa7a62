// src/models/submission.rs
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

// A row of the `submissions` table; `answers` is the JSON text as stored.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionRow {
    pub id: i64,
    pub user_id: String,
    pub score: f64,
    pub zone: String,
    pub answers: String,
    pub submitted_at: DateTime<Utc>,
}

// Submission joined with its owner, for the admin listing and CSV export.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionWithUserRow {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    pub user_name: String,
    pub score: f64,
    pub zone: String,
    pub answers: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: i64,
    pub user_id: String,
    pub score: f64,
    pub zone: String,
    pub answers: Value,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionWithUser {
    pub id: i64,
    pub user_id: String,
    pub username: String,
    pub user_name: String,
    pub score: f64,
    pub zone: String,
    pub answers: Value,
    pub submitted_at: DateTime<Utc>,
}

fn decode_answers(raw: &str, submission_id: i64) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!("Submission {} has unreadable answers ({}); returning raw text", submission_id, e);
        Value::String(raw.to_string())
    })
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        let answers = decode_answers(&row.answers, row.id);
        Submission {
            id: row.id,
            user_id: row.user_id,
            score: row.score,
            zone: row.zone,
            answers,
            submitted_at: row.submitted_at,
        }
    }
}

impl From<SubmissionWithUserRow> for SubmissionWithUser {
    fn from(row: SubmissionWithUserRow) -> Self {
        let answers = decode_answers(&row.answers, row.id);
        SubmissionWithUser {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            user_name: row.user_name,
            score: row.score,
            zone: row.zone,
            answers,
            submitted_at: row.submitted_at,
        }
    }
}

/// Body of `POST /api/submissions`. A mistyped `score` or `zone` is already
/// rejected while decoding; `validate` covers the rest.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub score: f64,
    pub zone: String,
    #[serde(default)]
    pub answers: Option<Value>,
}

/// A validated submission ready to be upserted for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub score: f64,
    pub zone: String,
    pub answers: Value,
}

impl SubmitRequest {
    pub fn validate(self) -> AppResult<NewSubmission> {
        if !self.score.is_finite() {
            return Err(AppError::Validation("score must be a finite number".into()));
        }
        let zone = self.zone.trim();
        if zone.is_empty() {
            return Err(AppError::Validation("zone is required".into()));
        }
        let answers = match self.answers {
            Some(v) if !is_blank_answers(&v) => v,
            _ => return Err(AppError::Validation("answers are required".into())),
        };
        Ok(NewSubmission {
            score: self.score,
            zone: zone.to_string(),
            answers,
        })
    }
}

/// `null`, `false`, `""` and zero carry no answers. Empty arrays and objects do.
fn is_blank_answers(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(i64),
    Updated,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<i64>,
}

impl From<UpsertOutcome> for SubmitResponse {
    fn from(outcome: UpsertOutcome) -> Self {
        match outcome {
            UpsertOutcome::Inserted(id) => SubmitResponse {
                success: true,
                updated: false,
                inserted_id: Some(id),
            },
            UpsertOutcome::Updated => SubmitResponse {
                success: true,
                updated: true,
                inserted_id: None,
            },
        }
    }
}
