// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("database migration error: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("password processing failed")]
    PasswordHashingError,

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    // Missing or unknown bearer token.
    #[error("not authenticated")]
    Unauthenticated,

    // Valid identity without the role or ownership the action needs.
    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unexpected internal error")]
    InternalServerError,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SqlxError(_)
            | AppError::SqlxMigrateError(_)
            | AppError::Io(_)
            | AppError::Csv(_)
            | AppError::Config(_)
            | AppError::PasswordHashingError
            | AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the client. Storage and internal details
    /// stay in the server log.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::InvalidCredentials => "invalid credentials".to_string(),
            AppError::Unauthenticated => "no valid token".to_string(),
            AppError::Forbidden => "forbidden".to_string(),
            AppError::NotFound => "not found".to_string(),
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => "db error".to_string(),
            AppError::Config(_) => "configuration error".to_string(),
            _ => "internal error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_distinct_statuses() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("taken".into()).status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_errors_are_opaque() {
        let err = AppError::SqlxError(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "db error");
    }
}
