// src/services/auth_service.rs
use crate::error::{AppError, AppResult};

/// Checks a password against a stored bcrypt hash. Runs on the blocking pool.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verifying bcrypt hash...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("spawn_blocking task failed (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("bcrypt verification error: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Produces a salted bcrypt hash with the given work factor.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Generating bcrypt hash (cost {})...", cost);
        bcrypt::hash(&password, cost)
    })
    .await
    .map_err(|e| {
        tracing::error!("spawn_blocking task failed (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("bcrypt hashing error: {:?}", e);
        AppError::PasswordHashingError
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("s3cret", 4).await.unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).await.unwrap());
        assert!(!verify_password("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-bcrypt-hash").await,
            Err(AppError::PasswordHashingError)
        ));
    }
}
