// src/web/mw_auth.rs
use crate::{error::AppError, models::user::SessionUser, services::session_service::SessionRegistry};
use axum::{
    extract::{Query, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// Identity of the caller, put into the request extensions by [`require_auth`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub SessionUser);

/// The bearer token the caller presented.
#[derive(Clone, Debug)]
pub struct AuthToken(pub String);

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Token from `Authorization: Bearer <token>`, falling back to `?token=`.
fn extract_token(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    from_header
        .or_else(|| {
            Query::<TokenQuery>::try_from_uri(request.uri())
                .ok()
                .and_then(|q| q.0.token)
        })
        .filter(|t| !t.is_empty())
}

// Rejects requests without a known session token.
pub async fn require_auth(
    State(sessions): State<SessionRegistry>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(&request) else {
        tracing::debug!("Auth MW: no token on {}", request.uri().path());
        return Err(AppError::Unauthenticated);
    };

    match sessions.resolve(&token).await {
        Some(user) => {
            tracing::debug!("Auth MW: '{}' authenticated.", user.username);
            request.extensions_mut().insert(CurrentUser(user));
            request.extensions_mut().insert(AuthToken(token));
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Auth MW: unknown token on {}", request.uri().path());
            Err(AppError::Unauthenticated)
        }
    }
}
