// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{required_field, LoginRequest, LoginResponse, RegisterRequest, Role, SessionUser},
    services::{auth_service, user_service},
    state::AppState,
    web::{extract::ApiJson, mw_auth::AuthToken},
};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

// POST /api/register (new accounts are always students)
pub async fn handle_register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    // 1. All three fields must be present and non-blank
    let (Some(name), Some(username), Some(password)) = (
        required_field(body.name),
        required_field(body.username),
        required_field(body.password),
    ) else {
        return Err(AppError::Validation("All fields are required".into()));
    };
    let name = name.trim();
    let username = username.trim();

    tracing::info!("Registration attempt for username: {}", username);
    // 2. Hash and insert; a taken username comes back as Conflict (409)
    user_service::create_user(
        &state.db_pool,
        None,
        username,
        name,
        &password,
        Role::Student,
        state.config.bcrypt_cost,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // 1. Both credentials are required (400 otherwise)
    let (Some(username), Some(password)) = (required_field(body.username), required_field(body.password))
    else {
        return Err(AppError::Validation("username and password required".into()));
    };
    let username = username.trim();
    tracing::info!("Login attempt for: {}", username);

    // 2. Look the user up; unknown usernames and wrong passwords share the same 401
    let Some(user) = user_service::find_user_by_username(&state.db_pool, username).await? else {
        tracing::warn!("Login failed: unknown user '{}'", username);
        return Err(AppError::InvalidCredentials);
    };

    // 3. Compare against the stored bcrypt hash
    if !auth_service::verify_password(&password, &user.password_hash).await? {
        tracing::warn!("Login failed: wrong password for '{}'", username);
        return Err(AppError::InvalidCredentials);
    }

    // 4. Open a new session; earlier tokens of this user stay valid
    let session_user = SessionUser::from(&user);
    let token = state.sessions.issue(session_user.clone()).await;
    tracing::info!("✅ Login successful for: {}", user.username);

    // Never echoes the password hash
    Ok(Json(LoginResponse {
        success: true,
        token,
        user: session_user,
    }))
}

// POST /api/logout (revokes only the token used for this request)
pub async fn handle_logout(
    State(state): State<AppState>,
    Extension(AuthToken(token)): Extension<AuthToken>,
) -> StatusCode {
    if state.sessions.revoke(&token).await {
        tracing::info!("🚪 Session closed.");
    }
    StatusCode::NO_CONTENT
}
