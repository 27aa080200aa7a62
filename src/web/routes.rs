// src/web/routes.rs
use crate::{
    db,
    error::AppResult,
    state::AppState,
    web::{admin_handlers, assessment_handlers, auth_handlers, mw_auth, submission_handlers},
};
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

pub fn create_router(app_state: AppState) -> Router {
    // --- Public API ---
    let public_routes = Router::new()
        .route("/register", post(auth_handlers::handle_register))
        .route("/login", post(auth_handlers::handle_login))
        .route("/questionnaire", get(assessment_handlers::show_questionnaire))
        .route("/score", post(assessment_handlers::handle_score));

    // --- Bearer token required ---
    // Role and ownership checks happen per handler through access_policy.
    let authenticated_routes = Router::new()
        .route("/logout", post(auth_handlers::handle_logout))
        .route(
            "/submissions",
            get(submission_handlers::list_submissions).post(submission_handlers::handle_submit),
        )
        .route("/submissions/{user_id}", get(submission_handlers::show_submission))
        .route("/users", get(admin_handlers::list_users))
        .route("/export/submissions.csv", get(admin_handlers::export_submissions_csv))
        .route("/db/download", get(admin_handlers::download_database))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    let mut router = Router::new()
        .route("/health", get(health))
        .nest("/api", public_routes.merge(authenticated_routes));

    let static_dir = &app_state.config.static_dir;
    if static_dir.is_dir() {
        tracing::info!("Serving frontend from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    } else {
        tracing::debug!("No frontend directory at {}; static serving disabled", static_dir.display());
    }

    router.with_state(app_state)
}

// GET /health
async fn health(State(state): State<AppState>) -> AppResult<StatusCode> {
    db::ping(&state.db_pool).await?;
    Ok(StatusCode::OK)
}
