// src/state.rs
use crate::{
    config::Config,
    services::{scoring_service::Questionnaire, session_service::SessionRegistry},
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub sessions: SessionRegistry,
    pub questionnaire: Arc<Questionnaire>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        AppState {
            db_pool,
            sessions: SessionRegistry::new(),
            questionnaire: Arc::new(Questionnaire::default()),
            config: Arc::new(config),
        }
    }
}

// Lets handlers and middleware extract the pool directly.
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}

impl axum::extract::FromRef<AppState> for SessionRegistry {
    fn from_ref(state: &AppState) -> SessionRegistry {
        state.sessions.clone()
    }
}
