// src/web/mod.rs
pub mod admin_handlers;
pub mod assessment_handlers;
pub mod auth_handlers;
pub mod extract;
pub mod mw_auth;
pub mod routes;
pub mod submission_handlers;
