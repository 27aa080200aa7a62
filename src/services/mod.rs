// src/services/mod.rs
pub mod access_policy;
pub mod auth_service;
pub mod export_service;
pub mod scoring_service;
pub mod session_service;
pub mod submission_service;
pub mod user_service;
