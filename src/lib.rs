// src/lib.rs
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

pub use state::AppState;
pub use web::routes::create_router;
