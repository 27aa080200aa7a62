// src/models/mod.rs
pub mod assessment;
pub mod submission;
pub mod user;
