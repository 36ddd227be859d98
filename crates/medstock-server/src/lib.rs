//! Medstock Server - medicine inventory dashboard
//!
//! This crate serves the HTML dashboard for recording medicines, generating
//! QR labels for them, and tracking items close to expiry.

pub mod codes;
pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod models;
pub mod routes;
pub mod views;

pub use error::AppError;
pub use routes::{create_router, AppState};
