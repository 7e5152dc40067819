//! Patient records service - Rust implementation
//!
//! A small HTTP service exposing:
//! - Patient record CRUD backed by a document store
//! - Token issuance and bearer-gated routes
//! - Image classification against a pretrained ONNX artifact
//! - A proxy to a third-party BMI calculation API

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
