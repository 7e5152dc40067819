//! Patient record routes
//!
//! Nested under `/patient` behind the bearer middleware. Trailing-slash
//! variants are registered explicitly; no redirects are used.

use crate::api::handlers::patient;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(patient::add_patient_data).get(patient::get_patients),
        )
        // Instance-level routes (with and without trailing slash)
        .route(
            "/:id",
            get(patient::get_patient_data)
                .put(patient::update_patient_data)
                .delete(patient::delete_patient_data),
        )
        .route(
            "/:id/",
            get(patient::get_patient_data)
                .put(patient::update_patient_data)
                .delete(patient::delete_patient_data),
        )
}
