//! Patient CRUD handlers
//!
//! Record endpoints answer with the uniform success/error envelopes at
//! transport status 200; callers inspect the envelope's `code` field.
//! Authentication failures and payload validation are transport-level
//! (401 / 422).

use crate::{
    auth::AuthenticatedUser,
    db::UpdateOutcome,
    models::{ErrorEnvelope, PatientRecord, PatientUpdate, SuccessEnvelope},
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

/// `POST /patient/` - add a record; identity is assigned by the store.
pub async fn add_patient_data(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Json(record): Json<PatientRecord>,
) -> Result<Response> {
    record
        .validate()
        .map_err(|e| Error::UnprocessableEntity(e.to_string()))?;

    let created = state.store.create(record).await?;
    tracing::debug!(id = %created.id, "Patient record created");

    Ok(Json(SuccessEnvelope::new(created, "Patient added successfully.")).into_response())
}

/// `GET /patient/` - full list; an empty store is a success, not an error.
pub async fn get_patients(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<Response> {
    let patients = state.store.list().await?;

    let message = if patients.is_empty() {
        "Empty list returned"
    } else {
        "Patients data retrieved successfully"
    };

    Ok(Json(SuccessEnvelope::new(patients, message)).into_response())
}

/// `GET /patient/{id}` - fetch one record.
pub async fn get_patient_data(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Response> {
    match state.store.get(&id).await? {
        Some(patient) => Ok(Json(SuccessEnvelope::new(
            patient,
            "Patient data retrieved successfully",
        ))
        .into_response()),
        None => Ok(Json(ErrorEnvelope::new(
            "An error occurred.",
            404,
            "Patient doesn't exist.",
        ))
        .into_response()),
    }
}

/// `PUT /patient/{id}` - partial update. The success payload is a
/// confirmation string, not the updated record.
pub async fn update_patient_data(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<String>,
    Json(update): Json<PatientUpdate>,
) -> Result<Response> {
    update
        .validate()
        .map_err(|e| Error::UnprocessableEntity(e.to_string()))?;

    match state.store.update(&id, update).await? {
        UpdateOutcome::Updated(_) => Ok(Json(SuccessEnvelope::new(
            format!("Patient with ID: {id} name update is successful"),
            "Patient name updated successfully",
        ))
        .into_response()),
        UpdateOutcome::EmptyPayload | UpdateOutcome::NotFound => Ok(Json(ErrorEnvelope::new(
            "An error occurred",
            404,
            "There was an error updating the patient data.",
        ))
        .into_response()),
    }
}

/// `DELETE /patient/{id}` - hard delete, irreversible.
pub async fn delete_patient_data(
    State(state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Response> {
    if state.store.delete(&id).await? {
        tracing::debug!(id = %id, "Patient record deleted");
        Ok(Json(SuccessEnvelope::new(
            format!("Patient with ID: {id} removed"),
            "Patient deleted successfully",
        ))
        .into_response())
    } else {
        Ok(Json(ErrorEnvelope::new(
            "An error occurred",
            404,
            format!("Patient with id {id} doesn't exist"),
        ))
        .into_response())
    }
}
