//! BMI proxy handler

use crate::{state::AppState, Result};
use axum::{extract::State, Form, Json};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    pub weight: String,
    pub height: String,
}

/// `POST /calculate_bmi` - forward weight/height to the third-party BMI API
/// and return its JSON response unmodified. Upstream failures surface as a
/// transport-level 500 with the wrapped cause.
pub async fn calculate_bmi(
    State(state): State<AppState>,
    Form(form): Form<BmiRequest>,
) -> Result<Json<Value>> {
    let body = state.bmi.calculate(&form.weight, &form.height).await?;
    Ok(Json(body))
}
