//! Token issuance and the bearer-gated example route

use crate::{
    auth::{AuthError, AuthenticatedUser},
    state::AppState,
};
use axum::{extract::State, Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    /// Space-delimited requested scopes, OAuth2 password-grant style.
    #[serde(default)]
    pub scope: String,
}

/// `POST /token` - check the credential pair and issue a signed token with
/// a fixed expiry. No refresh, no revocation.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<Value>, AuthError> {
    let scopes: Vec<String> = form
        .scope
        .split_whitespace()
        .map(|s| s.to_string())
        .collect();

    let access_token = state
        .auth
        .issue_token(&form.username, &form.password, scopes)
        .await?;

    Ok(Json(json!({
        "access_token": access_token,
        "token_type": "bearer",
    })))
}

/// `GET /private-data` - example bearer-gated route.
pub async fn private_data(AuthenticatedUser(user): AuthenticatedUser) -> Json<Value> {
    Json(json!({
        "message": "This is private data",
        "user": user,
    }))
}
