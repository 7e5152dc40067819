//! Authentication / Authorization primitives.
//!
//! All credential and scope logic lives here: the credential-lookup
//! capability, token issuance/validation, the bearer middleware, and the
//! handler-side extractor. The service issues its own HS256 tokens from a
//! placeholder credential record; swapping [`CredentialStore`] for a real
//! identity provider leaves route logic untouched.

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::{config::AuthConfig, state::AppState};

/// Scopes known to the service. Carried in issued tokens; presence is not
/// enforced per route.
pub const KNOWN_SCOPES: &[(&str, &str)] = &[
    ("read:patients", "Read access to patient data"),
    ("write:patients", "Write access to patient data"),
];

/// The authenticated caller attached to protected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub scopes: Vec<String>,
}

/// A known user resolved from the credential store.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
}

#[derive(Debug, Clone)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
    InvalidCredentials,
}

impl AuthError {
    fn status(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn diagnostics(&self) -> String {
        match self {
            Self::MissingToken => "Missing bearer token".to_string(),
            Self::InvalidToken(msg) => format!("Invalid bearer token: {msg}"),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
        }
    }

    fn www_authenticate(&self) -> Option<&'static str> {
        match self {
            Self::MissingToken | Self::InvalidToken(_) => Some("Bearer"),
            Self::InvalidCredentials => None,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(json!({
            "error": "unauthorized",
            "code": status.as_u16(),
            "message": self.diagnostics(),
        }));

        let mut response = (status, body).into_response();
        if let Some(www) = self.www_authenticate() {
            if let Ok(v) = header::HeaderValue::from_str(www) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, v);
            }
        }
        response
    }
}

/// Credential-lookup capability.
///
/// `verify` authenticates a username/password pair; `lookup` resolves a
/// token subject to a known user. Implementations may call out to a real
/// identity provider.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Option<User>;
    async fn lookup(&self, username: &str) -> Option<User>;
}

/// Single static credential record (placeholder, not real auth).
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

#[async_trait::async_trait]
impl CredentialStore for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> Option<User> {
        (self.username == username && self.password == password).then(|| User {
            username: self.username.clone(),
        })
    }

    async fn lookup(&self, username: &str) -> Option<User> {
        (self.username == username).then(|| User {
            username: self.username.clone(),
        })
    }
}

/// JWT claims carried by issued tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub scopes: Vec<String>,
    pub exp: i64,
}

/// Issues and validates HS256 session tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiry_minutes: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, expiry_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expiry_minutes,
        }
    }

    /// Issue a token for `username` embedding the requested scopes, expiring
    /// a fixed interval from now. Stateless: no refresh, no revocation.
    pub fn issue(&self, username: &str, scopes: Vec<String>) -> Result<String, AuthError> {
        let expire = Utc::now() + Duration::minutes(self.expiry_minutes);
        let claims = Claims {
            sub: username.to_string(),
            scopes,
            exp: expire.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::InvalidToken(format!("Failed to sign token: {e}")))
    }

    /// Decode and validate a token, checking signature and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(format!("{e}")))
    }
}

/// Shared auth capability: one place for credential and token decisions.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, tokens: TokenService) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    /// Check a username/password pair and issue a token on success.
    pub async fn issue_token(
        &self,
        username: &str,
        password: &str,
        scopes: Vec<String>,
    ) -> Result<String, AuthError> {
        let user = self
            .credentials
            .verify(username, password)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        self.tokens.issue(&user.username, scopes)
    }

    /// Resolve the bearer token in `headers` to a known user.
    pub async fn authenticate_headers(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let Some(authz) = headers.get(header::AUTHORIZATION) else {
            return Err(AuthError::MissingToken);
        };

        let authz = authz.to_str().map_err(|_| {
            AuthError::InvalidToken("Authorization header is not valid UTF-8".to_string())
        })?;

        let token = authz
            .strip_prefix("Bearer ")
            .or_else(|| authz.strip_prefix("bearer "))
            .ok_or_else(|| {
                AuthError::InvalidToken("Authorization header must be 'Bearer <token>'".to_string())
            })?;

        let claims = self.tokens.decode(token)?;

        let user = self
            .credentials
            .lookup(&claims.sub)
            .await
            .ok_or_else(|| AuthError::InvalidToken(format!("Unknown subject '{}'", claims.sub)))?;

        Ok(Principal {
            username: user.username,
            scopes: claims.scopes,
        })
    }
}

/// Extractor for the authenticated principal attached by middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Principal);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AuthError::MissingToken.into_response())
    }
}

/// Middleware for attaching `Principal` (or rejecting) on protected routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    match state.auth.authenticate_headers(req.headers()).await {
        Ok(principal) => {
            req.extensions_mut().insert::<Principal>(principal);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err.diagnostics(), "Rejected unauthenticated request");
            err.into_response()
        }
    }
}
