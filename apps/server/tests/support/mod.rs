
use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use medrec::{api::create_router, AppState, Config};
use tower::ServiceExt as _;

// Re-export commonly used items
pub use fixtures::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let mut config = Config::default();
        // Tests run against the in-memory backend; no external store needed.
        config.database.backend = "memory".to_string();
        config.auth.secret_key = "integration-test-secret".to_string();
        configure(&mut config);

        let state = AppState::new(config)
            .await
            .context("initialize AppState")?;
        let router = create_router(state.clone());

        Ok(Self { router, state })
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        content_type: Option<&str>,
        bearer: Option<&str>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder().method(method).uri(path_and_query);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = builder
            .body(Body::from(body.unwrap_or_default()))
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("execute request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    pub async fn json(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<serde_json::Value>,
        bearer: Option<&str>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let body_bytes = body
            .map(|v| serde_json::to_vec(&v).context("encode body"))
            .transpose()?
            .map(Bytes::from);

        let (status, _headers, bytes) = self
            .request(
                method,
                path_and_query,
                body_bytes,
                Some("application/json"),
                bearer,
            )
            .await?;

        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parse response body: {}", String::from_utf8_lossy(&bytes)))?
        };

        Ok((status, value))
    }

    /// Obtain a bearer token for the static test credentials.
    pub async fn token(&self) -> anyhow::Result<String> {
        let body = form_body(&[
            ("username", "testuser"),
            ("password", "testpassword"),
            ("scope", "read:patients write:patients"),
        ]);

        let (status, _headers, bytes) = self
            .request(
                Method::POST,
                "/token",
                Some(body),
                Some("application/x-www-form-urlencoded"),
                None,
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "token request failed: {status}");

        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        value["access_token"]
            .as_str()
            .map(|s| s.to_string())
            .context("access_token missing from token response")
    }

    /// Create a record via the API, returning the created envelope payload.
    pub async fn create_patient(
        &self,
        token: &str,
        patient: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        let (status, body) = self
            .json(Method::POST, "/patient/", Some(patient), Some(token))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "create failed: {status}");
        Ok(body["data"][0].clone())
    }
}

/// Encode simple key/value pairs as a urlencoded form body.
pub fn form_body(fields: &[(&str, &str)]) -> Bytes {
    let encoded = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencode(v)))
        .collect::<Vec<_>>()
        .join("&");
    Bytes::from(encoded)
}

fn urlencode(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => c.to_string(),
            ' ' => "+".to_string(),
            other => {
                let mut buf = [0u8; 4];
                other
                    .encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{b:02X}"))
                    .collect()
            }
        })
        .collect()
}
