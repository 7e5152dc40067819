//! Client for the third-party BMI calculation API
//!
//! Weight and height are forwarded verbatim as query parameters; the
//! upstream JSON body is returned unmodified. Any network-level or HTTP
//! failure surfaces as a generic upstream error with the cause wrapped in.

use crate::{config::BmiConfig, Error, Result};

#[derive(Clone)]
pub struct BmiClient {
    http: reqwest::Client,
    config: BmiConfig,
}

impl BmiClient {
    pub fn new(http: reqwest::Client, config: BmiConfig) -> Self {
        Self { http, config }
    }

    pub async fn calculate(&self, weight: &str, height: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(&self.config.url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.api_host)
            .query(&[("weight", weight), ("height", height)])
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Upstream(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))
    }
}
