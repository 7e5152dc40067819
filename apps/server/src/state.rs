//! Shared application state

use crate::{
    auth::{AuthService, StaticCredentials, TokenService},
    config::Config,
    db::{MemoryPatientStore, PatientStore, PgPatientStore},
    services::{BmiClient, ImageClassifier},
};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::{path::Path, sync::Arc, time::Duration};

/// Cloned into every request handler. Holds no per-request state: the store
/// and credential table are the only cross-request collaborators.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn PatientStore>,
    pub auth: AuthService,
    pub bmi: BmiClient,
    pub classifier: Option<Arc<ImageClassifier>>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let store = build_store(&config).await?;

        let auth = AuthService::new(
            Arc::new(StaticCredentials::from_config(&config.auth)),
            TokenService::new(
                config.auth.secret_key.clone(),
                config.auth.token_expiry_minutes,
            ),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.bmi.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;
        let bmi = BmiClient::new(http, config.bmi.clone());

        let classifier = load_classifier(&config);

        Ok(Self {
            config,
            store,
            auth,
            bmi,
            classifier,
        })
    }
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn PatientStore>> {
    match config.database.backend.as_str() {
        "postgres" => {
            let pool = PgPoolOptions::new()
                .min_connections(config.database.pool_min_size)
                .max_connections(config.database.pool_max_size)
                .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
                .connect(&config.database.url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            Ok(Arc::new(PgPatientStore::new(pool)))
        }
        "memory" => {
            tracing::warn!("Using in-memory patient store; records do not survive restarts");
            Ok(Arc::new(MemoryPatientStore::new()))
        }
        other => anyhow::bail!("Unknown database backend '{other}'"),
    }
}

/// The classifier is optional plumbing: when the artifact is absent the
/// endpoint reports an error but the rest of the service runs normally.
fn load_classifier(config: &Config) -> Option<Arc<ImageClassifier>> {
    let path = Path::new(&config.classifier.model_path);
    if !path.exists() {
        tracing::warn!(
            model = %path.display(),
            "Classifier model not found; /process_image will be unavailable"
        );
        return None;
    }

    match ImageClassifier::load(path, config.classifier.image_size) {
        Ok(classifier) => Some(Arc::new(classifier)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load classifier model");
            None
        }
    }
}
