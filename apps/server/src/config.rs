//! Layered configuration for the server binary
//!
//! Values are resolved in order: built-in defaults, then an optional TOML
//! file, then `MEDREC__*` environment variables (e.g. `MEDREC__SERVER__PORT`).

use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub bmi: BmiConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body size in bytes (uploads included).
    pub max_request_body_size: usize,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_request_body_size: 10 * 1024 * 1024,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Storage backend: "postgres" or "memory".
    pub backend: String,
    pub url: String,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: "postgres".to_string(),
            url: "postgres://localhost:5432/patientdb".to_string(),
            pool_min_size: 1,
            pool_max_size: 8,
            pool_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for issued tokens.
    pub secret_key: String,
    pub token_expiry_minutes: i64,
    /// Placeholder credential record; swap `CredentialStore` for a real IdP.
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: "your-secret-key".to_string(),
            token_expiry_minutes: 30,
            username: "testuser".to_string(),
            password: "testpassword".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of "daily", "hourly", "minutely", "never".
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "medrec-server".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BmiConfig {
    pub url: String,
    pub api_host: String,
    /// RapidAPI key; typically supplied via `MEDREC__BMI__API_KEY`.
    pub api_key: String,
    pub timeout_seconds: u64,
}

impl Default for BmiConfig {
    fn default() -> Self {
        Self {
            url: "https://body-mass-index-bmi-calculator.p.rapidapi.com/metric".to_string(),
            api_host: "body-mass-index-bmi-calculator.p.rapidapi.com".to_string(),
            api_key: String::new(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Path to the pretrained ONNX artifact. The endpoint reports an error
    /// when the file is absent; the rest of the service is unaffected.
    pub model_path: String,
    /// Square input resolution the model expects.
    pub image_size: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: "models/brain_tumor.onnx".to_string(),
            image_size: 64,
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional file, and the environment.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        // Pick up a local .env if present; ignore absence.
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("MEDREC")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        match self.database.backend.as_str() {
            "postgres" => {
                if self.database.url.is_empty() {
                    return Err("database.url must be set for the postgres backend".to_string());
                }
            }
            "memory" => {}
            other => {
                return Err(format!(
                    "database.backend must be 'postgres' or 'memory', got '{other}'"
                ));
            }
        }
        if self.auth.secret_key.is_empty() {
            return Err("auth.secret_key must not be empty".to_string());
        }
        if self.auth.token_expiry_minutes <= 0 {
            return Err("auth.token_expiry_minutes must be positive".to_string());
        }
        if self.classifier.image_size == 0 {
            return Err("classifier.image_size must be non-zero".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow::anyhow!("'{addr}' did not resolve to a socket address"))
    }
}
