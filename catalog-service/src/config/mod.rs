use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    /// Falls back to the database named in `uri` when unset.
    pub database: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

/// Environment keys read by the service, e.g. `PORT`, `MONGO_URI`.
#[derive(Debug, Deserialize)]
struct CatalogEnv {
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    mongo_uri: Option<String>,
    #[serde(default)]
    mongo_database: Option<String>,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    otlp_endpoint: Option<String>,
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_env(core_config::load_env()?)
    }

    /// Builds the configuration from explicit variables instead of the
    /// process environment.
    pub fn from_vars<'a>(
        vars: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, AppError> {
        Self::from_env(core_config::from_vars(vars)?)
    }

    fn from_env(env: CatalogEnv) -> Result<Self, AppError> {
        // Shared defaults come from service-core
        let mut common: core_config::Config =
            core_config::from_vars(Vec::<(String, String)>::new())?;
        if let Some(port) = env.port {
            common.port = port;
        }
        if let Some(environment) = non_empty(env.environment) {
            common.environment = environment;
        }

        let uri = match non_empty(env.mongo_uri) {
            Some(uri) => uri,
            None if common.is_production() => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "MONGO_URI is required in production but not set"
                )))
            }
            None => DEFAULT_MONGO_URI.to_string(),
        };

        Ok(CatalogConfig {
            common,
            mongodb: MongoConfig {
                uri,
                database: non_empty(env.mongo_database),
            },
            observability: ObservabilityConfig {
                log_level: non_empty(env.log_level).unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: non_empty(env.otlp_endpoint),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
