use crate::error::AppError;
use config::{Config as Cfg, Environment, File, Map};
use serde::{de::DeserializeOwned, Deserialize};

/// Settings every service shares.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_port() -> u16 {
    3000
}

fn default_environment() -> String {
    "dev".to_string()
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.environment == "prod"
    }
}

/// Reads `.env`, the optional `configuration` file and the process
/// environment into `T`. Environment keys are unprefixed and lowercased,
/// so `MONGO_URI` fills a `mongo_uri` field.
pub fn load_env<T: DeserializeOwned>() -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(Environment::default())
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Like [`load_env`], but reads only the given variables.
pub fn from_vars<T, I, K, V>(vars: I) -> Result<T, AppError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Map<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let config = Cfg::builder()
        .add_source(Environment::default().source(Some(vars)))
        .build()?;

    Ok(config.try_deserialize()?)
}
