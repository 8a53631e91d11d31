//! Application configuration, generated per environment.
//!
//! [`create_app_config`] produces the defaults for an [`Env`]; a TOML
//! document can select the environment and override individual fields.
//!
//! ```toml
//! env = "prod"
//! api_url = "https://api.internal.example.com"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable consulted by [`Env::from_env`].
pub const APP_ENV_VAR: &str = "APP_ENV";

pub const DEFAULT_APP_NAME: &str = "keyed-store-app";
pub const DEV_API_URL: &str = "http://localhost:8080/api";
pub const PROD_API_URL: &str = "https://api.example.com";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown environment {0:?} (expected \"dev\" or \"prod\")")]
    UnknownEnv(String),

    #[error("cannot read APP_ENV: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Env {
    #[default]
    Dev,
    Prod,
}

impl Env {
    pub fn as_str(&self) -> &'static str {
        match self {
            Env::Dev => "dev",
            Env::Prod => "prod",
        }
    }

    /// Read the environment from `APP_ENV`, defaulting to [`Env::Dev`] when
    /// the variable is unset.
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var(APP_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(std::env::VarError::NotPresent) => Ok(Env::default()),
            Err(err) => Err(err.into()),
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Env {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Env::Dev),
            "prod" | "production" => Ok(Env::Prod),
            _ => Err(ConfigError::UnknownEnv(s.to_string())),
        }
    }
}

impl TryFrom<String> for Env {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub version: String,
    pub debug: bool,
    pub api_url: String,
    pub env: Env,
}

/// Build the default configuration for `env`.
///
/// `dev` turns debugging on and points at a local API; `prod` turns it off
/// and points at the public API.
pub fn create_app_config(env: Env) -> AppConfig {
    let (debug, api_url) = match env {
        Env::Dev => (true, DEV_API_URL),
        Env::Prod => (false, PROD_API_URL),
    };

    AppConfig {
        app_name: DEFAULT_APP_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        debug,
        api_url: api_url.to_string(),
        env,
    }
}

/// On-disk shape: `env` is required, everything else overrides a default.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    env: Env,
    app_name: Option<String>,
    version: Option<String>,
    debug: Option<bool>,
    api_url: Option<String>,
}

impl AppConfig {
    /// Defaults for the environment named by `APP_ENV`.
    pub fn from_env() -> ConfigResult<Self> {
        Ok(create_app_config(Env::from_env()?))
    }

    /// Parse a TOML document and apply its overrides to the defaults of the
    /// environment it names.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(source)?;
        let mut config = create_app_config(file.env);

        if let Some(app_name) = file.app_name {
            config.app_name = app_name;
        }
        if let Some(version) = file.version {
            config.version = version;
        }
        if let Some(debug) = file.debug {
            config.debug = debug;
        }
        if let Some(api_url) = file.api_url {
            config.api_url = api_url;
        }

        debug!(env = %config.env, debug = config.debug, "config loaded");
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.env == Env::Prod
    }
}
