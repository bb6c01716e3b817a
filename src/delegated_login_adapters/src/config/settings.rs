use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, Source, builder::DefaultState};
use delegated_login_core::{Endpoint, EndpointError};
use serde::Deserialize;

use crate::config::constants::{env, prod};

/// Settings for the delegated login resolver.
///
/// The compiled-in constants are the defaults; deployments may override them
/// through `DELEGATED_LOGIN__*` environment variables (or a `.env` file),
/// e.g. `DELEGATED_LOGIN__BACKEND__URL`.
#[derive(Debug, Clone, Deserialize)]
pub struct DelegatedLoginSetting {
    pub backend: BackendSetting,
    pub homeserver: HomeserverSetting,
    pub http_client: HttpClientSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSetting {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HomeserverSetting {
    pub default_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpClientSetting {
    pub timeout_in_millis: u64,
}

impl DelegatedLoginSetting {
    /// Load defaults, then `.env`, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::with_defaults()?
            .add_source(
                Environment::with_prefix(env::SETTINGS_ENV_PREFIX)
                    .separator(env::SETTINGS_ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load defaults overridden by a single extra source. The environment is not consulted.
    pub fn load_with<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Self::with_defaults()?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("backend.url", prod::BACKEND_URL)?
            .set_default("homeserver.default_url", prod::DEFAULT_HOMESERVER_URL)?
            .set_default(
                "http_client.timeout_in_millis",
                prod::http_client::TIMEOUT_IN_MILLIS,
            )
    }
}

impl HomeserverSetting {
    pub fn default_endpoint(&self) -> Result<Endpoint, EndpointError> {
        Endpoint::parse(&self.default_url)
    }
}

impl HttpClientSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}
