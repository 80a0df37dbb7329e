//! Builds the `AppConfig` from the process environment with `figment`.
//! Gets called once at startup, every error returned from here is fatal and the server never binds a socket.

mod error;
mod types;

use figment::{providers::Env, Figment};
use serde::Deserialize;
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{ApiKey, AppConfig, ListConfig, NetConfig, DEFAULT_PORT, DEFAULT_TIMEOUT_MILLIS};

pub const ENV_API_KEY: &str = "MAILCHIMP_API_KEY";
pub const ENV_LIST_ID: &str = "MAILCHIMP_AUDIENCE_ID";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BASE_URL: &str = "MAILCHIMP_API_BASE_URL";

/// Values `figment` deserializes for us. `Env` lowercases the keys.
#[derive(Debug, Default, Deserialize)]
struct EnvVars {
    port: Option<u16>,
}

impl AppConfig {
    /// Reads `MAILCHIMP_API_KEY`, `MAILCHIMP_AUDIENCE_ID`, `PORT` and `MAILCHIMP_API_BASE_URL`.
    ///
    /// The identifiers are read as raw text: `Env` would turn `0123456789` into the number `123456789`.
    pub fn from_env() -> ConfigResult<Self> {
        info!("{:<12} - Initializing the configuration", "from_env");

        let api_key = non_empty(Env::var(ENV_API_KEY)).ok_or(ConfigError::MissingEnv(ENV_API_KEY))?;
        let list_id = non_empty(Env::var(ENV_LIST_ID)).ok_or(ConfigError::MissingEnv(ENV_LIST_ID))?;

        let mut list_config = ListConfig::new(ApiKey::parse(api_key)?, list_id);
        list_config.base_url = non_empty(Env::var(ENV_BASE_URL));

        let vars: EnvVars = Figment::from(Env::raw().only(&[ENV_PORT])).extract()?;

        // Surface an unusable base url now rather than on the first request.
        let base_url = list_config.base_url()?;
        info!("{:<12} - Using server: {}", "from_env", list_config.api_key.region());
        info!("{:<12} - Provider base url: {base_url}", "from_env");

        let net_config = NetConfig {
            app_port: vars.port.unwrap_or(DEFAULT_PORT),
            ..NetConfig::default()
        };

        Ok(AppConfig {
            net_config,
            list_config,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
