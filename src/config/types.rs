//! The configuration structs used to build the AppConfig, and their impls.
use std::time::Duration;

use reqwest::Url;
use secrecy::SecretString;

use crate::config::{ConfigError, ConfigResult};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 10_000;
const PROVIDER_HOST: &str = "api.mailchimp.com";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub list_config: ListConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Clone, Debug)]
pub struct ListConfig {
    pub api_key: ApiKey,
    pub list_id: String,
    /// Replaces the base url derived from the API key region when set.
    pub base_url: Option<String>,
    pub timeout_millis: u64,
}

/// A Mailchimp API key in the `<key>-<region>` format.
/// The region names the datacenter subdomain all API calls have to go through.
#[derive(Clone, Debug)]
pub struct ApiKey {
    secret: SecretString,
    region: String,
}

// ###################################
// ->   IMPLs
// ###################################
impl Default for NetConfig {
    fn default() -> Self {
        NetConfig {
            host: [0, 0, 0, 0],
            app_port: DEFAULT_PORT,
        }
    }
}

impl ListConfig {
    pub fn new(api_key: ApiKey, list_id: impl Into<String>) -> Self {
        ListConfig {
            api_key,
            list_id: list_id.into(),
            base_url: None,
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    /// `https://<region>.api.mailchimp.com` unless overridden by `base_url`.
    pub fn base_url(&self) -> ConfigResult<Url> {
        let url = match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.{PROVIDER_HOST}", self.api_key.region()),
        };

        Url::parse(&url).map_err(|er| ConfigError::BaseUrl {
            url,
            reason: er.to_string(),
        })
    }
}

impl ApiKey {
    pub fn parse(value: impl Into<String>) -> ConfigResult<Self> {
        let value = value.into();

        // Only the segment right after the first '-' is taken, whatever follows it.
        let region = value
            .split('-')
            .nth(1)
            .filter(|region| !region.is_empty())
            .ok_or(ConfigError::ApiKeyFormat)?
            .to_string();

        Ok(ApiKey {
            secret: SecretString::from(value),
            region,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }
}
