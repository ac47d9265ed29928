// Adapted from https://dev.to/bdhobare/managing-application-config-in-rust-23ai
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5173";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: Url,
    pub bind_address: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to parse FCM_API_BASE_URL as a URL: {0}")]
    InvalidApiBaseUrl(#[from] url::ParseError),
}

pub trait ConfigProvider {
    fn get_config(&self) -> &Config;
}

pub struct EnvVarProvider(Config);

impl EnvVarProvider {
    pub fn new(args: HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_base_url = Url::parse(
            args.get("FCM_API_BASE_URL")
                .map(String::as_str)
                .unwrap_or(DEFAULT_API_BASE_URL),
        )?;

        let config = Config {
            api_base_url,
            bind_address: args
                .get("BIND_ADDRESS")
                .cloned()
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        };

        Ok(EnvVarProvider(config))
    }
}

impl ConfigProvider for EnvVarProvider {
    fn get_config(&self) -> &Config {
        &self.0
    }
}
