//! Configuration model loaded from external sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
/// Settings of the REST client.
pub struct ClientConfig {
    /// Base URL every resource path is appended to.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Ceiling for a single request, connection included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Where the bearer token is kept between runs; in-memory when unset.
    #[serde(default)]
    pub session_file: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Layers `config/default`, `config/{app_env}` (both optional) and `APP_*`
    /// environment variables.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: ClientConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn yaml_overrides_defaults() {
        let config: ClientConfig = Config::builder()
            .add_source(File::from_str(
                "api_url: https://crm.example.com/api\ntimeout_secs: 5\nsession_file: /tmp/crm-session\n",
                FileFormat::Yaml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api_url, "https://crm.example.com/api");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.session_file.as_deref(), Some("/tmp/crm-session"));
    }
}
