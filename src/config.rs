use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NourishConfig {
    /// Completion service settings
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Configuration for the completion service and its retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Endpoint that accepts `{"messages": [...]}` and answers `{"completion": "..."}`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of attempts before giving up
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Base delay between attempts in milliseconds (grows with each attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

// Default value functions
fn default_endpoint() -> String {
    "https://toolkit.rork.com/text/llm/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl NourishConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with NOURISH__ prefix
    /// 2. nourish.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: NOURISH__SERVICE__ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from `nourish.toml` (optional) and `NOURISH__*` variables
pub fn load_config() -> Result<NourishConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("nourish").required(false))
        // Use double underscore for nested: NOURISH__SERVICE__TIMEOUT
        .add_source(
            Environment::with_prefix("NOURISH")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        let service = ServiceConfig::default();
        assert_eq!(service.endpoint, "https://toolkit.rork.com/text/llm/");
        assert_eq!(service.timeout, 30);
        assert_eq!(service.retry_attempts, 3);
        assert_eq!(service.retry_delay_ms, 1000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: NourishConfig = Config::builder()
            .add_source(File::from_str(
                "[service]\nendpoint = \"http://localhost:9000/llm\"\nretry_attempts = 1\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.service.endpoint, "http://localhost:9000/llm");
        assert_eq!(config.service.retry_attempts, 1);
        assert_eq!(config.service.timeout, 30);
    }

    #[test]
    fn test_empty_sources_deserialize_to_defaults() {
        let config: NourishConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.service.retry_delay_ms, 1000);
    }
}
