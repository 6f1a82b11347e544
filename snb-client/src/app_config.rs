use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub backend: BackendConfig,
    pub payment: PaymentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the club backend, without a trailing slash,
    /// e.g. `https://api.snb.club/api`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    /// Name shown on the payment sheet.
    pub merchant_display_name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "CHF".to_string()
}

impl ClientConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment, e.g. SNB__BACKEND__BASE_URL
            .add_source(config::Environment::with_prefix("SNB").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Config pointed at an arbitrary backend, defaults elsewhere.
    /// Used by tests against a local mock server.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig {
                base_url: base_url.into(),
                request_timeout_secs: default_timeout_secs(),
            },
            payment: PaymentConfig {
                merchant_display_name: "SnB Club".to_string(),
                currency: default_currency(),
            },
        }
    }
}
