use config::{Config, ConfigError, Environment};
use once_cell::sync::Lazy;
use serde::Deserialize;

pub static CONFIG: Lazy<TriviaConfig> =
    Lazy::new(|| TriviaConfig::load().unwrap_or_else(|e| panic!("Failed to load config: {}", e)));

#[derive(Debug, Deserialize)]
pub struct TriviaConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub questions_per_difficulty: u8,
}

impl TriviaConfig {
    /// Defaults overlaid by `TRIVIA__`-prefixed environment variables,
    /// e.g. `TRIVIA__API__BASE_URL`.
    fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api.base_url", "https://the-trivia-api.com/v2")?
            .set_default("api.questions_per_difficulty", 2)?
            .add_source(Environment::with_prefix("TRIVIA").separator("__"))
            .build()?
            .try_deserialize()
    }
}
