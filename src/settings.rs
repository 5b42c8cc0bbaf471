use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Base of the mutation endpoints (add, delete, image upload).
    pub api_base_url: Url,
    /// Live events list. Tried first on every load.
    pub events_url: Url,
    /// Static copy of the events list, served with the site assets.
    pub fallback_events_url: Url,
    pub past_events_url: Url,
    pub fallback_past_events_url: Option<Url>,
    pub request_timeout_secs: u64,
    pub debug: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix
            .add_source(Environment::with_prefix("APP").separator("_"))
            .set_default("api_base_url", "http://localhost:5000")?
            .set_default("events_url", "http://localhost:5000/events")?
            .set_default("fallback_events_url", "http://localhost:5173/events.json")?
            .set_default("past_events_url", "http://localhost:5173/past_event.json")?
            .set_default("fallback_past_events_url", None::<String>)?
            .set_default("request_timeout_secs", 10)?
            .set_default("debug", false)?
            .build()?;

        config.try_deserialize()
    }
}
