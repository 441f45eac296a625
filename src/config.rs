//! Runtime configuration for the weather tips server
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use anyhow::{Context, Result};

use crate::constants::{USER_AGENT, WEATHER_API_CURRENT_URL};

pub const API_KEY_VAR: &str = "WEATHERAPI_KEY";
pub const BASE_URL_VAR: &str = "WEATHERAPI_BASE_URL";
pub const USER_AGENT_VAR: &str = "WEATHER_TIPS_USER_AGENT";

#[derive(Debug, Clone)]
pub struct Config {
    /// WeatherAPI credential, sent as the `key` query parameter
    pub api_key: String,

    /// Current-conditions endpoint
    pub base_url: String,

    pub user_agent: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: WEATHER_API_CURRENT_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Loads configuration from the environment.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .with_context(|| format!("{} must be set", API_KEY_VAR))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(user_agent) = lookup(USER_AGENT_VAR) {
            config.user_agent = user_agent;
        }
        Ok(config)
    }
}
