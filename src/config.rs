use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.ebay-kleinanzeigen.de";
pub const DEFAULT_USER_AGENT: &str = "telegram-alert-bot/1.0";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Site endpoints and request identity shared by both scrapers
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Site origin without trailing slash
    pub base_url: String,
    pub user_agent: String,
    /// Timeout of the place lookup request
    pub lookup_timeout: Duration,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl ScoutConfig {
    /// Defaults overridden by `SCOUT_*` variables (a `.env` file is loaded if present)
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let mut config = Self::default();

        if let Ok(base_url) = env::var("SCOUT_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(user_agent) = env::var("SCOUT_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Ok(secs) = env::var("SCOUT_LOOKUP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid SCOUT_LOOKUP_TIMEOUT_SECS: {secs}"))?;
            config.lookup_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn listing_url(&self, page: u32, url_term: &str, city_code: u32, radius: u32) -> String {
        format!(
            "{}/seite:{}/s-{}/k0l{}r{}",
            self.base_url, page, url_term, city_code, radius
        )
    }

    pub fn location_lookup_url(&self) -> String {
        format!("{}/s-ort-empfehlungen.json", self.base_url)
    }
}
