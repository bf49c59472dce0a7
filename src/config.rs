use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        gemini_api_key: get_env_optional("GEMINI_API_KEY"),
        unsplash_access_key: get_env_optional("UNSPLASH_ACCESS_KEY"),
        port: get_env_or_default("PORT", "5000").parse().unwrap_or(5000),
    }
});

pub struct Config {
    pub gemini_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,
    pub port: u16,
}

impl Config {
    /// Warn at startup about credentials that put the service in degraded mode.
    pub fn warn_missing(&self) {
        if self.gemini_api_key.is_none() {
            log::warn!("GEMINI_API_KEY not set, summarization and generation run in fallback mode");
        }
        if self.unsplash_access_key.is_none() {
            log::warn!("UNSPLASH_ACCESS_KEY not set, photo search will return no results");
        }
    }
}

fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
