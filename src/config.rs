use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty());

        let max_attempts = parse_or(&lookup, "ANALYSIS_MAX_ATTEMPTS", 3u32)?;
        let initial_delay_ms = parse_or(&lookup, "ANALYSIS_INITIAL_DELAY_MS", 2000u64)?;
        let timeout_secs = parse_or(&lookup, "ANALYSIS_TIMEOUT_SECS", 60u64)?;

        Ok(Config {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_attempts,
            initial_delay: Duration::from_millis(initial_delay_ms),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The API key, or an error explaining how to provide one
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!("GEMINI_API_KEY is not set (add it to .env or the environment)")
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {name}: '{raw}'")),
        None => Ok(default),
    }
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    Config::from_lookup(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(2000));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_api_key_fallback_and_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_KEY", "legacy-key"),
            ("GEMINI_MODEL", "gemini-test"),
            ("ANALYSIS_MAX_ATTEMPTS", "5"),
            ("ANALYSIS_INITIAL_DELAY_MS", " 250 "),
        ]))
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "legacy-key");
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.initial_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_primary_key_wins_and_blank_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "primary"),
            ("API_KEY", "legacy"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let blank = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert_eq!(blank.api_key, None);
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("ANALYSIS_MAX_ATTEMPTS", "three")]))
            .unwrap_err();
        assert!(err.to_string().contains("ANALYSIS_MAX_ATTEMPTS"));
    }
}
