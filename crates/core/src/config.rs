//! Process configuration, read once at startup.
//!
//! Values come from the environment (optionally seeded from a `.env` file).
//! The resulting [`Config`] is passed explicitly to the AI client and store
//! constructors; nothing reads the environment after startup.

use std::time::Duration;

/// Default Gemini model.
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini API base URL.
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGODB_DATABASE: &str = "quizgen";
pub const DEFAULT_MONGODB_COLLECTION: &str = "questions";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the AI client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Provider credential. `None` leaves generation unavailable.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Whole-request timeout. `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
}

/// Settings for the document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ai: AiConfig,
    pub store: StoreConfig,
    pub port: u16,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match get("AI_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_number("AI_TIMEOUT_SECS", &raw)?)),
            None => None,
        };
        let port = match get("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            ai: AiConfig {
                api_key: get("API_KEY"),
                model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
                base_url: get("AI_BASE_URL").unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string()),
                timeout,
            },
            store: StoreConfig {
                uri: get("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
                database: get("MONGODB_DATABASE")
                    .unwrap_or_else(|| DEFAULT_MONGODB_DATABASE.to_string()),
                collection: get("MONGODB_COLLECTION")
                    .unwrap_or_else(|| DEFAULT_MONGODB_COLLECTION.to_string()),
            },
            port,
        })
    }
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.ai.model, DEFAULT_AI_MODEL);
        assert_eq!(config.ai.base_url, DEFAULT_AI_BASE_URL);
        assert!(config.ai.timeout.is_none());
        assert_eq!(config.store.uri, DEFAULT_MONGODB_URI);
        assert_eq!(config.store.database, DEFAULT_MONGODB_DATABASE);
        assert_eq!(config.store.collection, DEFAULT_MONGODB_COLLECTION);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn reads_all_values() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("AI_MODEL", "gemini-2.0-flash"),
            ("AI_TIMEOUT_SECS", "30"),
            ("MONGODB_URI", "mongodb://db:27017"),
            ("PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("secret"));
        assert_eq!(config.ai.model, "gemini-2.0-flash");
        assert_eq!(config.ai.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.store.uri, "mongodb://db:27017");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "  ")])).unwrap();
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
