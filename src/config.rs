//! Client configuration
//!
//! Loaded once at startup from environment variables (after `dotenvy`
//! has populated them from a `.env` file, if any).

use std::time::Duration;

pub const DEFAULT_NOTES_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_POKEAPI_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoints and transport settings shared by both HTTP clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub notes_url: String,
    pub pokeapi_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Read `NOTEDEX_NOTES_URL`, `NOTEDEX_POKEAPI_URL` and
    /// `NOTEDEX_HTTP_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_secs = lookup("NOTEDEX_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            notes_url: env_url(&lookup, "NOTEDEX_NOTES_URL", DEFAULT_NOTES_URL),
            pokeapi_url: env_url(&lookup, "NOTEDEX_POKEAPI_URL", DEFAULT_POKEAPI_URL),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_notes_url(mut self, url: impl Into<String>) -> Self {
        self.notes_url = url.into();
        self
    }

    pub fn with_pokeapi_url(mut self, url: impl Into<String>) -> Self {
        self.pokeapi_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            notes_url: DEFAULT_NOTES_URL.to_string(),
            pokeapi_url: DEFAULT_POKEAPI_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn env_url(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("NOTEDEX_NOTES_URL", "http://notes.internal/api/v1/"),
            ("NOTEDEX_POKEAPI_URL", " http://127.0.0.1:9000 "),
            ("NOTEDEX_HTTP_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.notes_url, "http://notes.internal/api/v1");
        assert_eq!(config.pokeapi_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[("NOTEDEX_HTTP_TIMEOUT_SECS", "0")]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let config =
            ClientConfig::from_lookup(lookup_from(&[("NOTEDEX_HTTP_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
