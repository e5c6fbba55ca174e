use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub const DEFAULT_FEED_BASE_URL: &str = "https://api.flickr.com/services/";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_LOG_FILTER: &str = "info";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::load(|key| env::var(key).ok())
});

pub struct Config {
    pub feed_base_url: String,
    pub debounce_ms: u64,
    pub log_filter: String,
    /// Values that were rejected and replaced by defaults. Loading happens
    /// before logging is set up, so callers report these themselves.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn load(get: impl Fn(&str) -> Option<String>) -> Config {
        let mut warnings = Vec::new();
        let debounce_ms = match get("SEARCH_DEBOUNCE_MS") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                warnings.push(format!(
                    "invalid SEARCH_DEBOUNCE_MS {raw:?}, using {DEFAULT_DEBOUNCE_MS}ms"
                ));
                DEFAULT_DEBOUNCE_MS
            }),
            None => DEFAULT_DEBOUNCE_MS,
        };

        Config {
            feed_base_url: get("FEED_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FEED_BASE_URL.to_string()),
            debounce_ms,
            log_filter: get("FEEDSEARCH_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            warnings,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::load(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]);
        assert_eq!(config.feed_base_url, DEFAULT_FEED_BASE_URL);
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.log_filter, "info");
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_parse_debounce() {
        assert_eq!(load(&[("SEARCH_DEBOUNCE_MS", "250")]).debounce_ms, 250);
        assert_eq!(load(&[("SEARCH_DEBOUNCE_MS", " 750 ")]).debounce_ms, 750);
    }

    #[test]
    fn test_invalid_debounce_is_reported() {
        for raw in ["soon", "-1"] {
            let config = load(&[("SEARCH_DEBOUNCE_MS", raw)]);
            assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
            assert_eq!(config.warnings.len(), 1);
            assert!(config.warnings[0].contains("SEARCH_DEBOUNCE_MS"));
        }
    }
}
