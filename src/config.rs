//! Environment configuration
//!
//! Values come from the process environment (optionally seeded from `.env`
//! by the binaries). Unset variables fall back to defaults; malformed ones
//! are reported.

use crate::assistant::DEFAULT_REPLY_DELAY;
use crate::error::TrackerError;
use crate::Result;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MARKET_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub port: u16,
    pub market_api_base_url: String,
    /// How often the ticker refreshes
    pub market_poll_interval: Duration,
    pub market_timeout: Duration,
    /// Simulated assistant thinking time
    pub assistant_delay: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            market_api_base_url: DEFAULT_MARKET_API_BASE_URL.to_string(),
            market_poll_interval: Duration::from_secs(60),
            market_timeout: Duration::from_secs(10),
            assistant_delay: DEFAULT_REPLY_DELAY,
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(value) => parse_number::<u16>("PORT", &value)?,
            None => defaults.port,
        };

        let market_api_base_url = lookup("MARKET_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.market_api_base_url);

        let market_poll_interval = match lookup("MARKET_POLL_SECS") {
            Some(value) => {
                let secs = parse_number::<u64>("MARKET_POLL_SECS", &value)?;
                if secs == 0 {
                    return Err(TrackerError::Config(
                        "MARKET_POLL_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.market_poll_interval,
        };

        let market_timeout = match lookup("MARKET_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number::<u64>("MARKET_TIMEOUT_SECS", &value)?),
            None => defaults.market_timeout,
        };

        let assistant_delay = match lookup("ASSISTANT_DELAY_MS") {
            Some(value) => Duration::from_millis(parse_number::<u64>("ASSISTANT_DELAY_MS", &value)?),
            None => defaults.assistant_delay,
        };

        Ok(Self {
            port,
            market_api_base_url,
            market_poll_interval,
            market_timeout,
            assistant_delay,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| TrackerError::Config(format!("{} must be a number, got '{}'", key, value)))
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.assistant_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            ("API_PORT", "9000"),
            ("MARKET_POLL_SECS", "30"),
            ("ASSISTANT_DELAY_MS", "0"),
            ("MARKET_API_BASE_URL", "http://localhost:4000"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.market_poll_interval, Duration::from_secs(30));
        assert!(config.assistant_delay.is_zero());
        assert_eq!(config.market_api_base_url, "http://localhost:4000");
    }

    #[test]
    fn test_port_takes_precedence() {
        let config =
            TrackerConfig::from_lookup(lookup_from(&[("PORT", "7000"), ("API_PORT", "9000")])).unwrap();
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn test_malformed_values() {
        let err = TrackerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(TrackerConfig::from_lookup(lookup_from(&[("MARKET_POLL_SECS", "0")])).is_err());
    }
}
