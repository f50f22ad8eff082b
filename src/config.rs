use anyhow::{Context, Result, anyhow};
use dotenv::dotenv;
use std::env;

const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org";
const DEFAULT_WEATHER_LANG: &str = "tr";
const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HEALTH_PORT: u16 = 5000;

/// Configuration for the Discord bot
#[derive(Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// OpenWeatherMap API key; weather commands are unavailable without it
    pub weather_api_key: Option<String>,
    /// Base URL of the weather API
    pub weather_api_url: String,
    /// Language for weather descriptions
    pub weather_lang: String,
    /// Timeout for weather API requests, in seconds
    pub weather_timeout_secs: u64,
    /// Whether prefixed text commands are enabled (needs the Message Content intent)
    pub enable_prefix_commands: bool,
    /// Whether `/ping` reports gateway latency
    pub ping_reports_latency: bool,
    /// Port for the health check server
    pub health_port: u16,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Returns
    /// A Result containing the Config if successful, or an error if required variables are missing
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, or None if unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("DISCORD_BOT_TOKEN environment variable not set"))?;

        let weather_api_key = lookup("WEATHER_API_KEY").filter(|key| !key.trim().is_empty());

        let weather_api_url =
            lookup("WEATHER_API_URL").unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string());

        let weather_lang =
            lookup("WEATHER_LANG").unwrap_or_else(|| DEFAULT_WEATHER_LANG.to_string());

        let weather_timeout_secs = match lookup("WEATHER_TIMEOUT_SECS") {
            Some(value) => value
                .parse()
                .with_context(|| format!("WEATHER_TIMEOUT_SECS is not a number: {}", value))?,
            None => DEFAULT_WEATHER_TIMEOUT_SECS,
        };

        let health_port = match lookup("HEALTH_PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("HEALTH_PORT is not a valid port: {}", value))?,
            None => DEFAULT_HEALTH_PORT,
        };

        let enable_prefix_commands = parse_flag(lookup("ENABLE_PREFIX_COMMANDS"), false);
        let ping_reports_latency = parse_flag(lookup("PING_REPORTS_LATENCY"), true);

        Ok(Config {
            discord_token,
            weather_api_key,
            weather_api_url,
            weather_lang,
            weather_timeout_secs,
            enable_prefix_commands,
            ping_reports_latency,
            health_port,
        })
    }

    /// Create a new config directly from values (useful for testing)
    #[allow(dead_code)]
    pub fn new(
        discord_token: String,
        weather_api_key: Option<String>,
        weather_api_url: String,
    ) -> Self {
        Config {
            discord_token,
            weather_api_key,
            weather_api_url,
            weather_lang: DEFAULT_WEATHER_LANG.to_string(),
            weather_timeout_secs: DEFAULT_WEATHER_TIMEOUT_SECS,
            enable_prefix_commands: true,
            ping_reports_latency: true,
            health_port: DEFAULT_HEALTH_PORT,
        }
    }
}

/// Only a case-insensitive "true" switches a flag on
fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value {
        Some(value) => value.trim().eq_ignore_ascii_case("true"),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&[("DISCORD_BOT_TOKEN", "token")]))?;

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.weather_api_key, None);
        assert_eq!(config.weather_api_url, "https://api.openweathermap.org");
        assert_eq!(config.weather_lang, "tr");
        assert_eq!(config.weather_timeout_secs, 10);
        assert!(!config.enable_prefix_commands);
        assert!(config.ping_reports_latency);
        assert_eq!(config.health_port, 5000);
        Ok(())
    }

    #[test]
    fn test_config_overrides() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("WEATHER_API_KEY", "key"),
            ("WEATHER_API_URL", "http://localhost:8080"),
            ("WEATHER_LANG", "en"),
            ("WEATHER_TIMEOUT_SECS", "3"),
            ("ENABLE_PREFIX_COMMANDS", "TRUE"),
            ("PING_REPORTS_LATENCY", "false"),
            ("HEALTH_PORT", "8081"),
        ]))?;

        assert_eq!(config.weather_api_key.as_deref(), Some("key"));
        assert_eq!(config.weather_api_url, "http://localhost:8080");
        assert_eq!(config.weather_lang, "en");
        assert_eq!(config.weather_timeout_secs, 3);
        assert!(config.enable_prefix_commands);
        assert!(!config.ping_reports_latency);
        assert_eq!(config.health_port, 8081);
        Ok(())
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let result = Config::from_lookup(lookup_from(&[("WEATHER_API_KEY", "key")]));
        assert!(result.is_err());

        let result = Config::from_lookup(lookup_from(&[("DISCORD_BOT_TOKEN", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_weather_key_counts_as_missing() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("WEATHER_API_KEY", ""),
        ]))?;
        assert_eq!(config.weather_api_key, None);
        Ok(())
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("HEALTH_PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("true".to_string()), false));
        assert!(parse_flag(Some(" True ".to_string()), false));
        assert!(!parse_flag(Some("yes".to_string()), true));
        assert!(parse_flag(None, true));
        assert!(!parse_flag(None, false));
    }
}
