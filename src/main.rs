mod cli;
mod commands;
mod config;
mod discord;
mod health;
mod reply;
#[cfg(test)]
mod test_helpers;
mod weather;

use anyhow::Result;
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::{CommandHandler, CommandRegistry};
use config::Config;
use weather::{WeatherClient, WeatherProvider};

/// The main entry point for the application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default subscriber");

    match &cli.command {
        Some(Commands::Start { health_port }) => {
            start_bot(cli.prefix.clone(), *health_port).await?;
        }
        Some(Commands::GenEnv { path }) => {
            generate_env_file(path)?;
        }
        None => {
            // Default to start command if no subcommand is specified
            start_bot(cli.prefix.clone(), None).await?;
        }
    }

    Ok(())
}

/// Start the bot with the given configuration
async fn start_bot(prefix: String, health_port_override: Option<u16>) -> Result<()> {
    // Load configuration
    info!("Loading configuration");
    let mut config = Config::from_env()?;

    if let Some(port) = health_port_override {
        config.health_port = port;
    }

    info!("Starting Hava Bot");

    // Health endpoint runs independently of the gateway
    health::spawn(config.health_port).await;

    let weather_client = WeatherClient::from_config(&config)?;
    if !weather_client.is_configured() {
        info!("WEATHER_API_KEY not set, weather commands will report the service as unavailable");
    }

    let registry = CommandRegistry::standard(&config, Arc::new(weather_client));
    let command_handler = Arc::new(CommandHandler::new(Arc::new(registry), prefix.clone()));

    info!("Registered commands with prefix: '{}'", prefix);

    discord::run(&config, command_handler).await
}

/// Generate a sample .env file
fn generate_env_file(path: &str) -> Result<()> {
    info!("Generating sample .env file at {}", path);

    let contents = r#"# Discord bot token (Discord Developer Portal > Applications > Bot)
DISCORD_BOT_TOKEN=your_bot_token_here
# OpenWeatherMap API key (https://openweathermap.org/api)
WEATHER_API_KEY=your_weather_api_key_here
# Optional: enable !ping, !sunucu and !hava durumu <city>
# Also enable the Message Content intent in the Developer Portal
# ENABLE_PREFIX_COMMANDS=true
# Optional: report gateway latency in /ping (default true)
# PING_REPORTS_LATENCY=true
# Optional: weather API settings
# WEATHER_API_URL=https://api.openweathermap.org
# WEATHER_LANG=tr
# WEATHER_TIMEOUT_SECS=10
# Optional: health check port for uptime monitors
# HEALTH_PORT=5000
"#;

    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;

    info!("Sample .env file generated successfully!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_generated_env_file_is_loadable() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(".env.example");
        generate_env_file(path.to_str().unwrap())?;

        let contents = std::fs::read_to_string(&path)?;
        let vars: HashMap<String, String> = contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let config = Config::from_lookup(|key| vars.get(key).cloned())?;
        assert_eq!(config.discord_token, "your_bot_token_here");
        assert_eq!(config.weather_api_key.as_deref(), Some("your_weather_api_key_here"));
        assert!(!config.enable_prefix_commands);
        Ok(())
    }
}
