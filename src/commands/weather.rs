use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::commands::{Command, CommandError, CommandRequest, InvocationStyle, Validation};
use crate::reply::Reply;
use crate::weather::{WeatherOutcome, WeatherProvider, WeatherQuery, format_reading};

/// Keyword required between `hava` and the place name in legacy syntax
const LEGACY_KEYWORD: &str = "durumu";

/// Looks up the current weather for a place
pub struct WeatherCommand {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherCommand {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        WeatherCommand { provider }
    }

    /// Pull the place name out of the request arguments
    ///
    /// Legacy: `durumu <place words...>`. Structured: the `sehir` option value.
    fn parse_query(request: &CommandRequest) -> Result<WeatherQuery, CommandError> {
        match request.invocation_style {
            InvocationStyle::Legacy => {
                let usage = CommandError::ValidationFailed(Validation::WeatherUsage);
                match request.raw_arguments.split_first() {
                    Some((keyword, place)) if keyword == LEGACY_KEYWORD => {
                        WeatherQuery::new(&place.join(" ")).ok_or(usage)
                    }
                    _ => Err(usage),
                }
            }
            InvocationStyle::Structured => request
                .raw_arguments
                .first()
                .and_then(|place| WeatherQuery::new(place))
                .ok_or(CommandError::ValidationFailed(Validation::MissingParameter)),
        }
    }
}

#[async_trait]
impl Command for WeatherCommand {
    async fn execute(&self, request: &CommandRequest) -> Result<Reply, CommandError> {
        let query = Self::parse_query(request)?;

        // Answer right away when there is nothing to wait for
        if !self.provider.is_configured() {
            return Err(CommandError::ConfigMissing);
        }

        if let Err(e) = request.acknowledge().await {
            warn!("Failed to defer weather reply: {}", e);
        }

        info!("Looking up weather for {}", query.place_name());
        match self.provider.fetch(&query).await {
            WeatherOutcome::Success(reading) => Ok(Reply::Rich(format_reading(&reading))),
            WeatherOutcome::NotFound(place) => Err(CommandError::NotFound(place)),
            WeatherOutcome::ProviderError(failure) => Err(CommandError::ProviderError(failure)),
            WeatherOutcome::NetworkError => Err(CommandError::NetworkError),
            WeatherOutcome::ConfigMissing => Err(CommandError::ConfigMissing),
        }
    }

    fn help(&self) -> &str {
        "Şehir için hava durumu bilgisi getirir"
    }
}
