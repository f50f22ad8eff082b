#![allow(dead_code)]
/// Test helpers for unit tests
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::commands::{GuildInfo, ReplyChannel};
use crate::config::Config;
use crate::reply::Reply;
use crate::weather::{WeatherOutcome, WeatherProvider, WeatherQuery, WeatherReading};

/// Something that happened on a [`RecordingChannel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Reply(Reply),
    Defer,
    Followup(Reply),
}

/// Reply channel that records what was sent instead of talking to a gateway
pub struct RecordingChannel {
    events: Mutex<Vec<ChannelEvent>>,
    guild: Option<GuildInfo>,
    latency: Option<Duration>,
    guild_reads: AtomicUsize,
    fail_defer: bool,
}

impl RecordingChannel {
    /// A channel outside any guild with unknown latency
    pub fn new() -> Self {
        RecordingChannel {
            events: Mutex::new(Vec::new()),
            guild: None,
            latency: None,
            guild_reads: AtomicUsize::new(0),
            fail_defer: false,
        }
    }

    pub fn with_guild(mut self, guild: GuildInfo) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every defer call fail
    pub fn failing_defer(mut self) -> Self {
        self.fail_defer = true;
        self
    }

    pub fn events(&self) -> Vec<ChannelEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn guild_reads(&self) -> usize {
        self.guild_reads.load(Ordering::SeqCst)
    }

    fn record(&self, event: ChannelEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ReplyChannel for RecordingChannel {
    async fn reply(&self, reply: &Reply) -> Result<()> {
        self.record(ChannelEvent::Reply(reply.clone()));
        Ok(())
    }

    async fn defer(&self) -> Result<()> {
        if self.fail_defer {
            return Err(anyhow!("interaction expired"));
        }
        self.record(ChannelEvent::Defer);
        Ok(())
    }

    async fn followup(&self, reply: &Reply) -> Result<()> {
        self.record(ChannelEvent::Followup(reply.clone()));
        Ok(())
    }

    fn guild(&self) -> Option<GuildInfo> {
        self.guild_reads.fetch_add(1, Ordering::SeqCst);
        self.guild
    }

    async fn latency(&self) -> Option<Duration> {
        self.latency
    }
}

/// Weather provider that returns a canned outcome and counts calls
pub struct StubWeatherProvider {
    outcome: WeatherOutcome,
    configured: bool,
    queries: Mutex<Vec<String>>,
}

impl StubWeatherProvider {
    pub fn returning(outcome: WeatherOutcome) -> Self {
        StubWeatherProvider {
            outcome,
            configured: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A provider without an API key
    pub fn not_configured() -> Self {
        StubWeatherProvider {
            outcome: WeatherOutcome::ConfigMissing,
            configured: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for StubWeatherProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn fetch(&self, query: &WeatherQuery) -> WeatherOutcome {
        self.queries
            .lock()
            .unwrap()
            .push(query.place_name().to_string());
        self.outcome.clone()
    }
}

/// The Ankara reading used across tests
pub fn ankara_reading() -> WeatherReading {
    WeatherReading {
        resolved_place_name: "Ankara".to_string(),
        temperature_celsius: 21.4,
        feels_like_celsius: 20.1,
        humidity_percent: 55,
        condition_description: "açık".to_string(),
        wind_speed_mps: Some(3.2),
    }
}

/// Provider body matching [`ankara_reading`]
pub const ANKARA_BODY: &str = r#"{
    "name": "Ankara",
    "main": {"temp": 21.4, "feels_like": 20.1, "humidity": 55},
    "weather": [{"description": "açık"}],
    "wind": {"speed": 3.2}
}"#;

/// Create a test config for unit tests
pub fn create_test_config() -> Config {
    Config::new(
        "test_token".to_string(),
        Some("test_weather_key".to_string()),
        "http://127.0.0.1:9".to_string(),
    )
}
