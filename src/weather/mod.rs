mod client;
mod format;
mod model;

pub use client::{WeatherClient, WeatherProvider};
pub use format::format_reading;
pub use model::{ProviderFailure, WeatherOutcome, WeatherQuery, WeatherReading};
