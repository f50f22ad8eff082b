use crate::reply::ReplyPayload;
use crate::weather::model::WeatherReading;

/// Embed accent colour (sky blue)
pub const WEATHER_COLOR: u32 = 0x87CEEB;

pub const TEMPERATURE_LABEL: &str = "🌡️ Sıcaklık";
pub const FEELS_LIKE_LABEL: &str = "🤚 Hissedilen";
pub const HUMIDITY_LABEL: &str = "💧 Nem";
pub const CONDITION_LABEL: &str = "☁️ Durum";
pub const WIND_LABEL: &str = "💨 Rüzgar";

const UNKNOWN_WIND: &str = "Bilinmiyor";
const FOOTER: &str = "Veriler: OpenWeatherMap";

/// Build the rich reply for a weather reading
///
/// # Arguments
/// * `reading` - The reading to render
///
/// # Returns
/// A payload with fields in a fixed order; equal readings give equal payloads
pub fn format_reading(reading: &WeatherReading) -> ReplyPayload {
    let wind = match reading.wind_speed_mps {
        Some(speed) => format!("{:.1}", speed),
        None => UNKNOWN_WIND.to_string(),
    };

    ReplyPayload::new(format!("{} Weather", reading.resolved_place_name), WEATHER_COLOR)
        .field(TEMPERATURE_LABEL, format!("{:.1}°C", reading.temperature_celsius), true)
        .field(FEELS_LIKE_LABEL, format!("{:.1}°C", reading.feels_like_celsius), true)
        .field(HUMIDITY_LABEL, format!("%{}", reading.humidity_percent), true)
        .field(CONDITION_LABEL, capitalize(&reading.condition_description), true)
        .field(WIND_LABEL, format!("{} m/s", wind), true)
        .footer(FOOTER)
}

/// Upper-case the first character, leave the rest as is
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
