use serde::Deserialize;

/// A validated place name to look up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    place_name: String,
}

impl WeatherQuery {
    /// Create a query from user input
    ///
    /// # Arguments
    /// * `place_name` - The place name as typed by the user
    ///
    /// # Returns
    /// Some(query) with the trimmed name, or None if nothing but whitespace was given
    pub fn new(place_name: &str) -> Option<Self> {
        let trimmed = place_name.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(WeatherQuery {
            place_name: trimmed.to_string(),
        })
    }

    pub fn place_name(&self) -> &str {
        &self.place_name
    }
}

/// Current conditions for a place, built from a successful provider response
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Place name as resolved by the provider
    pub resolved_place_name: String,
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    /// Relative humidity, 0-100
    pub humidity_percent: u8,
    pub condition_description: String,
    /// None when the provider did not report wind
    pub wind_speed_mps: Option<f64>,
}

/// Why the provider call failed even though the provider answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    /// Non-2xx status other than 404
    Status(u16),
    /// 200 with a body that is missing required fields
    MalformedBody,
}

/// Classified result of a single provider call
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Success(WeatherReading),
    /// Carries the place name exactly as queried
    NotFound(String),
    ProviderError(ProviderFailure),
    NetworkError,
    ConfigMissing,
}

/// Body of `GET /data/2.5/weather`, limited to the fields we read
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    name: String,
    main: MainData,
    weather: Vec<ConditionData>,
    wind: Option<WindData>,
}

#[derive(Debug, Deserialize)]
struct MainData {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionData {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindData {
    speed: Option<f64>,
}

impl CurrentWeatherResponse {
    /// Convert the raw response into a reading
    ///
    /// # Returns
    /// None if a required field is absent or out of range
    pub(crate) fn into_reading(self) -> Option<WeatherReading> {
        if self.main.humidity > 100 {
            return None;
        }

        let condition = self.weather.into_iter().next()?;

        Some(WeatherReading {
            resolved_place_name: self.name,
            temperature_celsius: self.main.temp,
            feels_like_celsius: self.main.feels_like,
            humidity_percent: self.main.humidity,
            condition_description: condition.description,
            wind_speed_mps: self.wind.and_then(|wind| wind.speed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let query = WeatherQuery::new("  Ankara ").unwrap();
        assert_eq!(query.place_name(), "Ankara");
    }

    #[test]
    fn test_blank_query_is_rejected() {
        assert!(WeatherQuery::new("").is_none());
        assert!(WeatherQuery::new("   ").is_none());
    }

    #[test]
    fn test_response_without_wind() {
        let body = r#"{
            "name": "İzmir",
            "main": {"temp": 28.0, "feels_like": 30.2, "humidity": 40},
            "weather": [{"description": "az bulutlu"}]
        }"#;

        let response: CurrentWeatherResponse = serde_json::from_str(body).unwrap();
        let reading = response.into_reading().unwrap();

        assert_eq!(reading.resolved_place_name, "İzmir");
        assert_eq!(reading.humidity_percent, 40);
        assert_eq!(reading.wind_speed_mps, None);
    }

    #[test]
    fn test_response_without_conditions_is_rejected() {
        let body = r#"{
            "name": "Ankara",
            "main": {"temp": 21.4, "feels_like": 20.1, "humidity": 55},
            "weather": []
        }"#;

        let response: CurrentWeatherResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_reading().is_none());
    }

    #[test]
    fn test_humidity_out_of_range_is_rejected() {
        let body = r#"{
            "name": "Ankara",
            "main": {"temp": 21.4, "feels_like": 20.1, "humidity": 140},
            "weather": [{"description": "açık"}]
        }"#;

        let response: CurrentWeatherResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_reading().is_none());
    }
}
