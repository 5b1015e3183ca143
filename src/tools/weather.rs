use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::Result;
use crate::tools::model::{Tool, ToolOutcome};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Current-weather lookup against OpenWeatherMap.
pub struct WeatherTool {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherTool {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.weather_api_key.clone(),
            base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for a city. Input: city name (e.g., 'London', 'New York')"
    }

    async fn execute(&self, input: &Value) -> Result<ToolOutcome> {
        let Some(city) = input.as_str().filter(|c| !c.is_empty()) else {
            return Ok(ToolOutcome::fail("weather tool expects a city name"));
        };

        let request = self
            .client
            .get(&self.base_url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Ok(ToolOutcome::fail("Request timed out")),
            Err(e) => return Ok(ToolOutcome::fail(e.to_string())),
        };

        match response.status().as_u16() {
            200 => {
                let data: Value = match response.json().await {
                    Ok(data) => data,
                    Err(e) => return Ok(ToolOutcome::fail(e.to_string())),
                };
                let mut payload = Map::new();
                payload.insert("city".to_string(), data["name"].clone());
                payload.insert("country".to_string(), data["sys"]["country"].clone());
                payload.insert("temperature".to_string(), data["main"]["temp"].clone());
                payload.insert("feels_like".to_string(), data["main"]["feels_like"].clone());
                payload.insert("humidity".to_string(), data["main"]["humidity"].clone());
                payload.insert(
                    "description".to_string(),
                    data["weather"][0]["description"].clone(),
                );
                payload.insert("wind_speed".to_string(), data["wind"]["speed"].clone());
                payload.insert("pressure".to_string(), data["main"]["pressure"].clone());
                Ok(ToolOutcome::ok(payload))
            }
            404 => Ok(ToolOutcome::fail(format!("City '{city}' not found"))),
            status => Ok(ToolOutcome::fail(format!("API error: {status}"))),
        }
    }
}
