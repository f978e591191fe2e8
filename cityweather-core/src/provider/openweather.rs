use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::debug;

use crate::error::ProviderError;
use crate::model::WeatherReport;
use crate::transform::{OwCurrentResponse, report_from_response};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for the OpenWeather current-weather endpoint. Units are fixed to
/// metric.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Explicit base URL, for test servers or regional endpoints.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            // The body is only useful for diagnostics; user-facing text
            // comes from the status classification.
            let body = res.text().await.unwrap_or_default();
            debug!(%status, body = %truncate_body(&body), "weather request failed");
            return Err(ProviderError::from_status(status));
        }

        let parsed: OwCurrentResponse = res.json().await?;
        report_from_response(parsed, Utc::now())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        self.fetch_current(city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_points_at_openweather() {
        let provider = OpenWeatherProvider::new("KEY".to_string());
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let provider =
            OpenWeatherProvider::with_base_url("KEY".to_string(), "http://localhost:1".to_string());
        assert_eq!(provider.base_url, "http://localhost:1");
    }

    #[test]
    fn long_error_bodies_are_truncated_for_logging() {
        let body = "x".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), 203);
    }
}
