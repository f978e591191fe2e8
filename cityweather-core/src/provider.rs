use crate::{error::ProviderError, model::WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// A source of current weather conditions, keyed by free-text city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(
    config: &crate::Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;

    let provider = match config.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key.to_owned(), base_url.to_owned()),
        None => OpenWeatherProvider::new(api_key.to_owned()),
    };

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            base_url: None,
        };

        assert!(provider_from_config(&cfg).is_ok());
    }
}
