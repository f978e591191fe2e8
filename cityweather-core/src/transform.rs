//! Mapping of the raw OpenWeather current-weather response into the
//! [`WeatherReport`] shape used for display and history.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::WeatherReport;

pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

#[derive(Debug, Deserialize)]
pub struct OwCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct OwSys {
    pub country: String,
}

/// Raw `GET /weather` response body, reduced to the fields we consume.
#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    pub name: String,
    pub weather: Vec<OwCondition>,
    pub main: OwMain,
    pub wind: OwWind,
    pub sys: OwSys,
}

/// Build a [`WeatherReport`] from a raw provider response.
///
/// The provider contract guarantees at least one condition entry; an empty
/// list is treated as a malformed response, not repaired here.
pub fn report_from_response(
    raw: OwCurrentResponse,
    fetched_at: DateTime<Utc>,
) -> Result<WeatherReport, ProviderError> {
    let condition = raw
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Upstream("Provider response contained no weather conditions".to_string()))?;

    Ok(WeatherReport {
        city_name: raw.name,
        country: raw.sys.country,
        temperature: round_half_up(raw.main.temp),
        description: condition.description,
        min_temp: round_half_up(raw.main.temp_min),
        max_temp: round_half_up(raw.main.temp_max),
        wind_speed: raw.wind.speed,
        humidity: raw.main.humidity,
        icon: condition.icon,
        fetched_at,
    })
}

/// Round half-up toward positive infinity, so -12.5 becomes -12.
/// `f64::round` rounds halves away from zero instead.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// URL of the provider's 2x icon image for an icon code.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

/// Capitalize the first letter of each whitespace-separated word, lowering
/// the rest. Used for condition descriptions, which arrive all-lowercase.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> OwCurrentResponse {
        OwCurrentResponse {
            name: "London".to_string(),
            weather: vec![OwCondition {
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
            }],
            main: OwMain {
                temp: 15.5,
                temp_min: 12.3,
                temp_max: 18.7,
                humidity: 72,
            },
            wind: OwWind { speed: 4.6 },
            sys: OwSys {
                country: "GB".to_string(),
            },
        }
    }

    #[test]
    fn temperatures_are_rounded_wind_and_humidity_are_not() {
        let fetched_at = Utc::now();
        let report = report_from_response(sample_response(), fetched_at).unwrap();

        assert_eq!(report.city_name, "London");
        assert_eq!(report.country, "GB");
        assert_eq!(report.temperature, 16);
        assert_eq!(report.min_temp, 12);
        assert_eq!(report.max_temp, 19);
        assert_eq!(report.wind_speed, 4.6);
        assert_eq!(report.humidity, 72);
        assert_eq!(report.description, "scattered clouds");
        assert_eq!(report.icon, "03d");
        assert_eq!(report.fetched_at, fetched_at);
    }

    #[test]
    fn empty_condition_list_is_an_error() {
        let mut raw = sample_response();
        raw.weather.clear();

        let err = report_from_response(raw, Utc::now()).unwrap_err();
        assert_eq!(err.category(), "upstream");
    }

    #[test]
    fn rounding_is_half_up_not_half_away_from_zero() {
        assert_eq!(round_half_up(15.5), 16);
        assert_eq!(round_half_up(12.3), 12);
        assert_eq!(round_half_up(18.7), 19);
        assert_eq!(round_half_up(-12.5), -12);
        assert_eq!(round_half_up(-12.6), -13);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn icon_url_points_at_the_2x_asset() {
        assert_eq!(
            icon_url("04d"),
            "https://openweathermap.org/img/wn/04d@2x.png"
        );
    }

    #[test]
    fn capitalize_words_title_cases_descriptions() {
        assert_eq!(capitalize_words("scattered clouds"), "Scattered Clouds");
        assert_eq!(capitalize_words("RAIN"), "Rain");
        assert_eq!(capitalize_words(""), "");
    }
}
