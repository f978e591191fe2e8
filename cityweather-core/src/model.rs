use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Simplified weather record for display and storage, produced by
/// [`crate::transform::report_from_response`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city_name: String,
    /// ISO country code as reported by the provider.
    pub country: String,
    /// Current temperature in °C, rounded to the nearest integer.
    pub temperature: i32,
    pub description: String,
    pub min_temp: i32,
    pub max_temp: i32,
    /// Wind speed in m/s, unrounded.
    pub wind_speed: f64,
    /// Relative humidity in percent, unrounded.
    pub humidity: u8,
    /// Provider icon code, e.g. "04d".
    pub icon: String,
    pub fetched_at: DateTime<Utc>,
}

/// One remembered past search, keyed by `(city_name, country)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Opaque id, stable for the lifetime of the `(city_name, country)` pair
    /// within a session.
    pub id: String,
    /// Display name as returned by the provider, not case-normalized.
    pub city_name: String,
    pub country: String,
    /// Milliseconds since the Unix epoch of the most recent search.
    pub searched_at: i64,
}

impl HistoryEntry {
    /// True when this entry remembers the same search as `(city_name, country)`.
    /// City names compare case-insensitively, country codes exactly.
    pub fn matches(&self, city_name: &str, country: &str) -> bool {
        self.country == country && self.city_name.to_lowercase() == city_name.to_lowercase()
    }
}
