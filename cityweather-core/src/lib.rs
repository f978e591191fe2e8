//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the weather provider
//! - City-name validation and provider-response transformation
//! - The bounded, recency-ordered search history with a timed undo slot
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries
//! or services.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod persistence;
pub mod provider;
pub mod transform;
pub mod validate;

pub use config::Config;
pub use error::ProviderError;
pub use history::{HistoryStore, MAX_HISTORY, UNDO_WINDOW};
pub use model::{HistoryEntry, WeatherReport};
pub use persistence::{FileStore, HistoryPersistence};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use validate::{ValidationError, validate_city_name};
