use anyhow::{Result, anyhow};
use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::debug;

use cityweather_core::{
    Config, FileStore, HistoryEntry, HistoryStore, WeatherReport,
    provider::provider_from_config,
    transform::{capitalize_words, icon_url},
    validate_city_name,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City weather lookup with search history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather for a city and remember the search.
    Show {
        /// City name, e.g. "London" or "São Paulo".
        city: String,
    },

    /// Manage the search history; interactive when no subcommand is given.
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// Print remembered searches, newest first.
    List,

    /// Remove one entry by id.
    Remove { id: String },

    /// Forget all remembered searches.
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::History { action } => history(action),
        }
    }
}

fn configure() -> Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let mut config = Config::load()?;
    config.set_api_key(api_key);
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> Result<()> {
    let city = validate_city_name(city).map_err(|err| anyhow!("{err}"))?;

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    println!("Fetching current weather for {city}...");
    let report = match provider.current_weather(city).await {
        Ok(report) => report,
        Err(err) => {
            debug!(category = err.category(), "weather lookup failed");
            return Err(anyhow!("{err}"));
        }
    };

    print_report(&report);

    // Remember the search under the provider's canonical name.
    let mut store = HistoryStore::load(Box::new(FileStore::new()?));
    store.add(&report.city_name, &report.country);

    Ok(())
}

fn print_report(report: &WeatherReport) {
    println!();
    println!(
        "{}, {} - {}",
        report.city_name,
        report.country,
        capitalize_words(&report.description)
    );
    println!(
        "  Temperature: {}°C (min {}°C, max {}°C)",
        report.temperature, report.min_temp, report.max_temp
    );
    println!(
        "  Wind: {} m/s   Humidity: {}%",
        report.wind_speed, report.humidity
    );
    println!("  Icon: {}", icon_url(&report.icon));
    println!("  Fetched: {}", report.fetched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
}

fn history(action: Option<HistoryAction>) -> Result<()> {
    let mut store = HistoryStore::load(Box::new(FileStore::new()?));

    match action {
        None => manage_history(&mut store),
        Some(HistoryAction::List) => {
            if store.is_empty() {
                println!("No search history.");
            } else {
                for entry in store.entries() {
                    println!("{}  {}", entry.id, entry_line(entry));
                }
            }
            Ok(())
        }
        Some(HistoryAction::Remove { id }) => {
            if store.get(&id).is_none() {
                println!("No history entry with id {id}.");
            } else {
                store.remove(&id);
                println!("Removed.");
            }
            Ok(())
        }
        Some(HistoryAction::Clear) => {
            store.clear();
            println!("History cleared.");
            Ok(())
        }
    }
}

/// Interactive loop over the history. Removal arms the 5-second undo window,
/// which stays usable for as long as this session runs.
fn manage_history(store: &mut HistoryStore) -> Result<()> {
    loop {
        let entries = store.entries().to_vec();
        let undo_available = store.recently_removed().is_some();

        if entries.is_empty() && !undo_available {
            println!("No search history.");
            return Ok(());
        }

        let mut options: Vec<String> = entries
            .iter()
            .map(|entry| format!("Remove {}", entry_line(entry)))
            .collect();
        if undo_available {
            options.push("Undo last removal".to_string());
        }
        options.push("Clear all".to_string());
        options.push("Quit".to_string());

        let choice = Select::new("Search history:", options).raw_prompt()?;

        if choice.index < entries.len() {
            let entry = &entries[choice.index];
            println!("Removed {}, {}. Undo is available for 5 seconds.", entry.city_name, entry.country);
            store.remove(&entry.id);
        } else if choice.value == "Undo last removal" {
            store.undo_remove();
        } else if choice.value == "Clear all" {
            store.clear();
            println!("History cleared.");
        } else {
            return Ok(());
        }
    }
}

fn entry_line(entry: &HistoryEntry) -> String {
    let searched = Local
        .timestamp_millis_opt(entry.searched_at)
        .single()
        .map_or_else(|| "unknown time".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());

    format!("{}, {}  (searched {})", entry.city_name, entry.country, searched)
}
