use crate::airports::AirportEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";
pub const API_KEY_ENV: &str = "FARE_RADAR_API_KEY";
pub const CLIENT_ID_ENV: &str = "FARE_RADAR_CLIENT_ID";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub query: QueryConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
    /// Optional CSV with extra airports (`iata`, `latitude`, `longitude`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airports_csv: Option<String>,
    #[serde(default)]
    pub airports: Vec<AirportEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub client_id: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QueryConfig {
    pub origin: String,  // IATA code of the departure airport
    pub date: NaiveDate, // Outbound date, YYYY-MM-DD
    pub output: String,  // CSV destination path
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CollectionConfig {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// What a transport error during collection does to the result.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Any failure discards everything collected so far.
    #[default]
    Abort,
    /// A failed destination is skipped and recorded; the rest are kept.
    Isolate,
}

fn default_timeout() -> u64 {
    10
}

fn default_passengers() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig {
                base_url: "https://api.easyjet.com/v1".to_string(),
                api_key: "your_api_key_here".to_string(),
                client_id: "your_client_id_here".to_string(),
                timeout_seconds: default_timeout(),
                passengers: default_passengers(),
            },
            query: QueryConfig {
                origin: "LGW".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default(),
                output: "easyjet_flights.csv".to_string(),
            },
            collection: CollectionConfig::default(),
            airports_csv: None,
            airports: Vec::new(),
        }
    }
}

impl Config {
    /// Loads config.toml from the working directory.
    /// If it doesn't exist, creates a default one.
    pub fn load() -> Self {
        let mut config = Self::load_from(CONFIG_PATH);
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Reads `path`; falls back to defaults (and tries to write them to
    /// `path`) when the file is missing, or to defaults alone when it is
    /// invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    info!("Loaded configuration from {}.", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    return Config::default();
                }
            },
            Err(_) => info!("No {} found, creating one with defaults.", path.display()),
        }

        let default_config = Config::default();

        // Save default config to disk for the user to edit later
        match toml::to_string_pretty(&default_config) {
            Ok(toml_string) => {
                if fs::write(path, toml_string).is_err() {
                    warn!("Could not write default {} to disk.", path.display());
                }
            }
            Err(e) => warn!("Could not serialize default configuration: {}", e),
        }

        info!("Loaded default configuration.");
        default_config
    }

    /// Credentials from the environment win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api.api_key = key;
        }
        if let Some(id) = lookup(CLIENT_ID_ENV).filter(|v| !v.is_empty()) {
            self.api.client_id = id;
        }
    }
}
