//! Static IATA code to coordinate lookup.
//!
//! The table is built once at startup from the builtin reference airports,
//! optionally extended with `[[airports]]` entries from `config.toml` and an
//! extra CSV file. Nothing mutates it afterwards. An unknown code is an
//! expected outcome, so lookups return `Option` instead of an error.

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, warn};

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// An airport as it appears in configuration or CSV input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AirportEntry {
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

const BUILTIN: &[(&str, Coordinates)] = &[
    ("LGW", Coordinates::new(51.1537, -0.1821)), // London Gatwick
    ("BCN", Coordinates::new(41.2974, 2.0833)),  // Barcelona
    ("CDG", Coordinates::new(49.0097, 2.5479)),  // Paris Charles de Gaulle
];

#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    coords: HashMap<String, Coordinates>,
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl AirportTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::empty().with_entries(BUILTIN.iter().map(|(code, c)| AirportEntry {
            code: code.to_string(),
            latitude: c.latitude,
            longitude: c.longitude,
        }))
    }

    /// Adds entries, replacing any existing coordinates for the same code.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = AirportEntry>,
    {
        for entry in entries {
            let code = normalize(&entry.code);
            if code.is_empty() {
                continue;
            }
            self.coords
                .insert(code, Coordinates::new(entry.latitude, entry.longitude));
        }
        self
    }

    pub fn lookup(&self, code: &str) -> Option<Coordinates> {
        self.coords.get(&normalize(code)).copied()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Reads airports from a CSV file with `iata`, `latitude` and `longitude`
/// columns (any order, case-insensitive headers).
///
/// Loading is best effort: a missing file or missing column is logged and
/// yields no entries, and rows that fail to parse are skipped.
pub fn load_airports_csv(path: impl AsRef<Path>) -> Vec<AirportEntry> {
    let path = path.as_ref();
    let mut entries = Vec::new();
    let mut rdr = match ReaderBuilder::new().trim(csv::Trim::All).from_path(path) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load airport database from '{}': {}", path.display(), e);
            return entries;
        }
    };

    let headers = match rdr.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            error!("Failed to read CSV headers: {}", e);
            return entries;
        }
    };

    let find_col = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
    };

    let (code_idx, lat_idx, lon_idx) =
        match (find_col("iata"), find_col("latitude"), find_col("longitude")) {
            (Some(c), Some(la), Some(lo)) => (c, la, lo),
            _ => {
                error!(
                    "Airport CSV needs iata, latitude and longitude columns. Headers found: {:?}",
                    headers
                );
                return entries;
            }
        };

    for (line, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable airport row {}: {}", line + 1, e);
                continue;
            }
        };

        let parsed = (|| {
            let code = record.get(code_idx)?.to_string();
            let latitude = record.get(lat_idx)?.parse::<f64>().ok()?;
            let longitude = record.get(lon_idx)?.parse::<f64>().ok()?;
            Some(AirportEntry {
                code,
                latitude,
                longitude,
            })
        })();

        match parsed {
            Some(entry) if !entry.code.is_empty() => entries.push(entry),
            _ => warn!("Skipping malformed airport row {}", line + 1),
        }
    }

    info!("Loaded {} airports from '{}'", entries.len(), path.display());
    entries
}
