//! Static US state, city and zip code tables used to validate addresses.
//!
//! The tables are read once into an immutable [`ReferenceData`] snapshot that
//! is shared behind an `Arc` by every validator.

mod records;

pub use records::{normalize_zip, ZipRecord};

use crate::config::ReferenceDataConfig;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::info;

const BUNDLED_STATE_ABBREVIATIONS: &str = include_str!("../../static/state_abbreviations.json");
const BUNDLED_STATE_CITIES: &str = include_str!("../../static/state_cities.json");
const BUNDLED_ZIP_CODES: &str = include_str!("../../static/zip_codes.json");

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {table} table: {source}")]
    Json {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid CSV in zip code table: {0}")]
    Csv(#[from] csv::Error),
    #[error("state abbreviation {abbreviation} is mapped to both {first} and {second}")]
    DuplicateAbbreviation {
        abbreviation: String,
        first: String,
        second: String,
    },
}

/// Immutable lookup tables for states, cities and zip codes.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    abbreviations_by_state: BTreeMap<String, String>,
    states_by_abbreviation: HashMap<String, String>,
    states_by_lowercase_name: HashMap<String, String>,
    cities_by_state: BTreeMap<String, Vec<String>>,
    zip_codes: HashMap<String, ZipRecord>,
}

impl ReferenceData {
    /// Builds the snapshot from already parsed tables.
    ///
    /// `state_abbreviations` maps full state names to postal abbreviations; the
    /// reverse direction is derived here.
    pub fn from_tables(
        state_abbreviations: BTreeMap<String, String>,
        cities_by_state: BTreeMap<String, Vec<String>>,
        zip_records: Vec<ZipRecord>,
    ) -> Result<Self, ReferenceDataError> {
        let mut abbreviations_by_state = BTreeMap::new();
        let mut states_by_abbreviation: HashMap<String, String> = HashMap::new();
        let mut states_by_lowercase_name = HashMap::new();

        for (name, abbreviation) in state_abbreviations {
            let name = name.trim().to_string();
            let abbreviation = abbreviation.trim().to_ascii_uppercase();

            if let Some(existing) = states_by_abbreviation.get(&abbreviation) {
                return Err(ReferenceDataError::DuplicateAbbreviation {
                    abbreviation,
                    first: existing.clone(),
                    second: name,
                });
            }

            states_by_abbreviation.insert(abbreviation.clone(), name.clone());
            states_by_lowercase_name.insert(name.to_lowercase(), name.clone());
            abbreviations_by_state.insert(name, abbreviation);
        }

        let zip_codes = zip_records
            .into_iter()
            .map(|record| {
                let key = normalize_zip(&record.zip_code).unwrap_or_else(|| record.zip_code.clone());
                (key, record)
            })
            .collect();

        Ok(Self {
            abbreviations_by_state,
            states_by_abbreviation,
            states_by_lowercase_name,
            cities_by_state,
            zip_codes,
        })
    }

    /// Parses the three JSON tables from arbitrary readers.
    pub fn from_json_readers<A: Read, C: Read, Z: Read>(
        state_abbreviations: A,
        state_cities: C,
        zip_codes: Z,
    ) -> Result<Self, ReferenceDataError> {
        let abbreviations = records::parse_state_abbreviations(state_abbreviations).map_err(
            |source| ReferenceDataError::Json {
                table: "state abbreviation",
                source,
            },
        )?;
        let cities = records::parse_state_cities(state_cities).map_err(|source| {
            ReferenceDataError::Json {
                table: "state city",
                source,
            }
        })?;
        let zips = records::parse_zip_json(zip_codes).map_err(|source| {
            ReferenceDataError::Json {
                table: "zip code",
                source,
            }
        })?;

        Self::from_tables(abbreviations, cities, zips)
    }

    /// Loads the tables from the configured directory.
    pub fn load(config: &ReferenceDataConfig) -> Result<Self, ReferenceDataError> {
        let abbreviations = records::parse_state_abbreviations(open(
            &config.state_abbreviations_path(),
        )?)
        .map_err(|source| ReferenceDataError::Json {
            table: "state abbreviation",
            source,
        })?;
        let cities = records::parse_state_cities(open(&config.state_cities_path())?).map_err(
            |source| ReferenceDataError::Json {
                table: "state city",
                source,
            },
        )?;

        let zip_path = config.zip_codes_path();
        let zips = if zip_path.extension().is_some_and(|ext| ext == "csv") {
            records::parse_zip_csv(open(&zip_path)?)?
        } else {
            records::parse_zip_json(open(&zip_path)?).map_err(|source| {
                ReferenceDataError::Json {
                    table: "zip code",
                    source,
                }
            })?
        };

        let data = Self::from_tables(abbreviations, cities, zips)?;
        info!(
            dir = %config.data_dir.display(),
            states = data.state_count(),
            zip_codes = data.zip_code_count(),
            "loaded address reference data"
        );
        Ok(data)
    }

    /// Tables compiled into the crate from its `static/` directory.
    pub fn bundled() -> Result<Self, ReferenceDataError> {
        Self::from_json_readers(
            BUNDLED_STATE_ABBREVIATIONS.as_bytes(),
            BUNDLED_STATE_CITIES.as_bytes(),
            BUNDLED_ZIP_CODES.as_bytes(),
        )
    }

    pub fn state_count(&self) -> usize {
        self.abbreviations_by_state.len()
    }

    pub fn zip_code_count(&self) -> usize {
        self.zip_codes.len()
    }

    /// Full state name for a postal abbreviation, ignoring case.
    pub fn state_name_for_abbreviation(&self, abbreviation: &str) -> Option<&str> {
        self.states_by_abbreviation
            .get(&abbreviation.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Canonical spelling of a state name, ignoring case and extra whitespace.
    pub fn canonical_state_name(&self, name: &str) -> Option<&str> {
        let key = name.split_whitespace().collect::<Vec<_>>().join(" ");
        self.states_by_lowercase_name
            .get(&key.to_lowercase())
            .map(String::as_str)
    }

    pub fn abbreviation_for_state(&self, name: &str) -> Option<&str> {
        let canonical = self.canonical_state_name(name)?;
        self.abbreviations_by_state
            .get(canonical)
            .map(String::as_str)
    }

    /// Cities listed for a state. Unknown states yield an empty slice.
    pub fn cities_in_state(&self, state: &str) -> &[String] {
        let canonical = self
            .canonical_state_name(state)
            .or_else(|| self.state_name_for_abbreviation(state));

        canonical
            .and_then(|name| self.cities_by_state.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_known_city(&self, state: &str, city: &str) -> bool {
        self.cities_in_state(state)
            .iter()
            .any(|known| known.eq_ignore_ascii_case(city.trim()))
    }

    pub fn zip_record(&self, zip_code: &str) -> Option<&ZipRecord> {
        normalize_zip(zip_code).and_then(|zip| self.zip_codes.get(&zip))
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ReferenceDataError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ReferenceDataError::Io {
            path: path.to_path_buf(),
            source,
        })
}
