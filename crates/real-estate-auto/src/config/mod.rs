use std::env;
use std::fmt;
use std::path::PathBuf;

/// Default location of the bundled reference tables.
pub const DEFAULT_REFERENCE_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Distinguishes runtime behavior for different stages of the analysis tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub reference: ReferenceDataConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = match env::var("REFERENCE_DATA_DIR") {
            Ok(value) if value.trim().is_empty() => return Err(ConfigError::EmptyReferenceDir),
            Ok(value) => PathBuf::from(value.trim()),
            Err(_) => PathBuf::from(DEFAULT_REFERENCE_DATA_DIR),
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            reference: ReferenceDataConfig { data_dir },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the state, city and zip code tables live on disk.
#[derive(Debug, Clone)]
pub struct ReferenceDataConfig {
    pub data_dir: PathBuf,
}

impl ReferenceDataConfig {
    pub const STATE_ABBREVIATIONS_FILE: &'static str = "state_abbreviations.json";
    pub const STATE_CITIES_FILE: &'static str = "state_cities.json";
    pub const ZIP_CODES_FILE: &'static str = "zip_codes.json";
    pub const ZIP_CODES_CSV_FILE: &'static str = "zip_codes.csv";

    pub fn state_abbreviations_path(&self) -> PathBuf {
        self.data_dir.join(Self::STATE_ABBREVIATIONS_FILE)
    }

    pub fn state_cities_path(&self) -> PathBuf {
        self.data_dir.join(Self::STATE_CITIES_FILE)
    }

    /// Prefers a CSV zip table when one is present next to the JSON tables.
    pub fn zip_codes_path(&self) -> PathBuf {
        let csv = self.data_dir.join(Self::ZIP_CODES_CSV_FILE);
        if csv.is_file() {
            csv
        } else {
            self.data_dir.join(Self::ZIP_CODES_FILE)
        }
    }
}

impl Default for ReferenceDataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_REFERENCE_DATA_DIR),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyReferenceDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyReferenceDir => {
                write!(f, "REFERENCE_DATA_DIR must not be empty when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
