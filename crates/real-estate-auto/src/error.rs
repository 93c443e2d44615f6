use crate::config::ConfigError;
use crate::property::RentRollError;
use crate::reference::ReferenceDataError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Reasons a [`Property`](crate::property::Property) cannot be constructed.
///
/// The first four variants come from address validation, the last two from
/// the unit arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("invalid US state: {reason}")]
    InvalidUsState { reason: String },
    #[error("city {} is not associated with zip code {zip_code}", .city.as_deref().unwrap_or("<missing>"))]
    InvalidCity {
        city: Option<String>,
        zip_code: String,
    },
    #[error("county {county} is not associated with zip code {zip_code}")]
    InvalidCounty { county: String, zip_code: String },
    #[error("zip code {} is invalid", .zip_code.as_deref().unwrap_or("<missing>"))]
    InvalidZipCode { zip_code: Option<String> },
    #[error("improper property initialization: {reason}")]
    ImproperInitialization { reason: String },
    #[error("shorthand key '{key}' is invalid, expected one of sqft, beds, baths")]
    InvalidShorthandKey { key: String },
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    ReferenceData(ReferenceDataError),
    RentRoll(RentRollError),
    Property(PropertyError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::ReferenceData(err) => write!(f, "reference data error: {}", err),
            AppError::RentRoll(err) => write!(f, "rent roll error: {}", err),
            AppError::Property(err) => write!(f, "property error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::ReferenceData(err) => Some(err),
            AppError::RentRoll(err) => Some(err),
            AppError::Property(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(value: ReferenceDataError) -> Self {
        Self::ReferenceData(value)
    }
}

impl From<RentRollError> for AppError {
    fn from(value: RentRollError) -> Self {
        Self::RentRoll(value)
    }
}

impl From<PropertyError> for AppError {
    fn from(value: PropertyError) -> Self {
        Self::Property(value)
    }
}
