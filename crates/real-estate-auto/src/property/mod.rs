//! Properties, their rentable units and the aggregate figures used when
//! sizing up a deal.

mod rent_roll;
mod unit;

pub use rent_roll::{RentRollError, RentRollImporter};
pub use unit::{RandomUnitIds, SequentialUnitIds, Unit, UnitId, UnitIdGenerator};

use crate::address::{AddressTagger, AddressValidator, ValidatedAddress};
use crate::error::PropertyError;
use serde::Serialize;

/// A parcel at one validated address holding one or more units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    address: ValidatedAddress,
    units: Vec<Unit>,
}

impl Property {
    pub fn builder(address: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(address)
    }

    /// Validates `address` and takes ownership of `units`.
    pub fn new<T: AddressTagger>(
        validator: &AddressValidator<T>,
        address: &str,
        units: Vec<Unit>,
    ) -> Result<Self, PropertyError> {
        Self::builder(address)
            .units(units)
            .build(validator, &mut SequentialUnitIds::new())
    }

    /// Single unit property described by its size and room counts.
    pub fn from_shorthand<T, G>(
        validator: &AddressValidator<T>,
        ids: &mut G,
        address: &str,
        sqft: f64,
        beds: u32,
        baths: f64,
    ) -> Result<Self, PropertyError>
    where
        T: AddressTagger,
        G: UnitIdGenerator + ?Sized,
    {
        Self::builder(address)
            .sqft(sqft)
            .beds(beds)
            .baths(baths)
            .build(validator, ids)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Mutable access for rent updates. A slice keeps the unit count fixed.
    pub fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id() == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id() == id)
    }

    pub fn validated_address(&self) -> &ValidatedAddress {
        &self.address
    }

    pub fn street_address(&self) -> &str {
        &self.address.street
    }

    pub fn city(&self) -> &str {
        &self.address.city
    }

    /// Postal abbreviation of the state.
    pub fn state(&self) -> &str {
        &self.address.state
    }

    pub fn state_name(&self) -> &str {
        &self.address.state_name
    }

    pub fn county(&self) -> &str {
        &self.address.county
    }

    pub fn apt_unit(&self) -> Option<&str> {
        self.address.apt_unit.as_deref()
    }

    pub fn zip_code(&self) -> &str {
        &self.address.zip_code
    }

    /// Mailing style address, e.g. `15 E Railroad St Apt 2, Mount Sterling, IL 62353`.
    pub fn address(&self) -> String {
        let address = &self.address;
        match address.apt_unit.as_deref() {
            Some(apt) => format!(
                "{} {}, {}, {} {}",
                address.street, apt, address.city, address.state, address.zip_code
            ),
            None => format!(
                "{}, {}, {} {}",
                address.street, address.city, address.state, address.zip_code
            ),
        }
    }

    /// Bedrooms across all units.
    pub fn total_rooms(&self) -> u32 {
        self.units.iter().map(Unit::beds).sum()
    }

    pub fn total_baths(&self) -> f64 {
        self.units.iter().map(Unit::baths).sum()
    }

    pub fn total_sqft(&self) -> f64 {
        self.units.iter().map(Unit::sqft).sum()
    }

    pub fn current_total_rent(&self) -> f64 {
        self.units.iter().map(Unit::current_rent).sum()
    }

    pub fn current_total_market_rent(&self) -> f64 {
        self.units.iter().map(Unit::current_market_rent).sum()
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }
}

/// Collects construction arguments for a [`Property`].
///
/// Either an explicit unit list or the complete `sqft`/`beds`/`baths` shorthand
/// must be supplied. When both are given the unit list wins.
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    address: String,
    units: Option<Vec<Unit>>,
    sqft: Option<f64>,
    beds: Option<u32>,
    baths: Option<f64>,
    county: Option<String>,
    unknown_keys: Vec<String>,
    rejected_beds: Option<f64>,
}

impl PropertyBuilder {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            units: None,
            sqft: None,
            beds: None,
            baths: None,
            county: None,
            unknown_keys: Vec::new(),
            rejected_beds: None,
        }
    }

    pub fn units(mut self, units: Vec<Unit>) -> Self {
        self.units = Some(units);
        self
    }

    pub fn sqft(mut self, sqft: f64) -> Self {
        self.sqft = Some(sqft);
        self
    }

    pub fn beds(mut self, beds: u32) -> Self {
        self.beds = Some(beds);
        self
    }

    pub fn baths(mut self, baths: f64) -> Self {
        self.baths = Some(baths);
        self
    }

    /// Requires the zip code's county to match `county`.
    pub fn county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    /// String keyed shorthand for callers driven by external input. Keys are
    /// matched case-insensitively. Unknown keys, and a `beds` value that is not
    /// a whole non-negative count, fail the eventual [`build`](Self::build).
    pub fn shorthand(self, key: &str, value: f64) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "sqft" => self.sqft(value),
            "beds" => match whole_count(value) {
                Some(beds) => self.beds(beds),
                None => Self {
                    rejected_beds: Some(value),
                    ..self
                },
            },
            "baths" => self.baths(value),
            _ => {
                let mut builder = self;
                builder.unknown_keys.push(key.to_string());
                builder
            }
        }
    }

    /// Validates the address, then the unit arguments. `ids` is only drawn from
    /// when the shorthand synthesizes a unit.
    pub fn build<T, G>(
        self,
        validator: &AddressValidator<T>,
        ids: &mut G,
    ) -> Result<Property, PropertyError>
    where
        T: AddressTagger,
        G: UnitIdGenerator + ?Sized,
    {
        let address = validator.validate_with_county(&self.address, self.county.as_deref())?;

        if let Some(key) = self.unknown_keys.into_iter().next() {
            return Err(PropertyError::InvalidShorthandKey { key });
        }

        if let Some(value) = self.rejected_beds {
            return Err(PropertyError::ImproperInitialization {
                reason: format!("beds must be a whole non-negative number, got {value}"),
            });
        }

        let units = match self.units {
            Some(units) if units.is_empty() => {
                return Err(PropertyError::ImproperInitialization {
                    reason: "a property needs at least one unit".to_string(),
                })
            }
            Some(units) => units,
            None => match (self.sqft, self.beds, self.baths) {
                (Some(sqft), Some(beds), Some(baths)) => vec![Unit::new(ids, sqft, beds, baths)],
                (sqft, beds, baths) => {
                    let missing: Vec<&str> = [
                        ("sqft", sqft.is_none()),
                        ("beds", beds.is_none()),
                        ("baths", baths.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(key, absent)| absent.then_some(key))
                    .collect();
                    return Err(PropertyError::ImproperInitialization {
                        reason: format!(
                            "if no units are provided, sqft, beds and baths are required (missing {})",
                            missing.join(", ")
                        ),
                    });
                }
            },
        };

        Ok(Property { address, units })
    }
}

fn whole_count(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then_some(value as u32)
}
