//! Real-estate investment modeling: properties at validated US addresses,
//! their rental units, and the aggregate figures used to size up a deal.

pub mod address;
pub mod config;
pub mod error;
pub mod property;
pub mod proforma;
pub mod reference;
pub mod telemetry;

pub use address::{AddressValidator, ValidatedAddress};
pub use error::{AppError, PropertyError};
pub use proforma::ProForma;
pub use property::{Property, PropertyBuilder, Unit, UnitId, UnitIdGenerator};
pub use reference::ReferenceData;
