use super::unit::{Unit, UnitIdGenerator};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum RentRollError {
    #[error("failed to read rent roll: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rent roll CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads a CSV rent roll (`sqft,beds,baths[,current_rent][,current_market_rent]`)
/// into units. Missing or blank rent cells count as zero.
pub struct RentRollImporter;

impl RentRollImporter {
    pub fn from_path<P, G>(path: P, ids: &mut G) -> Result<Vec<Unit>, RentRollError>
    where
        P: AsRef<Path>,
        G: UnitIdGenerator + ?Sized,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, ids)
    }

    pub fn from_reader<R, G>(reader: R, ids: &mut G) -> Result<Vec<Unit>, RentRollError>
    where
        R: Read,
        G: UnitIdGenerator + ?Sized,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut units = Vec::new();

        for row in csv_reader.deserialize::<RentRollRow>() {
            let row = row?;
            units.push(Unit::with_rents(
                ids,
                row.sqft,
                row.beds,
                row.baths,
                row.current_rent.unwrap_or_default(),
                row.current_market_rent.unwrap_or_default(),
            ));
        }

        info!(units = units.len(), "imported rent roll");
        Ok(units)
    }
}

#[derive(Debug, Deserialize)]
struct RentRollRow {
    sqft: f64,
    beds: u32,
    baths: f64,
    #[serde(default)]
    current_rent: Option<f64>,
    #[serde(default)]
    current_market_rent: Option<f64>,
}
