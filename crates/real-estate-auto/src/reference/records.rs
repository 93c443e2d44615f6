use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Location attached to a single zip code in the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipRecord {
    #[serde(deserialize_with = "zip_code_from_number_or_string")]
    pub zip_code: String,
    pub city: String,
    /// Two letter postal abbreviation.
    pub state: String,
    pub county: String,
}

pub(crate) fn parse_state_abbreviations<R: Read>(
    reader: R,
) -> Result<BTreeMap<String, String>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub(crate) fn parse_state_cities<R: Read>(
    reader: R,
) -> Result<BTreeMap<String, Vec<String>>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub(crate) fn parse_zip_json<R: Read>(reader: R) -> Result<Vec<ZipRecord>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub(crate) fn parse_zip_csv<R: Read>(reader: R) -> Result<Vec<ZipRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<ZipRecord>() {
        records.push(record?);
    }

    Ok(records)
}

/// Canonical five digit form: strips a ZIP+4 suffix and restores leading zeros
/// lost when the table stores zip codes as numbers.
pub fn normalize_zip(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let base = match trimmed.split_once('-') {
        Some((base, plus4)) if plus4.len() == 4 && plus4.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        Some(_) => return None,
        None => trimmed,
    };

    if base.is_empty() || base.len() > 5 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(format!("{base:0>5}"))
}

fn zip_code_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawZip {
        Number(u32),
        Text(String),
    }

    let raw = match RawZip::deserialize(deserializer)? {
        RawZip::Number(value) => value.to_string(),
        RawZip::Text(value) => value,
    };

    normalize_zip(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid zip code '{raw}'")))
}
