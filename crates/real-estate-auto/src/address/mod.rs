//! Free-text US address parsing and validation against [`ReferenceData`].

mod tagger;

pub use tagger::{AddressTagger, StandardTagger, TaggedAddress};

use crate::error::PropertyError;
use crate::reference::{normalize_zip, ReferenceData};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Address fields that passed validation. City, state and county carry the
/// reference table spelling rather than the caller's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedAddress {
    pub street: String,
    pub apt_unit: Option<String>,
    pub city: String,
    /// Postal abbreviation, e.g. `IL`.
    pub state: String,
    pub state_name: String,
    pub county: String,
    pub zip_code: String,
}

/// Checks addresses against a shared reference snapshot. Validation is a pure
/// function of the address and the snapshot.
#[derive(Debug, Clone)]
pub struct AddressValidator<T = StandardTagger> {
    reference: Arc<ReferenceData>,
    tagger: T,
}

impl AddressValidator<StandardTagger> {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self::with_tagger(reference, StandardTagger)
    }
}

impl<T: AddressTagger> AddressValidator<T> {
    pub fn with_tagger(reference: Arc<ReferenceData>, tagger: T) -> Self {
        Self { reference, tagger }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn validate(&self, address: &str) -> Result<ValidatedAddress, PropertyError> {
        self.validate_with_county(address, None)
    }

    /// Like [`validate`](Self::validate), additionally requiring the zip code's
    /// county to equal `county_hint` when one is supplied.
    pub fn validate_with_county(
        &self,
        address: &str,
        county_hint: Option<&str>,
    ) -> Result<ValidatedAddress, PropertyError> {
        let tagged = self.tagger.tag(address);
        let result = self.check(tagged, county_hint);
        match &result {
            Ok(validated) => debug!(address, zip_code = %validated.zip_code, "address validated"),
            Err(err) => debug!(address, error = %err, "address rejected"),
        }
        result
    }

    fn check(
        &self,
        tagged: TaggedAddress,
        county_hint: Option<&str>,
    ) -> Result<ValidatedAddress, PropertyError> {
        let reference = self.reference.as_ref();

        let state_token = tagged
            .state
            .as_deref()
            .ok_or_else(|| PropertyError::InvalidUsState {
                reason: format!("could not identify a state in {tagged:?}"),
            })?;

        let resolved = if state_token.len() == 2 {
            reference.state_name_for_abbreviation(state_token)
        } else {
            reference.canonical_state_name(state_token)
        };
        let state_name = resolved.ok_or_else(|| PropertyError::InvalidUsState {
            reason: format!("the state provided {state_token} does not exist"),
        })?;

        let state_abbreviation = reference.abbreviation_for_state(state_name).ok_or_else(|| {
            PropertyError::InvalidUsState {
                reason: format!("no abbreviation recorded for {state_name}"),
            }
        })?;

        let record = tagged
            .zip_code
            .as_deref()
            .and_then(|zip| reference.zip_record(zip))
            .ok_or_else(|| PropertyError::InvalidZipCode {
                zip_code: tagged.zip_code.clone(),
            })?;

        let city_matches = tagged
            .city
            .as_deref()
            .is_some_and(|city| same_place(city, &record.city));
        if !city_matches {
            return Err(PropertyError::InvalidCity {
                city: tagged.city.clone(),
                zip_code: record.zip_code.clone(),
            });
        }

        if !record.state.eq_ignore_ascii_case(state_abbreviation) {
            return Err(PropertyError::InvalidUsState {
                reason: format!(
                    "state {state_name} is not associated with zip code {}",
                    record.zip_code
                ),
            });
        }

        for county in [tagged.county.as_deref(), county_hint].into_iter().flatten() {
            if !same_place(county, &record.county) {
                return Err(PropertyError::InvalidCounty {
                    county: county.to_string(),
                    zip_code: record.zip_code.clone(),
                });
            }
        }

        Ok(ValidatedAddress {
            street: tagged.street.unwrap_or_default(),
            apt_unit: tagged.occupancy,
            city: record.city.clone(),
            state: state_abbreviation.to_string(),
            state_name: state_name.to_string(),
            county: record.county.clone(),
            zip_code: normalize_zip(&record.zip_code).unwrap_or_else(|| record.zip_code.clone()),
        })
    }
}

fn same_place(given: &str, expected: &str) -> bool {
    let given = given.split_whitespace().collect::<Vec<_>>().join(" ");
    given.eq_ignore_ascii_case(expected.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> AddressValidator {
        let reference = ReferenceData::bundled().expect("bundled reference data");
        AddressValidator::new(Arc::new(reference))
    }

    #[test]
    fn validates_known_address() {
        let address = validator()
            .validate("15 E Railroad St, Mount Sterling, IL 62353")
            .expect("address validates");
        assert_eq!(address.street, "15 E Railroad St");
        assert_eq!(address.city, "Mount Sterling");
        assert_eq!(address.state, "IL");
        assert_eq!(address.state_name, "Illinois");
        assert_eq!(address.county, "Brown");
        assert_eq!(address.zip_code, "62353");
        assert!(address.apt_unit.is_none());
    }

    #[test]
    fn full_state_name_and_case_are_accepted() {
        let address = validator()
            .validate("15 E Railroad St, mount sterling, illinois 62353")
            .expect("address validates");
        assert_eq!(address.city, "Mount Sterling");
        assert_eq!(address.state, "IL");
    }

    #[test]
    fn multi_word_state_without_comma_before_it() {
        let address = validator()
            .validate("20 W 34th St, New York New York 10001")
            .expect("multi-word state validates");
        assert_eq!(address.city, "New York");
        assert_eq!(address.state, "NY");
        assert_eq!(address.state_name, "New York");
        assert_eq!(address.street, "20 W 34th St");
    }

    #[test]
    fn leading_zero_zip_from_numeric_table() {
        let address = validator()
            .validate("24 Beacon St, Boston, MA 02108")
            .expect("boston validates");
        assert_eq!(address.zip_code, "02108");
        assert_eq!(address.county, "Suffolk");
    }

    #[test]
    fn missing_state_is_rejected() {
        let error = validator()
            .validate("15 E Railroad St, Mount Sterling, 62353")
            .expect_err("state missing");
        assert!(matches!(error, PropertyError::InvalidUsState { .. }));
    }

    #[test]
    fn unknown_abbreviation_is_rejected() {
        let error = validator()
            .validate("15 E Railroad St, Mount Sterling, ZZ 62353")
            .expect_err("unknown abbreviation");
        assert!(matches!(error, PropertyError::InvalidUsState { .. }));
    }

    #[test]
    fn state_zip_mismatch_is_a_state_error() {
        let error = validator()
            .validate("15 E Railroad St, Mount Sterling, IA 62353")
            .expect_err("state mismatch");
        match error {
            PropertyError::InvalidUsState { reason } => assert!(reason.contains("62353")),
            other => panic!("expected state error, got {other:?}"),
        }
    }

    #[test]
    fn city_mismatch_and_missing_city() {
        let error = validator()
            .validate("15 E Railroad St, Quincy, IL 62353")
            .expect_err("city mismatch");
        assert_eq!(
            error,
            PropertyError::InvalidCity {
                city: Some("Quincy".to_string()),
                zip_code: "62353".to_string(),
            }
        );

        let error = validator()
            .validate("Mount Sterling, IL 62353")
            .expect_err("city is consumed as the street");
        assert!(matches!(error, PropertyError::InvalidCity { city: None, .. }));
    }

    #[test]
    fn missing_or_unknown_zip() {
        let error = validator()
            .validate("15 E Railroad St, Mount Sterling, IL")
            .expect_err("zip missing");
        assert_eq!(error, PropertyError::InvalidZipCode { zip_code: None });

        let error = validator()
            .validate("15 E Railroad St, Mount Sterling, IL 99999")
            .expect_err("zip unknown");
        assert_eq!(
            error,
            PropertyError::InvalidZipCode {
                zip_code: Some("99999".to_string())
            }
        );
    }

    #[test]
    fn county_named_in_address_must_match() {
        let validator = validator();
        validator
            .validate("15 E Railroad St, Mount Sterling, Brown County, IL 62353")
            .expect("matching county validates");

        let error = validator
            .validate("15 E Railroad St, Mount Sterling, Adams County, IL 62353")
            .expect_err("county mismatch");
        assert_eq!(
            error,
            PropertyError::InvalidCounty {
                county: "Adams".to_string(),
                zip_code: "62353".to_string(),
            }
        );
    }

    #[test]
    fn county_hint_must_match() {
        let validator = validator();
        let address = validator
            .validate_with_county("15 E Railroad St, Mount Sterling, IL 62353", Some("brown"))
            .expect("hint matches");
        assert_eq!(address.county, "Brown");

        let error = validator
            .validate_with_county("15 E Railroad St, Mount Sterling, IL 62353", Some("Test_County"))
            .expect_err("hint mismatch");
        assert!(matches!(error, PropertyError::InvalidCounty { .. }));
    }

    #[test]
    fn custom_tagger_is_used() {
        struct FixedTagger;

        impl AddressTagger for FixedTagger {
            fn tag(&self, _address: &str) -> TaggedAddress {
                TaggedAddress {
                    street: Some("500 Main St".to_string()),
                    occupancy: Some("Suite 2".to_string()),
                    city: Some("Quincy".to_string()),
                    county: None,
                    state: Some("IL".to_string()),
                    zip_code: Some("62301".to_string()),
                }
            }
        }

        let reference = Arc::new(ReferenceData::bundled().expect("bundled reference data"));
        let validator = AddressValidator::with_tagger(reference, FixedTagger);
        let address = validator.validate("ignored").expect("fixed tagging validates");
        assert_eq!(address.apt_unit.as_deref(), Some("Suite 2"));
        assert_eq!(address.county, "Adams");
    }
}
