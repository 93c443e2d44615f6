use real_estate_auto::property::{RandomUnitIds, SequentialUnitIds};
use real_estate_auto::{AddressValidator, Property, PropertyError, ReferenceData, Unit};
use std::collections::HashSet;
use std::sync::Arc;

const US_ADDRESS: &str = "15 E Railroad St, Mount Sterling, IL 62353";
const BEDS: u32 = 2;
const BATHS: f64 = 2.0;
const SQFT: f64 = 500.0;

fn validator() -> AddressValidator {
    let reference = ReferenceData::bundled().expect("bundled reference data loads");
    AddressValidator::new(Arc::new(reference))
}

fn rented_unit(ids: &mut SequentialUnitIds) -> Unit {
    let mut unit = Unit::new(ids, SQFT, BEDS, BATHS);
    unit.set_current_rent(500.0);
    unit.set_current_market_rent(600.0);
    unit
}

#[test]
fn shorthand_and_unit_list_construction_succeed() {
    let validator = validator();
    let mut ids = SequentialUnitIds::new();

    let shorthand = Property::builder(US_ADDRESS)
        .beds(BEDS)
        .baths(BATHS)
        .sqft(SQFT)
        .build(&validator, &mut ids)
        .expect("full shorthand triple builds");
    assert_eq!(shorthand.units().len(), 1);

    let listed = Property::new(&validator, US_ADDRESS, vec![Unit::new(&mut ids, SQFT, BEDS, BATHS)])
        .expect("unit list builds");
    assert_eq!(listed.units().len(), 1);
}

#[test]
fn every_incomplete_shorthand_subset_fails() {
    let validator = validator();
    let subsets: [(Option<f64>, Option<u32>, Option<f64>); 7] = [
        (None, None, None),
        (Some(SQFT), None, None),
        (None, Some(BEDS), None),
        (None, None, Some(BATHS)),
        (Some(SQFT), Some(BEDS), None),
        (Some(SQFT), None, Some(BATHS)),
        (None, Some(BEDS), Some(BATHS)),
    ];

    for (sqft, beds, baths) in subsets {
        let mut builder = Property::builder(US_ADDRESS);
        if let Some(sqft) = sqft {
            builder = builder.sqft(sqft);
        }
        if let Some(beds) = beds {
            builder = builder.beds(beds);
        }
        if let Some(baths) = baths {
            builder = builder.baths(baths);
        }

        let error = builder
            .build(&validator, &mut SequentialUnitIds::new())
            .expect_err("incomplete shorthand must fail");
        assert!(
            matches!(error, PropertyError::ImproperInitialization { .. }),
            "sqft={sqft:?} beds={beds:?} baths={baths:?} produced {error:?}"
        );
    }
}

#[test]
fn unknown_shorthand_key_is_rejected() {
    let error = Property::builder(US_ADDRESS)
        .shorthand("sqft", SQFT)
        .shorthand("pool", 1.0)
        .build(&validator(), &mut SequentialUnitIds::new())
        .expect_err("unknown key fails");
    assert_eq!(
        error,
        PropertyError::InvalidShorthandKey {
            key: "pool".to_string()
        }
    );
}

#[test]
fn accessors_and_totals_reflect_single_unit() {
    let mut ids = SequentialUnitIds::new();
    let unit = rented_unit(&mut ids);
    let unit_id = unit.id();
    let property =
        Property::new(&validator(), US_ADDRESS, vec![unit.clone()]).expect("property builds");

    assert_eq!(property.total_rooms(), 2);
    assert_eq!(property.total_baths(), 2.0);
    assert_eq!(property.total_sqft(), 500.0);
    assert_eq!(property.current_total_rent(), 500.0);
    assert_eq!(property.current_total_market_rent(), 600.0);
    assert_eq!(property.units()[0], unit);
    assert_eq!(property.units()[0].id(), unit_id);

    assert_eq!(property.street_address(), "15 E Railroad St");
    assert_eq!(property.city(), "Mount Sterling");
    assert_eq!(property.state(), "IL");
    assert_eq!(property.state_name(), "Illinois");
    assert_eq!(property.county(), "Brown");
    assert_eq!(property.zip_code(), "62353");
    assert_eq!(property.apt_unit(), None);
}

#[test]
fn address_format_depends_on_apartment() {
    let validator = validator();
    let mut ids = SequentialUnitIds::new();

    let with_apt = Property::from_shorthand(
        &validator,
        &mut ids,
        "15 E Railroad St, Apt 2, Mount Sterling, IL 62353",
        SQFT,
        BEDS,
        BATHS,
    )
    .expect("apartment address builds");
    assert_eq!(with_apt.apt_unit(), Some("Apt 2"));
    assert_eq!(
        with_apt.address(),
        "15 E Railroad St Apt 2, Mount Sterling, IL 62353"
    );

    let without_apt = Property::from_shorthand(&validator, &mut ids, US_ADDRESS, SQFT, BEDS, BATHS)
        .expect("plain address builds");
    assert_eq!(
        without_apt.address(),
        "15 E Railroad St, Mount Sterling, IL 62353"
    );
    assert_ne!(with_apt.address(), without_apt.address());
}

#[test]
fn add_unit_appends_and_updates_totals() {
    let mut ids = SequentialUnitIds::new();
    let mut property =
        Property::new(&validator(), US_ADDRESS, vec![rented_unit(&mut ids)]).expect("builds");

    let extra = Unit::with_rents(&mut ids, SQFT + 20.0, BEDS + 1, BATHS + 1.0, 700.0, 750.0);
    let extra_id = extra.id();
    property.add_unit(extra.clone());
    property.add_unit(extra);

    assert_eq!(property.units().len(), 3);
    assert_eq!(property.units()[1].id(), extra_id);
    assert_eq!(property.units()[2].id(), extra_id);
    assert_eq!(property.total_rooms(), 2 + 3 + 3);
    assert_eq!(property.total_baths(), 2.0 + 3.0 + 3.0);
    assert_eq!(property.total_sqft(), 500.0 + 520.0 + 520.0);
    assert_eq!(property.current_total_rent(), 1900.0);
    assert_eq!(property.current_total_market_rent(), 2100.0);
}

#[test]
fn address_failures_map_to_error_kinds() {
    let validator = validator();
    let build = |address: &str| {
        Property::from_shorthand(
            &validator,
            &mut SequentialUnitIds::new(),
            address,
            SQFT,
            BEDS,
            BATHS,
        )
    };

    assert!(matches!(
        build("15 E Railroad St, Mount Sterling, IL 00000"),
        Err(PropertyError::InvalidZipCode { .. })
    ));
    assert!(matches!(
        build("15 E Railroad St, Mount Sterling, Test_State 62353"),
        Err(PropertyError::InvalidUsState { .. })
    ));
    assert!(matches!(
        build("Test_Street"),
        Err(PropertyError::InvalidUsState { .. })
    ));
    assert!(matches!(
        build("15 E Railroad St, Test_City, IL 62353"),
        Err(PropertyError::InvalidCity { .. })
    ));
    assert!(matches!(
        build("15 E Railroad St, Mount Sterling, Test_County County, IL 62353"),
        Err(PropertyError::InvalidCounty { .. })
    ));
}

#[test]
fn repeated_unit_construction_yields_distinct_ids() {
    let mut ids = RandomUnitIds::new();
    let seen: HashSet<_> = (0..500)
        .map(|_| Unit::new(&mut ids, SQFT, BEDS, BATHS).id())
        .collect();
    assert_eq!(seen.len(), 500);
}
