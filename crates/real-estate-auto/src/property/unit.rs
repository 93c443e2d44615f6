use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier assigned to a [`Unit`] when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u64);

impl UnitId {
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of unit identifiers, passed explicitly wherever units are created.
pub trait UnitIdGenerator {
    fn next_id(&mut self) -> UnitId;
}

/// Hands out 1, 2, 3, ... Deterministic, intended for tests and fixtures.
#[derive(Debug, Clone)]
pub struct SequentialUnitIds {
    next: u64,
}

impl SequentialUnitIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialUnitIds {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitIdGenerator for SequentialUnitIds {
    fn next_id(&mut self) -> UnitId {
        let id = UnitId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random 64-bit identifiers. Values already handed out by this generator are
/// redrawn, so ids never repeat within one generator.
///
/// Every issued id is remembered for the generator's lifetime, one `u64` per
/// id. Scope a generator to an import or a session rather than the process.
#[derive(Debug, Clone)]
pub struct RandomUnitIds<R = StdRng> {
    rng: R,
    issued: HashSet<u64>,
}

impl RandomUnitIds<StdRng> {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomUnitIds<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> RandomUnitIds<R> {
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }

    /// Number of ids this generator has handed out and still remembers.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

impl<R: RngCore> UnitIdGenerator for RandomUnitIds<R> {
    fn next_id(&mut self) -> UnitId {
        loop {
            let candidate = self.rng.next_u64();
            if self.issued.insert(candidate) {
                return UnitId(candidate);
            }
        }
    }
}

/// A single rentable space within a property.
///
/// Size and room counts are fixed at creation; only the rent figures change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    id: UnitId,
    sqft: f64,
    beds: u32,
    baths: f64,
    current_rent: f64,
    current_market_rent: f64,
}

impl Unit {
    pub fn new<G>(ids: &mut G, sqft: f64, beds: u32, baths: f64) -> Self
    where
        G: UnitIdGenerator + ?Sized,
    {
        Self::with_rents(ids, sqft, beds, baths, 0.0, 0.0)
    }

    pub fn with_rents<G>(
        ids: &mut G,
        sqft: f64,
        beds: u32,
        baths: f64,
        current_rent: f64,
        current_market_rent: f64,
    ) -> Self
    where
        G: UnitIdGenerator + ?Sized,
    {
        Self {
            id: ids.next_id(),
            sqft,
            beds,
            baths,
            current_rent,
            current_market_rent,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn sqft(&self) -> f64 {
        self.sqft
    }

    pub fn beds(&self) -> u32 {
        self.beds
    }

    pub fn baths(&self) -> f64 {
        self.baths
    }

    /// Monthly rent currently collected.
    pub fn current_rent(&self) -> f64 {
        self.current_rent
    }

    /// Monthly rent the unit would fetch at market rates.
    pub fn current_market_rent(&self) -> f64 {
        self.current_market_rent
    }

    pub fn set_current_rent(&mut self, current_rent: f64) {
        self.current_rent = current_rent;
    }

    pub fn set_current_market_rent(&mut self, current_market_rent: f64) {
        self.current_market_rent = current_market_rent;
    }
}
