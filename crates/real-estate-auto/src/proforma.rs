//! Pairs an asking price with a property so a deal can be sized up.
//!
//! Only gross figures derived from rents are produced here; operating
//! expenses are not modeled, so the yields are gross rather than cap rates.

use crate::property::Property;

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy)]
pub struct ProForma<'a> {
    asking_price: f64,
    property: &'a Property,
}

impl<'a> ProForma<'a> {
    pub fn new(asking_price: f64, property: &'a Property) -> Self {
        Self {
            asking_price,
            property,
        }
    }

    pub fn asking_price(&self) -> f64 {
        self.asking_price
    }

    pub fn property(&self) -> &'a Property {
        self.property
    }

    pub fn annual_rent(&self) -> f64 {
        self.property.current_total_rent() * MONTHS_PER_YEAR
    }

    pub fn annual_market_rent(&self) -> f64 {
        self.property.current_total_market_rent() * MONTHS_PER_YEAR
    }

    /// Annual rent over asking price. `None` unless the asking price is positive.
    pub fn gross_yield(&self) -> Option<f64> {
        self.yield_on(self.annual_rent())
    }

    pub fn gross_market_yield(&self) -> Option<f64> {
        self.yield_on(self.annual_market_rent())
    }

    fn yield_on(&self, annual_income: f64) -> Option<f64> {
        (self.asking_price > 0.0).then(|| annual_income / self.asking_price)
    }
}
