//! The reference data used by every calculation: the city table and the coefficient table.
use crate::city::{City, CityMap};
use crate::coefficients::CoefficientTable;
use anyhow::{Result, ensure};

/// Read-only reference data, loaded once before any calculation is performed
#[derive(PartialEq, Debug, Clone)]
pub struct ReferenceData {
    /// Climate data for known cities, in file order
    pub cities: CityMap,
    /// Empirical factors and prices
    pub coefficients: CoefficientTable,
}

impl ReferenceData {
    /// Bundle a city table and coefficient table together.
    ///
    /// Fails if the city table is empty, as no site could then be resolved.
    pub fn new(cities: CityMap, coefficients: CoefficientTable) -> Result<Self> {
        ensure!(!cities.is_empty(), "The reference city table is empty");

        Ok(Self {
            cities,
            coefficients,
        })
    }

    /// Iterate over the known cities
    pub fn iter_cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }
}
