//! Cities hold the climate and groundwater reference data for a location.
//!
//! The [`CityLookup::resolve`] method maps a user's free-text location and postal code onto one of
//! the cities in the reference table.
use crate::month::Monthly;
use crate::units::{Metres, Millimetres};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use serde_string_enum::DeserializeLabeledStringEnum;

/// The city used when neither the postal code nor the location matches any city
const FALLBACK_CITY_NAME: &str = "Delhi";

/// Number of leading postal-code digits which identify a city
pub const PINCODE_PREFIX_LEN: usize = 3;

/// A map of [`City`]s, keyed by city name, in the order they appear in the reference data
pub type CityMap = IndexMap<String, City>;

/// The broad climatic region a city is located in
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
#[allow(missing_docs)]
pub enum ClimaticRegion {
    #[string = "north"]
    North,
    #[string = "south"]
    South,
    #[string = "east"]
    East,
    #[string = "west"]
    West,
    #[string = "central"]
    Central,
    #[string = "northeast"]
    Northeast,
}

/// Climate and groundwater reference data for a city
#[derive(PartialEq, Debug, Clone)]
pub struct City {
    /// Name of the city (e.g. "Chennai")
    pub name: String,
    /// The state the city is in (e.g. "Tamil Nadu")
    pub state: String,
    /// The first three digits of the city's postal codes (e.g. "600")
    pub pincode_prefix: String,
    /// Normal rainfall for each month
    pub monthly_rainfall: Monthly<Millimetres>,
    /// Typical depth to the water table
    pub groundwater_depth: Metres,
    /// Description of the dominant aquifer
    pub aquifer_type: String,
    /// The city's climatic region
    pub region: ClimaticRegion,
}

impl City {
    /// Total normal rainfall over the year
    pub fn annual_rainfall(&self) -> Millimetres {
        self.monthly_rainfall.iter().copied().sum()
    }
}

/// Case-insensitive check whether either string contains the other
fn either_contains(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Methods for looking up cities in the reference table
pub trait CityLookup {
    /// Find the city which best matches the given location and postal code.
    ///
    /// The postal code prefix is tried first, then a case-insensitive match of the location
    /// against city and state names. If nothing matches, the fallback city (or else the first city
    /// in the table) is returned.
    ///
    /// # Arguments
    ///
    /// * `location` - Free-text location given by the user
    /// * `pincode` - The six-digit postal code of the site
    ///
    /// # Returns
    ///
    /// The matching city, or an error if the table is empty.
    fn resolve(&self, location: &str, pincode: &str) -> Result<&City>;
}

impl CityLookup for CityMap {
    fn resolve(&self, location: &str, pincode: &str) -> Result<&City> {
        let by_pincode = pincode
            .get(..PINCODE_PREFIX_LEN)
            .and_then(|prefix| self.values().find(|city| city.pincode_prefix == prefix));
        if let Some(city) = by_pincode {
            debug!("Postal code {pincode} matched to {}", city.name);
            return Ok(city);
        }

        // An empty location is contained in every name, so matches the first city
        let by_location = self.values().find(|city| {
            either_contains(&city.name, location) || either_contains(&city.state, location)
        });
        if let Some(city) = by_location {
            debug!("Location '{location}' matched to {}", city.name);
            return Ok(city);
        }

        let city = self
            .get(FALLBACK_CITY_NAME)
            .or_else(|| self.first().map(|(_, city)| city))
            .context("The reference city table is empty")?;
        warn!(
            "Could not match location '{location}' (postal code {pincode}) to a known city; \
            using reference data for {}",
            city.name
        );

        Ok(city)
    }
}
