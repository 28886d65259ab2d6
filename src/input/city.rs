//! Code for reading the city reference table from a CSV file.
use super::*;
use crate::city::{City, CityMap, ClimaticRegion, PINCODE_PREFIX_LEN};
use crate::units::{Metres, Millimetres};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

/// The file containing the city table
pub const CITIES_FILE_NAME: &str = "cities.csv";

/// A city record as it appears in the CSV file, with one column per month
#[derive(PartialEq, Debug, Deserialize)]
pub struct CityRaw {
    city: String,
    state: String,
    pincode_prefix: String,
    region: ClimaticRegion,
    aquifer_type: String,
    groundwater_depth: f64,
    jan: f64,
    feb: f64,
    mar: f64,
    apr: f64,
    may: f64,
    jun: f64,
    jul: f64,
    aug: f64,
    sep: f64,
    oct: f64,
    nov: f64,
    dec: f64,
}

impl CityRaw {
    /// Check the record and convert it into a [`City`]
    fn into_city(self) -> Result<City> {
        let monthly_rainfall = [
            self.jan, self.feb, self.mar, self.apr, self.may, self.jun, self.jul, self.aug,
            self.sep, self.oct, self.nov, self.dec,
        ];
        ensure!(
            monthly_rainfall
                .iter()
                .all(|rain| rain.is_finite() && *rain >= 0.0),
            "Rainfall for {} must be a non-negative number for every month",
            self.city
        );
        ensure!(
            self.pincode_prefix.len() == PINCODE_PREFIX_LEN
                && self.pincode_prefix.chars().all(|c| c.is_ascii_digit()),
            "Postal code prefix for {} must be {PINCODE_PREFIX_LEN} digits, got '{}'",
            self.city,
            self.pincode_prefix
        );
        ensure!(
            self.groundwater_depth.is_finite() && self.groundwater_depth >= 0.0,
            "Groundwater depth for {} must be a non-negative number",
            self.city
        );

        Ok(City {
            name: self.city,
            state: self.state,
            pincode_prefix: self.pincode_prefix,
            monthly_rainfall: monthly_rainfall.map(Millimetres),
            groundwater_depth: Metres(self.groundwater_depth),
            aquifer_type: self.aquifer_type,
            region: self.region,
        })
    }
}

/// Read cities from an iterator of raw records.
///
/// # Returns
///
/// A map of cities keyed by name, in the order they were read, or an error if a record is invalid
/// or a city appears twice.
pub fn read_cities_from_iter<I>(iter: I) -> Result<CityMap>
where
    I: Iterator<Item = CityRaw>,
{
    let mut cities = CityMap::new();
    for raw in iter {
        let city = raw.into_city()?;
        let name = city.name.clone();
        ensure!(
            cities.insert(name.clone(), city).is_none(),
            "Duplicate city: {name}"
        );
    }

    ensure!(!cities.is_empty(), "City table cannot be empty");

    Ok(cities)
}

/// Read the city table from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing reference data files
///
/// # Returns
///
/// A map of cities keyed by name, in file order.
pub fn read_cities(data_dir: &Path) -> Result<CityMap> {
    let file_path = data_dir.join(CITIES_FILE_NAME);
    let cities_csv = read_csv(&file_path)?;
    read_cities_from_iter(cities_csv.into_iter()).with_context(|| input_err_msg(&file_path))
}
