//! Common routines for handling input data.
use crate::coefficients::CoefficientTable;
use crate::reference::ReferenceData;
use anyhow::{Context, Result, ensure};
use include_dir::{Dir, include_dir};
use log::info;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::io::Read;
use std::path::Path;

pub mod city;
use city::{read_cities, read_cities_from_iter};
pub mod coefficients;
use coefficients::{check_coefficients, read_coefficients};
pub mod site;

/// The reference data which ships with the program
static BUILTIN_DATA_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/data");

/// Label used in error messages for the built-in reference data
const BUILTIN_DATA_LABEL: &str = "<built-in reference data>";

/// Read a series of type `T`s from a CSV reader into a `Vec<T>`.
fn read_csv_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut vec = Vec::new();
    for result in reader.deserialize() {
        vec.push(result?);
    }
    ensure!(!vec.is_empty(), "CSV file cannot be empty");

    Ok(vec)
}

/// Read a series of type `T`s from a CSV file into a `Vec<T>`.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let file = fs::File::open(file_path).with_context(|| input_err_msg(file_path))?;
    read_csv_from_reader(file).with_context(|| input_err_msg(file_path))
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Read an f64, checking that it is between 0 and 1
pub fn deserialise_proportion<'de, D>(deserialiser: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = Deserialize::deserialize(deserialiser)?;
    if !(0.0..=1.0).contains(&value) {
        Err(serde::de::Error::custom("Value must be between 0 and 1"))?;
    }

    Ok(value)
}

/// Format an error message to include the file path
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Read the reference data from the specified directory.
///
/// The directory must contain `cities.csv` and `coefficients.toml`.
///
/// # Arguments
///
/// * `data_dir` - Folder containing reference data files
pub fn read_reference_data(data_dir: &Path) -> Result<ReferenceData> {
    let cities = read_cities(data_dir)?;
    let coefficients = read_coefficients(data_dir)?;

    ReferenceData::new(cities, coefficients)
}

/// Read the reference data which is built into the program
pub fn read_builtin_reference_data() -> Result<ReferenceData> {
    let get_file = |file_name: &str| {
        BUILTIN_DATA_DIR
            .get_file(file_name)
            .and_then(|file| file.contents_utf8())
            .with_context(|| format!("{BUILTIN_DATA_LABEL} is missing {file_name}"))
    };

    let cities_csv = read_csv_from_reader(get_file(city::CITIES_FILE_NAME)?.as_bytes())
        .with_context(|| input_err_msg(BUILTIN_DATA_LABEL))?;
    let cities = read_cities_from_iter(cities_csv.into_iter())
        .with_context(|| input_err_msg(BUILTIN_DATA_LABEL))?;

    let coefficients: CoefficientTable =
        toml::from_str(get_file(coefficients::COEFFICIENTS_FILE_NAME)?)
            .with_context(|| input_err_msg(BUILTIN_DATA_LABEL))?;
    check_coefficients(&coefficients).with_context(|| input_err_msg(BUILTIN_DATA_LABEL))?;

    ReferenceData::new(cities, coefficients)
}

/// Load reference data, either from `data_dir` or, if not provided, the built-in copy.
pub fn load_reference_data(data_dir: Option<&Path>) -> Result<ReferenceData> {
    let data = match data_dir {
        Some(data_dir) => {
            let data = read_reference_data(data_dir)?;
            info!("Loaded reference data from {}", data_dir.display());
            data
        }
        None => read_builtin_reference_data()?,
    };

    info!("Reference data contains {} cities", data.cities.len());
    Ok(data)
}
