//! Common functionality for rainwise, a tool for designing rainwater harvesting and groundwater
//! recharge systems for sites in India.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod city;
pub mod cli;
pub mod coefficients;
pub mod demand;
pub mod engine;
pub mod feasibility;
pub mod finance;
pub mod input;
pub mod log;
pub mod month;
pub mod output;
pub mod potential;
pub mod reference;
pub mod result;
pub mod settings;
pub mod site;
pub mod sizing;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the directory where rainwise's configuration files are stored.
///
/// If the platform has no configuration directory, a relative path is returned.
pub fn get_rainwise_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("rainwise");

    path
}
