//! Code for reading the coefficient table from a TOML file.
use super::*;
use crate::coefficients::CoefficientTable;
use anyhow::{Context, Result, ensure};
use std::path::Path;

/// The file containing the coefficient table
pub const COEFFICIENTS_FILE_NAME: &str = "coefficients.toml";

/// Check that every value in `values` is finite and strictly positive
fn all_positive<I: IntoIterator<Item = f64>>(values: I) -> bool {
    values.into_iter().all(|value| value.is_finite() && value > 0.0)
}

/// Check the coefficient values which aren't already checked on deserialisation
pub fn check_coefficients(table: &CoefficientTable) -> Result<()> {
    ensure!(
        table.base_cost_per_sqm.is_finite() && table.base_cost_per_sqm.value() >= 0.0,
        "base_cost_per_sqm must be a non-negative number"
    );
    ensure!(
        table.municipal_water_rate.is_finite() && table.municipal_water_rate.value() >= 0.0,
        "municipal_water_rate must be a non-negative number"
    );
    ensure!(
        all_positive([table.daily_consumption_per_person.value()]),
        "daily_consumption_per_person must be greater than zero"
    );

    let rates = &table.infiltration_rates;
    ensure!(
        all_positive([rates.sandy, rates.loamy, rates.clayey].map(|rate| rate.value())),
        "Infiltration rates must be greater than zero"
    );

    let multipliers = &table.budget_multipliers;
    ensure!(
        all_positive([multipliers.low, multipliers.medium, multipliers.high]),
        "Budget multipliers must be greater than zero"
    );

    let advanced = &table.advanced;
    let seasonal = &advanced.seasonal_factors;
    ensure!(
        all_positive([
            seasonal.pre_monsoon,
            seasonal.monsoon,
            seasonal.post_monsoon,
            seasonal.winter
        ]),
        "Seasonal factors must be greater than zero"
    );

    let demand = &advanced.demand_multipliers;
    ensure!(
        [&demand.domestic, &demand.irrigation, &demand.industrial]
            .into_iter()
            .flatten()
            .all(|value| value.is_finite() && *value >= 0.0),
        "Demand multipliers must be non-negative numbers"
    );

    let lifecycle = &advanced.lifecycle;
    ensure!(
        [
            lifecycle.system_life,
            lifecycle.tank_life,
            lifecycle.pump_life,
            lifecycle.filter_life
        ]
        .iter()
        .all(|years| *years > 0),
        "Lifecycle lengths must be at least one year"
    );

    Ok(())
}

/// Read the coefficient table from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing reference data files
pub fn read_coefficients(data_dir: &Path) -> Result<CoefficientTable> {
    let file_path = data_dir.join(COEFFICIENTS_FILE_NAME);
    let table: CoefficientTable = read_toml(&file_path)?;
    check_coefficients(&table).with_context(|| input_err_msg(&file_path))?;

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, coefficients};
    use crate::units::{MillimetresPerHour, MoneyPerLitre};
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    /// The built-in coefficients file
    const BUILTIN_COEFFICIENTS: &str = include_str!("../../data/coefficients.toml");

    #[test]
    fn test_read_coefficients() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(COEFFICIENTS_FILE_NAME), BUILTIN_COEFFICIENTS).unwrap();

        let table = read_coefficients(dir.path()).unwrap();
        assert_eq!(table.runoff_coefficients.rcc, 0.85);
        assert_eq!(table.infiltration_rates.sandy, MillimetresPerHour(50.0));
        assert_eq!(table.municipal_water_rate, MoneyPerLitre(0.02));
        assert_eq!(table.advanced.demand_multipliers.irrigation[4], 1.6);
        assert_eq!(table.advanced.lifecycle.system_life, 20);
    }

    #[test]
    fn test_read_coefficients_bad_proportion() {
        let dir = tempdir().unwrap();
        let contents = BUILTIN_COEFFICIENTS.replace("rcc = 0.85", "rcc = 1.85");
        fs::write(dir.path().join(COEFFICIENTS_FILE_NAME), contents).unwrap();
        assert!(read_coefficients(dir.path()).is_err());
    }

    #[test]
    fn test_read_coefficients_short_demand_multipliers() {
        let dir = tempdir().unwrap();
        let contents = BUILTIN_COEFFICIENTS.replace(
            "industrial = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]",
            "industrial = [1.0, 1.0]",
        );
        fs::write(dir.path().join(COEFFICIENTS_FILE_NAME), contents).unwrap();
        assert!(read_coefficients(dir.path()).is_err());
    }

    #[rstest]
    fn test_check_coefficients_ok(coefficients: CoefficientTable) {
        assert!(check_coefficients(&coefficients).is_ok());
    }

    #[rstest]
    fn test_check_coefficients_zero_infiltration(mut coefficients: CoefficientTable) {
        coefficients.infiltration_rates.clayey = MillimetresPerHour(0.0);
        assert_error!(
            check_coefficients(&coefficients),
            "Infiltration rates must be greater than zero"
        );
    }

    #[rstest]
    fn test_check_coefficients_zero_lifecycle(mut coefficients: CoefficientTable) {
        coefficients.advanced.lifecycle.pump_life = 0;
        assert_error!(
            check_coefficients(&coefficients),
            "Lifecycle lengths must be at least one year"
        );
    }
}
