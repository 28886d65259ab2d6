//! Code for reading site descriptions from TOML files and validating them.
//!
//! A site file contains the fields common to both calculation modes at the top level, plus a
//! `[harvesting]` or `[recharge]` table matching the `mode` field. For example:
//!
//! ```toml
//! mode = "harvesting"
//! name = "Sharma residence"
//! location = "Lajpat Nagar, Delhi"
//! pincode = "110024"
//! soil_type = "loamy"
//! groundwater_depth = 18.0
//! budget = "medium"
//!
//! [harvesting]
//! roof_area = 120.0
//! roof_material = "rcc"
//! environment = "residential"
//! occupants = 5
//! purpose = "domestic"
//! ```
use super::*;
use crate::site::{
    Borewell, BorewellCondition, BudgetTier, CalculationMode, Environment, HarvestingSite,
    RechargeSite, RoofMaterial, SiteCommon, SiteInput, SoilType, SurfaceType, WaterPurpose,
};
use crate::units::{Metres, SquareMetres};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

/// Number of digits in an Indian postal code
const PINCODE_LEN: usize = 6;

/// The contents of a site file
#[derive(PartialEq, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteFileRaw {
    mode: CalculationMode,
    name: String,
    location: String,
    pincode: String,
    soil_type: SoilType,
    groundwater_depth: f64,
    budget: BudgetTier,
    #[serde(default)]
    open_space_available: bool,
    open_space_area: Option<f64>,
    harvesting: Option<HarvestingRaw>,
    recharge: Option<RechargeRaw>,
}

/// The `[harvesting]` table of a site file
#[derive(PartialEq, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HarvestingRaw {
    roof_area: f64,
    roof_material: RoofMaterial,
    environment: Environment,
    #[serde(default)]
    bird_nesting: bool,
    occupants: u32,
    purpose: WaterPurpose,
}

/// The `[recharge]` table of a site file
#[derive(PartialEq, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RechargeRaw {
    catchment_area: f64,
    catchment_type: SurfaceType,
    #[serde(default)]
    borewell_present: bool,
    borewell_count: Option<u32>,
    borewell_depth: Option<f64>,
    borewell_condition: Option<BorewellCondition>,
    aquifer_type: Option<String>,
}

/// Check that a postal code consists of six digits and doesn't start with zero
fn check_pincode(pincode: &str) -> Result<()> {
    ensure!(
        pincode.len() == PINCODE_LEN
            && pincode.chars().all(|c| c.is_ascii_digit())
            && !pincode.starts_with('0'),
        "Invalid postal code '{pincode}': must be {PINCODE_LEN} digits and not start with 0"
    );

    Ok(())
}

/// Check that an area is a finite number greater than zero
fn check_area(value: f64, field: &str) -> Result<SquareMetres> {
    ensure!(
        value.is_finite() && value > 0.0,
        "{field} must be a number greater than zero"
    );

    Ok(SquareMetres(value))
}

impl SiteFileRaw {
    /// Validate the fields shared by both modes
    fn common(&self) -> Result<SiteCommon> {
        check_pincode(&self.pincode)?;
        ensure!(
            self.groundwater_depth.is_finite() && self.groundwater_depth >= 0.0,
            "groundwater_depth must be a non-negative number"
        );

        let open_space = if self.open_space_available {
            let area = self
                .open_space_area
                .context("open_space_area must be given when open_space_available is true")?;
            Some(check_area(area, "open_space_area")?)
        } else {
            None
        };

        Ok(SiteCommon {
            name: self.name.clone(),
            location: self.location.clone(),
            pincode: self.pincode.clone(),
            soil_type: self.soil_type,
            groundwater_depth: Metres(self.groundwater_depth),
            budget: self.budget,
            open_space,
        })
    }

    /// Validate the file and convert it into a [`SiteInput`]
    fn into_site(self) -> Result<SiteInput> {
        let common = self.common()?;
        match self.mode {
            CalculationMode::Harvesting => {
                ensure!(
                    self.recharge.is_none(),
                    "A [recharge] table was given but mode is \"harvesting\""
                );
                let raw = self
                    .harvesting
                    .context("Missing [harvesting] table for mode \"harvesting\"")?;
                Ok(SiteInput::Harvesting(raw.into_site(common)?))
            }
            CalculationMode::Recharge => {
                ensure!(
                    self.harvesting.is_none(),
                    "A [harvesting] table was given but mode is \"recharge\""
                );
                let raw = self
                    .recharge
                    .context("Missing [recharge] table for mode \"recharge\"")?;
                Ok(SiteInput::Recharge(raw.into_site(common)?))
            }
        }
    }
}

impl HarvestingRaw {
    fn into_site(self, common: SiteCommon) -> Result<HarvestingSite> {
        let roof_area = check_area(self.roof_area, "roof_area")?;
        ensure!(self.occupants >= 1, "occupants must be at least 1");

        Ok(HarvestingSite {
            common,
            roof_area,
            roof_material: self.roof_material,
            environment: self.environment,
            bird_nesting: self.bird_nesting,
            occupants: self.occupants,
            purpose: self.purpose,
        })
    }
}

impl RechargeRaw {
    fn into_site(self, common: SiteCommon) -> Result<RechargeSite> {
        let catchment_area = check_area(self.catchment_area, "catchment_area")?;

        let borewell = if self.borewell_present {
            let depth = self
                .borewell_depth
                .context("borewell_depth must be given when borewell_present is true")?;
            ensure!(
                depth.is_finite() && depth > 0.0,
                "borewell_depth must be a number greater than zero"
            );
            let condition = self
                .borewell_condition
                .context("borewell_condition must be given when borewell_present is true")?;
            let count = self.borewell_count.unwrap_or(1);
            ensure!(count >= 1, "borewell_count must be at least 1");

            Some(Borewell {
                count,
                depth: Metres(depth),
                condition,
            })
        } else {
            None
        };

        Ok(RechargeSite {
            common,
            catchment_area,
            catchment_type: self.catchment_type,
            borewell,
            aquifer_type: self.aquifer_type,
        })
    }
}

/// Parse and validate a site description from a TOML string
pub fn parse_site(contents: &str) -> Result<SiteInput> {
    let raw: SiteFileRaw = toml::from_str(contents)?;
    raw.into_site()
}

/// Read and validate a site description from the specified TOML file.
///
/// # Arguments
///
/// * `file_path` - Path to the site file
///
/// # Returns
///
/// A validated [`SiteInput`], or an error if the file can't be read or breaks any of the rules
/// described in [`crate::site`].
pub fn read_site(file_path: &Path) -> Result<SiteInput> {
    let raw: SiteFileRaw = read_toml(file_path)?;
    raw.into_site()
        .with_context(|| format!("Invalid site description in {}", file_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    const COMMON: &str = r#"
name = "Test site"
location = "Delhi"
pincode = "110001"
soil_type = "sandy"
groundwater_depth = 10.0
budget = "medium"
"#;

    const HARVESTING: &str = r#"
[harvesting]
roof_area = 150.0
roof_material = "rcc"
environment = "residential"
bird_nesting = true
occupants = 4
purpose = "domestic"
"#;

    const RECHARGE: &str = r#"
[recharge]
catchment_area = 200
catchment_type = "open_ground"
borewell_present = true
borewell_depth = 60.0
borewell_condition = "partially_dead"
"#;

    fn site_file(mode: &str, extra: &str, table: &str) -> String {
        format!("mode = \"{mode}\"\n{COMMON}{extra}\n{table}")
    }

    #[test]
    fn test_parse_harvesting_site() {
        let site = parse_site(&site_file("harvesting", "", HARVESTING)).unwrap();
        let SiteInput::Harvesting(site) = site else {
            panic!("Expected a harvesting site");
        };
        assert_eq!(site.roof_area, SquareMetres(150.0));
        assert_eq!(site.roof_material, RoofMaterial::Rcc);
        assert!(site.bird_nesting);
        assert_eq!(site.occupants, 4);
        assert_eq!(site.common.soil_type, SoilType::Sandy);
        assert_eq!(site.common.budget, BudgetTier::Medium);
        assert_eq!(site.common.open_space, None);
    }

    #[test]
    fn test_parse_recharge_site() {
        let extra = "open_space_available = true\nopen_space_area = 36.0";
        let site = parse_site(&site_file("recharge", extra, RECHARGE)).unwrap();
        let SiteInput::Recharge(site) = site else {
            panic!("Expected a recharge site");
        };
        assert_eq!(site.catchment_area, SquareMetres(200.0));
        assert_eq!(site.catchment_type, SurfaceType::OpenGround);
        assert_eq!(
            site.borewell,
            Some(Borewell {
                count: 1,
                depth: Metres(60.0),
                condition: BorewellCondition::PartiallyDead
            })
        );
        assert_eq!(site.common.open_space, Some(SquareMetres(36.0)));
    }

    #[rstest]
    #[case("11000")]
    #[case("1100011")]
    #[case("011001")]
    #[case("11A001")]
    fn test_check_pincode_invalid(#[case] pincode: &str) {
        assert!(check_pincode(pincode).is_err());
    }

    #[test]
    fn test_open_space_area_required() {
        let contents = site_file("harvesting", "open_space_available = true", HARVESTING);
        assert_error!(
            parse_site(&contents),
            "open_space_area must be given when open_space_available is true"
        );
    }

    #[test]
    fn test_open_space_area_positive() {
        let extra = "open_space_available = true\nopen_space_area = 0.0";
        assert_error!(
            parse_site(&site_file("harvesting", extra, HARVESTING)),
            "open_space_area must be a number greater than zero"
        );
    }

    #[test]
    fn test_borewell_condition_required() {
        let table = RECHARGE.replace("borewell_condition = \"partially_dead\"\n", "");
        assert_error!(
            parse_site(&site_file("recharge", "", &table)),
            "borewell_condition must be given when borewell_present is true"
        );
    }

    #[test]
    fn test_borewell_depth_required() {
        let table = RECHARGE.replace("borewell_depth = 60.0\n", "");
        assert_error!(
            parse_site(&site_file("recharge", "", &table)),
            "borewell_depth must be given when borewell_present is true"
        );
    }

    #[test]
    fn test_missing_mode_table() {
        assert_error!(
            parse_site(&site_file("recharge", "", HARVESTING)),
            "A [harvesting] table was given but mode is \"recharge\""
        );
        assert_error!(
            parse_site(&site_file("harvesting", "", "")),
            "Missing [harvesting] table for mode \"harvesting\""
        );
    }

    #[test]
    fn test_zero_occupants() {
        let table = HARVESTING.replace("occupants = 4", "occupants = 0");
        assert_error!(
            parse_site(&site_file("harvesting", "", &table)),
            "occupants must be at least 1"
        );
    }

    #[test]
    fn test_read_site() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("site.toml");
        fs::write(&file_path, site_file("harvesting", "", HARVESTING)).unwrap();
        assert_eq!(read_site(&file_path).unwrap().mode(), CalculationMode::Harvesting);

        let table = HARVESTING.replace("roof_area = 150.0", "roof_area = -5.0");
        fs::write(&file_path, site_file("harvesting", "", &table)).unwrap();
        let err = read_site(&file_path).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Invalid site description in {}", file_path.display())
        );
        assert_eq!(
            err.root_cause().to_string(),
            "roof_area must be a number greater than zero"
        );
    }
}
