//! The calculation engine, which runs the full pipeline for a site.
//!
//! Stages always run in the same order: potential, demand (harvesting only), sizing, cost and
//! feasibility. Each stage only reads the outputs of earlier stages.
use crate::city::{City, CityLookup};
use crate::demand::{annual_demand, coverage_percentage};
use crate::feasibility::{assess_harvesting, assess_recharge};
use crate::finance::{
    annual_savings, groundwater_benefit, harvesting_cost_estimate, recharge_cost_estimate,
};
use crate::potential::{harvesting_potential, recharge_potential};
use crate::reference::ReferenceData;
use crate::result::{CalculationResult, HarvestingDesign, RechargeDesign, SystemDesign};
use crate::site::{HarvestingSite, RechargeSite, SiteInput};
use crate::sizing::{borewell_recharge, first_flush_volume, size_pit, size_tank, size_trenches};
use anyhow::Result;
use log::debug;

/// Calculates designs for sites using a fixed set of reference data
#[derive(Debug, Clone)]
pub struct Engine {
    reference: ReferenceData,
}

impl Engine {
    /// Create an engine which uses the given reference data
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Design a system for a validated site.
    ///
    /// The same site and reference data always give the same result.
    ///
    /// # Returns
    ///
    /// The result, or an error if the reference city table is empty.
    pub fn calculate(&self, site: &SiteInput) -> Result<CalculationResult> {
        let common = site.common();
        let city = self
            .reference
            .cities
            .resolve(&common.location, &common.pincode)?;
        debug!(
            "Calculating {} design for '{}' using reference data for {}",
            site.mode(),
            common.name,
            city.name
        );

        let result = match site {
            SiteInput::Harvesting(site) => self.calculate_harvesting(site, city),
            SiteInput::Recharge(site) => self.calculate_recharge(site, city),
        };

        Ok(result)
    }

    fn calculate_harvesting(&self, site: &HarvestingSite, city: &City) -> CalculationResult {
        let coefficients = &self.reference.coefficients;

        let potential = harvesting_potential(site, city, coefficients);
        debug!("Harvesting potential: {} L a year", potential.annual);

        let annual_demand = annual_demand(site, coefficients);
        let coverage_percentage = coverage_percentage(potential.annual, annual_demand);
        debug!("Annual demand: {annual_demand} L ({coverage_percentage:.1}% covered)");

        let tank = size_tank(&potential, annual_demand);
        debug!("Tank capacity: {} L", tank.capacity);

        let annual_savings = annual_savings(
            site,
            potential.annual,
            annual_demand,
            tank.capacity,
            coefficients,
        );
        let cost = harvesting_cost_estimate(site, tank.capacity, annual_savings, coefficients);
        let feasibility = assess_harvesting(site, city, coverage_percentage, coefficients);

        let design = HarvestingDesign {
            annual_demand,
            coverage_percentage,
            first_flush_volume: first_flush_volume(site.roof_area),
            tank,
            annual_savings,
        };

        CalculationResult {
            site_name: site.common.name.clone(),
            city: city.name.clone(),
            state: city.state.clone(),
            monthly_rainfall: city.monthly_rainfall,
            potential,
            design: SystemDesign::Harvesting(design),
            budget: site.common.budget,
            cost,
            feasibility,
        }
    }

    fn calculate_recharge(&self, site: &RechargeSite, city: &City) -> CalculationResult {
        let coefficients = &self.reference.coefficients;
        let common = &site.common;

        let potential = recharge_potential(site, city, coefficients);
        let recharge_volume = potential.annual;
        debug!("Recharge potential: {recharge_volume} L a year");

        let infiltration_rate = coefficients.infiltration_rates.get(common.soil_type);
        let pit = size_pit(recharge_volume, infiltration_rate, common.groundwater_depth);
        let trench = common.open_space.map(|open_space| {
            size_trenches(
                recharge_volume,
                infiltration_rate,
                common.groundwater_depth,
                open_space,
            )
        });
        let borewell = site.borewell.as_ref().map(borewell_recharge);
        debug!("Recharge pit side: {} m", pit.side);

        let cost = recharge_cost_estimate(site, coefficients);
        let feasibility = assess_recharge(site, city);

        let aquifer_type = site
            .aquifer_type
            .clone()
            .unwrap_or_else(|| city.aquifer_type.clone());

        let design = RechargeDesign {
            recharge_volume,
            pit,
            trench,
            borewell,
            aquifer_type,
            groundwater_benefit: groundwater_benefit(recharge_volume),
        };

        CalculationResult {
            site_name: common.name.clone(),
            city: city.name.clone(),
            state: city.state.clone(),
            monthly_rainfall: city.monthly_rainfall,
            potential,
            design: SystemDesign::Recharge(design),
            budget: common.budget,
            cost,
            feasibility,
        }
    }
}
