//! Estimation of a household's annual water demand, used when sizing harvesting systems.
use crate::coefficients::CoefficientTable;
use crate::month::MONTHS;
use crate::site::{HarvestingSite, WaterPurpose};
use crate::units::Litres;

/// How much more water a purpose needs per person compared to domestic use
pub fn purpose_factor(purpose: WaterPurpose) -> f64 {
    match purpose {
        WaterPurpose::Domestic => 1.0,
        WaterPurpose::Irrigation => 1.8,
        WaterPurpose::Industrial => 2.3,
    }
}

/// Estimate the water demand of a harvesting site over a year.
///
/// Demand for each month is the daily per-person consumption scaled by the number of occupants,
/// the purpose factor and that month's seasonal demand multiplier. The total is rounded to the
/// nearest litre.
pub fn annual_demand(site: &HarvestingSite, coefficients: &CoefficientTable) -> Litres {
    let multipliers = coefficients.advanced.demand_multipliers.get(site.purpose);
    let daily = coefficients.daily_consumption_per_person
        * f64::from(site.occupants)
        * purpose_factor(site.purpose);

    let total: Litres = MONTHS
        .iter()
        .map(|month| daily * f64::from(month.days()) * multipliers[month.index()])
        .sum();

    total.round()
}

/// The percentage of demand which the potential could meet, limited to the range 0 to 100
pub fn coverage_percentage(potential: Litres, demand: Litres) -> f64 {
    let demand = demand.max(Litres(1.0));
    (potential / demand * 100.0).clamp(0.0, 100.0)
}
