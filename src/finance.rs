//! Cost estimates and financial returns for rainwater systems.
use crate::coefficients::{BudgetMultipliers, CoefficientTable};
use crate::site::{
    BudgetTier, Environment, HarvestingSite, RechargeSite, RoofMaterial, WaterPurpose,
};
use crate::units::{CubicMetres, Litres, Money, MoneyPerLitre, MoneyPerSquareMetre, Years};

/// Tanks larger than this are charged at the bulk rate
const BULK_TANK_THRESHOLD: Litres = Litres(10000.0);
/// Cost per litre of tank capacity for large tanks
const BULK_TANK_RATE: MoneyPerLitre = MoneyPerLitre(0.75);
/// Cost per litre of tank capacity for smaller tanks
const TANK_RATE: MoneyPerLitre = MoneyPerLitre(0.85);
/// Tanks larger than this need the larger pump
const LARGE_PUMP_THRESHOLD: Litres = Litres(5000.0);
const SMALL_PUMP_COST: Money = Money(4500.0);
const LARGE_PUMP_COST: Money = Money(8000.0);
/// Basic filter for non-potable use
const BASIC_FILTRATION_COST: Money = Money(5000.0);
/// Multi-stage filter for domestic use
const DOMESTIC_FILTRATION_COST: Money = Money(12000.0);
/// Longest payback period reported for harvesting systems
const MAX_HARVESTING_PAYBACK: Years = Years(25.0);

/// Efficiency of a typical system before adjustments
const BASE_EFFICIENCY: f64 = 0.85;
/// Highest efficiency any system can reach
const MAX_EFFICIENCY: f64 = 0.95;

/// Cost per square metre of recharge catchment
const RECHARGE_CATCHMENT_COST: MoneyPerSquareMetre = MoneyPerSquareMetre(250.0);
const RECHARGE_PIT_COST: Money = Money(45000.0);
/// Cost per square metre of open space given over to trenches
const TRENCH_COST: MoneyPerSquareMetre = MoneyPerSquareMetre(150.0);
const BOREWELL_SETUP_COST: Money = Money(35000.0);
/// Assumed annual value of reliable groundwater access with a borewell
const BOREWELL_ACCESS_VALUE: Money = Money(12000.0);
/// Assumed annual value of reliable groundwater access without a borewell
const GROUNDWATER_ACCESS_VALUE: Money = Money(5000.0);
/// Longest payback period reported for recharge systems
const MAX_RECHARGE_PAYBACK: Years = Years(30.0);

/// Capital cost of a system at each budget tier
#[derive(PartialEq, Debug, Clone)]
pub struct SystemCost {
    /// Cost with basic materials
    pub low: Money,
    /// Cost with standard materials
    pub medium: Money,
    /// Cost with premium materials
    pub high: Money,
}

impl SystemCost {
    /// Apply the budget multipliers to a base cost
    fn from_base(base: Money, multipliers: &BudgetMultipliers) -> Self {
        Self {
            low: base * multipliers.low,
            medium: base * multipliers.medium,
            high: base * multipliers.high,
        }
    }

    /// The cost for the given budget tier
    pub fn get(&self, tier: BudgetTier) -> Money {
        match tier {
            BudgetTier::Low => self.low,
            BudgetTier::Medium => self.medium,
            BudgetTier::High => self.high,
        }
    }
}

/// Costs of building and running a system over its life
#[derive(PartialEq, Debug, Clone)]
pub struct CostEstimate {
    /// Capital cost at each budget tier
    pub system_cost: SystemCost,
    /// Yearly upkeep
    pub annual_maintenance: Money,
    /// Medium-tier capital cost plus maintenance over the life of the system
    pub lifecycle_cost: Money,
    /// Years for the annual return to cover the medium-tier capital cost
    pub payback_period: Years,
}

/// Years to recover `cost` from `annual_return`, up to `max`.
///
/// Returns smaller than one unit of money are treated as one unit, so the result is always finite.
fn payback_period(cost: Money, annual_return: Money, max: Years) -> Years {
    Years(cost / annual_return.max(Money(1.0))).min(max)
}

/// Build a cost estimate from the base capital cost.
///
/// # Arguments
///
/// * `base` - Capital cost before budget multipliers
/// * `maintenance_fraction` - Share of the capital cost spent on upkeep each year
/// * `annual_return` - Yearly value used for the payback period, given the annual maintenance cost
/// * `max_payback` - Longest payback period to report
/// * `coefficients` - Budget multipliers and system life
fn cost_estimate(
    base: Money,
    maintenance_fraction: f64,
    annual_return: impl FnOnce(Money) -> Money,
    max_payback: Years,
    coefficients: &CoefficientTable,
) -> CostEstimate {
    let system_cost = SystemCost::from_base(base, &coefficients.budget_multipliers);
    let annual_maintenance = system_cost.medium * maintenance_fraction;
    let system_life = f64::from(coefficients.advanced.lifecycle.system_life);
    let lifecycle_cost = system_cost.medium + annual_maintenance * system_life;
    let payback_period = payback_period(
        system_cost.medium,
        annual_return(annual_maintenance),
        max_payback,
    );

    CostEstimate {
        system_cost,
        annual_maintenance,
        lifecycle_cost,
        payback_period,
    }
}

/// Cost of the filter needed for the site's purpose and surroundings
pub fn filtration_cost(site: &HarvestingSite) -> Money {
    let mut cost = if site.purpose == WaterPurpose::Domestic {
        DOMESTIC_FILTRATION_COST
    } else {
        BASIC_FILTRATION_COST
    };
    if site.environment == Environment::Industrial {
        cost = cost * 1.5;
    }
    if site.bird_nesting {
        cost = cost * 1.2;
    }

    cost
}

/// Cost of a storage tank of the given capacity
fn tank_cost(capacity: Litres) -> Money {
    let rate = if capacity > BULK_TANK_THRESHOLD {
        BULK_TANK_RATE
    } else {
        TANK_RATE
    };

    capacity * rate
}

/// Cost of a pump for a tank of the given capacity
fn pump_cost(capacity: Litres) -> Money {
    if capacity > LARGE_PUMP_THRESHOLD {
        LARGE_PUMP_COST
    } else {
        SMALL_PUMP_COST
    }
}

/// Capital cost of a harvesting system before budget multipliers
pub fn harvesting_base_cost(
    site: &HarvestingSite,
    tank_capacity: Litres,
    coefficients: &CoefficientTable,
) -> Money {
    site.roof_area * coefficients.base_cost_per_sqm
        + tank_cost(tank_capacity)
        + pump_cost(tank_capacity)
        + filtration_cost(site)
}

/// The share of the harvesting potential which actually ends up being used.
///
/// Larger tanks and smoother roofs lose less water to overflow and spillage; contaminated runoff
/// loses more to filtering.
pub fn system_efficiency(site: &HarvestingSite, tank_capacity: Litres) -> f64 {
    let tank_adjustment = if tank_capacity < Litres(5000.0) {
        -0.05
    } else if tank_capacity > Litres(15000.0) {
        0.05
    } else {
        0.0
    };
    let roof_adjustment = match site.roof_material {
        RoofMaterial::Rcc => 0.05,
        RoofMaterial::Gi => 0.03,
        RoofMaterial::Tiles => 0.0,
        RoofMaterial::Asbestos => -0.05,
    };

    let mut efficiency = BASE_EFFICIENCY + tank_adjustment + roof_adjustment;
    if site.environment == Environment::Industrial {
        efficiency -= 0.05;
    }
    if site.bird_nesting {
        efficiency -= 0.03;
    }

    efficiency.clamp(0.0, MAX_EFFICIENCY)
}

/// Value of the municipal water a harvesting system replaces in a year.
///
/// Water used for domestic purposes attracts a premium for the treated water it displaces.
pub fn annual_savings(
    site: &HarvestingSite,
    annual_potential: Litres,
    annual_demand: Litres,
    tank_capacity: Litres,
    coefficients: &CoefficientTable,
) -> Money {
    let usable = (annual_potential * system_efficiency(site, tank_capacity)).min(annual_demand);
    let premium = if site.purpose == WaterPurpose::Domestic {
        MoneyPerLitre(0.015)
    } else {
        MoneyPerLitre(0.005)
    };

    usable * (coefficients.municipal_water_rate + premium)
}

/// Estimate the costs of a harvesting system
pub fn harvesting_cost_estimate(
    site: &HarvestingSite,
    tank_capacity: Litres,
    annual_savings: Money,
    coefficients: &CoefficientTable,
) -> CostEstimate {
    cost_estimate(
        harvesting_base_cost(site, tank_capacity, coefficients),
        coefficients.advanced.maintenance.harvesting,
        |maintenance| annual_savings - maintenance,
        MAX_HARVESTING_PAYBACK,
        coefficients,
    )
}

/// Capital cost of a recharge system before budget multipliers
pub fn recharge_base_cost(site: &RechargeSite) -> Money {
    let mut cost = site.catchment_area * RECHARGE_CATCHMENT_COST + RECHARGE_PIT_COST;
    if let Some(open_space) = site.common.open_space {
        cost += open_space * TRENCH_COST;
    }
    if site.borewell.is_some() {
        cost += BOREWELL_SETUP_COST;
    }

    cost
}

/// Estimate the costs of a recharge system.
///
/// Recharge produces no direct savings, so the payback period is measured against an assumed
/// value of sustained access to groundwater.
pub fn recharge_cost_estimate(
    site: &RechargeSite,
    coefficients: &CoefficientTable,
) -> CostEstimate {
    let access_value = if site.borewell.is_some() {
        BOREWELL_ACCESS_VALUE
    } else {
        GROUNDWATER_ACCESS_VALUE
    };

    cost_estimate(
        recharge_base_cost(site),
        coefficients.advanced.maintenance.recharge,
        |_| access_value,
        MAX_RECHARGE_PAYBACK,
        coefficients,
    )
}

/// Volume returned to the aquifer each year
pub fn groundwater_benefit(recharge_volume: Litres) -> CubicMetres {
    recharge_volume.to_cubic_metres()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{borewell, coefficients, harvesting_site, recharge_site};
    use crate::site::Borewell;
    use crate::units::SquareMetres;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Money(1000.0), Money(100.0), Years(10.0))]
    #[case(Money(1000.0), Money(10.0), Years(25.0))]
    #[case(Money(1000.0), Money(0.0), Years(25.0))]
    #[case(Money(10.0), Money(-50.0), Years(10.0))]
    fn test_payback_period(
        #[case] cost: Money,
        #[case] annual_return: Money,
        #[case] expected: Years,
    ) {
        assert_eq!(
            payback_period(cost, annual_return, MAX_HARVESTING_PAYBACK),
            expected
        );
    }

    #[rstest]
    #[case(WaterPurpose::Domestic, Environment::Residential, false, 12000.0)]
    #[case(WaterPurpose::Irrigation, Environment::Residential, false, 5000.0)]
    #[case(WaterPurpose::Irrigation, Environment::Industrial, false, 7500.0)]
    #[case(WaterPurpose::Domestic, Environment::Industrial, true, 12000.0 * 1.5 * 1.2)]
    fn test_filtration_cost(
        mut harvesting_site: HarvestingSite,
        #[case] purpose: WaterPurpose,
        #[case] environment: Environment,
        #[case] bird_nesting: bool,
        #[case] expected: f64,
    ) {
        harvesting_site.purpose = purpose;
        harvesting_site.environment = environment;
        harvesting_site.bird_nesting = bird_nesting;
        assert_approx_eq!(Money, filtration_cost(&harvesting_site), Money(expected));
    }

    #[rstest]
    #[case(Litres(3000.0), Money(3000.0 * 0.85 + 4500.0))]
    #[case(Litres(8000.0), Money(8000.0 * 0.85 + 8000.0))]
    #[case(Litres(20000.0), Money(20000.0 * 0.75 + 8000.0))]
    fn test_tank_and_pump_cost(#[case] capacity: Litres, #[case] expected: Money) {
        assert_approx_eq!(Money, tank_cost(capacity) + pump_cost(capacity), expected);
    }

    #[rstest]
    fn test_harvesting_base_cost(harvesting_site: HarvestingSite, coefficients: CoefficientTable) {
        // Roof: 150 × 150, tank: 15,000, pump: 8000, filtration: 12,000
        assert_approx_eq!(
            Money,
            harvesting_base_cost(&harvesting_site, Litres(20000.0), &coefficients),
            Money(57500.0)
        );
    }

    #[rstest]
    #[case(RoofMaterial::Rcc, Litres(20000.0), false, Environment::Residential, 0.95)]
    #[case(RoofMaterial::Gi, Litres(10000.0), false, Environment::Residential, 0.88)]
    #[case(RoofMaterial::Tiles, Litres(3000.0), false, Environment::Residential, 0.80)]
    #[case(RoofMaterial::Asbestos, Litres(3000.0), true, Environment::Industrial, 0.67)]
    fn test_system_efficiency(
        mut harvesting_site: HarvestingSite,
        #[case] roof_material: RoofMaterial,
        #[case] tank_capacity: Litres,
        #[case] bird_nesting: bool,
        #[case] environment: Environment,
        #[case] expected: f64,
    ) {
        harvesting_site.roof_material = roof_material;
        harvesting_site.bird_nesting = bird_nesting;
        harvesting_site.environment = environment;
        assert_approx_eq!(
            f64,
            system_efficiency(&harvesting_site, tank_capacity),
            expected,
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn test_annual_savings(harvesting_site: HarvestingSite, coefficients: CoefficientTable) {
        // Efficiency is 0.95, so 95,000 L is used, at 0.02 + 0.015 per litre
        let savings = annual_savings(
            &harvesting_site,
            Litres(100000.0),
            Litres(200000.0),
            Litres(20000.0),
            &coefficients,
        );
        assert_approx_eq!(Money, savings, Money(3325.0), epsilon = 1e-9);

        // Limited by demand
        let savings = annual_savings(
            &harvesting_site,
            Litres(100000.0),
            Litres(10000.0),
            Litres(20000.0),
            &coefficients,
        );
        assert_approx_eq!(Money, savings, Money(350.0), epsilon = 1e-9);
    }

    #[rstest]
    fn test_harvesting_cost_estimate(
        harvesting_site: HarvestingSite,
        coefficients: CoefficientTable,
    ) {
        let estimate = harvesting_cost_estimate(
            &harvesting_site,
            Litres(20000.0),
            Money(5225.0),
            &coefficients,
        );

        let cost = &estimate.system_cost;
        assert_approx_eq!(Money, cost.medium, Money(57500.0));
        assert_approx_eq!(Money, cost.low, Money(46000.0));
        assert_approx_eq!(Money, cost.high, Money(74750.0));
        assert_eq!(cost.get(BudgetTier::Low), cost.low);
        assert_approx_eq!(Money, estimate.annual_maintenance, Money(1725.0));
        assert_approx_eq!(Money, estimate.lifecycle_cost, Money(92000.0));
        // 57,500 / (5225 - 1725)
        assert_approx_eq!(
            Years,
            estimate.payback_period,
            Years(57500.0 / 3500.0),
            epsilon = 1e-9
        );
    }

    #[rstest]
    fn test_harvesting_payback_capped(
        harvesting_site: HarvestingSite,
        coefficients: CoefficientTable,
    ) {
        let estimate =
            harvesting_cost_estimate(&harvesting_site, Litres(20000.0), Money(0.0), &coefficients);
        assert_eq!(estimate.payback_period, MAX_HARVESTING_PAYBACK);
    }

    #[rstest]
    fn test_recharge_cost_estimate(recharge_site: RechargeSite, coefficients: CoefficientTable) {
        // 200 m² × 250 plus the pit
        let estimate = recharge_cost_estimate(&recharge_site, &coefficients);
        assert_approx_eq!(Money, estimate.system_cost.medium, Money(95000.0));
        assert_approx_eq!(Money, estimate.annual_maintenance, Money(1900.0));
        assert_approx_eq!(Money, estimate.lifecycle_cost, Money(133000.0));
        assert_approx_eq!(Years, estimate.payback_period, Years(19.0));
    }

    #[rstest]
    fn test_recharge_cost_with_extras(
        mut recharge_site: RechargeSite,
        borewell: Borewell,
        coefficients: CoefficientTable,
    ) {
        recharge_site.common.open_space = Some(SquareMetres(100.0));
        recharge_site.borewell = Some(borewell);

        // 50,000 + 45,000 + 15,000 (trenches) + 35,000 (borewell)
        assert_approx_eq!(Money, recharge_base_cost(&recharge_site), Money(145000.0));
        let estimate = recharge_cost_estimate(&recharge_site, &coefficients);
        assert_approx_eq!(
            Years,
            estimate.payback_period,
            Years(145000.0 / 12000.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_groundwater_benefit() {
        assert_eq!(groundwater_benefit(Litres(125000.0)), CubicMetres(125.0));
    }
}
