//! The outcome of a calculation for one site.
use crate::feasibility::Feasibility;
use crate::finance::CostEstimate;
use crate::month::Monthly;
use crate::potential::Potential;
use crate::site::{BudgetTier, CalculationMode};
use crate::sizing::{BorewellRecharge, PitDesign, TankDesign, TrenchDesign};
use crate::units::{CubicMetres, Litres, Millimetres, Money};

/// Everything calculated for a site
#[derive(PartialEq, Debug, Clone)]
pub struct CalculationResult {
    /// Name of the site
    pub site_name: String,
    /// Name of the city whose reference data was used
    pub city: String,
    /// State the city is in
    pub state: String,
    /// Normal rainfall for each month
    pub monthly_rainfall: Monthly<Millimetres>,
    /// Water available from the catchment
    pub potential: Potential,
    /// The designed system
    pub design: SystemDesign,
    /// The budget tier chosen for the site
    pub budget: BudgetTier,
    /// Costs of the designed system
    pub cost: CostEstimate,
    /// Feasibility verdict, recommendations and warnings
    pub feasibility: Feasibility,
}

impl CalculationResult {
    /// The kind of system which was designed
    pub fn mode(&self) -> CalculationMode {
        match self.design {
            SystemDesign::Harvesting(_) => CalculationMode::Harvesting,
            SystemDesign::Recharge(_) => CalculationMode::Recharge,
        }
    }

    /// Normal rainfall over the year
    pub fn annual_rainfall(&self) -> Millimetres {
        self.monthly_rainfall.iter().copied().sum()
    }

    /// The capital cost at the site's budget tier
    pub fn budget_cost(&self) -> Money {
        self.cost.system_cost.get(self.budget)
    }
}

/// Mode-specific parts of a result
#[derive(PartialEq, Debug, Clone)]
pub enum SystemDesign {
    /// A storage tank fed from a roof
    Harvesting(HarvestingDesign),
    /// Structures which return water to the aquifer
    Recharge(RechargeDesign),
}

/// A rainwater harvesting system
#[derive(PartialEq, Debug, Clone)]
pub struct HarvestingDesign {
    /// Water demand over the year
    pub annual_demand: Litres,
    /// Percentage of demand which the potential could meet, between 0 and 100
    pub coverage_percentage: f64,
    /// Volume diverted by the first-flush device
    pub first_flush_volume: Litres,
    /// The storage tank
    pub tank: TankDesign,
    /// Value of the municipal water replaced each year
    pub annual_savings: Money,
}

/// A groundwater recharge system
#[derive(PartialEq, Debug, Clone)]
pub struct RechargeDesign {
    /// Volume directed into the ground each year
    pub recharge_volume: Litres,
    /// The recharge pit
    pub pit: PitDesign,
    /// Recharge trenches, if the site has open space
    pub trench: Option<TrenchDesign>,
    /// Borewell recharge, if the site has a borewell
    pub borewell: Option<BorewellRecharge>,
    /// The aquifer being recharged, as given for the site or else typical for the city
    pub aquifer_type: String,
    /// Volume returned to the aquifer each year
    pub groundwater_benefit: CubicMetres,
}
