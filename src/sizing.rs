//! Sizing of storage tanks and recharge structures.
//!
//! All sizing uses closed-form rules of thumb. Harvesting sites get a cylindrical storage tank;
//! recharge sites get a pit, optionally trenches (if there is open space) and, where a borewell is
//! present, an estimate of how much water can be fed back into it.
use crate::month::{MONTHS, Monthly};
use crate::potential::Potential;
use crate::site::{Borewell, BorewellCondition};
use crate::units::{
    CubicMetres, Litres, LitresPerHour, Metres, Millimetres, MillimetresPerHour, SquareMetres,
};
use std::f64::consts::PI;

/// Smallest tank which will be recommended
pub const MIN_TANK_CAPACITY: Litres = Litres(3000.0);
/// Upper limit on storage for the monsoon surplus
const MAX_MONSOON_STORAGE: Litres = Litres(20000.0);
/// Number of days of average demand the tank should hold
const DEMAND_STORAGE_DAYS: f64 = 45.0;
/// Share of the annual potential the tank should hold
const POTENTIAL_STORAGE_SHARE: f64 = 0.25;
/// Share of the worst dry-period deficit the tank should hold
const DRY_PERIOD_STORAGE_SHARE: f64 = 0.8;
/// Depth of rain diverted away from the tank at the start of each shower
const FIRST_FLUSH_DEPTH: Millimetres = Millimetres(2.0);

/// Effective rainy days per year over which recharge water arrives
const RAINY_DAYS: f64 = 120.0;
/// Hours per day during which a recharge structure is infiltrating
const INFILTRATION_HOURS: f64 = 8.0;
/// Smallest pit footprint
const MIN_PIT_FOOTPRINT: SquareMetres = SquareMetres(9.0);
/// Smallest pit side length
const MIN_PIT_SIDE: Metres = Metres(3.0);
/// Width of a recharge trench
const TRENCH_WIDTH: Metres = Metres(0.5);
/// Deepest a recharge trench is dug
const MAX_TRENCH_DEPTH: Metres = Metres(1.5);
/// Recharge rate of a borewell 30 m deep in working condition
const BOREWELL_BASE_RATE: LitresPerHour = LitresPerHour(2000.0);

/// Dimensions of a cylindrical storage tank
#[derive(PartialEq, Debug, Clone)]
pub struct TankDesign {
    /// Volume of the tank
    pub capacity: Litres,
    /// Height of the tank
    pub height: Metres,
    /// Internal diameter of the tank
    pub diameter: Metres,
}

/// The worst cumulative shortfall of supply against a flat monthly demand.
///
/// The running deficit never falls below zero, so a wet month clears earlier shortfalls rather
/// than building up credit.
fn max_dry_period_deficit(monthly: &Monthly<Litres>, monthly_demand: Litres) -> Litres {
    let mut deficit = Litres(0.0);
    let mut max_deficit = Litres(0.0);
    for potential in monthly {
        deficit = (deficit + monthly_demand - *potential).max(Litres(0.0));
        max_deficit = max_deficit.max(deficit);
    }

    max_deficit
}

/// Total excess of supply over a flat monthly demand during the monsoon months
fn monsoon_surplus(monthly: &Monthly<Litres>, monthly_demand: Litres) -> Litres {
    MONTHS
        .iter()
        .filter(|month| month.is_monsoon())
        .map(|month| (monthly[month.index()] - monthly_demand).max(Litres(0.0)))
        .sum()
}

/// Choose the height of a tank from its volume
fn tank_height(capacity: Litres) -> Metres {
    let volume = capacity.to_cubic_metres();
    if volume <= CubicMetres(8.0) {
        Metres(2.0)
    } else if volume <= CubicMetres(20.0) {
        Metres(2.5)
    } else {
        Metres(3.0)
    }
}

/// Size a storage tank for a harvesting site.
///
/// Four candidate capacities are considered:
///
/// * enough for 45 days of average demand
/// * a quarter of the annual potential
/// * most of the worst dry-period deficit
/// * the monsoon surplus (limited to 20,000 litres)
///
/// The smaller of the first two is taken, raised to cover the dry-period candidate and then
/// limited by the monsoon surplus. The result is never less than [`MIN_TANK_CAPACITY`].
pub fn size_tank(potential: &Potential, annual_demand: Litres) -> TankDesign {
    let monthly_demand = annual_demand / 12.0;
    let demand_based = annual_demand / 365.0 * DEMAND_STORAGE_DAYS;
    let potential_based = potential.annual * POTENTIAL_STORAGE_SHARE;
    let dry_period_based =
        max_dry_period_deficit(&potential.monthly, monthly_demand) * DRY_PERIOD_STORAGE_SHARE;
    let monsoon_based =
        monsoon_surplus(&potential.monthly, monthly_demand).min(MAX_MONSOON_STORAGE);

    let capacity = demand_based
        .min(potential_based)
        .max(dry_period_based)
        .min(monsoon_based)
        .max(MIN_TANK_CAPACITY)
        .round();

    let height = tank_height(capacity);
    let area = capacity.to_cubic_metres().value() / height.value();
    let diameter = Metres((4.0 * area / PI).sqrt());

    TankDesign {
        capacity,
        height,
        diameter,
    }
}

/// The volume diverted by a first-flush device on a roof of the given area
pub fn first_flush_volume(roof_area: SquareMetres) -> Litres {
    roof_area * FIRST_FLUSH_DEPTH
}

/// Dimensions of a square recharge pit
#[derive(PartialEq, Debug, Clone)]
pub struct PitDesign {
    /// Infiltration area needed to absorb the daily inflow
    pub footprint: SquareMetres,
    /// Length of each side of the pit
    pub side: Metres,
    /// Depth of the pit
    pub depth: Metres,
}

impl PitDesign {
    /// The excavated volume of the pit
    pub fn volume(&self) -> CubicMetres {
        self.depth * self.side.squared()
    }
}

/// Dimensions of a set of recharge trenches
#[derive(PartialEq, Debug, Clone)]
pub struct TrenchDesign {
    /// Width of each trench
    pub width: Metres,
    /// Depth of each trench
    pub depth: Metres,
    /// Length of each trench
    pub length: Metres,
    /// Number of trenches
    pub count: u32,
    /// Combined length of all trenches
    pub total_length: Metres,
}

/// The infiltration area needed to absorb the recharge volume, subject to a minimum of 9 m².
///
/// The annual volume is assumed to arrive over [`RAINY_DAYS`] days and soak in over
/// [`INFILTRATION_HOURS`] hours a day.
pub fn required_infiltration_area(
    recharge_volume: Litres,
    infiltration_rate: MillimetresPerHour,
) -> SquareMetres {
    let daily_inflow = recharge_volume / RAINY_DAYS;

    // Litres absorbed by each square metre in a day
    let daily_infiltration = infiltration_rate.value() * INFILTRATION_HOURS;

    SquareMetres(daily_inflow.value() / daily_infiltration).max(MIN_PIT_FOOTPRINT)
}

/// Size a recharge pit
pub fn size_pit(
    recharge_volume: Litres,
    infiltration_rate: MillimetresPerHour,
    groundwater_depth: Metres,
) -> PitDesign {
    let footprint = required_infiltration_area(recharge_volume, infiltration_rate);
    let depth = Metres((0.3 * groundwater_depth.value()).clamp(2.0, 4.0));
    let side = Metres(footprint.value().sqrt().ceil()).max(MIN_PIT_SIDE);

    PitDesign {
        footprint,
        side,
        depth,
    }
}

/// Size trenches to fit within the given open space.
///
/// The total trench length provides the same infiltration area as [`size_pit`] requires. No
/// trench may be longer than 80% of the side of a square with the open space's area.
pub fn size_trenches(
    recharge_volume: Litres,
    infiltration_rate: MillimetresPerHour,
    groundwater_depth: Metres,
    open_space: SquareMetres,
) -> TrenchDesign {
    let area = required_infiltration_area(recharge_volume, infiltration_rate);
    let total_length = Metres(area.value() / TRENCH_WIDTH.value());
    let max_length = Metres(open_space.value().sqrt() * 0.8);
    let count = (total_length / max_length).ceil().max(1.0) as u32;

    TrenchDesign {
        width: TRENCH_WIDTH,
        depth: (groundwater_depth * 0.15).min(MAX_TRENCH_DEPTH),
        length: total_length / f64::from(count),
        count,
        total_length,
    }
}

/// Advice on restoring a borewell's yield
#[derive(PartialEq, Debug, Clone)]
pub struct Rejuvenation {
    /// Whether rejuvenation works are worth carrying out
    pub recommended: bool,
    /// How the borewell should be recharged
    pub method: &'static str,
    /// The expected effect on the borewell
    pub expected_improvement: &'static str,
}

/// Recharge capacity of the borewells on a site
#[derive(PartialEq, Debug, Clone)]
pub struct BorewellRecharge {
    /// Number of borewells
    pub count: u32,
    /// Rate at which water can be fed into a borewell
    pub capacity: LitresPerHour,
    /// What to do to restore yield
    pub rejuvenation: Rejuvenation,
}

/// Fraction of full recharge capacity for a borewell in the given condition
fn condition_factor(condition: BorewellCondition) -> f64 {
    match condition {
        BorewellCondition::Working => 1.0,
        BorewellCondition::PartiallyDead => 0.75,
        BorewellCondition::Dead => 0.6,
    }
}

/// Rejuvenation advice for a borewell in the given condition
pub fn rejuvenation_advice(condition: BorewellCondition) -> Rejuvenation {
    match condition {
        BorewellCondition::Dead => Rejuvenation {
            recommended: true,
            method: "Rejuvenate by direct recharge through a filter chamber built around the \
                borewell casing",
            expected_improvement: "Yield may partly return within two to three monsoons",
        },
        BorewellCondition::PartiallyDead => Rejuvenation {
            recommended: true,
            method: "Build a recharge pit adjacent to the borewell to raise the local water table",
            expected_improvement: "Yield typically improves by 20-40% within one to two monsoons",
        },
        BorewellCondition::Working => Rejuvenation {
            recommended: false,
            method: "Routine preventive recharge to sustain the current yield",
            expected_improvement: "Helps maintain yield through the dry months",
        },
    }
}

/// Estimate how much water can be recharged through the site's borewells
pub fn borewell_recharge(borewell: &Borewell) -> BorewellRecharge {
    let depth_factor = (borewell.depth.value() / 30.0).min(1.5);

    BorewellRecharge {
        count: borewell.count,
        capacity: BOREWELL_BASE_RATE * depth_factor * condition_factor(borewell.condition),
        rejuvenation: rejuvenation_advice(borewell.condition),
    }
}
