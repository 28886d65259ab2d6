//! The coefficient table holds the empirical factors and prices used by the calculation engine.
//!
//! The table is read from `coefficients.toml` (see [`crate::input::coefficients`]). Each group of
//! coefficients is a struct with one field per category, so a table which deserialises
//! successfully always has a value for every category.
use crate::city::ClimaticRegion;
use crate::input::deserialise_proportion;
use crate::month::{Monthly, Season};
use crate::site::{BudgetTier, Environment, RoofMaterial, SoilType, WaterPurpose};
use crate::units::{Litres, MillimetresPerHour, MoneyPerLitre, MoneyPerSquareMetre};
use serde::Deserialize;

/// All the coefficients used by the calculation engine
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct CoefficientTable {
    /// Cost of roof guttering and conveyance per square metre of roof
    pub base_cost_per_sqm: MoneyPerSquareMetre,
    /// Price of municipal water
    pub municipal_water_rate: MoneyPerLitre,
    /// Average daily water consumption per person
    pub daily_consumption_per_person: Litres,
    /// Fraction of rainfall which runs off each roof material
    pub runoff_coefficients: RunoffCoefficients,
    /// How quickly each soil type absorbs water
    pub infiltration_rates: InfiltrationRates,
    /// Cost multipliers for each budget tier
    pub budget_multipliers: BudgetMultipliers,
    /// Further adjustment factors
    pub advanced: AdvancedFactors,
}

/// Fraction of rainfall which runs off each roof material
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct RunoffCoefficients {
    #[serde(deserialize_with = "deserialise_proportion")]
    pub rcc: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub gi: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub asbestos: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub tiles: f64,
}

impl RunoffCoefficients {
    /// The runoff coefficient for the given roof material
    pub fn get(&self, material: RoofMaterial) -> f64 {
        match material {
            RoofMaterial::Rcc => self.rcc,
            RoofMaterial::Gi => self.gi,
            RoofMaterial::Asbestos => self.asbestos,
            RoofMaterial::Tiles => self.tiles,
        }
    }
}

/// Infiltration rate of each soil type
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct InfiltrationRates {
    pub sandy: MillimetresPerHour,
    pub loamy: MillimetresPerHour,
    pub clayey: MillimetresPerHour,
}

impl InfiltrationRates {
    /// The infiltration rate for the given soil type
    pub fn get(&self, soil: SoilType) -> MillimetresPerHour {
        match soil {
            SoilType::Sandy => self.sandy,
            SoilType::Loamy => self.loamy,
            SoilType::Clayey => self.clayey,
        }
    }
}

/// Multipliers applied to the base system cost for each budget tier
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct BudgetMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl BudgetMultipliers {
    /// The multiplier for the given budget tier
    pub fn get(&self, tier: BudgetTier) -> f64 {
        match tier {
            BudgetTier::Low => self.low,
            BudgetTier::Medium => self.medium,
            BudgetTier::High => self.high,
        }
    }
}

/// Adjustment factors for losses, water quality, seasons, demand and maintenance
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct AdvancedFactors {
    pub evaporation_loss: EvaporationLoss,
    pub quality_factors: QualityFactors,
    pub seasonal_factors: SeasonalFactors,
    pub demand_multipliers: DemandMultipliers,
    pub maintenance: MaintenanceFractions,
    pub lifecycle: Lifecycle,
}

/// Fraction of captured water lost to evaporation in each climatic region
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct EvaporationLoss {
    #[serde(deserialize_with = "deserialise_proportion")]
    pub north: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub south: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub east: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub west: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub central: f64,
    #[serde(deserialize_with = "deserialise_proportion")]
    pub northeast: f64,
}

impl EvaporationLoss {
    /// The evaporation loss for the given region
    pub fn get(&self, region: ClimaticRegion) -> f64 {
        match region {
            ClimaticRegion::North => self.north,
            ClimaticRegion::South => self.south,
            ClimaticRegion::East => self.east,
            ClimaticRegion::West => self.west,
            ClimaticRegion::Central => self.central,
            ClimaticRegion::Northeast => self.northeast,
        }
    }
}

/// Multipliers for the usable fraction of runoff, depending on contamination sources
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct QualityFactors {
    /// Residential surroundings
    #[serde(deserialize_with = "deserialise_proportion")]
    pub residential: f64,
    /// Industrial surroundings
    #[serde(deserialize_with = "deserialise_proportion")]
    pub industrial: f64,
    /// Agricultural surroundings
    #[serde(deserialize_with = "deserialise_proportion")]
    pub agricultural: f64,
    /// Applied on top of the environment factor if birds nest on the roof
    #[serde(deserialize_with = "deserialise_proportion")]
    pub bird_nesting: f64,
}

impl QualityFactors {
    /// The quality factor for the given surroundings
    pub fn environment(&self, environment: Environment) -> f64 {
        match environment {
            Environment::Residential => self.residential,
            Environment::Industrial => self.industrial,
            Environment::Agricultural => self.agricultural,
        }
    }
}

/// Multipliers reflecting how effectively rain is captured in each season
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct SeasonalFactors {
    pub pre_monsoon: f64,
    pub monsoon: f64,
    pub post_monsoon: f64,
    pub winter: f64,
}

impl SeasonalFactors {
    /// The factor for the given season
    pub fn get(&self, season: Season) -> f64 {
        match season {
            Season::PreMonsoon => self.pre_monsoon,
            Season::Monsoon => self.monsoon,
            Season::PostMonsoon => self.post_monsoon,
            Season::Winter => self.winter,
        }
    }
}

/// How demand for each purpose varies over the year
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct DemandMultipliers {
    pub domestic: Monthly<f64>,
    pub irrigation: Monthly<f64>,
    pub industrial: Monthly<f64>,
}

impl DemandMultipliers {
    /// The monthly multipliers for the given purpose
    pub fn get(&self, purpose: WaterPurpose) -> &Monthly<f64> {
        match purpose {
            WaterPurpose::Domestic => &self.domestic,
            WaterPurpose::Irrigation => &self.irrigation,
            WaterPurpose::Industrial => &self.industrial,
        }
    }
}

/// Annual maintenance cost as a fraction of the capital cost
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct MaintenanceFractions {
    /// For harvesting systems (tank, pump and filters)
    #[serde(deserialize_with = "deserialise_proportion")]
    pub harvesting: f64,
    /// For recharge structures (desilting, filter media)
    #[serde(deserialize_with = "deserialise_proportion")]
    pub recharge: f64,
}

/// Expected service life of the system and its components, in years
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct Lifecycle {
    pub system_life: u32,
    pub tank_life: u32,
    pub pump_life: u32,
    pub filter_life: u32,
}
