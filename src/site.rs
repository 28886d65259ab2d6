//! Sites describe the property for which a rainwater system is being designed.
//!
//! A [`SiteInput`] has already been validated (see [`crate::input::site`]); the calculation engine
//! relies on the invariants documented here rather than rechecking them.
use crate::units::{Metres, SquareMetres};
use serde_string_enum::DeserializeLabeledStringEnum;
use std::fmt;

/// Which kind of system is being designed
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
pub enum CalculationMode {
    /// Capture rainwater in a tank for use on site
    #[string = "harvesting"]
    Harvesting,
    /// Direct rainwater into the ground to replenish the aquifer
    #[string = "recharge"]
    Recharge,
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Harvesting => write!(f, "harvesting"),
            Self::Recharge => write!(f, "recharge"),
        }
    }
}

/// The dominant soil type at the site
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
#[allow(missing_docs)]
pub enum SoilType {
    #[string = "sandy"]
    Sandy,
    #[string = "loamy"]
    Loamy,
    #[string = "clayey"]
    Clayey,
}

/// How much the owner is prepared to spend
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
#[allow(missing_docs)]
pub enum BudgetTier {
    #[string = "low"]
    Low,
    #[string = "medium"]
    Medium,
    #[string = "high"]
    High,
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Material of the roof used as a catchment
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
pub enum RoofMaterial {
    /// Reinforced cement concrete
    #[string = "rcc"]
    Rcc,
    /// Galvanised iron sheets
    #[string = "gi"]
    Gi,
    /// Asbestos cement sheets
    #[string = "asbestos"]
    Asbestos,
    /// Clay or concrete tiles
    #[string = "tiles"]
    Tiles,
}

/// The kind of area surrounding the site, which affects the quality of the runoff
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
#[allow(missing_docs)]
pub enum Environment {
    #[string = "residential"]
    Residential,
    #[string = "industrial"]
    Industrial,
    #[string = "agricultural"]
    Agricultural,
}

/// What the harvested water will be used for
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
#[allow(missing_docs)]
pub enum WaterPurpose {
    #[string = "domestic"]
    Domestic,
    #[string = "irrigation"]
    Irrigation,
    #[string = "industrial"]
    Industrial,
}

/// The surface which collects water for recharge
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
#[allow(missing_docs)]
pub enum SurfaceType {
    #[string = "rooftop"]
    Rooftop,
    #[string = "terrace"]
    Terrace,
    #[string = "paved"]
    Paved,
    #[string = "open_ground"]
    OpenGround,
}

/// The current state of a borewell
#[derive(PartialEq, Eq, Clone, Copy, Debug, DeserializeLabeledStringEnum)]
pub enum BorewellCondition {
    /// Yielding normally
    #[string = "working"]
    Working,
    /// Yield has dropped or is seasonal
    #[string = "partially_dead"]
    PartiallyDead,
    /// No longer yields water
    #[string = "dead"]
    Dead,
}

/// Fields shared by both kinds of site
#[derive(PartialEq, Debug, Clone)]
pub struct SiteCommon {
    /// Name of the owner or project
    pub name: String,
    /// Free-text description of where the site is
    pub location: String,
    /// Six-digit postal code
    pub pincode: String,
    /// Dominant soil type
    pub soil_type: SoilType,
    /// Depth to the water table at the site
    pub groundwater_depth: Metres,
    /// The owner's budget
    pub budget: BudgetTier,
    /// Area of open ground available for recharge structures, if any. Always positive.
    pub open_space: Option<SquareMetres>,
}

/// A site for which a rainwater harvesting (storage) system is being designed
#[derive(PartialEq, Debug, Clone)]
pub struct HarvestingSite {
    /// Fields shared with recharge sites
    pub common: SiteCommon,
    /// Plan area of the roof. Always positive.
    pub roof_area: SquareMetres,
    /// What the roof is made of
    pub roof_material: RoofMaterial,
    /// The surrounding environment
    pub environment: Environment,
    /// Whether birds nest on or near the roof
    pub bird_nesting: bool,
    /// Number of people living at the site. At least one.
    pub occupants: u32,
    /// What the water will be used for
    pub purpose: WaterPurpose,
}

/// An existing borewell at a recharge site
#[derive(PartialEq, Debug, Clone)]
pub struct Borewell {
    /// Number of borewells
    pub count: u32,
    /// Depth of the borewell
    pub depth: Metres,
    /// Condition of the borewell
    pub condition: BorewellCondition,
}

/// A site for which a groundwater recharge system is being designed
#[derive(PartialEq, Debug, Clone)]
pub struct RechargeSite {
    /// Fields shared with harvesting sites
    pub common: SiteCommon,
    /// Area draining to the recharge structure. Always positive.
    pub catchment_area: SquareMetres,
    /// The kind of surface draining to the recharge structure
    pub catchment_type: SurfaceType,
    /// An existing borewell, if there is one
    pub borewell: Option<Borewell>,
    /// The aquifer type, if known
    pub aquifer_type: Option<String>,
}

/// A validated site description, ready for calculation
#[derive(PartialEq, Debug, Clone)]
pub enum SiteInput {
    /// A rainwater harvesting site
    Harvesting(HarvestingSite),
    /// A groundwater recharge site
    Recharge(RechargeSite),
}

impl SiteInput {
    /// The fields shared by both kinds of site
    pub fn common(&self) -> &SiteCommon {
        match self {
            Self::Harvesting(site) => &site.common,
            Self::Recharge(site) => &site.common,
        }
    }

    /// Which kind of calculation this site needs
    pub fn mode(&self) -> CalculationMode {
        match self {
            Self::Harvesting(_) => CalculationMode::Harvesting,
            Self::Recharge(_) => CalculationMode::Recharge,
        }
    }
}
