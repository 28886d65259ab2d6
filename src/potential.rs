//! Estimation of the volume of rainwater a site can capture (harvesting) or send into the ground
//! (recharge).
//!
//! Both modes follow the same structure: for each month the rain falling on the catchment is scaled
//! by a runoff coefficient, then by adjustment factors, and then reduced by evaporation losses.
use crate::city::City;
use crate::coefficients::CoefficientTable;
use crate::month::{MONTHS, Monthly};
use crate::site::{HarvestingSite, RechargeSite, SurfaceType};
use crate::units::{Litres, SquareMetres};

/// Recharge water spends less time exposed than stored water, so only this share of the regional
/// evaporation loss applies
const RECHARGE_EVAPORATION_WEIGHT: f64 = 0.5;

/// The volume of water available from a catchment over a typical year
#[derive(PartialEq, Debug, Clone)]
pub struct Potential {
    /// Total over the year. Always equal to the sum of `monthly`.
    pub annual: Litres,
    /// Volume for each month, each rounded to the nearest litre
    pub monthly: Monthly<Litres>,
}

impl Potential {
    /// Create from monthly volumes, rounding each month independently
    fn from_unrounded(monthly: Monthly<Litres>) -> Self {
        let monthly = monthly.map(Litres::round);
        Self {
            annual: monthly.iter().copied().sum(),
            monthly,
        }
    }
}

/// Calculate the potential for a catchment of the given area.
///
/// # Arguments
///
/// * `area` - Area of the catchment
/// * `city` - The city supplying the rainfall data and region
/// * `runoff` - Fraction of rain on the catchment which becomes runoff
/// * `quality` - Multiplier for losses due to contamination
/// * `evaporation_weight` - Share of the regional evaporation loss to apply
/// * `coefficients` - Seasonal and evaporation factors
fn catchment_potential(
    area: SquareMetres,
    city: &City,
    runoff: f64,
    quality: f64,
    evaporation_weight: f64,
    coefficients: &CoefficientTable,
) -> Potential {
    let advanced = &coefficients.advanced;
    let evaporation = advanced.evaporation_loss.get(city.region) * evaporation_weight;

    let monthly = MONTHS.map(|month| {
        let raw = area * city.monthly_rainfall[month.index()] * runoff;
        let adjusted = raw * quality * advanced.seasonal_factors.get(month.season());
        adjusted * (1.0 - evaporation)
    });

    Potential::from_unrounded(monthly)
}

/// The combined quality factor for a harvesting site
pub fn quality_factor(site: &HarvestingSite, coefficients: &CoefficientTable) -> f64 {
    let factors = &coefficients.advanced.quality_factors;
    let nesting = if site.bird_nesting {
        factors.bird_nesting
    } else {
        1.0
    };

    factors.environment(site.environment) * nesting
}

/// Estimate the rainwater which can be harvested from a roof
pub fn harvesting_potential(
    site: &HarvestingSite,
    city: &City,
    coefficients: &CoefficientTable,
) -> Potential {
    catchment_potential(
        site.roof_area,
        city,
        coefficients.runoff_coefficients.get(site.roof_material),
        quality_factor(site, coefficients),
        1.0,
        coefficients,
    )
}

/// The runoff coefficient for a recharge catchment surface
pub fn surface_runoff_coefficient(surface: SurfaceType) -> f64 {
    match surface {
        SurfaceType::Rooftop => 0.85,
        SurfaceType::Terrace => 0.90,
        SurfaceType::Paved => 0.80,
        SurfaceType::OpenGround => 0.20,
    }
}

/// Estimate the volume of water which can be directed into the ground from a catchment
pub fn recharge_potential(
    site: &RechargeSite,
    city: &City,
    coefficients: &CoefficientTable,
) -> Potential {
    catchment_potential(
        site.catchment_area,
        city,
        surface_runoff_coefficient(site.catchment_type),
        1.0,
        RECHARGE_EVAPORATION_WEIGHT,
        coefficients,
    )
}
