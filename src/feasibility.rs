//! Scoring of how feasible a rainwater system is for a site.
//!
//! Every assessment starts from [`BASE_SCORE`] and adds points for each favourable factor. Each
//! factor also contributes a recommendation (if favourable) or a warning (if not). The final score
//! is limited to 100 and mapped onto a [`FeasibilityLevel`].
use crate::city::City;
use crate::coefficients::CoefficientTable;
use crate::site::{
    BorewellCondition, Environment, HarvestingSite, RechargeSite, RoofMaterial, SoilType,
};
use crate::sizing::rejuvenation_advice;
use crate::units::{Metres, Millimetres};
use strum::Display;

/// The score every site starts from
const BASE_SCORE: u32 = 50;
/// The highest possible score
const MAX_SCORE: u32 = 100;
/// Lowest score for a high level of feasibility
const HIGH_THRESHOLD: u32 = 80;
/// Lowest score for a medium level of feasibility
const MEDIUM_THRESHOLD: u32 = 60;

/// Rainfall above which a site is considered to have high rainfall
const HIGH_RAINFALL: Millimetres = Millimetres(1000.0);
/// Rainfall above which a site is considered to have moderate rainfall
const MODERATE_RAINFALL: Millimetres = Millimetres(600.0);
/// Groundwater shallower than this risks waterlogging
const SHALLOW_GROUNDWATER: Metres = Metres(3.0);
/// Groundwater deeper than this responds slowly to recharge
const DEEP_GROUNDWATER: Metres = Metres(30.0);

/// Overall verdict on a site
#[derive(PartialEq, Eq, Clone, Copy, Debug, Display)]
#[allow(missing_docs)]
pub enum FeasibilityLevel {
    High,
    Medium,
    Low,
}

impl FeasibilityLevel {
    /// The level corresponding to a score
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// The outcome of a feasibility assessment
#[derive(PartialEq, Debug, Clone)]
pub struct Feasibility {
    /// Score between 0 and 100
    pub score: u32,
    /// Verdict derived from the score
    pub level: FeasibilityLevel,
    /// Advice for the owner
    pub recommendations: Vec<String>,
    /// Risks the owner should be aware of
    pub warnings: Vec<String>,
}

/// Running total for an assessment in progress
struct Assessment {
    score: u32,
    recommendations: Vec<String>,
    warnings: Vec<String>,
}

impl Assessment {
    fn new() -> Self {
        Self {
            score: BASE_SCORE,
            recommendations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn add(&mut self, points: u32) {
        self.score += points;
    }

    fn recommend<S: Into<String>>(&mut self, recommendation: S) {
        self.recommendations.push(recommendation.into());
    }

    fn warn<S: Into<String>>(&mut self, warning: S) {
        self.warnings.push(warning.into());
    }

    fn finish(self) -> Feasibility {
        let score = self.score.min(MAX_SCORE);
        Feasibility {
            score,
            level: FeasibilityLevel::from_score(score),
            recommendations: self.recommendations,
            warnings: self.warnings,
        }
    }
}

/// Assess a harvesting system.
///
/// # Arguments
///
/// * `site` - The site being assessed
/// * `city` - The city the site is in
/// * `coverage` - Percentage of annual demand met by the system
/// * `coefficients` - Lifecycle lengths used for maintenance advice
pub fn assess_harvesting(
    site: &HarvestingSite,
    city: &City,
    coverage: f64,
    coefficients: &CoefficientTable,
) -> Feasibility {
    let mut assessment = Assessment::new();

    let rainfall = city.annual_rainfall();
    if rainfall > HIGH_RAINFALL {
        assessment.add(25);
        assessment.recommend(format!(
            "High rainfall ({:.0} mm a year) makes rainwater harvesting very effective",
            rainfall.value()
        ));
    } else if rainfall > MODERATE_RAINFALL {
        assessment.add(15);
        assessment.recommend(format!(
            "Moderate rainfall ({:.0} mm a year): store as much of the monsoon runoff as possible",
            rainfall.value()
        ));
    } else {
        assessment.add(5);
        assessment.warn(format!(
            "Low rainfall ({:.0} mm a year) limits how much water can be harvested",
            rainfall.value()
        ));
    }

    match site.roof_material {
        RoofMaterial::Rcc | RoofMaterial::Gi => {
            assessment.add(20);
            assessment.recommend("The roof material gives clean, high-yield runoff");
        }
        RoofMaterial::Tiles => {
            assessment.add(15);
            assessment.recommend("Clean tiled roofs before the monsoon to reduce debris in runoff");
        }
        RoofMaterial::Asbestos => {
            assessment.add(10);
            assessment.warn(
                "Asbestos roofs can contaminate runoff: use the water for non-potable purposes",
            );
        }
    }

    if coverage > 80.0 {
        assessment.add(10);
        assessment.recommend(format!("The system can meet {coverage:.0}% of annual water demand"));
    } else if coverage > 50.0 {
        assessment.add(7);
        assessment.recommend(format!(
            "The system can meet {coverage:.0}% of annual water demand: plan for another supply \
            in the dry months"
        ));
    } else {
        assessment.add(3);
        assessment.warn(format!("The system can only meet {coverage:.0}% of annual water demand"));
    }

    if site.bird_nesting {
        assessment.warn("Birds nesting on the roof will contaminate runoff: fit guards and mesh");
    }
    if site.environment == Environment::Industrial {
        assessment.warn("Industrial surroundings can pollute runoff: test the water before use");
    }

    assessment.recommend("Install a first-flush diverter to discard the dirtiest runoff");
    assessment.recommend("Purify harvested water before using it for drinking or cooking");

    let lifecycle = &coefficients.advanced.lifecycle;
    assessment.recommend(format!(
        "Replace filter media every {} years and overhaul the pump every {} years",
        lifecycle.filter_life, lifecycle.pump_life
    ));
    assessment.recommend(format!(
        "Budget for replacing the tank after about {} years",
        lifecycle.tank_life
    ));

    assessment.finish()
}

/// Assess a recharge system
pub fn assess_recharge(site: &RechargeSite, city: &City) -> Feasibility {
    let mut assessment = Assessment::new();

    let rainfall = city.annual_rainfall();
    if rainfall > HIGH_RAINFALL {
        assessment.add(20);
        assessment.recommend(format!(
            "High rainfall ({:.0} mm a year) gives plenty of water for recharge",
            rainfall.value()
        ));
    } else if rainfall > MODERATE_RAINFALL {
        assessment.add(12);
        assessment.recommend(format!(
            "Moderate rainfall ({:.0} mm a year) is enough for useful recharge",
            rainfall.value()
        ));
    } else {
        assessment.add(5);
        assessment.warn(format!(
            "Low rainfall ({:.0} mm a year) limits the volume available for recharge",
            rainfall.value()
        ));
    }

    match site.common.soil_type {
        SoilType::Sandy => {
            assessment.add(25);
            assessment.recommend("Sandy soil absorbs water quickly and is ideal for recharge");
        }
        SoilType::Loamy => {
            assessment.add(18);
            assessment.recommend("Loamy soil infiltrates well: keep the pit free of silt");
        }
        SoilType::Clayey => {
            assessment.add(10);
            assessment.warn(
                "Clayey soil infiltrates slowly: fill the pit with graded gravel and consider a \
                recharge shaft",
            );
        }
    }

    let depth = site.common.groundwater_depth;
    if depth <= SHALLOW_GROUNDWATER {
        assessment.add(5);
        assessment.warn(format!(
            "Groundwater is only {:.1} m deep: recharge could cause waterlogging",
            depth.value()
        ));
    } else if depth <= DEEP_GROUNDWATER {
        assessment.add(15);
        assessment.recommend(format!(
            "Groundwater at {:.1} m is at a good depth for recharge",
            depth.value()
        ));
    } else {
        assessment.add(10);
        assessment.warn(format!(
            "Groundwater is {:.1} m deep: it will take several years for the benefit to show",
            depth.value()
        ));
    }

    if let Some(borewell) = &site.borewell {
        assessment.add(if borewell.condition == BorewellCondition::Working {
            10
        } else {
            8
        });
        assessment.recommend("Feed roof runoff into the borewell through a filter chamber");
        assessment.recommend(rejuvenation_advice(borewell.condition).method);
    }

    match site.common.open_space {
        Some(area) => {
            assessment.add(10);
            assessment.recommend(format!(
                "Use the {:.0} m² of open space for recharge trenches",
                area.value()
            ));
        }
        None => assessment.warn("No open space is available, so recharge relies on a single pit"),
    }

    assessment.recommend("Install a silt trap and filter before the recharge structure");

    assessment.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{borewell, city, coefficients, harvesting_site, recharge_site};
    use crate::site::Borewell;
    use crate::units::SquareMetres;
    use rstest::rstest;

    /// Scale the city's rainfall so that it totals `annual`
    fn with_rainfall(mut city: City, annual: f64) -> City {
        let factor = annual / city.annual_rainfall().value();
        city.monthly_rainfall = city.monthly_rainfall.map(|rain| rain * factor);
        city
    }

    #[rstest]
    #[case(0, FeasibilityLevel::Low)]
    #[case(59, FeasibilityLevel::Low)]
    #[case(60, FeasibilityLevel::Medium)]
    #[case(79, FeasibilityLevel::Medium)]
    #[case(80, FeasibilityLevel::High)]
    #[case(100, FeasibilityLevel::High)]
    fn test_level_from_score(#[case] score: u32, #[case] expected: FeasibilityLevel) {
        assert_eq!(FeasibilityLevel::from_score(score), expected);
    }

    #[rstest]
    fn test_assess_harvesting_high(
        harvesting_site: HarvestingSite,
        city: City,
        coefficients: CoefficientTable,
    ) {
        // 50 + 25 + 20 + 10 is over the maximum
        let feasibility = assess_harvesting(&harvesting_site, &city, 85.0, &coefficients);
        assert_eq!(feasibility.score, 100);
        assert_eq!(feasibility.level, FeasibilityLevel::High);
        assert!(feasibility.warnings.is_empty());
        assert!(
            feasibility
                .recommendations
                .iter()
                .any(|r| r.contains("first-flush"))
        );
        assert!(
            feasibility
                .recommendations
                .iter()
                .any(|r| r.contains("every 5 years"))
        );
    }

    #[rstest]
    fn test_assess_harvesting_weak_site(
        mut harvesting_site: HarvestingSite,
        city: City,
        coefficients: CoefficientTable,
    ) {
        harvesting_site.roof_material = RoofMaterial::Asbestos;
        let city = with_rainfall(city, 500.0);

        // 50 + 5 + 10 + 3
        let feasibility = assess_harvesting(&harvesting_site, &city, 20.0, &coefficients);
        assert_eq!(feasibility.score, 68);
        assert_eq!(feasibility.level, FeasibilityLevel::Medium);
        assert_eq!(feasibility.warnings.len(), 3);
    }

    #[rstest]
    #[case(1400.0, 85.0, 100)]
    #[case(800.0, 60.0, 92)]
    #[case(800.0, 40.0, 88)]
    fn test_assess_harvesting_score(
        harvesting_site: HarvestingSite,
        city: City,
        coefficients: CoefficientTable,
        #[case] rainfall: f64,
        #[case] coverage: f64,
        #[case] expected: u32,
    ) {
        let city = with_rainfall(city, rainfall);
        let feasibility = assess_harvesting(&harvesting_site, &city, coverage, &coefficients);
        assert_eq!(feasibility.score, expected);
    }

    #[rstest]
    fn test_harvesting_risk_warnings(
        mut harvesting_site: HarvestingSite,
        city: City,
        coefficients: CoefficientTable,
    ) {
        let feasibility = assess_harvesting(&harvesting_site, &city, 90.0, &coefficients);
        assert!(!feasibility.warnings.iter().any(|w| w.contains("Birds")));

        harvesting_site.bird_nesting = true;
        harvesting_site.environment = Environment::Industrial;
        let feasibility = assess_harvesting(&harvesting_site, &city, 90.0, &coefficients);
        assert!(feasibility.warnings.iter().any(|w| w.contains("Birds")));
        assert!(feasibility.warnings.iter().any(|w| w.contains("Industrial")));
    }

    #[rstest]
    fn test_assess_recharge_high(recharge_site: RechargeSite, city: City) {
        // 50 + 20 + 25 + 15, but there is no open space
        let feasibility = assess_recharge(&recharge_site, &city);
        assert_eq!(feasibility.score, 100);
        assert_eq!(feasibility.level, FeasibilityLevel::High);
        assert_eq!(feasibility.warnings.len(), 1);
        assert!(feasibility.warnings[0].contains("No open space"));
        assert!(
            feasibility
                .recommendations
                .iter()
                .any(|r| r.contains("silt trap"))
        );
    }

    #[rstest]
    #[case(Metres(2.0), 70)]
    #[case(Metres(3.0), 70)]
    #[case(Metres(10.0), 80)]
    #[case(Metres(30.0), 80)]
    #[case(Metres(45.0), 75)]
    fn test_assess_recharge_groundwater_depth(
        mut recharge_site: RechargeSite,
        city: City,
        #[case] depth: Metres,
        #[case] expected: u32,
    ) {
        // 50 + 5 (rainfall) + 10 (clayey) + depth band
        recharge_site.common.soil_type = SoilType::Clayey;
        recharge_site.common.groundwater_depth = depth;
        let city = with_rainfall(city, 500.0);

        let feasibility = assess_recharge(&recharge_site, &city);
        assert_eq!(feasibility.score, expected);
    }

    #[rstest]
    #[case(BorewellCondition::Working, 100)]
    #[case(BorewellCondition::PartiallyDead, 98)]
    #[case(BorewellCondition::Dead, 98)]
    fn test_assess_recharge_borewell(
        mut recharge_site: RechargeSite,
        mut borewell: Borewell,
        city: City,
        #[case] condition: BorewellCondition,
        #[case] expected: u32,
    ) {
        // 50 + 5 (rainfall) + 10 (clayey) + 15 (depth) + 10 (open space) + borewell bonus
        recharge_site.common.soil_type = SoilType::Clayey;
        recharge_site.common.open_space = Some(SquareMetres(50.0));
        borewell.condition = condition;
        recharge_site.borewell = Some(borewell);
        let city = with_rainfall(city, 500.0);

        let feasibility = assess_recharge(&recharge_site, &city);
        assert_eq!(feasibility.score, expected);
        assert!(feasibility.warnings.iter().all(|w| !w.contains("open space")));
        assert!(
            feasibility
                .recommendations
                .iter()
                .any(|r| r.contains("filter chamber"))
        );
    }
}
