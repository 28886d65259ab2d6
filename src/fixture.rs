//! Fixtures for tests

use crate::city::{City, CityMap, ClimaticRegion};
use crate::coefficients::{
    AdvancedFactors, BudgetMultipliers, CoefficientTable, DemandMultipliers, EvaporationLoss,
    InfiltrationRates, Lifecycle, MaintenanceFractions, QualityFactors, RunoffCoefficients,
    SeasonalFactors,
};
use crate::reference::ReferenceData;
use crate::site::{
    Borewell, BorewellCondition, BudgetTier, Environment, HarvestingSite, RechargeSite,
    RoofMaterial, SiteCommon, SoilType, SurfaceType, WaterPurpose,
};
use crate::units::{
    Litres, Metres, Millimetres, MillimetresPerHour, MoneyPerLitre, MoneyPerSquareMetre,
    SquareMetres,
};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Create a city from twelve monthly rainfall values
fn make_city(name: &str, state: &str, prefix: &str, rainfall: [f64; 12]) -> City {
    City {
        name: name.into(),
        state: state.into(),
        pincode_prefix: prefix.into(),
        monthly_rainfall: rainfall.map(Millimetres),
        groundwater_depth: Metres(12.0),
        aquifer_type: "Alluvial".into(),
        region: ClimaticRegion::East,
    }
}

/// A city with 1400 mm of rain a year
#[fixture]
pub fn city() -> City {
    make_city(
        "Testpur",
        "Test Pradesh",
        "123",
        [
            10.0, 15.0, 20.0, 30.0, 60.0, 250.0, 350.0, 330.0, 200.0, 90.0, 30.0, 15.0,
        ],
    )
}

#[fixture]
pub fn cities(city: City) -> CityMap {
    [
        make_city(
            "Delhi",
            "Delhi",
            "110",
            [
                19.0, 20.0, 15.0, 10.0, 28.0, 65.0, 211.0, 248.0, 124.0, 15.0, 4.0, 8.0,
            ],
        ),
        make_city(
            "Chennai",
            "Tamil Nadu",
            "600",
            [
                25.0, 6.0, 4.0, 15.0, 48.0, 54.0, 92.0, 124.0, 119.0, 267.0, 309.0, 137.0,
            ],
        ),
        city,
    ]
    .into_iter()
    .map(|city| (city.name.clone(), city))
    .collect()
}

/// The same values as the built-in coefficients file
#[fixture]
pub fn coefficients() -> CoefficientTable {
    CoefficientTable {
        base_cost_per_sqm: MoneyPerSquareMetre(150.0),
        municipal_water_rate: MoneyPerLitre(0.02),
        daily_consumption_per_person: Litres(135.0),
        runoff_coefficients: RunoffCoefficients {
            rcc: 0.85,
            gi: 0.90,
            asbestos: 0.80,
            tiles: 0.75,
        },
        infiltration_rates: InfiltrationRates {
            sandy: MillimetresPerHour(50.0),
            loamy: MillimetresPerHour(25.0),
            clayey: MillimetresPerHour(5.0),
        },
        budget_multipliers: BudgetMultipliers {
            low: 0.8,
            medium: 1.0,
            high: 1.3,
        },
        advanced: AdvancedFactors {
            evaporation_loss: EvaporationLoss {
                north: 0.15,
                south: 0.12,
                east: 0.10,
                west: 0.18,
                central: 0.15,
                northeast: 0.08,
            },
            quality_factors: QualityFactors {
                residential: 1.0,
                industrial: 0.85,
                agricultural: 0.92,
                bird_nesting: 0.90,
            },
            seasonal_factors: SeasonalFactors {
                pre_monsoon: 0.90,
                monsoon: 1.0,
                post_monsoon: 0.95,
                winter: 0.85,
            },
            demand_multipliers: DemandMultipliers {
                domestic: [0.9, 0.9, 1.0, 1.1, 1.2, 1.1, 1.0, 1.0, 1.0, 1.0, 0.9, 0.9],
                irrigation: [0.6, 0.7, 1.1, 1.4, 1.6, 1.2, 0.6, 0.6, 0.8, 1.0, 0.8, 0.6],
                industrial: [1.0; 12],
            },
            maintenance: MaintenanceFractions {
                harvesting: 0.03,
                recharge: 0.02,
            },
            lifecycle: Lifecycle {
                system_life: 20,
                tank_life: 25,
                pump_life: 10,
                filter_life: 5,
            },
        },
    }
}

#[fixture]
pub fn reference_data(cities: CityMap, coefficients: CoefficientTable) -> ReferenceData {
    ReferenceData::new(cities, coefficients).unwrap()
}

#[fixture]
pub fn site_common() -> SiteCommon {
    SiteCommon {
        name: "Test site".into(),
        location: "Testpur".into(),
        pincode: "123456".into(),
        soil_type: SoilType::Sandy,
        groundwater_depth: Metres(10.0),
        budget: BudgetTier::Medium,
        open_space: None,
    }
}

/// A four-person household with a 150 m² RCC roof
#[fixture]
pub fn harvesting_site(site_common: SiteCommon) -> HarvestingSite {
    HarvestingSite {
        common: site_common,
        roof_area: SquareMetres(150.0),
        roof_material: RoofMaterial::Rcc,
        environment: Environment::Residential,
        bird_nesting: false,
        occupants: 4,
        purpose: WaterPurpose::Domestic,
    }
}

/// A 200 m² rooftop catchment with no borewell
#[fixture]
pub fn recharge_site(site_common: SiteCommon) -> RechargeSite {
    RechargeSite {
        common: site_common,
        catchment_area: SquareMetres(200.0),
        catchment_type: SurfaceType::Rooftop,
        borewell: None,
        aquifer_type: None,
    }
}

#[fixture]
pub fn borewell() -> Borewell {
    Borewell {
        count: 1,
        depth: Metres(60.0),
        condition: BorewellCondition::Dead,
    }
}
