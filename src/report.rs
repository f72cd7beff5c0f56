//! The report handed to presentation: the building OTTV with the tables and chart data that explain
//! it. Values are rounded for display here, after the calculation has finished with them.

use crate::core::aggregator::{BuildingResult, Compliance};
use crate::core::correction_factor::CORRECTION_FACTORS;
use crate::core::envelope::ExposedRoof;
use crate::core::formula::{SurfaceResult, WindowResult};
use crate::core::orientation::OrientationBucket;
use crate::core::ottv::OttvCalculation;
use crate::core::units::{
    round_to_places, CODE_LIMIT_MIN_CONDITIONED_AREA, OTTV_CODE_LIMIT,
    OTTV_COMPLIANCE_INDICATOR_THRESHOLD,
};
use crate::site::{OutdoorAirTemperature, ProjectSummary};
use serde::Serialize;

const DISPLAY_PLACES: i32 = 2;
const AZIMUTH_DISPLAY_PLACES: i32 = 1;

fn display(value: f64) -> f64 {
    round_to_places(value, DISPLAY_PLACES)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub project: ProjectSummary,
    /// W/m2
    pub ottv: f64,
    pub compliance: ComplianceStatement,
    pub components: Vec<ChartComponent>,
    pub surfaces: Vec<SurfaceOttvRow>,
    pub totals: TotalsRow,
    pub surface_details: Vec<SurfaceDetailRow>,
    pub correction_factors: Vec<CorrectionFactorRow>,
    pub exposed_roofs: Vec<ExposedRoofRow>,
    pub outdoor_air_temperature: Option<OutdoorAirTemperature>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn new(
        calculation: &OttvCalculation,
        project: ProjectSummary,
        outdoor_air_temperature: Option<OutdoorAirTemperature>,
        warnings: Vec<String>,
    ) -> Self {
        let building = &calculation.building;

        Self {
            project,
            ottv: display(building.ottv),
            compliance: ComplianceStatement::new(building),
            components: ChartComponent::for_building(building),
            surfaces: calculation.surfaces.iter().map(SurfaceOttvRow::from).collect(),
            totals: TotalsRow::from(building),
            surface_details: calculation
                .surfaces
                .iter()
                .flat_map(SurfaceDetailRow::for_surface)
                .collect(),
            correction_factors: CorrectionFactorRow::table(),
            exposed_roofs: calculation
                .exposed_roofs
                .iter()
                .map(ExposedRoofRow::from)
                .collect(),
            outdoor_air_temperature,
            warnings,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComplianceStatement {
    pub ottv: f64,
    pub compliance: Compliance,
    pub indicator_threshold: f64,
    pub code_limit: f64,
    pub code_limit_min_conditioned_area: f64,
    pub statement: String,
}

impl ComplianceStatement {
    fn new(building: &BuildingResult) -> Self {
        Self {
            ottv: display(building.ottv),
            compliance: building.compliance,
            indicator_threshold: OTTV_COMPLIANCE_INDICATOR_THRESHOLD,
            code_limit: OTTV_CODE_LIMIT,
            code_limit_min_conditioned_area: CODE_LIMIT_MIN_CONDITIONED_AREA,
            statement: format!(
                "OTTV calculations as per MS 1525:2001 (Code of Practice on Energy Efficiency and \
                 Use of Renewable Energy for Non-Residential Buildings) for Malaysia. For \
                 compliance OTTV must not exceed {OTTV_CODE_LIMIT} W/m2 for buildings having total \
                 air-conditioned area of {CODE_LIMIT_MIN_CONDITIONED_AREA} m2 or more."
            ),
        }
    }
}

/// One slice of the chart breaking the OTTV down by component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartComponent {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

impl ChartComponent {
    fn for_building(building: &BuildingResult) -> Vec<Self> {
        vec![
            Self {
                label: "Wall OTTV",
                value: display(building.wall_ottv),
                color: "#EF1C21",
            },
            Self {
                label: "Window Conduction OTTV",
                value: display(building.window_conduction_ottv),
                color: "#0071BD",
            },
            Self {
                label: "Window Solar Heat Gain OTTV",
                value: display(building.window_solar_heat_gain_ottv),
                color: "#F7DF10",
            },
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowRow {
    pub name: String,
    pub gross_area: f64,
    pub window_to_wall_ratio: f64,
    pub u_value: f64,
    pub correction_factor: f64,
    pub shading_coefficient: f64,
}

impl From<&WindowResult<'_>> for WindowRow {
    fn from(result: &WindowResult) -> Self {
        let window = &result.window;
        Self {
            name: window.sub_surface.name.to_string(),
            gross_area: display(window.gross_area),
            window_to_wall_ratio: display(window.window_wwr),
            u_value: display(window.u_value()),
            correction_factor: display(window.correction_factor),
            shading_coefficient: display(window.shading_coefficient()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceOttvRow {
    pub zone: String,
    pub space: String,
    pub name: String,
    pub construction: String,
    pub gross_area: f64,
    pub solar_absorptance: f64,
    pub window_to_wall_ratio: f64,
    pub u_value: f64,
    pub windows: Vec<WindowRow>,
    pub ottv: f64,
    pub multiplier: f64,
    pub area_with_floor: f64,
    pub weighted_ottv: f64,
}

impl From<&SurfaceResult<'_>> for SurfaceOttvRow {
    fn from(result: &SurfaceResult) -> Self {
        let wall = &result.wall;
        Self {
            zone: wall.surface.zone_name.to_string(),
            space: wall.surface.space_name.to_string(),
            name: wall.surface.name.to_string(),
            construction: wall.surface.construction().to_string(),
            gross_area: display(wall.gross_area),
            solar_absorptance: display(wall.solar_absorptance),
            window_to_wall_ratio: display(wall.window_to_wall_ratio),
            u_value: display(wall.u_value),
            windows: result.windows.iter().map(WindowRow::from).collect(),
            ottv: display(result.ottv),
            multiplier: wall.multiplier,
            area_with_floor: display(result.area_with_floor),
            weighted_ottv: display(result.weighted_ottv),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TotalsRow {
    pub gross_area: f64,
    pub area_with_floor: f64,
    pub weighted_ottv: f64,
}

impl From<&BuildingResult> for TotalsRow {
    fn from(building: &BuildingResult) -> Self {
        Self {
            gross_area: display(building.total_gross_area),
            area_with_floor: display(building.total_area_with_floor),
            weighted_ottv: display(building.total_weighted_ottv),
        }
    }
}

/// A wall or counted window, with where it sits in the model and which way it faces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceDetailRow {
    pub name: String,
    #[serde(rename = "type")]
    pub surface_type: String,
    pub space: String,
    pub construction: String,
    /// degrees from true north
    pub azimuth: f64,
    pub facade: OrientationBucket,
}

impl SurfaceDetailRow {
    fn for_surface(result: &SurfaceResult) -> Vec<Self> {
        let wall = &result.wall;
        let wall_row = Self {
            name: wall.surface.name.to_string(),
            surface_type: wall.surface.surface_type().to_string(),
            space: wall.surface.space_name.to_string(),
            construction: wall.surface.construction().to_string(),
            azimuth: round_to_places(wall.azimuth.angle(), AZIMUTH_DISPLAY_PLACES),
            facade: wall.orientation,
        };

        std::iter::once(wall_row)
            .chain(result.windows.iter().map(|result| {
                let window = &result.window;
                Self {
                    name: window.sub_surface.name.to_string(),
                    surface_type: window.sub_surface.sub_surface_type().name().to_string(),
                    space: window.sub_surface.space_name.to_string(),
                    construction: window.sub_surface.construction().to_string(),
                    azimuth: round_to_places(window.azimuth.angle(), AZIMUTH_DISPLAY_PLACES),
                    facade: window.orientation,
                }
            }))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrectionFactorRow {
    pub orientation: OrientationBucket,
    pub correction_factor: f64,
}

impl CorrectionFactorRow {
    fn table() -> Vec<Self> {
        CORRECTION_FACTORS
            .iter()
            .map(|(&orientation, &correction_factor)| Self {
                orientation,
                correction_factor,
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExposedRoofRow {
    pub name: String,
    pub space: String,
    pub gross_area: f64,
    pub u_value: f64,
}

impl From<&ExposedRoof> for ExposedRoofRow {
    fn from(roof: &ExposedRoof) -> Self {
        Self {
            name: roof.name.clone(),
            space: roof.space_name.clone(),
            gross_area: display(roof.gross_area),
            u_value: display(roof.u_value),
        }
    }
}
