use crate::core::envelope::EnvelopeWall;
use crate::core::fenestration::WindowParameters;
use crate::core::units::{
    FENESTRATION_CONDUCTION_COEFFICIENT, FENESTRATION_SOLAR_COEFFICIENT,
    WALL_CONDUCTION_COEFFICIENT,
};

/// Heat conduction through the opaque part of a wall, in W/m2
///
/// Arguments:
/// * `solar_absorptance` - solar absorptance of the outer surface of the wall
/// * `window_to_wall_ratio` - fraction of the wall that is fenestration
/// * `u_value` - thermal transmittance of the opaque wall, in W/(m2.K)
pub fn wall_term(solar_absorptance: f64, window_to_wall_ratio: f64, u_value: f64) -> f64 {
    WALL_CONDUCTION_COEFFICIENT * solar_absorptance * (1. - window_to_wall_ratio) * u_value
}

/// Heat conduction through a window, in W/m2 of wall
pub fn window_conduction_term(window_wwr: f64, u_value: f64) -> f64 {
    FENESTRATION_CONDUCTION_COEFFICIENT * window_wwr * u_value
}

/// Solar radiation through a window, in W/m2 of wall
pub fn window_solar_term(correction_factor: f64, window_wwr: f64, shading_coefficient: f64) -> f64 {
    FENESTRATION_SOLAR_COEFFICIENT * correction_factor * window_wwr * shading_coefficient
}

#[derive(Clone, Copy, Debug)]
pub struct WindowResult<'a> {
    pub window: WindowParameters<'a>,
    pub conduction_term: f64,
    pub solar_term: f64,
}

/// OTTV of a single envelope wall together with its windows.
#[derive(Clone, Debug)]
pub struct SurfaceResult<'a> {
    pub wall: EnvelopeWall<'a>,
    pub windows: Vec<WindowResult<'a>>,
    pub wall_term: f64,
    pub fenestration_term: f64,
    /// OTTV of the wall per unit area, before the zone multiplier is applied
    pub ottv: f64,
    pub area_with_floor: f64,
    pub weighted_ottv: f64,
}

pub fn surface_result<'a>(
    wall: EnvelopeWall<'a>,
    windows: Vec<WindowParameters<'a>>,
) -> SurfaceResult<'a> {
    let wall_term = wall_term(
        wall.solar_absorptance,
        wall.window_to_wall_ratio,
        wall.u_value,
    );

    let windows: Vec<WindowResult> = windows
        .into_iter()
        .map(|window| WindowResult {
            window,
            conduction_term: window_conduction_term(window.window_wwr, window.u_value()),
            solar_term: window_solar_term(
                window.correction_factor,
                window.window_wwr,
                window.shading_coefficient(),
            ),
        })
        .collect();

    let fenestration_term = windows.iter().fold(0., |term, window| {
        term + window.conduction_term + window.solar_term
    });

    let ottv = wall_term + fenestration_term;

    SurfaceResult {
        wall,
        windows,
        wall_term,
        fenestration_term,
        ottv,
        area_with_floor: wall.gross_area * wall.multiplier,
        weighted_ottv: ottv * wall.gross_area * wall.multiplier,
    }
}
