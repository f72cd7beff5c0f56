use crate::core::formula::SurfaceResult;
use crate::core::units::OTTV_COMPLIANCE_INDICATOR_THRESHOLD;
use crate::errors::OttvCoreError;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    Compliant,
    NonCompliant,
}

impl Compliance {
    pub fn for_ottv(ottv: f64) -> Self {
        if ottv <= OTTV_COMPLIANCE_INDICATOR_THRESHOLD {
            Compliance::Compliant
        } else {
            Compliance::NonCompliant
        }
    }
}

/// Running sums over the envelope walls, folded in traversal order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuildingAccumulator {
    gross_area: f64,
    area_with_floor: f64,
    weighted_ottv: f64,
    wall_ottv: f64,
    window_conduction_ottv: f64,
    window_solar_heat_gain_ottv: f64,
}

impl BuildingAccumulator {
    pub fn add(&mut self, surface: &SurfaceResult) {
        self.gross_area += surface.wall.gross_area;
        self.wall_ottv += surface.wall_term;
        for window in &surface.windows {
            self.window_solar_heat_gain_ottv += window.solar_term;
            self.window_conduction_ottv += window.conduction_term;
        }
        self.area_with_floor += surface.area_with_floor;
        self.weighted_ottv += surface.weighted_ottv;
    }

    /// Area and multiplier weighted OTTV of the building.
    ///
    /// Fails when there is no wall area to weight by, as OTTV is then undefined rather than zero.
    pub fn finish(self) -> Result<BuildingResult, OttvCoreError> {
        if self.area_with_floor <= 0. {
            return Err(OttvCoreError::NoQualifyingEnvelope);
        }

        let ottv = self.weighted_ottv / self.area_with_floor;

        Ok(BuildingResult {
            ottv,
            compliance: Compliance::for_ottv(ottv),
            total_gross_area: self.gross_area,
            total_area_with_floor: self.area_with_floor,
            total_weighted_ottv: self.weighted_ottv,
            wall_ottv: self.wall_ottv,
            window_conduction_ottv: self.window_conduction_ottv,
            window_solar_heat_gain_ottv: self.window_solar_heat_gain_ottv,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BuildingResult {
    /// W/m2
    pub ottv: f64,
    pub compliance: Compliance,
    pub total_gross_area: f64,
    pub total_area_with_floor: f64,
    pub total_weighted_ottv: f64,
    // Component sub-totals are plain sums of the per-wall terms, without area weighting.
    pub wall_ottv: f64,
    pub window_conduction_ottv: f64,
    pub window_solar_heat_gain_ottv: f64,
}
