use crate::core::correction_factor::correction_factor_for;
use crate::core::envelope::EnvelopeWall;
use crate::core::model::{BuildingModel, Material, SubSurface};
use crate::core::orientation::{classify_azimuth, OrientationBucket};
use crate::core::units::{Azimuth, REFERENCE_GLASS_SOLAR_TRANSMITTANCE};
use crate::errors::OttvCoreError;
use tracing::debug;

/// The glazing material forming the outside of a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Glazing {
    /// A simple glazing system, described by its overall U-factor
    Simple {
        u_factor: f64,
        solar_transmittance: f64,
    },
    /// A single glass layer, described by its thermal conductance
    Standard {
        thermal_conductance: f64,
        solar_transmittance: f64,
    },
}

impl Glazing {
    /// Probe the material as simple glazing first, then as standard glazing.
    pub fn resolve(material: &Material, sub_surface: &str) -> Result<Self, OttvCoreError> {
        if let Some((u_factor, solar_transmittance)) = material.as_simple_glazing() {
            return Ok(Glazing::Simple {
                u_factor,
                solar_transmittance,
            });
        }
        if let Some((thermal_conductance, solar_transmittance)) = material.as_standard_glazing() {
            return Ok(Glazing::Standard {
                thermal_conductance,
                solar_transmittance,
            });
        }

        Err(OttvCoreError::UnresolvedGlazingMaterial {
            sub_surface: sub_surface.to_string(),
            material: material.name.to_string(),
        })
    }

    /// Thermal transmittance of the fenestration, in W/(m2.K)
    pub fn u_value(&self) -> f64 {
        match *self {
            Glazing::Simple { u_factor, .. } => u_factor,
            Glazing::Standard {
                thermal_conductance,
                ..
            } => thermal_conductance,
        }
    }

    pub fn solar_transmittance(&self) -> f64 {
        match *self {
            Glazing::Simple {
                solar_transmittance,
                ..
            }
            | Glazing::Standard {
                solar_transmittance,
                ..
            } => solar_transmittance,
        }
    }

    pub fn shading_coefficient(&self) -> f64 {
        shading_coefficient(self.solar_transmittance())
    }
}

/// Shading coefficient relative to 3mm clear glass
pub fn shading_coefficient(solar_transmittance: f64) -> f64 {
    solar_transmittance / REFERENCE_GLASS_SOLAR_TRANSMITTANCE
}

/// A window of an envelope wall, with the inputs for the fenestration terms of the OTTV equation.
#[derive(Clone, Copy, Debug)]
pub struct WindowParameters<'a> {
    pub sub_surface: SubSurface<'a>,
    pub azimuth: Azimuth,
    pub orientation: OrientationBucket,
    pub correction_factor: f64,
    pub glazing: Glazing,
    pub gross_area: f64,
    /// area of this window relative to the gross area of its wall. This is not the wall's own
    /// window to wall ratio attribute, which can differ from the sum of these.
    pub window_wwr: f64,
}

impl WindowParameters<'_> {
    pub fn u_value(&self) -> f64 {
        self.glazing.u_value()
    }

    pub fn shading_coefficient(&self) -> f64 {
        self.glazing.shading_coefficient()
    }
}

/// Resolve the windows of a wall in model order. Sub-surfaces that are not windows are skipped.
pub fn windows_of<'a, M: BuildingModel>(
    model: &'a M,
    wall: &EnvelopeWall<'a>,
    north_axis: f64,
) -> Result<Vec<WindowParameters<'a>>, OttvCoreError> {
    model
        .sub_surfaces_of(&wall.surface)
        .into_iter()
        .filter(|sub_surface| sub_surface.sub_surface_type().is_window())
        .map(|sub_surface| resolve_window(model, sub_surface, wall, north_axis))
        .collect()
}

fn resolve_window<'a, M: BuildingModel>(
    model: &'a M,
    sub_surface: SubSurface<'a>,
    wall: &EnvelopeWall<'a>,
    north_axis: f64,
) -> Result<WindowParameters<'a>, OttvCoreError> {
    let (wall_name, wall_gross_area) = (wall.surface.name, wall.gross_area);
    let (azimuth, orientation) = classify_azimuth(sub_surface.azimuth(), north_axis)?;
    let correction_factor = correction_factor_for(orientation, azimuth.angle())?;

    let outermost_layer = model.outermost_layer(sub_surface.construction(), sub_surface.name)?;
    let glazing = Glazing::resolve(&outermost_layer, sub_surface.name)?;

    if !wall_gross_area.is_finite() || wall_gross_area <= 0. {
        return Err(OttvCoreError::NonPositiveGrossArea {
            surface: wall_name.to_string(),
            gross_area: wall_gross_area,
        });
    }

    let gross_area = sub_surface.gross_area();
    let window_wwr = gross_area / wall_gross_area;

    debug!(
        sub_surface = sub_surface.name,
        orientation = %orientation,
        "window WWR {window_wwr}, CF {correction_factor}, SC {}",
        glazing.shading_coefficient()
    );

    Ok(WindowParameters {
        sub_surface,
        azimuth,
        orientation,
        correction_factor,
        glazing,
        gross_area,
        window_wwr,
    })
}
