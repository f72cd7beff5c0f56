use crate::core::model::{BuildingModel, Surface};
use crate::core::orientation::{classify_azimuth, OrientationBucket};
use crate::core::units::Azimuth;
use crate::errors::OttvCoreError;
use crate::input::{SurfaceType, WindExposure};
use tracing::debug;

/// A conditioned, wind exposed wall with the parameters the OTTV equation needs.
#[derive(Clone, Copy, Debug)]
pub struct EnvelopeWall<'a> {
    pub surface: Surface<'a>,
    pub multiplier: f64,
    pub solar_absorptance: f64,
    /// window to wall ratio as reported for the wall itself
    pub window_to_wall_ratio: f64,
    pub u_value: f64,
    pub gross_area: f64,
    pub azimuth: Azimuth,
    pub orientation: OrientationBucket,
}

/// A conditioned, wind exposed roof. Roofs are outside the scope of OTTV so are only ever listed.
#[derive(Clone, Debug, PartialEq)]
pub struct ExposedRoof {
    pub name: String,
    pub space_name: String,
    pub gross_area: f64,
    pub u_value: f64,
}

#[derive(Debug, Default)]
pub struct Envelope<'a> {
    pub walls: Vec<EnvelopeWall<'a>>,
    pub roofs: Vec<ExposedRoof>,
}

fn is_exposed(surface: &Surface, surface_type: SurfaceType) -> bool {
    surface.wind_exposure() == WindExposure::WindExposed && surface.surface_type() == surface_type
}

/// Select the surfaces of conditioned zones that make up the envelope, in space then surface order.
pub fn envelope_of<M: BuildingModel>(model: &M) -> Result<Envelope<'_>, OttvCoreError> {
    let north_axis = model.north_axis();
    let mut envelope = Envelope::default();

    for (zone, surface) in model.conditioned_surfaces()? {
        if is_exposed(&surface, SurfaceType::Wall) {
            envelope
                .walls
                .push(envelope_wall(model, surface, zone.multiplier, north_axis)?);
        } else if is_exposed(&surface, SurfaceType::RoofCeiling) {
            debug!(
                "Exposed roof '{}' in zone '{}' is excluded from OTTV",
                surface.name, zone.name
            );
            envelope.roofs.push(ExposedRoof {
                name: surface.name.to_string(),
                space_name: surface.space_name.to_string(),
                gross_area: surface.gross_area(),
                u_value: surface.u_factor(),
            });
        }
    }

    Ok(envelope)
}

fn envelope_wall<'a, M: BuildingModel>(
    model: &'a M,
    surface: Surface<'a>,
    multiplier: f64,
    north_axis: f64,
) -> Result<EnvelopeWall<'a>, OttvCoreError> {
    let outermost_layer = model.outermost_layer(surface.construction(), surface.name)?;
    let solar_absorptance =
        outermost_layer
            .as_opaque()
            .ok_or_else(|| OttvCoreError::UnresolvedOpaqueMaterial {
                surface: surface.name.to_string(),
                material: outermost_layer.name.to_string(),
            })?;
    let (azimuth, orientation) = classify_azimuth(surface.azimuth(), north_axis)?;

    Ok(EnvelopeWall {
        surface,
        multiplier,
        solar_absorptance,
        window_to_wall_ratio: surface.window_to_wall_ratio(),
        u_value: surface.u_factor(),
        gross_area: surface.gross_area(),
        azimuth,
        orientation,
    })
}
