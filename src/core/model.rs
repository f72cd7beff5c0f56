//! Read-only view of the building model that the OTTV calculation walks.
//!
//! The calculation only ever reads from the model, through [`BuildingModel`]. The implementation
//! for [`ModelInput`] resolves the named references (space to zone, surface to construction,
//! construction to materials) of the input document and reports any that dangle.

use crate::errors::OttvCoreError;
use crate::input::{
    MaterialInput, ModelInput, SubSurfaceInput, SubSurfaceType, SurfaceInput, SurfaceType,
    WindExposure,
};
use tracing::warn;

const DEFAULT_ZONE_MULTIPLIER: f64 = 1.;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone<'a> {
    pub name: &'a str,
    pub multiplier: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct Surface<'a> {
    pub name: &'a str,
    pub space_name: &'a str,
    pub zone_name: &'a str,
    input: &'a SurfaceInput,
}

impl<'a> Surface<'a> {
    pub fn surface_type(&self) -> SurfaceType {
        self.input.surface_type
    }

    pub fn wind_exposure(&self) -> WindExposure {
        self.input.wind_exposure
    }

    pub fn gross_area(&self) -> f64 {
        self.input.gross_area
    }

    pub fn azimuth(&self) -> f64 {
        self.input.azimuth
    }

    pub fn u_factor(&self) -> f64 {
        self.input.u_factor
    }

    pub fn window_to_wall_ratio(&self) -> f64 {
        self.input.window_to_wall_ratio
    }

    pub fn construction(&self) -> &'a str {
        &self.input.construction
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubSurface<'a> {
    pub name: &'a str,
    pub space_name: &'a str,
    input: &'a SubSurfaceInput,
}

impl<'a> SubSurface<'a> {
    pub fn sub_surface_type(&self) -> &'a SubSurfaceType {
        &self.input.sub_surface_type
    }

    pub fn gross_area(&self) -> f64 {
        self.input.gross_area
    }

    pub fn azimuth(&self) -> f64 {
        self.input.azimuth
    }

    pub fn construction(&self) -> &'a str {
        &self.input.construction
    }
}

/// A construction layer, probed for the material kinds the calculation understands.
#[derive(Clone, Copy, Debug)]
pub struct Material<'a> {
    pub name: &'a str,
    properties: &'a MaterialInput,
}

impl<'a> Material<'a> {
    /// Solar absorptance, if this is an opaque material
    pub fn as_opaque(&self) -> Option<f64> {
        match *self.properties {
            MaterialInput::Opaque {
                solar_absorptance, ..
            } => Some(solar_absorptance),
            _ => None,
        }
    }

    /// (U-factor, solar transmittance), if this is a simple glazing system
    pub fn as_simple_glazing(&self) -> Option<(f64, f64)> {
        match *self.properties {
            MaterialInput::SimpleGlazing {
                u_factor,
                solar_transmittance,
            } => Some((u_factor, solar_transmittance)),
            _ => None,
        }
    }

    /// (thermal conductance, solar transmittance), if this is a standard glazing layer
    pub fn as_standard_glazing(&self) -> Option<(f64, f64)> {
        match *self.properties {
            MaterialInput::StandardGlazing {
                thermal_conductance,
                solar_transmittance,
            } => Some((thermal_conductance, solar_transmittance)),
            _ => None,
        }
    }
}

/// The queries the OTTV calculation needs to make of a building model.
pub trait BuildingModel {
    fn building_name(&self) -> &str;

    /// Rotation of the building from true north in degrees, 0 when not set.
    fn north_axis(&self) -> f64;

    /// Zones with a thermostat, in model order.
    fn conditioned_zones(&self) -> Result<Vec<Zone<'_>>, OttvCoreError>;

    /// Surfaces of spaces in conditioned zones, in space then surface model order, each with the
    /// zone it belongs to.
    fn conditioned_surfaces(&self) -> Result<Vec<(Zone<'_>, Surface<'_>)>, OttvCoreError>;

    fn sub_surfaces_of<'a>(&'a self, surface: &Surface<'a>) -> Vec<SubSurface<'a>>;

    /// Outermost layer of the named construction. `referrer` names the surface asking, for errors.
    fn outermost_layer<'a>(
        &'a self,
        construction: &str,
        referrer: &str,
    ) -> Result<Material<'a>, OttvCoreError>;
}

impl BuildingModel for ModelInput {
    fn building_name(&self) -> &str {
        &self.building.name
    }

    fn north_axis(&self) -> f64 {
        self.building.north_axis.unwrap_or(0.)
    }

    fn conditioned_zones(&self) -> Result<Vec<Zone<'_>>, OttvCoreError> {
        for (space_name, space) in &self.spaces {
            match &space.thermal_zone {
                Some(zone_name) if !self.thermal_zones.contains_key(zone_name) => {
                    return Err(OttvCoreError::UnknownReference {
                        kind: "Thermal zone",
                        name: zone_name.clone(),
                        referrer: space_name.clone(),
                    });
                }
                None => warn!("Space '{space_name}' has no thermal zone so is not conditioned"),
                _ => {}
            }
        }

        self.thermal_zones
            .iter()
            .filter(|(_, zone)| zone.thermostat.is_some())
            .map(|(name, zone)| {
                let multiplier = zone.multiplier.unwrap_or(DEFAULT_ZONE_MULTIPLIER);
                if multiplier.is_nan() || multiplier < 1. {
                    return Err(OttvCoreError::InvalidMultiplier {
                        zone: name.clone(),
                        multiplier,
                    });
                }
                Ok(Zone { name, multiplier })
            })
            .collect()
    }

    fn conditioned_surfaces(&self) -> Result<Vec<(Zone<'_>, Surface<'_>)>, OttvCoreError> {
        let zones = self.conditioned_zones()?;

        Ok(self
            .spaces
            .iter()
            .filter_map(|(space_name, space)| {
                let zone = *zones
                    .iter()
                    .find(|zone| space.thermal_zone.as_deref() == Some(zone.name))?;
                Some(space.surfaces.iter().map(move |(name, input)| {
                    (
                        zone,
                        Surface {
                            name,
                            space_name,
                            zone_name: zone.name,
                            input,
                        },
                    )
                }))
            })
            .flatten()
            .collect())
    }

    fn sub_surfaces_of<'a>(&'a self, surface: &Surface<'a>) -> Vec<SubSurface<'a>> {
        let space_name = surface.space_name;
        surface
            .input
            .sub_surfaces
            .iter()
            .map(|(name, input)| SubSurface {
                name,
                space_name,
                input,
            })
            .collect()
    }

    fn outermost_layer<'a>(
        &'a self,
        construction: &str,
        referrer: &str,
    ) -> Result<Material<'a>, OttvCoreError> {
        let layers = &self
            .constructions
            .get(construction)
            .ok_or_else(|| OttvCoreError::UnknownReference {
                kind: "Construction",
                name: construction.to_string(),
                referrer: referrer.to_string(),
            })?
            .layers;
        let layer_name = layers
            .first()
            .ok_or_else(|| OttvCoreError::EmptyConstruction {
                construction: construction.to_string(),
                referrer: referrer.to_string(),
            })?;
        let (name, properties) = self.materials.get_key_value(layer_name).ok_or_else(|| {
            OttvCoreError::UnknownReference {
                kind: "Material",
                name: layer_name.clone(),
                referrer: construction.to_string(),
            }
        })?;

        Ok(Material { name, properties })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ingest_for_processing;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::{json, Value};

    fn wall(construction: &str) -> Value {
        json!({
            "surface_type": "Wall",
            "wind_exposure": "WindExposed",
            "gross_area": 10.0,
            "azimuth": 0.0,
            "u_factor": 1.0,
            "window_to_wall_ratio": 0.0,
            "construction": construction
        })
    }

    #[fixture]
    fn model_json() -> Value {
        json!({
            "Building": {"name": "Block A"},
            "ThermalZones": {
                "Conditioned": {"multiplier": 2, "thermostat": "T1"},
                "Plenum": {},
                "Lobby": {"thermostat": "T2"}
            },
            "Spaces": {
                "Office": {"thermal_zone": "Conditioned", "Surfaces": {"Office wall": wall("Wall")}},
                "Void": {"thermal_zone": "Plenum", "Surfaces": {"Void wall": wall("Wall")}},
                "Corridor": {"Surfaces": {"Corridor wall": wall("Wall")}},
                "Meeting": {"thermal_zone": "Conditioned", "Surfaces": {"Meeting wall": wall("Wall")}}
            },
            "Constructions": {
                "Wall": {"layers": ["Render", "Block"]},
                "Hollow": {"layers": []},
                "Dangling": {"layers": ["Unobtainium"]}
            },
            "Materials": {
                "Render": {"type": "OpaqueMaterial", "solar_absorptance": 0.4, "thermal_conductivity": null, "thickness": null},
                "Block": {"type": "OpaqueMaterial", "solar_absorptance": 0.9, "thermal_conductivity": 0.5, "thickness": 0.2}
            }
        })
    }

    fn model_from(model_json: Value) -> ModelInput {
        ingest_for_processing(json!({"Model": model_json}).to_string().as_bytes())
            .unwrap()
            .model
            .unwrap()
    }

    #[rstest]
    fn should_list_only_zones_with_thermostats(model_json: Value) {
        let model = model_from(model_json);
        assert_eq!(
            model.conditioned_zones().unwrap(),
            vec![
                Zone {
                    name: "Conditioned",
                    multiplier: 2.
                },
                Zone {
                    name: "Lobby",
                    multiplier: 1.
                }
            ]
        );
    }

    #[rstest]
    fn should_walk_surfaces_of_conditioned_spaces_in_model_order(model_json: Value) {
        let model = model_from(model_json);
        let surfaces = model.conditioned_surfaces().unwrap();

        assert_eq!(
            surfaces
                .iter()
                .map(|(zone, surface)| (surface.name, surface.space_name, zone.name, zone.multiplier))
                .collect::<Vec<_>>(),
            vec![
                ("Office wall", "Office", "Conditioned", 2.),
                ("Meeting wall", "Meeting", "Conditioned", 2.)
            ]
        );
    }

    #[rstest]
    fn should_keep_space_order_when_zones_interleave(mut model_json: Value) {
        model_json["Spaces"]["Void"]["thermal_zone"] = json!("Lobby");
        let model = model_from(model_json);

        assert_eq!(
            model
                .conditioned_surfaces()
                .unwrap()
                .iter()
                .map(|(zone, surface)| (surface.name, zone.name))
                .collect::<Vec<_>>(),
            vec![
                ("Office wall", "Conditioned"),
                ("Void wall", "Lobby"),
                ("Meeting wall", "Conditioned")
            ]
        );
    }

    #[rstest]
    fn should_default_north_axis_to_zero(model_json: Value) {
        assert_eq!(model_from(model_json).north_axis(), 0.);
    }

    #[rstest]
    fn should_give_outermost_layer_of_construction(model_json: Value) {
        let model = model_from(model_json);
        let layer = model.outermost_layer("Wall", "Office wall").unwrap();
        assert_eq!(layer.name, "Render");
        assert_eq!(layer.as_opaque(), Some(0.4));
        assert_eq!(layer.as_simple_glazing(), None);
        assert_eq!(layer.as_standard_glazing(), None);
    }

    #[rstest]
    fn should_report_unknown_zone_reference(mut model_json: Value) {
        model_json["Spaces"]["Office"]["thermal_zone"] = json!("Missing zone");
        let model = model_from(model_json);
        assert!(matches!(
            model.conditioned_zones(),
            Err(OttvCoreError::UnknownReference { kind: "Thermal zone", ref name, ref referrer })
                if name == "Missing zone" && referrer == "Office"
        ));
    }

    #[rstest]
    #[case(0.)]
    #[case(0.5)]
    fn should_reject_multiplier_below_one(mut model_json: Value, #[case] multiplier: f64) {
        model_json["ThermalZones"]["Conditioned"]["multiplier"] = json!(multiplier);
        let model = model_from(model_json);
        assert!(matches!(
            model.conditioned_zones(),
            Err(OttvCoreError::InvalidMultiplier { .. })
        ));
    }

    #[rstest]
    fn should_report_unresolvable_constructions(model_json: Value) {
        let model = model_from(model_json);
        assert!(matches!(
            model.outermost_layer("Nonexistent", "Office wall"),
            Err(OttvCoreError::UnknownReference {
                kind: "Construction",
                ..
            })
        ));
        assert!(matches!(
            model.outermost_layer("Hollow", "Office wall"),
            Err(OttvCoreError::EmptyConstruction { .. })
        ));
        assert!(matches!(
            model.outermost_layer("Dangling", "Office wall"),
            Err(OttvCoreError::UnknownReference {
                kind: "Material",
                ..
            })
        ));
    }
}
