use crate::core::aggregator::{BuildingAccumulator, BuildingResult};
use crate::core::envelope::{envelope_of, EnvelopeWall, ExposedRoof};
use crate::core::fenestration::windows_of;
use crate::core::formula::{surface_result, SurfaceResult};
use crate::core::model::BuildingModel;
use crate::errors::OttvCoreError;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Evaluation {
    #[default]
    Sequential,
    /// Walls are evaluated in parallel, then reduced in model order, so results are identical to
    /// a sequential evaluation.
    Parallel,
}

#[derive(Debug)]
pub struct OttvCalculation<'a> {
    pub building: BuildingResult,
    pub surfaces: Vec<SurfaceResult<'a>>,
    pub exposed_roofs: Vec<ExposedRoof>,
}

/// Calculate the OTTV of the building envelope in a single pass over the model.
#[instrument(skip_all, fields(building = model.building_name()))]
pub fn calculate_ottv<M: BuildingModel + Sync>(
    model: &M,
    evaluation: Evaluation,
) -> Result<OttvCalculation<'_>, OttvCoreError> {
    let north_axis = model.north_axis();
    let envelope = envelope_of(model)?;

    let surfaces: Vec<SurfaceResult> = match evaluation {
        Evaluation::Sequential => envelope
            .walls
            .iter()
            .map(|wall| evaluate_wall(model, wall, north_axis))
            .collect::<Result<_, _>>()?,
        Evaluation::Parallel => envelope
            .walls
            .par_iter()
            .map(|wall| evaluate_wall(model, wall, north_axis))
            .collect::<Result<_, _>>()?,
    };

    let mut accumulator = BuildingAccumulator::default();
    for surface in &surfaces {
        accumulator.add(surface);
    }
    let building = accumulator.finish()?;

    info!(
        "OTTV of {:.2} W/m2 over {} walls ({:?})",
        building.ottv,
        surfaces.len(),
        building.compliance
    );

    Ok(OttvCalculation {
        building,
        surfaces,
        exposed_roofs: envelope.roofs,
    })
}

fn evaluate_wall<'a, M: BuildingModel>(
    model: &'a M,
    wall: &EnvelopeWall<'a>,
    north_axis: f64,
) -> Result<SurfaceResult<'a>, OttvCoreError> {
    let windows = windows_of(model, wall, north_axis)?;
    let result = surface_result(*wall, windows);

    debug!(
        surface = result.wall.surface.name,
        zone = result.wall.surface.zone_name,
        windows = result.windows.len(),
        "wall term {}, fenestration term {}, OTTV {}",
        result.wall_term,
        result.fenestration_term,
        result.ottv
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::Compliance;
    use crate::input::{ingest_for_processing, ModelInput};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::{json, Value};

    fn wall(azimuth: f64, gross_area: f64, wwr: f64, sub_surfaces: Value) -> Value {
        json!({
            "surface_type": "Wall",
            "wind_exposure": "WindExposed",
            "gross_area": gross_area,
            "azimuth": azimuth,
            "u_factor": 1.2,
            "window_to_wall_ratio": wwr,
            "construction": "Wall",
            "SubSurfaces": sub_surfaces
        })
    }

    fn window(azimuth: f64, gross_area: f64) -> Value {
        json!({
            "sub_surface_type": "FixedWindow",
            "gross_area": gross_area,
            "azimuth": azimuth,
            "u_factor": 2.0,
            "construction": "Glazing"
        })
    }

    #[fixture]
    fn model_json() -> Value {
        json!({
            "Building": {"name": "Block A"},
            "ThermalZones": {
                "Ground": {"thermostat": "T1"},
                "Typical floor": {"multiplier": 5, "thermostat": "T2"},
                "Plant": {}
            },
            "Spaces": {
                "Reception": {"thermal_zone": "Ground", "Surfaces": {
                    "Reception east": wall(90., 20., 0.3, json!({"Reception east window": window(90., 6.)})),
                    "Reception north": wall(0., 10., 0., json!({}))
                }},
                "Office": {"thermal_zone": "Typical floor", "Surfaces": {
                    "Office west": wall(270., 30., 0.2, json!({
                        "Office west window 1": window(270., 3.),
                        "Office west window 2": window(270., 3.),
                        "Office west door": {
                            "sub_surface_type": "Door",
                            "gross_area": 2.0,
                            "azimuth": 270.0,
                            "u_factor": 2.0,
                            "construction": "Wall"
                        }
                    })),
                    "Office roof": {
                        "surface_type": "RoofCeiling",
                        "wind_exposure": "WindExposed",
                        "gross_area": 100.0,
                        "azimuth": 0.0,
                        "u_factor": 0.4,
                        "window_to_wall_ratio": 0.0,
                        "construction": "Wall"
                    }
                }},
                "Plant room": {"thermal_zone": "Plant", "Surfaces": {
                    "Plant wall": wall(180., 40., 0., json!({}))
                }}
            },
            "Constructions": {"Wall": {"layers": ["Brick"]}, "Glazing": {"layers": ["Simple glazing"]}},
            "Materials": {
                "Brick": {"type": "OpaqueMaterial", "solar_absorptance": 0.5, "thermal_conductivity": null, "thickness": null},
                "Simple glazing": {"type": "SimpleGlazing", "u_factor": 2.0, "solar_transmittance": 0.435}
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
    fn should_calculate_building_ottv(model_json: Value) {
        let model = model_from(model_json);
        let calculation = calculate_ottv(&model, Evaluation::Sequential).unwrap();

        assert_eq!(
            calculation
                .surfaces
                .iter()
                .map(|surface| surface.wall.surface.name)
                .collect::<Vec<_>>(),
            vec!["Reception east", "Reception north", "Office west"]
        );

        // Reception east: wall 15 * 0.5 * 0.7 * 1.2 = 6.3
        //   window (wwr 0.3, East): 6 * 0.3 * 2 = 3.6 + 194 * 1.23 * 0.3 * 0.5 = 35.793
        // Reception north: 15 * 0.5 * 1 * 1.2 = 9
        // Office west: wall 15 * 0.5 * 0.8 * 1.2 = 7.2
        //   2 windows (wwr 0.1, West): 6 * 0.1 * 2 = 1.2 + 194 * 0.94 * 0.1 * 0.5 = 9.118
        let reception_east = 6.3 + 3.6 + 35.793;
        let reception_north = 9.;
        let office_west = 7.2 + 2. * (1.2 + 9.118);
        let surfaces = &calculation.surfaces;
        assert_relative_eq!(surfaces[0].ottv, reception_east, max_relative = 1e-12);
        assert_relative_eq!(surfaces[1].ottv, reception_north, max_relative = 1e-12);
        assert_relative_eq!(surfaces[2].ottv, office_west, max_relative = 1e-12);
        assert_eq!(surfaces[2].windows.len(), 2);

        let building = calculation.building;
        let expected_ottv =
            (reception_east * 20. + reception_north * 10. + office_west * 30. * 5.) / 180.;
        assert_relative_eq!(building.ottv, expected_ottv, max_relative = 1e-12);
        assert_relative_eq!(building.total_gross_area, 60.);
        assert_relative_eq!(building.total_area_with_floor, 180.);
        assert_relative_eq!(building.wall_ottv, 6.3 + 9. + 7.2, max_relative = 1e-12);
        assert_relative_eq!(
            building.window_conduction_ottv,
            3.6 + 2. * 1.2,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            building.window_solar_heat_gain_ottv,
            35.793 + 2. * 9.118,
            max_relative = 1e-12
        );
        assert_eq!(building.compliance, Compliance::Compliant);
    }

    #[rstest]
    fn should_exclude_roofs_from_totals(model_json: Value) {
        let model = model_from(model_json);
        let calculation = calculate_ottv(&model, Evaluation::Sequential).unwrap();

        assert_eq!(calculation.exposed_roofs.len(), 1);
        assert_eq!(calculation.exposed_roofs[0].name, "Office roof");
        assert_relative_eq!(calculation.building.total_gross_area, 60.);
    }

    #[rstest]
    fn should_give_identical_results_on_repeated_runs(model_json: Value) {
        let model = model_from(model_json);
        let first = calculate_ottv(&model, Evaluation::Sequential).unwrap();
        let second = calculate_ottv(&model, Evaluation::Sequential).unwrap();

        assert_eq!(first.building, second.building);
    }

    #[rstest]
    fn should_give_identical_results_when_parallel(model_json: Value) {
        let model = model_from(model_json);
        let sequential = calculate_ottv(&model, Evaluation::Sequential).unwrap();
        let parallel = calculate_ottv(&model, Evaluation::Parallel).unwrap();

        assert_eq!(sequential.building, parallel.building);
        assert_eq!(
            sequential
                .surfaces
                .iter()
                .map(|surface| surface.wall.surface.name)
                .collect::<Vec<_>>(),
            parallel
                .surfaces
                .iter()
                .map(|surface| surface.wall.surface.name)
                .collect::<Vec<_>>()
        );
    }

    #[rstest]
    fn should_order_walls_by_space_when_zones_interleave(mut model_json: Value) {
        model_json["Spaces"]["Annex"] = json!({"thermal_zone": "Ground", "Surfaces": {
            "Annex south": wall(180., 10., 0., json!({}))
        }});
        let model = model_from(model_json);
        let calculation = calculate_ottv(&model, Evaluation::Sequential).unwrap();

        assert_eq!(
            calculation
                .surfaces
                .iter()
                .map(|surface| surface.wall.surface.name)
                .collect::<Vec<_>>(),
            vec!["Reception east", "Reception north", "Office west", "Annex south"]
        );
        assert_eq!(calculation.surfaces[3].wall.multiplier, 1.);
    }

    #[rstest]
    fn should_fold_in_windowless_wall_without_area(mut model_json: Value) {
        let baseline = calculate_ottv(&model_from(model_json.clone()), Evaluation::Sequential)
            .unwrap()
            .building;
        model_json["Spaces"]["Reception"]["Surfaces"]["Sliver"] = wall(0., 0., 0., json!({}));
        let model = model_from(model_json);
        let calculation = calculate_ottv(&model, Evaluation::Sequential).unwrap();

        assert_eq!(calculation.surfaces.len(), 4);
        assert_eq!(calculation.surfaces[2].area_with_floor, 0.);
        assert_eq!(calculation.surfaces[2].weighted_ottv, 0.);
        assert_relative_eq!(calculation.building.ottv, baseline.ottv, max_relative = 1e-12);
        assert_eq!(
            calculation.building.total_area_with_floor,
            baseline.total_area_with_floor
        );
    }

    #[rstest]
    fn should_fail_for_window_in_wall_without_area(mut model_json: Value) {
        model_json["Spaces"]["Reception"]["Surfaces"]["Reception east"]["gross_area"] = json!(0.);
        let model = model_from(model_json);

        assert!(matches!(
            calculate_ottv(&model, Evaluation::Sequential),
            Err(OttvCoreError::NonPositiveGrossArea { ref surface, .. }) if surface == "Reception east"
        ));
    }

    #[rstest]
    fn should_fail_without_conditioned_walls(mut model_json: Value) {
        model_json["ThermalZones"] = json!({"Ground": {}, "Typical floor": {}, "Plant": {}});
        let model = model_from(model_json);

        assert!(matches!(
            calculate_ottv(&model, Evaluation::Sequential),
            Err(OttvCoreError::NoQualifyingEnvelope)
        ));
    }

    #[rstest]
    fn should_fail_when_only_roofs_are_exposed(mut model_json: Value) {
        model_json["Spaces"]["Reception"]["Surfaces"] = json!({});
        model_json["Spaces"]["Office"]["Surfaces"]
            .as_object_mut()
            .unwrap()
            .shift_remove("Office west");
        let model = model_from(model_json);

        assert!(matches!(
            calculate_ottv(&model, Evaluation::Parallel),
            Err(OttvCoreError::NoQualifyingEnvelope)
        ));
    }
}
