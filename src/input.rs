use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::io::{BufReader, Read};
use strum::Display;

pub fn ingest_for_processing(json: impl Read) -> anyhow::Result<Input> {
    Ok(serde_json::from_reader(BufReader::new(json))?)
}

/// A snapshot of a simulated building as handed over by the modelling engine once its run has
/// finished. Either part may be missing if the upstream run did not produce it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Input {
    pub model: Option<ModelInput>,
    pub simulation_results: Option<SimulationResultsInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct ModelInput {
    pub building: BuildingInput,
    pub site: Option<SiteInput>,
    pub thermal_zones: IndexMap<String, ThermalZoneInput>,
    pub spaces: IndexMap<String, SpaceInput>,
    pub constructions: IndexMap<String, ConstructionInput>,
    pub materials: IndexMap<String, MaterialInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingInput {
    pub name: String,
    /// degrees; treated as 0 when not set
    pub north_axis: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteInput {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "WeatherFile")]
    pub weather_file: Option<WeatherFileInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherFileInput {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThermalZoneInput {
    /// number of identical floors this zone stands for; 1 when not set
    pub multiplier: Option<f64>,
    pub thermostat: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpaceInput {
    pub thermal_zone: Option<String>,
    #[serde(rename = "Surfaces", default)]
    pub surfaces: IndexMap<String, SurfaceInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfaceInput {
    pub surface_type: SurfaceType,
    pub wind_exposure: WindExposure,
    pub gross_area: f64,
    pub azimuth: f64,
    pub u_factor: f64,
    pub window_to_wall_ratio: f64,
    pub construction: String,
    #[serde(rename = "SubSurfaces", default)]
    pub sub_surfaces: IndexMap<String, SubSurfaceInput>,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum SurfaceType {
    Wall,
    RoofCeiling,
    Floor,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum WindExposure {
    WindExposed,
    NoWind,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubSurfaceInput {
    pub sub_surface_type: SubSurfaceType,
    pub gross_area: f64,
    pub azimuth: f64,
    pub u_factor: f64,
    pub construction: String,
}

#[derive(Clone, Debug, Deserialize_enum_str, Eq, PartialEq, Serialize_enum_str)]
pub enum SubSurfaceType {
    FixedWindow,
    OperableWindow,
    Door,
    GlassDoor,
    OverheadDoor,
    Skylight,
    TubularDaylightDome,
    TubularDaylightDiffuser,
    #[serde(other)]
    Other(String),
}

impl SubSurfaceType {
    pub fn name(&self) -> &str {
        match self {
            SubSurfaceType::FixedWindow => "FixedWindow",
            SubSurfaceType::OperableWindow => "OperableWindow",
            SubSurfaceType::Door => "Door",
            SubSurfaceType::GlassDoor => "GlassDoor",
            SubSurfaceType::OverheadDoor => "OverheadDoor",
            SubSurfaceType::Skylight => "Skylight",
            SubSurfaceType::TubularDaylightDome => "TubularDaylightDome",
            SubSurfaceType::TubularDaylightDiffuser => "TubularDaylightDiffuser",
            SubSurfaceType::Other(name) => name.as_str(),
        }
    }

    /// Sub-surface types count as windows by name, so that custom window types supplied by the
    /// modelling engine are also picked up.
    pub fn is_window(&self) -> bool {
        self.name().contains("Window")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructionInput {
    /// material names, outermost layer first
    pub layers: Vec<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum MaterialInput {
    #[serde(rename = "OpaqueMaterial")]
    Opaque {
        solar_absorptance: f64,
        thermal_conductivity: Option<f64>,
        thickness: Option<f64>,
    },
    SimpleGlazing {
        u_factor: f64,
        solar_transmittance: f64,
    },
    StandardGlazing {
        thermal_conductance: f64,
        solar_transmittance: f64,
    },
    AirGap {
        thermal_resistance: f64,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct SimulationResultsInput {
    #[serde(default)]
    pub environment_periods: Vec<EnvironmentPeriodInput>,
    #[serde(default)]
    pub timeseries: Vec<TimeseriesInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentPeriodInput {
    pub name: String,
    pub environment_type: EnvironmentType,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum EnvironmentType {
    DesignDay,
    DesignRunPeriod,
    WeatherRunPeriod,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeseriesInput {
    pub environment_period: String,
    pub reporting_frequency: ReportingFrequency,
    pub variable_name: String,
    pub key_value: Option<String>,
    pub values: Vec<f64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum ReportingFrequency {
    Detailed,
    Timestep,
    Hourly,
    Daily,
    Monthly,
    RunPeriod,
}
