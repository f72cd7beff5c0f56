//! Project and site details shown alongside the OTTV result, and checks on the simulation results
//! that accompany the model. Nothing here feeds into the calculation.

use crate::input::{EnvironmentType, ModelInput, ReportingFrequency, SimulationResultsInput};
use crate::statistics::{summarise, SeriesSummary};
use serde::Serialize;
use tracing::{info, warn};

pub const OUTDOOR_AIR_DRYBULB_TEMPERATURE: &str = "Site Outdoor Air Drybulb Temperature";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub building_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl ProjectSummary {
    pub fn from_model(model: &ModelInput) -> Self {
        let site = model.site.as_ref();
        let weather_file = site.and_then(|site| site.weather_file.as_ref());

        Self {
            building_name: model.building.name.clone(),
            latitude: site.and_then(|site| site.latitude),
            longitude: site.and_then(|site| site.longitude),
            city: weather_file.and_then(|weather_file| weather_file.city.clone()),
            country: weather_file.and_then(|weather_file| weather_file.country.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutdoorAirTemperature {
    pub environment_period: String,
    /// degrees C; absent when the series is empty
    pub summary: Option<SeriesSummary>,
}

/// Look for the hourly outdoor dry-bulb temperature of the annual weather run.
///
/// Only the first weather file run period is considered. Anything missing is reported as a warning
/// pushed onto `warnings` rather than failing the calculation.
pub fn outdoor_air_temperature(
    results: &SimulationResultsInput,
    warnings: &mut Vec<String>,
) -> Option<OutdoorAirTemperature> {
    let Some(annual_period) = results
        .environment_periods
        .iter()
        .find(|period| period.environment_type == EnvironmentType::WeatherRunPeriod)
    else {
        push_warning(warnings, "No annual environment period found.");
        return None;
    };

    let Some(timeseries) = results.timeseries.iter().find(|timeseries| {
        timeseries.environment_period == annual_period.name
            && timeseries.reporting_frequency == ReportingFrequency::Hourly
            && timeseries.variable_name == OUTDOOR_AIR_DRYBULB_TEMPERATURE
            && timeseries.key_value.as_deref().unwrap_or_default().is_empty()
    }) else {
        push_warning(warnings, "Timeseries not found.");
        return None;
    };

    info!(
        "Found timeseries '{}' for '{}' with {} values",
        timeseries.variable_name,
        annual_period.name,
        timeseries.values.len()
    );

    Some(OutdoorAirTemperature {
        environment_period: annual_period.name.clone(),
        summary: summarise(&timeseries.values),
    })
}

fn push_warning(warnings: &mut Vec<String>, warning: &str) {
    warn!("{warning}");
    warnings.push(warning.to_string());
}
