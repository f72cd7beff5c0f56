pub mod core;
pub mod errors;
pub mod input;
pub mod output;
pub mod report;
pub mod site;
pub mod statistics;

#[cfg(test)]
mod tests;

use crate::core::aggregator::BuildingResult;
use crate::core::ottv::{calculate_ottv, Evaluation};
use crate::errors::{OttvCoreError, OttvError, ReportingError};
use crate::input::ingest_for_processing;
use crate::output::Output;
use crate::report::Report;
use crate::site::{outdoor_air_temperature, ProjectSummary};
use bitflags::bitflags;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::{Read, Write};
use tracing::debug;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct ProjectFlags: u8 {
        /// Evaluate envelope walls in parallel. Results are identical to a sequential run.
        const PARALLEL_SURFACES = 0b1;
        const SURFACE_TABLES = 0b10;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResults {
    /// Unrounded building result
    pub building: BuildingResult,
    pub report: Report,
}

pub const SUMMARY_LOCATION_KEY: &str = "summary";
pub const SURFACE_OTTV_LOCATION_KEY: &str = "surface_ottv";
pub const SURFACE_DETAILS_LOCATION_KEY: &str = "surface_details";

/// Calculate the OTTV of the building model in `input`, writing the report to `output`.
pub fn run_project(
    input: impl Read,
    output: impl Output,
    flags: &ProjectFlags,
) -> Result<CalculationResults, OttvError> {
    let input = ingest_for_processing(input)?;

    let model = input
        .model
        .as_ref()
        .ok_or(OttvCoreError::MissingModel("model"))?;
    let simulation_results = input
        .simulation_results
        .as_ref()
        .ok_or(OttvCoreError::MissingModel("simulation results"))?;

    let evaluation = if flags.contains(ProjectFlags::PARALLEL_SURFACES) {
        Evaluation::Parallel
    } else {
        Evaluation::Sequential
    };
    let calculation = calculate_ottv(model, evaluation)?;

    let mut warnings = vec![];
    let outdoor_air_temperature = outdoor_air_temperature(simulation_results, &mut warnings);

    let report = Report::new(
        &calculation,
        ProjectSummary::from_model(model),
        outdoor_air_temperature,
        warnings,
    );

    if !output.is_noop() {
        write_report(&output, &report, flags)
            .map_err(|err| OttvError::FailureInReporting(ReportingError::new(err)))?;
    }

    Ok(CalculationResults {
        building: calculation.building,
        report,
    })
}

fn write_report(
    output: &impl Output,
    report: &Report,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    let mut writer = output.writer_for_location_key(SUMMARY_LOCATION_KEY, "json")?;
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    if flags.contains(ProjectFlags::SURFACE_TABLES) {
        write_surface_ottv_file(output, report)?;
        write_surface_details_file(output, report)?;
    }

    Ok(())
}

const SURFACE_OTTV_HEADINGS: [&str; 18] = [
    "Zone",
    "Space",
    "Wall",
    "Construction",
    "Gross area",
    "Solar absorptance",
    "WWR",
    "Wall U-value",
    "Window",
    "Window gross area",
    "Window WWR",
    "Window U-value",
    "CF",
    "SC",
    "OTTV",
    "Floor multiplier",
    "Area with floor",
    "OTTV x area x floor multiplier",
];

const SURFACE_OTTV_UNITS: [&str; 18] = [
    "", "", "", "", "[m2]", "[ratio]", "[ratio]", "[W/m2.K]", "", "[m2]", "[ratio]", "[W/m2.K]",
    "[ratio]", "[ratio]", "[W/m2]", "[count]", "[m2]", "[W]",
];

fn write_surface_ottv_file(output: &impl Output, report: &Report) -> anyhow::Result<()> {
    debug!("writing out {SURFACE_OTTV_LOCATION_KEY} table");
    let writer = output.writer_for_location_key(SURFACE_OTTV_LOCATION_KEY, "csv")?;
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    writer.write_record(SURFACE_OTTV_HEADINGS)?;
    writer.write_record(SURFACE_OTTV_UNITS)?;

    let blank = String::new;
    for surface in &report.surfaces {
        writer.write_record([
            surface.zone.clone(),
            surface.space.clone(),
            surface.name.clone(),
            surface.construction.clone(),
            surface.gross_area.to_string(),
            surface.solar_absorptance.to_string(),
            surface.window_to_wall_ratio.to_string(),
            surface.u_value.to_string(),
            blank(),
            blank(),
            blank(),
            blank(),
            blank(),
            blank(),
            surface.ottv.to_string(),
            surface.multiplier.to_string(),
            surface.area_with_floor.to_string(),
            surface.weighted_ottv.to_string(),
        ])?;

        // windows follow the wall they sit in
        for window in &surface.windows {
            writer.write_record([
                blank(),
                blank(),
                blank(),
                blank(),
                blank(),
                blank(),
                blank(),
                blank(),
                window.name.clone(),
                window.gross_area.to_string(),
                window.window_to_wall_ratio.to_string(),
                window.u_value.to_string(),
                window.correction_factor.to_string(),
                window.shading_coefficient.to_string(),
                blank(),
                blank(),
                blank(),
                blank(),
            ])?;
        }
    }

    let totals = &report.totals;
    writer.write_record([
        "Total".to_string(),
        blank(),
        blank(),
        blank(),
        totals.gross_area.to_string(),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
        totals.area_with_floor.to_string(),
        totals.weighted_ottv.to_string(),
    ])?;

    writer.flush()?;

    Ok(())
}

fn write_surface_details_file(output: &impl Output, report: &Report) -> anyhow::Result<()> {
    debug!("writing out {SURFACE_DETAILS_LOCATION_KEY} table");
    let writer = output.writer_for_location_key(SURFACE_DETAILS_LOCATION_KEY, "csv")?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(["Name", "Type", "Space", "Construction", "Azimuth", "Facade"])?;
    for row in &report.surface_details {
        writer.write_record([
            row.name.clone(),
            row.surface_type.clone(),
            row.space.clone(),
            row.construction.clone(),
            row.azimuth.to_string(),
            row.facade.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
