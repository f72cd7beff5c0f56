/// A simple statistics module summarising timeseries that are shown alongside the OTTV result.
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};

pub fn percentile(numbers: &[f64], percentile: usize) -> f64 {
    let mut data = Data::new(numbers.to_vec());

    data.percentile(percentile)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub min: f64,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
}

/// Summarise a series, or `None` for an empty one.
pub fn summarise(values: &[f64]) -> Option<SeriesSummary> {
    if values.is_empty() {
        return None;
    }

    Some(SeriesSummary {
        min: Statistics::min(values),
        mean: Statistics::mean(values),
        median: percentile(values, 50),
        max: Statistics::max(values),
    })
}
