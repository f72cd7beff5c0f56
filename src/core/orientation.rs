use crate::core::units::Azimuth;
use crate::errors::OttvCoreError;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// The eight compass orientations a facade can be assigned to. Facades between these are assigned
/// the nearest one.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize)]
pub enum OrientationBucket {
    North,
    #[strum(serialize = "North-East")]
    #[serde(rename = "North-East")]
    NorthEast,
    East,
    #[strum(serialize = "South-East")]
    #[serde(rename = "South-East")]
    SouthEast,
    South,
    #[strum(serialize = "South-West")]
    #[serde(rename = "South-West")]
    SouthWest,
    West,
    #[strum(serialize = "North-West")]
    #[serde(rename = "North-West")]
    NorthWest,
}

const NORTH_LOWER_BOUND: f64 = 337.5;
const NORTH_UPPER_BOUND: f64 = 22.5;

// 45 degree wedges centred on each compass point, lower bound inclusive.
// North straddles 0 so is handled separately.
const WEDGES: [(f64, f64, OrientationBucket); 7] = [
    (22.5, 67.5, OrientationBucket::NorthEast),
    (67.5, 112.5, OrientationBucket::East),
    (112.5, 157.5, OrientationBucket::SouthEast),
    (157.5, 202.5, OrientationBucket::South),
    (202.5, 247.5, OrientationBucket::SouthWest),
    (247.5, 292.5, OrientationBucket::West),
    (292.5, 337.5, OrientationBucket::NorthWest),
];

/// Classify a site-relative azimuth into a compass orientation.
///
/// Arguments:
/// * `azimuth` - azimuth of the surface as given by the model, in degrees
/// * `north_axis` - rotation of the building relative to true north, in degrees
///
/// Returns the azimuth normalised into [0, 360) alongside its orientation.
pub fn classify_azimuth(
    azimuth: f64,
    north_axis: f64,
) -> Result<(Azimuth, OrientationBucket), OttvCoreError> {
    let normalised = Azimuth::from_site_relative(azimuth, north_axis)
        .ok_or(OttvCoreError::OrientationLookupInconsistency { azimuth })?;
    let angle = normalised.angle();

    if angle >= NORTH_LOWER_BOUND || angle < NORTH_UPPER_BOUND {
        return Ok((normalised, OrientationBucket::North));
    }

    WEDGES
        .iter()
        .find(|(lower, upper, _)| (*lower..*upper).contains(&angle))
        .map(|(_, _, bucket)| (normalised, *bucket))
        .ok_or(OttvCoreError::OrientationLookupInconsistency { azimuth })
}
