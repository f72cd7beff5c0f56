use crate::core::orientation::OrientationBucket;
use crate::errors::OttvCoreError;
use indexmap::IndexMap;
use std::sync::LazyLock;

/// Solar correction factors for vertical surfaces, MS 1525:2001 Table 2
pub static CORRECTION_FACTORS: LazyLock<IndexMap<OrientationBucket, f64>> = LazyLock::new(|| {
    IndexMap::from([
        (OrientationBucket::North, 0.90),
        (OrientationBucket::NorthEast, 1.09),
        (OrientationBucket::East, 1.23),
        (OrientationBucket::SouthEast, 1.13),
        (OrientationBucket::South, 0.92),
        (OrientationBucket::SouthWest, 0.90),
        (OrientationBucket::West, 0.94),
        (OrientationBucket::NorthWest, 0.90),
    ])
});

/// Look up the solar correction factor for an orientation.
///
/// An orientation missing from the table is an internal inconsistency rather than a zero solar
/// contribution, so it is an error.
pub fn correction_factor_for(
    bucket: OrientationBucket,
    azimuth: f64,
) -> Result<f64, OttvCoreError> {
    CORRECTION_FACTORS
        .get(&bucket)
        .copied()
        .ok_or(OttvCoreError::OrientationLookupInconsistency { azimuth })
}
