// Coefficients of the OTTV equation, MS 1525:2001 clause 5.2.1:
// OTTV = 15 * alpha * (1 - WWR) * Uw + 6 * WWR * Uf + 194 * CF * WWR * SC
pub const WALL_CONDUCTION_COEFFICIENT: f64 = 15.;
pub const FENESTRATION_CONDUCTION_COEFFICIENT: f64 = 6.;
pub const FENESTRATION_SOLAR_COEFFICIENT: f64 = 194.;

/// Solar transmittance of the 3mm clear reference glass used to derive a shading coefficient.
pub const REFERENCE_GLASS_SOLAR_TRANSMITTANCE: f64 = 0.87;

/// OTTV at or below which a result is flagged as compliant, in W/m2
pub const OTTV_COMPLIANCE_INDICATOR_THRESHOLD: f64 = 45.0;

/// OTTV limit stated by MS 1525:2001 for buildings with at least 4000 m2 of air-conditioned area,
/// in W/m2. Kept apart from the indicator threshold, which is stricter.
pub const OTTV_CODE_LIMIT: f64 = 50.0;
/// Total air-conditioned area from which the code limit applies, in m2
pub const CODE_LIMIT_MIN_CONDITIONED_AREA: f64 = 4000.0;

pub const DEGREES_PER_REVOLUTION: f64 = 360.;

/// An angle in degrees clockwise from north, normalised into [0, 360).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Azimuth(f64);

impl Azimuth {
    /// Combine a site-relative azimuth with the building's north axis offset.
    ///
    /// Returns `None` for non-finite input, which has no direction.
    pub(crate) fn from_site_relative(azimuth: f64, north_axis: f64) -> Option<Self> {
        let angle = azimuth + north_axis;
        if !angle.is_finite() {
            return None;
        }

        let mut normalised = angle.rem_euclid(DEGREES_PER_REVOLUTION);
        // rem_euclid rounds up to the modulus itself for tiny negative angles
        if normalised >= DEGREES_PER_REVOLUTION {
            normalised -= DEGREES_PER_REVOLUTION;
        }

        Some(Self(normalised))
    }

    pub fn angle(&self) -> f64 {
        self.0
    }
}

/// Round for display, half away from zero. Never used for values that feed the calculation.
pub fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
