use thiserror::Error;

#[derive(Debug, Error)]
pub enum OttvError {
    #[error("Request was considered invalid due to error: {0}")]
    InvalidRequest(#[from] anyhow::Error),
    #[error("Error identified during OTTV calculation: {0}")]
    FailureInCalculation(#[from] OttvCoreError),
    #[error("Error while writing out results: {0}")]
    FailureInReporting(ReportingError),
}

/// Fatal conditions of the OTTV calculation itself. None of these are retried, as the calculation
/// is a pure function of the model snapshot.
#[derive(Debug, Error)]
pub enum OttvCoreError {
    #[error("Cannot find last {0}.")]
    MissingModel(&'static str),
    #[error("Window '{sub_surface}' has outermost construction layer '{material}', which is neither a simple nor a standard glazing material")]
    UnresolvedGlazingMaterial {
        sub_surface: String,
        material: String,
    },
    #[error("Wall '{surface}' has outermost construction layer '{material}', which is not an opaque material")]
    UnresolvedOpaqueMaterial { surface: String, material: String },
    #[error("Wall '{surface}' has gross area {gross_area}, so window to wall ratios for its windows are undefined")]
    NonPositiveGrossArea { surface: String, gross_area: f64 },
    #[error("No conditioned, wind exposed wall area was found, so the building OTTV is undefined")]
    NoQualifyingEnvelope,
    #[error("Azimuth {azimuth} could not be matched to any of the eight compass orientations")]
    OrientationLookupInconsistency { azimuth: f64 },
    #[error("{kind} '{name}' referenced by '{referrer}' is not defined in the model")]
    UnknownReference {
        kind: &'static str,
        name: String,
        referrer: String,
    },
    #[error("Thermal zone '{zone}' has multiplier {multiplier}, but multipliers must be at least 1")]
    InvalidMultiplier { zone: String, multiplier: f64 },
    #[error("Construction '{construction}' used by '{referrer}' has no layers")]
    EmptyConstruction {
        construction: String,
        referrer: String,
    },
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ReportingError {
    error: anyhow::Error,
}

impl ReportingError {
    pub(crate) fn new(error: anyhow::Error) -> Self {
        Self { error }
    }
}
