//! Error taxonomy for PhenoAge computations.
//!
//! Every core operation either fully succeeds or fails with one of these
//! variants. Nothing is retried or silently recovered; batch callers may
//! catch-and-annotate per record.

use crate::biomarkers::Biomarker;

/// Errors produced by the PhenoAge core.
#[derive(Debug, thiserror::Error)]
pub enum PhenoAgeError {
    /// One or more required biomarkers are absent. Lists every gap with its
    /// expected unit so a user can fix the whole input in one pass.
    #[error("missing required biomarkers: {}", missing_list(.missing))]
    MissingBiomarkers { missing: Vec<Biomarker> },

    /// The formula produced a non-finite intermediate or final value.
    /// Pathological inputs can push the hazard model outside its domain;
    /// callers must not assume a phenotypic age always exists.
    #[error("{quantity} is not finite (got {value}); inputs are outside the model's domain")]
    NumericDomain { quantity: &'static str, value: f64 },

    /// A simulation named an intervention that is not in the catalog.
    #[error("unknown intervention: {0}")]
    UnknownIntervention(String),
}

/// Result type for PhenoAge core operations.
pub type Result<T> = std::result::Result<T, PhenoAgeError>;

fn missing_list(missing: &[Biomarker]) -> String {
    missing
        .iter()
        .map(|m| format!("{} ({})", m.canonical_key(), m.unit()))
        .collect::<Vec<_>>()
        .join(", ")
}
