//! PhenoAge core: the Levine phenotypic-age clock, a population percentile
//! model, and an intervention ranking/simulation engine.
//!
//! The crate is a pure computation library: no I/O, no global state beyond
//! optional tracing. The `phenoage` binary provides the CLI surface.
//!
//! Typical flow: assemble a [`BiomarkerPanel`] (directly or through
//! [`BiomarkerInput`] / the batch layer's alias handling), run
//! [`compute_phenoage`], then layer on [`bioage_assessment`],
//! [`rank_interventions`], or [`simulate_with_percentiles`] as needed.

pub mod assessment;
pub mod batch;
pub mod biomarkers;
pub mod clock;
pub mod error;
pub mod interventions;
pub mod percentile;
pub mod telemetry;

pub use assessment::{
    bioage_assessment, complete_assessment, simulate_with_percentiles, BioAgeAssessment,
    BiomarkerChange, CompleteAssessment, SimulationReport,
};
pub use batch::{panel_from_record, process_record, process_records, BatchOptions, Record};
pub use biomarkers::{normalize_label, Biomarker, BiomarkerInput, BiomarkerPanel};
pub use clock::{compute_phenoage, PhenoAgeResult};
pub use error::{PhenoAgeError, Result};
pub use interventions::{
    rank_interventions, simulate_combined, Intervention, RankingEntry, SimulationResult,
    SYNERGY_FACTOR,
};
pub use percentile::{
    interpret_percentile, percentile, reference_values, PercentileTier, ReferenceValues,
    POPULATION_SD,
};
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
