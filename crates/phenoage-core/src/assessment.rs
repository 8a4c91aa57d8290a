//! High-level assessment facade.
//!
//! Ties the clock, the percentile model, and the intervention engine into the
//! report-shaped types callers actually want: a single assessment, an
//! assessment with intervention rankings, and a simulation annotated with
//! percentiles and per-biomarker changes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::biomarkers::{Biomarker, BiomarkerPanel};
use crate::clock::{compute_phenoage, PhenoAgeResult};
use crate::error::Result;
use crate::interventions::{rank_interventions, simulate_combined, RankingEntry, SimulationResult};
use crate::percentile::{interpret_percentile, percentile, reference_values, ReferenceValues};

/// One subject's biological-age assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BioAgeAssessment {
    pub chronological_age: f64,
    pub phenotypic_age: f64,
    /// Percentile among chronological-age peers, higher is better.
    pub percentile: f64,
    /// `phenotypic_age - chronological_age`; negative is younger.
    pub age_difference: f64,
    /// Human-readable form of `age_difference`.
    pub age_difference_text: String,
    pub interpretation: String,
    pub reference_values: ReferenceValues,
}

/// [`BioAgeAssessment`] plus the full clock output and intervention ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteAssessment {
    #[serde(flatten)]
    pub assessment: BioAgeAssessment,
    pub clock: PhenoAgeResult,
    pub rankings: Vec<RankingEntry>,
}

/// Movement of a single biomarker across a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerChange {
    pub biomarker: Biomarker,
    pub original_value: f64,
    pub new_value: f64,
    pub change: f64,
    /// Percent of the original value; infinite when the original was zero.
    pub percent_change: f64,
}

/// A combined simulation annotated with percentile context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    #[serde(flatten)]
    pub simulation: SimulationResult,
    pub original_percentile: f64,
    pub new_percentile: f64,
    pub percentile_change: f64,
    pub original_interpretation: String,
    pub new_interpretation: String,
    /// Every biomarker the simulation moved, in panel order.
    pub biomarker_changes: Vec<BiomarkerChange>,
}

/// Assess a subject's biological age against chronological-age peers.
///
/// # Errors
///
/// Propagates numeric-domain errors from the clock.
pub fn bioage_assessment(panel: &BiomarkerPanel) -> Result<BioAgeAssessment> {
    let pheno_age = compute_phenoage(panel)?.pheno_age;
    let chron = panel.chronological_age;
    let pct = percentile(chron, pheno_age);
    let diff = pheno_age - chron;
    debug!(chronological = chron, phenotypic = pheno_age, percentile = pct);
    Ok(BioAgeAssessment {
        chronological_age: chron,
        phenotypic_age: pheno_age,
        percentile: pct,
        age_difference: diff,
        age_difference_text: age_difference_text(diff),
        interpretation: interpret_percentile(pct).to_string(),
        reference_values: reference_values(chron),
    })
}

/// Full assessment: percentile context, clock internals, and the complete
/// intervention ranking.
///
/// # Errors
///
/// Propagates numeric-domain errors from the clock.
pub fn complete_assessment(panel: &BiomarkerPanel) -> Result<CompleteAssessment> {
    Ok(CompleteAssessment {
        assessment: bioage_assessment(panel)?,
        clock: compute_phenoage(panel)?,
        rankings: rank_interventions(panel)?,
    })
}

/// Run a combined simulation and annotate it with before/after percentiles
/// and the list of biomarkers it moved.
///
/// Percentiles are computed against the subject's chronological age on both
/// sides; the reported (synergy-floored) age is what feeds the new
/// percentile.
///
/// # Errors
///
/// Returns an unknown-intervention error for unrecognised names, or a
/// numeric-domain error from the clock.
pub fn simulate_with_percentiles<S: AsRef<str>>(
    panel: &BiomarkerPanel,
    names: &[S],
) -> Result<SimulationReport> {
    let simulation = simulate_combined(panel, names)?;
    let chron = panel.chronological_age;
    let original_percentile = percentile(chron, simulation.original_pheno_age);
    let new_percentile = percentile(chron, simulation.new_pheno_age);

    let mut biomarker_changes = Vec::new();
    for (marker, original_value) in simulation.original_biomarkers.iter() {
        let new_value = simulation.updated_biomarkers.get(marker);
        if new_value == original_value {
            continue;
        }
        let change = new_value - original_value;
        let percent_change = if original_value == 0.0 {
            f64::INFINITY * change.signum()
        } else {
            change / original_value * 100.0
        };
        biomarker_changes.push(BiomarkerChange {
            biomarker: marker,
            original_value,
            new_value,
            change,
            percent_change,
        });
    }

    Ok(SimulationReport {
        original_interpretation: interpret_percentile(original_percentile).to_string(),
        new_interpretation: interpret_percentile(new_percentile).to_string(),
        percentile_change: new_percentile - original_percentile,
        original_percentile,
        new_percentile,
        simulation,
        biomarker_changes,
    })
}

fn age_difference_text(diff: f64) -> String {
    if diff < 0.0 {
        format!("{:.1} years YOUNGER than chronological age", -diff)
    } else if diff > 0.0 {
        format!("{diff:.1} years OLDER than chronological age")
    } else {
        "exactly matching chronological age".to_string()
    }
}
