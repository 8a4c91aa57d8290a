//! Record-oriented batch processing.
//!
//! Works on loosely-typed records (string keys to JSON values) so the CLI can
//! feed rows straight from TSV/CSV/JSON files. Recognised biomarker columns
//! are assembled into a panel; unrecognised columns pass through untouched.
//! Failures never abort a batch: each failing record gets an `error` column
//! and processing moves on.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::warn;

use crate::assessment::simulate_with_percentiles;
use crate::biomarkers::{normalize_label, BiomarkerInput, BiomarkerPanel};
use crate::clock::compute_phenoage;
use crate::error::Result;
use crate::interventions::rank_interventions;

/// One input or output row. Keys are column names; unrecognised columns are
/// carried through unchanged.
pub type Record = BTreeMap<String, Value>;

/// How many ranking rows the `rank` enrichment appends per record.
const TOP_RANKED: usize = 5;

/// Optional per-record enrichments on top of the clock columns.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Append the top-5 ranked interventions as `rankN_intervention` /
    /// `rankN_impact` columns (impact is years of improvement, positive).
    pub rank: bool,
    /// Apply these interventions as a combined simulation and append
    /// `combined_pheno_age`, `years_younger`, `combined_percentile`, and
    /// `<biomarker>_new` / `<biomarker>_change` columns.
    pub apply: Vec<String>,
}

/// Build a panel from a record's recognised biomarker columns.
///
/// Column names go through alias normalization; values may be JSON numbers
/// or numeric strings (the usual case for rows read from TSV/CSV). A
/// recognised column with a non-numeric value counts as missing.
///
/// # Errors
///
/// Returns [`crate::PhenoAgeError::MissingBiomarkers`] listing every absent
/// marker.
pub fn panel_from_record(record: &Record) -> Result<BiomarkerPanel> {
    let mut input = BiomarkerInput::new();
    for (label, value) in record {
        let Some(marker) = normalize_label(label) else {
            continue;
        };
        if let Some(number) = numeric(value) {
            input.set(marker, number);
        }
    }
    input.into_panel()
}

/// Process one record: compute the clock columns and any requested
/// enrichments, preserving every input column.
///
/// Never fails; any error (missing biomarkers, numeric domain, unknown
/// intervention) lands in an `error` column on the returned record.
pub fn process_record(record: &Record, options: &BatchOptions) -> Record {
    let mut out = record.clone();
    match enrich(record, options) {
        Ok(columns) => out.extend(columns),
        Err(err) => {
            warn!(error = %err, "record skipped");
            out.insert("error".to_string(), Value::String(err.to_string()));
        }
    }
    out
}

/// Process a whole batch, one output record per input record.
pub fn process_records(records: &[Record], options: &BatchOptions) -> Vec<Record> {
    records
        .iter()
        .map(|record| process_record(record, options))
        .collect()
}

fn enrich(record: &Record, options: &BatchOptions) -> Result<Vec<(String, Value)>> {
    let panel = panel_from_record(record)?;
    let result = compute_phenoage(&panel)?;

    let mut columns = vec![
        ("phenoage_lin_comb".to_string(), json!(result.lin_comb)),
        ("phenoage_mort_score".to_string(), json!(result.mort_score)),
        ("phenoage_pheno_age".to_string(), json!(result.pheno_age)),
        ("phenoage_est_dnam_age".to_string(), json!(result.est_dnam_age)),
        ("phenoage_est_d_mscore".to_string(), json!(result.est_d_mscore)),
    ];

    if options.rank {
        let ranking = rank_interventions(&panel)?;
        for (i, entry) in ranking.iter().take(TOP_RANKED).enumerate() {
            let n = i + 1;
            columns.push((
                format!("rank{n}_intervention"),
                Value::String(entry.intervention.clone()),
            ));
            columns.push((format!("rank{n}_impact"), json!(-entry.delta)));
        }
    }

    if !options.apply.is_empty() {
        let report = simulate_with_percentiles(&panel, &options.apply)?;
        columns.push((
            "combined_pheno_age".to_string(),
            json!(report.simulation.new_pheno_age),
        ));
        columns.push(("years_younger".to_string(), json!(-report.simulation.delta)));
        columns.push(("combined_percentile".to_string(), json!(report.new_percentile)));
        for change in &report.biomarker_changes {
            let key = change.biomarker.canonical_key();
            columns.push((format!("{key}_new"), json!(change.new_value)));
            columns.push((format!("{key}_change"), json!(change.change)));
        }
    }

    Ok(columns)
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
