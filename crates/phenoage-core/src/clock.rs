//! The Levine PhenoAge clock.
//!
//! Closed-form hazard model over nine clinical biomarkers plus chronological
//! age. Constants are fixed by the published model and must not drift: two
//! runs over the same panel produce bit-identical results.

use serde::{Deserialize, Serialize};

use crate::biomarkers::BiomarkerPanel;
use crate::error::{PhenoAgeError, Result};

/// Gompertz follow-up window, in months.
const T_MONTHS: f64 = 120.0;
/// Gompertz gamma.
const GAMMA: f64 = 0.0076927;
/// Intercept of the linear combination.
const INTERCEPT: f64 = -19.9067;
/// Floor applied to the CRP log argument. Numerical guard against a log
/// domain error when crp <= 0, not a clinical rule.
const CRP_LOG_FLOOR: f64 = 1e-6;

const W_ALBUMIN: f64 = -0.0336;
const W_CREATININE: f64 = 0.0095;
const W_GLUCOSE: f64 = 0.1953;
const W_CRP: f64 = 0.0954;
const W_LYMPHOCYTE: f64 = -0.0120;
const W_MCV: f64 = 0.0268;
const W_RDW: f64 = 0.3306;
const W_ALKALINE_PHOSPHATASE: f64 = 0.0019;
const W_WBC: f64 = 0.0554;
const W_CHRONOLOGICAL_AGE: f64 = 0.0804;

/// Full output of one clock evaluation.
///
/// Derived purely from a [`BiomarkerPanel`]; never mutated after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhenoAgeResult {
    /// Weighted linear combination of converted inputs plus intercept.
    pub lin_comb: f64,
    /// 10-year mortality score, in (0, 1) for finite `lin_comb`.
    pub mort_score: f64,
    /// Phenotypic age in years.
    pub pheno_age: f64,
    /// Estimated DNAm-age proxy in years.
    pub est_dnam_age: f64,
    /// Secondary mortality score derived from the DNAm-age proxy.
    pub est_d_mscore: f64,
    /// Per-biomarker weighted terms of the linear combination.
    pub terms: BiomarkerPanel,
    /// Raw inputs, as supplied.
    pub inputs: BiomarkerPanel,
    /// Unit-converted inputs the weights were applied to (CRP is the floored
    /// natural log).
    pub converted_inputs: BiomarkerPanel,
}

/// Evaluate the PhenoAge clock for a complete panel.
///
/// Values are taken as-is, including physiologically implausible ones; the
/// only input guard is the CRP log floor.
///
/// # Errors
///
/// Returns [`PhenoAgeError::NumericDomain`] when an intermediate or final
/// quantity is non-finite (extreme inputs can drive the mortality score to 1,
/// which sends the age through a log of a non-positive number).
pub fn compute_phenoage(panel: &BiomarkerPanel) -> Result<PhenoAgeResult> {
    // Unit conversions the published weights expect.
    let converted = BiomarkerPanel {
        albumin: panel.albumin * 10.0,           // g/dL -> g/L
        creatinine: panel.creatinine * 88.4,     // mg/dL -> µmol/L
        glucose: panel.glucose * 0.0555,         // mg/dL -> mmol/L
        crp: (panel.crp * 0.1).max(CRP_LOG_FLOOR).ln(), // mg/L -> ln(mg/dL)
        lymphocyte: panel.lymphocyte,
        mcv: panel.mcv,
        rdw: panel.rdw,
        alkaline_phosphatase: panel.alkaline_phosphatase,
        wbc: panel.wbc,
        chronological_age: panel.chronological_age,
    };

    let terms = BiomarkerPanel {
        albumin: converted.albumin * W_ALBUMIN,
        creatinine: converted.creatinine * W_CREATININE,
        glucose: converted.glucose * W_GLUCOSE,
        crp: converted.crp * W_CRP,
        lymphocyte: converted.lymphocyte * W_LYMPHOCYTE,
        mcv: converted.mcv * W_MCV,
        rdw: converted.rdw * W_RDW,
        alkaline_phosphatase: converted.alkaline_phosphatase * W_ALKALINE_PHOSPHATASE,
        wbc: converted.wbc * W_WBC,
        chronological_age: converted.chronological_age * W_CHRONOLOGICAL_AGE,
    };

    let lin_comb = finite(
        "linear combination",
        terms.albumin
            + terms.creatinine
            + terms.glucose
            + terms.crp
            + terms.lymphocyte
            + terms.mcv
            + terms.rdw
            + terms.alkaline_phosphatase
            + terms.wbc
            + terms.chronological_age
            + INTERCEPT,
    )?;

    // MortScore = 1 - exp(-exp(L) * (exp(g*t) - 1) / g)
    let mort_score = finite(
        "mortality score",
        1.0 - (-lin_comb.exp() * ((GAMMA * T_MONTHS).exp() - 1.0) / GAMMA).exp(),
    )?;

    // PhenoAge = 141.50225 + ln(-0.00553 * ln(1 - MortScore)) / 0.090165
    let pheno_age = finite(
        "phenotypic age",
        141.50225 + (-0.00553 * (1.0 - mort_score).ln()).ln() / 0.090165,
    )?;

    // estDNAmAge = PhenoAge / (1 + 1.28047 * exp(0.0344329 * (PhenoAge - 182.344)))
    let est_dnam_age = finite(
        "estimated DNAm age",
        pheno_age / (1.0 + 1.28047 * (0.0344329 * (pheno_age - 182.344)).exp()),
    )?;

    // estDMScore = 1 - exp(-0.000520363523 * exp(0.090165 * estDNAmAge))
    let est_d_mscore = finite(
        "estimated mortality score",
        1.0 - (-0.000520363523 * (0.090165 * est_dnam_age).exp()).exp(),
    )?;

    Ok(PhenoAgeResult {
        lin_comb,
        mort_score,
        pheno_age,
        est_dnam_age,
        est_d_mscore,
        terms,
        inputs: *panel,
        converted_inputs: converted,
    })
}

fn finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhenoAgeError::NumericDomain { quantity, value })
    }
}
