//! Population percentile model for phenotypic age.
//!
//! Positions a phenotypic age against chronological-age peers using a normal
//! approximation with a fixed spread. Lower phenotypic age means a higher
//! percentile (better).

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Standard deviation of phenotypic age around chronological age, in years,
/// based on the observed population spread.
pub const POPULATION_SD: f64 = 5.5;

/// Percentile of a phenotypic age among chronological-age peers, in
/// [0, 100].
pub fn percentile(chronological_age: f64, phenotypic_age: f64) -> f64 {
    let z = (phenotypic_age - chronological_age) / POPULATION_SD;
    // Inverted: a negative z (younger than peers) lands above the 50th.
    (1.0 - standard_normal().cdf(z)) * 100.0
}

/// Reference phenotypic ages at fixed percentiles for a chronological age.
///
/// The 10th percentile is the oldest reference (worse than 90% of peers) and
/// the 90th the youngest; the 50th equals the chronological age exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValues {
    #[serde(rename = "10th")]
    pub p10: f64,
    #[serde(rename = "25th")]
    pub p25: f64,
    #[serde(rename = "50th")]
    pub p50: f64,
    #[serde(rename = "75th")]
    pub p75: f64,
    #[serde(rename = "90th")]
    pub p90: f64,
}

/// Reference table for a chronological age.
pub fn reference_values(chronological_age: f64) -> ReferenceValues {
    let normal = standard_normal();
    // Percentile p maps to the (1-p) quantile because lower age is better.
    ReferenceValues {
        p10: chronological_age + POPULATION_SD * normal.inverse_cdf(0.9),
        p25: chronological_age + POPULATION_SD * normal.inverse_cdf(0.75),
        p50: chronological_age,
        p75: chronological_age + POPULATION_SD * normal.inverse_cdf(0.25),
        p90: chronological_age + POPULATION_SD * normal.inverse_cdf(0.1),
    }
}

/// Interpretation band for a percentile score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileTier {
    Excellent,
    VeryGood,
    Good,
    BelowAverage,
    Poor,
    Concerning,
}

impl PercentileTier {
    /// Band for a percentile score, by fixed thresholds 90/75/50/25/10.
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile >= 90.0 {
            Self::Excellent
        } else if percentile >= 75.0 {
            Self::VeryGood
        } else if percentile >= 50.0 {
            Self::Good
        } else if percentile >= 25.0 {
            Self::BelowAverage
        } else if percentile >= 10.0 {
            Self::Poor
        } else {
            Self::Concerning
        }
    }

    /// Human-readable interpretation. Wording is part of the external
    /// contract and is preserved verbatim.
    pub fn description(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excellent - younger biological age than 90% of people your age"
            }
            Self::VeryGood => {
                "Very good - younger biological age than 75% of people your age"
            }
            Self::Good => "Good - younger biological age than average",
            Self::BelowAverage => "Below average - older biological age than average",
            Self::Poor => "Poor - older biological age than 75% of people your age",
            Self::Concerning => {
                "Concerning - older biological age than 90% of people your age"
            }
        }
    }
}

/// Interpretation string for a percentile score.
pub fn interpret_percentile(percentile: f64) -> &'static str {
    PercentileTier::from_percentile(percentile).description()
}

fn standard_normal() -> Normal {
    // Mean 0, SD 1 is always a valid parameterisation.
    Normal::new(0.0, 1.0).unwrap()
}
