//! Canonical biomarker keys and the complete panel record.

use serde::{Deserialize, Serialize};

/// One of the ten inputs required by the PhenoAge clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biomarker {
    Albumin,
    Creatinine,
    Glucose,
    Crp,
    Lymphocyte,
    Mcv,
    Rdw,
    AlkalinePhosphatase,
    Wbc,
    ChronologicalAge,
}

impl Biomarker {
    /// All ten markers in panel order.
    pub const ALL: [Biomarker; 10] = [
        Biomarker::Albumin,
        Biomarker::Creatinine,
        Biomarker::Glucose,
        Biomarker::Crp,
        Biomarker::Lymphocyte,
        Biomarker::Mcv,
        Biomarker::Rdw,
        Biomarker::AlkalinePhosphatase,
        Biomarker::Wbc,
        Biomarker::ChronologicalAge,
    ];

    /// Canonical snake_case key used in files and reports.
    pub fn canonical_key(self) -> &'static str {
        match self {
            Self::Albumin => "albumin",
            Self::Creatinine => "creatinine",
            Self::Glucose => "glucose",
            Self::Crp => "crp",
            Self::Lymphocyte => "lymphocyte",
            Self::Mcv => "mcv",
            Self::Rdw => "rdw",
            Self::AlkalinePhosphatase => "alkaline_phosphatase",
            Self::Wbc => "wbc",
            Self::ChronologicalAge => "chronological_age",
        }
    }

    /// Measurement unit this marker is expected in, for user-facing
    /// diagnostics.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Albumin => "g/dL",
            Self::Creatinine => "mg/dL",
            Self::Glucose => "mg/dL",
            Self::Crp => "mg/L",
            Self::Lymphocyte => "%",
            Self::Mcv => "fL",
            Self::Rdw => "%",
            Self::AlkalinePhosphatase => "U/L",
            Self::Wbc => "10^3 cells/µL",
            Self::ChronologicalAge => "years",
        }
    }
}

impl std::fmt::Display for Biomarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_key())
    }
}

/// A complete set of the ten biomarker values.
///
/// Completeness is guaranteed by construction: building a panel from partial
/// input goes through [`crate::biomarkers::BiomarkerInput`], which fails if
/// any marker is absent. Values are not range-checked; the clock accepts any
/// finite real and guards only the CRP log term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerPanel {
    /// Albumin (g/dL).
    pub albumin: f64,
    /// Creatinine (mg/dL).
    pub creatinine: f64,
    /// Fasting glucose (mg/dL).
    pub glucose: f64,
    /// C-reactive protein (mg/L).
    pub crp: f64,
    /// Lymphocyte percentage (%).
    pub lymphocyte: f64,
    /// Mean cell volume (fL).
    pub mcv: f64,
    /// Red cell distribution width (%).
    pub rdw: f64,
    /// Alkaline phosphatase (U/L).
    pub alkaline_phosphatase: f64,
    /// White blood cell count (10^3 cells/µL).
    pub wbc: f64,
    /// Chronological age (years).
    pub chronological_age: f64,
}

impl BiomarkerPanel {
    /// Value for a marker.
    pub fn get(&self, marker: Biomarker) -> f64 {
        match marker {
            Biomarker::Albumin => self.albumin,
            Biomarker::Creatinine => self.creatinine,
            Biomarker::Glucose => self.glucose,
            Biomarker::Crp => self.crp,
            Biomarker::Lymphocyte => self.lymphocyte,
            Biomarker::Mcv => self.mcv,
            Biomarker::Rdw => self.rdw,
            Biomarker::AlkalinePhosphatase => self.alkaline_phosphatase,
            Biomarker::Wbc => self.wbc,
            Biomarker::ChronologicalAge => self.chronological_age,
        }
    }

    /// Overwrite the value for a marker.
    pub fn set(&mut self, marker: Biomarker, value: f64) {
        match marker {
            Biomarker::Albumin => self.albumin = value,
            Biomarker::Creatinine => self.creatinine = value,
            Biomarker::Glucose => self.glucose = value,
            Biomarker::Crp => self.crp = value,
            Biomarker::Lymphocyte => self.lymphocyte = value,
            Biomarker::Mcv => self.mcv = value,
            Biomarker::Rdw => self.rdw = value,
            Biomarker::AlkalinePhosphatase => self.alkaline_phosphatase = value,
            Biomarker::Wbc => self.wbc = value,
            Biomarker::ChronologicalAge => self.chronological_age = value,
        }
    }

    /// Iterate over all markers in panel order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Biomarker, f64)> + '_ {
        Biomarker::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_panel() -> BiomarkerPanel {
        BiomarkerPanel {
            albumin: 4.2,
            creatinine: 0.9,
            glucose: 85.0,
            crp: 0.5,
            lymphocyte: 32.0,
            mcv: 88.0,
            rdw: 12.9,
            alkaline_phosphatase: 62.0,
            wbc: 5.2,
            chronological_age: 40.0,
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut panel = sample_panel();
        for marker in Biomarker::ALL {
            panel.set(marker, 1.5);
            assert_eq!(panel.get(marker), 1.5);
        }
    }

    #[test]
    fn test_iter_covers_all_markers_in_order() {
        let panel = sample_panel();
        let keys: Vec<_> = panel.iter().map(|(m, _)| m).collect();
        assert_eq!(keys, Biomarker::ALL.to_vec());
    }

    #[test]
    fn test_serde_uses_canonical_keys() {
        let panel = sample_panel();
        let json = serde_json::to_value(panel).unwrap();
        for marker in Biomarker::ALL {
            assert!(json.get(marker.canonical_key()).is_some(), "{marker}");
        }
    }

    #[test]
    fn test_biomarker_serde_snake_case() {
        let json = serde_json::to_string(&Biomarker::AlkalinePhosphatase).unwrap();
        assert_eq!(json, "\"alkaline_phosphatase\"");
    }
}
