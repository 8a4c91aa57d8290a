//! Partial biomarker input, accumulated from labeled readings.

use std::collections::BTreeMap;

use super::alias::normalize_label;
use super::panel::{Biomarker, BiomarkerPanel};
use crate::error::{PhenoAgeError, Result};

/// A partially assembled biomarker set.
///
/// Readings arrive one at a time from files or flags; conversion into a
/// [`BiomarkerPanel`] enforces the all-ten-present invariant and reports
/// every missing marker at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiomarkerInput {
    values: BTreeMap<Biomarker, f64>,
}

impl BiomarkerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a canonical marker. Later values overwrite earlier
    /// ones.
    pub fn set(&mut self, marker: Biomarker, value: f64) {
        self.values.insert(marker, value);
    }

    /// Record a value under a free-text label. Returns `false` (and stores
    /// nothing) when the label is not a recognised biomarker alias.
    pub fn set_labeled(&mut self, label: &str, value: f64) -> bool {
        match normalize_label(label) {
            Some(marker) => {
                self.set(marker, value);
                true
            }
            None => false,
        }
    }

    /// Value recorded for a marker, if any.
    pub fn get(&self, marker: Biomarker) -> Option<f64> {
        self.values.get(&marker).copied()
    }

    /// Markers not yet recorded, in panel order.
    pub fn missing(&self) -> Vec<Biomarker> {
        Biomarker::ALL
            .into_iter()
            .filter(|m| !self.values.contains_key(m))
            .collect()
    }

    /// Finalize into a complete panel.
    ///
    /// # Errors
    ///
    /// Returns [`PhenoAgeError::MissingBiomarkers`] naming every absent
    /// marker (with its expected unit) when the input is incomplete.
    pub fn into_panel(self) -> Result<BiomarkerPanel> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(PhenoAgeError::MissingBiomarkers { missing });
        }
        let get = |m: Biomarker| self.values[&m];
        Ok(BiomarkerPanel {
            albumin: get(Biomarker::Albumin),
            creatinine: get(Biomarker::Creatinine),
            glucose: get(Biomarker::Glucose),
            crp: get(Biomarker::Crp),
            lymphocyte: get(Biomarker::Lymphocyte),
            mcv: get(Biomarker::Mcv),
            rdw: get(Biomarker::Rdw),
            alkaline_phosphatase: get(Biomarker::AlkalinePhosphatase),
            wbc: get(Biomarker::Wbc),
            chronological_age: get(Biomarker::ChronologicalAge),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> BiomarkerInput {
        let mut input = BiomarkerInput::new();
        for (i, marker) in Biomarker::ALL.into_iter().enumerate() {
            input.set(marker, i as f64 + 1.0);
        }
        input
    }

    #[test]
    fn test_complete_input_builds_panel() {
        let panel = full_input().into_panel().unwrap();
        assert_eq!(panel.albumin, 1.0);
        assert_eq!(panel.chronological_age, 10.0);
    }

    #[test]
    fn test_missing_markers_all_reported() {
        let mut input = BiomarkerInput::new();
        input.set(Biomarker::Albumin, 4.2);
        input.set(Biomarker::Glucose, 85.0);
        let err = input.into_panel().unwrap_err();
        match err {
            PhenoAgeError::MissingBiomarkers { missing } => {
                assert_eq!(missing.len(), 8);
                assert!(!missing.contains(&Biomarker::Albumin));
                assert!(!missing.contains(&Biomarker::Glucose));
                assert!(missing.contains(&Biomarker::Crp));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_set_labeled_via_alias() {
        let mut input = BiomarkerInput::new();
        assert!(input.set_labeled("ALP", 62.0));
        assert_eq!(input.get(Biomarker::AlkalinePhosphatase), Some(62.0));
    }

    #[test]
    fn test_set_labeled_rejects_unknown() {
        let mut input = BiomarkerInput::new();
        assert!(!input.set_labeled("subject_id", 1.0));
        assert_eq!(input.missing().len(), 10);
    }

    #[test]
    fn test_later_values_overwrite() {
        let mut input = BiomarkerInput::new();
        input.set(Biomarker::Crp, 1.0);
        input.set_labeled("c-reactive protein", 2.5);
        assert_eq!(input.get(Biomarker::Crp), Some(2.5));
    }
}
