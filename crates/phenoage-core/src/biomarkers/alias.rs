//! Free-text biomarker label normalization.
//!
//! Lab exports label the same analyte many ways ("ALP", "alk phos",
//! "Alkaline Phosphatase"). This table maps known spellings to the canonical
//! key, case-insensitively. Unrecognised labels return `None` and are treated
//! by callers as passthrough columns (IDs, dates, notes).

use super::panel::Biomarker;

/// Resolve a free-text column label to its canonical biomarker, if known.
///
/// Matching trims surrounding whitespace and ignores ASCII case. Canonical
/// keys always resolve to themselves.
pub fn normalize_label(label: &str) -> Option<Biomarker> {
    let key = label.trim().to_ascii_lowercase();
    let marker = match key.as_str() {
        "albumin" | "alb" => Biomarker::Albumin,
        "creatinine" | "creat" => Biomarker::Creatinine,
        "glucose" | "glu" => Biomarker::Glucose,
        "crp" | "c-reactive protein" | "c reactive protein" => Biomarker::Crp,
        "lymphocyte" | "lymph" | "lymphocyte percentage" | "lymphs" | "lymphocytes" => {
            Biomarker::Lymphocyte
        }
        "mcv" | "mean cell volume" | "mean corpuscular volume" => Biomarker::Mcv,
        "rdw" | "red cell distribution width" | "rcdw" => Biomarker::Rdw,
        "alkaline_phosphatase" | "alkaline phosphatase" | "alp" | "alk phos" => {
            Biomarker::AlkalinePhosphatase
        }
        "wbc" | "white blood cells" | "white blood cell count" => Biomarker::Wbc,
        "chronological_age" | "chronological age" | "age" | "chron age" => {
            Biomarker::ChronologicalAge
        }
        _ => return None,
    };
    Some(marker)
}
